//! One-shot subcommands.

mod locate;
pub(crate) use locate::LocateCommand;
