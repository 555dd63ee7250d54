//! Scribe: walks beacon-chain blocks and validators into Postgres.

mod cli;
mod commands;
mod telemetry;

use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    cli::Cli::parse().run().await
}
