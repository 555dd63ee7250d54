//! The scribe CLI.

use crate::{commands::LocateCommand, telemetry};
use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use scribe_client::BeaconClient;
use scribe_core::{Reconciler, ReconcilerConfig};
use scribe_storage::Database;
use std::{sync::Arc, time::Duration};
use tracing::info;
use url::Url;

/// The scribe CLI. Without a subcommand it runs the indexer loop.
#[derive(Parser, Debug)]
#[command(author, version, about = "Indexes beacon-chain blocks and validators into Postgres", long_about = None)]
pub(crate) struct Cli {
    /// Verbosity level (0-2).
    #[arg(long, short, action = ArgAction::Count, global = true)]
    pub(crate) v: u8,

    /// Base URL of the beacon-node REST API.
    #[arg(long = "beacon.url", env = "BEACON_URL")]
    pub(crate) beacon_url: Url,

    /// Postgres connection string.
    #[arg(long = "database.url", env = "DATABASE_URL")]
    pub(crate) database_url: String,

    /// Delay between loop iterations, in milliseconds.
    #[arg(long = "loop-delay-ms", env = "LOOP_DELAY_MS", default_value_t = 0)]
    pub(crate) loop_delay_ms: u64,

    /// Delay applied after a failed iteration, in milliseconds.
    #[arg(long = "error-delay-ms", env = "ERROR_DELAY_MS", default_value_t = 0)]
    pub(crate) error_delay_ms: u64,

    /// Skip running the embedded migrations at startup.
    #[arg(long = "skip-migrations", env = "SKIP_MIGRATIONS")]
    pub(crate) skip_migrations: bool,

    /// Port to serve Prometheus metrics on; disabled when unset.
    #[arg(long = "metrics.port", env = "METRICS_PORT")]
    pub(crate) metrics_port: Option<u16>,

    /// The subcommand to run.
    #[command(subcommand)]
    pub(crate) command: Option<Commands>,
}

/// Subcommands for the CLI.
#[derive(Debug, Subcommand)]
pub(crate) enum Commands {
    /// Locate the first slot at which a validator index is known.
    Locate(LocateCommand),
}

impl Cli {
    /// Runs the selected command.
    pub(crate) async fn run(self) -> Result<()> {
        telemetry::init_tracing(self.v);
        if let Some(port) = self.metrics_port {
            telemetry::init_prometheus(port)?;
        }

        match self.command {
            Some(Commands::Locate(command)) => {
                command.run(self.beacon_url, &self.database_url).await
            }
            None => self.index().await,
        }
    }

    /// Runs the indexer loop; only a fatal upstream error brings it back.
    async fn index(self) -> Result<()> {
        let db = Arc::new(Database::connect(&self.database_url)?);
        if self.skip_migrations {
            info!(target: "scribe", "skipping migrations");
        } else {
            db.run_migrations()?;
        }

        let client = Arc::new(BeaconClient::new(self.beacon_url));
        let config = ReconcilerConfig {
            loop_delay: Duration::from_millis(self.loop_delay_ms),
            error_delay: Duration::from_millis(self.error_delay_ms),
        };
        Reconciler::new(db, client, config)?.run().await?;
        Ok(())
    }
}
