use anyhow::Result;
use clap::Args;
use scribe_client::BeaconClient;
use scribe_core::ValidatorResolver;
use scribe_storage::Database;
use std::sync::Arc;
use tracing::info;
use url::Url;

/// Searches for the first slot at which a validator index is known to the
/// chain, and prints it.
#[derive(Debug, Args)]
pub(crate) struct LocateCommand {
    /// Validator index to locate.
    #[arg(long)]
    pub(crate) validator: u64,

    /// Slot to start the search from.
    #[arg(long = "from-slot", default_value_t = 0)]
    pub(crate) from_slot: u64,
}

impl LocateCommand {
    /// Runs the first-appearance search.
    pub(crate) async fn run(self, beacon_url: Url, database_url: &str) -> Result<()> {
        let db = Arc::new(Database::connect(database_url)?);
        let client = Arc::new(BeaconClient::new(beacon_url));
        let resolver = ValidatorResolver::new(db, client);

        let slot = resolver.find_first_slot(self.validator, self.from_slot).await?;
        info!(target: "scribe", validator = self.validator, slot, "first appearance located");
        println!("{slot}");
        Ok(())
    }
}
