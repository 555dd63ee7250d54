//! HTTP client for the subset of the beacon-node REST API the indexer
//! consumes.
//!
//! The client issues exactly one request per call and performs no retries;
//! retry policy belongs to the caller. A 404 is a legitimate terminal answer
//! (a missed slot, a not-yet-assigned validator index) and is surfaced as
//! `Ok(None)` rather than an error.

mod error;
pub use error::ClientError;

mod envelope;
pub use envelope::BlockMessage;

mod traits;
pub use traits::BeaconApi;

mod client;
pub use client::BeaconClient;
