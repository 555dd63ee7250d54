use crate::{
    BeaconApi, BlockMessage, ClientError,
    envelope::{BlockEnvelope, ValidatorEnvelope},
};
use async_trait::async_trait;
use reqwest::{StatusCode, header};
use scribe_types::Validator;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

/// HTTP client for a beacon-node REST endpoint.
#[derive(Debug, Clone)]
pub struct BeaconClient {
    /// Base URL of the beacon node, scheme/host/port only.
    base: Url,
    /// The inner reqwest client.
    inner: reqwest::Client,
}

impl BeaconClient {
    /// Creates a new [`BeaconClient`] against the given base URL.
    pub fn new(base: Url) -> Self {
        Self { base, inner: reqwest::Client::new() }
    }

    /// Creates a new [`BeaconClient`] with a preconfigured [`reqwest::Client`].
    pub const fn with_client(base: Url, inner: reqwest::Client) -> Self {
        Self { base, inner }
    }

    /// Issues a single GET for `path` and decodes the 2xx body as `T`.
    ///
    /// 404 resolves to `Ok(None)`; any other non-2xx status is an error.
    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>, ClientError> {
        let url = self.base.join(path)?;
        let response =
            self.inner.get(url).header(header::ACCEPT, "application/json").send().await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            debug!(target: "beacon_client", path, "resource not found upstream");
            return Ok(None);
        }
        if !status.is_success() {
            return Err(ClientError::Status { status, path: path.to_string() });
        }

        let body = response.bytes().await?;
        Ok(Some(serde_json::from_slice(&body)?))
    }
}

#[async_trait]
impl BeaconApi for BeaconClient {
    async fn block_at_slot(&self, slot: u64) -> Result<Option<BlockMessage>, ClientError> {
        let path = format!("/eth/v2/beacon/blocks/{slot}");
        Ok(self.get::<BlockEnvelope>(&path).await?.map(BlockEnvelope::into_message))
    }

    async fn validator_at_slot(
        &self,
        slot: u64,
        index: u64,
    ) -> Result<Option<Validator>, ClientError> {
        let path = format!("/eth/v1/beacon/states/{slot}/validators/{index}");
        Ok(self.get::<ValidatorEnvelope>(&path).await?.map(|envelope| envelope.into_validator(slot)))
    }
}
