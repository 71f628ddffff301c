use super::types::*;
use crate::error::LedgerError;
use async_trait::async_trait;
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

/// Anything that can hand out blocks by descending topoheight.
#[async_trait]
pub trait LedgerSource: Send + Sync {
    /// Current topoheight of the chain tip.
    async fn chain_height(&self) -> Result<u64, LedgerError>;

    /// Blocks in `[start, end]`, inclusive on both ends.
    async fn blocks_in_range(&self, start: u64, end: u64) -> Result<Vec<BlockRecord>, LedgerError>;
}

/// JSON-RPC client for a XELIS daemon.
#[derive(Clone)]
pub struct NodeClient {
    endpoint: Url,
    http: reqwest::Client,
}

impl NodeClient {
    pub fn new(endpoint: &str, timeout: Option<Duration>) -> anyhow::Result<Self> {
        let endpoint = Url::parse(endpoint)?;
        let http = super::http_client(timeout)?;
        Ok(Self { endpoint, http })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    async fn call<P, T>(&self, method: &str, params: Option<P>) -> Result<T, LedgerError>
    where
        P: Serialize + Send,
        T: DeserializeOwned,
    {
        let req = RpcRequest::new(method, params);
        let resp = self.http.post(self.endpoint.clone()).json(&req).send().await?;
        let status = resp.status();
        let body = resp.bytes().await?;

        // Some daemons pair an error envelope with a non-2xx status; keep the message.
        match serde_json::from_slice::<RpcResponse<T>>(&body) {
            Ok(envelope) => envelope.into_result(),
            Err(_) if !status.is_success() => Err(LedgerError::Status(status)),
            Err(e) => Err(LedgerError::Schema(e)),
        }
    }
}

#[async_trait]
impl LedgerSource for NodeClient {
    async fn chain_height(&self) -> Result<u64, LedgerError> {
        let info: ChainInfo = self.call::<(), _>("get_info", None).await?;
        Ok(info.topoheight)
    }

    async fn blocks_in_range(&self, start: u64, end: u64) -> Result<Vec<BlockRecord>, LedgerError> {
        let params = TopoRangeParams { start_topoheight: start, end_topoheight: end };
        let blocks: OneOrMany<BlockRecord> = self
            .call("get_blocks_range_by_topoheight", Some(params))
            .await?;
        Ok(blocks.into_vec())
    }
}
