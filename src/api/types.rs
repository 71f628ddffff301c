use serde::{Deserialize, Deserializer, Serialize};

use crate::error::LedgerError;

#[derive(Debug, Serialize, Clone)]
pub struct RpcRequest<'a, P: Serialize> {
    pub jsonrpc: &'static str,
    pub id: u64,
    pub method: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<P>,
}

impl<'a, P: Serialize> RpcRequest<'a, P> {
    pub fn new(method: &'a str, params: Option<P>) -> Self {
        Self { jsonrpc: "2.0", id: 1, method, params }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct RpcResponse<T> {
    pub result: Option<T>,
    #[serde(default)]
    pub error: Option<RpcErrorBody>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RpcErrorBody {
    #[serde(default)]
    pub code: i64,
    pub message: String,
}

impl<T> RpcResponse<T> {
    /// An error envelope wins over any result that came along with it.
    pub fn into_result(self) -> Result<T, LedgerError> {
        if let Some(err) = self.error {
            return Err(LedgerError::Rpc { code: err.code, message: err.message });
        }
        self.result.ok_or_else(|| {
            LedgerError::Schema(<serde_json::Error as serde::de::Error>::custom(
                "envelope has neither result nor error",
            ))
        })
    }
}

#[derive(Debug, Serialize, Clone, Copy)]
pub struct TopoRangeParams {
    pub start_topoheight: u64,
    pub end_topoheight: u64,
}

/// `get_info` result. Only the fields we use are kept.
#[derive(Debug, Deserialize, Clone)]
pub struct ChainInfo {
    pub topoheight: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockType {
    Side,
    /// Sync and orphaned blocks are folded in here.
    #[serde(other)]
    Normal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockRecord {
    pub topoheight: u64,
    /// Milliseconds since the unix epoch.
    pub timestamp: u64,
    /// Atomic units (1 XEL = 1e8).
    #[serde(default, deserialize_with = "de_reward")]
    pub reward: u64,
    #[serde(deserialize_with = "de_difficulty")]
    pub difficulty: f64,
    pub block_type: BlockType,
}

/// A range query answers with a bare block when it spans one topoheight.
#[derive(Debug, Deserialize, Clone)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::Many(v) => v,
            OneOrMany::One(t) => vec![t],
        }
    }
}

fn de_reward<'de, D: Deserializer<'de>>(d: D) -> Result<u64, D::Error> {
    Ok(Option::<u64>::deserialize(d)?.unwrap_or(0))
}

// The node sends difficulty as a decimal string.
fn de_difficulty<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(f64),
        Text(String),
    }

    match Raw::deserialize(d)? {
        Raw::Num(v) => Ok(v),
        Raw::Text(s) => s.trim().parse::<f64>().map_err(serde::de::Error::custom),
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct UsdQuote {
    pub usd: f64,
}
