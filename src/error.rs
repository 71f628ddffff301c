use thiserror::Error;

/// Failures while talking to the node's JSON-RPC endpoint.
/// Any of these aborts the current aggregation run.
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("node answered with HTTP {0}")]
    Status(reqwest::StatusCode),

    #[error("rpc error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("unexpected response shape: {0}")]
    Schema(#[from] serde_json::Error),

    #[error("fetch task failed: {0}")]
    Task(String),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalcError {
    #[error("invalid network stats: {0}")]
    InvalidStats(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),
}
