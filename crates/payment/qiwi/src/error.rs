use thiserror::Error;

use crate::transport::TransportError;

#[derive(Error, Debug)]
pub enum QiwiError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("Failed to parse response: {0}")]
    Parse(#[source] serde_json::Error),
    #[error("Failed to serialize request body: {0}")]
    Serialize(#[source] serde_json::Error),
    #[error("Invalid amount: {0:?}")]
    InvalidAmount(String),
    #[error("Bill lifetime of {0} days is out of range")]
    InvalidLifetime(i64),
    #[error("Transaction id is required")]
    MissingTransaction,
}
