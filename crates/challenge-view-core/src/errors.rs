//! Shared error types

use thiserror::Error;

/// Errors at the data boundary. The derivation itself never fails: missing
/// or malformed fields degrade to empty/neutral results instead.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("malformed challenge payload: {0}")]
    Serialization(#[from] serde_json::Error),
}
