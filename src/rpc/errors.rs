//! # RPC Errors
//!
//! Per-request failures. Each maps to a JSON-RPC error code.

use serde_json::{json, Value};
use thiserror::Error;

use crate::codec::DecodeError;

/// Result type for RPC requests
pub type RpcResult<T> = Result<T, RpcError>;

/// RPC request errors
#[derive(Debug, Clone, Error)]
pub enum RpcError {
    /// Request is not a well-formed call
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// No method with this identifier
    #[error("Method not found: {0}")]
    MethodNotFound(String),

    /// Method needs a parameter the request did not carry
    #[error("Missing parameter: {0}")]
    MissingParameter(String),

    /// Parameter did not decode
    #[error("Invalid params: {0}")]
    InvalidParams(#[from] DecodeError),

    /// Outgoing message exceeds the configured limit
    #[error("Message too large (max: {0} bytes)")]
    MessageTooLarge(usize),
}

impl RpcError {
    /// Returns the JSON-RPC error code
    pub fn code(&self) -> i64 {
        match self {
            RpcError::InvalidRequest(_) => -32600,
            RpcError::MethodNotFound(_) => -32601,
            RpcError::MissingParameter(_) => -32602,
            RpcError::InvalidParams(_) => -32602,
            RpcError::MessageTooLarge(_) => -32603,
        }
    }

    /// Renders the JSON-RPC error object
    pub fn to_json(&self) -> Value {
        json!({
            "code": self.code(),
            "message": self.to_string(),
        })
    }
}
