//! Cross-cutting error types for gomock.
//!
//! Parsing failures live in `gomock-parser` and configuration failures in
//! `gomock-config`. The CLI converges everything into `anyhow::Error`.

use thiserror::Error;

/// Errors raised while building or checking a mock model.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A parameter or return slot has no type.
    #[error("Method {method}: slot {index} has an empty type")]
    EmptyType { method: String, index: usize },

    /// A method has no name.
    #[error("Interface {interface}: method at position {index} has no name")]
    UnnamedMethod { interface: String, index: usize },

    /// Data failed validation.
    #[error("Validation error: {0}")]
    Validation(String),
}
