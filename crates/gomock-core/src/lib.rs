//! # gomock-core
//!
//! Core types shared across all gomock crates:
//! - The resolved mock model (`MockModel`, `MethodSig`, `Param`)
//! - The Go built-in type table used for qualification and zero values
//! - Cross-cutting error types

pub mod builtins;
pub mod errors;
pub mod model;

pub use errors::CoreError;
pub use model::{MethodSig, MockModel, Param, PARAM_PREFIX, RETURN_PREFIX};
