//! # gomock-codegen
//!
//! Go source generation for gomock:
//!
//! - [`zero`]: zero-value expressions for canonical type strings
//! - [`emitter`]: the mock struct, its callbacks and forwarding methods

pub mod emitter;
pub mod zero;

pub use emitter::{EmitOptions, render};
pub use zero::{ZeroValues, default_value};
