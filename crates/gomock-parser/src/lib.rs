//! # gomock-parser
//!
//! ast-grep-based Go source parsing and interface resolution for gomock.
//!
//! - [`parser`]: Go parsing with a tree-sitter syntax check up front
//! - [`normalize`]: type expression nodes to canonical type strings
//! - [`resolver`]: named interface lookup and embedded-interface flattening
//! - [`discovery`]: interface index across a file's imported packages

pub mod discovery;
pub mod error;
pub mod normalize;
pub mod parser;
pub mod resolver;

pub use discovery::{DiscoveryIndex, ImportRef, discover_file, discover_source, package_dir};
pub use error::ParserError;
pub use normalize::{Qualifier, TypeExpr, normalize_node};
pub use resolver::{ResolveOptions, SourceIndex, resolve_file, resolve_source};
