//! Parser error types for gomock-parser.

/// Errors that can occur while parsing Go source and resolving an interface.
#[derive(Debug, thiserror::Error)]
pub enum ParserError {
    #[error("Parse failed for {origin} at line {line}, column {column}: {message}")]
    ParseFailed {
        origin: String,
        line: usize,
        column: usize,
        message: String,
    },

    #[error("Go grammar unavailable: {0}")]
    Grammar(String),

    #[error("Resolved interface is inconsistent: {0}")]
    Model(#[from] gomock_core::CoreError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
