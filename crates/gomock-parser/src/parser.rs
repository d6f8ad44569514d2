//! ast-grep wrapper for Go sources, with a tree-sitter syntax check.
//!
//! ast-grep keeps going on malformed input and leaves `ERROR`/missing nodes in
//! the tree. Mock generation must not run on a partial tree, so sources are
//! first parsed with raw tree-sitter and rejected when the tree has an error.

use std::path::Path;

use ast_grep_core::Node;
use ast_grep_core::tree_sitter::StrDoc;
use ast_grep_language::{LanguageExt, SupportLang};

use crate::error::ParserError;

/// The concrete AST tree type returned by [`parse_source`].
pub type AstTree = ast_grep_core::AstGrep<StrDoc<SupportLang>>;

/// A node of a parsed Go tree.
pub type GoNode<'r> = Node<'r, StrDoc<SupportLang>>;

const SNIPPET_LEN: usize = 40;

/// `true` when `path` has a `.go` extension.
#[must_use]
pub fn is_go_file(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "go")
}

/// Parse Go source into an ast-grep tree without checking for syntax errors.
#[must_use]
pub fn parse_source(source: &str) -> AstTree {
    SupportLang::Go.ast_grep(source)
}

/// Parse Go source, failing on the first syntax error.
///
/// `origin` names the source in error messages (usually its path).
///
/// # Errors
/// Returns `ParserError::ParseFailed` when the source is not valid Go.
pub fn parse_checked(source: &str, origin: &str) -> Result<AstTree, ParserError> {
    check_syntax(source, origin)?;
    Ok(parse_source(source))
}

/// Run tree-sitter over `source` and report the first error or missing node.
///
/// # Errors
/// Returns `ParserError::ParseFailed` with a 1-based position, or
/// `ParserError::Grammar` if the Go grammar cannot be loaded.
pub fn check_syntax(source: &str, origin: &str) -> Result<(), ParserError> {
    let mut parser = tree_sitter::Parser::new();
    parser
        .set_language(&SupportLang::Go.get_ts_language())
        .map_err(|error| ParserError::Grammar(error.to_string()))?;

    let Some(tree) = parser.parse(source, None) else {
        return Err(ParserError::ParseFailed {
            origin: origin.to_string(),
            line: 1,
            column: 1,
            message: "parser produced no tree".to_string(),
        });
    };

    let root = tree.root_node();
    if !root.has_error() {
        return Ok(());
    }

    let node = first_error(root).unwrap_or(root);
    let position = node.start_position();
    let message = if node.is_missing() {
        format!("missing `{}`", node.kind())
    } else {
        let text = node.utf8_text(source.as_bytes()).unwrap_or_default();
        let snippet: String = text
            .lines()
            .next()
            .unwrap_or_default()
            .trim()
            .chars()
            .take(SNIPPET_LEN)
            .collect();
        format!("unexpected `{snippet}`")
    };

    Err(ParserError::ParseFailed {
        origin: origin.to_string(),
        line: position.row + 1,
        column: position.column + 1,
        message,
    })
}

/// Depth-first search for the first `ERROR` or missing node.
fn first_error(node: tree_sitter::Node<'_>) -> Option<tree_sitter::Node<'_>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if let Some(found) = first_error(child) {
            return Some(found);
        }
    }
    None
}

/// The name in the file's `package` clause.
#[must_use]
pub fn package_name(tree: &AstTree) -> Option<String> {
    tree.root()
        .children()
        .find(|c| c.kind().as_ref() == "package_clause")?
        .children()
        .find(|c| c.kind().as_ref() == "package_identifier")
        .map(|n| n.text().to_string())
}
