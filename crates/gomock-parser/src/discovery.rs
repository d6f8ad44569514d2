//! Interface discovery across a file's imported packages.
//!
//! Not needed to emit a mock. It builds an index of interface names visible
//! from a source file (its own interfaces plus the exported interfaces of every
//! imported package found under `GOPATH`/`HOME`), which the generator uses to
//! give cross-package interface types a `nil` zero value.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;

use crate::error::ParserError;
use crate::parser::{AstTree, is_go_file, parse_checked};
use crate::resolver::SourceIndex;

/// One `import` of the source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportRef {
    /// Import path with quotes removed.
    pub path: String,
    /// Name the file uses for the package: the alias, or the last path segment.
    pub package: String,
    /// Directory the package is expected in, when a package root is known.
    pub dir: Option<PathBuf>,
}

/// Interfaces visible from one source file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscoveryIndex {
    /// Interfaces declared in the file itself.
    pub local: Vec<String>,
    pub imports: Vec<ImportRef>,
    /// Exported interfaces of imported packages, as `pkg.Name`.
    pub qualified: Vec<String>,
}

impl DiscoveryIndex {
    /// Local names followed by qualified names.
    pub fn all(&self) -> impl Iterator<Item = &str> {
        self.local
            .iter()
            .chain(&self.qualified)
            .map(String::as_str)
    }
}

/// Directory of `import_path` under the Go package root.
///
/// `GOPATH` wins (`$GOPATH/src/<path>`, first entry of a path list), then
/// `HOME` (`$HOME/go/src/<path>`). `env` looks variables up, so callers and
/// tests can substitute their own environment.
pub fn package_dir(import_path: &str, env: impl Fn(&str) -> Option<String>) -> Option<PathBuf> {
    let non_empty = |value: String| (!value.is_empty()).then_some(value);

    if let Some(gopath) = env("GOPATH").and_then(non_empty)
        && let Some(first) = std::env::split_paths(&gopath).next()
    {
        return Some(first.join("src").join(import_path));
    }

    env("HOME")
        .and_then(non_empty)
        .map(|home| PathBuf::from(home).join("go").join("src").join(import_path))
}

/// Collect the imports of a parsed file.
///
/// Blank (`_`) and dot (`.`) imports are skipped: their interfaces cannot be
/// written as `pkg.Name`.
pub fn collect_imports(tree: &AstTree, env: impl Fn(&str) -> Option<String>) -> Vec<ImportRef> {
    let mut specs = Vec::new();
    for decl in tree.root().children() {
        if decl.kind().as_ref() != "import_declaration" {
            continue;
        }
        for child in decl.children() {
            let k = child.kind();
            match k.as_ref() {
                "import_spec" => specs.push(child.clone()),
                "import_spec_list" => specs.extend(
                    child
                        .children()
                        .filter(|c| c.kind().as_ref() == "import_spec"),
                ),
                _ => {}
            }
        }
    }

    let mut imports = Vec::new();
    for spec in specs {
        let Some(path_node) = spec.field("path") else {
            continue;
        };
        let path = path_node
            .text()
            .trim_matches(|c| c == '"' || c == '`')
            .to_string();
        let alias = spec.field("name").map(|n| n.text().to_string());
        let package = match alias.as_deref() {
            Some("_" | ".") => {
                tracing::debug!(import = %path, "skipping blank or dot import");
                continue;
            }
            Some(alias) => alias.to_string(),
            None => path.rsplit('/').next().unwrap_or(&path).to_string(),
        };
        let dir = package_dir(&path, &env);
        imports.push(ImportRef { path, package, dir });
    }
    imports
}

/// Build the discovery index for `source`.
///
/// # Errors
/// Returns `ParserError::ParseFailed` if `source` is not valid Go. Imported
/// packages that are missing or fail to parse are skipped.
pub fn discover_source(
    source: &str,
    origin: &str,
    env: impl Fn(&str) -> Option<String>,
) -> Result<DiscoveryIndex, ParserError> {
    let tree = parse_checked(source, origin)?;
    let local: Vec<String> = SourceIndex::build(&tree)
        .interface_names()
        .map(str::to_string)
        .collect();
    let imports = collect_imports(&tree, env);

    let mut qualified = Vec::new();
    for import in &imports {
        let Some(dir) = &import.dir else {
            tracing::debug!(import = %import.path, "no package root; set GOPATH or HOME");
            continue;
        };
        qualified.extend(
            exported_interfaces_in(dir)
                .into_iter()
                .map(|name| format!("{}.{name}", import.package)),
        );
    }

    Ok(DiscoveryIndex {
        local,
        imports,
        qualified,
    })
}

/// Build the discovery index for the Go file at `path`.
///
/// # Errors
/// Returns `ParserError::Io` if the file cannot be read, or
/// `ParserError::ParseFailed` if it is not valid Go.
pub fn discover_file(
    path: &Path,
    env: impl Fn(&str) -> Option<String>,
) -> Result<DiscoveryIndex, ParserError> {
    let source = std::fs::read_to_string(path)?;
    discover_source(&source, &path.display().to_string(), env)
}

/// Exported interface names of every `.go` file under `dir`, recursively.
fn exported_interfaces_in(dir: &Path) -> BTreeSet<String> {
    let mut names = BTreeSet::new();
    if !dir.is_dir() {
        tracing::debug!(dir = %dir.display(), "imported package directory not found");
        return names;
    }

    let mut builder = WalkBuilder::new(dir);
    builder.standard_filters(false);
    builder.hidden(false);

    for entry in builder.build() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(error) => {
                tracing::debug!(%error, "skipping unreadable entry");
                continue;
            }
        };
        let path = entry.path();
        if !entry.file_type().is_some_and(|ft| ft.is_file()) || !is_go_file(path) {
            continue;
        }
        let origin = path.display().to_string();
        let tree = match std::fs::read_to_string(path)
            .map_err(ParserError::from)
            .and_then(|source| parse_checked(&source, &origin))
        {
            Ok(tree) => tree,
            Err(error) => {
                tracing::debug!(file = %origin, %error, "skipping file");
                continue;
            }
        };
        names.extend(
            SourceIndex::build(&tree)
                .interface_names()
                .filter(|name| name.starts_with(char::is_uppercase))
                .map(str::to_string),
        );
    }
    names
}
