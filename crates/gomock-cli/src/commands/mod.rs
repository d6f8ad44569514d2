use std::io::Write;
use std::path::Path;

use anyhow::Context;

use crate::cli::{Action, Request, Settings, write_usage};

pub mod generate;
pub mod list;

/// Environment lookup used for `GOPATH`/`HOME` during import discovery.
pub fn process_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Run one invocation.
///
/// No request prints usage to `out`. A source path that is not a regular
/// file prints `file not found <path>` to `err` and succeeds with nothing on
/// `out`. `settings` is only called once the source file exists.
pub fn execute(
    request: Option<&Request>,
    settings: impl FnOnce() -> anyhow::Result<Settings>,
    out: &mut impl Write,
    err: &mut impl Write,
) -> anyhow::Result<()> {
    let Some(request) = request else {
        return write_usage(out);
    };
    if !source_exists(&request.source, err)? {
        return Ok(());
    }
    dispatch(request, &settings()?, out)
}

/// `true` when `source` is a regular file; otherwise report it on `err`.
fn source_exists(source: &Path, err: &mut impl Write) -> anyhow::Result<bool> {
    if source.is_file() {
        return Ok(true);
    }
    tracing::debug!(path = %source.display(), "source is missing or not a regular file");
    writeln!(err, "file not found {}", source.display()).context("failed to write to stderr")?;
    Ok(false)
}

/// Run the action named by `request`, writing its output to `out`.
pub fn dispatch(request: &Request, settings: &Settings, out: &mut impl Write) -> anyhow::Result<()> {
    match &request.action {
        Action::Generate { name } => {
            generate::handle(&request.source, name, settings, process_env, out)
        }
        Action::ListInterfaces => list::handle(&request.source, process_env, out),
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use gomock_codegen::EmitOptions;
    use gomock_parser::ResolveOptions;
    use pretty_assertions::assert_eq;

    use super::*;

    fn generate_request(source: PathBuf) -> Request {
        Request {
            source,
            action: Action::Generate {
                name: "Store".to_string(),
            },
        }
    }

    fn default_settings() -> anyhow::Result<Settings> {
        Ok(Settings {
            resolve: ResolveOptions::default(),
            emit: EmitOptions::default(),
            discover: false,
        })
    }

    fn untouched_settings() -> anyhow::Result<Settings> {
        anyhow::bail!("settings must not load for this invocation")
    }

    fn run(request: Option<&Request>, settings: fn() -> anyhow::Result<Settings>) -> (String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        execute(request, settings, &mut out, &mut err).expect("invocation should succeed");
        (
            String::from_utf8(out).expect("stdout is utf-8"),
            String::from_utf8(err).expect("stderr is utf-8"),
        )
    }

    #[test]
    fn missing_request_prints_usage_to_stdout() {
        let (out, err) = run(None, untouched_settings);
        assert!(out.contains("Usage:"));
        assert!(out.contains("--source"));
        assert_eq!(err, "");
    }

    #[test]
    fn missing_source_reports_on_stderr_only() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("absent.go");
        let (out, err) = run(Some(&generate_request(path.clone())), untouched_settings);
        assert_eq!(out, "");
        assert_eq!(err, format!("file not found {}\n", path.display()));
    }

    #[test]
    fn directory_source_counts_as_not_found() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().to_path_buf();
        let (out, err) = run(Some(&generate_request(path.clone())), untouched_settings);
        assert_eq!(out, "");
        assert_eq!(err, format!("file not found {}\n", path.display()));
    }

    #[test]
    fn existing_source_generates_to_stdout() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("store.go");
        fs::write(
            &path,
            "package kv\n\ntype Store interface {\n\tLen() int\n}\n",
        )
        .expect("write source");
        let (out, err) = run(Some(&generate_request(path)), default_settings);
        assert!(out.contains("type StoreMock struct {"));
        assert!(out.contains("\treturn 0\n"));
        assert_eq!(err, "");
    }

    #[test]
    fn settings_errors_propagate_once_source_exists() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("store.go");
        fs::write(&path, "package kv\n").expect("write source");
        let mut out = Vec::new();
        let mut err = Vec::new();
        let result = execute(
            Some(&generate_request(path)),
            untouched_settings,
            &mut out,
            &mut err,
        );
        assert!(result.is_err());
        assert!(out.is_empty());
    }
}
