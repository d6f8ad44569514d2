use std::io::Write;
use std::path::Path;

use anyhow::Context;
use gomock_core::MockModel;
use gomock_parser::{discover_file, resolve_file};

use crate::cli::Settings;

/// Handle a mock generation request.
///
/// A missing or empty interface prints nothing and is not an error.
pub fn handle(
    source: &Path,
    name: &str,
    settings: &Settings,
    env: impl Fn(&str) -> Option<String>,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let mut model = resolve_file(source, name, settings.resolve)
        .with_context(|| format!("failed to resolve interface {name}"))?;

    if model.is_empty() {
        tracing::warn!(
            interface = name,
            file = %source.display(),
            "interface not found or has no methods; nothing generated"
        );
        return Ok(());
    }

    if settings.discover {
        add_discovered(&mut model, source, env)?;
    }

    let text = gomock_codegen::render(&model, &settings.emit);
    out.write_all(text.as_bytes())
        .context("failed to write generated mock")
}

/// Mark every interface visible through the file's imports as nil-able.
fn add_discovered(
    model: &mut MockModel,
    source: &Path,
    env: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<()> {
    let index = discover_file(source, env).context("failed to discover imported interfaces")?;
    tracing::debug!(
        imports = index.imports.len(),
        interfaces = index.qualified.len(),
        "discovered imported interfaces"
    );
    model.nil_types.extend(index.qualified);
    Ok(())
}
