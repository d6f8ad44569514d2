use std::io::Write;
use std::path::Path;

use anyhow::Context;
use gomock_parser::discover_file;

/// Print the interfaces visible from `source`, one per line: local
/// interfaces first, then `pkg.Name` for imported packages.
pub fn handle(
    source: &Path,
    env: impl Fn(&str) -> Option<String>,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let index = discover_file(source, env).context("failed to discover interfaces")?;
    for name in index.all() {
        writeln!(out, "{name}").context("failed to write interface list")?;
    }
    Ok(())
}
