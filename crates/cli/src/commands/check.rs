use anyhow::{Context, Result};
use fragpatch_core::files::{check_file, FileReport};

use crate::commands::TargetContext;

/// Report whether the target still needs the fragment marker. Never writes.
pub fn check_command(
    root: &str,
    file: Option<&str>,
    config: Option<&str>,
    json: bool,
) -> Result<FileReport> {
    let ctx = TargetContext::load(root, file, config)?;
    let report = check_file(&ctx.target, &ctx.rule)?;

    if json {
        let serialized =
            serde_json::to_string_pretty(&report).context("Failed to serialize report to JSON")?;
        println!("{}", serialized);
        return Ok(report);
    }

    let path = ctx.layout.relative_string(&report.path);
    match &report.insertion {
        Some(insertion) => {
            println!("Needs fix: {path}");
            println!("  Occurrences: {}", report.occurrences);
            println!("  First insertion line: {}", insertion.line);
        }
        None => println!("OK: pattern not found in {path}"),
    }

    Ok(report)
}
