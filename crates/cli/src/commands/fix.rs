use anyhow::{Context, Result};
use fragpatch_core::files::{plan_patch, FileReport, PatchOptions};

use crate::commands::TargetContext;

/// Lines of context shown around the inserted line on dry runs.
const PREVIEW_CONTEXT: usize = 2;

/// Insert the fragment marker into the target file.
///
/// "Pattern not found" is reported but only fails when `strict` is set.
pub fn fix_command(
    root: &str,
    file: Option<&str>,
    config: Option<&str>,
    options: PatchOptions,
    strict: bool,
    json: bool,
) -> Result<FileReport> {
    let ctx = TargetContext::load(root, file, config)?;
    let plan = plan_patch(&ctx.target, &ctx.rule)?;
    let preview = if options.dry_run { plan.preview(PREVIEW_CONTEXT) } else { Vec::new() };
    let report = plan.commit(&options)?;

    if json {
        let serialized =
            serde_json::to_string_pretty(&report).context("Failed to serialize report to JSON")?;
        println!("{}", serialized);
    } else {
        let path = ctx.layout.relative_string(&report.path);
        let marker = &ctx.rule.rule().marker;
        match &report.insertion {
            Some(insertion) if report.dry_run => {
                println!("Dry run: would add closing fragment tag {marker}");
                println!("  File: {path}");
                println!("  Line: {}", insertion.line);
                for line in &preview {
                    let mark = if line.inserted { '+' } else { ' ' };
                    println!("{mark} {:>5} | {}", line.number, line.text);
                }
            }
            Some(insertion) => {
                println!("Fixed: Added closing fragment tag {marker}");
                println!("  File: {path}");
                println!("  Line: {}", insertion.line);
                if let Some(backup) = &report.backup_path {
                    println!("  Backup: {}", backup.display());
                }
            }
            None => println!("No change: pattern not found in {path}"),
        }
    }

    if strict {
        return Ok(report.require_applied()?);
    }
    Ok(report)
}
