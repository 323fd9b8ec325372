use anyhow::Result;
use fragpatch_core::rule::FragmentRule;
use serde::Serialize;

use crate::commands::TargetContext;

#[derive(Serialize)]
pub struct ConfigInfoSnapshot {
    pub root: String,
    pub config_file: String,
    pub config_file_exists: bool,
    pub config_version: String,
    pub target: String,
    pub target_exists: bool,
    pub pattern: String,
    pub rule: FragmentRule,
}

/// Show the resolved configuration and target.
pub fn config_info_command(root: &str, config: Option<&str>, json: bool) -> Result<()> {
    let ctx = TargetContext::load(root, None, config)?;
    let config_file = match config {
        Some(path) => ctx.layout.resolve(path),
        None => ctx.layout.config_path.clone(),
    };

    let snapshot = ConfigInfoSnapshot {
        root: ctx.layout.root.display().to_string(),
        config_file: config_file.display().to_string(),
        config_file_exists: config_file.is_file(),
        config_version: ctx.config.config_version.clone(),
        target: ctx.target.display().to_string(),
        target_exists: ctx.target.is_file(),
        pattern: ctx.rule.regex().as_str().to_string(),
        rule: ctx.rule.rule().clone(),
    };

    if json {
        let serialized = serde_json::to_string_pretty(&snapshot)?;
        println!("{}", serialized);
        return Ok(());
    }

    println!("fragpatch Config Info");
    println!("=====================");
    println!("Root: {}", snapshot.root);
    println!(
        "Config file: {} ({})",
        snapshot.config_file,
        if snapshot.config_file_exists { "OK" } else { "MISSING, using defaults" }
    );
    println!("Config version: {}", snapshot.config_version);
    println!(
        "Target: {} ({})",
        snapshot.target,
        if snapshot.target_exists { "OK" } else { "MISSING" }
    );
    println!();
    println!("Rule:");
    println!("- Closing tag: {}", snapshot.rule.closing_tag);
    println!("- Closing delimiter: {}", snapshot.rule.closing_delimiter);
    println!("- Marker: {}", snapshot.rule.marker);
    println!("- Marker indent: {:?}", snapshot.rule.marker_indent);
    println!("- Pattern: {}", snapshot.pattern);

    Ok(())
}
