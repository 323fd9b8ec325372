use anyhow::{anyhow, Result};
use fragpatch_core::project::{write_config, PatchConfig, PatchLayout};

use crate::canonicalize_or_current;

/// Write a default `fragpatch.json` at `root`.
pub fn init_command(root: &str, target: Option<String>, force: bool) -> Result<()> {
    let root_path = canonicalize_or_current(root)?;
    let layout = PatchLayout::new(&root_path);

    if layout.config_path.exists() && !force {
        return Err(anyhow!(
            "Config already exists at {} (use --force to overwrite)",
            layout.config_path.display()
        ));
    }

    let config = PatchConfig::default().with_target(target);
    write_config(&layout.config_path, &config)?;
    tracing::info!(path = %layout.config_path.display(), "wrote config");

    let target_display = match &config.target {
        Some(t) => t.clone(),
        None => layout.relative_string(&layout.default_target),
    };

    println!("Initialized fragpatch config:");
    println!("  Root: {}", layout.root.display());
    println!("  Config: {}", layout.config_path.display());
    println!("  Target: {}", target_display);
    println!("  Marker: {}", config.rule.marker);

    Ok(())
}
