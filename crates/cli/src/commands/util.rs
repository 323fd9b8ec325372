use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fragpatch_core::project::{load_project_config, resolve_target, PatchConfig, PatchLayout};
use fragpatch_core::rule::CompiledRule;

use crate::canonicalize_or_current;

/// Everything a patching command needs: layout, config, compiled rule, target.
#[derive(Debug)]
pub struct TargetContext {
    pub layout: PatchLayout,
    pub config: PatchConfig,
    pub rule: CompiledRule,
    pub target: PathBuf,
}

impl TargetContext {
    /// Resolve root, load config (explicit or `fragpatch.json`), compile the
    /// rule, and pick the target file.
    pub fn load(root: &str, file: Option<&str>, config: Option<&str>) -> Result<Self> {
        let root_path = canonicalize_or_current(root)?;
        let layout = PatchLayout::new(&root_path);
        let config = load_project_config(&layout, config.map(Path::new))?;
        let rule = config.rule.compile().context("Failed to compile fragment rule")?;
        let target = resolve_target(&layout, &config, file.map(Path::new));
        tracing::debug!(target = %target.display(), "resolved target");

        Ok(Self { layout, config, rule, target })
    }
}
