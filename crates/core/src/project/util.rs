use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};

use crate::project::{PatchConfig, PatchLayout};

/// Serialization format of a config file, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Yaml,
}

impl ConfigFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or_default();
        match ext {
            "json" => Ok(ConfigFormat::Json),
            "yaml" | "yml" => Ok(ConfigFormat::Yaml),
            other => Err(anyhow!(
                "Unsupported config format '{}' for {} (expected json, yaml, or yml)",
                other,
                path.display()
            )),
        }
    }
}

/// Load a config file from disk (JSON or YAML by extension).
pub fn load_config(path: &Path) -> Result<PatchConfig> {
    let format = ConfigFormat::from_path(path)?;
    let body = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config at {}", path.display()))?;
    let config: PatchConfig = match format {
        ConfigFormat::Json => serde_json::from_str(&body)
            .with_context(|| format!("Failed to parse config JSON at {}", path.display()))?,
        ConfigFormat::Yaml => serde_yaml::from_str(&body)
            .with_context(|| format!("Failed to parse config YAML at {}", path.display()))?,
    };
    tracing::debug!(path = %path.display(), "loaded config");
    Ok(config)
}

/// Serialize a config in the format implied by `path` and write it.
pub fn write_config(path: &Path, config: &PatchConfig) -> Result<()> {
    let body = match ConfigFormat::from_path(path)? {
        ConfigFormat::Json => serde_json::to_string_pretty(config)?,
        ConfigFormat::Yaml => serde_yaml::to_string(config)?,
    };
    std::fs::write(path, body)
        .with_context(|| format!("Failed to write config: {}", path.display()))?;
    Ok(())
}

/// Load the config for a layout.
///
/// An explicit path must exist. Without one, `fragpatch.json` under the root
/// is used if present, otherwise defaults apply.
pub fn load_project_config(layout: &PatchLayout, explicit: Option<&Path>) -> Result<PatchConfig> {
    match explicit {
        Some(path) => load_config(&layout.resolve(path)),
        None if layout.config_path.exists() => load_config(&layout.config_path),
        None => {
            tracing::debug!(root = %layout.root.display(), "no config file; using defaults");
            Ok(PatchConfig::default())
        }
    }
}

/// Decide which file to patch: CLI override, then config target, then the
/// layout default. Relative paths resolve against the root.
pub fn resolve_target(
    layout: &PatchLayout,
    config: &PatchConfig,
    cli_override: Option<&Path>,
) -> PathBuf {
    if let Some(path) = cli_override {
        return layout.resolve(path);
    }
    match &config.target {
        Some(target) => layout.resolve(target),
        None => layout.default_target.clone(),
    }
}
