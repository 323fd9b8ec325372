use serde::{Deserialize, Serialize};

use crate::rule::FragmentRule;

/// Current config format version.
pub const CONFIG_VERSION: &str = "0.1.0";

/// Serializable configuration for a fragpatch project.
///
/// This lives at `fragpatch.json` in the project root; YAML is accepted when
/// a `.yaml`/`.yml` file is passed explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatchConfig {
    /// Schema/config version. This is about the config format, not the tool.
    #[serde(default = "default_config_version")]
    pub config_version: String,
    /// File to patch, relative to the project root or absolute.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(default)]
    pub rule: FragmentRule,
}

fn default_config_version() -> String {
    CONFIG_VERSION.to_string()
}

impl Default for PatchConfig {
    fn default() -> Self {
        Self { config_version: default_config_version(), target: None, rule: FragmentRule::default() }
    }
}

impl PatchConfig {
    pub fn with_target(mut self, target: Option<String>) -> Self {
        self.target = target;
        self
    }
}
