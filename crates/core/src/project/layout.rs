use std::path::{Path, PathBuf};

/// File name of the project config, relative to the root.
pub const CONFIG_FILE_NAME: &str = "fragpatch.json";

/// Target patched when neither the CLI nor the config names one.
pub const DEFAULT_TARGET: &str = "app/playground/orchestration/[projectId]/page.tsx";

/// Logical layout of a project on disk.
///
/// This is derived from a chosen root path. It does *not* perform any IO itself.
#[derive(Debug, Clone)]
pub struct PatchLayout {
    /// Root directory of the project.
    pub root: PathBuf,
    /// Path to the project config file (JSON).
    pub config_path: PathBuf,
    /// Target file used when nothing else is configured.
    pub default_target: PathBuf,
}

impl PatchLayout {
    /// Compute the default layout for a project rooted at `root`.
    pub fn new(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref().to_path_buf();
        let config_path = root.join(CONFIG_FILE_NAME);
        let default_target = root.join(DEFAULT_TARGET);

        Self { root, config_path, default_target }
    }

    /// Resolve `path` against the root unless it is already absolute.
    pub fn resolve(&self, path: impl AsRef<Path>) -> PathBuf {
        let path = path.as_ref();
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    /// Express `path` relative to the root when it lives underneath it.
    pub fn relative_string(&self, path: &Path) -> String {
        match path.strip_prefix(&self.root) {
            Ok(rel) => rel.to_string_lossy().to_string(),
            Err(_) => path.to_string_lossy().to_string(),
        }
    }
}
