//! Project layout and configuration.
//!
//! - `PatchLayout`: computed paths for the config file and default target.
//! - `PatchConfig`: serializable rule + target settings (JSON or YAML).
//! - Helpers to load a config and resolve which file gets patched.

pub mod config;
pub mod layout;
pub mod util;

pub use config::*;
pub use layout::*;
pub use util::*;
