//! fragpatch-core
//!
//! Core library for repairing JSX/TSX sources that lost the closing tag of a
//! fragment (`<>...</>`).
//!
//! A [`rule::FragmentRule`] describes the shape to look for: a closing element
//! tag, a line break, the indentation of the next line, and the delimiter that
//! closes the surrounding expression (`)}`). The first such occurrence gets the
//! fragment marker inserted on its own line just before the delimiter.
//!
//! All substantive logic lives here so it is testable and reusable from the
//! CLI and any other frontend.

pub mod error;
pub mod files;
pub mod project;
pub mod rule;

pub use error::{PatchError, PatchResult};

/// Returns the library version as encoded at compile time.
///
/// Useful for tests and for frontends to report consistent version info.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
