//! Filesystem module.
//!
//! Provides:
//! - Filename sanitization
//! - Output directory management
//! - Asset persistence

pub mod naming;
pub mod paths;
pub mod writer;

pub use naming::{asset_filename, sanitize};
pub use paths::{ensure_dir, OutputDirs};
pub use writer::{save_asset, target_path};
