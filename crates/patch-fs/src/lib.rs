//! Filesystem layer for the anchor patcher
//!
//! Whole-file text reads, atomic locked writes, backups, content checksums
//! and format-agnostic loading of patch spec files.

pub mod checksum;
pub mod config;
pub mod error;
pub mod io;

pub use checksum::compute_content_checksum;
pub use config::{ConfigFormat, ConfigStore};
pub use error::{Error, Result};
