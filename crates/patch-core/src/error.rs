//! Error types for patch-core

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Filesystem error: {0}")]
    Fs(#[from] patch_fs::Error),

    #[error("Invalid patch spec: {message}")]
    InvalidSpec { message: String },

    #[error("Block opened at line {line} in {path} is never closed")]
    UnterminatedBlock { path: PathBuf, line: usize },
}

impl Error {
    pub fn invalid_spec(message: impl Into<String>) -> Self {
        Self::InvalidSpec {
            message: message.into(),
        }
    }
}
