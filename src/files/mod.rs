//! File models for the two managed formats.
//!
//! Both models follow the same shape: a permissive parser that tags
//! every line of the original file as either a structured record or an
//! opaque passthrough payload, an `add_host` mutation, and a
//! serializer that reproduces the original layout.

mod hosts;
mod ssh;

pub use hosts::{HostsEntry, HostsFile, HostsLine};
pub use ssh::{HostBlock, SshConfigFile, SshItem, SshOption};

use std::io;
use std::path::Path;
use thiserror::Error;

/// Errors produced by file loading, parsing and writing.
#[derive(Debug, Error)]
pub enum FileError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Format error: {0}")]
    Format(String),
}

/// Read a target file fully into text. A missing file is an error
/// here rather than an implicit empty model, so a misconfigured path
/// cannot go unnoticed.
pub(crate) fn read_text(path: &Path) -> Result<String, FileError> {
    let text = std::fs::read_to_string(path)?;
    tracing::debug!(path = %path.display(), bytes = text.len(), "Read file");
    Ok(text)
}

pub(crate) fn write_text(path: &Path, text: &str) -> Result<(), FileError> {
    std::fs::write(path, text)?;
    tracing::debug!(path = %path.display(), bytes = text.len(), "Wrote file");
    Ok(())
}
