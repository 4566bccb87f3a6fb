//! addh - Hosts and SSH Config Mapping Management
//!
//! A tool for keeping address mappings consistent across the hosts
//! file and the SSH client configuration. One invocation parses both
//! files, merges the requested mapping into each, and writes them back
//! while preserving every unmanaged line verbatim.

pub mod config;
pub mod files;
pub mod output;

pub use config::{Settings, SettingsFile};
pub use files::{FileError, HostsFile, SshConfigFile};
