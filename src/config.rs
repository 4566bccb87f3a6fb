//! Run configuration for addh
//!
//! Resolves where the managed files live and which defaults apply.
//! Precedence per knob: command-line flag (or its environment
//! variable, folded in by clap) wins, then the optional TOML settings
//! file, then the built-in default.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Default hosts file path.
pub const DEFAULT_HOSTS_FILE: &str = "/etc/hosts";

/// Settings file name, looked up under the platform config directory.
pub const SETTINGS_FILE_NAME: &str = "config.toml";

/// Optional on-disk settings, all fields individually optional.
#[derive(Debug, Default, Deserialize)]
pub struct SettingsFile {
    /// Path to the hosts file.
    #[serde(default)]
    pub hosts_file: Option<PathBuf>,

    /// Path to the SSH client configuration.
    #[serde(default)]
    pub ssh_config: Option<PathBuf>,

    /// Default login user for new SSH host blocks.
    #[serde(default)]
    pub user: Option<String>,
}

impl SettingsFile {
    /// Load settings from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file: {}", path.display()))?;

        let settings: SettingsFile = toml::from_str(&content)
            .with_context(|| format!("Failed to parse settings file: {}", path.display()))?;

        tracing::debug!(path = %path.display(), "Loaded settings file");
        Ok(settings)
    }

    /// Load settings from `path` when given, otherwise from the
    /// default location if a file exists there. An explicitly named
    /// file must exist; the default one is optional.
    pub fn load_optional(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::load(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    /// Default settings file location (`<config dir>/addh/config.toml`).
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("addh").join(SETTINGS_FILE_NAME))
    }
}

/// Fully resolved configuration for one invocation.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Hosts file to manage.
    pub hosts_file: PathBuf,
    /// SSH client configuration to manage.
    pub ssh_config: PathBuf,
    /// Login user for new SSH host blocks, if any.
    pub user: Option<String>,
    /// When set, print resulting content instead of writing files.
    pub dry_run: bool,
}

impl Settings {
    /// Merge command-line values with the settings file and defaults.
    pub fn resolve(
        hosts_file: Option<PathBuf>,
        ssh_config: Option<PathBuf>,
        user: Option<String>,
        dry_run: bool,
        file: &SettingsFile,
    ) -> Result<Self> {
        let hosts_file = hosts_file
            .or_else(|| file.hosts_file.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_HOSTS_FILE));

        let ssh_config = match ssh_config.or_else(|| file.ssh_config.clone()) {
            Some(path) => path,
            None => default_ssh_config()?,
        };

        let user = user
            .or_else(|| file.user.clone())
            .filter(|user| !user.is_empty());

        Ok(Self {
            hosts_file,
            ssh_config,
            user,
            dry_run,
        })
    }
}

/// Default SSH client configuration path (`~/.ssh/config`).
fn default_ssh_config() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine the user's home directory")?;
    Ok(home.join(".ssh").join("config"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    // ==========================================================================
    // SETTINGS FILE TESTS
    // ==========================================================================

    #[test]
    fn test_load_all_fields() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        let mut file = fs::File::create(&path).unwrap();
        writeln!(file, "hosts_file = \"/tmp/hosts\"").unwrap();
        writeln!(file, "ssh_config = \"/tmp/ssh_config\"").unwrap();
        writeln!(file, "user = \"deploy\"").unwrap();

        let settings = SettingsFile::load(&path).unwrap();
        assert_eq!(settings.hosts_file, Some(PathBuf::from("/tmp/hosts")));
        assert_eq!(settings.ssh_config, Some(PathBuf::from("/tmp/ssh_config")));
        assert_eq!(settings.user.as_deref(), Some("deploy"));
    }

    #[test]
    fn test_load_fields_are_optional() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "user = \"deploy\"\n").unwrap();

        let settings = SettingsFile::load(&path).unwrap();
        assert_eq!(settings.hosts_file, None);
        assert_eq!(settings.ssh_config, None);
    }

    #[test]
    fn test_load_invalid_toml_is_error() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "hosts_file = [broken\n").unwrap();

        let result = SettingsFile::load(&path);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("parse settings file"));
    }

    #[test]
    fn test_load_optional_explicit_missing_is_error() {
        let temp = tempfile::TempDir::new().unwrap();
        let missing = temp.path().join("missing.toml");

        assert!(SettingsFile::load_optional(Some(&missing)).is_err());
    }

    // ==========================================================================
    // RESOLUTION TESTS
    // ==========================================================================

    #[test]
    fn test_resolve_flag_beats_settings_file() {
        let file = SettingsFile {
            hosts_file: Some(PathBuf::from("/from/file")),
            ssh_config: Some(PathBuf::from("/from/file/ssh")),
            user: Some("fileuser".to_string()),
        };

        let settings = Settings::resolve(
            Some(PathBuf::from("/from/flag")),
            Some(PathBuf::from("/from/flag/ssh")),
            Some("flaguser".to_string()),
            false,
            &file,
        )
        .unwrap();

        assert_eq!(settings.hosts_file, PathBuf::from("/from/flag"));
        assert_eq!(settings.ssh_config, PathBuf::from("/from/flag/ssh"));
        assert_eq!(settings.user.as_deref(), Some("flaguser"));
    }

    #[test]
    fn test_resolve_settings_file_beats_default() {
        let file = SettingsFile {
            hosts_file: Some(PathBuf::from("/from/file")),
            ssh_config: None,
            user: None,
        };

        let settings = Settings::resolve(None, None, None, false, &file).unwrap();
        assert_eq!(settings.hosts_file, PathBuf::from("/from/file"));
    }

    #[test]
    fn test_resolve_defaults() {
        let settings =
            Settings::resolve(None, None, None, false, &SettingsFile::default()).unwrap();

        assert_eq!(settings.hosts_file, PathBuf::from(DEFAULT_HOSTS_FILE));
        assert!(settings.ssh_config.ends_with(".ssh/config"));
        assert_eq!(settings.user, None);
    }

    #[test]
    fn test_resolve_empty_user_becomes_none() {
        let settings = Settings::resolve(
            None,
            None,
            Some(String::new()),
            false,
            &SettingsFile::default(),
        )
        .unwrap();

        assert_eq!(settings.user, None);
    }
}
