//! Locating and loading the TOML configuration for a CLI run.
//!
//! The file is looked up in this order, and the first hit wins:
//!
//! 1. the `--config` path (a missing file is an error);
//! 2. `spatex/config.toml` in the working directory;
//! 3. `config.toml` in the platform config directory for Spatex.
//!
//! With no file the defaults apply. The `--strict` flag is applied on top
//! of whatever was loaded, so the command line always wins over the file.

use std::{
    fmt, fs, io,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use spatex::{SpatexError, config::AppConfig};

/// Config file looked up relative to the working directory.
const LOCAL_CONFIG: &str = "spatex/config.toml";

/// Configuration-related errors for the CLI.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration in {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    #[error("configuration file not found: {}", .0.display())]
    MissingFile(PathBuf),

    #[error("cannot read configuration file {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },
}

impl From<ConfigError> for SpatexError {
    fn from(err: ConfigError) -> Self {
        SpatexError::Config(err.to_string())
    }
}

/// Where the effective configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    Explicit(PathBuf),
    Local(PathBuf),
    System(PathBuf),
    Default,
}

impl ConfigSource {
    /// Pick the file to load without reading it.
    ///
    /// An explicit path is returned even if it does not exist, so that
    /// loading reports it as missing.
    pub fn locate(explicit_path: Option<&Path>) -> Self {
        if let Some(path) = explicit_path {
            return ConfigSource::Explicit(path.to_path_buf());
        }

        let local = Path::new(LOCAL_CONFIG);
        if local.is_file() {
            return ConfigSource::Local(local.to_path_buf());
        }

        match ProjectDirs::from("com", "spatex", "spatex") {
            Some(dirs) => {
                let system = dirs.config_dir().join("config.toml");
                if system.is_file() {
                    return ConfigSource::System(system);
                }
                debug!(path:% = system.display(); "No system configuration file");
            }
            None => debug!("Could not determine platform-specific config directory"),
        }

        ConfigSource::Default
    }

    /// The file behind this source, if any.
    pub fn path(&self) -> Option<&Path> {
        match self {
            ConfigSource::Explicit(path) | ConfigSource::Local(path) | ConfigSource::System(path) => {
                Some(path)
            }
            ConfigSource::Default => None,
        }
    }
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::Explicit(path) => write!(f, "{} (--config)", path.display()),
            ConfigSource::Local(path) => write!(f, "{} (working directory)", path.display()),
            ConfigSource::System(path) => write!(f, "{} (user config)", path.display()),
            ConfigSource::Default => write!(f, "built-in defaults"),
        }
    }
}

/// Load the configuration for a run and apply the `--strict` override.
///
/// # Errors
///
/// Returns [`SpatexError::Config`] if an explicit path does not exist, or if
/// the chosen file cannot be read or holds unknown sections, unknown keys or
/// an invalid `parser.mode`.
pub fn load_config(explicit_path: Option<impl AsRef<Path>>, strict: bool) -> Result<AppConfig, SpatexError> {
    let source = ConfigSource::locate(explicit_path.as_ref().map(|p| p.as_ref()));

    let mut config = match source.path() {
        Some(path) => load_config_file(path)?,
        None => AppConfig::default(),
    };
    if strict {
        config = config.with_strict();
    }

    info!(
        source:% = source,
        mode:? = config.parser().mode(),
        strict_flag = strict;
        "Configuration resolved"
    );
    Ok(config)
}

/// Read and validate one TOML file.
fn load_config_file(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => ConfigError::MissingFile(path.to_path_buf()),
        _ => ConfigError::Read {
            path: path.to_path_buf(),
            source,
        },
    })?;

    toml::from_str(&content).map_err(|err| {
        let message = match err.span() {
            Some(span) => {
                let line = content[..span.start].matches('\n').count() + 1;
                format!("{} (line {line})", err.message())
            }
            None => err.message().to_string(),
        };
        ConfigError::Parse {
            path: path.to_path_buf(),
            message,
        }
    })
}

#[cfg(test)]
mod tests {
    use spatex::ParseMode;

    use super::*;

    fn write_config(content: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, content).unwrap();
        (dir, path)
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");

        let err = load_config(Some(&missing), false).unwrap_err();
        assert!(matches!(err, SpatexError::Config(_)));
        assert!(err.to_string().contains("configuration file not found"));
        assert!(err.to_string().contains("nope.toml"));
    }

    #[test]
    fn test_explicit_file_is_loaded() {
        let (_dir, path) = write_config("[parser]\nmode = \"strict\"\n[output]\npretty = false\n");

        let config = load_config(Some(&path), false).unwrap();
        assert_eq!(config.parser().mode(), ParseMode::Strict);
        assert!(!config.output().pretty());
    }

    #[test]
    fn test_strict_flag_overrides_tolerant_file() {
        let (_dir, path) = write_config("[parser]\nmode = \"tolerant\"\n");

        assert_eq!(load_config(Some(&path), false).unwrap().parser().mode(), ParseMode::Tolerant);
        assert_eq!(load_config(Some(&path), true).unwrap().parser().mode(), ParseMode::Strict);
    }

    #[test]
    fn test_invalid_mode_names_the_file_and_valid_modes() {
        let (_dir, path) = write_config("[parser]\nmode = \"lenient\"\n");

        let message = load_config(Some(&path), false).unwrap_err().to_string();
        assert!(message.contains("config.toml"), "{message}");
        assert!(message.contains("lenient"), "{message}");
        assert!(message.contains("tolerant"), "{message}");
        assert!(message.contains("strict"), "{message}");
    }

    #[test]
    fn test_misspelled_section_is_an_error() {
        let (_dir, path) = write_config("[parsre]\nmode = \"strict\"\n");

        let message = load_config(Some(&path), false).unwrap_err().to_string();
        assert!(message.starts_with("Configuration error: invalid configuration in"));
        assert!(message.contains("parsre"), "{message}");
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let (_dir, path) = write_config("[parser\nmode = ");

        let err = load_config(Some(&path), false).unwrap_err();
        assert!(err.to_string().contains("invalid configuration in"));
    }

    #[test]
    fn test_explicit_path_wins_and_is_reported() {
        let path = Path::new("somewhere/custom.toml");
        let source = ConfigSource::locate(Some(path));

        assert_eq!(source, ConfigSource::Explicit(path.to_path_buf()));
        assert_eq!(source.path(), Some(path));
        assert_eq!(source.to_string(), "somewhere/custom.toml (--config)");
        assert_eq!(ConfigSource::Default.path(), None);
    }
}
