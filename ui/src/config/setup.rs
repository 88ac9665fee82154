use super::defaults::{DEFAULT_CONFIG, EDITOR_DIR_NAME};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)]
pub enum SetupError {
    #[error("Failed to determine config directory: {0}")]
    ConfigDirError(String),
    #[error("Failed to create directory {path}: {source}")]
    CreateDirError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to write file {path}: {source}")]
    WriteFileError {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Get the standard configuration directory for the current platform
pub fn get_config_dir() -> Result<PathBuf, SetupError> {
    // Prefer ~/.config/schemr on Unix-like systems, fall back to platform defaults
    if cfg!(unix) {
        if let Some(mut home_path) = dirs::home_dir() {
            home_path.push(".config");
            home_path.push("schemr");
            return Ok(home_path);
        }
    }

    dirs::config_dir()
        .map(|mut path| {
            path.push("schemr");
            path
        })
        .ok_or_else(|| {
            SetupError::ConfigDirError("Unable to determine config directory".to_string())
        })
}

/// Get the standard configuration file path
pub fn get_config_file_path() -> Result<PathBuf, SetupError> {
    let mut config_dir = get_config_dir()?;
    config_dir.push("config.toml");
    Ok(config_dir)
}

/// Editor data directory holding `Packages/` and `Installed Packages/`.
pub fn editor_data_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|path| path.join(EDITOR_DIR_NAME))
}

/// Expands a leading `~` to the home directory.
pub fn expand_home(path: &str) -> PathBuf {
    match path.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with(['/', '\\']) => match dirs::home_dir() {
            Some(home) => home.join(rest.trim_start_matches(['/', '\\'])),
            None => PathBuf::from(path),
        },
        _ => PathBuf::from(path),
    }
}

/// Creates `config_dir` and writes `config.toml` unless one already exists.
/// Returns the config file path.
pub fn initialize_config_dir_at(config_dir: &Path) -> Result<PathBuf, SetupError> {
    create_dir_if_not_exists(config_dir)?;

    let config_file = config_dir.join("config.toml");
    if config_file.exists() {
        log::info!("Keeping existing config file: {}", config_file.display());
    } else {
        fs::write(&config_file, DEFAULT_CONFIG).map_err(|source| SetupError::WriteFileError {
            path: config_file.clone(),
            source,
        })?;
        log::info!("Created config file: {}", config_file.display());
    }

    Ok(config_file)
}

/// Create directory if it doesn't exist
pub(crate) fn create_dir_if_not_exists(path: &Path) -> Result<(), SetupError> {
    if !path.exists() {
        fs::create_dir_all(path).map_err(|source| SetupError::CreateDirError {
            path: path.to_path_buf(),
            source,
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use claims::assert_ok;
    use tempfile::TempDir;

    #[test]
    fn test_config_dir_determination() {
        let config_dir = assert_ok!(get_config_dir());
        assert!(config_dir.to_string_lossy().contains("schemr"));
    }

    #[test]
    fn test_initialize_writes_default_config_once() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("nested").join("schemr");

        let path = assert_ok!(initialize_config_dir_at(&dir));
        assert_eq!(fs::read_to_string(&path).unwrap(), DEFAULT_CONFIG);

        fs::write(&path, "[logging]\nlevel = \"debug\"\n").unwrap();
        assert_ok!(initialize_config_dir_at(&dir));
        assert!(fs::read_to_string(&path).unwrap().contains("debug"));
    }

    #[test]
    fn test_expand_home() {
        assert_eq!(expand_home("/opt/Packages"), PathBuf::from("/opt/Packages"));
        assert_eq!(expand_home("~user/x"), PathBuf::from("~user/x"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_home("~/Packages"), home.join("Packages"));
        }
    }
}
