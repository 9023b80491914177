//! Configuration file handling.
//!
//! The configuration file is stored at `$FINANCE_HOME/config.json`. It names the directory that
//! holds the snapshot files, which defaults to `$FINANCE_HOME/data`.

use crate::snapshot::FileStore;
use crate::store::FinanceStore;
use crate::{utils, Result};
use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const APP_NAME: &str = "finance";
const CONFIG_VERSION: u8 = 1;
const CONFIG_JSON: &str = "config.json";
const DATA: &str = "data";

/// The `Config` object represents the configuration of the app. You instantiate it by providing
/// the path to `$FINANCE_HOME` and from there it loads `$FINANCE_HOME/config.json`.
#[derive(Debug, Clone)]
pub struct Config {
    root: PathBuf,
    config_path: PathBuf,
    config_file: ConfigFile,
    data_dir: PathBuf,
}

impl Config {
    /// Creates the home directory, its data subdirectory and an initial `config.json`.
    ///
    /// # Arguments
    /// - `dir` - The directory that will be the root of data directory, e.g. `$HOME/finance`
    ///
    /// # Errors
    /// - Returns an error if `config.json` already exists.
    /// - Returns an error if any file operations fail.
    pub fn create(dir: impl Into<PathBuf>) -> Result<Self> {
        let maybe_relative = dir.into();
        utils::make_dir(&maybe_relative).context("Unable to create the finance home directory")?;
        let root = utils::canonicalize(&maybe_relative)?;

        let config_path = root.join(CONFIG_JSON);
        if config_path.exists() {
            bail!(
                "A config file already exists at '{}'",
                config_path.display()
            )
        }

        let config_file = ConfigFile::default();
        config_file.save(&config_path)?;

        let data_dir = resolve(&root, config_file.data_dir());
        utils::make_dir(&data_dir)?;

        Ok(Self {
            root,
            config_path,
            config_file,
            data_dir,
        })
    }

    /// This will
    /// - validate that `finance_home` exists and that the config file exists
    /// - load the config file
    /// - validate that the data directory exists
    pub fn load(finance_home: impl Into<PathBuf>) -> Result<Self> {
        let maybe_relative = finance_home.into();
        if !maybe_relative.is_dir() {
            bail!(
                "The finance home directory is missing '{}', run 'finance init' first",
                maybe_relative.display()
            )
        }
        let root = utils::canonicalize(&maybe_relative)?;

        let config_path = root.join(CONFIG_JSON);
        if !config_path.is_file() {
            bail!("The config file is missing '{}'", config_path.display())
        }
        let config_file = ConfigFile::load(&config_path)?;
        let data_dir = resolve(&root, config_file.data_dir());
        if !data_dir.is_dir() {
            bail!("The data directory is missing '{}'", data_dir.display())
        }

        Ok(Self {
            root,
            config_path,
            config_file,
            data_dir,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn config_version(&self) -> u8 {
        self.config_file.config_version
    }

    /// Opens the store backed by the snapshot files in the data directory.
    pub fn open_store(&self) -> Result<FinanceStore<FileStore>> {
        let storage = FileStore::new(&self.data_dir)?;
        FinanceStore::load(storage)
            .with_context(|| format!("Unable to load data from {}", self.data_dir.display()))
    }
}

/// Returns `p` if it is absolute, otherwise `root` joined with `p`.
fn resolve(root: &Path, p: PathBuf) -> PathBuf {
    if p.is_absolute() {
        return p;
    }
    root.join(p)
}

/// Represents the serialization and deserialization format of the configuration file.
///
/// Example configuration:
/// ```json
/// {
///   "app_name": "finance",
///   "config_version": 1,
///   "data_dir": "data"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
struct ConfigFile {
    /// Application name, should always be "finance"
    app_name: String,

    /// Configuration file version
    config_version: u8,

    /// Directory holding `transactions.json` and `categories.json` (optional, relative to
    /// `config.json` or absolute). Defaults to `$FINANCE_HOME/data` if not specified.
    #[serde(skip_serializing_if = "Option::is_none")]
    data_dir: Option<PathBuf>,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            app_name: APP_NAME.to_string(),
            config_version: CONFIG_VERSION,
            data_dir: None,
        }
    }
}

impl ConfigFile {
    /// Loads a ConfigFile from the specified path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed
    fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let config: ConfigFile = utils::deserialize(path)?;

        anyhow::ensure!(
            config.app_name == APP_NAME,
            "Invalid app_name in config file: expected '{}', got '{}'",
            APP_NAME,
            config.app_name
        );

        Ok(config)
    }

    fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let data = serde_json::to_string_pretty(self).context("Unable to serialize config")?;
        utils::write(path, data).context("Unable to write config file")
    }

    fn data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(|| PathBuf::from(DATA))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_create() {
        let dir = TempDir::new().unwrap();
        let home_dir = dir.path().join("finance_home");

        let config = Config::create(&home_dir).unwrap();

        assert!(config.root().is_dir());
        assert!(config.config_path().is_file());
        assert!(config.data_dir().is_dir());
        assert_eq!(config.data_dir(), config.root().join("data"));
        assert_eq!(config.config_version(), 1);
    }

    #[test]
    fn test_config_create_twice_fails() {
        let dir = TempDir::new().unwrap();
        Config::create(dir.path()).unwrap();
        assert!(Config::create(dir.path()).is_err());
    }

    #[test]
    fn test_config_load_after_create() {
        let dir = TempDir::new().unwrap();
        let created = Config::create(dir.path()).unwrap();
        let loaded = Config::load(dir.path()).unwrap();
        assert_eq!(created.data_dir(), loaded.data_dir());
        assert_eq!(created.config_file, loaded.config_file);
    }

    #[test]
    fn test_config_load_missing_home() {
        let dir = TempDir::new().unwrap();
        let result = Config::load(dir.path().join("nope"));
        assert!(result.unwrap_err().to_string().contains("finance init"));
    }

    #[test]
    fn test_config_load_missing_config_file() {
        let dir = TempDir::new().unwrap();
        assert!(Config::load(dir.path()).is_err());
    }

    #[test]
    fn test_config_file_load_invalid_app_name() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join(CONFIG_JSON);
        let json = r#"{
            "app_name": "ledger",
            "config_version": 1
        }"#;
        std::fs::write(&config_path, json).unwrap();

        let result = ConfigFile::load(&config_path);
        assert!(result.unwrap_err().to_string().contains("Invalid app_name"));
    }

    #[test]
    fn test_config_absolute_data_dir() {
        let dir = TempDir::new().unwrap();
        let elsewhere = TempDir::new().unwrap();
        let config = Config::create(dir.path()).unwrap();

        let file = ConfigFile {
            data_dir: Some(elsewhere.path().to_path_buf()),
            ..ConfigFile::default()
        };
        file.save(config.config_path()).unwrap();

        let loaded = Config::load(dir.path()).unwrap();
        assert_eq!(loaded.data_dir(), elsewhere.path());
    }

    #[test]
    fn test_config_file_serialization_omits_none_fields() {
        let json = serde_json::to_string(&ConfigFile::default()).unwrap();
        assert!(!json.contains("data_dir"));
    }

    #[test]
    fn test_open_store_seeds_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::create(dir.path()).unwrap();
        let store = config.open_store().unwrap();
        assert_eq!(store.transactions().len(), 5);
        assert!(!config.data_dir().join("transactions.json").exists());
    }
}
