use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::{
    env,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};
use tracing::{debug, info};

use crate::errors::{BudgetError, Result};

/// Environment variable overriding the configuration file location.
pub const CONFIG_ENV: &str = "SIMPLE_BUDGET_CONFIG";
const DEFAULT_CONFIG_FILE: &str = "config.json";
const DEFAULT_STORAGE_PATH: &str = "./budget";
const DEFAULT_REFILL_AMOUNT: i64 = 120;
const TMP_SUFFIX: &str = "tmp";

/// User configuration. Every key is required once the file exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub app: AppSettings,
    pub budget: BudgetSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    /// Directory holding the weekly ledger files. A leading `~` means the home directory.
    pub storage_path: PathBuf,
    /// Command used by `--edit`; may carry its own arguments, e.g. `code --wait`.
    pub editor: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetSettings {
    /// Credit written at the start of every week.
    pub refill_amount: Decimal,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app: AppSettings {
                storage_path: PathBuf::from(DEFAULT_STORAGE_PATH),
                editor: default_editor(),
            },
            budget: BudgetSettings {
                refill_amount: Decimal::from(DEFAULT_REFILL_AMOUNT),
            },
        }
    }
}

impl Config {
    /// Storage directory with `~` expanded.
    pub fn resolve_storage_path(&self) -> PathBuf {
        expand_home(&self.app.storage_path)
    }

    fn validate(&self) -> Result<()> {
        if self.budget.refill_amount < Decimal::ZERO {
            return Err(BudgetError::Config(format!(
                "refill_amount must not be negative (got {})",
                self.budget.refill_amount
            )));
        }
        if self.app.editor.trim().is_empty() {
            return Err(BudgetError::Config("editor must not be empty".into()));
        }
        Ok(())
    }
}

/// Handles locating, bootstrapping and persisting [`Config`].
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    pub fn new(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
        }
    }

    /// Picks the explicit path if given, then `SIMPLE_BUDGET_CONFIG`, then `./config.json`.
    pub fn resolve(explicit: Option<PathBuf>) -> Self {
        let path = explicit
            .or_else(|| env::var_os(CONFIG_ENV).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
        Self::new(path)
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn load(&self) -> Result<Config> {
        let data = fs::read_to_string(&self.config_path)
            .map_err(|err| BudgetError::io(&self.config_path, err))?;
        let config: Config = serde_json::from_str(&data).map_err(|err| {
            BudgetError::Config(format!("{}: {}", self.config_path.display(), err))
        })?;
        config.validate()?;
        debug!(path = %self.config_path.display(), "loaded configuration");
        Ok(config)
    }

    /// Loads the configuration, writing the defaults first if the file is missing.
    ///
    /// The flag is `true` when the defaults were written by this call.
    pub fn load_or_init(&self) -> Result<(Config, bool)> {
        if self.config_path.exists() {
            return Ok((self.load()?, false));
        }
        let config = Config::default();
        self.save(&config)?;
        info!(path = %self.config_path.display(), "wrote default configuration");
        Ok((config, true))
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.config_path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.config_path).map_err(|err| BudgetError::io(&self.config_path, err))
    }
}

/// `$VISUAL`, then `$EDITOR`, then a platform fallback.
pub fn default_editor() -> String {
    ["VISUAL", "EDITOR"]
        .iter()
        .filter_map(|key| env::var(key).ok())
        .find(|value| !value.trim().is_empty())
        .unwrap_or_else(|| {
            if cfg!(windows) {
                "notepad".to_string()
            } else {
                "vi".to_string()
            }
        })
}

fn expand_home(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };
    match dirs::home_dir() {
        Some(home) => home.join(rest),
        None => path.to_path_buf(),
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|err| BudgetError::io(parent, err))?;
    }
    let mut file = File::create(path).map_err(|err| BudgetError::io(path, err))?;
    file.write_all(data.as_bytes())
        .and_then(|_| file.flush())
        .map_err(|err| BudgetError::io(path, err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use tempfile::tempdir;

    #[test]
    fn default_config_matches_documented_values() {
        let cfg = Config::default();
        assert_eq!(cfg.app.storage_path, PathBuf::from("./budget"));
        assert_eq!(cfg.budget.refill_amount, dec!(120));
        assert!(!cfg.app.editor.is_empty());
    }

    #[test]
    fn load_or_init_writes_defaults_once() {
        let dir = tempdir().expect("tempdir");
        let manager = ConfigManager::new(dir.path().join("nested").join("config.json"));

        let (first, created) = manager.load_or_init().expect("init config");
        assert!(created);
        assert!(manager.config_path().exists());

        let (second, created) = manager.load_or_init().expect("reload config");
        assert!(!created);
        assert_eq!(first, second);
    }

    #[test]
    fn save_round_trips_custom_values() {
        let dir = tempdir().expect("tempdir");
        let manager = ConfigManager::new(dir.path().join("config.json"));

        let mut cfg = Config::default();
        cfg.app.storage_path = PathBuf::from("/srv/ledgers");
        cfg.app.editor = "code --wait".into();
        cfg.budget.refill_amount = dec!(87.25);
        manager.save(&cfg).expect("save config");

        assert_eq!(manager.load().expect("load config"), cfg);
        assert!(!tmp_path(manager.config_path()).exists());
    }

    #[test]
    fn numeric_refill_amount_is_accepted() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("config.json");
        fs::write(
            &path,
            r#"{"app": {"storage_path": "ledgers", "editor": "nano"}, "budget": {"refill_amount": 75}}"#,
        )
        .unwrap();

        let cfg = ConfigManager::new(path).load().expect("load config");
        assert_eq!(cfg.budget.refill_amount, dec!(75));
        assert_eq!(cfg.app.editor, "nano");
    }

    #[test]
    fn missing_key_is_a_config_error() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"app": {"storage_path": "ledgers", "editor": "nano"}}"#).unwrap();

        match ConfigManager::new(path).load() {
            Err(BudgetError::Config(message)) => assert!(message.contains("budget")),
            other => panic!("expected config error, got {other:?}"),
        }
    }

    #[test]
    fn negative_refill_is_rejected() {
        let dir = tempdir().expect("tempdir");
        let manager = ConfigManager::new(dir.path().join("config.json"));
        let mut cfg = Config::default();
        cfg.budget.refill_amount = dec!(-10);
        manager.save(&cfg).unwrap();

        assert!(matches!(manager.load(), Err(BudgetError::Config(_))));
    }

    #[test]
    fn tilde_expands_to_home() {
        let mut cfg = Config::default();
        cfg.app.storage_path = PathBuf::from("~/budget");
        if let Some(home) = dirs::home_dir() {
            assert_eq!(cfg.resolve_storage_path(), home.join("budget"));
        }

        cfg.app.storage_path = PathBuf::from("./budget");
        assert_eq!(cfg.resolve_storage_path(), PathBuf::from("./budget"));
    }
}
