use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

const CONFIG_FILE_NAME: &str = "config.json";
const TOKEN_ENV_VARS: [&str; 2] = ["GH_TOKEN", "GITHUB_TOKEN"];

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub api_base_url: String,
    /// Personal access token. Optional for public repositories.
    pub token: Option<String>,
    /// Locale for weekday labels, e.g. `en_US` or `de-DE`.
    pub locale: Option<String>,
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "https://api.github.com".to_string(),
            token: None,
            locale: None,
            timeout_secs: 30,
        }
    }
}

impl Config {
    /// `~/.commitmap`, where the config and the TUI log live.
    pub fn default_dir() -> Result<PathBuf> {
        let home_dir = dirs::home_dir().ok_or_else(|| anyhow!("Could not determine home directory"))?;
        Ok(home_dir.join(".commitmap"))
    }

    /// Loads `config.json` from `base_dir` (or the default directory),
    /// writing a default file first if there is none. Token environment
    /// variables take precedence over the file.
    pub fn load(base_dir: Option<PathBuf>) -> Result<Self> {
        let dir = resolve_dir(base_dir)?;
        fs::create_dir_all(&dir)?;
        let path = dir.join(CONFIG_FILE_NAME);

        if !path.exists() {
            write_config(&path, &Config::default())?;
        }
        read_config(&path)
    }

    /// Like [`Config::load`] but never touches the disk: a missing file
    /// yields the defaults.
    pub fn read(base_dir: Option<PathBuf>) -> Result<Self> {
        let path = resolve_dir(base_dir)?.join(CONFIG_FILE_NAME);
        if path.exists() {
            return read_config(&path);
        }

        Ok(Config {
            token: token_from_env(),
            ..Config::default()
        })
    }

    /// Locale for labels: explicit override, then config, then `LANG`.
    pub fn resolve_locale(&self, cli_override: Option<&str>) -> String {
        cli_override
            .map(str::to_string)
            .or_else(|| self.locale.clone())
            .or_else(|| std::env::var("LANG").ok())
            .unwrap_or_default()
    }
}

fn resolve_dir(base_dir: Option<PathBuf>) -> Result<PathBuf> {
    match base_dir {
        Some(dir) => Ok(dir),
        None => Config::default_dir(),
    }
}

fn read_config(path: &Path) -> Result<Config> {
    let file = File::open(path)?;
    let mut config: Config = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Invalid config file {}", path.display()))?;
    debug!("Loaded config from {}", path.display());

    if let Some(token) = token_from_env() {
        config.token = Some(token);
    }
    Ok(config)
}

fn write_config(path: &Path, config: &Config) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, config)?;
    writer.flush()?;
    Ok(())
}

fn token_from_env() -> Option<String> {
    TOKEN_ENV_VARS
        .iter()
        .filter_map(|name| std::env::var(name).ok())
        .find(|value| !value.trim().is_empty())
}
