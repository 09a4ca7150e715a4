use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, path::PathBuf};

/// Environment variable overriding the stored API key.
pub const ENV_API_KEY: &str = "WEATHER_API_KEY";
/// Environment variable overriding the stored base URL.
pub const ENV_BASE_URL: &str = "WEATHER_BASE_URL";

/// Number of days requested from the forecast endpoint.
pub const FORECAST_DAYS: u8 = 7;
/// Response language sent with every request.
pub const LANG: &str = "en";
/// Suggested answer for the base URL prompt of `cityweather configure`.
pub const DEFAULT_BASE_URL: &str = "https://api.weatherapi.com/v1";

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// base_url = "https://api.weatherapi.com/v1"
/// api_key = "..."
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    pub base_url: Option<String>,
    pub api_key: Option<String>,
}

/// Validated settings the weather provider is constructed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderSettings {
    pub base_url: String,
    pub api_key: String,
}

impl Config {
    /// Load the config file and apply the process environment on top of it.
    ///
    /// Called once at startup; the result is passed down explicitly.
    pub fn from_environment() -> Result<Self> {
        Ok(Self::load()?.with_env_overrides(|name| std::env::var(name).ok()))
    }

    /// Override file values with `WEATHER_API_KEY` / `WEATHER_BASE_URL`.
    ///
    /// Empty values are ignored.
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        if let Some(key) = non_empty(ENV_API_KEY) {
            self.api_key = Some(key);
        }
        if let Some(url) = non_empty(ENV_BASE_URL) {
            self.base_url = Some(url);
        }

        self
    }

    /// Both the base URL and the API key are required to talk to the provider.
    pub fn provider_settings(&self) -> Result<ProviderSettings> {
        let api_key = present(self.api_key.as_deref()).ok_or_else(|| {
            anyhow!(
                "No API key configured.\n\
                 Hint: run `cityweather configure` or set {ENV_API_KEY}."
            )
        })?;

        let base_url = present(self.base_url.as_deref()).ok_or_else(|| {
            anyhow!(
                "No base URL configured.\n\
                 Hint: run `cityweather configure` or set {ENV_BASE_URL}."
            )
        })?;

        Ok(ProviderSettings {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.api_key = Some(api_key);
    }

    pub fn set_base_url(&mut self, base_url: String) {
        self.base_url = Some(base_url);
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "cityweather", "cityweather-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
