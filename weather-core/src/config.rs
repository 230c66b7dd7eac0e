use anyhow::{Context, Result, anyhow, bail};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use url::Url;

pub const ENV_API_KEY: &str = "OPEN_WEATHER_API_KEY";
pub const ENV_BASE_URL: &str = "OPEN_WEATHER_API_BASE_URL";
pub const ENV_MODE: &str = "WEATHER_MODE";
pub const ENV_DEV_PROXY_URL: &str = "WEATHER_DEV_PROXY_URL";

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/";
pub const DEFAULT_DEV_PROXY_URL: &str = "http://127.0.0.1:5173/api/";

/// Selects where provider requests go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunMode {
    /// Same-origin development proxy; `base_url` is ignored.
    Development,
    #[default]
    Production,
}

impl RunMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunMode::Development => "development",
            RunMode::Production => "production",
        }
    }

    pub const fn all() -> &'static [RunMode] {
        &[RunMode::Production, RunMode::Development]
    }
}

impl std::fmt::Display for RunMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for RunMode {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "development" | "dev" => Ok(RunMode::Development),
            "production" | "prod" => Ok(RunMode::Production),
            _ => Err(anyhow!(
                "Unknown run mode '{value}'. Supported modes: development, production."
            )),
        }
    }
}

/// Settings stored on disk, optionally overridden by the environment.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// base_url = "https://api.openweathermap.org/"
/// mode = "production"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    #[serde(default)]
    pub mode: RunMode,
    pub dev_proxy_url: Option<String>,
}

/// Fully resolved provider endpoint, ready for [`crate::client::ApiClient`].
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub base_url: Url,
    pub api_key: String,
}

impl ClientConfig {
    pub fn new(base_url: &str, api_key: impl Into<String>) -> Result<Self> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            api_key: api_key.into(),
        })
    }
}

impl Settings {
    /// Load settings from disk, or return defaults if the file doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// File settings with environment overrides applied.
    pub fn load_with_env() -> Result<Self> {
        let mut settings = Self::load()?;
        settings.apply_env(|key| std::env::var(key).ok())?;
        Ok(settings)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Save settings to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-task", "weather-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Override fields from `lookup` (normally the process environment).
    /// Blank values are ignored.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(key) = get(ENV_API_KEY) {
            self.api_key = Some(key);
        }
        if let Some(url) = get(ENV_BASE_URL) {
            self.base_url = Some(url);
        }
        if let Some(mode) = get(ENV_MODE) {
            self.mode = RunMode::try_from(mode.as_str())?;
        }
        if let Some(url) = get(ENV_DEV_PROXY_URL) {
            self.dev_proxy_url = Some(url);
        }

        Ok(())
    }

    /// Pick the endpoint for the current mode. Fails fast when the credential
    /// or the production base URL is missing.
    pub fn resolve(&self) -> Result<ClientConfig> {
        let api_key = self
            .api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| {
                anyhow!(
                    "No API key configured.\n\
                     Hint: set {ENV_API_KEY} or run `weather configure`."
                )
            })?;

        let base_url = match self.mode {
            RunMode::Development => {
                self.dev_proxy_url.as_deref().unwrap_or(DEFAULT_DEV_PROXY_URL)
            }
            RunMode::Production => match self.base_url.as_deref() {
                Some(url) if !url.is_empty() => url,
                _ => bail!(
                    "No base URL configured for production mode.\n\
                     Hint: set {ENV_BASE_URL} or run `weather configure`."
                ),
            },
        };

        ClientConfig::new(base_url, api_key)
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.api_key = Some(api_key);
        if self.base_url.is_none() {
            self.base_url = Some(DEFAULT_BASE_URL.to_string());
        }
    }
}

/// Parse a base URL, making sure it ends with `/` so relative paths join under it.
fn parse_base_url(raw: &str) -> Result<Url> {
    let mut raw = raw.trim().to_string();
    if !raw.ends_with('/') {
        raw.push('/');
    }
    Url::parse(&raw).with_context(|| format!("Invalid base URL: {raw}"))
}
