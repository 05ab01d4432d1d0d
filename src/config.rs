use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Environment variable overriding `server.url`
pub const SERVER_ENV: &str = "MAILPANE_SERVER";
/// Environment variable overriding `server.session`
pub const SESSION_ENV: &str = "MAILPANE_SESSION";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Base URL of the webmail server, e.g. `http://127.0.0.1:8000`
    pub url: String,
    /// Cookie header forwarded with every request (e.g. `sessionid=...`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default)]
    pub keybinding_mode: KeybindingMode,
    #[serde(default)]
    pub theme: ThemeVariant,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum KeybindingMode {
    #[default]
    Vim,
    Arrows,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ThemeVariant {
    #[default]
    Dark,
    #[serde(rename = "high-contrast")]
    HighContrast,
}

impl Config {
    pub fn new(url: impl Into<String>, session: Option<String>) -> Self {
        Self {
            server: ServerConfig {
                url: url.into(),
                session,
            },
            ui: UiConfig::default(),
        }
    }

    pub fn config_dir() -> Result<PathBuf> {
        let dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("mailpane");
        Ok(dir)
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        let mut config = if path.exists() {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            Self::parse(&content)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?
        } else if let Ok(url) = std::env::var(SERVER_ENV) {
            // Running purely from the environment is fine
            Self::new(url, None)
        } else {
            anyhow::bail!(
                "Configuration file not found at {}\n\
                 Run 'mailpane setup' or create it by hand. Example:\n\n\
                 [server]\n\
                 url = \"http://127.0.0.1:8000\"\n\
                 session = \"sessionid=...\"\n\n\
                 [ui]\n\
                 keybinding_mode = \"vim\"",
                path.display()
            );
        };

        config.apply_env_overrides(
            std::env::var(SERVER_ENV).ok(),
            std::env::var(SESSION_ENV).ok(),
        );
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        if config.server.url.trim().is_empty() {
            anyhow::bail!("server.url must not be empty");
        }
        Ok(config)
    }

    /// Environment values win over the file
    pub fn apply_env_overrides(&mut self, url: Option<String>, session: Option<String>) {
        if let Some(url) = url.filter(|u| !u.trim().is_empty()) {
            self.server.url = url;
        }
        if let Some(session) = session.filter(|s| !s.trim().is_empty()) {
            self.server.session = Some(session);
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        let dir = Self::config_dir()?;

        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create config directory: {}", dir.display()))?;

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(&path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    pub fn ensure_dirs(&self) -> Result<()> {
        fs::create_dir_all(Self::config_dir()?)?;
        Ok(())
    }
}
