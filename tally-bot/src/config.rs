use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tally_core::Language;
use thiserror::Error;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerSection,
    pub telegram: TelegramSection,
    pub ledger: LedgerSection,
    pub locale: LocaleSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TelegramSection {
    pub token: String,
    pub api_base: String,
    /// Expected `X-Telegram-Bot-Api-Secret-Token`; empty disables the check
    pub webhook_secret: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    Csv,
    Memory,
    Sheets,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerSection {
    pub backend: Backend,
    pub csv_path: PathBuf,
    pub spreadsheet_id: String,
    pub worksheet: String,
    /// Service-account key file for the sheets backend
    pub credentials: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LocaleSection {
    pub language: Language,
    /// IANA name; every date is computed in this zone
    pub timezone: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

impl Default for TelegramSection {
    fn default() -> Self {
        Self {
            token: String::new(),
            api_base: "https://api.telegram.org".to_string(),
            webhook_secret: String::new(),
        }
    }
}

impl Default for LedgerSection {
    fn default() -> Self {
        Self {
            backend: Backend::Csv,
            csv_path: PathBuf::from("ledger.csv"),
            spreadsheet_id: String::new(),
            worksheet: "Data".to_string(),
            credentials: PathBuf::from("credentials.json"),
        }
    }
}

impl Default for LocaleSection {
    fn default() -> Self {
        Self {
            language: Language::English,
            timezone: "America/Santiago".to_string(),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid PORT value '{0}'")]
    InvalidPort(String),

    #[error("telegram token is not set (export TELEGRAM_TOKEN or set [telegram].token)")]
    MissingToken,

    #[error("sheets backend needs [ledger].spreadsheet_id")]
    MissingSpreadsheet,
}

impl Config {
    /// Overlay process environment: TELEGRAM_TOKEN, PORT, TELEGRAM_WEBHOOK_SECRET.
    pub fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) -> Result<(), ConfigError> {
        if let Some(token) = var("TELEGRAM_TOKEN").filter(|t| !t.is_empty()) {
            self.telegram.token = token;
        }
        if let Some(port) = var("PORT").filter(|p| !p.is_empty()) {
            self.server.port = port
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(port.clone()))?;
        }
        if let Some(secret) = var("TELEGRAM_WEBHOOK_SECRET") {
            self.telegram.webhook_secret = secret;
        }
        Ok(())
    }

    /// Checks that only matter once the server is about to start.
    pub fn validate_for_serve(&self) -> Result<(), ConfigError> {
        if self.telegram.token.trim().is_empty() {
            return Err(ConfigError::MissingToken);
        }
        if self.ledger.backend == Backend::Sheets && self.ledger.spreadsheet_id.trim().is_empty() {
            return Err(ConfigError::MissingSpreadsheet);
        }
        Ok(())
    }

    pub fn webhook_secret(&self) -> Option<&str> {
        Some(self.telegram.webhook_secret.as_str()).filter(|s| !s.is_empty())
    }
}

/// Load a config file; a missing file means defaults.
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", path.display()))
}

pub fn save_config(path: &Path, cfg: &Config) -> Result<()> {
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(path, s).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

pub fn init_config(path: &Path) -> Result<()> {
    if path.exists() {
        println!("Config already exists: {}", path.display());
        return Ok(());
    }
    save_config(path, &Config::default())?;
    println!("Wrote {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let cfg: Config = toml::from_str(
            r#"
[ledger]
backend = "sheets"
spreadsheet_id = "abc123"

[locale]
language = "es"
"#,
        )
        .unwrap();
        assert_eq!(cfg.ledger.backend, Backend::Sheets);
        assert_eq!(cfg.ledger.worksheet, "Data");
        assert_eq!(cfg.locale.language, Language::Spanish);
        assert_eq!(cfg.locale.timezone, "America/Santiago");
        assert_eq!(cfg.server.port, 5000);
    }

    #[test]
    fn test_unknown_backend_is_rejected() {
        let parsed: std::result::Result<Config, _> = toml::from_str("[ledger]\nbackend = \"excel\"\n");
        assert!(parsed.is_err());
    }

    #[test]
    fn test_env_overrides() {
        let mut cfg = Config::default();
        cfg.apply_env(env(&[("TELEGRAM_TOKEN", "123:abc"), ("PORT", "8080")]))
            .unwrap();
        assert_eq!(cfg.telegram.token, "123:abc");
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.webhook_secret(), None);

        cfg.apply_env(env(&[("TELEGRAM_WEBHOOK_SECRET", "s3cret")])).unwrap();
        assert_eq!(cfg.webhook_secret(), Some("s3cret"));
    }

    #[test]
    fn test_bad_port() {
        let mut cfg = Config::default();
        assert_eq!(
            cfg.apply_env(env(&[("PORT", "eighty")])),
            Err(ConfigError::InvalidPort("eighty".to_string()))
        );
    }

    #[test]
    fn test_serve_validation() {
        let mut cfg = Config::default();
        assert_eq!(cfg.validate_for_serve(), Err(ConfigError::MissingToken));

        cfg.telegram.token = "123:abc".to_string();
        assert_eq!(cfg.validate_for_serve(), Ok(()));

        cfg.ledger.backend = Backend::Sheets;
        assert_eq!(cfg.validate_for_serve(), Err(ConfigError::MissingSpreadsheet));
    }

    #[test]
    fn test_defaults_round_trip_through_toml() {
        let text = toml::to_string_pretty(&Config::default()).unwrap();
        let back: Config = toml::from_str(&text).unwrap();
        assert_eq!(back.ledger.csv_path, PathBuf::from("ledger.csv"));
        assert_eq!(back.telegram.api_base, "https://api.telegram.org");
    }
}
