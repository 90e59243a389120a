//! Runtime configuration, read once from the environment at startup.
//!
//! Values come from the process environment, then from `.env.local` in the
//! working directory, or `.env` when there is no `.env.local`. The process
//! environment always wins.
//!
//! Every value has a default except the SMTP relay: without `SMTP_SERVER`
//! notices are only written to the log.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{key} must be an integer, got {value:?}")]
    NotAnInteger { key: &'static str, value: String },

    #[error("could not read {path}: {message}")]
    EnvFile { path: String, message: String },
}

/// `.env.local` when present in `dir`, otherwise `.env`.
pub fn env_file(dir: &Path) -> Option<PathBuf> {
    [".env.local", ".env"]
        .into_iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
}

/// Key/value pairs of a dotenv file.
pub fn read_env_file(path: &Path) -> Result<HashMap<String, String>, ConfigError> {
    let env_error = |e: dotenvy::Error| ConfigError::EnvFile {
        path: path.display().to_string(),
        message: e.to_string(),
    };
    dotenvy::from_path_iter(path)
        .map_err(env_error)?
        .map(|item| item.map_err(env_error))
        .collect()
}

/// SMTP relay used for consumable notices.
#[derive(Debug, Clone, PartialEq)]
pub struct SmtpConfig {
    pub server: String,
    pub port: u16,
    pub user: Option<String>,
    pub password: Option<String>,
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Paper count at or below which a "No papers" notice is sent.
    pub low_paper: i64,
    pub initial_papers: i64,
    pub check_inks: bool,
    pub smtp: Option<SmtpConfig>,
    /// Scratch directory for the transform chain.
    pub tmp_dir: PathBuf,
    /// Built kiosk UI, served at `/`.
    pub static_dir: PathBuf,
    /// `media=` option handed to the spooler.
    pub media: String,
    pub open_browser: bool,
}

impl Config {
    /// Reads the process environment, falling back to `env_file` when given.
    pub fn from_env(env_file: Option<&Path>) -> Result<Self, ConfigError> {
        let file = match env_file {
            Some(path) => read_env_file(path)?,
            None => HashMap::new(),
        };
        Self::from_sources(|key| std::env::var(key).ok(), &file)
    }

    /// `env` first, then the dotenv pairs in `file`.
    pub fn from_sources<E>(env: E, file: &HashMap<String, String>) -> Result<Self, ConfigError>
    where
        E: Fn(&str) -> Option<String>,
    {
        Self::from_lookup(|key| env(key).or_else(|| file.get(key).cloned()))
    }

    /// Builds the configuration from any key/value source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let smtp = match get("SMTP_SERVER") {
            Some(server) => Some(SmtpConfig {
                server,
                port: parse_or(&get, "SMTP_PORT", 25)?,
                user: get("SMTP_USER"),
                password: get("SMTP_PASS"),
                from: get("NOTIFY_FROM").unwrap_or_else(|| "kiosk@localhost".to_string()),
                to: get("ADMIN_EMAIL").unwrap_or_else(|| "root@localhost".to_string()),
            }),
            None => None,
        };

        Ok(Self {
            host: get("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or(&get, "PORT", 3001)?,
            low_paper: parse_or(&get, "LOW_PAPER", 10)?,
            initial_papers: parse_or(&get, "INITIAL_PAPERS", 50)?,
            check_inks: get("CHECK_INKS").is_some(),
            smtp,
            tmp_dir: get("KIOSK_TMP_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("tmp")),
            static_dir: get("KIOSK_STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("build")),
            media: get("KIOSK_MEDIA").unwrap_or_else(|| "Letter".to_string()),
            open_browser: get("KIOSK_OPEN_BROWSER").is_some(),
        })
    }
}

fn parse_or<T, G>(get: &G, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        Some(value) => value.trim().parse().map_err(|_| ConfigError::NotAnInteger {
            key,
            value: value.clone(),
        }),
        None => Ok(default),
    }
}
