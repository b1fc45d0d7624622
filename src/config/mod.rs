// src/config/mod.rs

use std::env;
use std::path::PathBuf;

use anyhow::Context;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_DATABASE_PATH: &str = "plotify.db";
pub const DEFAULT_STATIC_DIR: &str = "static";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub database_path: PathBuf,
    pub static_dir: PathBuf,
    pub port: u16,
    pub log_json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from(DEFAULT_DATABASE_PATH),
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
            port: DEFAULT_PORT,
            log_json: false,
        }
    }
}

impl Config {
    /// Reads settings from the process environment (after `.env`, if any).
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .with_context(|| format!("invalid PORT value '{raw}'"))?,
            None => defaults.port,
        };

        Ok(Self {
            database_path: lookup("DATABASE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.database_path),
            static_dir: lookup("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.static_dir),
            port,
            log_json: lookup("LOG_JSON").is_some_and(|v| parse_bool(&v)),
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

fn parse_bool(raw: &str) -> bool {
    matches!(raw.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}
