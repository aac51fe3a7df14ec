//! Typed configuration from environment variables.
//!
//! Loads once at startup. Every variable has a default; only malformed
//! values fail.

use std::path::PathBuf;

use crate::error::{Error, Result};

#[derive(Debug, Clone)]
pub struct Config {
    pub events_path: PathBuf,
    /// Hostname or IP literal for the admin surface.
    pub host: String,
    pub port: u16,
    pub otel_endpoint: Option<String>,
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// In local dev, call `dotenvy::dotenv().ok()` before this.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            events_path: PathBuf::from(var_or("EVENTS_PATH", "events.json")),
            host: host_var("HOST", "0.0.0.0")?,
            port: parse_var("PORT", "10000")?,
            otel_endpoint: std::env::var("OTEL_ENDPOINT").ok(),
            log_level: var_or("LOG_LEVEL", "info"),
        })
    }

    /// Host and port the admin surface binds to. Name resolution happens
    /// at bind time.
    pub fn admin_addr(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }
}

fn host_var(name: &str, default: &str) -> Result<String> {
    let raw = var_or(name, default);
    let host = raw.trim();
    if host.is_empty() || host.contains(char::is_whitespace) {
        return Err(Error::Config(format!("invalid {name} {raw:?}")));
    }
    Ok(host.to_string())
}

fn var_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

fn parse_var<T>(name: &str, default: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let raw = var_or(name, default);
    raw.parse()
        .map_err(|e| Error::Config(format!("invalid {name} {raw:?}: {e}")))
}
