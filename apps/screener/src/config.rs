use std::{collections::HashMap, fs, path::Path, time::Duration};

use anyhow::{bail, Context};
use serde::Deserialize;
use tracing::warn;
use url::Url;

pub const CONFIG_FILE: &str = "screener.toml";
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    pub api_url: String,
    pub request_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.into(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl Settings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

pub fn load_settings() -> Settings {
    load_settings_from(Path::new(CONFIG_FILE), |key| std::env::var(key).ok())
}

/// Defaults, then the optional TOML file, then the environment. Later layers win.
fn load_settings_from(path: &Path, env: impl Fn(&str) -> Option<String>) -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(path) {
        match toml::from_str::<HashMap<String, toml::Value>>(&raw) {
            Ok(file_cfg) => {
                if let Some(v) = file_cfg.get("api_url").and_then(toml::Value::as_str) {
                    settings.api_url = v.to_string();
                }
                if let Some(v) = file_cfg
                    .get("request_timeout_secs")
                    .and_then(toml::Value::as_integer)
                    .and_then(|v| u64::try_from(v).ok())
                    .filter(|v| *v > 0)
                {
                    settings.request_timeout_secs = v;
                }
            }
            Err(e) => warn!(path = %path.display(), error = %e, "config: ignoring unreadable file"),
        }
    }

    if let Some(v) = env("PREDICTION_API_URL") {
        settings.api_url = v;
    }
    if let Some(v) = env("APP__API_URL") {
        settings.api_url = v;
    }

    if let Some(v) = env("APP__REQUEST_TIMEOUT_SECS") {
        match v.parse::<u64>() {
            Ok(parsed) if parsed > 0 => settings.request_timeout_secs = parsed,
            _ => warn!(value = %v, "config: ignoring invalid APP__REQUEST_TIMEOUT_SECS"),
        }
    }

    settings
}

pub fn prepare_api_url(raw_api_url: &str) -> anyhow::Result<String> {
    let api_url = normalize_api_url(raw_api_url);
    let parsed = Url::parse(&api_url)
        .with_context(|| format!("invalid prediction service url '{api_url}'"))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        bail!(
            "prediction service url must use http or https, got '{}'",
            parsed.scheme()
        );
    }
    Ok(api_url)
}

fn normalize_api_url(raw_api_url: &str) -> String {
    let api_url = raw_api_url.trim().trim_end_matches('/');

    if api_url.is_empty() {
        return Settings::default().api_url;
    }

    api_url.to_string()
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
