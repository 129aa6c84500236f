use std::{fs, path::PathBuf, time::Duration};

use anyhow::{bail, Context};
use serde::Deserialize;
use shared::protocol::ANALYZE_PATH;
use url::Url;

pub const DEFAULT_CONFIG_FILE: &str = "advocate.toml";

/// Base URL baked in at build time via `ADVOCATE_ANALYSIS_URL`, else the
/// local development service.
pub const fn default_analysis_base_url() -> &'static str {
    match option_env!("ADVOCATE_ANALYSIS_URL") {
        Some(url) => url,
        None => "http://localhost:5000",
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub analysis_base_url: String,
    /// Unset means the request may wait indefinitely.
    pub request_timeout_secs: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            analysis_base_url: default_analysis_base_url().into(),
            request_timeout_secs: None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    analysis_base_url: Option<String>,
    request_timeout_secs: Option<u64>,
}

impl Settings {
    pub fn analyze_endpoint(&self) -> anyhow::Result<Url> {
        let mut endpoint = Url::parse(self.analysis_base_url.trim()).with_context(|| {
            format!(
                "invalid analysis service url '{}'",
                self.analysis_base_url
            )
        })?;

        match endpoint.scheme() {
            "http" | "https" => {}
            other => bail!(
                "analysis service url '{}' must use http or https, not '{other}'",
                self.analysis_base_url
            ),
        }
        if endpoint.query().is_some() || endpoint.fragment().is_some() {
            bail!(
                "analysis service url '{}' must not carry a query or fragment",
                self.analysis_base_url
            );
        }

        let prefix = endpoint.path().trim_end_matches('/').to_string();
        endpoint.set_path(&format!("{prefix}{ANALYZE_PATH}"));
        Ok(endpoint)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }

    fn apply_file(&mut self, raw: &str) -> anyhow::Result<()> {
        let file_cfg: FileSettings = toml::from_str(raw).context("malformed settings file")?;
        if let Some(v) = file_cfg.analysis_base_url {
            self.analysis_base_url = v;
        }
        if let Some(v) = file_cfg.request_timeout_secs {
            self.request_timeout_secs = Some(v);
        }
        Ok(())
    }

    fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(v) = lookup("ANALYSIS_SERVICE_URL") {
            self.analysis_base_url = v;
        }
        if let Some(v) = lookup("APP__ANALYSIS_BASE_URL") {
            self.analysis_base_url = v;
        }

        if let Some(v) = lookup("APP__REQUEST_TIMEOUT_SECS") {
            match v.trim().parse::<u64>() {
                Ok(parsed) => self.request_timeout_secs = Some(parsed),
                Err(_) => tracing::warn!(value = %v, "ignoring invalid APP__REQUEST_TIMEOUT_SECS"),
            }
        }
    }
}

fn config_path(lookup: &impl Fn(&str) -> Option<String>) -> PathBuf {
    lookup("ADVOCATE_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
}

/// Defaults, then the settings file, then environment overrides.
pub fn load_settings() -> Settings {
    load_settings_with(|key| std::env::var(key).ok())
}

fn load_settings_with(lookup: impl Fn(&str) -> Option<String>) -> Settings {
    let mut settings = Settings::default();

    let path = config_path(&lookup);
    if let Ok(raw) = fs::read_to_string(&path) {
        if let Err(err) = settings.apply_file(&raw) {
            tracing::warn!(path = %path.display(), "ignoring settings file: {err:#}");
        }
    }

    settings.apply_env(lookup);
    settings
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
