use std::str::FromStr;

use gloo::utils::format::JsValueSerdeExt;
use serde::{Deserialize, Serialize};
use wasm_bindgen::JsValue;

use super::dto::TimePointDto;
use crate::application::UPDATE_INTERVAL_MS;
use crate::domain::{
    chart::{DEFAULT_CHART_HEIGHT, Margin},
    errors::{AppResult, ConfigError},
    logging::LogLevel,
};

/// Name of the object the host page assigns on `window`
pub const CONFIG_GLOBAL: &str = "twitter_stream_status_data";

/// Server-rendered configuration for the status page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusPageConfig {
    pub update_url: String,
    #[serde(default)]
    pub timeline_data: Vec<TimePointDto>,
    #[serde(default = "default_update_interval_ms")]
    pub update_interval_ms: u32,
    #[serde(default = "default_chart_height")]
    pub chart_height: u32,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_display_selector")]
    pub display_selector: String,
    #[serde(default = "default_chart_selector")]
    pub chart_selector: String,
    #[serde(default = "default_label_selector")]
    pub label_selector: String,
}

fn default_update_interval_ms() -> u32 {
    UPDATE_INTERVAL_MS
}

fn default_chart_height() -> u32 {
    DEFAULT_CHART_HEIGHT
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_display_selector() -> String {
    "#twitter-stream-display".to_string()
}

fn default_chart_selector() -> String {
    "#twitter-stream-chart".to_string()
}

fn default_label_selector() -> String {
    ".status-label".to_string()
}

impl StatusPageConfig {
    pub fn new(update_url: impl Into<String>, timeline_data: Vec<TimePointDto>) -> Self {
        Self {
            update_url: update_url.into(),
            timeline_data,
            update_interval_ms: default_update_interval_ms(),
            chart_height: default_chart_height(),
            log_level: default_log_level(),
            display_selector: default_display_selector(),
            chart_selector: default_chart_selector(),
            label_selector: default_label_selector(),
        }
    }

    /// Read and validate `window.twitter_stream_status_data`
    pub fn from_window() -> AppResult<Self> {
        let window = web_sys::window().ok_or(ConfigError::Missing("window".to_string()))?;
        let raw = js_sys::Reflect::get(&window, &JsValue::from_str(CONFIG_GLOBAL))
            .map_err(|e| ConfigError::Invalid(format!("{e:?}")))?;
        if raw.is_undefined() || raw.is_null() {
            return Err(ConfigError::Missing(format!("window.{CONFIG_GLOBAL}")).into());
        }
        Self::from_js(&raw)
    }

    pub fn from_js(raw: &JsValue) -> AppResult<Self> {
        let config: Self = raw
            .into_serde()
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        config.validated()
    }

    pub fn from_json(raw: &str) -> AppResult<Self> {
        let config: Self =
            serde_json::from_str(raw).map_err(|e| ConfigError::Invalid(e.to_string()))?;
        config.validated()
    }

    fn validated(self) -> AppResult<Self> {
        if self.update_url.trim().is_empty() {
            return Err(ConfigError::Missing("update_url".to_string()).into());
        }
        if self.update_interval_ms == 0 {
            return Err(ConfigError::Invalid("update_interval_ms must be positive".to_string()).into());
        }
        let margin = Margin::default();
        if self.chart_height as f64 <= margin.top + margin.bottom {
            return Err(ConfigError::Invalid(format!(
                "chart_height {} leaves no room for bars",
                self.chart_height
            ))
            .into());
        }
        Ok(self)
    }

    /// Falls back to `Info` on an unknown level name
    pub fn log_level(&self) -> LogLevel {
        LogLevel::from_str(&self.log_level).unwrap_or(LogLevel::Info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::AppError;

    #[test]
    fn defaults_fill_optional_fields() {
        let config = StatusPageConfig::from_json(
            r#"{"update_url": "/stream/update/", "timeline_data": [{"time": "2024-01-01T00:00:00", "tweets": 3}]}"#,
        )
        .unwrap();
        assert_eq!(config.update_interval_ms, 15_000);
        assert_eq!(config.chart_height, 250);
        assert_eq!(config.chart_selector, "#twitter-stream-chart");
        assert_eq!(config.log_level(), LogLevel::Info);
        assert_eq!(config.timeline_data.len(), 1);
    }

    #[test]
    fn rejects_missing_url_and_zero_interval() {
        assert!(StatusPageConfig::from_json(r#"{"update_url": ""}"#).is_err());
        let err = StatusPageConfig::from_json(r#"{"update_url": "/u/", "update_interval_ms": 0}"#).unwrap_err();
        assert!(matches!(err, AppError::Config(ConfigError::Invalid(_))));
    }

    #[test]
    fn unknown_log_level_falls_back_to_info() {
        let mut config = StatusPageConfig::new("/u/", Vec::new());
        config.log_level = "DEBUG".to_string();
        assert_eq!(config.log_level(), LogLevel::Debug);
        config.log_level = "chatty".to_string();
        assert_eq!(config.log_level(), LogLevel::Info);
    }
}
