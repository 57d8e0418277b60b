use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::nav::DEFAULT_LATERAL_TOLERANCE;

pub(crate) const DEFAULT_SUPABASE_URL: &str = "http://localhost:54321";
pub(crate) const DEFAULT_SESSION_TTL_HOURS: i64 = 24;
/// One year.
pub const MAX_SESSION_TTL_HOURS: i64 = 8760;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("backend URL must use https (got {0})")]
    InsecureUrl(String),
    #[error("backend URL is not absolute: {0}")]
    InvalidUrl(String),
    #[error("anon key is missing")]
    MissingAnonKey,
    #[error("session TTL must be between 1 and 8760 hours (got {0}h)")]
    InvalidTtl(i64),
}

/// Runtime settings injected by the hosting page as `window.ENV`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct EnvConfig {
    pub supabase_url: String,
    pub supabase_anon_key: String,
    pub session_ttl_hours: i64,
    pub log_level: log::LevelFilter,
    pub nav_lateral_tolerance: f64,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            supabase_url: DEFAULT_SUPABASE_URL.to_string(),
            supabase_anon_key: String::new(),
            session_ttl_hours: DEFAULT_SESSION_TTL_HOURS,
            log_level: log::LevelFilter::Info,
            nav_lateral_tolerance: DEFAULT_LATERAL_TOLERANCE,
        }
    }
}

impl EnvConfig {
    /// Read `window.ENV`, falling back to defaults per key.
    ///
    /// Both `SUPABASE_URL` and `supabase_url` spellings are accepted.
    pub fn load() -> Self {
        let env = web_sys::window()
            .and_then(|w| w.get("ENV"))
            .filter(|env| !env.is_undefined() && env.is_object());
        let Some(env) = env else {
            return Self::default();
        };

        let read = |key: &str| -> Option<wasm_bindgen::JsValue> {
            [key.to_string(), key.to_lowercase()]
                .iter()
                .filter_map(|k| js_sys::Reflect::get(&env, &k.as_str().into()).ok())
                .find(|v| !v.is_undefined() && !v.is_null())
        };
        let read_str = |key: &str| read(key).and_then(|v| v.as_string());
        let read_num = |key: &str| {
            read(key).and_then(|v| v.as_f64().or_else(|| v.as_string()?.trim().parse().ok()))
        };

        Self::from_parts(
            read_str("SUPABASE_URL"),
            read_str("SUPABASE_ANON_KEY"),
            read_num("SESSION_TTL_HOURS"),
            read_str("LOG_LEVEL"),
            read_num("NAV_LATERAL_TOLERANCE"),
        )
    }

    pub(crate) fn from_parts(
        url: Option<String>,
        anon_key: Option<String>,
        ttl_hours: Option<f64>,
        log_level: Option<String>,
        tolerance: Option<f64>,
    ) -> Self {
        let d = Self::default();
        Self {
            supabase_url: url
                .map(|u| u.trim().trim_end_matches('/').to_string())
                .filter(|u| !u.is_empty())
                .unwrap_or(d.supabase_url),
            supabase_anon_key: anon_key.unwrap_or(d.supabase_anon_key),
            session_ttl_hours: ttl_hours
                .filter(|h| h.is_finite())
                .map(|h| h as i64)
                .unwrap_or(d.session_ttl_hours),
            log_level: log_level
                .and_then(|l| l.trim().parse().ok())
                .unwrap_or(d.log_level),
            nav_lateral_tolerance: tolerance
                .filter(|t| t.is_finite() && *t > 0.0)
                .unwrap_or(d.nav_lateral_tolerance),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.supabase_url.as_str();
        if let Some(rest) = url.strip_prefix("http://") {
            let host = rest.split(['/', ':']).next().unwrap_or_default();
            if !matches!(host, "localhost" | "127.0.0.1") {
                return Err(ConfigError::InsecureUrl(url.to_string()));
            }
        } else if !url.starts_with("https://") {
            return Err(ConfigError::InvalidUrl(url.to_string()));
        }

        if !(1..=MAX_SESSION_TTL_HOURS).contains(&self.session_ttl_hours) {
            return Err(ConfigError::InvalidTtl(self.session_ttl_hours));
        }
        if self.supabase_anon_key.trim().is_empty() && !self.is_local() {
            return Err(ConfigError::MissingAnonKey);
        }
        Ok(())
    }

    pub fn is_local(&self) -> bool {
        self.supabase_url.starts_with("http://")
    }

    pub fn rest_url(&self) -> String {
        format!("{}/rest/v1", self.supabase_url)
    }
}
