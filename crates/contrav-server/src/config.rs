use serde::Serialize;
use std::env;

/// Server configuration, env-driven with static defaults. Everything the
/// process needs is resolved once at startup; nothing here mutates later.
#[derive(Debug, Clone, Serialize)]
pub struct ApiConfig {
    pub bind: String,
    /// sqlite file path; `:memory:` opens a private in-memory store.
    pub db_path: String,
    pub max_body_bytes: usize,
    pub log_json: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:8080".to_string(),
            db_path: "contrav.sqlite".to_string(),
            max_body_bytes: 16 * 1024,
            log_json: true,
        }
    }
}

pub(crate) fn env_bool(name: &str, default: bool) -> bool {
    env::var(name)
        .ok()
        .and_then(|v| match v.as_str() {
            "1" | "true" | "TRUE" | "yes" | "YES" => Some(true),
            "0" | "false" | "FALSE" | "no" | "NO" => Some(false),
            _ => None,
        })
        .unwrap_or(default)
}

pub(crate) fn env_usize(name: &str, default: usize) -> usize {
    env::var(name)
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(default)
}

impl ApiConfig {
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            bind: env::var("CONTRAV_BIND").unwrap_or(defaults.bind),
            db_path: env::var("CONTRAV_DB_PATH").unwrap_or(defaults.db_path),
            max_body_bytes: env_usize("CONTRAV_MAX_BODY_BYTES", defaults.max_body_bytes),
            log_json: env_bool("CONTRAV_LOG_JSON", defaults.log_json),
        }
    }
}

pub fn validate_startup_config_contract(api: &ApiConfig) -> Result<(), String> {
    if api.max_body_bytes == 0 {
        return Err("max body bytes must be > 0".to_string());
    }
    if api.db_path.trim().is_empty() {
        return Err("db path must not be empty".to_string());
    }
    if api.bind.parse::<std::net::SocketAddr>().is_err() {
        return Err(format!("invalid bind addr: {}", api.bind));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_passes_startup_contract() {
        validate_startup_config_contract(&ApiConfig::default()).expect("defaults valid");
    }

    #[test]
    fn startup_contract_rejects_bad_values() {
        let api = ApiConfig {
            max_body_bytes: 0,
            ..ApiConfig::default()
        };
        let err = validate_startup_config_contract(&api).expect_err("zero body limit");
        assert!(err.contains("body bytes"));

        let api = ApiConfig {
            bind: "not-an-addr".to_string(),
            ..ApiConfig::default()
        };
        let err = validate_startup_config_contract(&api).expect_err("bad bind");
        assert!(err.contains("bind addr"));
    }
}
