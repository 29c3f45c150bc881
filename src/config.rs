use std::env;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://127.0.0.1";

/// How a finished artifact reaches the user's disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SaveMode {
    /// Hand the download URL to the system browser.
    #[default]
    Browser,
    /// Ask for a destination with a native dialog and stream the archive there.
    Dialog,
}

impl SaveMode {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "browser" => Some(Self::Browser),
            "dialog" => Some(Self::Dialog),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CodegenConfig {
    pub base_url: String,
    pub accept_invalid_certs: bool,
    pub request_timeout: Option<Duration>,
    pub save_mode: SaveMode,
    pub log_level: String,
}

impl Default for CodegenConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            accept_invalid_certs: true,
            request_timeout: None,
            save_mode: SaveMode::default(),
            log_level: "info".to_string(),
        }
    }
}

impl CodegenConfig {
    /// Reads `.env` and the process environment. Unusable values come back
    /// as warnings for the caller to log once the logger is up.
    pub fn from_env() -> (Self, Vec<String>) {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> (Self, Vec<String>) {
        let defaults = Self::default();
        let mut warnings = Vec::new();

        let base_url = lookup("CODEGEN_BASE_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or(defaults.base_url);

        let accept_invalid_certs = match lookup("CODEGEN_ACCEPT_INVALID_CERTS") {
            Some(v) => match v.trim() {
                "1" | "true" => true,
                "0" | "false" => false,
                other => {
                    warnings.push(format!("Ignoring CODEGEN_ACCEPT_INVALID_CERTS={}", other));
                    defaults.accept_invalid_certs
                }
            },
            None => defaults.accept_invalid_certs,
        };

        let request_timeout = lookup("CODEGEN_TIMEOUT_SECS").and_then(|v| match v.trim().parse::<u64>() {
            Ok(0) => None,
            Ok(secs) => Some(Duration::from_secs(secs)),
            Err(_) => {
                warnings.push(format!("Ignoring CODEGEN_TIMEOUT_SECS={}", v));
                None
            }
        });

        let save_mode = lookup("CODEGEN_SAVE_MODE")
            .and_then(|v| {
                let mode = SaveMode::parse(&v);
                if mode.is_none() {
                    warnings.push(format!("Unknown CODEGEN_SAVE_MODE={}, using browser", v));
                }
                mode
            })
            .unwrap_or_default();

        let config = Self {
            base_url,
            accept_invalid_certs,
            request_timeout,
            save_mode,
            log_level: lookup("LOG_LEVEL").unwrap_or(defaults.log_level),
        };
        (config, warnings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> (CodegenConfig, Vec<String>) {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        CodegenConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn empty_environment_uses_localhost_service() {
        let (config, warnings) = config_from(&[]);
        assert!(warnings.is_empty());
        assert_eq!(config.base_url, "https://127.0.0.1");
        assert!(config.accept_invalid_certs);
        assert_eq!(config.request_timeout, None);
        assert_eq!(config.save_mode, SaveMode::Browser);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn overrides_are_applied() {
        let (config, warnings) = config_from(&[
            ("CODEGEN_BASE_URL", "http://codegen.local:8080/"),
            ("CODEGEN_ACCEPT_INVALID_CERTS", "false"),
            ("CODEGEN_TIMEOUT_SECS", "30"),
            ("CODEGEN_SAVE_MODE", "Dialog"),
            ("LOG_LEVEL", "debug"),
        ]);
        assert_eq!(config.base_url, "http://codegen.local:8080");
        assert!(!config.accept_invalid_certs);
        assert_eq!(config.request_timeout, Some(Duration::from_secs(30)));
        assert_eq!(config.save_mode, SaveMode::Dialog);
        assert_eq!(config.log_level, "debug");
        assert!(warnings.is_empty());
    }

    #[test]
    fn garbage_values_fall_back_to_defaults() {
        let (config, warnings) = config_from(&[
            ("CODEGEN_ACCEPT_INVALID_CERTS", "maybe"),
            ("CODEGEN_TIMEOUT_SECS", "soon"),
            ("CODEGEN_SAVE_MODE", "ftp"),
        ]);
        assert!(config.accept_invalid_certs);
        assert_eq!(config.request_timeout, None);
        assert_eq!(config.save_mode, SaveMode::Browser);
        assert_eq!(
            warnings,
            vec![
                "Ignoring CODEGEN_ACCEPT_INVALID_CERTS=maybe".to_string(),
                "Ignoring CODEGEN_TIMEOUT_SECS=soon".to_string(),
                "Unknown CODEGEN_SAVE_MODE=ftp, using browser".to_string(),
            ]
        );
    }
}
