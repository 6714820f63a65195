use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use servicedesk_application::{Locale, SearchMode};
use servicedesk_core::AppError;
use tracing_subscriber::EnvFilter;

const DEFAULT_BACKEND_TIMEOUT_MS: u64 = 5_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendConfig {
    Memory { seed_demo_data: bool },
    Http { base_url: String, timeout: Duration },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub frontend_url: String,
    pub api_host: String,
    pub api_port: u16,
    pub cookie_secure: bool,
    pub backend: BackendConfig,
    pub search_mode: SearchMode,
    pub default_locale: Locale,
}

impl ApiConfig {
    pub fn load() -> Result<Self, AppError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let frontend_url =
            lookup("FRONTEND_URL").unwrap_or_else(|| "http://localhost:3000".to_owned());
        let api_host = lookup("API_HOST").unwrap_or_else(|| "127.0.0.1".to_owned());
        let api_port = lookup("API_PORT")
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(3001);
        let cookie_secure = flag(lookup("SESSION_COOKIE_SECURE"), false);

        let backend = match lookup("BACKEND_PROVIDER")
            .unwrap_or_else(|| "memory".to_owned())
            .as_str()
        {
            "memory" => BackendConfig::Memory {
                seed_demo_data: flag(lookup("SEED_DEMO_DATA"), true),
            },
            "http" => {
                let base_url = lookup("BACKEND_URL")
                    .filter(|value| !value.trim().is_empty())
                    .ok_or_else(|| {
                        AppError::Validation(
                            "BACKEND_URL is required when BACKEND_PROVIDER is 'http'".to_owned(),
                        )
                    })?;
                let timeout_ms = match lookup("BACKEND_TIMEOUT_MS") {
                    Some(value) => value.parse::<u64>().map_err(|error| {
                        AppError::Validation(format!("invalid BACKEND_TIMEOUT_MS: {error}"))
                    })?,
                    None => DEFAULT_BACKEND_TIMEOUT_MS,
                };
                BackendConfig::Http {
                    base_url,
                    timeout: Duration::from_millis(timeout_ms),
                }
            }
            other => {
                return Err(AppError::Validation(format!(
                    "BACKEND_PROVIDER must be either 'memory' or 'http', got '{other}'"
                )));
            }
        };

        let search_mode = lookup("SEARCH_MODE")
            .map(|value| SearchMode::from_str(&value))
            .transpose()?
            .unwrap_or_default();
        let default_locale = lookup("DEFAULT_LOCALE")
            .map(|value| Locale::from_str(&value))
            .transpose()?
            .unwrap_or_default();

        Ok(Self {
            frontend_url,
            api_host,
            api_port,
            cookie_secure,
            backend,
            search_mode,
            default_locale,
        })
    }

    pub fn socket_address(&self) -> Result<SocketAddr, AppError> {
        let host = IpAddr::from_str(&self.api_host).map_err(|error| {
            AppError::Internal(format!("invalid API_HOST '{}': {error}", self.api_host))
        })?;
        Ok(SocketAddr::from((host, self.api_port)))
    }
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn flag(value: Option<String>, default: bool) -> bool {
    value.map_or(default, |value| value.trim().eq_ignore_ascii_case("true"))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::time::Duration;

    use servicedesk_application::{Locale, SearchMode};
    use servicedesk_core::AppError;

    use super::{ApiConfig, BackendConfig};

    fn config_from(pairs: &[(&str, &str)]) -> Result<ApiConfig, AppError> {
        let values: HashMap<String, String> = pairs
            .iter()
            .map(|(name, value)| ((*name).to_owned(), (*value).to_owned()))
            .collect();
        ApiConfig::from_lookup(|name| values.get(name).cloned())
    }

    #[test]
    fn defaults_use_seeded_memory_backend() {
        let config = config_from(&[]);
        assert!(config.is_ok());
        let config = config.unwrap_or_else(|_| unreachable!());

        assert_eq!(
            config.backend,
            BackendConfig::Memory {
                seed_demo_data: true
            }
        );
        assert_eq!(config.search_mode, SearchMode::Local);
        assert_eq!(config.default_locale, Locale::En);
        assert_eq!(config.api_port, 3001);
        assert!(!config.cookie_secure);
    }

    #[test]
    fn http_backend_requires_url() {
        let missing = config_from(&[("BACKEND_PROVIDER", "http")]);
        assert!(matches!(missing, Err(AppError::Validation(_))));

        let configured = config_from(&[
            ("BACKEND_PROVIDER", "http"),
            ("BACKEND_URL", "http://desk.internal/api"),
            ("BACKEND_TIMEOUT_MS", "750"),
        ]);
        assert_eq!(
            configured.map(|config| config.backend),
            Ok(BackendConfig::Http {
                base_url: "http://desk.internal/api".to_owned(),
                timeout: Duration::from_millis(750),
            })
        );
    }

    #[test]
    fn unknown_provider_is_rejected() {
        let result = config_from(&[("BACKEND_PROVIDER", "postgres")]);
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn search_mode_and_locale_are_parsed() {
        let config = config_from(&[
            ("SEARCH_MODE", "remote"),
            ("DEFAULT_LOCALE", "de-DE"),
            ("SEED_DEMO_DATA", "false"),
        ])
        .unwrap_or_else(|error| panic!("config rejected: {error}"));

        assert_eq!(config.search_mode, SearchMode::Remote);
        assert_eq!(config.default_locale, Locale::De);
        assert_eq!(
            config.backend,
            BackendConfig::Memory {
                seed_demo_data: false
            }
        );
    }

    #[test]
    fn socket_address_rejects_hostnames() {
        let config = config_from(&[("API_HOST", "localhost")])
            .unwrap_or_else(|error| panic!("config rejected: {error}"));
        assert!(config.socket_address().is_err());
    }
}
