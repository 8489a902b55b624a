use crate::error::ConfigError;
use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;

pub const DEFAULT_MODEL: &str = "mistral-7b-instruct";
pub const DEFAULT_BASE_URL: &str = "https://api.mistral.ai/v1";

#[derive(Clone)]
pub struct MistralSettings {
    pub api_key: String,
    pub base_url: String,
    pub timeout: Option<Duration>,
}

impl fmt::Debug for MistralSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MistralSettings")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub mistral: MistralSettings,
    pub model: String,
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let api_key = var("MISTRAL_API_KEY").ok_or(ConfigError::MissingApiKey)?;
        let base_url = var("MISTRAL_BASE_URL")
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        let timeout = match var("MISTRAL_TIMEOUT_SECS") {
            Some(raw) => Some(Duration::from_secs(raw.trim().parse::<u64>().map_err(|_| {
                ConfigError::InvalidValue {
                    name: "MISTRAL_TIMEOUT_SECS",
                    value: raw.clone(),
                }
            })?)),
            None => None,
        };
        let model = var("MISTRAL_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let host = var("BACKEND_HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = match var("BACKEND_PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|_| ConfigError::InvalidValue {
                name: "BACKEND_PORT",
                value: raw.clone(),
            })?,
            None => 8080,
        };
        let raw_origins = var("CORS_ALLOWED_ORIGINS").unwrap_or_else(|| "http://localhost:5173".to_string());
        let cors_allowed_origins: Vec<String> = raw_origins
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();
        // `*` is not a valid entry in an origin list
        if cors_allowed_origins.iter().any(|origin| origin == "*") {
            return Err(ConfigError::InvalidValue {
                name: "CORS_ALLOWED_ORIGINS",
                value: raw_origins,
            });
        }

        Ok(Self {
            mistral: MistralSettings {
                api_key,
                base_url,
                timeout,
            },
            model,
            host,
            port,
            cors_allowed_origins,
        })
    }

    pub fn listen_addr(&self) -> Result<SocketAddr, ConfigError> {
        let raw = format!("{}:{}", self.host, self.port);
        raw.parse().map_err(|_| ConfigError::InvalidValue {
            name: "BACKEND_HOST",
            value: raw,
        })
    }
}
