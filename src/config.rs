//! Env-driven configuration for the service and library.
//!
//! Values are read from the process environment; `dotenv` is loaded on demand
//! by the binaries. Everything but the API token has a default. The token is
//! never printed.
use std::env;
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use crate::error::{AppError, AppResult};

pub const DEFAULT_MODEL_URL: &str =
    "https://api-inference.huggingface.co/models/black-forest-labs/FLUX.1-dev";
pub const DEFAULT_API_HOST: &str = "127.0.0.1";
pub const DEFAULT_API_PORT: &str = "8189";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;

#[derive(Clone)]
pub struct Config {
    pub hf_api_token: String,
    pub model_url: String,
    pub api_host: String,
    pub api_port: String,
    /// 0 disables the outbound timeout.
    pub request_timeout_secs: u64,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("hf_api_token", &"<redacted>")
            .field("model_url", &self.model_url)
            .field("api_host", &self.api_host)
            .field("api_port", &self.api_port)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

impl Config {
    pub fn dotenv_load() {
        dotenv::dotenv().ok();
    }

    pub fn new() -> AppResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; `new` uses the process environment.
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let hf_api_token = var("HF_API_TOKEN")
            .ok_or_else(|| AppError::Config("HF_API_TOKEN must be set".to_string()))?;
        let request_timeout_secs = match var("REQUEST_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|_| {
                AppError::Config(format!("REQUEST_TIMEOUT_SECS is not a number: '{}'", raw))
            })?,
            None => DEFAULT_REQUEST_TIMEOUT_SECS,
        };

        Ok(Config {
            hf_api_token: hf_api_token.trim().to_string(),
            model_url: var("HF_MODEL_URL").unwrap_or_else(|| DEFAULT_MODEL_URL.to_string()),
            api_host: var("API_HOST").unwrap_or_else(|| DEFAULT_API_HOST.to_string()),
            api_port: var("API_PORT").unwrap_or_else(|| DEFAULT_API_PORT.to_string()),
            request_timeout_secs,
        })
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        match self.request_timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }

    /// Listen address; invalid host or port values fall back to the defaults.
    pub fn socket_addr(&self) -> SocketAddr {
        let ip: IpAddr = self.api_host.trim().parse().unwrap_or_else(|_| {
            tracing::warn!("Invalid API_HOST '{}', falling back to {}", self.api_host, DEFAULT_API_HOST);
            IpAddr::V4(Ipv4Addr::LOCALHOST)
        });
        let port: u16 = self.api_port.trim().parse().unwrap_or_else(|_| {
            tracing::warn!("Invalid API_PORT '{}', falling back to {}", self.api_port, DEFAULT_API_PORT);
            8189
        });
        SocketAddr::new(ip, port)
    }

    pub fn print_env_vars() {
        let token = if env::var("HF_API_TOKEN").map(|v| !v.trim().is_empty()).unwrap_or(false) {
            "<set>"
        } else {
            "<unset>"
        };
        println!("HF_API_TOKEN: {}", token);
        println!("HF_MODEL_URL: {}", env::var("HF_MODEL_URL").unwrap_or_else(|_| "<unset>".to_string()));
        println!("API_HOST: {}", env::var("API_HOST").unwrap_or_else(|_| "<unset>".to_string()));
        println!("API_PORT: {}", env::var("API_PORT").unwrap_or_else(|_| "<unset>".to_string()));
        println!(
            "REQUEST_TIMEOUT_SECS: {}",
            env::var("REQUEST_TIMEOUT_SECS").unwrap_or_else(|_| "<unset>".to_string())
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn missing_token_is_fatal() {
        let err = Config::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
        let err = Config::from_lookup(lookup(&[("HF_API_TOKEN", "   ")])).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn defaults_apply_when_only_token_is_set() {
        let cfg = Config::from_lookup(lookup(&[("HF_API_TOKEN", "hf_abc")])).unwrap();
        assert_eq!(cfg.hf_api_token, "hf_abc");
        assert_eq!(cfg.model_url, DEFAULT_MODEL_URL);
        assert_eq!(cfg.api_host, "127.0.0.1");
        assert_eq!(cfg.api_port, "8189");
        assert_eq!(cfg.request_timeout(), Some(Duration::from_secs(120)));
    }

    #[test]
    fn zero_timeout_disables_it() {
        let cfg = Config::from_lookup(lookup(&[
            ("HF_API_TOKEN", "hf_abc"),
            ("REQUEST_TIMEOUT_SECS", "0"),
        ]))
        .unwrap();
        assert_eq!(cfg.request_timeout(), None);
    }

    #[test]
    fn bad_timeout_is_rejected() {
        let err = Config::from_lookup(lookup(&[
            ("HF_API_TOKEN", "hf_abc"),
            ("REQUEST_TIMEOUT_SECS", "soon"),
        ]))
        .unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn socket_addr_uses_configured_host_and_port() {
        let cfg = Config::from_lookup(lookup(&[
            ("HF_API_TOKEN", "hf_abc"),
            ("API_HOST", "0.0.0.0"),
            ("API_PORT", "3000"),
        ]))
        .unwrap();
        assert_eq!(cfg.socket_addr(), "0.0.0.0:3000".parse::<SocketAddr>().unwrap());
    }

    #[test]
    fn invalid_host_and_port_fall_back_to_defaults() {
        let cfg = Config::from_lookup(lookup(&[
            ("HF_API_TOKEN", "hf_abc"),
            ("API_HOST", "localhost.invalid"),
            ("API_PORT", "99999"),
        ]))
        .unwrap();
        assert_eq!(cfg.socket_addr(), "127.0.0.1:8189".parse::<SocketAddr>().unwrap());
    }

    #[test]
    fn debug_redacts_token() {
        let cfg = Config::from_lookup(lookup(&[("HF_API_TOKEN", "hf_topsecret")])).unwrap();
        assert!(!format!("{:?}", cfg).contains("hf_topsecret"));
    }
}
