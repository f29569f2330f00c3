//! Centralized configuration (environment variables + defaults).

use anyhow::Context;
use std::net::SocketAddr;

pub const DEFAULT_API_BASE_URL: &str = "https://fakestoreapi.com";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_NOTICE_CAPACITY: usize = 32;

/// Base URL of the remote product catalog.
pub fn api_base_url() -> anyhow::Result<reqwest::Url> {
    let raw = std::env::var("CATALOG_API_BASE_URL")
        .unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string());
    parse_base_url(&raw)
}

/// Endpoint paths are appended as segments, so the URL must be able to carry them.
fn parse_base_url(raw: &str) -> anyhow::Result<reqwest::Url> {
    let url = reqwest::Url::parse(raw)
        .with_context(|| format!("CATALOG_API_BASE_URL must be a valid URL, got {raw:?}"))?;
    if url.cannot_be_a_base() {
        anyhow::bail!("CATALOG_API_BASE_URL cannot carry a path, got {raw:?}");
    }
    Ok(url)
}

/// Address the admin API listens on.
pub fn bind_addr() -> anyhow::Result<SocketAddr> {
    let raw = std::env::var("ADMIN_BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
    raw.parse::<SocketAddr>()
        .with_context(|| format!("ADMIN_BIND_ADDR must be a socket address, got {raw:?}"))
}

/// How many notices are retained before the oldest is dropped.
pub fn notice_capacity() -> anyhow::Result<usize> {
    match std::env::var("NOTICE_CAPACITY") {
        Ok(v) => Ok(v
            .parse::<usize>()
            .with_context(|| format!("NOTICE_CAPACITY must be a valid usize, got {v:?}"))?
            .max(1)),
        Err(_) => Ok(DEFAULT_NOTICE_CAPACITY),
    }
}

/// Snapshot of every setting, read once at startup.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    pub api_base_url: reqwest::Url,
    pub bind_addr: SocketAddr,
    pub notice_capacity: usize,
}

impl AdminConfig {
    /// Loads `.env` (if present) and reads every setting.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();
        Ok(Self {
            api_base_url: api_base_url()?,
            bind_addr: bind_addr()?,
            notice_capacity: notice_capacity()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_accepts_http_and_prefixed_paths() {
        let url = parse_base_url(DEFAULT_API_BASE_URL).unwrap();
        assert_eq!(url.host_str(), Some("fakestoreapi.com"));
        assert!(parse_base_url("http://127.0.0.1:8080/v1/").is_ok());
    }

    #[test]
    fn base_url_without_path_support_is_rejected() {
        for raw in ["mailto:ops@example.com", "data:text/plain,catalog"] {
            let err = parse_base_url(raw).unwrap_err();
            assert!(err.to_string().contains("cannot carry a path"), "{raw}: {err}");
        }
    }

    #[test]
    fn malformed_base_url_is_rejected() {
        let err = parse_base_url("not a url").unwrap_err();
        assert!(err.to_string().contains("must be a valid URL"));
    }
}
