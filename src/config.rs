use std::{net::SocketAddr, time::Duration};

use anyhow::Context;

const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";

#[derive(Clone, Debug)]
pub struct Config {
    pub addr: SocketAddr,
    pub tmdb_api_key: String,
    pub tmdb_base_url: String,
    pub upstream_timeout: Duration,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source.
    pub fn from_lookup(var: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let host = var("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port: u16 = var("PORT").unwrap_or_else(|| "3000".to_string()).parse().context("PORT")?;

        let tmdb_api_key = var("TMDB_API_KEY").map(|k| k.trim().to_string()).unwrap_or_default();
        let tmdb_base_url = var("TMDB_BASE_URL")
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let upstream_timeout_secs: u64 = match var("UPSTREAM_TIMEOUT_SECS") {
            Some(s) => s.parse().context("UPSTREAM_TIMEOUT_SECS")?,
            None => 30,
        };
        anyhow::ensure!(upstream_timeout_secs > 0, "UPSTREAM_TIMEOUT_SECS must be at least 1");

        Ok(Self {
            addr: format!("{host}:{port}").parse().context("HOST/PORT")?,
            tmdb_api_key,
            tmdb_base_url,
            upstream_timeout: Duration::from_secs(upstream_timeout_secs),
        })
    }
}
