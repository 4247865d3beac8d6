use serde_json::Value;
use tracing::debug;

use crate::{config::Config, error::UpstreamError};

/// Ordered query parameters, as received from the caller.
pub type Params = Vec<(String, String)>;

const API_KEY_PARAM: &str = "api_key";

pub struct TmdbClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl TmdbClient {
    pub fn new(client: reqwest::Client, api_key: String, base_url: String) -> Self {
        if api_key.trim().is_empty() {
            tracing::warn!("no TMDB_API_KEY provided, upstream calls will be rejected");
        }

        let base_url = base_url.trim_end_matches('/').to_string();
        Self { client, api_key, base_url }
    }

    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("marquee/", env!("CARGO_PKG_VERSION")))
            .timeout(config.upstream_timeout)
            .build()?;
        Ok(Self::new(client, config.tmdb_api_key.clone(), config.tmdb_base_url.clone()))
    }

    /// GETs `endpoint` (relative to the API root) and returns the parsed body.
    ///
    /// The API key always goes first; caller params follow in their original order.
    /// A caller-supplied `api_key` is dropped so upstream only sees the configured one.
    pub async fn fetch(
        &self,
        endpoint: &str,
        params: &[(String, String)],
    ) -> Result<Value, UpstreamError> {
        let url = self.url_for(endpoint);

        let mut query: Params = Vec::with_capacity(params.len() + 1);
        query.push((API_KEY_PARAM.to_string(), self.api_key.clone()));
        query.extend(params.iter().filter(|(k, _)| k != API_KEY_PARAM).cloned());

        debug!(url = %url, params = ?redacted(&query), "upstream request");

        let resp = self
            .client
            .get(url.as_str())
            .query(&query)
            .send()
            .await
            .map_err(UpstreamError::Transport)?;

        let status = resp.status();
        if !status.is_success() {
            return Err(UpstreamError::Status(status));
        }

        resp.json().await.map_err(UpstreamError::Decode)
    }

    /// Checks the configured key with the cheapest authenticated endpoint.
    pub async fn validate_key(&self) -> bool {
        match self.fetch("/authentication", &[]).await {
            Ok(_) => true,
            Err(err) => {
                debug!(error = %err, "api key validation failed");
                false
            },
        }
    }

    fn url_for(&self, endpoint: &str) -> String {
        let endpoint = endpoint.trim_start_matches('/');
        format!("{}/{}", self.base_url, endpoint)
    }
}

fn redacted(query: &[(String, String)]) -> Vec<(&str, &str)> {
    query
        .iter()
        .map(|(k, v)| (k.as_str(), if k == API_KEY_PARAM { "***" } else { v.as_str() }))
        .collect()
}
