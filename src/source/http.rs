use async_trait::async_trait;
use serde_json::Value;
use url::Url;

use super::{DataSource, Endpoint};
use crate::error::{Error, Result};

/// Default base URL of the dashboard backend.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// Reads the three endpoints over HTTP from a single base URL.
///
/// No retries and no per-request timeout: the orchestrator owns the timeout
/// for the joined reads.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpSource {
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(Error::UrlParse(format!("not a base URL: {base_url}")));
        }
        Ok(Self {
            client: reqwest::Client::new(),
            base_url,
        })
    }

    /// Use a preconfigured client (proxies, TLS roots, default headers).
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Absolute URL for an endpoint. The endpoint path replaces any path on
    /// the base URL.
    pub fn endpoint_url(&self, endpoint: Endpoint) -> Result<Url> {
        Ok(self.base_url.join(endpoint.path())?)
    }
}

#[async_trait]
impl DataSource for HttpSource {
    async fn fetch(&self, endpoint: Endpoint) -> Result<Value> {
        let url = self.endpoint_url(endpoint)?;
        log::debug!("GET {url}");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status {
                endpoint,
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| Error::Decode {
            endpoint,
            message: e.to_string(),
        })
    }
}
