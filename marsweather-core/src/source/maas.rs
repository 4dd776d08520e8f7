use std::num::NonZeroU32;

use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use crate::{
    config::Config,
    endpoint::{DEFAULT_BASE_URL, Endpoint},
    error::{Error, Result},
    model::{ArchivePage, LatestReport},
};

use super::MarsWeatherSource;

/// Client for the MAAS REST API.
///
/// Holds nothing but the transport and the base URL, so clones are cheap and
/// calls may run concurrently.
#[derive(Debug, Clone)]
pub struct MaasClient {
    http: Client,
    base_url: String,
}

impl MaasClient {
    /// Client against the public service. `None` uses a default transport.
    pub fn new(http: Option<Client>) -> Self {
        Self::with_base_url(http, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(http: Option<Client>, base_url: impl Into<String>) -> Self {
        Self { http: http.unwrap_or_default(), base_url: base_url.into() }
    }

    /// Build the transport from `config` (timeout, proxy, user agent).
    pub fn from_config(config: &Config) -> Result<Self> {
        let http = config.http_client()?;
        Ok(Self::with_base_url(Some(http), config.base_url.clone()))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[instrument(skip(self))]
    pub async fn get_latest(&self) -> Result<LatestReport> {
        self.fetch(Endpoint::Latest).await
    }

    #[instrument(skip(self))]
    pub async fn get_archive_page(&self, page: NonZeroU32) -> Result<ArchivePage> {
        self.fetch(Endpoint::ArchivePage(page)).await
    }

    /// Archive reports between two dates, inclusive as the service defines it.
    ///
    /// Only the calendar date of each argument is sent. The order of `from`
    /// and `to` is passed through unchecked.
    #[instrument(skip_all)]
    pub async fn get_archive_date_range<F, T>(&self, from: &F, to: &T) -> Result<ArchivePage>
    where
        F: Datelike + Sync,
        T: Datelike + Sync,
    {
        self.fetch(Endpoint::date_range(from, to)).await
    }

    async fn fetch<R: DeserializeOwned>(&self, endpoint: Endpoint) -> Result<R> {
        let url = endpoint.url(&self.base_url);
        let body = self.get_body(&url).await?;

        serde_json::from_str(&body).map_err(|source| Error::Decode { endpoint: url, source })
    }

    /// GET `url` and read the whole body. The response is consumed on every path.
    async fn get_body(&self, url: &str) -> Result<String> {
        debug!(url = %url, "Sending request");

        let res = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|source| Error::Transport { endpoint: url.to_string(), source })?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|source| Error::Transport { endpoint: url.to_string(), source })?;

        debug!(url = %url, status = %status, bytes = body.len(), "Received response");

        if !status.is_success() {
            warn!(url = %url, status = %status, "Request failed");
            return Err(Error::Status {
                endpoint: url.to_string(),
                status,
                body: truncate_body(&body),
            });
        }

        Ok(body)
    }
}

impl Default for MaasClient {
    fn default() -> Self {
        Self::new(None)
    }
}

#[async_trait]
impl MarsWeatherSource for MaasClient {
    async fn latest(&self) -> Result<LatestReport> {
        self.get_latest().await
    }

    async fn archive_page(&self, page: NonZeroU32) -> Result<ArchivePage> {
        self.get_archive_page(page).await
    }

    async fn archive_range(&self, from: NaiveDate, to: NaiveDate) -> Result<ArchivePage> {
        self.get_archive_date_range(&from, &to).await
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
