//! Blocking remote fetches with reqwest.

use std::time::Duration;

use reqwest::blocking::Client;
use url::Url;

use persistence_core::Fetch;

use crate::error::Error;

/// Fetches remote documents with a blocking reqwest client.
///
/// Only successful (2xx) responses count; anything else is an
/// [`Error::Status`].
pub struct ReqwestFetcher {
    client: Client,
}

impl ReqwestFetcher {
    /// Create a fetcher without a request timeout.
    pub fn new() -> Result<Self, Error> {
        Ok(Self {
            client: Client::builder().build()?,
        })
    }

    /// Create a fetcher whose requests give up after `timeout`.
    pub fn with_timeout(timeout: Duration) -> Result<Self, Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    /// Create a fetcher honouring an optional timeout.
    pub fn from_timeout(timeout: Option<Duration>) -> Result<Self, Error> {
        match timeout {
            Some(timeout) => Self::with_timeout(timeout),
            None => Self::new(),
        }
    }

    /// GET `url` and return the body as text.
    pub fn get_text(&self, url: &Url) -> Result<String, Error> {
        log::debug!("GET {}", url);
        let response = self.client.get(url.clone()).send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status {
                url: url.to_string(),
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        Ok(response.text()?)
    }
}

impl Fetch for ReqwestFetcher {
    fn fetch(&self, url: &Url) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        Ok(self.get_text(url)?)
    }
}
