use async_trait::async_trait;
use entity_search_api_types::SearchResponse;
use log::debug;
use url::Url;

use crate::error::SearchError;

/// Something that can answer a search URL. The browser build uses gloo-net,
/// native builds and tests use reqwest.
#[async_trait(?Send)]
pub trait SearchBackend {
    async fn search(&self, url: &Url) -> Result<SearchResponse, SearchError>;
}

/// Shared status/body handling so every backend classifies failures the same way.
pub fn parse_response(status: u16, url: &Url, body: &str) -> Result<SearchResponse, SearchError> {
    if !(200..300).contains(&status) {
        return Err(SearchError::Protocol {
            status,
            url: url.to_string(),
        });
    }
    debug!("search response from {url}: {body}");
    Ok(serde_json::from_str(body)?)
}

#[cfg(feature = "reqwest")]
#[derive(Clone, Default)]
pub struct ReqwestBackend {
    client: reqwest::Client,
}

#[cfg(feature = "reqwest")]
impl ReqwestBackend {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[cfg(feature = "reqwest")]
#[async_trait(?Send)]
impl SearchBackend for ReqwestBackend {
    async fn search(&self, url: &Url) -> Result<SearchResponse, SearchError> {
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        parse_response(status, url, &body)
    }
}
