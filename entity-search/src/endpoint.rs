use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::borrow::Cow;
use url::Url;

use crate::config::{QueryEncoding, WidgetConfig};
use crate::error::SearchError;

/// RFC 3986 unreserved characters stay as they are, everything else is escaped.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Host and port of the page the widget is embedded in. Search requests always
/// go back to the same origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub scheme: String,
    pub host: String,
    /// `None` when the page is served from the scheme's default port.
    pub port: Option<u16>,
}

impl Endpoint {
    pub fn new(host: impl ToString, port: Option<u16>) -> Self {
        Self {
            scheme: "http".to_string(),
            host: host.to_string(),
            port,
        }
    }

    /// Builds an endpoint from `window.location.hostname` and `window.location.port`.
    /// The browser reports the default port as an empty string.
    pub fn from_location(hostname: &str, port: &str) -> Self {
        Self::new(hostname, port.parse().ok())
    }

    pub fn localhost(port: u16) -> Self {
        Self::new("localhost", Some(port))
    }

    pub fn search_url(&self, config: &WidgetConfig, query: &str) -> Result<Url, SearchError> {
        let value: Cow<'_, str> = match config.query_encoding {
            QueryEncoding::Percent => utf8_percent_encode(query, QUERY_VALUE).into(),
            QueryEncoding::Raw => query.into(),
        };
        let authority = match self.port {
            Some(port) => format!("{}:{port}", self.host),
            None => self.host.clone(),
        };
        let url = format!(
            "{}://{authority}{}?{}={value}",
            self.scheme, config.api_path, config.query_param
        );
        Ok(Url::parse(&url)?)
    }
}
