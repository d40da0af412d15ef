use thiserror::Error;

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),
    /// The request never produced a response: connection refused, DNS, timeout.
    #[error("Transport error: {0}")]
    Transport(String),
    #[error("Search backend returned HTTP {status} for {url}")]
    Protocol { status: u16, url: String },
    /// Body was not JSON or did not have the `QUERY`/`ENTITYS` shape.
    #[error("Malformed search payload: {0}")]
    Payload(#[from] serde_json::Error),
}

#[cfg(feature = "reqwest")]
impl From<reqwest::Error> for SearchError {
    fn from(value: reqwest::Error) -> Self {
        Self::Transport(value.to_string())
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Unable to parse widget config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("api_path must start with '/', got {0:?}")]
    RelativeApiPath(String),
    #[error("api_path can't carry a query or fragment, got {0:?}")]
    ApiPathQueryOrFragment(String),
    #[error("query_param can't be empty")]
    EmptyQueryParam,
    #[error("query_param may only use letters, digits and '-', '_', '.', '~', got {0:?}")]
    ReservedQueryParam(String),
    #[error("{0} can't be empty")]
    EmptyElementId(&'static str),
}
