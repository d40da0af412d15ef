use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// How the typed query is placed into the request URL.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum QueryEncoding {
    /// Percent-encode everything except unreserved characters, so the backend
    /// receives exactly what was typed.
    #[default]
    Percent,
    /// Concatenate the input into the URL untouched. `&`, `#` and `+` in the
    /// input change the meaning of the request.
    Raw,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct WidgetConfig {
    /// Path of the search endpoint on the page's own host. `/search.html/api`
    /// is what older pages used.
    pub api_path: String,
    pub query_param: String,
    pub query_encoding: QueryEncoding,
    /// Drop responses that arrive after a response to a newer keystroke was
    /// already requested.
    pub discard_stale: bool,
    pub input_id: String,
    pub result_header_id: String,
    pub result_body_id: String,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            api_path: "/api".to_string(),
            query_param: "q".to_string(),
            query_encoding: QueryEncoding::default(),
            discard_stale: true,
            input_id: "field".to_string(),
            result_header_id: "result-header".to_string(),
            result_body_id: "result".to_string(),
        }
    }
}

impl WidgetConfig {
    /// Parses a config where every missing key falls back to its default.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.api_path.starts_with('/') {
            return Err(ConfigError::RelativeApiPath(self.api_path.clone()));
        }
        if self.api_path.contains(['?', '#']) {
            return Err(ConfigError::ApiPathQueryOrFragment(self.api_path.clone()));
        }
        if self.query_param.is_empty() {
            return Err(ConfigError::EmptyQueryParam);
        }
        // the name goes into the URL unescaped
        if !self
            .query_param
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '~'))
        {
            return Err(ConfigError::ReservedQueryParam(self.query_param.clone()));
        }
        for (name, id) in [
            ("input_id", &self.input_id),
            ("result_header_id", &self.result_header_id),
            ("result_body_id", &self.result_body_id),
        ] {
            if id.is_empty() {
                return Err(ConfigError::EmptyElementId(name));
            }
        }
        Ok(())
    }
}
