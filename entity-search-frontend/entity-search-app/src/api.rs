use entity_search::Endpoint;

cfg_if::cfg_if! {
    if #[cfg(feature = "csr")] {
        use async_trait::async_trait;
        use entity_search::{parse_response, SearchBackend, SearchError};
        use entity_search_api_types::SearchResponse;
        use leptos::leptos_dom::helpers::window;
        use url::Url;

        /// Fetches through the browser so the page's cookies and origin apply.
        #[derive(Clone, Copy, Default)]
        pub struct GlooBackend;

        #[async_trait(?Send)]
        impl SearchBackend for GlooBackend {
            async fn search(&self, url: &Url) -> Result<SearchResponse, SearchError> {
                let response = gloo_net::http::Request::get(url.as_str())
                    .send()
                    .await
                    .map_err(|e| SearchError::Transport(e.to_string()))?;
                let status = response.status();
                let body = response
                    .text()
                    .await
                    .map_err(|e| SearchError::Transport(e.to_string()))?;
                parse_response(status, url, &body)
            }
        }

        pub type PageBackend = GlooBackend;

        /// Same host and port as the page that loaded the widget.
        pub fn page_endpoint() -> Endpoint {
            let location = window().location();
            let hostname = location.hostname().unwrap_or_default();
            let port = location.port().unwrap_or_default();
            let mut endpoint = Endpoint::from_location(&hostname, &port);
            if let Ok(protocol) = location.protocol() {
                endpoint.scheme = protocol.trim_end_matches(':').to_string();
            }
            log::debug!("search endpoint {endpoint:?}");
            endpoint
        }
    } else {
        pub type PageBackend = entity_search::ReqwestBackend;

        // no window to ask outside the browser
        pub fn page_endpoint() -> Endpoint {
            Endpoint::localhost(8080)
        }
    }
}
