use entity_search_api_types::SearchResponse;
use log::{debug, info, warn};
use url::Url;

use crate::backend::SearchBackend;
use crate::config::WidgetConfig;
use crate::endpoint::Endpoint;
use crate::error::{ConfigError, SearchError};
use crate::render::ResultView;
use crate::sequence::{RequestSequencer, Ticket};
use crate::surface::ResultSurface;

/// What happened to a single keystroke.
#[derive(Debug)]
pub enum Outcome {
    Rendered { ticket: Ticket, cards: usize },
    /// A newer request was dispatched before this response arrived.
    Discarded { ticket: Ticket },
    /// Nothing was rendered, the surface still shows the previous results.
    Failed(SearchError),
}

/// Turns keystrokes into search requests and draws the responses onto a
/// [`ResultSurface`].
pub struct SearchWidget<B, S> {
    backend: B,
    surface: S,
    endpoint: Endpoint,
    config: WidgetConfig,
    sequencer: RequestSequencer,
}

impl<B, S> SearchWidget<B, S>
where
    B: SearchBackend,
    S: ResultSurface,
{
    /// Fails when `config` does not pass [`WidgetConfig::validate`].
    pub fn new(
        backend: B,
        surface: S,
        endpoint: Endpoint,
        config: WidgetConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let widget = Self {
            backend,
            surface,
            endpoint,
            config,
            sequencer: RequestSequencer::new(),
        };
        match widget.target() {
            Ok(url) => info!(
                "search widget bound to #{} querying {url}",
                widget.config.input_id
            ),
            Err(e) => warn!(
                "search widget bound to #{} can't build a URL for {:?}: {e}",
                widget.config.input_id, widget.endpoint
            ),
        }
        Ok(widget)
    }

    /// The request URL for an empty query.
    pub fn target(&self) -> Result<Url, SearchError> {
        self.endpoint.search_url(&self.config, "")
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Sends one request for the current input value. No length check and no
    /// debounce: every keystroke is a request.
    pub async fn on_keystroke(&self, query: &str) -> Outcome {
        debug!("Input: {query}");
        // issued before the URL is built so older in-flight responses are stale
        // even if this keystroke never reaches the network
        let ticket = self.sequencer.issue();
        let result = match self.endpoint.search_url(&self.config, query) {
            Ok(url) => self.backend.search(&url).await,
            Err(e) => Err(e),
        };
        self.on_response(ticket, result)
    }

    pub fn on_response(
        &self,
        ticket: Ticket,
        result: Result<SearchResponse, SearchError>,
    ) -> Outcome {
        if self.config.discard_stale && !self.sequencer.is_latest(ticket) {
            match &result {
                Ok(response) => debug!(
                    "discarding response {} for {:?}, {:?} is newer",
                    ticket.0,
                    response.query,
                    self.sequencer.latest()
                ),
                Err(e) => debug!(
                    "discarding failed request {}, {:?} is newer: {e}",
                    ticket.0,
                    self.sequencer.latest()
                ),
            }
            return Outcome::Discarded { ticket };
        }
        let response = match result {
            Ok(response) => response,
            Err(e) => {
                warn!("search request {} failed: {e}", ticket.0);
                return Outcome::Failed(e);
            }
        };
        let view = ResultView::from_response(&response);
        self.surface.replace(&view);
        Outcome::Rendered {
            ticket,
            cards: view.cards.len(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::surface::MemorySurface;
    use async_trait::async_trait;
    use entity_search_api_types::{Entity, EntityPed};
    use futures::channel::oneshot;
    use std::collections::HashMap;
    use std::sync::Mutex;

    type Reply = Result<SearchResponse, SearchError>;

    enum Scripted {
        Now(Reply),
        Later(oneshot::Receiver<Reply>),
    }

    /// Answers scripted queries, everything else gets an empty result set.
    #[derive(Default)]
    struct ScriptedBackend {
        replies: Mutex<HashMap<String, Scripted>>,
        requests: Mutex<Vec<Url>>,
    }

    impl ScriptedBackend {
        fn reply(&self, query: &str, reply: Reply) {
            self.replies
                .lock()
                .unwrap()
                .insert(query.to_string(), Scripted::Now(reply));
        }

        fn reply_later(&self, query: &str) -> oneshot::Sender<Reply> {
            let (tx, rx) = oneshot::channel();
            self.replies
                .lock()
                .unwrap()
                .insert(query.to_string(), Scripted::Later(rx));
            tx
        }

        fn queries(&self) -> Vec<String> {
            self.requests
                .lock()
                .unwrap()
                .iter()
                .flat_map(|url| {
                    url.query_pairs()
                        .filter(|(k, _)| k == "q")
                        .map(|(_, v)| v.into_owned())
                        .collect::<Vec<_>>()
                })
                .collect()
        }
    }

    #[async_trait(?Send)]
    impl SearchBackend for ScriptedBackend {
        async fn search(&self, url: &Url) -> Reply {
            self.requests.lock().unwrap().push(url.clone());
            let query = url
                .query_pairs()
                .find(|(k, _)| k == "q")
                .map(|(_, v)| v.into_owned())
                .unwrap_or_default();
            let scripted = self.replies.lock().unwrap().remove(&query);
            match scripted {
                Some(Scripted::Now(reply)) => reply,
                Some(Scripted::Later(rx)) => rx
                    .await
                    .unwrap_or_else(|_| Err(SearchError::Transport("reply dropped".to_string()))),
                None => Ok(response(&query, &[])),
            }
        }
    }

    fn response(query: &str, names: &[&str]) -> SearchResponse {
        SearchResponse {
            query: query.to_string(),
            entities: names
                .iter()
                .map(|name| Entity {
                    entity_name: name.to_string(),
                    entity_synonym: name.to_string(),
                    entity_ped: EntityPed::Number(0u64.into()),
                    entity_score: 100u64.into(),
                    entity_desc: format!("about {name}"),
                    entity_img: "https://img.example/x.png".to_string(),
                    entity_wikidata_url: "https://www.wikidata.org/wiki/Q1".to_string(),
                    entity_wikipedia_url: "https://en.wikipedia.org/wiki/X".to_string(),
                })
                .collect(),
        }
    }

    fn widget(config: WidgetConfig) -> SearchWidget<ScriptedBackend, MemorySurface> {
        widget_at(Endpoint::localhost(8080), config)
    }

    fn widget_at(
        endpoint: Endpoint,
        config: WidgetConfig,
    ) -> SearchWidget<ScriptedBackend, MemorySurface> {
        SearchWidget::new(
            ScriptedBackend::default(),
            MemorySurface::new(),
            endpoint,
            config,
        )
        .unwrap()
    }

    #[test]
    fn invalid_config_is_refused() {
        for config in [
            WidgetConfig {
                api_path: "/api#x".to_string(),
                ..Default::default()
            },
            WidgetConfig {
                query_param: "q&x".to_string(),
                ..Default::default()
            },
        ] {
            let widget = SearchWidget::new(
                ScriptedBackend::default(),
                MemorySurface::new(),
                Endpoint::localhost(8080),
                config,
            );
            assert!(widget.is_err());
        }
    }

    #[test]
    fn target_is_the_full_request_url() {
        let widget = widget(WidgetConfig::default());
        assert_eq!(
            widget.target().unwrap().as_str(),
            "http://localhost:8080/api?q="
        );
        let widget = widget_at(
            Endpoint::new("example.org", None),
            WidgetConfig {
                api_path: "/search.html/api".to_string(),
                ..Default::default()
            },
        );
        assert_eq!(
            widget.target().unwrap().as_str(),
            "http://example.org/search.html/api?q="
        );
    }

    #[tokio::test]
    async fn unbuildable_url_sends_nothing() {
        let widget = widget_at(Endpoint::new("", Some(8080)), WidgetConfig::default());
        assert!(widget.target().is_err());
        let outcome = widget.on_keystroke("einstein").await;
        assert!(matches!(outcome, Outcome::Failed(SearchError::Url(_))));
        assert!(widget.backend.queries().is_empty());
        assert_eq!(widget.surface().renders(), 0);
        assert!(widget.surface().current().is_none());
    }

    #[tokio::test]
    async fn stale_failures_are_discarded_too() {
        let widget = widget(WidgetConfig::default());
        let short = widget.backend.reply_later("ei");
        let long = widget.backend.reply_later("ein");
        let (first, second, ()) = futures::join!(
            widget.on_keystroke("ei"),
            widget.on_keystroke("ein"),
            async move {
                long.send(Ok(response("ein", &["Albert Einstein"]))).unwrap();
                tokio::task::yield_now().await;
                short
                    .send(Err(SearchError::Transport("connection reset".to_string())))
                    .unwrap();
            }
        );
        assert!(matches!(second, Outcome::Rendered { cards: 1, .. }));
        assert!(matches!(first, Outcome::Discarded { .. }));
        assert_eq!(widget.surface().result_header().unwrap(), "ein");
    }

    #[tokio::test]
    async fn renders_header_and_cards() {
        let widget = widget(WidgetConfig::default());
        widget
            .backend
            .reply("einstein", Ok(response("einstein", &["Albert Einstein"])));
        let outcome = widget.on_keystroke("einstein").await;
        assert!(matches!(outcome, Outcome::Rendered { cards: 1, .. }));
        assert_eq!(widget.surface().result_header().unwrap(), "einstein");
        assert!(widget
            .surface()
            .result_body()
            .unwrap()
            .contains("Albert Einstein"));
    }

    #[tokio::test]
    async fn one_request_per_keystroke() {
        let widget = widget(WidgetConfig::default());
        for typed in ["a", "al", "alb", "alb", "alb e"] {
            widget.on_keystroke(typed).await;
        }
        assert_eq!(widget.backend.queries(), vec!["a", "al", "alb", "alb", "alb e"]);
        assert_eq!(widget.surface().renders(), 5);
    }

    #[tokio::test]
    async fn empty_result_set() {
        let widget = widget(WidgetConfig::default());
        let outcome = widget.on_keystroke("zzzz").await;
        assert!(matches!(outcome, Outcome::Rendered { cards: 0, .. }));
        assert_eq!(widget.surface().result_header().unwrap(), "zzzz");
        assert_eq!(widget.surface().result_body().unwrap(), "");
    }

    #[tokio::test]
    async fn new_results_replace_old_ones() {
        let widget = widget(WidgetConfig::default());
        widget
            .backend
            .reply("angel", Ok(response("angel", &["Angela Merkel", "Angel Falls"])));
        widget
            .backend
            .reply("eyjaf", Ok(response("eyjaf", &["Eyjafjallajökull"])));
        widget.on_keystroke("angel").await;
        widget.on_keystroke("eyjaf").await;
        let body = widget.surface().result_body().unwrap();
        assert!(body.contains("Eyjafjallajökull"));
        assert!(!body.contains("Angela Merkel"));
        assert!(!body.contains("Angel Falls"));
    }

    #[tokio::test]
    async fn repeated_query_renders_identically() {
        let widget = widget(WidgetConfig::default());
        widget
            .backend
            .reply("angel", Ok(response("angel", &["Angela Merkel"])));
        widget.on_keystroke("angel").await;
        let first = widget.surface().result_body().unwrap();
        widget
            .backend
            .reply("angel", Ok(response("angel", &["Angela Merkel"])));
        widget.on_keystroke("angel").await;
        assert_eq!(first, widget.surface().result_body().unwrap());
    }

    #[tokio::test]
    async fn failures_keep_previous_results() {
        let widget = widget(WidgetConfig::default());
        widget
            .backend
            .reply("angel", Ok(response("angel", &["Angela Merkel"])));
        widget.on_keystroke("angel").await;

        widget.backend.reply(
            "angela",
            Err(SearchError::Protocol {
                status: 500,
                url: "http://localhost:8080/api?q=angela".to_string(),
            }),
        );
        let outcome = widget.on_keystroke("angela").await;
        assert!(matches!(
            outcome,
            Outcome::Failed(SearchError::Protocol { status: 500, .. })
        ));

        widget
            .backend
            .reply("angela m", Err(SearchError::Transport("connection refused".to_string())));
        let outcome = widget.on_keystroke("angela m").await;
        assert!(matches!(outcome, Outcome::Failed(SearchError::Transport(_))));

        assert_eq!(widget.surface().renders(), 1);
        assert_eq!(widget.surface().result_header().unwrap(), "angel");
        // still accepts keystrokes afterwards
        let outcome = widget.on_keystroke("angela me").await;
        assert!(matches!(outcome, Outcome::Rendered { .. }));
    }

    #[tokio::test]
    async fn stale_responses_are_discarded() {
        let widget = widget(WidgetConfig::default());
        let short = widget.backend.reply_later("ei");
        let long = widget.backend.reply_later("ein");
        let (first, second, ()) = futures::join!(
            widget.on_keystroke("ei"),
            widget.on_keystroke("ein"),
            async move {
                long.send(Ok(response("ein", &["Albert Einstein"]))).unwrap();
                tokio::task::yield_now().await;
                short.send(Ok(response("ei", &["Eiffel Tower"]))).unwrap();
            }
        );
        assert!(matches!(second, Outcome::Rendered { cards: 1, .. }));
        assert!(matches!(first, Outcome::Discarded { .. }));
        assert_eq!(widget.surface().renders(), 1);
        assert_eq!(widget.surface().result_header().unwrap(), "ein");
        assert!(!widget.surface().result_body().unwrap().contains("Eiffel Tower"));
    }

    #[tokio::test]
    async fn last_arrival_wins_without_discarding() {
        let widget = widget(WidgetConfig {
            discard_stale: false,
            ..Default::default()
        });
        let short = widget.backend.reply_later("ei");
        let long = widget.backend.reply_later("ein");
        let (first, second, ()) = futures::join!(
            widget.on_keystroke("ei"),
            widget.on_keystroke("ein"),
            async move {
                long.send(Ok(response("ein", &["Albert Einstein"]))).unwrap();
                tokio::task::yield_now().await;
                short.send(Ok(response("ei", &["Eiffel Tower"]))).unwrap();
            }
        );
        assert!(matches!(first, Outcome::Rendered { .. }));
        assert!(matches!(second, Outcome::Rendered { .. }));
        assert_eq!(widget.surface().result_header().unwrap(), "ei");
    }
}
