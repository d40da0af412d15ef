use crate::api::{page_endpoint, PageBackend};
use entity_search::{ResultSurface, ResultView, SearchWidget as WidgetCore, WidgetConfig};
use icondata as i;
use leptos::{prelude::*, task::spawn_local};
use leptos_icons::*;
use std::sync::Arc;
use web_sys::KeyboardEvent;

/// Result header and result body backed by signals, so a response reaches the
/// DOM as two plain signal writes.
#[derive(Clone, Copy)]
pub struct SignalSurface {
    result_header: WriteSignal<String>,
    result_body: WriteSignal<String>,
}

impl SignalSurface {
    pub fn new(result_header: WriteSignal<String>, result_body: WriteSignal<String>) -> Self {
        Self {
            result_header,
            result_body,
        }
    }
}

impl ResultSurface for SignalSurface {
    fn replace(&self, view: &ResultView) {
        self.result_header.set(view.result_header.clone());
        self.result_body.set(view.result_body_html());
    }
}

#[component]
pub fn SearchWidget(#[prop(optional)] config: WidgetConfig) -> impl IntoView {
    let (result_header, set_result_header) = signal(String::new());
    let (result_body, set_result_body) = signal(String::new());
    let WidgetConfig {
        input_id,
        result_header_id,
        result_body_id,
        ..
    } = config.clone();

    let widget = match WidgetCore::new(
        PageBackend::default(),
        SignalSurface::new(set_result_header, set_result_body),
        page_endpoint(),
        config,
    ) {
        Ok(widget) => Arc::new(widget),
        Err(e) => {
            log::error!("search widget disabled: {e}");
            return view! { <div class="search-widget"></div> }.into_any();
        }
    };

    // every key counts, arrows and modifiers included
    let on_keyup = move |ev: KeyboardEvent| {
        let query = event_target_value(&ev);
        let widget = widget.clone();
        spawn_local(async move {
            widget.on_keystroke(&query).await;
        });
    };

    view! {
        <div class="search-widget">
            <div class="relative">
                <input
                    id=input_id
                    on:keyup=on_keyup
                    placeholder="Search entities..."
                    class="input w-full pl-10"
                    type="text"
                />
                <div class="absolute left-3 top-1/2 -translate-y-1/2 text-[color:var(--color-text-muted)]">
                    <Icon icon=i::AiSearchOutlined />
                </div>
            </div>
            <h3 id=result_header_id class="result-header">{move || result_header.get()}</h3>
            <div id=result_body_id class="result" inner_html=move || result_body.get()></div>
        </div>
    }
    .into_any()
}
