pub mod api;
pub mod components;

use crate::components::search_widget::*;
use entity_search::WidgetConfig;
use leptos::prelude::*;

#[component]
pub fn App(#[prop(optional)] config: WidgetConfig) -> impl IntoView {
    view! {
        <div class="search-page">
            <SearchWidget config />
        </div>
    }
}
