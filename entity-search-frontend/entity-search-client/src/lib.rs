use entity_search::WidgetConfig;
use entity_search_app::*;
use leptos::prelude::*;
use wasm_bindgen::prelude::*;

/// Mounts the search widget into `<body>`. `config_json` may override any
/// field of the default config, e.g. `{"api_path": "/search.html/api"}`.
#[wasm_bindgen]
pub fn mount(config_json: Option<String>) -> Result<(), JsValue> {
    _ = console_log::init_with_level(log::Level::Debug);
    console_error_panic_hook::set_once();

    let config = match config_json {
        Some(json) => {
            WidgetConfig::from_json(&json).map_err(|e| JsValue::from_str(&e.to_string()))?
        }
        None => WidgetConfig::default(),
    };
    log::info!("csr mode - mounting search widget");

    leptos::mount::mount_to_body(move || view! { <App config /> });
    Ok(())
}
