//! Search-as-you-type widget core.
//!
//! Everything here is independent of the DOM: the Leptos frontend plugs a
//! [`SearchBackend`] and a [`ResultSurface`] into [`SearchWidget`] and forwards
//! keystrokes to it.

pub mod backend;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod render;
pub mod sequence;
pub mod surface;
pub mod widget;

#[cfg(feature = "reqwest")]
pub use backend::ReqwestBackend;
pub use backend::{parse_response, SearchBackend};
pub use config::{QueryEncoding, WidgetConfig};
pub use endpoint::Endpoint;
pub use entity_search_api_types::{Entity, EntityPed, SearchResponse};
pub use error::{ConfigError, SearchError};
pub use render::{EntityCard, ResultView};
pub use sequence::{RequestSequencer, Ticket};
pub use surface::{MemorySurface, ResultSurface};
pub use widget::{Outcome, SearchWidget};
