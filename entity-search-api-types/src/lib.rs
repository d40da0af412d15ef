pub mod search;

pub use search::{Entity, EntityPed, SearchResponse};
