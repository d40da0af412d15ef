use serde::{Deserialize, Serialize};
use serde_json::Number;
use std::fmt::Display;

/// Body of a `GET /api?q=...` response.
#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct SearchResponse {
    /// The query as the backend understood it, shown verbatim in the result header.
    #[serde(rename = "QUERY")]
    pub query: String,
    /// Matches in display order. The wire name really is `ENTITYS`.
    #[serde(rename = "ENTITYS")]
    pub entities: Vec<Entity>,
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct Entity {
    pub entity_name: String,
    pub entity_synonym: String,
    /// Prefix edit distance between the query and the matched synonym.
    pub entity_ped: EntityPed,
    pub entity_score: Number,
    pub entity_desc: String,
    pub entity_img: String,
    pub entity_wikidata_url: String,
    pub entity_wikipedia_url: String,
}

/// Backends disagree on whether the edit distance is sent as a number or a string.
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
#[serde(untagged)]
pub enum EntityPed {
    Number(Number),
    Text(String),
}

impl Display for EntityPed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityPed::Number(n) => write!(f, "{n}"),
            EntityPed::Text(t) => write!(f, "{t}"),
        }
    }
}
