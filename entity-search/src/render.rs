use entity_search_api_types::{Entity, SearchResponse};
use std::fmt::Write;

/// Display data for one entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityCard {
    pub name: String,
    /// Matched synonym with its edit distance and score.
    pub synonym_line: String,
    pub description: String,
    pub image_url: String,
    pub wikidata_url: String,
    pub wikipedia_url: String,
}

impl From<&Entity> for EntityCard {
    fn from(entity: &Entity) -> Self {
        Self {
            name: entity.entity_name.clone(),
            synonym_line: format!(
                "{} (PED: {}, score: {})",
                entity.entity_synonym, entity.entity_ped, entity.entity_score
            ),
            description: entity.entity_desc.clone(),
            image_url: entity.entity_img.clone(),
            wikidata_url: entity.entity_wikidata_url.clone(),
            wikipedia_url: entity.entity_wikipedia_url.clone(),
        }
    }
}

impl EntityCard {
    /// Payload fields are written into the markup as received.
    pub fn write_html(&self, out: &mut String) {
        let Self {
            name,
            synonym_line,
            description,
            image_url,
            wikidata_url,
            wikipedia_url,
        } = self;
        // writing to a String can't fail
        let _ = write!(
            out,
            concat!(
                r#"<div class="entity">"#,
                r#"<a class="entity-img" href="{wikidata_url}"><img src="{image_url}"></a>"#,
                r#"<div class="entity-details">"#,
                r#"<span class="entity-name">{name}</span>"#,
                r#"<span class="entity-synonym">{synonym_line}</span>"#,
                r#"<p class="entity-desc">{description}</p>"#,
                r#"<div class="entity-links">"#,
                r#"<a href="{wikidata_url}" title="Wikidata"><i class="fa-solid fa-database"></i></a>"#,
                r#"<a href="{wikipedia_url}" title="Wikipedia"><i class="fa-brands fa-wikipedia-w"></i></a>"#,
                r#"</div></div></div>"#
            ),
            wikidata_url = wikidata_url,
            image_url = image_url,
            name = name,
            synonym_line = synonym_line,
            description = description,
            wikipedia_url = wikipedia_url,
        );
    }
}

/// Content of both output regions for one response.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResultView {
    pub result_header: String,
    pub cards: Vec<EntityCard>,
}

impl ResultView {
    pub fn from_response(response: &SearchResponse) -> Self {
        Self {
            result_header: response.query.clone(),
            cards: response.entities.iter().map(EntityCard::from).collect(),
        }
    }

    /// All cards concatenated, ready to replace the result body in one assignment.
    pub fn result_body_html(&self) -> String {
        let mut html = String::new();
        for card in &self.cards {
            card.write_html(&mut html);
        }
        html
    }
}
