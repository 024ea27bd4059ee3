use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Catalog entry as the content API returns it
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ContentItem {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub nome: String,
    #[serde(default)]
    pub poster: String,
    #[serde(default)]
    pub sinopse: String,
    #[serde(default)]
    pub url: Option<String>,
}

/// `data` payload: either one list, or category -> subcategory -> list
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ContentListing {
    Flat(Vec<ContentItem>),
    Grouped(BTreeMap<String, BTreeMap<String, Vec<ContentItem>>>),
}

impl Default for ContentListing {
    fn default() -> Self {
        ContentListing::Flat(Vec::new())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContentResponse {
    #[serde(default)]
    pub data: Option<ContentListing>,
}

/// Item mapped for the front-end
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Content {
    /// Position-qualified id, unique within one listing
    pub id: String,
    pub original_id: String,
    pub title: String,
    pub image: String,
    pub category: String,
    pub description: String,
    /// Empty when the item has no absolute http(s) url
    pub video_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CategoryCatalog {
    pub categories: Vec<String>,
    pub by_category: BTreeMap<String, Vec<Content>>,
    pub featured: Vec<Content>,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(i64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Number(n) => n.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flat_listing() {
        let response: ContentResponse = serde_json::from_value(json!({
            "data": [
                {"id": 7, "nome": "Filme A", "poster": "p.jpg", "sinopse": "s", "url": "https://x/a.mp4"}
            ]
        }))
        .unwrap();

        match response.data.unwrap() {
            ContentListing::Flat(items) => {
                assert_eq!(items.len(), 1);
                assert_eq!(items[0].id, "7");
            }
            other => panic!("expected flat listing, got {:?}", other),
        }
    }

    #[test]
    fn test_grouped_listing() {
        let response: ContentResponse = serde_json::from_value(json!({
            "data": {
                "AÇÃO": {"Filme": [{"id": "a1", "nome": "Ação 1"}]},
                "DRAMA": {"Filme": [], "Serie": [{"id": "d1", "nome": "Drama 1"}]}
            }
        }))
        .unwrap();

        match response.data.unwrap() {
            ContentListing::Grouped(groups) => {
                assert_eq!(groups["AÇÃO"]["Filme"][0].nome, "Ação 1");
                assert_eq!(groups["DRAMA"]["Serie"][0].url, None);
            }
            other => panic!("expected grouped listing, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_data() {
        let response: ContentResponse = serde_json::from_value(json!({})).unwrap();
        assert!(response.data.is_none());
    }
}
