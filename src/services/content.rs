use anyhow::Result;
use std::collections::BTreeMap;
use tracing::{debug, warn};

use crate::backends::traits::{ContentApi, ContentQuery};
use crate::models::{CategoryCatalog, Content, ContentItem, ContentListing};
use crate::storage::CredentialSource;

const FEATURED_COUNT: usize = 4;

/// Pure functions for turning catalog responses into front-end items
pub struct ContentService;

impl ContentService {
    pub fn map_item(item: &ContentItem, index: usize, category: &str, base_url: &str) -> Content {
        let image = if item.poster.starts_with("http") || item.poster.is_empty() {
            item.poster.clone()
        } else {
            format!(
                "{}/{}",
                base_url.trim_end_matches('/'),
                item.poster.trim_start_matches('/')
            )
        };

        let video_url = item
            .url
            .as_deref()
            .filter(|url| url.starts_with("http"))
            .unwrap_or_default()
            .to_string();

        Content {
            id: format!("{}-{}", item.id, index),
            original_id: item.id.clone(),
            title: item.nome.clone(),
            image,
            category: category.to_string(),
            description: item.sinopse.clone(),
            video_url,
        }
    }

    /// Items for one category/subcategory, whatever shape the listing has
    pub fn items_for(listing: ContentListing, categoria: &str, subcategoria: &str) -> Vec<ContentItem> {
        match listing {
            ContentListing::Flat(items) => items,
            ContentListing::Grouped(mut groups) => groups
                .remove(categoria)
                .and_then(|mut subs| subs.remove(subcategoria))
                .unwrap_or_default(),
        }
    }

    pub async fn fetch_category(
        api: &dyn ContentApi,
        credentials: &dyn CredentialSource,
        categoria: &str,
        subcategoria: &str,
    ) -> Result<Vec<Content>> {
        let Some(token) = credentials.token().await else {
            warn!("No auth token available, not fetching {}", categoria);
            return Ok(Vec::new());
        };

        let listing = api
            .get_content(&token, &ContentQuery::category(categoria, subcategoria))
            .await?;
        let items = Self::items_for(listing, categoria, subcategoria);
        debug!("{} items in {} / {}", items.len(), categoria, subcategoria);

        Ok(items
            .iter()
            .enumerate()
            .map(|(index, item)| Self::map_item(item, index, categoria, api.base_url()))
            .collect())
    }

    /// Every category for one subcategory, plus the first items as featured
    pub async fn fetch_catalog(
        api: &dyn ContentApi,
        credentials: &dyn CredentialSource,
        subcategoria: &str,
    ) -> Result<CategoryCatalog> {
        let Some(token) = credentials.token().await else {
            warn!("No auth token available, not fetching catalog");
            return Ok(CategoryCatalog::default());
        };

        let query = ContentQuery {
            subcategoria: Some(subcategoria.to_string()),
            ..Default::default()
        };
        let listing = api.get_content(&token, &query).await?;
        let base_url = api.base_url();

        let mut catalog = CategoryCatalog::default();
        let groups = match listing {
            ContentListing::Grouped(groups) => groups,
            ContentListing::Flat(items) => {
                BTreeMap::from([(
                    subcategoria.to_string(),
                    BTreeMap::from([(subcategoria.to_string(), items)]),
                )])
            }
        };

        let mut all = Vec::new();
        for (category, mut subs) in groups {
            catalog.categories.push(category.clone());
            let Some(items) = subs.remove(subcategoria) else {
                continue;
            };
            let mapped: Vec<Content> = items
                .iter()
                .enumerate()
                .map(|(index, item)| Self::map_item(item, index, &category, base_url))
                .collect();
            all.extend(mapped.iter().cloned());
            catalog.by_category.insert(category, mapped);
        }

        catalog.featured = all.into_iter().take(FEATURED_COUNT).collect();
        Ok(catalog)
    }
}
