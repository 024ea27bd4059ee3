use anyhow::Result;
use async_trait::async_trait;

use crate::models::ContentListing;

/// Query accepted by the content endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentQuery {
    pub categoria: Option<String>,
    pub subcategoria: Option<String>,
    pub page: Option<u32>,
}

impl ContentQuery {
    pub fn category(categoria: &str, subcategoria: &str) -> Self {
        Self {
            categoria: Some(categoria.to_string()),
            subcategoria: Some(subcategoria.to_string()),
            page: None,
        }
    }
}

#[async_trait]
pub trait ContentApi: Send + Sync {
    /// Base URL used to absolutize relative poster paths
    fn base_url(&self) -> &str;

    async fn get_content(&self, token: &str, query: &ContentQuery) -> Result<ContentListing>;
}

#[async_trait]
pub trait WatchHistoryApi: Send + Sync {
    /// Records that the signed-in user watched `content_id`
    async fn report_watched(&self, token: &str, content_id: &str) -> Result<()>;
}
