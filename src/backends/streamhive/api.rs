use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, warn};

use crate::backends::traits::{ContentApi, ContentQuery, WatchHistoryApi};
use crate::config::ApiConfig;
use crate::models::{ContentListing, ContentResponse};

#[derive(Debug, Serialize)]
struct WatchRequest<'a> {
    conteudo_id: &'a str,
}

/// REST client for the catalog and watch-history endpoints
#[derive(Debug, Clone)]
pub struct StreamHiveApi {
    client: reqwest::Client,
    base_url: String,
}

impl StreamHiveApi {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self> {
        Self::new(&config.base_url, Duration::from_secs(config.timeout_secs))
    }
}

#[async_trait]
impl ContentApi for StreamHiveApi {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_content(&self, token: &str, query: &ContentQuery) -> Result<ContentListing> {
        let url = format!("{}/api/content", self.base_url);

        let mut params: Vec<(&str, String)> = Vec::new();
        if let Some(categoria) = &query.categoria {
            params.push(("categoria", categoria.clone()));
        }
        if let Some(subcategoria) = &query.subcategoria {
            params.push(("subcategoria", subcategoria.clone()));
        }
        if let Some(page) = query.page {
            params.push(("page", page.to_string()));
        }

        debug!("Fetching content with {:?}", query);
        let response = self
            .client
            .get(&url)
            .query(&params)
            .bearer_auth(token)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!("Failed to fetch content: {} - {}", status, body));
        }

        let body: ContentResponse = response
            .json()
            .await
            .context("Failed to parse content response")?;
        Ok(body.data.unwrap_or_default())
    }
}

#[async_trait]
impl WatchHistoryApi for StreamHiveApi {
    async fn report_watched(&self, token: &str, content_id: &str) -> Result<()> {
        let url = format!("{}/api/watch", self.base_url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(token)
            .json(&WatchRequest {
                conteudo_id: content_id,
            })
            .send()
            .await?;

        if !response.status().is_success() {
            warn!("Failed to report watch event: {}", response.status());
            return Err(anyhow!(
                "Watch history rejected report: {}",
                response.status()
            ));
        }

        Ok(())
    }
}
