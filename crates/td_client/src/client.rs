use std::fmt;
use std::sync::Arc;
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use td_core::{ArticleQuery, ArticleSummary, ArticleTag, CatalogApi, Error, RecordId, Result, Tag};
use tracing::debug;
use crate::config::ApiConfig;

pub struct HttpCatalogClient {
    client: Arc<Client>,
    config: ApiConfig,
}

impl HttpCatalogClient {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            client: Arc::new(Client::new()),
            config,
        }
    }

    pub fn with_client(client: Client, config: ApiConfig) -> Self {
        Self {
            client: Arc::new(client),
            config,
        }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    async fn get_json<T, Q>(&self, path: &str, query: &Q) -> Result<T>
    where
        T: DeserializeOwned,
        Q: serde::Serialize + ?Sized,
    {
        let url = self.config.endpoint(path);
        let request = self.client.get(url).query(query).build()?;
        debug!("GET {}", request.url());

        let response = self.client.execute(request).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status { status: status.as_u16() });
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

impl fmt::Debug for HttpCatalogClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpCatalogClient")
            .field("client", &"<reqwest::Client>")
            .field("base_url", &self.config.base_url.as_str())
            .field("prefix", &self.config.prefix)
            .finish()
    }
}

#[async_trait]
impl CatalogApi for HttpCatalogClient {
    async fn list_tags(&self) -> Result<Vec<Tag>> {
        let tags: Vec<Tag> = self.get_json("/tags", &[] as &[(&str, &str)]).await?;
        debug!("Received {} tags", tags.len());
        Ok(tags)
    }

    async fn articles_by_tag(&self, query: &ArticleQuery) -> Result<Vec<ArticleSummary>> {
        let articles: Vec<ArticleSummary> = self.get_json("/getArticlesByTag", &query.to_query_pairs()).await?;
        debug!("Received {} articles for tag {}", articles.len(), query.tag);
        Ok(articles)
    }

    async fn article_tags(&self, id: &RecordId) -> Result<Vec<ArticleTag>> {
        self.get_json("/getArticleTags", &[("id", id.to_string())]).await
    }
}
