use async_trait::async_trait;
use crate::filter::ArticleQuery;
use crate::types::{ArticleSummary, ArticleTag, RecordId, Tag};
use crate::Result;

/// Read-only catalog backend
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// `GET /tags`
    async fn list_tags(&self) -> Result<Vec<Tag>>;

    /// `GET /getArticlesByTag`
    async fn articles_by_tag(&self, query: &ArticleQuery) -> Result<Vec<ArticleSummary>>;

    /// `GET /getArticleTags?id=`
    async fn article_tags(&self, id: &RecordId) -> Result<Vec<ArticleTag>>;
}
