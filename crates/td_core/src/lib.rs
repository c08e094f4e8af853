pub mod api;
pub mod error;
pub mod filter;
pub mod score;
pub mod types;

pub use api::CatalogApi;
pub use error::{Error, Result};
pub use filter::{
    filter_articles, max_score_for_tag, tag_score_preview, unique_models, unique_sources, ArticleQuery,
    FilterCriteria, DEFAULT_MIN_SCORE,
};
pub use score::ScoreBand;
pub use types::{ArticleSummary, ArticleTag, ModelRef, RecordId, SourceRef, Tag, TagRef, TagScore, Weight};
