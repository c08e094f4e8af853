use std::collections::HashSet;
use crate::error::{Error, Result};
use crate::types::{ArticleSummary, TagScore, Weight};

pub const DEFAULT_MIN_SCORE: Weight = 50;
pub const MAX_SCORE: Weight = 100;
pub const TAG_PREVIEW_LIMIT: usize = 3;
pub const MISSING_TAG_MESSAGE: &str = "Select a tag to filter";

/// Server-side query for `/getArticlesByTag`
#[derive(Debug, Clone, PartialEq)]
pub struct ArticleQuery {
    pub tag: String,
    pub min_score: Weight,
    pub models: Vec<String>,
    pub sources: Vec<String>,
}

impl ArticleQuery {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            min_score: DEFAULT_MIN_SCORE,
            models: Vec::new(),
            sources: Vec::new(),
        }
    }

    /// Query pairs in wire order; `model` and `source` repeat once per value
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("tag", self.tag.clone()),
            ("minScore", self.min_score.to_string()),
        ];
        pairs.extend(self.models.iter().map(|m| ("model", m.clone())));
        pairs.extend(self.sources.iter().map(|s| ("source", s.clone())));
        pairs
    }
}

/// User-controlled filter state
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCriteria {
    pub selected_tag: String,
    pub min_score: Weight,
    pub models: Vec<String>,
    pub sources: Vec<String>,
    pub search_query: String,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            selected_tag: String::new(),
            min_score: DEFAULT_MIN_SCORE,
            models: Vec::new(),
            sources: Vec::new(),
            search_query: String::new(),
        }
    }
}

impl FilterCriteria {
    pub fn has_tag(&self) -> bool {
        !self.selected_tag.trim().is_empty()
    }

    pub fn set_min_score(&mut self, score: Weight) {
        self.min_score = score.min(MAX_SCORE);
    }

    pub fn to_query(&self) -> Result<ArticleQuery> {
        if !self.has_tag() {
            return Err(Error::Validation(MISSING_TAG_MESSAGE.to_string()));
        }
        Ok(ArticleQuery {
            tag: self.selected_tag.trim().to_string(),
            min_score: self.min_score,
            models: self.models.clone(),
            sources: self.sources.clone(),
        })
    }
}

fn search_text(article: &ArticleSummary) -> String {
    format!("{} {}", article.name, article.source_name().unwrap_or_default()).to_lowercase()
}

pub fn matches_query(article: &ArticleSummary, query: &str) -> bool {
    if query.trim().is_empty() {
        return true;
    }
    search_text(article).contains(&query.to_lowercase())
}

/// Local text filter over the fetched list. A blank query keeps everything.
pub fn filter_articles(articles: &[ArticleSummary], query: &str) -> Vec<ArticleSummary> {
    articles
        .iter()
        .filter(|a| matches_query(a, query))
        .cloned()
        .collect()
}

/// Distinct model names across all tag scores, in first-seen order
pub fn unique_models(articles: &[ArticleSummary]) -> Vec<String> {
    let mut seen = HashSet::new();
    articles
        .iter()
        .flat_map(|a| a.tag_scores.iter())
        .filter_map(|s| s.model.as_ref().map(|m| m.name.as_str()))
        .filter(|name| !name.is_empty() && seen.insert(*name))
        .map(str::to_string)
        .collect()
}

/// Distinct source names, in first-seen order
pub fn unique_sources(articles: &[ArticleSummary]) -> Vec<String> {
    let mut seen = HashSet::new();
    articles
        .iter()
        .filter_map(|a| a.source_name())
        .filter(|name| !name.is_empty() && seen.insert(*name))
        .map(str::to_string)
        .collect()
}

pub fn max_score_for_tag(article: &ArticleSummary, tag_name: &str) -> Weight {
    article
        .tag_scores
        .iter()
        .filter(|s| s.tag.name == tag_name)
        .map(|s| s.weight)
        .max()
        .unwrap_or(0)
}

/// First few positive scores of an article and how many positive ones were left out
pub fn tag_score_preview(article: &ArticleSummary, limit: usize) -> (Vec<&TagScore>, usize) {
    let positive: Vec<&TagScore> = article.tag_scores.iter().filter(|s| s.weight > 0).collect();
    let hidden = positive.len().saturating_sub(limit);
    (positive.into_iter().take(limit).collect(), hidden)
}
