use td_core::{unique_models, unique_sources, ArticleQuery, ArticleSummary, ArticleTag, FilterCriteria, Tag};

pub const LOADING_PLACEHOLDER: &str = "Loading content...";
pub const NO_CONTENT: &str = "No content";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadingFlags {
    pub tags: bool,
    pub articles: bool,
    pub detail: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DetailContent {
    Loading,
    Ready(String),
}

impl DetailContent {
    pub fn text(&self) -> &str {
        match self {
            DetailContent::Loading => LOADING_PLACEHOLDER,
            DetailContent::Ready(text) => text,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DetailPanel {
    pub article: ArticleSummary,
    pub tags: Vec<ArticleTag>,
    pub content: DetailContent,
}

impl DetailPanel {
    pub fn loading(article: ArticleSummary) -> Self {
        Self {
            article,
            tags: Vec::new(),
            content: DetailContent::Loading,
        }
    }
}

/// Everything the catalog screen shows
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    pub tags: Vec<Tag>,
    /// Set once a tag load has finished, successfully or not
    pub tags_attempted: bool,
    /// Last list returned by the backend
    pub articles: Vec<ArticleSummary>,
    /// `articles` narrowed by the search query
    pub filtered: Vec<ArticleSummary>,
    /// Query that produced `articles`
    pub fetched_for: Option<ArticleQuery>,
    pub criteria: FilterCriteria,
    pub loading: LoadingFlags,
    pub error: Option<String>,
    pub detail: Option<DetailPanel>,
}

impl ViewState {
    pub fn is_detail_open(&self) -> bool {
        self.detail.is_some()
    }

    pub fn unique_models(&self) -> Vec<String> {
        unique_models(&self.articles)
    }

    pub fn unique_sources(&self) -> Vec<String> {
        unique_sources(&self.articles)
    }

    pub fn can_apply(&self) -> bool {
        !self.loading.articles && self.criteria.has_tag()
    }

    /// Model and source pickers only make sense once something was fetched
    pub fn can_pick_models_and_sources(&self) -> bool {
        !self.articles.is_empty()
    }

    pub fn tag_selector_label(&self) -> &'static str {
        if self.loading.tags {
            "Loading..."
        } else if self.tags_attempted && self.tags.is_empty() {
            "failed to load"
        } else {
            "— select tag —"
        }
    }

    /// Text shown in place of the article list, if the list is not shown
    pub fn list_placeholder(&self) -> Option<String> {
        if self.loading.articles {
            return Some("Loading articles...".to_string());
        }
        if !self.filtered.is_empty() {
            return None;
        }
        let message = match &self.fetched_for {
            Some(query) if self.articles.is_empty() => format!("Nothing found for tag \"{}\"", query.tag),
            Some(_) => "No articles match the search".to_string(),
            None if self.criteria.has_tag() => "Press apply to load articles".to_string(),
            None => "Select a tag to filter".to_string(),
        };
        Some(message)
    }

    pub fn status_line(&self) -> String {
        let mut parts = Vec::new();
        if !self.tags.is_empty() {
            parts.push(format!("Tags: {}", self.tags.len()));
        }
        if !self.articles.is_empty() {
            parts.push(format!("Articles: {}", self.articles.len()));
        }
        parts.join(" • ")
    }

    /// Back to a fresh screen. The tag list survives since it is only fetched at startup.
    pub fn reset(&mut self) {
        self.criteria = FilterCriteria::default();
        self.articles.clear();
        self.filtered.clear();
        self.fetched_for = None;
        self.loading.articles = false;
        self.loading.detail = false;
        self.error = None;
        self.detail = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use td_core::{RecordId, SourceRef};

    fn article(id: i64, name: &str) -> ArticleSummary {
        ArticleSummary {
            id: RecordId::Int(id),
            name: name.to_string(),
            source: Some(SourceRef { name: "habr".to_string() }),
            web_path: None,
            content_type: None,
            tag_scores: vec![],
            content: None,
        }
    }

    #[test]
    fn test_list_placeholder_progression() {
        let mut state = ViewState::default();
        assert_eq!(state.list_placeholder().as_deref(), Some("Select a tag to filter"));

        state.criteria.selected_tag = "ai".to_string();
        assert_eq!(state.list_placeholder().as_deref(), Some("Press apply to load articles"));

        state.loading.articles = true;
        assert_eq!(state.list_placeholder().as_deref(), Some("Loading articles..."));
        state.loading.articles = false;

        state.fetched_for = Some(ArticleQuery::new("ai"));
        assert_eq!(state.list_placeholder().as_deref(), Some("Nothing found for tag \"ai\""));

        state.articles = vec![article(1, "one")];
        assert_eq!(state.list_placeholder().as_deref(), Some("No articles match the search"));

        state.filtered = state.articles.clone();
        assert_eq!(state.list_placeholder(), None);
    }

    #[test]
    fn test_tag_selector_label() {
        let mut state = ViewState::default();
        assert_eq!(state.tag_selector_label(), "— select tag —");
        state.loading.tags = true;
        assert_eq!(state.tag_selector_label(), "Loading...");
        state.loading.tags = false;
        state.tags_attempted = true;
        assert_eq!(state.tag_selector_label(), "failed to load");
    }

    #[test]
    fn test_status_line() {
        let mut state = ViewState::default();
        assert_eq!(state.status_line(), "");
        state.articles = vec![article(1, "one"), article(2, "two")];
        assert_eq!(state.status_line(), "Articles: 2");
    }

    #[test]
    fn test_can_apply_requires_tag_and_idle() {
        let mut state = ViewState::default();
        assert!(!state.can_apply());
        state.criteria.selected_tag = "ai".to_string();
        assert!(state.can_apply());
        state.loading.articles = true;
        assert!(!state.can_apply());
    }

    #[test]
    fn test_detail_content_text() {
        assert_eq!(DetailContent::Loading.text(), LOADING_PLACEHOLDER);
        assert_eq!(DetailContent::Ready("body".to_string()).text(), "body");
    }
}
