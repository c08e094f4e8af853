use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use td_core::{filter_articles, ArticleSummary, CatalogApi, Error, Result, Weight};
use tokio::sync::{watch, RwLock};
use tracing::{debug, error, info, warn};
use crate::debounce::Debouncer;
use crate::state::{DetailContent, DetailPanel, ViewState, NO_CONTENT};

pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// What became of a fetch once its response arrived
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The response was written into the state; carries the number of rows
    Applied(usize),
    /// A newer request, a reset or a close made the response irrelevant
    Superseded,
}

struct Shared {
    state: RwLock<ViewState>,
    revision: watch::Sender<u64>,
    article_seq: AtomicU64,
    detail_seq: AtomicU64,
}

impl Shared {
    fn notify(&self) {
        self.revision.send_modify(|rev| *rev += 1);
    }

    async fn update<R>(&self, f: impl FnOnce(&mut ViewState) -> R) -> R {
        let result = {
            let mut state = self.state.write().await;
            f(&mut *state)
        };
        self.notify();
        result
    }

    async fn refilter(&self) {
        self.update(|s| {
            s.filtered = filter_articles(&s.articles, &s.criteria.search_query);
            debug!("Search {:?} shows {} of {} articles", s.criteria.search_query, s.filtered.len(), s.articles.len());
        })
        .await;
    }

    fn next_article_seq(&self) -> u64 {
        self.article_seq.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn next_detail_seq(&self) -> u64 {
        self.detail_seq.fetch_add(1, Ordering::SeqCst) + 1
    }
}

/// State and behaviour of the catalog screen.
///
/// All mutation goes through a single lock and bumps a revision number that
/// renderers can watch. Article and detail fetches are sequenced: only the
/// most recently issued request of each kind may write its response.
pub struct CatalogView {
    api: Arc<dyn CatalogApi>,
    shared: Arc<Shared>,
    debouncer: Debouncer,
}

impl CatalogView {
    pub fn new(api: Arc<dyn CatalogApi>) -> Self {
        Self::with_debounce(api, SEARCH_DEBOUNCE)
    }

    /// The tag selector starts out loading; call `load_tags` right after construction.
    pub fn with_debounce(api: Arc<dyn CatalogApi>, delay: Duration) -> Self {
        let (revision, _) = watch::channel(0);
        let mut state = ViewState::default();
        state.loading.tags = true;
        Self {
            api,
            shared: Arc::new(Shared {
                state: RwLock::new(state),
                revision,
                article_seq: AtomicU64::new(0),
                detail_seq: AtomicU64::new(0),
            }),
            debouncer: Debouncer::new(delay),
        }
    }

    /// Receives a new revision number after every state change
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.shared.revision.subscribe()
    }

    pub async fn snapshot(&self) -> ViewState {
        self.shared.state.read().await.clone()
    }

    pub async fn load_tags(&self) -> Result<usize> {
        self.shared.update(|s| s.loading.tags = true).await;
        debug!("Requesting tags");

        match self.api.list_tags().await {
            Ok(tags) => {
                let count = tags.len();
                self.shared
                    .update(move |s| {
                        s.tags = tags;
                        s.tags_attempted = true;
                        s.loading.tags = false;
                        s.error = None;
                    })
                    .await;
                info!("Loaded {} tags", count);
                Ok(count)
            }
            Err(err) => {
                let message = format!("Failed to load tags: {}", err);
                error!("{}", message);
                self.shared
                    .update(move |s| {
                        s.tags_attempted = true;
                        s.loading.tags = false;
                        s.error = Some(message);
                    })
                    .await;
                Err(err)
            }
        }
    }

    pub async fn select_tag(&self, name: impl Into<String>) {
        let name = name.into();
        self.shared.update(move |s| s.criteria.selected_tag = name).await;
    }

    pub async fn set_min_score(&self, score: Weight) {
        self.shared.update(|s| s.criteria.set_min_score(score)).await;
    }

    pub async fn set_models(&self, models: Vec<String>) {
        self.shared.update(move |s| s.criteria.models = models).await;
    }

    pub async fn set_sources(&self, sources: Vec<String>) {
        self.shared.update(move |s| s.criteria.sources = sources).await;
    }

    /// Fetches articles for the current criteria, replacing the list.
    ///
    /// Without a selected tag this records a validation error and sends nothing.
    pub async fn apply_filters(&self) -> Result<FetchOutcome> {
        let query = self.shared.state.read().await.criteria.to_query();
        let query = match query {
            Ok(query) => query,
            Err(err) => {
                warn!("Not fetching articles: {}", err);
                let message = err.to_string();
                self.shared.update(move |s| s.error = Some(message)).await;
                return Err(err);
            }
        };

        let seq = self.shared.next_article_seq();
        self.shared
            .update(|s| {
                s.loading.articles = true;
                s.error = None;
            })
            .await;
        debug!("Article request #{} for tag {} (min score {})", seq, query.tag, query.min_score);

        let result = self.api.articles_by_tag(&query).await;

        let shared = &self.shared;
        let outcome = shared
            .update(move |s| {
                if shared.article_seq.load(Ordering::SeqCst) != seq {
                    return Ok(FetchOutcome::Superseded);
                }
                s.loading.articles = false;
                match result {
                    Ok(articles) => {
                        let count = articles.len();
                        s.filtered = filter_articles(&articles, &s.criteria.search_query);
                        s.articles = articles;
                        s.fetched_for = Some(query);
                        Ok(FetchOutcome::Applied(count))
                    }
                    Err(err) => {
                        s.articles.clear();
                        s.filtered.clear();
                        s.fetched_for = None;
                        s.error = Some(format!("Failed to load articles: {}", err));
                        Err(err)
                    }
                }
            })
            .await;

        match &outcome {
            Ok(FetchOutcome::Applied(count)) => info!("Loaded {} articles", count),
            Ok(FetchOutcome::Superseded) => debug!("Discarded response to superseded article request #{}", seq),
            Err(err) => error!("Failed to load articles: {}", err),
        }
        outcome
    }

    /// Stores the query and re-runs the local filter once typing pauses
    pub async fn set_search_query(&self, query: impl Into<String>) {
        let query = query.into();
        self.shared.update(move |s| s.criteria.search_query = query).await;

        let shared = self.shared.clone();
        self.debouncer.schedule(async move {
            shared.refilter().await;
        });
    }

    /// Runs the local filter immediately, dropping any pending debounced run
    pub async fn filter_now(&self) {
        self.debouncer.cancel();
        self.shared.refilter().await;
    }

    /// Opens the detail panel at once and fills in the article's tags when they arrive.
    ///
    /// A failed tag fetch leaves the tag list empty; the summary stays visible.
    pub async fn open_detail(&self, article: ArticleSummary) -> FetchOutcome {
        let seq = self.shared.next_detail_seq();
        let id = article.id.clone();
        let content = article
            .content
            .clone()
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| NO_CONTENT.to_string());

        self.shared
            .update(move |s| {
                s.detail = Some(DetailPanel::loading(article));
                s.loading.detail = true;
            })
            .await;

        let tags = match self.api.article_tags(&id).await {
            Ok(tags) => tags,
            Err(err) => {
                warn!("Failed to load tags for article {}: {}", id, err);
                Vec::new()
            }
        };

        let shared = &self.shared;
        let outcome = shared
            .update(move |s| {
                if shared.detail_seq.load(Ordering::SeqCst) != seq {
                    return FetchOutcome::Superseded;
                }
                s.loading.detail = false;
                let count = tags.len();
                if let Some(panel) = s.detail.as_mut() {
                    panel.tags = tags;
                    panel.content = DetailContent::Ready(content);
                }
                FetchOutcome::Applied(count)
            })
            .await;

        if outcome == FetchOutcome::Superseded {
            debug!("Discarded tags of article {}, panel moved on", id);
        }
        outcome
    }

    /// Opens the detail panel for the article at `index` of the displayed list.
    ///
    /// An out-of-range index is recorded as the screen error.
    pub async fn open_detail_at(&self, index: usize) -> Result<FetchOutcome> {
        let article = self.shared.state.read().await.filtered.get(index).cloned();
        match article {
            Some(article) => Ok(self.open_detail(article).await),
            None => {
                let err = Error::Validation(format!("No article at position {}", index + 1));
                warn!("Not opening article: {}", err);
                let message = err.to_string();
                self.shared.update(move |s| s.error = Some(message)).await;
                Err(err)
            }
        }
    }

    pub async fn close_detail(&self) {
        self.shared.next_detail_seq();
        self.shared
            .update(|s| {
                s.detail = None;
                s.loading.detail = false;
            })
            .await;
    }

    /// Clears criteria, fetched articles, detail panel and error.
    /// Responses still in flight are discarded when they land.
    pub async fn reset(&self) {
        self.debouncer.cancel();
        self.shared.next_article_seq();
        self.shared.next_detail_seq();
        self.shared.update(ViewState::reset).await;
        info!("Filters reset");
    }
}
