use reqwest::Client;
use td_core::Result;
use url::Url;

pub const DEFAULT_PREFIX: &str = "/api";

pub struct ProxyState {
    pub client: Client,
    pub target: Url,
    pub prefix: String,
}

impl ProxyState {
    pub fn new(target: &str) -> Result<Self> {
        Ok(Self {
            client: Client::new(),
            target: Url::parse(target)?,
            prefix: DEFAULT_PREFIX.to_string(),
        })
    }

    /// Backend URL for an incoming path-and-query, or `None` when it lacks the prefix
    pub fn forward_url(&self, path_and_query: &str) -> Option<String> {
        let rewritten = rewrite_path(path_and_query, &self.prefix)?;
        Some(format!("{}{}", self.target.as_str().trim_end_matches('/'), rewritten))
    }
}

/// Strips a leading `prefix` from `path`, keeping any query string.
/// `/apix` does not match the `/api` prefix.
pub fn rewrite_path(path: &str, prefix: &str) -> Option<String> {
    let rest = path.strip_prefix(prefix)?;
    if rest.is_empty() {
        return Some("/".to_string());
    }
    if rest.starts_with('?') {
        return Some(format!("/{}", rest));
    }
    rest.starts_with('/').then(|| rest.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rewrite_path() {
        assert_eq!(rewrite_path("/api/tags", "/api").as_deref(), Some("/tags"));
        assert_eq!(
            rewrite_path("/api/getArticlesByTag?tag=ai&minScore=50", "/api").as_deref(),
            Some("/getArticlesByTag?tag=ai&minScore=50")
        );
        assert_eq!(rewrite_path("/api", "/api").as_deref(), Some("/"));
        assert_eq!(rewrite_path("/api?x=1", "/api").as_deref(), Some("/?x=1"));
        assert_eq!(rewrite_path("/apix/tags", "/api"), None);
        assert_eq!(rewrite_path("/tags", "/api"), None);
    }

    #[test]
    fn test_forward_url_joins_target() {
        let state = ProxyState::new("http://backend:8080/").unwrap();
        assert_eq!(
            state.forward_url("/api/getArticleTags?id=3").as_deref(),
            Some("http://backend:8080/getArticleTags?id=3")
        );
        assert_eq!(state.forward_url("/elsewhere"), None);
    }
}
