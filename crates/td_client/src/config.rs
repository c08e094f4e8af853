use std::env;
use td_core::Result;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "http://localhost:80";
pub const BASE_URL_ENV: &str = "API_BASE_URL";
/// Prefix the development proxy strips before forwarding
pub const DEV_PREFIX: &str = "/api";

/// Where catalog requests go
#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    pub base_url: Url,
    pub prefix: Option<String>,
}

impl ApiConfig {
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self {
            base_url: Url::parse(base_url)?,
            prefix: None,
        })
    }

    /// Reads `API_BASE_URL`, falling back to `http://localhost:80`
    pub fn from_env() -> Result<Self> {
        let base = env::var(BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::new(&base)
    }

    /// Route every request through the development proxy listening on `port`
    pub fn development(port: u16) -> Result<Self> {
        Ok(Self::new(&format!("http://localhost:{}", port))?.with_prefix(DEV_PREFIX))
    }

    pub fn with_prefix(mut self, prefix: &str) -> Self {
        let prefix = prefix.trim_end_matches('/');
        self.prefix = if prefix.is_empty() {
            None
        } else if prefix.starts_with('/') {
            Some(prefix.to_string())
        } else {
            Some(format!("/{}", prefix))
        };
        self
    }

    /// Absolute URL of an endpoint such as `/tags`
    pub fn endpoint(&self, path: &str) -> Url {
        let base_path = self.base_url.path().trim_end_matches('/');
        let prefix = self.prefix.as_deref().unwrap_or_default();
        let mut url = self.base_url.clone();
        url.set_path(&format!("{}{}{}", base_path, prefix, path));
        url.set_query(None);
        url
    }
}
