pub mod client;
pub mod config;

pub use client::HttpCatalogClient;
pub use config::ApiConfig;

pub mod prelude {
    pub use crate::{ApiConfig, HttpCatalogClient};
    pub use td_core::{CatalogApi, Error, Result};
}
