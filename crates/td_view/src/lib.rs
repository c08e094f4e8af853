pub mod debounce;
pub mod state;
pub mod view;

pub use debounce::Debouncer;
pub use state::{DetailContent, DetailPanel, LoadingFlags, ViewState};
pub use view::{CatalogView, FetchOutcome, SEARCH_DEBOUNCE};
