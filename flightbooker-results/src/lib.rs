pub mod models;
pub mod pipeline;
pub mod pagination;
pub mod view;

pub use models::{FilterState, ResultsOutcome, ResultsPage, SearchPrefill, SortKey, StopBucket};
pub use pipeline::run_pipeline;
pub use pagination::{page_links, PageLink};
pub use view::ResultsView;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FilterError {
    #[error("Unknown stop bucket: {0}")]
    UnknownStopBucket(String),

    #[error("Unknown sort key: {0}")]
    UnknownSortKey(String),
}
