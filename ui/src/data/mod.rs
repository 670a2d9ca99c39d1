//! Dataset model plus the fetching/caching adapter that produces it.

pub mod cache;
pub mod error;
pub mod model;
pub mod source;

pub use cache::{EvictionPolicy, MaxEntries, NeverEvict, ResponseCache};
pub use error::FetchError;
pub use model::{
    Component, Dataset, EnvironmentBreakdown, GroupKind, GroupValue, LoadedDataset,
    TransformedDataset,
};
pub use source::{DataSource, Fetch, HttpFetcher};
