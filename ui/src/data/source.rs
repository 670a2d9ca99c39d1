//! Data source adapter: fetches datasets over HTTP and memoizes them by URL.

use std::cell::RefCell;
use std::rc::Rc;

use super::cache::{EvictionPolicy, ResponseCache};
use super::error::FetchError;
use super::model::{Dataset, LoadedDataset};

/// Transport seam. The UI uses [`HttpFetcher`]; tests swap in fakes.
#[allow(async_fn_in_trait)]
pub trait Fetch {
    async fn get_text(&self, url: &str) -> Result<String, FetchError>;
}

#[derive(Debug, Clone, Default)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Fetch for HttpFetcher {
    async fn get_text(&self, url: &str) -> Result<String, FetchError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }
        Ok(response.text().await?)
    }
}

/// Parses a response body and rejects negative or non-finite leaves.
pub fn decode_dataset(body: &str) -> Result<Dataset, FetchError> {
    let dataset: Dataset = serde_json::from_str(body)?;
    if let Some((field, value)) = dataset.first_invalid_leaf() {
        return Err(FetchError::Invalid { field, value });
    }
    Ok(dataset)
}

/// Owns the session's response cache. Clones share the same cache.
///
/// The cache is only touched between awaits, so the `RefCell` borrow is never
/// held while a request is in flight.
pub struct DataSource<F = HttpFetcher> {
    fetcher: Rc<F>,
    cache: Rc<RefCell<ResponseCache>>,
}

impl<F> Clone for DataSource<F> {
    fn clone(&self) -> Self {
        Self {
            fetcher: self.fetcher.clone(),
            cache: self.cache.clone(),
        }
    }
}

impl<F: Fetch> DataSource<F> {
    pub fn new(fetcher: F) -> Self {
        Self::with_cache(fetcher, ResponseCache::new())
    }

    pub fn with_policy(fetcher: F, policy: impl EvictionPolicy + 'static) -> Self {
        Self::with_cache(fetcher, ResponseCache::with_policy(policy))
    }

    fn with_cache(fetcher: F, cache: ResponseCache) -> Self {
        Self {
            fetcher: Rc::new(fetcher),
            cache: Rc::new(RefCell::new(cache)),
        }
    }

    /// Cache lookup without touching the network.
    pub fn cached(&self, url: &str) -> Option<Rc<LoadedDataset>> {
        self.cache.borrow().get(url)
    }

    pub async fn load(&self, url: &str) -> Result<Rc<LoadedDataset>, FetchError> {
        if let Some(hit) = self.cached(url) {
            tracing::debug!(url, "dataset served from cache");
            return Ok(hit);
        }

        tracing::info!(url, "fetching dataset");
        let body = self.fetcher.get_text(url).await?;
        let dataset = decode_dataset(&body)?;
        let entry = Rc::new(LoadedDataset::new(dataset));
        Ok(self.cache.borrow_mut().insert(url, entry))
    }

    pub fn cached_len(&self) -> usize {
        self.cache.borrow().len()
    }
}
