use crate::error::{CheckError, CheckResult};
use std::collections::HashMap;
use std::sync::Mutex;

/// Resolver for bases of another record. Implemented outside the engine
/// (database, flat-file cache, network); this is the engine's only
/// suspension point. A timeout or lookup failure is reported as
/// `UnresolvedRemote`, never a panic. Implementations must be shareable
/// across worker threads: independent features translate in parallel.
pub trait RemoteFetcher: Sync {
    fn fetch(&self, accession: &str, version: Option<u32>) -> CheckResult<Vec<u8>>;
}

/// The owning record's bases plus an optional remote resolver.
#[derive(Clone, Copy)]
pub struct SequenceStore<'a> {
    accession: &'a str,
    bases: &'a [u8],
    fetcher: Option<&'a dyn RemoteFetcher>,
}

impl<'a> SequenceStore<'a> {
    pub fn new(accession: &'a str, bases: &'a [u8]) -> Self {
        Self {
            accession,
            bases,
            fetcher: None,
        }
    }

    pub fn with_fetcher(mut self, fetcher: &'a dyn RemoteFetcher) -> Self {
        self.fetcher = Some(fetcher);
        self
    }

    pub fn accession(&self) -> &str {
        self.accession
    }

    pub fn bases(&self) -> &[u8] {
        self.bases
    }

    pub fn len(&self) -> u64 {
        self.bases.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.bases.is_empty()
    }

    pub fn resolve_remote(&self, accession: &str, version: Option<u32>) -> CheckResult<Vec<u8>> {
        match self.fetcher {
            Some(fetcher) => fetcher.fetch(accession, version),
            None => Err(CheckError::UnresolvedRemote {
                accession: accession.into(),
                version,
                reason: "no remote resolver configured".into(),
            }),
        }
    }
}

/// Memoizes successful lookups per accession+version for one validation
/// run. Failures are not cached, so a transient error can be retried.
pub struct CachingFetcher<F> {
    inner: F,
    cache: Mutex<HashMap<(Box<str>, Option<u32>), Vec<u8>>>,
}

impl<F: RemoteFetcher> CachingFetcher<F> {
    pub fn new(inner: F) -> Self {
        Self {
            inner,
            cache: Mutex::new(HashMap::new()),
        }
    }
}

impl<F: RemoteFetcher> RemoteFetcher for CachingFetcher<F> {
    fn fetch(&self, accession: &str, version: Option<u32>) -> CheckResult<Vec<u8>> {
        let key = (Box::from(accession), version);
        {
            let cache = self.cache.lock().expect("fetch cache poisoned");
            if let Some(hit) = cache.get(&key) {
                return Ok(hit.clone());
            }
        }
        let bases = self.inner.fetch(accession, version)?;
        self.cache
            .lock()
            .expect("fetch cache poisoned")
            .insert(key, bases.clone());
        Ok(bases)
    }
}
