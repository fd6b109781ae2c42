//! Inventory snapshot cache with freshness window and retried fetches.

use std::path::PathBuf;
use std::time::Instant;

use crate::config::{InventoryConfig, RetryConfig};
use crate::{Equipment, InventoryError, import_inventory_file};

/// Anything that can produce the current inventory.
pub trait InventorySource {
    /// Fetch the full inventory.
    fn fetch(&mut self) -> Result<Vec<Equipment>, InventoryError>;
}

impl<F> InventorySource for F
where
    F: FnMut() -> Result<Vec<Equipment>, InventoryError>,
{
    fn fetch(&mut self) -> Result<Vec<Equipment>, InventoryError> {
        self()
    }
}

/// An [`InventorySource`] reading a JSON or CSV file through [`import_inventory_file`].
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// Create a source for the given file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl InventorySource for FileSource {
    fn fetch(&mut self) -> Result<Vec<Equipment>, InventoryError> {
        import_inventory_file(&self.path)
    }
}

struct Snapshot {
    records: Vec<Equipment>,
    fetched_at: Instant,
    invalidated: bool,
}

/// Serves an inventory snapshot, refetching once it is older than the
/// freshness window.
///
/// A failed refresh leaves the previous snapshot in place, so
/// [`InventoryCache::snapshot`] keeps returning the last good data.
pub struct InventoryCache<S> {
    source: S,
    config: InventoryConfig,
    snapshot: Option<Snapshot>,
}

impl<S: InventorySource> InventoryCache<S> {
    /// Create an empty cache over `source`.
    pub fn new(source: S, config: InventoryConfig) -> Self {
        Self {
            source,
            config,
            snapshot: None,
        }
    }

    /// Return the inventory, fetching it first when missing or stale.
    pub fn get(&mut self) -> Result<&[Equipment], InventoryError> {
        self.get_at(Instant::now())
    }

    /// Like [`InventoryCache::get`], evaluated at the given instant.
    pub fn get_at(&mut self, now: Instant) -> Result<&[Equipment], InventoryError> {
        if !self.is_fresh_at(now) {
            let records = retry_fetch(&self.config.retry, &mut self.source)?;
            self.snapshot = Some(Snapshot {
                records,
                fetched_at: now,
                invalidated: false,
            });
        }
        Ok(self.snapshot())
    }

    /// The last fetched records without triggering a fetch (empty if none yet).
    pub fn snapshot(&self) -> &[Equipment] {
        self.snapshot
            .as_ref()
            .map(|s| s.records.as_slice())
            .unwrap_or_default()
    }

    /// Whether a snapshot exists and is younger than the freshness window at `now`.
    pub fn is_fresh_at(&self, now: Instant) -> bool {
        self.snapshot.as_ref().is_some_and(|s| {
            !s.invalidated && now.saturating_duration_since(s.fetched_at) < self.config.freshness
        })
    }

    /// Mark the snapshot stale so the next `get` refetches (e.g. after an upload).
    ///
    /// The stale records stay readable through [`InventoryCache::snapshot`].
    pub fn invalidate(&mut self) {
        if let Some(s) = self.snapshot.as_mut() {
            s.invalidated = true;
        }
    }
}

/// Execute `source.fetch()`, retrying on retryable errors with exponential backoff.
///
/// Non-retryable errors are returned immediately. On exhausting all attempts
/// the last retryable error is wrapped in [`InventoryError::RetriesExhausted`].
pub fn retry_fetch<S: InventorySource + ?Sized>(
    config: &RetryConfig,
    source: &mut S,
) -> Result<Vec<Equipment>, InventoryError> {
    if config.max_attempts == 0 {
        return Err(InventoryError::InvalidConfig(
            "max_attempts must be >= 1".into(),
        ));
    }

    let mut last_error: Option<InventoryError> = None;

    for attempt in 0..config.max_attempts {
        match source.fetch() {
            Ok(records) => return Ok(records),
            Err(e) => {
                if !e.is_retryable() {
                    return Err(e);
                }
                last_error = Some(e);

                // Don't sleep after the last attempt.
                if attempt + 1 < config.max_attempts {
                    let delay = config.delay_for(attempt);
                    if !delay.is_zero() {
                        std::thread::sleep(delay);
                    }
                }
            }
        }
    }

    Err(InventoryError::RetriesExhausted {
        attempts: config.max_attempts,
        last_error: Box::new(last_error.unwrap_or_else(|| {
            unreachable!("at least one attempt was made (max_attempts >= 1)")
        })),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::time::Duration;

    fn fleet() -> Vec<Equipment> {
        vec![
            Equipment::new("Forklift A", "M-1234", "2023-01-15"),
            Equipment::new("Forklift B", "M-5678", "2022-05-20"),
        ]
    }

    fn unavailable() -> InventoryError {
        InventoryError::Unavailable("backend down".into())
    }

    fn fixed_source() -> impl FnMut() -> Result<Vec<Equipment>, InventoryError> {
        || Ok(fleet())
    }

    fn config() -> InventoryConfig {
        InventoryConfig::default().with_retry(RetryConfig::immediate(2))
    }

    #[test]
    fn first_get_fetches_and_caches() {
        let mut calls = 0;
        let source = || {
            calls += 1;
            Ok::<_, InventoryError>(fleet())
        };
        let mut cache = InventoryCache::new(source, config());
        let t0 = Instant::now();
        assert_eq!(cache.get_at(t0).unwrap().len(), 2);
        assert_eq!(cache.get_at(t0 + Duration::from_secs(60)).unwrap().len(), 2);
        drop(cache);
        assert_eq!(calls, 1);
    }

    #[test]
    fn stale_snapshot_is_refetched() {
        let mut calls = 0;
        let source = || {
            calls += 1;
            Ok::<_, InventoryError>(fleet())
        };
        let mut cache = InventoryCache::new(source, config());
        let t0 = Instant::now();
        cache.get_at(t0).unwrap();
        assert!(cache.is_fresh_at(t0 + Duration::from_secs(299)));
        assert!(!cache.is_fresh_at(t0 + Duration::from_secs(300)));
        cache.get_at(t0 + Duration::from_secs(300)).unwrap();
        drop(cache);
        assert_eq!(calls, 2);
    }

    #[test]
    fn custom_freshness_window() {
        let mut calls = 0;
        let source = || {
            calls += 1;
            Ok::<_, InventoryError>(fleet())
        };
        let cfg = config().with_freshness(Duration::from_secs(10));
        let mut cache = InventoryCache::new(source, cfg);
        let t0 = Instant::now();
        cache.get_at(t0).unwrap();
        cache.get_at(t0 + Duration::from_secs(9)).unwrap();
        assert!(!cache.is_fresh_at(t0 + Duration::from_secs(10)));
        cache.get_at(t0 + Duration::from_secs(10)).unwrap();
        drop(cache);
        assert_eq!(calls, 2);
    }

    #[test]
    fn invalidate_forces_refetch_but_keeps_records() {
        let mut cache = InventoryCache::new(fixed_source(), config());
        let t0 = Instant::now();
        cache.get_at(t0).unwrap();
        cache.invalidate();
        assert!(!cache.is_fresh_at(t0));
        assert_eq!(cache.snapshot().len(), 2);
    }

    #[test]
    fn snapshot_is_empty_before_first_fetch() {
        let cache = InventoryCache::new(fixed_source(), config());
        assert!(cache.snapshot().is_empty());
    }

    #[test]
    fn transient_failure_is_retried_once() {
        let mut attempts = 0;
        let mut source = || {
            attempts += 1;
            if attempts == 1 {
                Err(unavailable())
            } else {
                Ok(fleet())
            }
        };
        let records = retry_fetch(&RetryConfig::immediate(2), &mut source).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(attempts, 2);
    }

    #[test]
    fn retries_exhausted_wraps_last_error() {
        let mut attempts = 0;
        let mut source = || {
            attempts += 1;
            Err(InventoryError::Io {
                path: "inventory.json".into(),
                source: io::Error::new(io::ErrorKind::TimedOut, "slow"),
            })
        };
        let err = retry_fetch(&RetryConfig::immediate(2), &mut source).unwrap_err();
        assert!(matches!(
            err,
            InventoryError::RetriesExhausted { attempts: 2, .. }
        ));
        assert_eq!(attempts, 2);
    }

    #[test]
    fn permanent_failure_is_not_retried() {
        let mut attempts = 0;
        let mut source = || {
            attempts += 1;
            Err(InventoryError::NotAnArray)
        };
        let err = retry_fetch(&RetryConfig::immediate(3), &mut source).unwrap_err();
        assert!(matches!(err, InventoryError::NotAnArray));
        assert_eq!(attempts, 1);
    }

    #[test]
    fn zero_attempts_is_a_config_error() {
        let err = retry_fetch(&RetryConfig::immediate(0), &mut fixed_source()).unwrap_err();
        assert!(matches!(err, InventoryError::InvalidConfig(_)));
    }

    #[test]
    fn failed_refresh_keeps_previous_snapshot() {
        let mut fail = false;
        let source = move || {
            if fail {
                Err(unavailable())
            } else {
                fail = true;
                Ok(fleet())
            }
        };
        let mut cache = InventoryCache::new(source, config());
        let t0 = Instant::now();
        cache.get_at(t0).unwrap();
        assert!(cache.get_at(t0 + Duration::from_secs(600)).is_err());
        assert_eq!(cache.snapshot().len(), 2);
    }
}
