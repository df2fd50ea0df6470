// Content-addressed chart data cache with single-flight coordination
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use tokio::sync::{Semaphore, watch};

use crate::domain::chart::{EntryCache, ProcessedChartData};
use crate::domain::error::ChartError;
use crate::domain::record::{DataSeries, SeriesId};
use crate::infrastructure::settings::{DisplaySettings, PipelineSettings};

use crate::application::palette::TrendPalette;
use crate::application::pipeline;

/// Key of one cached computation: which data generation and which cosmetic
/// settings produced it. Two keys are equal iff both components are.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub series: SeriesId,
    pub settings: u64,
}

type ComputeResult = Result<Arc<ProcessedChartData>, ChartError>;

enum Slot {
    Ready(Arc<ProcessedChartData>),
    InFlight {
        generation: u64,
        rx: watch::Receiver<Option<ComputeResult>>,
    },
}

enum Action {
    Hit(Arc<ProcessedChartData>),
    Wait(watch::Receiver<Option<ComputeResult>>),
    Compute {
        generation: u64,
        tx: watch::Sender<Option<ComputeResult>>,
        rx: watch::Receiver<Option<ComputeResult>>,
    },
}

/// Cache in front of the whole segmentation pipeline.
///
/// Guarantees at most one computation per distinct (series identity, settings
/// fingerprint) key: the first caller for a missing key starts a detached
/// computation task, later callers wait on its completion signal, and a hit
/// returns the stored value without recomputation or allocation beyond the
/// lookup. Every started computation is stamped with a generation number that
/// is checked again at store time, so a slower computation that was
/// superseded (by invalidation or by a newer series) never overwrites the
/// newer state - its waiters still receive its result, it is just not kept.
///
/// The slot map is the only mutable shared state; all mutation goes through
/// one lock, and the lock is never held across an await point.
pub struct ChartDataCache {
    slots: Mutex<HashMap<CacheKey, Slot>>,
    entry_caches: Mutex<HashMap<SeriesId, Arc<EntryCache>>>,
    palette: Arc<dyn TrendPalette>,
    tolerance: f64,
    compute_permits: Arc<Semaphore>,
    generation: AtomicU64,
    pipeline_runs: AtomicU64,
}

impl ChartDataCache {
    pub fn new(palette: Arc<dyn TrendPalette>, settings: &PipelineSettings) -> Self {
        Self {
            slots: Mutex::new(HashMap::new()),
            entry_caches: Mutex::new(HashMap::new()),
            palette,
            tolerance: settings.equality_tolerance,
            compute_permits: Arc::new(Semaphore::new(settings.max_compute_workers.max(1))),
            generation: AtomicU64::new(0),
            pipeline_runs: AtomicU64::new(0),
        }
    }

    /// Return the processed chart data for `series` under `settings`,
    /// computing it at most once per distinct key.
    ///
    /// Precondition violations in the series are rejected here, before any
    /// worker is scheduled. A pipeline failure is propagated to every caller
    /// waiting on the same key and leaves the slot empty, so the next request
    /// retries.
    pub async fn get(
        self: &Arc<Self>,
        series: &DataSeries,
        settings: &DisplaySettings,
    ) -> ComputeResult {
        series.validate()?;

        let key = CacheKey {
            series: series.id(),
            settings: settings.fingerprint(),
        };

        let action = {
            let mut slots = self.slots.lock().unwrap_or_else(|e| e.into_inner());
            let found = match slots.get(&key) {
                Some(Slot::Ready(data)) => Some(Action::Hit(Arc::clone(data))),
                Some(Slot::InFlight { rx, .. }) => Some(Action::Wait(rx.clone())),
                None => None,
            };
            match found {
                Some(action) => action,
                None => {
                    let generation = self.generation.fetch_add(1, Ordering::Relaxed) + 1;
                    let (tx, rx) = watch::channel(None);
                    slots.insert(
                        key,
                        Slot::InFlight {
                            generation,
                            rx: rx.clone(),
                        },
                    );
                    Action::Compute { generation, tx, rx }
                }
            }
        };

        match action {
            Action::Hit(data) => {
                tracing::debug!(?key, "chart data cache hit");
                Ok(data)
            }
            Action::Wait(rx) => {
                tracing::debug!(?key, "joining in-flight computation");
                Self::await_result(rx).await
            }
            Action::Compute { generation, tx, rx } => {
                tracing::debug!(?key, generation, "chart data cache miss, computing");
                self.spawn_computation(key, generation, tx, series.clone(), settings.clone());
                Self::await_result(rx).await
            }
        }
    }

    /// Proactively drop everything cached for a replaced data generation.
    /// In-flight computations for it lose their slot, so their results are
    /// discarded at store time.
    pub fn invalidate(&self, series: SeriesId) {
        let removed = {
            let mut slots = self.slots.lock().unwrap_or_else(|e| e.into_inner());
            let before = slots.len();
            slots.retain(|key, _| key.series != series);
            before - slots.len()
        };
        let mut entry_caches = self.entry_caches.lock().unwrap_or_else(|e| e.into_inner());
        entry_caches.remove(&series);
        tracing::info!(?series, removed, "invalidated cached chart data");
    }

    /// Number of pipeline executions since construction. One successful `get`
    /// per distinct key increments this exactly once.
    pub fn pipeline_runs(&self) -> u64 {
        self.pipeline_runs.load(Ordering::Relaxed)
    }

    fn spawn_computation(
        self: &Arc<Self>,
        key: CacheKey,
        generation: u64,
        tx: watch::Sender<Option<ComputeResult>>,
        series: DataSeries,
        settings: DisplaySettings,
    ) {
        let cache = Arc::clone(self);
        tokio::spawn(async move {
            let result = cache.run_pipeline(&series, &settings).await;
            cache.store(key, generation, &result);
            // waiters on a superseded computation still receive its result;
            // it is only never stored
            let _ = tx.send(Some(result));
        });
    }

    async fn run_pipeline(&self, series: &DataSeries, settings: &DisplaySettings) -> ComputeResult {
        let _permit = Arc::clone(&self.compute_permits)
            .acquire_owned()
            .await
            .map_err(|e| ChartError::Computation(e.to_string()))?;

        self.pipeline_runs.fetch_add(1, Ordering::Relaxed);

        let entry_cache = self.entry_cache_for(series.id());
        let series = series.clone();
        let settings = settings.clone();
        let palette = Arc::clone(&self.palette);
        let tolerance = self.tolerance;

        let joined = tokio::task::spawn_blocking(move || {
            pipeline::process(&series, &settings, palette.as_ref(), tolerance, &entry_cache)
        })
        .await;

        match joined {
            Ok(data) => Ok(Arc::new(data)),
            // a panicking stage must not poison the cache; surface it as a
            // computation failure to every waiter
            Err(join_error) => Err(ChartError::Computation(join_error.to_string())),
        }
    }

    fn store(&self, key: CacheKey, generation: u64, result: &ComputeResult) {
        let mut stored = false;
        {
            let mut slots = self.slots.lock().unwrap_or_else(|e| e.into_inner());
            let still_current = matches!(
                slots.get(&key),
                Some(Slot::InFlight { generation: current, .. }) if *current == generation
            );
            if !still_current {
                tracing::debug!(?key, generation, "discarding superseded computation result");
                return;
            }
            match result {
                Ok(data) => {
                    slots.insert(key, Slot::Ready(Arc::clone(data)));
                    Self::evict_superseded(&mut slots, key.series);
                    stored = true;
                }
                Err(error) => {
                    // no poisoned slot: leave the key empty so the next
                    // request retries
                    slots.remove(&key);
                    tracing::warn!(?key, %error, "chart computation failed");
                }
            }
        }
        if stored {
            self.evict_superseded_entry_caches(key.series);
        }
    }

    /// Keep a single active data generation: storing a result for `current`
    /// drops every slot keyed to an older series identity.
    fn evict_superseded(slots: &mut HashMap<CacheKey, Slot>, current: SeriesId) {
        let before = slots.len();
        slots.retain(|key, _| key.series >= current);
        let evicted = before - slots.len();
        if evicted > 0 {
            tracing::info!(?current, evicted, "evicted superseded chart data generations");
        }
    }

    fn evict_superseded_entry_caches(&self, current: SeriesId) {
        let mut entry_caches = self.entry_caches.lock().unwrap_or_else(|e| e.into_inner());
        entry_caches.retain(|series, _| *series >= current);
    }

    fn entry_cache_for(&self, series: SeriesId) -> Arc<EntryCache> {
        let mut entry_caches = self.entry_caches.lock().unwrap_or_else(|e| e.into_inner());
        Arc::clone(
            entry_caches
                .entry(series)
                .or_insert_with(|| Arc::new(EntryCache::new(series))),
        )
    }

    async fn await_result(mut rx: watch::Receiver<Option<ComputeResult>>) -> ComputeResult {
        loop {
            if let Some(result) = rx.borrow_and_update().clone() {
                return result;
            }
            if rx.changed().await.is_err() {
                return Err(ChartError::Computation(
                    "computation task dropped before completing".to_string(),
                ));
            }
        }
    }
}
