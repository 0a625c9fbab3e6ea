//! Archive client: fetches the entry list for the current filter selection.
//!
//! Each call to [`ArchiveClient::load`] supersedes the previous one. The
//! in-flight request is cancelled through its token and a generation counter
//! guarantees that a late response can never overwrite newer state.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::error::{ApodError, ApodResult};
use crate::models::{ArchiveEntry, Clock, DateRange, SystemClock};
use crate::upstream::ArchiveSource;

/// Default minimum time the loading state stays visible.
pub const DEFAULT_MIN_DISPLAY: Duration = Duration::from_millis(600);

#[derive(Debug, Clone, Copy)]
pub struct ArchiveClientOptions {
    /// Minimum duration of the loading state, to avoid flicker on fast responses.
    pub min_display: Duration,
}

impl Default for ArchiveClientOptions {
    fn default() -> Self {
        Self {
            min_display: DEFAULT_MIN_DISPLAY,
        }
    }
}

/// What happened to a load request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The entry list was replaced with `count` entries.
    Replaced { count: usize },
    /// A newer load started before this one finished; its result was dropped.
    Superseded,
}

/// Snapshot of the client state, as seen by renderers.
#[derive(Debug, Clone)]
pub struct ArchiveState {
    /// Current batch, oldest first.
    pub entries: Arc<[ArchiveEntry]>,
    /// True while a load is in flight (including the minimum display time).
    pub loading: bool,
    /// Range the current entries were fetched for.
    pub range: Option<DateRange>,
    /// Message of the most recent failed load, cleared by the next success.
    pub last_error: Option<String>,
}

impl Default for ArchiveState {
    fn default() -> Self {
        Self {
            entries: Arc::from(Vec::new()),
            loading: false,
            range: None,
            last_error: None,
        }
    }
}

pub struct ArchiveClient {
    source: Arc<dyn ArchiveSource>,
    clock: Arc<dyn Clock>,
    options: ArchiveClientOptions,
    state: watch::Sender<ArchiveState>,
    generation: AtomicU64,
    inflight: Mutex<CancellationToken>,
}

impl ArchiveClient {
    pub fn new(
        source: Arc<dyn ArchiveSource>,
        clock: Arc<dyn Clock>,
        options: ArchiveClientOptions,
    ) -> Self {
        let (state, _) = watch::channel(ArchiveState::default());
        Self {
            source,
            clock,
            options,
            state,
            generation: AtomicU64::new(0),
            inflight: Mutex::new(CancellationToken::new()),
        }
    }

    /// Client using the system clock and default options.
    pub fn with_source(source: Arc<dyn ArchiveSource>) -> Self {
        Self::new(source, Arc::new(SystemClock), ArchiveClientOptions::default())
    }

    /// Current state snapshot.
    pub fn state(&self) -> ArchiveState {
        self.state.borrow().clone()
    }

    pub fn entries(&self) -> Arc<[ArchiveEntry]> {
        self.state.borrow().entries.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().loading
    }

    /// Receive every state change.
    pub fn subscribe(&self) -> watch::Receiver<ArchiveState> {
        self.state.subscribe()
    }

    /// Fetch the batch for a filter selection and replace the entry list.
    ///
    /// `start` of `None` loads the current year to date. On failure the
    /// previous entries are kept, the error is logged and returned; there is
    /// no retry.
    pub async fn load(&self, start: Option<NaiveDate>) -> ApodResult<LoadOutcome> {
        let range = DateRange::for_filter(start, self.clock.today())?;

        let token = CancellationToken::new();
        let generation = {
            let mut inflight = self.inflight.lock();
            inflight.cancel();
            *inflight = token.clone();
            self.generation.fetch_add(1, Ordering::SeqCst) + 1
        };
        let started = Instant::now();
        self.state.send_modify(|s| s.loading = true);
        debug!(%range, generation, "Loading archive range");

        let result = tokio::select! {
            _ = token.cancelled() => Err(ApodError::Cancelled),
            fetched = self.source.fetch_range(range) => fetched,
        };

        let elapsed = started.elapsed();
        if elapsed < self.options.min_display {
            tokio::select! {
                _ = token.cancelled() => {}
                _ = tokio::time::sleep(self.options.min_display - elapsed) => {}
            }
        }

        // Checked under the lock so a concurrent load cannot interleave.
        let _inflight = self.inflight.lock();
        if token.is_cancelled() || self.generation.load(Ordering::SeqCst) != generation {
            debug!(%range, generation, "Discarding superseded archive load");
            return Ok(LoadOutcome::Superseded);
        }

        match result {
            Ok(entries) => {
                let count = entries.len();
                self.state.send_modify(|s| {
                    s.entries = Arc::from(entries);
                    s.loading = false;
                    s.range = Some(range);
                    s.last_error = None;
                });
                debug!(%range, count, "Archive range loaded");
                Ok(LoadOutcome::Replaced { count })
            }
            Err(err) => {
                warn!(%range, error = %err, "Archive fetch failed, keeping previous entries");
                self.state.send_modify(|s| {
                    s.loading = false;
                    s.last_error = Some(err.to_string());
                });
                Err(err)
            }
        }
    }

    /// Cancel the in-flight load, if any, and clear the loading flag.
    pub fn cancel(&self) {
        let inflight = self.inflight.lock();
        inflight.cancel();
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.state.send_if_modified(|s| std::mem::replace(&mut s.loading, false));
    }
}

impl Drop for ArchiveClient {
    fn drop(&mut self) {
        self.inflight.lock().cancel();
    }
}
