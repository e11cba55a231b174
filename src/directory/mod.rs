//! Client-side state for browsing the advocate directory.
//!
//! [`DirectoryController`] owns the loaded advocates, the page size they were
//! requested with and the current search query. Each page-size change starts a
//! new fetch generation; a response is only applied when its generation is
//! still the latest and the controller has not been disposed.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::domain::advocate::Advocate;
use crate::domain::types::{PageSize, TypeConstraintError};

pub mod filter;
pub mod source;

use filter::{filter_normalized, normalize_query};
use source::{AdvocateSource, FetchResult};

/// Fetch lifecycle of the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchPhase {
    /// Nothing loaded and nothing in flight.
    Idle,
    /// A request for the current page size is in flight.
    Loading,
    /// The dataset holds the response for the current page size.
    Ready,
}

/// What happened to a retrieval once it resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The dataset was replaced with the response.
    Applied,
    /// A newer page size was requested meanwhile; the response was dropped.
    Stale,
    /// The retrieval failed; the dataset was left untouched.
    Failed,
    /// The controller was disposed before the response arrived.
    Disposed,
    /// The page size did not change, so nothing was fetched.
    Unchanged,
}

/// Identifies one issued retrieval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
    page_size: PageSize,
}

impl FetchTicket {
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    pub const fn page_size(&self) -> PageSize {
        self.page_size
    }
}

#[derive(Debug, Clone, Copy)]
pub struct DirectoryOptions {
    /// Page size requested on [`DirectoryController::activate`].
    pub initial_page_size: PageSize,
    /// Upper bound applied to every requested page size.
    pub max_page_size: PageSize,
}

impl Default for DirectoryOptions {
    fn default() -> Self {
        Self {
            initial_page_size: PageSize::DEFAULT,
            max_page_size: PageSize::MAX,
        }
    }
}

/// Read-only snapshot handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryView {
    pub is_loading: bool,
    pub results: Arc<Vec<Advocate>>,
    pub result_count: usize,
    /// Raw query as typed.
    pub query: String,
    pub page_size: Option<PageSize>,
}

impl DirectoryView {
    /// The result counter is hidden only for an empty list with no query.
    pub fn show_result_count(&self) -> bool {
        self.result_count > 0 || !self.query.is_empty()
    }
}

#[derive(Debug)]
struct FilterCache {
    revision: u64,
    needle: String,
    results: Arc<Vec<Advocate>>,
}

#[derive(Debug)]
struct DirectoryState {
    phase: FetchPhase,
    generation: u64,
    disposed: bool,
    page_size: Option<PageSize>,
    dataset: Arc<Vec<Advocate>>,
    /// Bumped on every dataset replacement.
    revision: u64,
    query: String,
    cache: Option<FilterCache>,
}

impl DirectoryState {
    fn new() -> Self {
        Self {
            phase: FetchPhase::Idle,
            generation: 0,
            disposed: false,
            page_size: None,
            dataset: Arc::new(Vec::new()),
            revision: 0,
            query: String::new(),
            cache: None,
        }
    }

    fn filtered(&mut self) -> Arc<Vec<Advocate>> {
        let needle = normalize_query(&self.query);

        if let Some(cache) = &self.cache {
            if cache.revision == self.revision && cache.needle == needle {
                return Arc::clone(&cache.results);
            }
        }

        let results = if needle.is_empty() {
            Arc::clone(&self.dataset)
        } else {
            Arc::new(filter_normalized(&self.dataset, &needle))
        };

        // A disposed controller serves views but keeps its state frozen.
        if !self.disposed {
            self.cache = Some(FilterCache {
                revision: self.revision,
                needle,
                results: Arc::clone(&results),
            });
        }

        results
    }
}

struct Shared<S> {
    source: S,
    options: DirectoryOptions,
    state: Mutex<DirectoryState>,
}

/// Keeps a local dataset in step with the most recently requested page size.
///
/// Cloning yields another handle to the same controller.
pub struct DirectoryController<S> {
    shared: Arc<Shared<S>>,
}

impl<S> Clone for DirectoryController<S> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<S: AdvocateSource> DirectoryController<S> {
    pub fn new(source: S) -> Self {
        Self::with_options(source, DirectoryOptions::default())
    }

    pub fn with_options(source: S, options: DirectoryOptions) -> Self {
        Self {
            shared: Arc::new(Shared {
                source,
                options,
                state: Mutex::new(DirectoryState::new()),
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, DirectoryState> {
        self.shared
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Performs the first fetch with the configured initial page size.
    pub async fn activate(&self) -> FetchOutcome {
        let options = self.shared.options;
        let page_size = options.initial_page_size.min(options.max_page_size);
        self.load(page_size).await
    }

    /// Selects one of [`PageSize::OPTIONS`], clamped to the configured
    /// maximum, and fetches the matching page.
    pub async fn set_page_size(&self, requested: u32) -> Result<FetchOutcome, TypeConstraintError> {
        let page_size = PageSize::from_option(requested, self.shared.options.max_page_size)?;
        Ok(self.load(page_size).await)
    }

    async fn load(&self, page_size: PageSize) -> FetchOutcome {
        let Some(ticket) = self.begin_fetch(page_size) else {
            return if self.is_disposed() {
                FetchOutcome::Disposed
            } else {
                FetchOutcome::Unchanged
            };
        };

        // The lock is not held across the await.
        let result = self.shared.source.fetch_advocates(ticket.page_size).await;

        self.complete_fetch(ticket, result)
    }

    /// Starts a new generation for `page_size`.
    ///
    /// Returns `None` when the page size is unchanged or the controller is
    /// disposed.
    pub fn begin_fetch(&self, page_size: PageSize) -> Option<FetchTicket> {
        let mut state = self.state();

        if state.disposed || state.page_size == Some(page_size) {
            return None;
        }

        state.generation += 1;
        state.page_size = Some(page_size);
        state.phase = FetchPhase::Loading;

        log::debug!(
            "Fetching {page_size} advocates (generation {})",
            state.generation
        );

        Some(FetchTicket {
            generation: state.generation,
            page_size,
        })
    }

    /// Applies the result of the retrieval identified by `ticket` if it is
    /// still the latest one.
    pub fn complete_fetch(
        &self,
        ticket: FetchTicket,
        result: FetchResult<Vec<Advocate>>,
    ) -> FetchOutcome {
        let mut state = self.state();

        if state.disposed {
            log::debug!(
                "Ignoring response for generation {} after disposal",
                ticket.generation
            );
            return FetchOutcome::Disposed;
        }

        if ticket.generation != state.generation {
            log::debug!(
                "Discarding response for page size {} (generation {}, current {})",
                ticket.page_size,
                ticket.generation,
                state.generation
            );
            return FetchOutcome::Stale;
        }

        match result {
            Ok(advocates) => {
                state.dataset = Arc::new(advocates);
                state.revision += 1;
                state.cache = None;
                state.phase = FetchPhase::Ready;
                FetchOutcome::Applied
            }
            Err(err) => {
                log::error!("Failed to fetch {} advocates: {err}", ticket.page_size);
                state.phase = if state.revision == 0 {
                    FetchPhase::Idle
                } else {
                    FetchPhase::Ready
                };
                FetchOutcome::Failed
            }
        }
    }

    /// Replaces the search query. Ignored after disposal.
    pub fn set_search_query(&self, text: impl Into<String>) {
        let mut state = self.state();
        if state.disposed {
            return;
        }
        state.query = text.into();
    }

    /// Clears the search query.
    pub fn reset(&self) {
        self.set_search_query(String::new());
    }

    /// Current results for rendering.
    pub fn view(&self) -> DirectoryView {
        let mut state = self.state();
        let results = state.filtered();
        DirectoryView {
            is_loading: state.phase == FetchPhase::Loading,
            result_count: results.len(),
            results,
            query: state.query.clone(),
            page_size: state.page_size,
        }
    }

    /// The last accepted dataset, unfiltered.
    pub fn dataset(&self) -> Arc<Vec<Advocate>> {
        Arc::clone(&self.state().dataset)
    }

    pub fn phase(&self) -> FetchPhase {
        self.state().phase
    }

    pub fn page_size(&self) -> Option<PageSize> {
        self.state().page_size
    }

    pub fn generation(&self) -> u64 {
        self.state().generation
    }

    pub fn query(&self) -> String {
        self.state().query.clone()
    }

    /// Tears the controller down; pending and future responses become no-ops.
    pub fn dispose(&self) {
        self.state().disposed = true;
    }

    pub fn is_disposed(&self) -> bool {
        self.state().disposed
    }
}
