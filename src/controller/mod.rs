//! Search controller: submit, fetch, render, highlight
//!
//! One submission runs one cycle:
//! 1. the submit event's default action is suppressed
//! 2. a [`Query`] is read from the form values
//! 3. the backend is asked for `/search?q=...`
//! 4. the results container is cleared and re-rendered
//! 5. matches of the query are highlighted in the fresh content
//!
//! Every cycle takes a generation number before it suspends on the backend.
//! When a response arrives after a newer cycle has started, it is dropped, so
//! overlapping searches can never leave an older result set on display.

pub mod backend;
pub mod dom;
pub mod form;
pub mod highlight;
pub mod render;


pub use backend::{HttpBackend, SearchBackend};
pub use form::{FormData, Query, SubmitEvent};
pub use highlight::HighlightMode;
pub use render::ResultSet;

use crate::error::AppError;
use dom::ResultsContainer;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, info, warn};

/// What happened to the highlight step of a completed cycle
#[derive(Debug, Clone, PartialEq)]
pub enum HighlightStatus {
    Applied { marks: usize },
    /// Highlighting failed; the rendered results are kept
    Failed { error: String },
}

/// Summary of a cycle that updated the results view
#[derive(Debug, Clone, PartialEq)]
pub struct CycleReport {
    pub generation: u64,
    pub rendered: usize,
    pub highlight: HighlightStatus,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CycleOutcome {
    Completed(CycleReport),
    /// A newer submission started before this response arrived
    Superseded { generation: u64 },
}

/// Orchestrates search cycles against a backend and owns the results view
pub struct SearchController<B> {
    backend: B,
    mode: HighlightMode,
    generation: AtomicU64,
    view: Mutex<ResultsContainer>,
}

impl<B: SearchBackend> SearchController<B> {
    pub fn new(backend: B, mode: HighlightMode) -> Self {
        Self {
            backend,
            mode,
            generation: AtomicU64::new(0),
            view: Mutex::new(ResultsContainer::new()),
        }
    }

    /// Handle a form submission: one full search-render-highlight cycle
    ///
    /// The event's default action is always prevented, whatever the outcome.
    /// Backend failures are returned and leave the view as it was.
    pub async fn handle_submit(&self, event: &mut SubmitEvent) -> Result<CycleOutcome, AppError> {
        event.prevent_default();

        let query = Query::from_form(event.data());
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(
            "Cycle {} submitting {:?} (case sensitive: {})",
            generation,
            query.text,
            query.is_case_sensitive()
        );

        let results = self.backend.search(&query).await.map_err(|e| {
            warn!("Cycle {} search failed: {}", generation, e);
            e
        })?;

        let mut view = self.lock_view()?;
        if self.generation.load(Ordering::SeqCst) != generation {
            debug!("Cycle {} superseded, dropping {} results", generation, results.len());
            return Ok(CycleOutcome::Superseded { generation });
        }

        let rendered = render::render_results(&mut view, &results);
        let highlight = match highlight::highlight_results(
            &mut view,
            &query.text,
            query.is_case_sensitive(),
            self.mode,
        ) {
            Ok(marks) => HighlightStatus::Applied { marks },
            Err(e) => {
                warn!("Cycle {} highlighting skipped: {}", generation, e);
                HighlightStatus::Failed {
                    error: e.to_string(),
                }
            }
        };

        info!("Cycle {} rendered {} results", generation, rendered);
        Ok(CycleOutcome::Completed(CycleReport {
            generation,
            rendered,
            highlight,
        }))
    }

    /// Copy of the current results view
    pub fn view(&self) -> Result<ResultsContainer, AppError> {
        Ok(self.lock_view()?.clone())
    }

    fn lock_view(&self) -> Result<MutexGuard<'_, ResultsContainer>, AppError> {
        self.view
            .lock()
            .map_err(|_| AppError::Internal("results view lock poisoned".to_string()))
    }
}
