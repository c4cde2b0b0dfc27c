//! Research use case.
//!
//! Coordinates one user's research flow: submitting inputs to the analysis
//! service, holding the current results, saving them to history with
//! duplicate detection, and deriving the active view.

use chrono::Utc;
use insight_core::auth::SessionProvider;
use insight_core::config::AnalysisConfig;
use insight_core::error::{InsightError, Result};
use insight_core::history::{HistoryEntry, HistoryRepository, find_existing};
use insight_core::research::{
    AnalysisRecord, AnalysisService, RawInputSet, SubmissionGuard, build, ingest,
};
use insight_core::view::{ResearchStep, ViewState, derive};
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

const MAX_TITLE_COMPANIES: usize = 3;

/// Result of a successful submission.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionOutcome {
    pub records: Vec<AnalysisRecord>,
    /// True when the service reply held no readable analysis and
    /// `records` is the single fallback placeholder.
    pub degraded: bool,
}

/// Result of saving the current results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveOutcome {
    pub id: String,
    /// False when an existing entry with the same companies was updated.
    pub created: bool,
}

/// Point-in-time view of the research state.
#[derive(Debug, Clone, PartialEq)]
pub struct ResearchSnapshot {
    pub view: ViewState,
    pub step: ResearchStep,
    pub history_open: bool,
    pub result_count: usize,
    pub degraded: bool,
    pub active_entry_id: Option<String>,
}

#[derive(Debug, Default)]
struct ResearchState {
    history_open: bool,
    step: ResearchStep,
    results: Vec<AnalysisRecord>,
    degraded: bool,
    history: Vec<HistoryEntry>,
    /// History entry the current results were loaded from or saved to.
    active_entry_id: Option<String>,
}

/// Application service for the research flow.
///
/// State is behind an async mutex that is never held across a call to the
/// analysis service or the repository.
pub struct ResearchUseCase {
    analysis_service: Arc<dyn AnalysisService>,
    history_repository: Arc<dyn HistoryRepository>,
    session_provider: Arc<dyn SessionProvider>,
    analysis_config: AnalysisConfig,
    guard: SubmissionGuard,
    state: Mutex<ResearchState>,
}

impl ResearchUseCase {
    pub fn new(
        analysis_service: Arc<dyn AnalysisService>,
        history_repository: Arc<dyn HistoryRepository>,
        session_provider: Arc<dyn SessionProvider>,
    ) -> Self {
        Self {
            analysis_service,
            history_repository,
            session_provider,
            analysis_config: AnalysisConfig::default(),
            guard: SubmissionGuard::new(),
            state: Mutex::new(ResearchState::default()),
        }
    }

    pub fn with_analysis_config(mut self, config: AnalysisConfig) -> Self {
        self.analysis_config = config;
        self
    }

    fn require_session(&self) -> Result<()> {
        self.session_provider
            .current()
            .map(|_| ())
            .ok_or(InsightError::Unauthenticated)
    }

    // ============================================================================
    // Submission
    // ============================================================================

    /// Submits the inputs and replaces the current results with the analysis.
    ///
    /// Rejected with `SubmissionInProgress` while another submission is
    /// outstanding. On any error the current results are left untouched.
    pub async fn submit(&self, input: &RawInputSet) -> Result<SubmissionOutcome> {
        self.require_session()?;
        let _ticket = self.guard.try_acquire()?;
        input.validate()?;

        let payload = build(input);
        let body = self
            .analysis_service
            .analyze(&payload)
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "Analysis submission failed"))?;

        let normalized = ingest(&body);
        if normalized.degraded {
            if self.analysis_config.strict_parsing {
                return Err(InsightError::MalformedResponse(
                    "no analysis could be decoded from the service response".to_string(),
                ));
            }
            tracing::warn!("Analysis response was unreadable; showing fallback result");
        }

        let mut state = self.state.lock().await;
        state.results = normalized.records.clone();
        state.degraded = normalized.degraded;
        state.step = ResearchStep::Analysis;
        state.history_open = false;
        state.active_entry_id = None;

        tracing::info!(
            records = normalized.records.len(),
            degraded = normalized.degraded,
            "Analysis results ready"
        );

        Ok(SubmissionOutcome {
            records: normalized.records,
            degraded: normalized.degraded,
        })
    }

    pub fn is_submitting(&self) -> bool {
        self.guard.is_in_flight()
    }

    // ============================================================================
    // History
    // ============================================================================

    /// Reloads the history list from the repository.
    pub async fn load_history(&self) -> Result<Vec<HistoryEntry>> {
        let entries = self.history_repository.list_results().await?;
        self.state.lock().await.history = entries.clone();
        Ok(entries)
    }

    /// The history list as last loaded.
    pub async fn history(&self) -> Vec<HistoryEntry> {
        self.state.lock().await.history.clone()
    }

    /// Saves the current results.
    ///
    /// If a stored entry covers the same set of companies it is updated in
    /// place (keeping its id and creation time); otherwise a new entry is
    /// created. `title` defaults to the existing title or one derived from
    /// the company names.
    pub async fn save_results(&self, title: Option<String>) -> Result<SaveOutcome> {
        self.require_session()?;

        let (records, degraded) = {
            let state = self.state.lock().await;
            (state.results.clone(), state.degraded)
        };
        if records.is_empty() {
            return Err(InsightError::invalid_input("There are no results to save."));
        }
        if degraded {
            return Err(InsightError::invalid_input(
                "The last analysis could not be read, so there is nothing to save.",
            ));
        }

        let history = self.history_repository.list_results().await?;
        let now = Utc::now().to_rfc3339();

        let (entry, created) = match find_existing(&records, &history)
            .and_then(|id| history.iter().find(|e| e.id == id))
        {
            Some(existing) => (
                HistoryEntry {
                    id: existing.id.clone(),
                    title: title.unwrap_or_else(|| existing.title.clone()),
                    data: records,
                    created_at: existing.created_at.clone(),
                    updated_at: Some(now),
                },
                false,
            ),
            None => {
                let title = title.unwrap_or_else(|| default_title(&records));
                (
                    HistoryEntry {
                        id: Uuid::new_v4().to_string(),
                        title,
                        data: records,
                        created_at: now,
                        updated_at: None,
                    },
                    true,
                )
            }
        };

        self.history_repository
            .save_or_update(&entry)
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "Failed to save research"))?;

        tracing::info!(id = %entry.id, created, "Saved research to history");

        let id = entry.id.clone();
        let mut state = self.state.lock().await;
        state.history.retain(|e| e.id != id);
        state.history.insert(0, entry);
        state.active_entry_id = Some(id.clone());

        Ok(SaveOutcome { id, created })
    }

    /// Deletes a history entry.
    ///
    /// The entry leaves the in-memory list immediately; if the repository
    /// fails it is put back at its original position and the error returned.
    pub async fn delete_history_entry(&self, id: &str) -> Result<()> {
        self.require_session()?;

        let removed = {
            let mut state = self.state.lock().await;
            let position = state.history.iter().position(|e| e.id == id);
            position.map(|index| (index, state.history.remove(index)))
        };

        if let Err(e) = self.history_repository.delete_result(id).await {
            tracing::warn!(id, error = %e, "Delete failed; restoring history entry");
            if let Some((index, entry)) = removed {
                let mut state = self.state.lock().await;
                if !state.history.iter().any(|existing| existing.id == entry.id) {
                    let index = index.min(state.history.len());
                    state.history.insert(index, entry);
                }
            }
            return Err(e);
        }

        let mut state = self.state.lock().await;
        if state.active_entry_id.as_deref() == Some(id) {
            state.active_entry_id = None;
        }
        tracing::info!(id, "Deleted history entry");
        Ok(())
    }

    /// Shows a saved entry as the current results.
    pub async fn select_history_entry(&self, id: &str) -> Result<Vec<AnalysisRecord>> {
        self.require_session()?;

        let mut state = self.state.lock().await;
        let entry = state
            .history
            .iter()
            .find(|e| e.id == id)
            .cloned()
            .ok_or_else(|| InsightError::not_found("history entry", id))?;

        state.results = entry.data.clone();
        state.degraded = false;
        state.step = ResearchStep::Analysis;
        state.history_open = false;
        state.active_entry_id = Some(entry.id);

        Ok(entry.data)
    }

    // ============================================================================
    // Navigation
    // ============================================================================

    pub async fn open_history(&self) {
        self.state.lock().await.history_open = true;
    }

    pub async fn close_history(&self) {
        self.state.lock().await.history_open = false;
    }

    pub async fn toggle_history(&self) -> bool {
        let mut state = self.state.lock().await;
        state.history_open = !state.history_open;
        state.history_open
    }

    /// Moves to the next input step. Never advances into `Analysis`, which is
    /// reached only through a submission or a history selection.
    pub async fn advance_step(&self) -> ResearchStep {
        let mut state = self.state.lock().await;
        if state.step.next() != ResearchStep::Analysis {
            state.step = state.step.next();
        }
        state.step
    }

    pub async fn go_back(&self) -> ResearchStep {
        let mut state = self.state.lock().await;
        state.step = state.step.previous();
        state.step
    }

    /// Clears the current results and returns to the first step.
    pub async fn start_new_research(&self) {
        let mut state = self.state.lock().await;
        state.results.clear();
        state.degraded = false;
        state.step = ResearchStep::Documents;
        state.active_entry_id = None;
    }

    // ============================================================================
    // Queries
    // ============================================================================

    pub async fn results(&self) -> Vec<AnalysisRecord> {
        self.state.lock().await.results.clone()
    }

    /// The active view, derived from the live session and current state.
    pub async fn view_state(&self) -> ViewState {
        self.snapshot().await.view
    }

    pub async fn snapshot(&self) -> ResearchSnapshot {
        let session_present = self.session_provider.current().is_some();
        let state = self.state.lock().await;
        ResearchSnapshot {
            view: derive(
                session_present,
                state.history_open,
                state.step,
                state.results.len(),
            ),
            step: state.step,
            history_open: state.history_open,
            result_count: state.results.len(),
            degraded: state.degraded,
            active_entry_id: state.active_entry_id.clone(),
        }
    }
}

fn default_title(records: &[AnalysisRecord]) -> String {
    let names: Vec<&str> = records
        .iter()
        .take(MAX_TITLE_COMPANIES)
        .map(|r| r.company_name.as_str())
        .collect();
    let mut title = format!("Research: {}", names.join(", "));
    if records.len() > MAX_TITLE_COMPANIES {
        title.push_str(&format!(" +{}", records.len() - MAX_TITLE_COMPANIES));
    }
    title
}
