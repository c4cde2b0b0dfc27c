//! Top-level view state derivation.
//!
//! The active screen is never stored. It is recomputed from the session, the
//! history panel flag, the research step and the number of results whenever
//! any of them changes.

use serde::{Deserialize, Serialize};

/// The single active top-level screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViewState {
    /// No session: sign-in required.
    Auth,
    /// Collecting research inputs.
    Main,
    /// Browsing saved research.
    History,
    /// Showing analysis results.
    Results,
}

/// Steps of the research flow. `Analysis` is the terminal submission step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum ResearchStep {
    #[default]
    Documents = 1,
    BlogLinks = 2,
    ProductLines = 3,
    Analysis = 4,
}

impl ResearchStep {
    pub fn number(self) -> u8 {
        self as u8
    }

    /// The following step, saturating at `Analysis`.
    pub fn next(self) -> Self {
        match self {
            Self::Documents => Self::BlogLinks,
            Self::BlogLinks => Self::ProductLines,
            Self::ProductLines | Self::Analysis => Self::Analysis,
        }
    }

    /// The preceding step, saturating at `Documents`.
    pub fn previous(self) -> Self {
        match self {
            Self::Documents | Self::BlogLinks => Self::Documents,
            Self::ProductLines => Self::BlogLinks,
            Self::Analysis => Self::ProductLines,
        }
    }
}

/// Derives the active view. Total: every input combination has an output.
///
/// Precedence: a missing session wins over everything, an open history panel
/// wins over results, and results need both the terminal step and at least
/// one record.
pub fn derive(
    session_present: bool,
    history_open: bool,
    step: ResearchStep,
    result_count: usize,
) -> ViewState {
    if !session_present {
        ViewState::Auth
    } else if history_open {
        ViewState::History
    } else if step == ResearchStep::Analysis && result_count > 0 {
        ViewState::Results
    } else {
        ViewState::Main
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STEPS: [ResearchStep; 4] = [
        ResearchStep::Documents,
        ResearchStep::BlogLinks,
        ResearchStep::ProductLines,
        ResearchStep::Analysis,
    ];

    #[test]
    fn test_missing_session_dominates() {
        assert_eq!(derive(false, true, ResearchStep::Analysis, 5), ViewState::Auth);
        for step in STEPS {
            for open in [false, true] {
                for count in [0, 1, 5] {
                    assert_eq!(derive(false, open, step, count), ViewState::Auth);
                }
            }
        }
    }

    #[test]
    fn test_history_panel_beats_results() {
        assert_eq!(derive(true, true, ResearchStep::Analysis, 5), ViewState::History);
    }

    #[test]
    fn test_results_need_terminal_step_and_records() {
        assert_eq!(derive(true, false, ResearchStep::Analysis, 1), ViewState::Results);
        assert_eq!(derive(true, false, ResearchStep::Analysis, 0), ViewState::Main);
        assert_eq!(derive(true, false, ResearchStep::ProductLines, 3), ViewState::Main);
    }

    #[test]
    fn test_step_numbers_and_navigation() {
        assert_eq!(ResearchStep::Analysis.number(), 4);
        assert_eq!(ResearchStep::Documents.number(), 1);
        assert_eq!(ResearchStep::ProductLines.next(), ResearchStep::Analysis);
        assert_eq!(ResearchStep::Analysis.next(), ResearchStep::Analysis);
        assert_eq!(ResearchStep::Documents.previous(), ResearchStep::Documents);
        assert_eq!(ResearchStep::default(), ResearchStep::Documents);
    }
}
