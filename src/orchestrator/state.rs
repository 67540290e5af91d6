//! UI state and the phases derived from it.

use crate::bridge::{FolderSelection, SummarizeResult};

/// Where the workflow currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No folder chosen yet.
    Idle,
    /// A folder is chosen and no result is showing.
    FolderSelected,
    /// A summarize call is in flight.
    Requesting,
    /// A result (success or failure) is showing.
    Completed,
}

/// Everything the UI renders from.
///
/// While `loading` is true, `result` still holds whatever was showing before
/// the request started. `result` is only replaced in the same update that
/// clears `loading`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UiState {
    pub selected_folder: FolderSelection,
    pub result: Option<SummarizeResult>,
    pub loading: bool,
    /// Bumped on every folder change; a settling request whose epoch is
    /// behind is stale and must not write its result.
    pub(crate) epoch: u64,
}

impl UiState {
    pub fn phase(&self) -> Phase {
        if self.loading {
            Phase::Requesting
        } else if self.result.is_some() {
            Phase::Completed
        } else if self.selected_folder.is_some() {
            Phase::FolderSelected
        } else {
            Phase::Idle
        }
    }

    /// Text for the summary panel, if anything is to be shown.
    pub fn result_text(&self) -> Option<String> {
        self.result.as_ref().map(SummarizeResult::display_text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phases() {
        let mut state = UiState::default();
        assert_eq!(state.phase(), Phase::Idle);

        state.selected_folder = Some("/a".into());
        assert_eq!(state.phase(), Phase::FolderSelected);

        state.loading = true;
        assert_eq!(state.phase(), Phase::Requesting);

        state.loading = false;
        state.result = Some(SummarizeResult::failure("x"));
        assert_eq!(state.phase(), Phase::Completed);
        assert_eq!(state.result_text().as_deref(), Some("Error: x"));
    }
}
