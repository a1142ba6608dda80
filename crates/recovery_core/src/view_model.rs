use crate::AsyncOperationState;

/// Read-only snapshot of a controller slot, suitable for polling or binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationView<T, P> {
    pub state: AsyncOperationState<T>,
    pub progress: Option<P>,
}

impl<T, P> Default for OperationView<T, P> {
    fn default() -> Self {
        Self {
            state: AsyncOperationState::Inactive,
            progress: None,
        }
    }
}

/// Where the search currently is. Positions are zero-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecoveryProgress {
    pub position: usize,
    pub candidate_word: String,
}

/// The missing word and the zero-based position it belongs at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoundWord {
    pub word: String,
    pub position: usize,
}

pub type RecoveryView = OperationView<FoundWord, RecoveryProgress>;

/// English ordinal for a one-based index: `1st`, `2nd`, `3rd`, `11th`, `22nd`.
pub fn ordinal(n: usize) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}

/// One-line, human-readable description of a recovery view.
pub fn status_line(view: &RecoveryView) -> String {
    match &view.state {
        AsyncOperationState::Inactive => "Idle".to_string(),
        AsyncOperationState::Pending => match &view.progress {
            Some(progress) => format!(
                "Trying position {} with word {}",
                progress.position + 1,
                progress.candidate_word
            ),
            None => "Starting search".to_string(),
        },
        AsyncOperationState::Resolved(found) => format!(
            "The {} word is {}!",
            ordinal(found.position + 1),
            found.word
        ),
        AsyncOperationState::Rejected(error) => error.message().to_string(),
    }
}
