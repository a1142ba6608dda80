use recovery_core::{status_line, AsyncOperationState, RecoveryView};
use recovery_engine::{position_order, WordlistProvider, BIP39_WORDLIST_LEN};

/// Live status for the terminal, with a completion percentage while pending.
pub(crate) fn render(view: &RecoveryView, word_count: usize, wordlist: &dyn WordlistProvider) -> String {
    let line = status_line(view);
    match (&view.state, &view.progress) {
        (AsyncOperationState::Pending, Some(progress)) => {
            let percent = completion(
                word_count,
                progress.position,
                wordlist.index_of(&progress.candidate_word),
            );
            format!("[{percent:5.1}%] {line}")
        }
        _ => line,
    }
}

fn completion(word_count: usize, position: usize, word_index: Option<usize>) -> f64 {
    let total = word_count * BIP39_WORDLIST_LEN;
    if total == 0 {
        return 0.0;
    }
    let Some(slot) = position_order(word_count)
        .iter()
        .position(|&candidate| candidate == position)
    else {
        return 0.0;
    };
    let tried = slot * BIP39_WORDLIST_LEN + word_index.map_or(0, |index| index + 1);
    tried as f64 * 100.0 / total as f64
}
