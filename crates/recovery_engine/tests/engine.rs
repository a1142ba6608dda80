mod common;

use std::sync::Arc;

use common::{
    cheap_collaborators, init_logging, repeated, words, CountingSeeds, ABOUT_ADDRESS,
    UNREACHABLE_ADDRESS,
};
use pretty_assertions::assert_eq;
use recovery_engine::{
    AsyncOperationState, FoundWord, RecoveryConfig, RecoveryEngine, RecoveryView,
};
use tokio::runtime::Handle;

fn engine() -> RecoveryEngine {
    RecoveryEngine::new(&RecoveryConfig::default(), Handle::current()).expect("engine")
}

fn rejection_code(view: &RecoveryView) -> Option<&'static str> {
    match &view.state {
        AsyncOperationState::Rejected(error) => error.code(),
        _ => None,
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn canonical_phrase_recovers_about_at_last_position() {
    init_logging();
    let engine = engine();

    engine
        .start(repeated("abandon", 11), ABOUT_ADDRESS)
        .finished()
        .await;

    assert_eq!(
        engine.view(),
        RecoveryView {
            state: AsyncOperationState::Resolved(FoundWord {
                word: "about".to_string(),
                position: 11,
            }),
            progress: None,
        }
    );
    assert_eq!(
        recovery_core::status_line(&engine.view()),
        "The 12th word is about!"
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn raw_input_is_split_and_trimmed() {
    init_logging();
    let engine = engine();
    let input = "abandon  abandon abandon abandon abandon\tabandon abandon abandon abandon abandon abandon\n";

    engine
        .start_from_input(input, &format!("  {}  ", ABOUT_ADDRESS.to_uppercase().replace("0X", "0x")))
        .finished()
        .await;

    assert!(matches!(
        engine.view().state,
        AsyncOperationState::Resolved(FoundWord { position: 11, .. })
    ));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn removed_first_word_is_found_at_position_zero() {
    init_logging();
    let engine = engine();
    let mut known = repeated("abandon", 10);
    known.push("about".to_string());

    engine.start(known, ABOUT_ADDRESS).finished().await;

    assert_eq!(
        engine.view().state,
        AsyncOperationState::Resolved(FoundWord {
            word: "abandon".to_string(),
            position: 0,
        })
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn invalid_inputs_are_rejected_with_distinct_messages() {
    init_logging();
    let engine = engine();

    engine
        .start(words("abandon abandon abandon"), ABOUT_ADDRESS)
        .finished()
        .await;
    assert_eq!(rejection_code(&engine.view()), Some("invalid_input"));
    assert_eq!(
        recovery_core::status_line(&engine.view()),
        "Must enter 11 words, you entered 3 words."
    );

    let mut known = repeated("abandon", 11);
    known[0] = "abandonn".to_string();
    engine.start(known, ABOUT_ADDRESS).finished().await;
    assert_eq!(rejection_code(&engine.view()), Some("invalid_input"));
    assert!(recovery_core::status_line(&engine.view()).contains("abandonn"));

    engine
        .start(repeated("abandon", 11), "not an address")
        .finished()
        .await;
    assert_eq!(rejection_code(&engine.view()), Some("invalid_input"));
    assert!(recovery_core::status_line(&engine.view()).starts_with("Address must be"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn exhaustive_miss_rejects_with_not_found() {
    init_logging();
    let seeds = Arc::new(CountingSeeds::default());
    let engine = RecoveryEngine::with_collaborators(
        &RecoveryConfig::default(),
        cheap_collaborators(seeds, false),
        Handle::current(),
    )
    .expect("engine");

    engine
        .start(repeated("abandon", 11), UNREACHABLE_ADDRESS)
        .finished()
        .await;

    assert_eq!(rejection_code(&engine.view()), Some("not_found"));
    assert_eq!(
        recovery_core::status_line(&engine.view()),
        "No word found to complete mnemonic."
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn restarting_discards_the_first_search() {
    init_logging();
    let engine = engine();
    let mut rx = engine.subscribe();

    let slow = engine.start(repeated("abandon", 11), UNREACHABLE_ADDRESS);
    rx.wait_for(|slot| slot.progress().is_some())
        .await
        .map(|_| ())
        .expect("engine alive");

    let fast = engine.start(repeated("abandon", 11), ABOUT_ADDRESS);
    fast.finished().await;
    slow.finished().await;

    assert_eq!(
        engine.view().state,
        AsyncOperationState::Resolved(FoundWord {
            word: "about".to_string(),
            position: 11,
        })
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn reset_while_searching_returns_to_inactive_for_good() {
    init_logging();
    let engine = engine();
    let mut rx = engine.subscribe();

    let ticket = engine.start(repeated("abandon", 11), UNREACHABLE_ADDRESS);
    rx.wait_for(|slot| slot.progress().is_some())
        .await
        .map(|_| ())
        .expect("engine alive");

    engine.reset();
    assert_eq!(engine.view(), RecoveryView::default());

    ticket.finished().await;
    assert_eq!(engine.view(), RecoveryView::default());

    engine.reset();
    assert_eq!(engine.view(), RecoveryView::default());
}
