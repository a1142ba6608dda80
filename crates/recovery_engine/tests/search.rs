mod common;

use std::sync::atomic::Ordering;
use std::sync::Arc;

use common::{
    cheap_collaborators, init_logging, repeated, words, CountingSeeds, RecordingSink,
    UNREACHABLE_ADDRESS,
};
use pretty_assertions::assert_eq;
use recovery_engine::{
    Collaborators, ConfigError, FoundWord, MnemonicSearch, RecoveryConfig, RecoveryError,
};

fn cheap_search(missing_private_key: bool) -> (MnemonicSearch, Arc<CountingSeeds>) {
    let seeds = Arc::new(CountingSeeds::default());
    let tools = cheap_collaborators(seeds.clone(), missing_private_key);
    let search = MnemonicSearch::new(&RecoveryConfig::default(), tools).expect("search");
    (search, seeds)
}

#[tokio::test]
async fn wrong_word_count_fails_before_any_derivation() {
    init_logging();
    let (search, seeds) = cheap_search(false);
    for count in [0, 1, 10, 12, 23] {
        let sink = RecordingSink::default();
        let result = search
            .run(repeated("abandon", count), UNREACHABLE_ADDRESS.to_string(), &sink)
            .await;
        assert_eq!(
            result,
            Err(RecoveryError::WordCount {
                expected: 11,
                actual: count
            })
        );
        assert_eq!(sink.emitted.load(Ordering::SeqCst), 0);
    }
    assert_eq!(seeds.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn unknown_word_is_invalid_input() {
    init_logging();
    let (search, seeds) = cheap_search(false);
    let mut known = repeated("abandon", 11);
    known[4] = "satoshi".to_string();

    let result = search
        .run(known, UNREACHABLE_ADDRESS.to_string(), &RecordingSink::default())
        .await;

    assert_eq!(result, Err(RecoveryError::UnknownWord("satoshi".to_string())));
    assert!(result.unwrap_err().is_invalid_input());
    assert_eq!(seeds.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn malformed_address_is_invalid_input() {
    init_logging();
    let (search, seeds) = cheap_search(false);
    for address in [
        "",
        "9858EfFD232B4033E47d90003D41EC34EcaEda94",
        "0x9858EfFD232B4033E47d90003D41EC34EcaEda9",
        "0xnothex0000000000000000000000000000000000",
    ] {
        let result = search
            .run(repeated("abandon", 11), address.to_string(), &RecordingSink::default())
            .await;
        assert!(
            matches!(result, Err(RecoveryError::MalformedAddress(_))),
            "{address:?} gave {result:?}"
        );
    }
    assert_eq!(seeds.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn exhaustive_miss_visits_positions_in_priority_order() {
    init_logging();
    let (search, seeds) = cheap_search(false);
    let sink = RecordingSink::default();

    let result = search
        .run(repeated("abandon", 11), UNREACHABLE_ADDRESS.to_string(), &sink)
        .await;

    assert_eq!(result, Err(RecoveryError::NotFound));
    assert_eq!(sink.positions(), vec![11, 0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10]);
    assert_eq!(sink.emitted.load(Ordering::SeqCst), 12 * 2048);
    // Only checksum-valid candidates are derived: roughly 1 in 16.
    let derived = seeds.calls.load(Ordering::SeqCst);
    assert!(derived > 0 && derived < 12 * 2048 / 8, "derived {derived}");
}

#[tokio::test]
async fn missing_private_key_is_internal_fault() {
    init_logging();
    let (search, _seeds) = cheap_search(true);

    let result = search
        .run(repeated("abandon", 11), UNREACHABLE_ADDRESS.to_string(), &RecordingSink::default())
        .await;

    let err = result.unwrap_err();
    assert_eq!(err.code(), "internal_fault");
    assert!(err.to_string().contains("Private key missing"), "{err}");
}

#[tokio::test]
async fn superseded_run_stops_at_next_candidate() {
    init_logging();
    let (search, _seeds) = cheap_search(false);
    let sink = RecordingSink::stopping_after(5);

    let result = search
        .run(repeated("abandon", 11), UNREACHABLE_ADDRESS.to_string(), &sink)
        .await;

    assert_eq!(result, Err(RecoveryError::Superseded));
    assert_eq!(sink.emitted.load(Ordering::SeqCst), 5);
    assert_eq!(sink.positions(), vec![11]);
}

#[tokio::test]
async fn finds_canonical_checksum_word_with_real_pipeline() {
    init_logging();
    let search = MnemonicSearch::new(
        &RecoveryConfig::default(),
        Collaborators::standard(&RecoveryConfig::default()),
    )
    .expect("search");

    let found = search
        .run(
            repeated("abandon", 11),
            common::ABOUT_ADDRESS.to_lowercase(),
            &RecordingSink::default(),
        )
        .await;

    assert_eq!(
        found,
        Ok(FoundWord {
            word: "about".to_string(),
            position: 11
        })
    );
}

#[tokio::test]
async fn recovers_removed_last_word_of_another_mnemonic() {
    init_logging();
    let config = RecoveryConfig::default();
    let tools = Collaborators::standard(&config);
    let full = recovery_engine::MnemonicPhrase::new(words(
        "zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo wrong",
    ));
    let target = tools
        .derive_address(&full, &config.parsed_path().expect("path"))
        .expect("address");
    let search = MnemonicSearch::new(&config, tools).expect("search");

    let found = search
        .run(repeated("zoo", 11), target, &RecordingSink::default())
        .await;

    assert_eq!(
        found,
        Ok(FoundWord {
            word: "wrong".to_string(),
            position: 11
        })
    );
}

#[test]
fn search_rejects_unsupported_configuration() {
    let config = RecoveryConfig {
        word_count: 11,
        ..RecoveryConfig::default()
    };
    let tools = Collaborators::standard(&RecoveryConfig::default());
    assert_eq!(
        MnemonicSearch::new(&config, tools).err(),
        Some(ConfigError::WordCount(11))
    );
}
