#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Once};

use recovery_engine::{
    AddressComputer, Bip39Checksum, Bip39Wordlist, Collaborators, DerivationPath, DerivedKey,
    KeyDeriver, MnemonicPhrase, ProgressSink, RecoveryError, RecoveryProgress, SeedDeriver,
};
use zeroize::Zeroizing;

pub const ABOUT_ADDRESS: &str = "0x9858EfFD232B4033E47d90003D41EC34EcaEda94";
pub const UNREACHABLE_ADDRESS: &str = "0xffffffffffffffffffffffffffffffffffffffff";

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(recovery_logging::initialize_for_tests);
}

pub fn words(raw: &str) -> Vec<String> {
    recovery_engine::parse_known_words(raw)
}

pub fn repeated(word: &str, count: usize) -> Vec<String> {
    vec![word.to_string(); count]
}

/// Cheap stand-in for PBKDF2: the phrase bytes are the seed.
#[derive(Default)]
pub struct CountingSeeds {
    pub calls: AtomicUsize,
}

impl SeedDeriver for CountingSeeds {
    fn derive_seed(&self, phrase: &MnemonicPhrase) -> Result<Zeroizing<Vec<u8>>, RecoveryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Zeroizing::new(phrase.to_phrase().as_bytes().to_vec()))
    }
}

pub struct FixedKeys {
    pub missing_private_key: bool,
}

impl KeyDeriver for FixedKeys {
    fn derive_key(&self, _seed: &[u8], _path: &DerivationPath) -> Result<DerivedKey, RecoveryError> {
        Ok(DerivedKey {
            private_key: (!self.missing_private_key).then(|| Zeroizing::new([1u8; 32])),
        })
    }
}

pub struct ZeroAddress;

impl AddressComputer for ZeroAddress {
    fn address_for(&self, _private_key: &[u8]) -> Result<String, RecoveryError> {
        Ok(format!("0x{}", "0".repeat(40)))
    }
}

/// Real wordlist and checksum, fake derivation that never matches
/// [`UNREACHABLE_ADDRESS`].
pub fn cheap_collaborators(seeds: Arc<CountingSeeds>, missing_private_key: bool) -> Collaborators {
    Collaborators {
        wordlist: Arc::new(Bip39Wordlist::english()),
        checksum: Arc::new(Bip39Checksum),
        seeds,
        keys: Arc::new(FixedKeys {
            missing_private_key,
        }),
        addresses: Arc::new(ZeroAddress),
    }
}

/// Records the distinct positions visited, in order.
#[derive(Default)]
pub struct RecordingSink {
    pub positions: Mutex<Vec<usize>>,
    pub emitted: AtomicUsize,
    pub stop_after: Option<usize>,
}

impl RecordingSink {
    pub fn stopping_after(emits: usize) -> Self {
        Self {
            stop_after: Some(emits),
            ..Self::default()
        }
    }

    pub fn positions(&self) -> Vec<usize> {
        self.positions.lock().unwrap().clone()
    }
}

impl ProgressSink for RecordingSink {
    fn emit(&self, progress: RecoveryProgress) -> bool {
        let count = self.emitted.fetch_add(1, Ordering::SeqCst) + 1;
        let mut positions = self.positions.lock().unwrap();
        if positions.last() != Some(&progress.position) {
            positions.push(progress.position);
        }
        self.stop_after.map_or(true, |limit| count < limit)
    }

    fn is_live(&self) -> bool {
        let count = self.emitted.load(Ordering::SeqCst);
        self.stop_after.map_or(true, |limit| count < limit)
    }
}
