//! Recovery engine: the cancellable task controller, the missing-word search
//! and the BIP39/BIP32/secp256k1 pipeline it drives.
mod address;
mod checksum;
mod config;
mod controller;
mod derive;
mod engine;
mod phrase;
mod pipeline;
mod search;
mod types;
mod wordlist;

pub use address::{
    is_hex_address, normalize_address, to_checksum_address, AddressComputer,
    KeccakAddressComputer,
};
pub use checksum::{Bip39Checksum, ChecksumValidator};
pub use config::{RecoveryConfig, DEFAULT_DERIVATION_PATH, SUPPORTED_WORD_COUNTS};
pub use controller::{AsyncController, LiveToken, OperationTicket};
pub use derive::{Bip32KeyDeriver, Bip39SeedDeriver, DerivedKey, KeyDeriver, SeedDeriver};
pub use engine::RecoveryEngine;
pub use phrase::{parse_known_words, MnemonicPhrase};
pub use pipeline::Collaborators;
pub use search::{position_order, MnemonicSearch, ProgressSink};
pub use types::{ConfigError, RecoveryError};
pub use wordlist::{Bip39Wordlist, WordlistProvider, BIP39_WORDLIST_LEN};

pub use bip32::DerivationPath;
pub use recovery_core::{
    AsyncOperationState, ErrorInfo, FoundWord, OperationHandle, OperationSlot, OperationView,
    RecoveryProgress, RecoveryView,
};
