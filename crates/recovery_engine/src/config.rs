use std::fmt;

use bip32::DerivationPath;
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Phrase lengths defined by BIP39.
pub const SUPPORTED_WORD_COUNTS: [usize; 5] = [12, 15, 18, 21, 24];

/// First account of the standard Ethereum derivation.
pub const DEFAULT_DERIVATION_PATH: &str = "m/44'/60'/0'/0/0";

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecoveryConfig {
    /// Total words in the phrase, including the missing one.
    pub word_count: usize,
    pub derivation_path: String,
    /// Optional BIP39 passphrase ("25th word").
    pub passphrase: String,
}

impl Default for RecoveryConfig {
    fn default() -> Self {
        Self {
            word_count: 12,
            derivation_path: DEFAULT_DERIVATION_PATH.to_string(),
            passphrase: String::new(),
        }
    }
}

// The passphrase is as sensitive as the phrase itself.
impl fmt::Debug for RecoveryConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecoveryConfig")
            .field("word_count", &self.word_count)
            .field("derivation_path", &self.derivation_path)
            .field(
                "passphrase",
                &if self.passphrase.is_empty() { "" } else { "<redacted>" },
            )
            .finish()
    }
}

impl RecoveryConfig {
    pub fn known_word_count(&self) -> usize {
        self.word_count.saturating_sub(1)
    }

    pub fn parsed_path(&self) -> Result<DerivationPath, ConfigError> {
        self.derivation_path
            .trim()
            .parse()
            .map_err(|err: bip32::Error| ConfigError::DerivationPath {
                path: self.derivation_path.clone(),
                reason: err.to_string(),
            })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !SUPPORTED_WORD_COUNTS.contains(&self.word_count) {
            return Err(ConfigError::WordCount(self.word_count));
        }
        self.parsed_path()?;
        Ok(())
    }
}
