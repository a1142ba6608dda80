use std::iter;

use bip32::DerivationPath;
use recovery_core::{FoundWord, RecoveryProgress};
use recovery_logging::{recovery_debug, recovery_error, recovery_info, recovery_trace};

use crate::{
    is_hex_address, normalize_address, Collaborators, ConfigError, MnemonicPhrase,
    RecoveryConfig, RecoveryError, BIP39_WORDLIST_LEN,
};

/// Receives live progress from a running search.
pub trait ProgressSink: Send + Sync {
    /// Publishes the candidate about to be tested. Returns `false` once the
    /// run has been superseded and should stop.
    fn emit(&self, progress: RecoveryProgress) -> bool;

    fn is_live(&self) -> bool;
}

/// Insertion positions in search order: the last position first, then
/// front to back.
pub fn position_order(word_count: usize) -> Vec<usize> {
    match word_count.checked_sub(1) {
        Some(last) => iter::once(last).chain(0..last).collect(),
        None => Vec::new(),
    }
}

/// Exhaustive, checksum-pruned search for one missing word.
#[derive(Clone)]
pub struct MnemonicSearch {
    word_count: usize,
    path: DerivationPath,
    tools: Collaborators,
}

impl MnemonicSearch {
    pub fn new(config: &RecoveryConfig, tools: Collaborators) -> Result<Self, ConfigError> {
        config.validate()?;
        if tools.wordlist.len() != BIP39_WORDLIST_LEN {
            return Err(ConfigError::WordlistSize(tools.wordlist.len()));
        }
        Ok(Self {
            word_count: config.word_count,
            path: config.parsed_path()?,
            tools,
        })
    }

    pub fn word_count(&self) -> usize {
        self.word_count
    }

    pub fn collaborators(&self) -> &Collaborators {
        &self.tools
    }

    /// Fail-fast input checks. Returns the target in comparison form.
    pub fn validate_inputs(
        &self,
        known_words: &[String],
        target_address: &str,
    ) -> Result<String, RecoveryError> {
        let expected = self.word_count - 1;
        if known_words.len() != expected {
            return Err(RecoveryError::WordCount {
                expected,
                actual: known_words.len(),
            });
        }
        if let Some(unknown) = known_words
            .iter()
            .find(|word| !self.tools.wordlist.contains(word))
        {
            return Err(RecoveryError::UnknownWord(unknown.clone()));
        }
        let target = target_address.trim();
        if !is_hex_address(target) {
            return Err(RecoveryError::MalformedAddress(target.to_string()));
        }
        Ok(normalize_address(target))
    }

    pub async fn run(
        &self,
        known_words: Vec<String>,
        target_address: String,
        sink: &dyn ProgressSink,
    ) -> Result<FoundWord, RecoveryError> {
        let target = self.validate_inputs(&known_words, &target_address)?;
        recovery_info!(
            "Searching {} positions x {} words for {}...",
            self.word_count,
            self.tools.wordlist.len(),
            &target[..8]
        );

        let mut derivations = 0usize;
        for position in position_order(self.word_count) {
            recovery_debug!("Trying insertion position {}", position);
            for index in 0..self.tools.wordlist.len() {
                let Some(word) = self.tools.wordlist.word(index) else {
                    break;
                };
                let progress = RecoveryProgress {
                    position,
                    candidate_word: word.to_string(),
                };
                if !sink.emit(progress) {
                    recovery_debug!("Search superseded at position {}", position);
                    return Err(RecoveryError::Superseded);
                }
                tokio::task::yield_now().await;

                let phrase = MnemonicPhrase::with_inserted(&known_words, position, word);
                if !self.tools.is_checksum_valid(&phrase) {
                    continue;
                }
                // Derivation is the expensive step; do not start one for a dead run.
                if !sink.is_live() {
                    recovery_debug!("Search superseded before derivation");
                    return Err(RecoveryError::Superseded);
                }
                derivations += 1;
                recovery_trace!("Deriving candidate {} at position {}", word, position);
                let address = self
                    .tools
                    .derive_address(&phrase, &self.path)
                    .inspect_err(|err| recovery_error!("Derivation failed: {}", err))?;
                if address.eq_ignore_ascii_case(&target) {
                    recovery_info!(
                        "Match at position {} after {} derivations",
                        position,
                        derivations
                    );
                    return Ok(FoundWord {
                        word: word.to_string(),
                        position,
                    });
                }
            }
        }

        recovery_info!("Search exhausted after {} derivations", derivations);
        Err(RecoveryError::NotFound)
    }
}
