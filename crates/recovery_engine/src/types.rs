use recovery_core::ErrorInfo;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecoveryError {
    #[error("Must enter {expected} words, you entered {actual} words.")]
    WordCount { expected: usize, actual: usize },
    #[error("All words must be part of a mnemonic. {0} is not part of the mnemonic word list.")]
    UnknownWord(String),
    #[error("Address must be an Ethereum address starting with 0x, you entered {0}")]
    MalformedAddress(String),
    #[error("No word found to complete mnemonic.")]
    NotFound,
    #[error("Unexpected error: {0}")]
    InternalFault(String),
    #[error("search superseded by a newer request")]
    Superseded,
}

impl RecoveryError {
    pub fn code(&self) -> &'static str {
        match self {
            RecoveryError::WordCount { .. }
            | RecoveryError::UnknownWord(_)
            | RecoveryError::MalformedAddress(_) => "invalid_input",
            RecoveryError::NotFound => "not_found",
            RecoveryError::InternalFault(_) => "internal_fault",
            RecoveryError::Superseded => "superseded",
        }
    }

    pub fn is_invalid_input(&self) -> bool {
        self.code() == "invalid_input"
    }
}

impl From<RecoveryError> for ErrorInfo {
    fn from(err: RecoveryError) -> Self {
        ErrorInfo::from_error(&err).with_code(err.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("unsupported word count {0}; expected one of 12, 15, 18, 21, 24")]
    WordCount(usize),
    #[error("invalid derivation path {path:?}: {reason}")]
    DerivationPath { path: String, reason: String },
    #[error("wordlist must contain 2048 words, found {0}")]
    WordlistSize(usize),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_info_keeps_message_and_code() {
        let info = ErrorInfo::from(RecoveryError::WordCount {
            expected: 11,
            actual: 3,
        });
        assert_eq!(info.message(), "Must enter 11 words, you entered 3 words.");
        assert_eq!(info.code(), Some("invalid_input"));

        let info = ErrorInfo::from(RecoveryError::NotFound);
        assert_eq!(info.message(), "No word found to complete mnemonic.");
        assert_eq!(info.code(), Some("not_found"));
    }
}
