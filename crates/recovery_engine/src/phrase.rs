use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// Ordered words of a full-length candidate phrase. Wiped on drop.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct MnemonicPhrase {
    words: Vec<String>,
}

impl MnemonicPhrase {
    pub fn new(words: Vec<String>) -> Self {
        Self { words }
    }

    /// Builds the phrase obtained by inserting `word` before `known[position]`.
    /// A position at or past the end appends.
    pub fn with_inserted(known: &[String], position: usize, word: &str) -> Self {
        let position = position.min(known.len());
        let mut words = Vec::with_capacity(known.len() + 1);
        words.extend_from_slice(&known[..position]);
        words.push(word.to_string());
        words.extend_from_slice(&known[position..]);
        Self { words }
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Words joined by single spaces, the form seed derivation expects.
    pub fn to_phrase(&self) -> Zeroizing<String> {
        Zeroizing::new(self.words.join(" "))
    }
}

impl fmt::Debug for MnemonicPhrase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MnemonicPhrase(<{} words>)", self.words.len())
    }
}

/// Splits user input into words on any whitespace.
pub fn parse_known_words(input: &str) -> Vec<String> {
    input.split_whitespace().map(ToOwned::to_owned).collect()
}
