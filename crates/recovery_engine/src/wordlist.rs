use bip39::Language;

/// Number of words in every BIP39 wordlist (11 bits per word).
pub const BIP39_WORDLIST_LEN: usize = 2048;

/// Ordered, fixed list of valid words with a membership test.
pub trait WordlistProvider: Send + Sync {
    fn len(&self) -> usize;

    fn word(&self, index: usize) -> Option<&str>;

    fn index_of(&self, word: &str) -> Option<usize>;

    fn contains(&self, word: &str) -> bool {
        self.index_of(word).is_some()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One of the wordlists shipped with the `bip39` crate.
#[derive(Debug, Clone, Copy)]
pub struct Bip39Wordlist {
    language: Language,
}

impl Bip39Wordlist {
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    pub fn english() -> Self {
        Self::new(Language::English)
    }

    pub fn language(&self) -> Language {
        self.language
    }
}

impl Default for Bip39Wordlist {
    fn default() -> Self {
        Self::english()
    }
}

impl WordlistProvider for Bip39Wordlist {
    fn len(&self) -> usize {
        self.language.word_list().len()
    }

    fn word(&self, index: usize) -> Option<&str> {
        self.language.word_list().get(index).copied()
    }

    fn index_of(&self, word: &str) -> Option<usize> {
        self.language.find_word(word).map(usize::from)
    }
}
