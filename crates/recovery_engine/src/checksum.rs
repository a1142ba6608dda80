use sha2::{Digest, Sha256};

use crate::{MnemonicPhrase, WordlistProvider, BIP39_WORDLIST_LEN, SUPPORTED_WORD_COUNTS};

/// Validates a full-length phrase against a wordlist's checksum scheme.
pub trait ChecksumValidator: Send + Sync {
    fn is_valid(&self, phrase: &MnemonicPhrase, wordlist: &dyn WordlistProvider) -> bool;
}

/// BIP39 checksum: the last `words * 11 / 33` bits must equal the leading
/// bits of SHA-256 over the entropy. Works with any 2048-word list.
#[derive(Debug, Default, Clone, Copy)]
pub struct Bip39Checksum;

impl ChecksumValidator for Bip39Checksum {
    fn is_valid(&self, phrase: &MnemonicPhrase, wordlist: &dyn WordlistProvider) -> bool {
        if wordlist.len() != BIP39_WORDLIST_LEN || !SUPPORTED_WORD_COUNTS.contains(&phrase.len()) {
            return false;
        }

        // 24 words * 11 bits = 264 bits, the largest supported phrase.
        let mut packed = [0u8; 33];
        for (slot, word) in phrase.words().iter().enumerate() {
            let Some(index) = wordlist.index_of(word) else {
                return false;
            };
            for bit in 0..11 {
                if index & (1 << (10 - bit)) != 0 {
                    let offset = slot * 11 + bit;
                    packed[offset / 8] |= 0x80 >> (offset % 8);
                }
            }
        }

        let checksum_bits = phrase.len() * 11 / 33;
        let entropy_len = checksum_bits * 4;
        let digest = Sha256::digest(&packed[..entropy_len]);
        let mask = 0xffu8 << (8 - checksum_bits);
        digest[0] & mask == packed[entropy_len] & mask
    }
}
