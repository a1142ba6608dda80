use bip32::{DerivationPath, XPrv};
use bip39::{Language, Mnemonic};
use zeroize::Zeroizing;

use crate::{MnemonicPhrase, RecoveryError};

/// Deterministic seed derivation from a checksum-valid phrase.
pub trait SeedDeriver: Send + Sync {
    fn derive_seed(&self, phrase: &MnemonicPhrase) -> Result<Zeroizing<Vec<u8>>, RecoveryError>;
}

/// Output of hierarchical derivation. The private key is optional because
/// some derivers can only produce public material.
#[derive(Default)]
pub struct DerivedKey {
    pub private_key: Option<Zeroizing<[u8; 32]>>,
}

pub trait KeyDeriver: Send + Sync {
    fn derive_key(&self, seed: &[u8], path: &DerivationPath) -> Result<DerivedKey, RecoveryError>;
}

/// PBKDF2-HMAC-SHA512 seed as defined by BIP39, with an optional passphrase.
pub struct Bip39SeedDeriver {
    language: Language,
    passphrase: Zeroizing<String>,
}

impl Bip39SeedDeriver {
    pub fn new(language: Language, passphrase: &str) -> Self {
        Self {
            language,
            passphrase: Zeroizing::new(passphrase.to_string()),
        }
    }

    pub fn english() -> Self {
        Self::new(Language::English, "")
    }
}

impl SeedDeriver for Bip39SeedDeriver {
    fn derive_seed(&self, phrase: &MnemonicPhrase) -> Result<Zeroizing<Vec<u8>>, RecoveryError> {
        let text = phrase.to_phrase();
        let mnemonic = Mnemonic::parse_in_normalized(self.language, text.as_str()).map_err(|err| {
            RecoveryError::InternalFault(format!(
                "phrase passed the checksum but seed derivation rejected it: {err}"
            ))
        })?;
        Ok(Zeroizing::new(mnemonic.to_seed(self.passphrase.as_str()).to_vec()))
    }
}

/// BIP32 secp256k1 derivation.
#[derive(Debug, Default, Clone, Copy)]
pub struct Bip32KeyDeriver;

impl KeyDeriver for Bip32KeyDeriver {
    fn derive_key(&self, seed: &[u8], path: &DerivationPath) -> Result<DerivedKey, RecoveryError> {
        let xprv = XPrv::derive_from_path(seed, path)
            .map_err(|err| RecoveryError::InternalFault(format!("key derivation failed: {err}")))?;
        Ok(DerivedKey {
            private_key: Some(Zeroizing::new(xprv.to_bytes())),
        })
    }
}
