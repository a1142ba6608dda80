use std::sync::Arc;

use bip32::DerivationPath;

use crate::{
    AddressComputer, Bip32KeyDeriver, Bip39Checksum, Bip39SeedDeriver, Bip39Wordlist,
    ChecksumValidator, KeccakAddressComputer, KeyDeriver, MnemonicPhrase, RecoveryConfig,
    RecoveryError, SeedDeriver, WordlistProvider,
};

/// The external collaborators the search drives.
#[derive(Clone)]
pub struct Collaborators {
    pub wordlist: Arc<dyn WordlistProvider>,
    pub checksum: Arc<dyn ChecksumValidator>,
    pub seeds: Arc<dyn SeedDeriver>,
    pub keys: Arc<dyn KeyDeriver>,
    pub addresses: Arc<dyn AddressComputer>,
}

impl Collaborators {
    /// English BIP39 wordlist and checksum, BIP32 secp256k1, Ethereum addresses.
    pub fn standard(config: &RecoveryConfig) -> Self {
        let wordlist = Bip39Wordlist::english();
        Self {
            wordlist: Arc::new(wordlist),
            checksum: Arc::new(Bip39Checksum),
            seeds: Arc::new(Bip39SeedDeriver::new(wordlist.language(), &config.passphrase)),
            keys: Arc::new(Bip32KeyDeriver),
            addresses: Arc::new(KeccakAddressComputer),
        }
    }

    pub fn is_checksum_valid(&self, phrase: &MnemonicPhrase) -> bool {
        self.checksum.is_valid(phrase, self.wordlist.as_ref())
    }

    /// Seed, key at `path`, then address. A deriver that hands back no
    /// private key has broken its contract.
    pub fn derive_address(
        &self,
        phrase: &MnemonicPhrase,
        path: &DerivationPath,
    ) -> Result<String, RecoveryError> {
        let seed = self.seeds.derive_seed(phrase)?;
        let derived = self.keys.derive_key(seed.as_slice(), path)?;
        let Some(private_key) = derived.private_key else {
            return Err(RecoveryError::InternalFault(
                "Private key missing from derived key.".to_string(),
            ));
        };
        self.addresses.address_for(private_key.as_slice())
    }
}
