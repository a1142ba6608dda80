use std::sync::LazyLock;

use k256::elliptic_curve::sec1::ToEncodedPoint;
use k256::SecretKey;
use regex::Regex;
use sha3::{Digest, Keccak256};

use crate::RecoveryError;

static HEX_ADDRESS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^0x[0-9a-fA-F]{40}$").expect("static address pattern"));

/// Public-key derivation, hashing and canonical address formatting.
pub trait AddressComputer: Send + Sync {
    fn address_for(&self, private_key: &[u8]) -> Result<String, RecoveryError>;
}

/// Ethereum address: last 20 bytes of Keccak-256 over the uncompressed
/// secp256k1 public key (without the 0x04 prefix), lowercase hex.
#[derive(Debug, Default, Clone, Copy)]
pub struct KeccakAddressComputer;

impl AddressComputer for KeccakAddressComputer {
    fn address_for(&self, private_key: &[u8]) -> Result<String, RecoveryError> {
        let secret = SecretKey::from_slice(private_key).map_err(|err| {
            RecoveryError::InternalFault(format!("derived key is not a valid secp256k1 scalar: {err}"))
        })?;
        let point = secret.public_key().to_encoded_point(false);
        let digest = Keccak256::digest(&point.as_bytes()[1..]);
        Ok(format!("0x{}", hex::encode(&digest[12..])))
    }
}

pub fn is_hex_address(candidate: &str) -> bool {
    HEX_ADDRESS.is_match(candidate)
}

/// Canonical comparison form: trimmed, lowercase.
pub fn normalize_address(address: &str) -> String {
    address.trim().to_ascii_lowercase()
}

/// EIP-55 mixed-case form of a hex address, or `None` if it is not one.
pub fn to_checksum_address(address: &str) -> Option<String> {
    let normalized = normalize_address(address);
    if !is_hex_address(&normalized) {
        return None;
    }
    let body = &normalized[2..];
    let hash = Keccak256::digest(body.as_bytes());
    let mut out = String::with_capacity(42);
    out.push_str("0x");
    for (i, c) in body.chars().enumerate() {
        let nibble = (hash[i / 2] >> if i % 2 == 0 { 4 } else { 0 }) & 0x0f;
        if c.is_ascii_alphabetic() && nibble >= 8 {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c);
        }
    }
    Some(out)
}
