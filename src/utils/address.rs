use sha3::{Digest, Keccak256};
use thiserror::Error;

/// Reasons an address string cannot be checksummed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    #[error("expected 40 hex digits, got {0}")]
    Length(usize),
    #[error("contains non-hex characters")]
    NonHex,
    #[error("bad address checksum")]
    BadChecksum,
}

fn keccak_bytes(input: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(input);
    let result = hasher.finalize();
    let mut out = [0u8; 32];
    out.copy_from_slice(&result);
    out
}

/// Renders `address` in its EIP-55 mixed-case form.
///
/// Accepts an optional `0x` prefix followed by 40 hex digits. All-lower and
/// all-upper input is canonicalized; mixed-case input must already carry a
/// valid checksum.
pub fn to_checksum_address(address: &str) -> Result<String, AddressError> {
    let hex = address.strip_prefix("0x").unwrap_or(address);
    if hex.len() != 40 {
        return Err(AddressError::Length(hex.len()));
    }
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(AddressError::NonHex);
    }

    let lower = hex.to_ascii_lowercase();
    let hash = keccak_bytes(lower.as_bytes());

    let mut checksummed = String::with_capacity(42);
    checksummed.push_str("0x");
    for (i, c) in lower.chars().enumerate() {
        let byte = hash[i / 2];
        let nibble = if i % 2 == 0 { byte >> 4 } else { byte & 0x0f };
        if c.is_ascii_alphabetic() && nibble >= 8 {
            checksummed.push(c.to_ascii_uppercase());
        } else {
            checksummed.push(c);
        }
    }

    let has_lower = hex.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = hex.chars().any(|c| c.is_ascii_uppercase());
    if has_lower && has_upper && checksummed[2..] != *hex {
        return Err(AddressError::BadChecksum);
    }

    Ok(checksummed)
}
