//! Hex address helpers: syntax validation, Keccak-256 and EIP-55 casing

use crate::error::CfxAddressError;
use crate::types::RawAddress;
use sha3::{Digest, Keccak256};

pub const HEX_PREFIX: &str = "0x";

/// Whether `s` is `0x` followed by exactly 40 hex digits (any case)
pub fn is_hex_address(s: &str) -> bool {
    s.strip_prefix(HEX_PREFIX)
        .is_some_and(|body| body.len() == 40 && body.bytes().all(|b| b.is_ascii_hexdigit()))
}

/// Parse a `0x`-prefixed hex address into its raw bytes
pub fn parse_hex_address(s: &str) -> Result<RawAddress, CfxAddressError> {
    if !is_hex_address(s) {
        return Err(CfxAddressError::InvalidRawAddressSyntax(format!(
            "Expected a hex40 address, got {}",
            s
        )));
    }
    let mut raw = [0u8; 20];
    hex::decode_to_slice(&s[HEX_PREFIX.len()..], &mut raw)
        .map_err(|e| CfxAddressError::InvalidRawAddressSyntax(e.to_string()))?;
    Ok(raw)
}

/// `0x`-prefixed lowercase hex
pub fn to_hex_string(raw: &RawAddress) -> String {
    format!("{}{}", HEX_PREFIX, hex::encode(raw))
}

pub fn keccak256(bytes: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(bytes);
    let result = hasher.finalize();
    let mut out = [0u8; 32];
    out.copy_from_slice(&result);
    out
}

/// EIP-55 mixed-case checksum rendering of a raw address
pub fn to_checksum_address(raw: &RawAddress) -> String {
    let lower = hex::encode(raw);
    let digest = keccak256(lower.as_bytes());

    let mut out = String::with_capacity(42);
    out.push_str(HEX_PREFIX);

    for (i, ch) in lower.chars().enumerate() {
        let byte = digest[i / 2];
        let nibble = if i % 2 == 0 { byte >> 4 } else { byte & 0x0f };

        if ch.is_ascii_alphabetic() && nibble >= 8 {
            out.push(ch.to_ascii_uppercase());
        } else {
            out.push(ch);
        }
    }

    out
}

/// Address of the account mapped into the EVM space (CIP-90)
///
/// The last 20 bytes of `keccak256(raw)`, checksum-cased.
pub fn mapped_evm_space_address(raw: &RawAddress) -> String {
    let hash = keccak256(raw);
    let mut mapped = [0u8; 20];
    mapped.copy_from_slice(&hash[12..]);
    to_checksum_address(&mapped)
}

/// Derive a user-space raw address from an uncompressed secp256k1 public key
///
/// Accepts the 64-byte `x || y` form, or 65 bytes with a leading `0x04` tag.
pub fn public_key_to_raw_address(public_key: &[u8]) -> Result<RawAddress, CfxAddressError> {
    let key = match public_key {
        [0x04, rest @ ..] if rest.len() == 64 => rest,
        key if key.len() == 64 => key,
        key => {
            return Err(CfxAddressError::InvalidPublicKey(format!(
                "Expected 64 bytes (x || y), got {}",
                key.len()
            )))
        }
    };

    let hash = keccak256(key);
    let mut raw = [0u8; 20];
    raw.copy_from_slice(&hash[12..]);
    raw[0] = (raw[0] & 0x0f) | 0x10;
    Ok(raw)
}

/// Decode a public key given as hex (with or without `0x`)
pub fn parse_public_key(public_key: &str) -> Result<Vec<u8>, CfxAddressError> {
    let body = public_key.strip_prefix(HEX_PREFIX).unwrap_or(public_key);
    hex::decode(body).map_err(|e| CfxAddressError::InvalidPublicKey(format!("Invalid hex: {}", e)))
}

/// Convert an Ethereum EOA address to the corresponding user-space hex address
///
/// Only addresses starting with `0x1` are user accounts, so the first hex
/// digit is replaced by `1`.
pub fn eth_eoa_address_to_cfx_hex(eoa_address: &str) -> Result<String, CfxAddressError> {
    let mut raw = parse_hex_address(eoa_address)?;
    raw[0] = (raw[0] & 0x0f) | 0x10;
    Ok(to_hex_string(&raw))
}
