//! CIP-37 checksum
//!
//! Same polymod as CashAddr: 40-bit state, five generators, initial and
//! final XOR with `1`. The input is the prefix (low 5 bits of each
//! character), a zero separator word, the payload words and eight zero
//! words reserved for the checksum. The 40-bit result is split into five
//! big-endian bytes and base32-encoded into eight characters.

use crate::base32;
use crate::error::CfxAddressError;

/// Number of characters in a rendered checksum
pub const CHECKSUM_LEN: usize = 8;

const GENERATORS: [u64; 5] = [
    0x98f2bc8e61,
    0x79b76d99e2,
    0xf33e5fb3c4,
    0xae2eabe2a8,
    0x1e4f43e470,
];

/// Compute the 8-character checksum for a prefix and a base32 payload
pub fn create_checksum(prefix: &str, payload: &str) -> Result<String, CfxAddressError> {
    let payload_words = base32::decode_to_words(payload)?;

    let mut data = expand_prefix(prefix);
    data.extend_from_slice(&payload_words);
    data.extend_from_slice(&[0u8; CHECKSUM_LEN]);

    let checksum = polymod(&data);
    Ok(base32::encode(&checksum_to_bytes(checksum)))
}

/// Recompute the checksum and compare it with `candidate`
pub fn verify_checksum(
    prefix: &str,
    payload: &str,
    candidate: &str,
) -> Result<bool, CfxAddressError> {
    let expected = create_checksum(prefix, payload)?;
    Ok(expected == candidate)
}

fn expand_prefix(prefix: &str) -> Vec<u8> {
    let mut result: Vec<u8> = prefix.bytes().map(|b| b & 0x1f).collect();
    result.push(0);
    result
}

fn checksum_to_bytes(checksum: u64) -> [u8; 5] {
    let bytes = checksum.to_be_bytes();
    let mut out = [0u8; 5];
    out.copy_from_slice(&bytes[3..]);
    out
}

fn polymod(values: &[u8]) -> u64 {
    let mut c: u64 = 1;
    for &d in values {
        let c0 = (c >> 35) as u8;
        c = ((c & 0x07ffffffff) << 5) ^ (d as u64);

        for (i, generator) in GENERATORS.iter().enumerate() {
            if (c0 & (1 << i)) != 0 {
                c ^= generator;
            }
        }
    }

    c ^ 1
}
