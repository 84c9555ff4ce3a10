//! Base32 word codec used by CIP-37 addresses
//!
//! Converts between bytes, 5-bit words and the 32-character alphabet. The
//! alphabet leaves out `i`, `l`, `o` and `q`. No padding character is used:
//! a trailing partial group is zero-filled on the low bits when encoding and
//! must be zero when decoding.
//!
//! See: https://github.com/Conflux-Chain/CIPs/blob/master/CIPs/cip-37.md

use crate::error::CfxAddressError;

/// The CIP-37 alphabet, indexed by word value
pub const ALPHABET: &[u8; 32] = b"abcdefghjkmnprstuvwxyz0123456789";

const INVALID: u8 = 0xff;

/// Reverse lookup from ASCII byte to word value
const WORD_TABLE: [u8; 128] = {
    let mut table = [INVALID; 128];
    let mut i = 0;
    while i < ALPHABET.len() {
        table[ALPHABET[i] as usize] = i as u8;
        i += 1;
    }
    table
};

/// Encode bytes to a base32 string
pub fn encode(data: &[u8]) -> String {
    bytes_to_words(data)
        .into_iter()
        .map(|w| ALPHABET[w as usize] as char)
        .collect()
}

/// Decode a base32 string back to bytes
pub fn decode(s: &str) -> Result<Vec<u8>, CfxAddressError> {
    words_to_bytes(&decode_to_words(s)?)
}

/// Map each character to its 5-bit word value
pub fn decode_to_words(s: &str) -> Result<Vec<u8>, CfxAddressError> {
    s.bytes()
        .map(|c| {
            WORD_TABLE
                .get(c as usize)
                .copied()
                .filter(|w| *w != INVALID)
                .ok_or_else(|| {
                    CfxAddressError::MalformedBase32(format!(
                        "Invalid character: {:?}",
                        c as char
                    ))
                })
        })
        .collect()
}

/// Regroup bytes into big-endian 5-bit words
fn bytes_to_words(data: &[u8]) -> Vec<u8> {
    let mut acc: u32 = 0;
    let mut bits: u8 = 0;
    let mut result = Vec::with_capacity((data.len() * 8).div_ceil(5));

    for &byte in data {
        acc = (acc << 8) | (byte as u32);
        bits += 8;

        while bits >= 5 {
            bits -= 5;
            result.push(((acc >> bits) & 0x1f) as u8);
        }
    }

    if bits > 0 {
        result.push(((acc << (5 - bits)) & 0x1f) as u8);
    }

    result
}

/// Regroup 5-bit words into bytes, rejecting non-zero padding
fn words_to_bytes(words: &[u8]) -> Result<Vec<u8>, CfxAddressError> {
    let mut acc: u32 = 0;
    let mut bits: u8 = 0;
    let mut result = Vec::with_capacity(words.len() * 5 / 8);

    for &word in words {
        acc = (acc << 5) | (word as u32);
        bits += 5;

        while bits >= 8 {
            bits -= 8;
            result.push(((acc >> bits) & 0xff) as u8);
        }
    }

    if bits >= 5 || (bits > 0 && (acc & ((1 << bits) - 1)) != 0) {
        return Err(CfxAddressError::MalformedBase32(
            "Invalid padding bits".to_string(),
        ));
    }

    Ok(result)
}
