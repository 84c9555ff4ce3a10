//! Error types for wasm-cfx

use thiserror::Error;
use wasm_bindgen::prelude::*;

/// Main error type for base32 address operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CfxAddressError {
    /// Input is neither a base32 address nor a hex address
    #[error("Invalid address: {0}")]
    InvalidAddress(String),
    /// Wrong field count, mixed case or wrong payload length
    #[error("Malformed base32 address: {0}")]
    MalformedEncodedAddress(String),
    /// Character outside the alphabet or non-zero padding bits
    #[error("Malformed base32 data: {0}")]
    MalformedBase32(String),
    /// Optional type field names a known type other than the derived one
    #[error("Address type field mismatch: expected type.{expected}, got {found}")]
    TypeFieldMismatch { expected: String, found: String },
    #[error("Invalid base32 address: checksum verification failed")]
    ChecksumMismatch,
    #[error("Invalid network prefix: {0}")]
    InvalidNetworkPrefix(String),
    #[error("Invalid network id: {0}")]
    InvalidNetworkId(String),
    /// Hex address is well formed but its leading nibble is not 0x0, 0x1 or 0x8
    #[error("Non-conforming hex address: {0}")]
    NonConformingRawAddress(String),
    #[error("Invalid hex address: {0}")]
    InvalidRawAddressSyntax(String),
    #[error("Invalid public key: {0}")]
    InvalidPublicKey(String),
}

impl CfxAddressError {
    /// True for the errors raised while decoding a base32 string.
    pub fn is_invalid_base32(&self) -> bool {
        matches!(
            self,
            CfxAddressError::MalformedEncodedAddress(_)
                | CfxAddressError::MalformedBase32(_)
                | CfxAddressError::TypeFieldMismatch { .. }
                | CfxAddressError::ChecksumMismatch
                | CfxAddressError::InvalidNetworkPrefix(_)
        )
    }
}

// REQUIRED: Converts to JS Error with stack trace
impl From<CfxAddressError> for JsValue {
    fn from(err: CfxAddressError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}
