//! wasm-cfx: WASM module for Conflux base32 addresses (CIP-37)
//!
//! This crate provides:
//! - Encoding 20-byte hex addresses to checksummed, network-aware base32 text
//! - Decoding and validating base32 addresses, including the optional type field
//! - Derived views: abbreviation, EIP-55 casing, mapped EVM space address
//!
//! # Architecture
//!
//! The crate follows a two-layer architecture:
//! - **Core layer** (`src/*.rs`): Pure Rust logic, no WASM dependencies
//! - **WASM layer** (`src/wasm/*.rs`): Thin wrappers with `#[wasm_bindgen]`
//!
//! # Usage from Rust
//!
//! ```rust
//! use wasm_cfx::{AddressCodec, Base32Address, CodecConfig, EncodeOptions, NetworkId};
//!
//! let codec = AddressCodec::new(CodecConfig::with_default_network(NetworkId::TESTNET));
//! let address = codec
//!     .encode("0x1ecde7223747601823f7535d7968ba98b4881e09", None, EncodeOptions::default())
//!     .unwrap();
//! assert_eq!(address.as_str(), "cfxtest:aatp533cg7d0agbd87kz48nj1mpnkca8be1rz695j4");
//!
//! let parsed: Base32Address = "CFXTEST:TYPE.USER:AATP533CG7D0AGBD87KZ48NJ1MPNKCA8BE1RZ695J4"
//!     .parse()
//!     .unwrap();
//! assert_eq!(parsed, address);
//! assert_eq!(parsed.abbr(), "cfxtest:aat...95j4");
//! ```

pub mod address;
pub mod base32;
pub mod checksum;
pub mod error;
pub mod hex_address;
pub mod network;
pub mod types;
pub mod wasm;

// Re-export main types for convenience
pub use address::{
    calculate_mapped_evm_space_address, decode, encode, equals, is_valid_base32,
    shorten_base32_address, validate, AddressCodec, Base32Address,
};
pub use error::CfxAddressError;
pub use hex_address::{eth_eoa_address_to_cfx_hex, is_hex_address};
pub use types::{AddressType, CodecConfig, DecodedParts, EncodeOptions, NetworkId, RawAddress};
pub use wasm::{AddressNamespace, WasmAddressCodec, WasmBase32Address};
