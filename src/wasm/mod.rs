//! WASM bindings for wasm-cfx
//!
//! This module contains thin wrappers with #[wasm_bindgen] that delegate
//! to the core Rust implementations.

pub mod address;

// Re-export WASM types
pub use address::{AddressNamespace, WasmAddressCodec, WasmBase32Address};
