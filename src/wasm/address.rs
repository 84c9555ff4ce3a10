//! WASM bindings for base32 addresses
//!
//! `AddressNamespace` exposes the stateless operations, `WasmAddressCodec`
//! binds a configuration (default network id) once, and `WasmBase32Address`
//! wraps a verified address for JavaScript.

use crate::address::{self, AddressCodec, Base32Address};
use crate::error::CfxAddressError;
use crate::hex_address;
use crate::types::{CodecConfig, EncodeOptions, NetworkId};
use wasm_bindgen::prelude::*;

/// Largest integer a JS number represents exactly
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Validate a JS number as a network id
pub fn network_id_from_js(value: f64) -> Result<NetworkId, CfxAddressError> {
    if value.fract() != 0.0 || !(1.0..=MAX_SAFE_INTEGER).contains(&value) {
        return Err(CfxAddressError::InvalidNetworkId(format!(
            "Expected network id to be a positive integer, got {}",
            value
        )));
    }
    NetworkId::new(value as u64)
}

fn optional_network_id(value: Option<f64>) -> Result<Option<NetworkId>, CfxAddressError> {
    value.map(network_id_from_js).transpose()
}

fn encode_options(verbose: Option<bool>, ignore_invalid_type: Option<bool>) -> EncodeOptions {
    EncodeOptions {
        verbose: verbose.unwrap_or(false),
        ignore_invalid_type: ignore_invalid_type.unwrap_or(false),
    }
}

fn string_arg(value: &JsValue) -> Result<String, CfxAddressError> {
    value.as_string().ok_or_else(|| {
        CfxAddressError::MalformedEncodedAddress(format!(
            "Expected a string, got {:?}",
            value.js_typeof().as_string()
        ))
    })
}

/// WASM wrapper for a verified base32 address
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct WasmBase32Address {
    inner: Base32Address,
}

#[wasm_bindgen]
impl WasmBase32Address {
    /// Parse and normalize a base32 or hex address
    ///
    /// # Arguments
    /// * `address` - base32 address, or `0x` hex address when `networkId` is given
    /// * `network_id` - target network; a base32 input keeps its own when omitted
    /// * `verbose` - produce the `CFX:TYPE.USER:...` form
    #[wasm_bindgen(constructor)]
    pub fn new(
        address: &str,
        network_id: Option<f64>,
        verbose: Option<bool>,
    ) -> Result<WasmBase32Address, CfxAddressError> {
        AddressCodec::default()
            .normalize(
                address,
                optional_network_id(network_id)?,
                encode_options(verbose, None),
            )
            .map(WasmBase32Address::from_inner)
    }

    /// Wrap an address that was verified elsewhere, skipping the checksum
    #[wasm_bindgen(js_name = fromTrusted)]
    pub fn from_trusted(address: &str) -> Result<WasmBase32Address, CfxAddressError> {
        Base32Address::from_trusted(address).map(WasmBase32Address::from_inner)
    }

    #[wasm_bindgen(js_name = toString)]
    pub fn to_string_js(&self) -> String {
        self.inner.to_string()
    }

    #[wasm_bindgen(getter, js_name = networkId)]
    pub fn network_id(&self) -> f64 {
        self.inner.network_id().get() as f64
    }

    #[wasm_bindgen(getter, js_name = hexAddress)]
    pub fn hex_address(&self) -> String {
        self.inner.hex_address()
    }

    #[wasm_bindgen(getter, js_name = addressType)]
    pub fn address_type(&self) -> String {
        self.inner.address_type().to_string()
    }

    #[wasm_bindgen(getter, js_name = ethChecksumAddress)]
    pub fn eth_checksum_address(&self) -> String {
        self.inner.eth_checksum_address()
    }

    #[wasm_bindgen(js_name = verboseAddress)]
    pub fn verbose_address(&self) -> Result<String, CfxAddressError> {
        self.inner.verbose_address().map(Base32Address::into_string)
    }

    #[wasm_bindgen(getter)]
    pub fn abbr(&self) -> String {
        self.inner.abbr()
    }

    #[wasm_bindgen(getter, js_name = compressedAbbr)]
    pub fn compressed_abbr(&self) -> String {
        self.inner.compressed_abbr()
    }

    #[wasm_bindgen(getter, js_name = mappedEvmSpaceAddress)]
    pub fn mapped_evm_space_address(&self) -> String {
        self.inner.mapped_evm_space_address()
    }

    /// Same hex address and network id; case and type field are ignored
    #[wasm_bindgen]
    pub fn equals(&self, other: JsValue) -> bool {
        other.as_string().is_some_and(|s| self.inner == s.as_str())
    }
}

impl WasmBase32Address {
    pub fn from_inner(inner: Base32Address) -> Self {
        WasmBase32Address { inner }
    }

    pub fn inner(&self) -> &Base32Address {
        &self.inner
    }
}

/// Codec with a default network id bound at construction
#[wasm_bindgen]
pub struct WasmAddressCodec {
    inner: AddressCodec,
}

#[wasm_bindgen]
impl WasmAddressCodec {
    /// Create a codec from an optional config object
    ///
    /// # Example Config
    /// ```json
    /// { "defaultNetworkId": 1 }
    /// ```
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<WasmAddressCodec, JsValue> {
        let config: CodecConfig = if config.is_undefined() || config.is_null() {
            CodecConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|e| JsValue::from_str(&format!("Invalid config: {}", e)))?
        };
        Ok(WasmAddressCodec {
            inner: AddressCodec::new(config),
        })
    }

    #[wasm_bindgen(getter, js_name = defaultNetworkId)]
    pub fn default_network_id(&self) -> Option<f64> {
        self.inner
            .config()
            .default_network_id
            .map(|id| id.get() as f64)
    }

    /// Encode a hex address, falling back to the default network id
    #[wasm_bindgen]
    pub fn encode(
        &self,
        hex_address: &str,
        network_id: Option<f64>,
        verbose: Option<bool>,
        ignore_invalid_type: Option<bool>,
    ) -> Result<WasmBase32Address, CfxAddressError> {
        self.inner
            .encode(
                hex_address,
                optional_network_id(network_id)?,
                encode_options(verbose, ignore_invalid_type),
            )
            .map(WasmBase32Address::from_inner)
    }

    /// Parse a base32 or hex address, re-encoding it with the given options
    #[wasm_bindgen]
    pub fn normalize(
        &self,
        address: &str,
        network_id: Option<f64>,
        verbose: Option<bool>,
        ignore_invalid_type: Option<bool>,
    ) -> Result<WasmBase32Address, CfxAddressError> {
        self.inner
            .normalize(
                address,
                optional_network_id(network_id)?,
                encode_options(verbose, ignore_invalid_type),
            )
            .map(WasmBase32Address::from_inner)
    }

    #[wasm_bindgen(js_name = zeroAddress)]
    pub fn zero_address(
        &self,
        network_id: Option<f64>,
        verbose: Option<bool>,
    ) -> Result<WasmBase32Address, CfxAddressError> {
        self.inner
            .zero_address(optional_network_id(network_id)?, verbose.unwrap_or(false))
            .map(WasmBase32Address::from_inner)
    }

    /// Address of an uncompressed secp256k1 public key given as hex
    #[wasm_bindgen(js_name = fromPublicKey)]
    pub fn from_public_key(
        &self,
        public_key: &str,
        network_id: Option<f64>,
        verbose: Option<bool>,
    ) -> Result<WasmBase32Address, CfxAddressError> {
        let public_key = hex_address::parse_public_key(public_key)?;
        self.inner
            .from_public_key(
                &public_key,
                optional_network_id(network_id)?,
                verbose.unwrap_or(false),
            )
            .map(WasmBase32Address::from_inner)
    }
}

/// Namespace for stateless address operations
#[wasm_bindgen]
pub struct AddressNamespace;

#[wasm_bindgen]
impl AddressNamespace {
    /// Decode a base32 address
    ///
    /// # Returns
    /// `{ networkId, hexAddress, addressType }`
    #[wasm_bindgen]
    pub fn decode(value: JsValue) -> Result<JsValue, JsValue> {
        let text = string_arg(&value)?;
        let parts = address::decode(&text)?;
        serde_wasm_bindgen::to_value(&parts)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }

    #[wasm_bindgen(js_name = isValidBase32)]
    pub fn is_valid_base32(value: JsValue) -> bool {
        value
            .as_string()
            .is_some_and(|s| address::is_valid_base32(&s))
    }

    /// Throws with the reason when the address is invalid
    #[wasm_bindgen]
    pub fn validate(value: JsValue) -> Result<bool, CfxAddressError> {
        address::validate(&string_arg(&value)?)?;
        Ok(true)
    }

    /// Non-string arguments compare unequal
    #[wasm_bindgen]
    pub fn equals(address1: JsValue, address2: JsValue) -> bool {
        match (address1.as_string(), address2.as_string()) {
            (Some(a), Some(b)) => address::equals(&a, &b),
            _ => false,
        }
    }

    #[wasm_bindgen(js_name = shortenBase32Address)]
    pub fn shorten_base32_address(
        address: &str,
        compressed: Option<bool>,
    ) -> Result<String, CfxAddressError> {
        address::shorten_base32_address(address, compressed.unwrap_or(false))
    }

    #[wasm_bindgen(js_name = calculateMappedEvmSpaceAddress)]
    pub fn calculate_mapped_evm_space_address(address: &str) -> Result<String, CfxAddressError> {
        address::calculate_mapped_evm_space_address(address)
    }

    #[wasm_bindgen(js_name = ethEoaAddressToCfxHex)]
    pub fn eth_eoa_address_to_cfx_hex(eoa_address: &str) -> Result<String, CfxAddressError> {
        hex_address::eth_eoa_address_to_cfx_hex(eoa_address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_id_from_js() {
        assert_eq!(network_id_from_js(1.0).unwrap(), NetworkId::TESTNET);
        assert_eq!(network_id_from_js(8888.0).unwrap().get(), 8888);
        for bad in [0.0, -1.0, 1.5, f64::NAN, f64::INFINITY, 1e20] {
            assert!(
                matches!(
                    network_id_from_js(bad),
                    Err(CfxAddressError::InvalidNetworkId(_))
                ),
                "{} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_optional_network_id() {
        assert_eq!(optional_network_id(None).unwrap(), None);
        assert_eq!(
            optional_network_id(Some(1029.0)).unwrap(),
            Some(NetworkId::MAINNET)
        );
        assert!(optional_network_id(Some(0.0)).is_err());
    }

    #[test]
    fn test_encode_options_defaults() {
        assert_eq!(encode_options(None, None), EncodeOptions::default());
        assert!(encode_options(Some(true), None).verbose);
    }
}
