//! CIP-37 base32 address encoding and decoding
//!
//! Format: `<prefix>[:type.<kind>]:<payload><checksum>`
//!
//! - `prefix`: `cfx`, `cfxtest` or `net<id>`
//! - `payload`: base32 of a zero version byte followed by the 20 address bytes
//! - `checksum`: 8 base32 characters over prefix and payload
//!
//! The whole string is either lowercase or uppercase. Verbose addresses carry
//! the type field and are written in uppercase.
//!
//! See: https://github.com/Conflux-Chain/CIPs/blob/master/CIPs/cip-37.md

use crate::base32;
use crate::checksum::{self, CHECKSUM_LEN};
use crate::error::CfxAddressError;
use crate::hex_address::{self, is_hex_address, parse_hex_address};
use crate::network::{self, MAINNET_PREFIX};
use crate::types::{AddressType, CodecConfig, DecodedParts, EncodeOptions, NetworkId, RawAddress};
use core::fmt;
use core::hash::{Hash, Hasher};
use core::str::FromStr;
use log::debug;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Literal that starts the optional type field
pub const TYPE_TAG: &str = "type";
pub const DELIMITER: char = ':';

const VERSION_BYTE: u8 = 0;
/// Base32 length of the version byte plus 20 address bytes
const PAYLOAD_LEN: usize = 34;

/// Encode a raw address for a network
pub fn encode(
    raw: &RawAddress,
    network_id: NetworkId,
    options: EncodeOptions,
) -> Result<String, CfxAddressError> {
    let address_type = AddressType::from_raw(raw);
    if address_type == AddressType::Invalid && !options.ignore_invalid_type {
        return Err(CfxAddressError::NonConformingRawAddress(format!(
            "The hex address should start with 0x0, 0x1 or 0x8, got {}",
            hex_address::to_hex_string(raw)
        )));
    }

    let prefix = network::encode_network_prefix(network_id);
    let payload = encode_payload(raw);
    let checksum = checksum::create_checksum(&prefix, &payload)?;

    let mut address = prefix;
    address.push(DELIMITER);
    if options.verbose {
        address.push_str(&format!("{}.{}", TYPE_TAG, address_type));
        address.push(DELIMITER);
    }
    address.push_str(&payload);
    address.push_str(&checksum);

    if options.verbose {
        address.make_ascii_uppercase();
    }
    Ok(address)
}

/// Decode and fully verify a base32 address
pub fn decode(address: &str) -> Result<DecodedParts, CfxAddressError> {
    if address != address.to_uppercase() && address != address.to_lowercase() {
        return Err(CfxAddressError::MalformedEncodedAddress(format!(
            "Base32 address must be all uppercase or all lowercase, got {}",
            address
        )));
    }
    let address = address.to_lowercase();

    let fields = split_fields(&address)?;
    let parts = decode_fields(&fields)?;

    // Unknown optional fields are ignored, a known but wrong type claim is not
    if let [_, field, _] = fields.as_slice() {
        let expected = format!("{}.{}", TYPE_TAG, parts.address_type);
        if *field != expected {
            let claims_known_type = field
                .strip_prefix(TYPE_TAG)
                .and_then(|rest| rest.strip_prefix('.'))
                .is_some_and(|kind| kind.parse::<AddressType>().is_ok());
            if claims_known_type {
                return Err(CfxAddressError::TypeFieldMismatch {
                    expected: parts.address_type.to_string(),
                    found: field.to_string(),
                });
            }
            debug!("ignoring unknown optional address field {:?}", field);
        }
    }

    let body = fields[fields.len() - 1];
    let candidate = &body[PAYLOAD_LEN..];
    let payload = encode_payload(&parts.hex_address);
    if !checksum::verify_checksum(fields[0], &payload, candidate)? {
        return Err(CfxAddressError::ChecksumMismatch);
    }

    Ok(parts)
}

/// Whether `address` is a valid base32 address
pub fn is_valid_base32(address: &str) -> bool {
    decode(address).is_ok()
}

/// Like [`is_valid_base32`] but reports why the address is invalid
pub fn validate(address: &str) -> Result<(), CfxAddressError> {
    decode(address).map(|_| ())
}

/// Whether two base32 addresses share the same raw address and network id
///
/// Case, verbosity and the type field are ignored. Invalid input compares
/// unequal.
pub fn equals(address1: &str, address2: &str) -> bool {
    match (decode(address1), decode(address2)) {
        (Ok(a), Ok(b)) => a.hex_address == b.hex_address && a.network_id == b.network_id,
        _ => false,
    }
}

/// Abbreviation of a validated base32 address, e.g. `cfxtest:aat...95j4`
///
/// Mainnet addresses keep the last 8 characters unless `compressed` is set.
pub fn shorten_base32_address(address: &str, compressed: bool) -> Result<String, CfxAddressError> {
    validate(address)?;
    Ok(shorten(address, compressed))
}

/// EVM space address mapped from a validated base32 address
pub fn calculate_mapped_evm_space_address(address: &str) -> Result<String, CfxAddressError> {
    let parts = decode(address)?;
    Ok(hex_address::mapped_evm_space_address(&parts.hex_address))
}

fn encode_payload(raw: &RawAddress) -> String {
    let mut data = Vec::with_capacity(21);
    data.push(VERSION_BYTE);
    data.extend_from_slice(raw);
    base32::encode(&data)
}

fn split_fields(address: &str) -> Result<Vec<&str>, CfxAddressError> {
    let fields: Vec<&str> = address.split(DELIMITER).collect();
    if fields.len() != 2 && fields.len() != 3 {
        return Err(CfxAddressError::MalformedEncodedAddress(format!(
            "Expected <prefix>[:<type>]:<payload>, such as \
             cfx:aaejuaaaaaaaaaaaaaaaaaaaaaaaaaaaajrwuc9jnb, got {}",
            address
        )));
    }
    Ok(fields)
}

/// Network id, raw address and type from lowercase fields, no verification
fn decode_fields(fields: &[&str]) -> Result<DecodedParts, CfxAddressError> {
    let network_id = network::network_prefix_to_id(fields[0])?;

    let body = fields[fields.len() - 1];
    if !body.is_ascii() || body.len() != PAYLOAD_LEN + CHECKSUM_LEN {
        return Err(CfxAddressError::MalformedEncodedAddress(format!(
            "Expected {} payload characters, got {}",
            PAYLOAD_LEN + CHECKSUM_LEN,
            body.len()
        )));
    }

    let bytes = base32::decode(&body[..PAYLOAD_LEN])?;
    let hex_address: RawAddress = bytes
        .get(1..)
        .and_then(|b| b.try_into().ok())
        .ok_or_else(|| {
            CfxAddressError::MalformedEncodedAddress(format!(
                "Expected 21 payload bytes, got {}",
                bytes.len()
            ))
        })?;

    Ok(DecodedParts {
        network_id,
        hex_address,
        address_type: AddressType::from_raw(&hex_address),
    })
}

fn shorten(address: &str, compressed: bool) -> String {
    let lower = address.to_ascii_lowercase();
    let fields: Vec<&str> = lower.split(DELIMITER).collect();
    let prefix = fields[0];
    let body = fields[fields.len() - 1];
    let tail = if prefix != MAINNET_PREFIX || compressed {
        4
    } else {
        8
    };
    format!(
        "{}{}{}...{}",
        prefix,
        DELIMITER,
        &body[..3.min(body.len())],
        &body[body.len().saturating_sub(tail)..]
    )
}

/// Encoder/decoder bound to a [`CodecConfig`]
#[derive(Debug, Clone, Copy, Default)]
pub struct AddressCodec {
    config: CodecConfig,
}

impl AddressCodec {
    pub fn new(config: CodecConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Explicit network id, else the configured default
    pub fn resolve_network_id(
        &self,
        network_id: Option<NetworkId>,
    ) -> Result<NetworkId, CfxAddressError> {
        network_id.or(self.config.default_network_id).ok_or_else(|| {
            CfxAddressError::InvalidNetworkId(
                "No network id given and no default network id configured".to_string(),
            )
        })
    }

    /// Encode a `0x`-prefixed hex address
    pub fn encode(
        &self,
        hex_address: &str,
        network_id: Option<NetworkId>,
        options: EncodeOptions,
    ) -> Result<Base32Address, CfxAddressError> {
        let raw = parse_hex_address(hex_address)?;
        let network_id = self.resolve_network_id(network_id)?;
        Base32Address::new(&raw, network_id, options)
    }

    /// Accept a base32 or hex address and re-encode it
    ///
    /// A base32 input keeps its own network id unless one is given or a
    /// default is configured. A hex input needs one of the two.
    pub fn normalize(
        &self,
        address: &str,
        network_id: Option<NetworkId>,
        options: EncodeOptions,
    ) -> Result<Base32Address, CfxAddressError> {
        match decode(address) {
            Ok(parts) => {
                let network_id = network_id
                    .or(self.config.default_network_id)
                    .unwrap_or(parts.network_id);
                Base32Address::new(&parts.hex_address, network_id, options)
            }
            Err(err) if is_hex_address(address) => {
                debug!("{} is not base32 ({}), encoding as hex", address, err);
                self.encode(address, network_id, options)
            }
            Err(err) => {
                debug!("rejecting address {:?}: {}", address, err);
                Err(CfxAddressError::InvalidAddress(format!(
                    "Address should be either base32 or hex, got {} ({})",
                    address, err
                )))
            }
        }
    }

    /// The all-zero address of a network
    pub fn zero_address(
        &self,
        network_id: Option<NetworkId>,
        verbose: bool,
    ) -> Result<Base32Address, CfxAddressError> {
        let network_id = self.resolve_network_id(network_id)?;
        Base32Address::new(&[0u8; 20], network_id, EncodeOptions::verbose(verbose))
    }

    /// Address of an uncompressed secp256k1 public key
    pub fn from_public_key(
        &self,
        public_key: &[u8],
        network_id: Option<NetworkId>,
        verbose: bool,
    ) -> Result<Base32Address, CfxAddressError> {
        let raw = hex_address::public_key_to_raw_address(public_key)?;
        let network_id = self.resolve_network_id(network_id)?;
        Base32Address::new(&raw, network_id, EncodeOptions::verbose(verbose))
    }
}

/// A verified base32 address
///
/// Equality and hashing use the raw address and network id, so the verbose
/// and plain spellings of one address are equal.
#[derive(Debug, Clone)]
pub struct Base32Address {
    text: String,
    parts: DecodedParts,
}

impl Base32Address {
    /// Encode a raw address
    pub fn new(
        raw: &RawAddress,
        network_id: NetworkId,
        options: EncodeOptions,
    ) -> Result<Self, CfxAddressError> {
        let text = encode(raw, network_id, options)?;
        Ok(Self {
            text,
            parts: DecodedParts {
                network_id,
                hex_address: *raw,
                address_type: AddressType::from_raw(raw),
            },
        })
    }

    /// Wrap text that is already known to be a valid base32 address
    ///
    /// Skips the case, type field and checksum checks. Only the structure
    /// needed to derive the parts is parsed. Prefer [`FromStr`] unless the
    /// text comes from a source that already verified it.
    pub fn from_trusted(text: impl Into<String>) -> Result<Self, CfxAddressError> {
        let text = text.into();
        let lower = text.to_ascii_lowercase();
        let parts = decode_fields(&split_fields(&lower)?)?;
        Ok(Self { text, parts })
    }

    /// The underlying text
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_string(self) -> String {
        self.text
    }

    pub fn parts(&self) -> &DecodedParts {
        &self.parts
    }

    pub fn network_id(&self) -> NetworkId {
        self.parts.network_id
    }

    pub fn raw_address(&self) -> &RawAddress {
        &self.parts.hex_address
    }

    /// `0x`-prefixed lowercase hex address
    pub fn hex_address(&self) -> String {
        hex_address::to_hex_string(&self.parts.hex_address)
    }

    pub fn address_type(&self) -> AddressType {
        self.parts.address_type
    }

    /// Hex address in EIP-55 checksum casing
    pub fn eth_checksum_address(&self) -> String {
        hex_address::to_checksum_address(&self.parts.hex_address)
    }

    /// Same address in verbose form, e.g. `CFXTEST:TYPE.USER:AATP...`
    pub fn verbose_address(&self) -> Result<Base32Address, CfxAddressError> {
        let options = EncodeOptions {
            verbose: true,
            ignore_invalid_type: true,
        };
        Base32Address::new(&self.parts.hex_address, self.parts.network_id, options)
    }

    pub fn abbr(&self) -> String {
        shorten(&self.text, false)
    }

    /// Same as [`Base32Address::abbr`] except mainnet keeps 4 trailing characters
    pub fn compressed_abbr(&self) -> String {
        shorten(&self.text, true)
    }

    /// Account mapped into the EVM space (CIP-90)
    pub fn mapped_evm_space_address(&self) -> String {
        hex_address::mapped_evm_space_address(&self.parts.hex_address)
    }
}

impl PartialEq for Base32Address {
    fn eq(&self, other: &Self) -> bool {
        self.parts.hex_address == other.parts.hex_address
            && self.parts.network_id == other.parts.network_id
    }
}

impl Eq for Base32Address {}

impl Hash for Base32Address {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.parts.hex_address.hash(state);
        self.parts.network_id.hash(state);
    }
}

impl PartialEq<str> for Base32Address {
    fn eq(&self, other: &str) -> bool {
        decode(other).is_ok_and(|parts| {
            parts.hex_address == self.parts.hex_address
                && parts.network_id == self.parts.network_id
        })
    }
}

impl PartialEq<&str> for Base32Address {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl fmt::Display for Base32Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl AsRef<str> for Base32Address {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

impl FromStr for Base32Address {
    type Err = CfxAddressError;

    /// Parse a base32 address into its plain lowercase form
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = decode(s)?;
        let options = EncodeOptions {
            verbose: false,
            ignore_invalid_type: true,
        };
        Base32Address::new(&parts.hex_address, parts.network_id, options)
    }
}

impl Serialize for Base32Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.text)
    }
}

impl<'de> Deserialize<'de> for Base32Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
