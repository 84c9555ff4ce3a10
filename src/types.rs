//! Shared types for base32 addresses

use crate::error::CfxAddressError;
use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize, Serializer};

/// The 20 bytes of an account address as used by the chain
pub type RawAddress = [u8; 20];

/// Positive integer identifying a network
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct NetworkId(u64);

impl NetworkId {
    /// Conflux mainnet (prefix `cfx`)
    pub const MAINNET: NetworkId = NetworkId(1029);
    /// Conflux testnet (prefix `cfxtest`)
    pub const TESTNET: NetworkId = NetworkId(1);

    pub fn new(id: u64) -> Result<Self, CfxAddressError> {
        if id == 0 {
            return Err(CfxAddressError::InvalidNetworkId(
                "Expected network id to be a positive integer, got 0".to_string(),
            ));
        }
        Ok(NetworkId(id))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl TryFrom<u64> for NetworkId {
    type Error = CfxAddressError;

    fn try_from(id: u64) -> Result<Self, Self::Error> {
        NetworkId::new(id)
    }
}

impl From<NetworkId> for u64 {
    fn from(id: NetworkId) -> Self {
        id.0
    }
}

impl fmt::Display for NetworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Address type derived from the leading bits of the raw address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressType {
    /// All twenty bytes are zero
    Null,
    /// Leading nibble 0x0
    Builtin,
    /// Leading nibble 0x1
    User,
    /// Leading nibble 0x8
    Contract,
    /// Any other leading nibble
    Invalid,
}

impl AddressType {
    pub const ALL: [AddressType; 5] = [
        AddressType::Null,
        AddressType::Builtin,
        AddressType::User,
        AddressType::Contract,
        AddressType::Invalid,
    ];

    /// Classify a raw address
    pub fn from_raw(raw: &RawAddress) -> Self {
        if raw.iter().all(|b| *b == 0) {
            return AddressType::Null;
        }
        match raw[0] & 0xf0 {
            0x00 => AddressType::Builtin,
            0x10 => AddressType::User,
            0x80 => AddressType::Contract,
            _ => AddressType::Invalid,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AddressType::Null => "null",
            AddressType::Builtin => "builtin",
            AddressType::User => "user",
            AddressType::Contract => "contract",
            AddressType::Invalid => "invalid",
        }
    }
}

impl fmt::Display for AddressType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AddressType {
    type Err = CfxAddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AddressType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| CfxAddressError::InvalidAddress(format!("Unknown address type: {}", s)))
    }
}

/// Result of decoding a base32 address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecodedParts {
    pub network_id: NetworkId,
    #[serde(serialize_with = "serialize_hex_address")]
    pub hex_address: RawAddress,
    pub address_type: AddressType,
}

impl DecodedParts {
    /// `0x`-prefixed lowercase hex of the raw address
    pub fn hex_string(&self) -> String {
        format!("0x{}", hex::encode(self.hex_address))
    }
}

fn serialize_hex_address<S: Serializer>(raw: &RawAddress, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&format!("0x{}", hex::encode(raw)))
}

/// Codec configuration, bound once when the codec is created
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodecConfig {
    /// Network used when an operation omits an explicit network id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_network_id: Option<NetworkId>,
}

impl CodecConfig {
    pub fn with_default_network(network_id: NetworkId) -> Self {
        Self {
            default_network_id: Some(network_id),
        }
    }
}

/// Per-call encoding flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncodeOptions {
    /// Include the `type.<kind>` field and upper-case the result
    #[serde(default)]
    pub verbose: bool,
    /// Allow encoding addresses whose type is `invalid`
    #[serde(default)]
    pub ignore_invalid_type: bool,
}

impl EncodeOptions {
    pub fn verbose(verbose: bool) -> Self {
        Self {
            verbose,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn raw_from_hex(s: &str) -> RawAddress {
        let mut raw = [0u8; 20];
        hex::decode_to_slice(s, &mut raw).unwrap();
        raw
    }

    #[rstest]
    #[case("0000000000000000000000000000000000000000", AddressType::Null)]
    #[case("0000000000000000000000000000000000000001", AddressType::Builtin)]
    #[case("0888000000000000000000000000000000000002", AddressType::Builtin)]
    #[case("1ecde7223747601823f7535d7968ba98b4881e09", AddressType::User)]
    #[case("8000000000000000000000000000000000000000", AddressType::Contract)]
    #[case("f000000000000000000000000000000000000000", AddressType::Invalid)]
    #[case("252d251c36aec31072b90a85b95bf9435b07edb8", AddressType::Invalid)]
    fn test_address_type_from_raw(#[case] hex: &str, #[case] expected: AddressType) {
        assert_eq!(AddressType::from_raw(&raw_from_hex(hex)), expected);
    }

    #[test]
    fn test_address_type_names() {
        for t in AddressType::ALL {
            assert_eq!(t.as_str().parse::<AddressType>().unwrap(), t);
        }
        assert!("god".parse::<AddressType>().is_err());
        assert!("USER".parse::<AddressType>().is_err());
    }

    #[test]
    fn test_network_id_rejects_zero() {
        assert!(matches!(
            NetworkId::new(0),
            Err(CfxAddressError::InvalidNetworkId(_))
        ));
        assert_eq!(NetworkId::new(8888).unwrap().get(), 8888);
    }

    #[test]
    fn test_config_deserialize() {
        let config: CodecConfig = serde_json::from_str(r#"{"defaultNetworkId": 1}"#).unwrap();
        assert_eq!(config.default_network_id, Some(NetworkId::TESTNET));

        let config: CodecConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, CodecConfig::default());

        assert!(serde_json::from_str::<CodecConfig>(r#"{"defaultNetworkId": 0}"#).is_err());
    }

    #[test]
    fn test_encode_options_deserialize() {
        let options: EncodeOptions = serde_json::from_str(r#"{"verbose": true}"#).unwrap();
        assert!(options.verbose);
        assert!(!options.ignore_invalid_type);
    }

    #[test]
    fn test_decoded_parts_serialize() {
        let parts = DecodedParts {
            network_id: NetworkId::MAINNET,
            hex_address: raw_from_hex("1ecde7223747601823f7535d7968ba98b4881e09"),
            address_type: AddressType::User,
        };
        let json = serde_json::to_value(parts).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "networkId": 1029,
                "hexAddress": "0x1ecde7223747601823f7535d7968ba98b4881e09",
                "addressType": "user"
            })
        );
    }
}
