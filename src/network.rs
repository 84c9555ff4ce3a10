//! Network id <-> network prefix mapping

use crate::error::CfxAddressError;
use crate::types::NetworkId;

pub const MAINNET_PREFIX: &str = "cfx";
pub const TESTNET_PREFIX: &str = "cfxtest";
/// Prefix of every network other than mainnet and testnet, followed by the id
pub const COMMON_NET_PREFIX: &str = "net";

/// Get the address prefix of a network
pub fn encode_network_prefix(network_id: NetworkId) -> String {
    match network_id {
        NetworkId::MAINNET => MAINNET_PREFIX.to_string(),
        NetworkId::TESTNET => TESTNET_PREFIX.to_string(),
        id => format!("{}{}", COMMON_NET_PREFIX, id),
    }
}

/// Resolve a prefix (any case) to its network id
///
/// `net<id>` must be the canonical spelling: decimal digits only, no
/// leading zero, and not an id that has a named prefix. Ids are bounded by
/// `u64`; larger digit strings are rejected as an invalid prefix.
pub fn network_prefix_to_id(prefix: &str) -> Result<NetworkId, CfxAddressError> {
    let prefix = prefix.to_ascii_lowercase();
    match prefix.as_str() {
        MAINNET_PREFIX => return Ok(NetworkId::MAINNET),
        TESTNET_PREFIX => return Ok(NetworkId::TESTNET),
        _ => {}
    }

    let invalid = || CfxAddressError::InvalidNetworkPrefix(prefix.clone());

    let digits = prefix.strip_prefix(COMMON_NET_PREFIX).ok_or_else(invalid)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) || digits.starts_with('0')
    {
        return Err(invalid());
    }

    let id = digits
        .parse::<u64>()
        .ok()
        .and_then(|id| NetworkId::new(id).ok())
        .ok_or_else(invalid)?;

    if id == NetworkId::MAINNET || id == NetworkId::TESTNET {
        return Err(invalid());
    }

    Ok(id)
}
