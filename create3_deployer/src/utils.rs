//!
//! The deployer utils.
//!

use sha3::Digest;

/// The EVM word byte length.
pub const BYTE_LENGTH_FIELD: usize = 32;

/// The Ethereum address byte length.
pub const BYTE_LENGTH_ETH_ADDRESS: usize = 20;

///
/// Returns a `keccak256` selector of the specified contract method.
///
pub fn selector(signature: &str) -> [u8; 4] {
    let hash_bytes = sha3::Keccak256::digest(signature.as_bytes());
    hash_bytes[0..4].try_into().expect("Always valid")
}

///
/// Takes the lowest 20 bytes of a 32-byte hash as an address.
///
pub fn hash_to_address(hash: &[u8; BYTE_LENGTH_FIELD]) -> web3::types::Address {
    web3::types::Address::from_slice(&hash[BYTE_LENGTH_FIELD - BYTE_LENGTH_ETH_ADDRESS..])
}

///
/// Decodes a hex string with an optional `0x` prefix.
///
pub fn decode_hex(value: &str) -> Result<Vec<u8>, hex::FromHexError> {
    let value = value.trim();
    hex::decode(value.strip_prefix("0x").unwrap_or(value))
}

///
/// Formats the address with the EIP-55 mixed-case checksum.
///
pub fn address_to_checksum(address: &web3::types::Address) -> String {
    let lowercase = hex::encode(address.as_bytes());
    let hash = web3::signing::keccak256(lowercase.as_bytes());

    let mut result = String::with_capacity(2 + lowercase.len());
    result.push_str("0x");
    for (index, character) in lowercase.chars().enumerate() {
        let nibble = (hash[index / 2] >> (if index % 2 == 0 { 4 } else { 0 })) & 0x0f;
        if character.is_ascii_alphabetic() && nibble >= 8 {
            result.push(character.to_ascii_uppercase());
        } else {
            result.push(character);
        }
    }
    result
}
