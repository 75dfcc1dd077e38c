//!
//! The deployment salt.
//!

use std::str::FromStr;

use crate::error::Error;
use crate::utils::BYTE_LENGTH_FIELD;

///
/// The deployment salt.
///
/// Must stay the same across networks to reproduce the same address.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Salt(pub [u8; BYTE_LENGTH_FIELD]);

impl Salt {
    /// The maximal length of a salt given as a short string.
    pub const MAX_STRING_LENGTH: usize = BYTE_LENGTH_FIELD - 1;

    ///
    /// Encodes a short UTF-8 string into a zero-padded `bytes32`.
    ///
    /// The last byte is reserved for the terminating zero.
    ///
    pub fn from_short_string(value: &str) -> Result<Self, Error> {
        let bytes = value.as_bytes();
        if bytes.len() > Self::MAX_STRING_LENGTH {
            return Err(Error::configuration(format!(
                "Salt string `{value}` is {} bytes long, while at most {} are allowed",
                bytes.len(),
                Self::MAX_STRING_LENGTH
            )));
        }

        let mut salt = [0u8; BYTE_LENGTH_FIELD];
        salt[..bytes.len()].copy_from_slice(bytes);
        Ok(Self(salt))
    }

    ///
    /// Returns the salt bytes.
    ///
    pub fn as_bytes(&self) -> &[u8; BYTE_LENGTH_FIELD] {
        &self.0
    }
}

impl FromStr for Salt {
    type Err = Error;

    ///
    /// Parses either a `0x`-prefixed 32-byte hex value, or a short string.
    ///
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.strip_prefix("0x") {
            Some(hex_value) if hex_value.len() == BYTE_LENGTH_FIELD * 2 => {
                let bytes = hex::decode(hex_value).map_err(|error| {
                    Error::configuration(format!("Salt `{value}` is not valid hex: {error}"))
                })?;
                let mut salt = [0u8; BYTE_LENGTH_FIELD];
                salt.copy_from_slice(bytes.as_slice());
                Ok(Self(salt))
            }
            _ => Self::from_short_string(value),
        }
    }
}

impl std::fmt::Display for Salt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}
