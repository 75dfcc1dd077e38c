//!
//! The compiled contract artifact.
//!

use std::path::Path;

use serde::Deserialize;

///
/// The contract creation code, in the Hardhat or Foundry layout.
///
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Bytecode {
    /// The Hardhat layout: a plain hexadecimal string.
    Plain(String),
    /// The Foundry layout: `{ "object": "0x..." }`.
    Object {
        /// The hexadecimal creation code.
        object: String,
    },
}

impl Bytecode {
    ///
    /// Returns the hexadecimal string.
    ///
    pub fn as_hex(&self) -> &str {
        match self {
            Self::Plain(hex) => hex.as_str(),
            Self::Object { object } => object.as_str(),
        }
    }
}

///
/// The compiled contract artifact.
///
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    /// The contract name, absent from the Foundry artifacts.
    #[serde(default)]
    pub contract_name: Option<String>,
    /// The creation code.
    pub bytecode: Bytecode,
}

impl Artifact {
    ///
    /// Reads the artifact from the file system.
    ///
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let data = std::fs::read_to_string(path)
            .map_err(|error| anyhow::anyhow!("Artifact {path:?} reading: {error}"))?;
        let artifact: Self = serde_json::from_str(data.as_str())
            .map_err(|error| anyhow::anyhow!("Artifact {path:?} parsing: {error}"))?;
        Ok(artifact)
    }

    ///
    /// Returns the creation code followed by the ABI-encoded constructor arguments.
    ///
    pub fn init_bytecode(&self, constructor_arguments: &[u8]) -> anyhow::Result<Vec<u8>> {
        let mut bytecode = crate::utils::decode_hex(self.bytecode.as_hex())
            .map_err(|error| anyhow::anyhow!("Bytecode decoding: {error}"))?;
        if bytecode.is_empty() {
            anyhow::bail!(
                "The bytecode is empty. Abstract contracts and interfaces cannot be deployed"
            );
        }
        bytecode.extend_from_slice(constructor_arguments);
        Ok(bytecode)
    }
}
