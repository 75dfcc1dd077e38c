//!
//! The block explorer verification.
//!

use std::path::PathBuf;

///
/// The block explorer source verification, run after a fresh deployment.
///
/// Failures are reported, but never undo the recorded deployment.
///
#[async_trait::async_trait]
pub trait Verifier: Send + Sync {
    ///
    /// Submits the contract at `address` for verification.
    ///
    async fn verify(
        &self,
        address: web3::types::Address,
        constructor_arguments: &[u8],
    ) -> anyhow::Result<()>;
}

///
/// The verifier running an external tool, e.g. `forge verify-contract`.
///
/// The `{address}` and `{constructor_args}` argument placeholders are substituted.
/// If there is no `{address}` placeholder, the address is appended.
///
#[derive(Debug, Clone)]
pub struct CommandVerifier {
    /// The resolved executable path.
    executable: PathBuf,
    /// The argument templates.
    arguments: Vec<String>,
}

impl CommandVerifier {
    /// The address placeholder.
    pub const PLACEHOLDER_ADDRESS: &'static str = "{address}";

    /// The constructor arguments placeholder.
    pub const PLACEHOLDER_CONSTRUCTOR_ARGUMENTS: &'static str = "{constructor_args}";

    ///
    /// Parses the whitespace-separated command line, resolving the executable in `PATH`.
    ///
    pub fn new(command: &str) -> anyhow::Result<Self> {
        let mut parts = command.split_whitespace().map(|part| part.to_owned());
        let program = parts
            .next()
            .ok_or_else(|| anyhow::anyhow!("The verification command is empty"))?;
        let executable = which::which(program.as_str()).map_err(|error| {
            anyhow::anyhow!("The verification executable `{program}` not found: {error}")
        })?;

        Ok(Self {
            executable,
            arguments: parts.collect(),
        })
    }

    ///
    /// Substitutes the placeholders.
    ///
    pub fn arguments(
        &self,
        address: web3::types::Address,
        constructor_arguments: &[u8],
    ) -> Vec<String> {
        let address = crate::utils::address_to_checksum(&address);
        let constructor_arguments = format!("0x{}", hex::encode(constructor_arguments));

        let mut arguments: Vec<String> = self
            .arguments
            .iter()
            .map(|argument| {
                argument
                    .replace(Self::PLACEHOLDER_ADDRESS, address.as_str())
                    .replace(
                        Self::PLACEHOLDER_CONSTRUCTOR_ARGUMENTS,
                        constructor_arguments.as_str(),
                    )
            })
            .collect();
        if !self
            .arguments
            .iter()
            .any(|argument| argument.contains(Self::PLACEHOLDER_ADDRESS))
        {
            arguments.push(address);
        }
        arguments
    }
}

#[async_trait::async_trait]
impl Verifier for CommandVerifier {
    async fn verify(
        &self,
        address: web3::types::Address,
        constructor_arguments: &[u8],
    ) -> anyhow::Result<()> {
        let output = tokio::process::Command::new(self.executable.as_path())
            .args(self.arguments(address, constructor_arguments))
            .output()
            .await
            .map_err(|error| anyhow::anyhow!("{:?} subprocess: {}", self.executable, error))?;

        if !output.status.success() {
            anyhow::bail!(
                "{:?} error: {}",
                self.executable,
                String::from_utf8_lossy(output.stderr.as_slice())
            );
        }
        Ok(())
    }
}

///
/// Whether the network is a local development node, where there is no explorer.
///
pub fn is_local_network(name: &str, chain_id: Option<u64>) -> bool {
    const LOCAL_NETWORK_NAMES: [&str; 3] = ["hardhat", "localhost", "anvil"];
    const LOCAL_CHAIN_IDS: [u64; 2] = [31337, 1337];

    LOCAL_NETWORK_NAMES.contains(&name)
        || chain_id
            .map(|chain_id| LOCAL_CHAIN_IDS.contains(&chain_id))
            .unwrap_or_default()
}
