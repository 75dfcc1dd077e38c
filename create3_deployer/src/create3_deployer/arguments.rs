//!
//! The CREATE3 deployer arguments.
//!

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use clap::Parser;

///
/// The CREATE3 deployer arguments.
///
#[derive(Debug, Parser)]
#[command(about, long_about = None)]
pub struct Arguments {
    /// The logging level.
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppresses the output completely.
    #[arg(short, long)]
    pub quiet: bool,

    /// The deployment plan: a JSON array of `{ contractName, artifact, constructorArgs?, salt }`.
    #[arg(long)]
    pub plan: PathBuf,

    /// The JSON-RPC endpoint URL.
    #[arg(long, env = "RPC_URL")]
    pub rpc_url: String,

    /// The hexadecimal private key of the deploying account.
    #[arg(long, env = "DEPLOYER_PRIVATE_KEY", hide_env_values = true)]
    pub private_key: String,

    /// The network name. Block explorer verification is skipped on local networks.
    #[arg(long, default_value = "hardhat")]
    pub network: String,

    /// The CREATE3 factory: `SKYBITLite` (or `native`), `SKYBITSolady`, `ZeframLou`, `axelarnetwork`.
    #[arg(long, default_value = "SKYBITLite")]
    pub factory: String,

    /// The factory address, if it differs from the well-known one.
    #[arg(long)]
    pub factory_address: Option<String>,

    /// The workflow: `predict` only reports the addresses, `deploy` submits the transactions.
    #[arg(long, default_value = "deploy")]
    pub workflow: String,

    /// Leaves the gas limit to the node instead of estimating it beforehand.
    #[arg(long)]
    pub no_estimate_gas: bool,

    /// Verifies the fresh deployments on the block explorer.
    #[arg(long)]
    pub verify: bool,

    /// The verification command, e.g. `npx hardhat verify --network sepolia {address}`.
    /// `{address}` and `{constructor_args}` are substituted.
    #[arg(long)]
    pub verify_command: Option<String>,

    /// The deployed contracts registry path.
    #[arg(long, default_value = create3_deployer::Registry::DEFAULT_FILE_NAME)]
    pub registry: PathBuf,

    /// Fails if the registry does not exist yet.
    #[arg(long)]
    pub registry_required: bool,

    /// The confirmation timeout in seconds. Zero means waiting indefinitely.
    #[arg(long, default_value_t = 300)]
    pub confirmation_timeout: u64,

    /// The receipt polling interval in milliseconds.
    #[arg(long, default_value_t = 2000)]
    pub poll_interval: u64,
}

impl Arguments {
    ///
    /// Validates the arguments, building the deployment configuration.
    ///
    pub fn validate(&self) -> anyhow::Result<create3_deployer::Config> {
        if self.verify && self.verify_command.is_none() {
            anyhow::bail!("Block explorer verification requires `--verify-command`");
        }

        let factory = create3_deployer::Factory::from_str(self.factory.as_str())?;
        let factory_address = self
            .factory_address
            .as_deref()
            .map(|address| {
                web3::types::Address::from_str(address.trim_start_matches("0x")).map_err(
                    |error| anyhow::anyhow!("Invalid factory address `{address}`: {error}"),
                )
            })
            .transpose()?;
        let workflow = create3_deployer::Workflow::from_str(self.workflow.as_str())
            .map_err(|error| anyhow::anyhow!(error))?;

        let config = create3_deployer::Config {
            network: self.network.clone(),
            factory,
            factory_address,
            workflow,
            estimate_gas: !self.no_estimate_gas,
            verify: self.verify,
            confirmation_timeout: match self.confirmation_timeout {
                0 => None,
                seconds => Some(Duration::from_secs(seconds)),
            },
            poll_interval: Duration::from_millis(self.poll_interval),
        };
        Ok(config.validate()?)
    }

    ///
    /// Parses the hexadecimal private key.
    ///
    pub fn secret_key(&self) -> anyhow::Result<web3::signing::SecretKey> {
        let bytes = hex::decode(self.private_key.trim().trim_start_matches("0x"))
            .map_err(|error| anyhow::anyhow!("Private key decoding: {error}"))?;
        web3::signing::SecretKey::from_slice(bytes.as_slice())
            .map_err(|error| anyhow::anyhow!("Invalid private key: {error}"))
    }
}
