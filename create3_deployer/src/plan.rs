//!
//! The deployment plan.
//!

use std::path::Path;
use std::path::PathBuf;
use std::str::FromStr;

use serde::Deserialize;

use crate::artifact::Artifact;
use crate::request::DeploymentRequest;
use crate::salt::Salt;

///
/// The deployment plan entry.
///
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanEntry {
    /// The logical contract name, used as the registry key.
    pub contract_name: String,
    /// The artifact path, relative to the plan file.
    pub artifact: PathBuf,
    /// The hexadecimal ABI-encoded constructor arguments.
    #[serde(default)]
    pub constructor_args: Option<String>,
    /// The salt, either a short string or a 32-byte hexadecimal value.
    pub salt: String,
}

impl PlanEntry {
    ///
    /// Returns the decoded constructor arguments.
    ///
    pub fn constructor_arguments(&self) -> anyhow::Result<Vec<u8>> {
        match self.constructor_args.as_deref() {
            Some(arguments) => crate::utils::decode_hex(arguments).map_err(|error| {
                anyhow::anyhow!(
                    "`{}` constructor arguments decoding: {error}",
                    self.contract_name
                )
            }),
            None => Ok(vec![]),
        }
    }

    ///
    /// Loads the artifact and builds the deployment request.
    ///
    pub fn request(
        &self,
        base_directory: &Path,
        deployer: web3::types::Address,
    ) -> anyhow::Result<DeploymentRequest> {
        let salt = Salt::from_str(self.salt.as_str())
            .map_err(|error| anyhow::anyhow!("`{}` salt: {error}", self.contract_name))?;
        let artifact_path = base_directory.join(self.artifact.as_path());
        let artifact = Artifact::from_file(artifact_path.as_path())?;
        let init_bytecode = artifact
            .init_bytecode(self.constructor_arguments()?.as_slice())
            .map_err(|error| anyhow::anyhow!("`{}`: {error}", self.contract_name))?;

        Ok(DeploymentRequest::new(
            self.contract_name.clone(),
            init_bytecode,
            salt,
            deployer,
        ))
    }
}

///
/// The deployment plan, deployed in order.
///
#[derive(Debug, Clone)]
pub struct Plan {
    /// The directory the artifact paths are relative to.
    pub base_directory: PathBuf,
    /// The plan entries.
    pub entries: Vec<PlanEntry>,
}

impl Plan {
    ///
    /// Reads the plan from the file system.
    ///
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let data = std::fs::read_to_string(path)
            .map_err(|error| anyhow::anyhow!("Plan {path:?} reading: {error}"))?;
        let entries: Vec<PlanEntry> = serde_json::from_str(data.as_str())
            .map_err(|error| anyhow::anyhow!("Plan {path:?} parsing: {error}"))?;

        let mut names = std::collections::HashSet::with_capacity(entries.len());
        for entry in entries.iter() {
            if !names.insert(entry.contract_name.as_str()) {
                anyhow::bail!("Plan {path:?}: duplicate contract `{}`", entry.contract_name);
            }
        }

        Ok(Self {
            base_directory: path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_default(),
            entries,
        })
    }
}
