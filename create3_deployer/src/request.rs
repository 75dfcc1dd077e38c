//!
//! The deployment request.
//!

use crate::salt::Salt;

///
/// The deployment request.
///
/// Consumed by a single deployment run.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentRequest {
    /// The logical contract name, used as the registry key.
    pub contract_name: String,
    /// The creation code followed by the ABI-encoded constructor arguments.
    pub init_bytecode: Vec<u8>,
    /// The deployment salt.
    pub salt: Salt,
    /// The account the factory namespaces the salt by.
    pub deployer: web3::types::Address,
}

impl DeploymentRequest {
    ///
    /// A shortcut constructor.
    ///
    pub fn new(
        contract_name: String,
        init_bytecode: Vec<u8>,
        salt: Salt,
        deployer: web3::types::Address,
    ) -> Self {
        Self {
            contract_name,
            init_bytecode,
            salt,
            deployer,
        }
    }
}
