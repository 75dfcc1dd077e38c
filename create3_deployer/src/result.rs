//!
//! The deployment result.
//!

///
/// The deployment result.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentResult {
    /// The logical contract name.
    pub contract_name: String,
    /// The address the contract lives at.
    pub deployed_address: web3::types::Address,
    /// The deployment transaction hash. Unset if nothing was submitted.
    pub transaction_hash: Option<web3::types::H256>,
    /// Whether the contract had already been deployed before the run.
    pub already_existed: bool,
}

impl DeploymentResult {
    ///
    /// A shortcut constructor for a contract found at the predicted address.
    ///
    pub fn existing(contract_name: String, deployed_address: web3::types::Address) -> Self {
        Self {
            contract_name,
            deployed_address,
            transaction_hash: None,
            already_existed: true,
        }
    }

    ///
    /// A shortcut constructor for a dry run which has found no code.
    ///
    pub fn predicted(contract_name: String, deployed_address: web3::types::Address) -> Self {
        Self {
            contract_name,
            deployed_address,
            transaction_hash: None,
            already_existed: false,
        }
    }

    ///
    /// A shortcut constructor for a freshly deployed contract.
    ///
    pub fn deployed(
        contract_name: String,
        deployed_address: web3::types::Address,
        transaction_hash: web3::types::H256,
    ) -> Self {
        Self {
            contract_name,
            deployed_address,
            transaction_hash: Some(transaction_hash),
            already_existed: false,
        }
    }

    ///
    /// Whether the contract has been deployed by this run.
    ///
    pub fn is_fresh(&self) -> bool {
        !self.already_existed && self.transaction_hash.is_some()
    }
}
