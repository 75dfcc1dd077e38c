//!
//! The deployment summary element outcome.
//!

///
/// The deployment summary element outcome.
///
#[derive(Debug)]
pub enum Outcome {
    /// The `deployed` outcome. The contract has been deployed by this run.
    Deployed {
        /// The deployment transaction hash.
        transaction_hash: web3::types::H256,
    },
    /// The `existing` outcome. The contract had been deployed before.
    Existing,
    /// The `predicted` outcome. The dry run has found no code.
    Predicted,
    /// The `failed` outcome.
    Failed {
        /// The error description.
        error: String,
        /// Whether re-running the deployment is safe.
        is_retry_safe: bool,
    },
}

impl Outcome {
    ///
    /// A shortcut constructor.
    ///
    pub fn deployed(transaction_hash: web3::types::H256) -> Self {
        Self::Deployed { transaction_hash }
    }

    ///
    /// A shortcut constructor.
    ///
    pub fn existing() -> Self {
        Self::Existing
    }

    ///
    /// A shortcut constructor.
    ///
    pub fn predicted() -> Self {
        Self::Predicted
    }

    ///
    /// A shortcut constructor.
    ///
    pub fn failed<S>(error: S, is_retry_safe: bool) -> Self
    where
        S: ToString,
    {
        Self::Failed {
            error: error.to_string(),
            is_retry_safe,
        }
    }
}
