//!
//! The deployment error.
//!

use std::path::PathBuf;
use std::time::Duration;

///
/// The deployment error.
///
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The configuration is invalid, e.g. an unknown factory name.
    #[error("Configuration: {0}")]
    Configuration(String),
    /// A read request to the node has failed.
    #[error("Network request `{method}` failed: {message}")]
    TransientNetwork {
        /// The JSON-RPC method.
        method: &'static str,
        /// The underlying error description.
        message: String,
    },
    /// The node has refused the transaction.
    #[error("Transaction rejected: {0}")]
    SubmissionRejected(String),
    /// The transaction has been included, but its execution failed.
    #[error("Transaction {transaction_hash:?} reverted in block {}", display_block(.block_number))]
    OnChainRevert {
        /// The transaction hash.
        transaction_hash: web3::types::H256,
        /// The inclusion block.
        block_number: Option<u64>,
    },
    /// The contract has not landed at the predicted address.
    #[error("Address mismatch: predicted {expected:?}, found {}", display_found(.found))]
    AddressMismatch {
        /// The predicted address.
        expected: web3::types::Address,
        /// The actual address, if it is known.
        found: Option<web3::types::Address>,
    },
    /// The transaction has not been confirmed within the timeout.
    #[error("Transaction {transaction_hash:?} is unconfirmed after {}s", .waited.as_secs())]
    Unconfirmed {
        /// The transaction hash.
        transaction_hash: web3::types::H256,
        /// The time spent waiting.
        waited: Duration,
    },
    /// The registry file cannot be read or written.
    #[error("Registry {path:?}: {error}")]
    Registry {
        /// The underlying IO error.
        error: std::io::Error,
        /// The registry file path.
        path: PathBuf,
    },
    /// The registry file is not a valid JSON object.
    #[error("Registry {path:?} parsing: {error}")]
    RegistryParsing {
        /// The underlying JSON error.
        error: serde_json::Error,
        /// The registry file path.
        path: PathBuf,
    },
}

impl Error {
    ///
    /// A shortcut constructor.
    ///
    pub fn configuration<S>(message: S) -> Self
    where
        S: ToString,
    {
        Self::Configuration(message.to_string())
    }

    ///
    /// A shortcut constructor.
    ///
    pub fn transient<S>(method: &'static str, message: S) -> Self
    where
        S: ToString,
    {
        Self::TransientNetwork {
            method,
            message: message.to_string(),
        }
    }

    ///
    /// Whether the whole run can be repeated from the prediction step.
    ///
    /// Probing reconciles any transaction that has landed despite a reported failure.
    ///
    pub fn is_retry_safe(&self) -> bool {
        matches!(
            self,
            Self::TransientNetwork { .. } | Self::SubmissionRejected(..) | Self::Unconfirmed { .. }
        )
    }
}

fn display_block(block_number: &Option<u64>) -> String {
    block_number
        .map(|number| number.to_string())
        .unwrap_or_else(|| "<pending>".to_owned())
}

fn display_found(found: &Option<web3::types::Address>) -> String {
    found
        .map(|address| format!("{address:?}"))
        .unwrap_or_else(|| "no code at the predicted address".to_owned())
}
