//!
//! The chain network boundary.
//!

#[cfg(test)]
pub mod mock;
pub mod receipt;
pub mod rpc;

use crate::error::Error;
use crate::factory::submission::Submission;

use self::receipt::Receipt;

///
/// The chain network the deployer talks to.
///
/// Every method is a single JSON-RPC round-trip.
///
#[async_trait::async_trait]
pub trait Network: Send + Sync {
    ///
    /// Whether there is live code at the `address`.
    ///
    /// A failed request is an error, never "no code".
    ///
    async fn has_code(&self, address: web3::types::Address) -> Result<bool, Error>;

    ///
    /// Performs a read-only call.
    ///
    async fn call(&self, to: web3::types::Address, data: Vec<u8>) -> Result<Vec<u8>, Error>;

    ///
    /// Estimates the gas the submission will consume.
    ///
    async fn estimate_gas(&self, submission: &Submission) -> Result<web3::types::U256, Error>;

    ///
    /// Returns the current gas price.
    ///
    async fn gas_price(&self) -> Result<web3::types::U256, Error>;

    ///
    /// Signs and broadcasts the submission, returning the transaction hash.
    ///
    async fn send_transaction(&self, submission: &Submission)
        -> Result<web3::types::H256, Error>;

    ///
    /// Returns the receipt if the transaction has been included.
    ///
    async fn transaction_receipt(
        &self,
        transaction_hash: web3::types::H256,
    ) -> Result<Option<Receipt>, Error>;
}
