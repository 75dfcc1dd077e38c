//!
//! The transaction receipt.
//!

///
/// The transaction receipt, reduced to what the deployment verification needs.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    /// The inclusion block.
    pub block_number: Option<u64>,
    /// Whether the execution has succeeded.
    pub is_successful: bool,
    /// The created contract address, if the transaction was a plain CREATE.
    pub contract_address: Option<web3::types::Address>,
    /// The gas actually used.
    pub gas_used: Option<web3::types::U256>,
    /// The emitted logs.
    pub logs: Vec<ReceiptLog>,
}

///
/// The receipt log entry.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptLog {
    /// The emitting contract.
    pub address: web3::types::Address,
    /// The indexed topics.
    pub topics: Vec<web3::types::H256>,
}

impl From<web3::types::TransactionReceipt> for Receipt {
    fn from(receipt: web3::types::TransactionReceipt) -> Self {
        Self {
            block_number: receipt.block_number.map(|number| number.as_u64()),
            is_successful: receipt
                .status
                .map(|status| !status.is_zero())
                .unwrap_or(true),
            contract_address: receipt.contract_address,
            gas_used: receipt.gas_used,
            logs: receipt
                .logs
                .into_iter()
                .map(|log| ReceiptLog {
                    address: log.address,
                    topics: log.topics,
                })
                .collect(),
        }
    }
}
