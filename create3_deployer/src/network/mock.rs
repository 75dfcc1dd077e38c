//!
//! The in-memory network simulating the factories.
//!

use std::collections::HashMap;
use std::sync::Mutex;

use crate::address_predictor::AddressPredictor;
use crate::error::Error;
use crate::factory::submission::Submission;
use crate::factory::Factory;
use crate::network::receipt::Receipt;
use crate::network::receipt::ReceiptLog;
use crate::network::Network;
use crate::salt::Salt;
use crate::utils::BYTE_LENGTH_ETH_ADDRESS;
use crate::utils::BYTE_LENGTH_FIELD;

///
/// The in-memory network simulating the factories.
///
/// Raw submissions land at the native CREATE3 address, ABI submissions land at the
/// address the prediction call answers with.
///
#[derive(Debug, Default)]
pub struct MockNetwork {
    /// The mutable chain state.
    state: Mutex<State>,
}

///
/// The mock chain state.
///
#[derive(Debug, Default)]
struct State {
    /// The deployed code.
    codes: HashMap<web3::types::Address, Vec<u8>>,
    /// The receipts of included transactions.
    receipts: HashMap<web3::types::H256, Receipt>,
    /// The address returned by the ABI factories prediction calls.
    predicted_address: Option<web3::types::Address>,
    /// Overrides the address the submitted contract lands at.
    landing_address: Option<web3::types::Address>,
    /// Overrides the receipt contract address.
    receipt_contract_address: Option<web3::types::Address>,
    /// The node rejection message.
    rejection: Option<String>,
    /// Whether the submitted transactions revert.
    revert: bool,
    /// Whether the transactions are never included.
    pending: bool,
    /// Whether every request fails.
    unreachable: bool,
    /// Whether the node reports a rejection for transactions it has actually included.
    lost_acknowledgement: bool,
    /// The number of receipt requests left to fail.
    receipt_failures: usize,
    /// Whether the receipts carry the Axelar `Deployed` event.
    deployed_event: bool,
    /// The read-only calls counter.
    calls: usize,
    /// The submitted transactions.
    sent: Vec<Submission>,
    /// The current block number.
    block_number: u64,
}

impl MockNetwork {
    /// The gas estimate returned for every submission.
    pub const GAS_ESTIMATE: u64 = 2_117_420;

    /// The gas price in wei.
    pub const GAS_PRICE: u64 = 1_000_000_000;

    ///
    /// A shortcut constructor.
    ///
    pub fn new() -> Self {
        Self::default()
    }

    ///
    /// Sets the address the ABI factories predict.
    ///
    pub fn with_predicted_address(self, address: web3::types::Address) -> Self {
        self.state.lock().expect("Sync").predicted_address = Some(address);
        self
    }

    ///
    /// Makes the submitted contract land at the `address`.
    ///
    pub fn with_landing_address(self, address: web3::types::Address) -> Self {
        self.state.lock().expect("Sync").landing_address = Some(address);
        self
    }

    ///
    /// Makes the receipts report the `address` as the created contract.
    ///
    pub fn with_receipt_contract_address(self, address: web3::types::Address) -> Self {
        self.state.lock().expect("Sync").receipt_contract_address = Some(address);
        self
    }

    ///
    /// Makes the node reject every transaction.
    ///
    pub fn with_rejection(self, message: &str) -> Self {
        self.state.lock().expect("Sync").rejection = Some(message.to_owned());
        self
    }

    ///
    /// Makes every transaction revert.
    ///
    pub fn with_revert(self) -> Self {
        self.state.lock().expect("Sync").revert = true;
        self
    }

    ///
    /// Makes every transaction stay pending forever.
    ///
    pub fn with_pending(self) -> Self {
        self.state.lock().expect("Sync").pending = true;
        self
    }

    ///
    /// Makes every request fail.
    ///
    pub fn with_unreachable(self) -> Self {
        self.state.lock().expect("Sync").unreachable = true;
        self
    }

    ///
    /// Makes the node report a rejection after including every transaction.
    ///
    pub fn with_lost_acknowledgement(self) -> Self {
        self.state.lock().expect("Sync").lost_acknowledgement = true;
        self
    }

    ///
    /// Makes the next `count` receipt requests fail.
    ///
    pub fn with_receipt_failures(self, count: usize) -> Self {
        self.state.lock().expect("Sync").receipt_failures = count;
        self
    }

    ///
    /// Makes the receipts carry the Axelar `Deployed` event with the landing address.
    ///
    pub fn with_deployed_event(self) -> Self {
        self.state.lock().expect("Sync").deployed_event = true;
        self
    }

    ///
    /// Puts the `code` at the `address`.
    ///
    pub fn with_code(self, address: web3::types::Address, code: Vec<u8>) -> Self {
        self.state.lock().expect("Sync").codes.insert(address, code);
        self
    }

    ///
    /// Returns the number of read-only calls.
    ///
    pub fn calls(&self) -> usize {
        self.state.lock().expect("Sync").calls
    }

    ///
    /// Returns the number of submitted transactions.
    ///
    pub fn sent(&self) -> usize {
        self.state.lock().expect("Sync").sent.len()
    }

    ///
    /// Returns the last submitted transaction.
    ///
    pub fn last_sent(&self) -> Option<Submission> {
        self.state.lock().expect("Sync").sent.last().cloned()
    }

    ///
    /// Fails if the network is configured as unreachable.
    ///
    fn check_reachable(state: &State, method: &'static str) -> Result<(), Error> {
        if state.unreachable {
            return Err(Error::transient(method, "connection refused"));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl Network for MockNetwork {
    async fn has_code(&self, address: web3::types::Address) -> Result<bool, Error> {
        let state = self.state.lock().expect("Sync");
        Self::check_reachable(&state, "eth_getCode")?;
        Ok(state
            .codes
            .get(&address)
            .map(|code| !code.is_empty())
            .unwrap_or_default())
    }

    async fn call(&self, _to: web3::types::Address, _data: Vec<u8>) -> Result<Vec<u8>, Error> {
        let mut state = self.state.lock().expect("Sync");
        Self::check_reachable(&state, "eth_call")?;
        state.calls += 1;
        let address = state
            .predicted_address
            .ok_or_else(|| Error::transient("eth_call", "execution reverted"))?;
        Ok(web3::ethabi::encode(&[web3::ethabi::Token::Address(
            address,
        )]))
    }

    async fn estimate_gas(&self, _submission: &Submission) -> Result<web3::types::U256, Error> {
        let state = self.state.lock().expect("Sync");
        Self::check_reachable(&state, "eth_estimateGas")?;
        Ok(web3::types::U256::from(Self::GAS_ESTIMATE))
    }

    async fn gas_price(&self) -> Result<web3::types::U256, Error> {
        let state = self.state.lock().expect("Sync");
        Self::check_reachable(&state, "eth_gasPrice")?;
        Ok(web3::types::U256::from(Self::GAS_PRICE))
    }

    async fn send_transaction(
        &self,
        submission: &Submission,
    ) -> Result<web3::types::H256, Error> {
        let mut state = self.state.lock().expect("Sync");
        Self::check_reachable(&state, "eth_sendRawTransaction")?;
        if let Some(message) = state.rejection.as_ref() {
            return Err(Error::SubmissionRejected(message.to_owned()));
        }

        let mut preimage = submission.from.as_bytes().to_vec();
        preimage.extend((state.sent.len() as u64).to_be_bytes());
        let transaction_hash = web3::types::H256(web3::signing::keccak256(preimage.as_slice()));
        state.sent.push(submission.clone());

        if state.pending {
            return Ok(transaction_hash);
        }

        state.block_number += 1;
        let is_successful = !state.revert;
        let mut logs = Vec::new();
        if is_successful {
            let landing_address = match (state.landing_address, state.predicted_address) {
                (Some(address), _) => address,
                (None, Some(address)) => address,
                (None, None) => {
                    let mut salt = [0u8; BYTE_LENGTH_FIELD];
                    salt.copy_from_slice(&submission.data[..BYTE_LENGTH_FIELD]);
                    AddressPredictor::create3_address(
                        &submission.to,
                        &submission.from,
                        &Salt(salt),
                    )
                }
            };
            state.codes.insert(landing_address, vec![0xfe]);

            if state.deployed_event {
                let mut address_topic = [0u8; BYTE_LENGTH_FIELD];
                address_topic[BYTE_LENGTH_FIELD - BYTE_LENGTH_ETH_ADDRESS..]
                    .copy_from_slice(landing_address.as_bytes());
                logs.push(ReceiptLog {
                    address: submission.to,
                    topics: vec![
                        web3::types::H256(web3::signing::keccak256(
                            Factory::AXELAR_DEPLOYED_EVENT_SIGNATURE.as_bytes(),
                        )),
                        web3::types::H256::zero(),
                        web3::types::H256::zero(),
                        web3::types::H256(address_topic),
                    ],
                });
            }
        }

        let receipt = Receipt {
            block_number: Some(state.block_number),
            is_successful,
            contract_address: state.receipt_contract_address,
            gas_used: Some(web3::types::U256::from(Self::GAS_ESTIMATE)),
            logs,
        };
        state.receipts.insert(transaction_hash, receipt);

        if state.lost_acknowledgement {
            return Err(Error::SubmissionRejected(
                "nonce too low: transaction already imported".to_owned(),
            ));
        }
        Ok(transaction_hash)
    }

    async fn transaction_receipt(
        &self,
        transaction_hash: web3::types::H256,
    ) -> Result<Option<Receipt>, Error> {
        let mut state = self.state.lock().expect("Sync");
        Self::check_reachable(&state, "eth_getTransactionReceipt")?;
        if state.receipt_failures > 0 {
            state.receipt_failures -= 1;
            return Err(Error::transient("eth_getTransactionReceipt", "timed out"));
        }
        Ok(state.receipts.get(&transaction_hash).cloned())
    }
}
