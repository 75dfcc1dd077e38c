//!
//! The JSON-RPC network implementation.
//!

use web3::signing::Key;

use crate::error::Error;
use crate::factory::submission::Submission;
use crate::network::receipt::Receipt;
use crate::network::Network;

///
/// The JSON-RPC network over HTTP, signing transactions locally.
///
pub struct RpcNetwork {
    /// The web3 client.
    web3: web3::Web3<web3::transports::Http>,
    /// The signing key.
    secret_key: web3::signing::SecretKey,
    /// The signing account address.
    address: web3::types::Address,
}

impl RpcNetwork {
    ///
    /// A shortcut constructor.
    ///
    pub fn new(url: &str, secret_key: web3::signing::SecretKey) -> Result<Self, Error> {
        let transport = web3::transports::Http::new(url)
            .map_err(|error| Error::configuration(format!("RPC URL `{url}`: {error}")))?;
        let address = web3::signing::SecretKeyRef::new(&secret_key).address();

        Ok(Self {
            web3: web3::Web3::new(transport),
            secret_key,
            address,
        })
    }

    ///
    /// Returns the signing account address.
    ///
    pub fn address(&self) -> web3::types::Address {
        self.address
    }

    ///
    /// Returns the chain ID reported by the node.
    ///
    pub async fn chain_id(&self) -> Result<u64, Error> {
        self.web3
            .eth()
            .chain_id()
            .await
            .map(|chain_id| chain_id.low_u64())
            .map_err(|error| Error::transient("eth_chainId", error))
    }

    ///
    /// Returns the signing account balance.
    ///
    pub async fn balance(&self) -> Result<web3::types::U256, Error> {
        self.web3
            .eth()
            .balance(self.address, None)
            .await
            .map_err(|error| Error::transient("eth_getBalance", error))
    }

    ///
    /// Converts the submission into a call request.
    ///
    fn call_request(submission: &Submission) -> web3::types::CallRequest {
        web3::types::CallRequest::builder()
            .from(submission.from)
            .to(submission.to)
            .data(web3::types::Bytes(submission.data.clone()))
            .build()
    }
}

#[async_trait::async_trait]
impl Network for RpcNetwork {
    async fn has_code(&self, address: web3::types::Address) -> Result<bool, Error> {
        let code = self
            .web3
            .eth()
            .code(address, None)
            .await
            .map_err(|error| Error::transient("eth_getCode", error))?;
        Ok(!code.0.is_empty())
    }

    async fn call(&self, to: web3::types::Address, data: Vec<u8>) -> Result<Vec<u8>, Error> {
        let request = web3::types::CallRequest::builder()
            .from(self.address)
            .to(to)
            .data(web3::types::Bytes(data))
            .build();
        let return_data = self
            .web3
            .eth()
            .call(request, None)
            .await
            .map_err(|error| Error::transient("eth_call", error))?;
        Ok(return_data.0)
    }

    async fn estimate_gas(&self, submission: &Submission) -> Result<web3::types::U256, Error> {
        self.web3
            .eth()
            .estimate_gas(Self::call_request(submission), None)
            .await
            .map_err(|error| Error::transient("eth_estimateGas", error))
    }

    async fn gas_price(&self) -> Result<web3::types::U256, Error> {
        self.web3
            .eth()
            .gas_price()
            .await
            .map_err(|error| Error::transient("eth_gasPrice", error))
    }

    async fn send_transaction(
        &self,
        submission: &Submission,
    ) -> Result<web3::types::H256, Error> {
        if submission.from != self.address {
            return Err(Error::configuration(format!(
                "Submission from {:?} cannot be signed by {:?}",
                submission.from, self.address
            )));
        }

        let gas = match submission.gas {
            Some(gas) => gas,
            None => self.estimate_gas(submission).await?,
        };
        let parameters = web3::types::TransactionParameters {
            to: Some(submission.to),
            data: web3::types::Bytes(submission.data.clone()),
            gas,
            ..Default::default()
        };

        let signed = self
            .web3
            .accounts()
            .sign_transaction(parameters, &self.secret_key)
            .await
            .map_err(|error| Error::SubmissionRejected(format!("Signing: {error}")))?;

        self.web3
            .eth()
            .send_raw_transaction(signed.raw_transaction)
            .await
            .map_err(|error| match error {
                web3::Error::Rpc(error) => Error::SubmissionRejected(error.message),
                error => Error::transient("eth_sendRawTransaction", error),
            })
    }

    async fn transaction_receipt(
        &self,
        transaction_hash: web3::types::H256,
    ) -> Result<Option<Receipt>, Error> {
        let receipt = self
            .web3
            .eth()
            .transaction_receipt(transaction_hash)
            .await
            .map_err(|error| Error::transient("eth_getTransactionReceipt", error))?;
        Ok(receipt.map(Receipt::from))
    }
}
