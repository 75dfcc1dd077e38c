//!
//! The factory-shaped transaction.
//!

///
/// The transaction shaped by the factory calling convention.
///
/// The same shape is used for gas estimation and for the submission itself.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    /// The signing account.
    pub from: web3::types::Address,
    /// The factory address.
    pub to: web3::types::Address,
    /// The transaction data.
    pub data: Vec<u8>,
    /// The gas limit. Left to the node if unset.
    pub gas: Option<web3::types::U256>,
}

impl Submission {
    ///
    /// A shortcut constructor.
    ///
    pub fn new(from: web3::types::Address, to: web3::types::Address, data: Vec<u8>) -> Self {
        Self {
            from,
            to,
            data,
            gas: None,
        }
    }

    ///
    /// Sets the gas limit.
    ///
    pub fn with_gas(mut self, gas: Option<web3::types::U256>) -> Self {
        self.gas = gas;
        self
    }
}
