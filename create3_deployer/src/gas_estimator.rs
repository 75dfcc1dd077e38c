//!
//! The deployment gas estimator.
//!

use crate::error::Error;
use crate::factory::FactoryDescriptor;
use crate::network::Network;
use crate::salt::Salt;

///
/// The deployment gas estimate.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GasEstimate {
    /// The estimated gas units of the factory call.
    pub gas_units: web3::types::U256,
    /// The current gas price in wei.
    pub gas_price: web3::types::U256,
    /// The intrinsic gas of the transaction data.
    pub calldata_cost: u64,
}

impl GasEstimate {
    /// The intrinsic gas of a zero calldata byte.
    pub const CALLDATA_ZERO_BYTE_COST: u64 = 4;

    /// The intrinsic gas of a non-zero calldata byte.
    pub const CALLDATA_NON_ZERO_BYTE_COST: u64 = 16;

    ///
    /// The expected fee in wei.
    ///
    pub fn fee(&self) -> web3::types::U256 {
        self.gas_units.saturating_mul(self.gas_price)
    }

    ///
    /// Returns the intrinsic gas of the transaction `data`.
    ///
    pub fn calldata_cost(data: &[u8]) -> u64 {
        data.iter()
            .map(|byte| {
                if *byte == 0 {
                    Self::CALLDATA_ZERO_BYTE_COST
                } else {
                    Self::CALLDATA_NON_ZERO_BYTE_COST
                }
            })
            .sum()
    }
}

impl std::fmt::Display for GasEstimate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "gas {}, calldata gas {}, gas price {} wei, fee {} wei",
            self.gas_units,
            self.calldata_cost,
            self.gas_price,
            self.fee()
        )
    }
}

///
/// The deployment gas estimator.
///
#[derive(Debug, Clone, Copy)]
pub struct GasEstimator;

impl GasEstimator {
    ///
    /// Estimates the factory call shaped by the factory calling convention.
    ///
    /// The fee data is only reported, the transaction fee fields are left to the node.
    ///
    pub async fn estimate<N>(
        network: &N,
        descriptor: &FactoryDescriptor,
        init_bytecode: &[u8],
        salt: &Salt,
        deployer: web3::types::Address,
    ) -> Result<GasEstimate, Error>
    where
        N: Network + ?Sized,
    {
        let call =
            descriptor
                .factory
                .estimation_call(descriptor.address, deployer, salt, init_bytecode);
        let gas_units = network.estimate_gas(&call).await?;
        let gas_price = network.gas_price().await?;

        Ok(GasEstimate {
            gas_units,
            gas_price,
            calldata_cost: GasEstimate::calldata_cost(call.data.as_slice()),
        })
    }
}
