//!
//! The deployment configuration.
//!

use std::time::Duration;

use crate::error::Error;
use crate::factory::Factory;
use crate::factory::FactoryDescriptor;
use crate::workflow::Workflow;

///
/// The deployment configuration, threaded into the executor by value.
///
#[derive(Debug, Clone)]
pub struct Config {
    /// The network name, e.g. `sepolia`.
    pub network: String,
    /// The factory variant.
    pub factory: Factory,
    /// The factory address override.
    pub factory_address: Option<web3::types::Address>,
    /// The workflow to run.
    pub workflow: Workflow,
    /// Whether to estimate gas before submitting.
    pub estimate_gas: bool,
    /// Whether to verify the fresh deployments on the block explorer.
    pub verify: bool,
    /// The confirmation timeout. Unset means waiting indefinitely.
    pub confirmation_timeout: Option<Duration>,
    /// The receipt polling interval.
    pub poll_interval: Duration,
}

impl Config {
    /// The default confirmation timeout.
    pub const DEFAULT_CONFIRMATION_TIMEOUT: Duration = Duration::from_secs(300);

    /// The default receipt polling interval.
    pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);

    ///
    /// Resolves the factory descriptor.
    ///
    /// The explicit override comes first, then the address recorded in the registry,
    /// then the well-known address of the variant. The registry only records the
    /// native factory, so its address is ignored for the others.
    ///
    pub fn factory_descriptor(
        &self,
        recorded_address: Option<web3::types::Address>,
    ) -> FactoryDescriptor {
        let recorded_address = recorded_address.filter(|_| self.factory == Factory::SkybitLite);
        self.factory
            .descriptor(self.factory_address.or(recorded_address))
    }

    ///
    /// Checks the values which cannot be checked while parsing.
    ///
    pub fn validate(self) -> Result<Self, Error> {
        if self.network.trim().is_empty() {
            return Err(Error::configuration("The network name is empty"));
        }
        if self.poll_interval.is_zero() {
            return Err(Error::configuration("The receipt polling interval is zero"));
        }
        if let Some(timeout) = self.confirmation_timeout {
            if timeout < self.poll_interval {
                return Err(Error::configuration(format!(
                    "The confirmation timeout {}s is shorter than the polling interval {}s",
                    timeout.as_secs_f64(),
                    self.poll_interval.as_secs_f64(),
                )));
            }
        }
        Ok(self)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            network: "hardhat".to_owned(),
            factory: Factory::SkybitLite,
            factory_address: None,
            workflow: Workflow::Deploy,
            estimate_gas: true,
            verify: false,
            confirmation_timeout: Some(Self::DEFAULT_CONFIRMATION_TIMEOUT),
            poll_interval: Self::DEFAULT_POLL_INTERVAL,
        }
    }
}
