//!
//! The deterministic CREATE3 deployer library.
//!

pub(crate) mod address_predictor;
pub(crate) mod artifact;
pub(crate) mod config;
pub(crate) mod error;
pub(crate) mod executor;
pub(crate) mod factory;
pub(crate) mod gas_estimator;
pub(crate) mod network;
pub(crate) mod plan;
pub(crate) mod registry;
pub(crate) mod request;
pub(crate) mod result;
pub(crate) mod salt;
pub(crate) mod summary;
pub(crate) mod utils;
pub(crate) mod verifier;
pub(crate) mod workflow;

pub use self::address_predictor::AddressPredictor;
pub use self::artifact::Artifact;
pub use self::config::Config;
pub use self::error::Error;
pub use self::executor::state::State;
pub use self::executor::DeploymentExecutor;
pub use self::factory::calling_convention::CallingConvention;
pub use self::factory::Factory;
pub use self::factory::FactoryDescriptor;
pub use self::gas_estimator::GasEstimate;
pub use self::gas_estimator::GasEstimator;
pub use self::network::rpc::RpcNetwork;
pub use self::network::Network;
pub use self::plan::Plan;
pub use self::registry::Registry;
pub use self::request::DeploymentRequest;
pub use self::result::DeploymentResult;
pub use self::salt::Salt;
pub use self::summary::Summary;
pub use self::utils::address_to_checksum;
pub use self::verifier::is_local_network;
pub use self::verifier::CommandVerifier;
pub use self::verifier::Verifier;
pub use self::workflow::Workflow;

use std::sync::Arc;
use std::sync::Mutex;

///
/// The deployer, running the deployment plans.
///
pub struct Create3Deployer<'a, N>
where
    N: Network + ?Sized,
{
    /// The deployment executor.
    executor: DeploymentExecutor<'a, N>,
    /// The deployed contracts registry.
    registry: Registry,
    /// The block explorer verifier, if enabled.
    verifier: Option<Box<dyn Verifier>>,
    /// The summary.
    summary: Arc<Mutex<Summary>>,
}

impl<'a, N> Create3Deployer<'a, N>
where
    N: Network + ?Sized,
{
    ///
    /// A shortcut constructor.
    ///
    /// The factory address recorded in the registry is used, unless overridden.
    ///
    pub fn new(
        network: &'a N,
        config: Config,
        registry: Registry,
        verifier: Option<Box<dyn Verifier>>,
        summary: Arc<Mutex<Summary>>,
    ) -> Self {
        let descriptor = config.factory_descriptor(registry.factory_address());
        let verifier = verifier.filter(|_| config.verify);
        let executor = DeploymentExecutor::new(network, descriptor, config, summary.clone());

        Self {
            executor,
            registry,
            verifier,
            summary,
        }
    }

    ///
    /// Returns the factory descriptor.
    ///
    pub fn descriptor(&self) -> &FactoryDescriptor {
        self.executor.descriptor()
    }

    ///
    /// Deploys the plan entries in order, stopping at the first failure.
    ///
    /// The outcomes are collected in the summary.
    ///
    pub async fn run(&mut self, plan: &Plan, deployer: web3::types::Address) {
        for entry in plan.entries.iter() {
            let request = match entry.request(plan.base_directory.as_path(), deployer) {
                Ok(request) => request,
                Err(error) => {
                    Summary::failed(
                        self.summary.clone(),
                        entry.contract_name.clone(),
                        error,
                        false,
                    );
                    return;
                }
            };

            let result = match self
                .executor
                .deploy_and_record(&request, &mut self.registry)
                .await
            {
                Ok(result) => result,
                Err(error) => {
                    let is_retry_safe = error.is_retry_safe();
                    Summary::failed(
                        self.summary.clone(),
                        request.contract_name,
                        error,
                        is_retry_safe,
                    );
                    return;
                }
            };
            Summary::result(self.summary.clone(), &result);

            if let (true, Some(verifier)) = (result.is_fresh(), self.verifier.as_ref()) {
                let constructor_arguments = entry.constructor_arguments().unwrap_or_default();
                match verifier
                    .verify(result.deployed_address, constructor_arguments.as_slice())
                    .await
                {
                    Ok(()) => self.summary.lock().expect("Sync").step(
                        "Verified",
                        format!("`{}` on the block explorer", result.contract_name),
                    ),
                    Err(error) => self.summary.lock().expect("Sync").warning(format!(
                        "`{}` block explorer verification: {error}",
                        result.contract_name
                    )),
                }
            }
        }
    }
}
