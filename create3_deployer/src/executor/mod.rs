//!
//! The deployment executor.
//!

pub mod state;

use std::sync::Arc;
use std::sync::Mutex;
use std::time::Instant;

use crate::address_predictor::AddressPredictor;
use crate::config::Config;
use crate::error::Error;
use crate::factory::FactoryDescriptor;
use crate::gas_estimator::GasEstimator;
use crate::network::receipt::Receipt;
use crate::network::Network;
use crate::registry::Registry;
use crate::request::DeploymentRequest;
use crate::result::DeploymentResult;
use crate::summary::Summary;

use self::state::State;

///
/// The deployment executor.
///
/// Drives a single request through the deployment state machine. Every run either
/// returns a result or fails with an error, and never submits more than one transaction.
///
pub struct DeploymentExecutor<'a, N>
where
    N: Network + ?Sized,
{
    /// The chain network.
    network: &'a N,
    /// The factory the contracts are deployed through.
    descriptor: FactoryDescriptor,
    /// The deployment configuration.
    config: Config,
    /// The deployment summary.
    summary: Arc<Mutex<Summary>>,
}

impl<'a, N> DeploymentExecutor<'a, N>
where
    N: Network + ?Sized,
{
    ///
    /// A shortcut constructor.
    ///
    pub fn new(
        network: &'a N,
        descriptor: FactoryDescriptor,
        config: Config,
        summary: Arc<Mutex<Summary>>,
    ) -> Self {
        Self {
            network,
            descriptor,
            config,
            summary,
        }
    }

    ///
    /// Returns the factory descriptor.
    ///
    pub fn descriptor(&self) -> &FactoryDescriptor {
        &self.descriptor
    }

    ///
    /// Deploys the contract, unless it already exists at the predicted address.
    ///
    pub async fn deploy(&self, request: &DeploymentRequest) -> Result<DeploymentResult, Error> {
        let mut state = State::Predicting;
        match self.run(request, &mut state).await {
            Ok(result) => Ok(result),
            Err(error) => {
                self.step(
                    State::Failed,
                    format!("`{}` while {}: {error}", request.contract_name, state),
                );
                Err(error)
            }
        }
    }

    ///
    /// Deploys the contract and records a fresh deployment in the registry.
    ///
    /// The registry is left untouched if the contract already existed or anything failed.
    ///
    pub async fn deploy_and_record(
        &self,
        request: &DeploymentRequest,
        registry: &mut Registry,
    ) -> Result<DeploymentResult, Error> {
        let result = self.deploy(request).await?;
        if result.is_fresh() {
            registry.record(result.contract_name.as_str(), result.deployed_address)?;
        }
        Ok(result)
    }

    ///
    /// Runs the state machine, keeping the current `state` for failure reports.
    ///
    async fn run(
        &self,
        request: &DeploymentRequest,
        state: &mut State,
    ) -> Result<DeploymentResult, Error> {
        self.transition(
            state,
            State::Predicting,
            format!("`{}` via {}", request.contract_name, self.descriptor),
        );
        let predicted = AddressPredictor::predict(
            self.network,
            &self.descriptor,
            request.deployer,
            &request.salt,
            request.init_bytecode.as_slice(),
        )
        .await?;

        self.transition(
            state,
            State::Probing,
            crate::utils::address_to_checksum(&predicted),
        );
        if self.network.has_code(predicted).await? {
            self.transition(
                state,
                State::AlreadyDeployed,
                format!("`{}` is already deployed", request.contract_name),
            );
            return Ok(DeploymentResult::existing(
                request.contract_name.clone(),
                predicted,
            ));
        }

        if !self.config.workflow.is_deploy_enabled() {
            self.transition(
                state,
                State::Predicted,
                format!("`{}` has not been deployed yet", request.contract_name),
            );
            return Ok(DeploymentResult::predicted(
                request.contract_name.clone(),
                predicted,
            ));
        }

        let gas = if self.config.estimate_gas {
            self.transition(state, State::Estimating, &request.contract_name);
            let estimate = GasEstimator::estimate(
                self.network,
                &self.descriptor,
                request.init_bytecode.as_slice(),
                &request.salt,
                request.deployer,
            )
            .await?;
            self.step(State::Estimating, estimate);
            Some(estimate.gas_units)
        } else {
            None
        };

        let submission = self.descriptor.factory.build_submission(
            self.descriptor.address,
            request.deployer,
            &request.salt,
            request.init_bytecode.as_slice(),
            gas,
        );
        self.transition(
            state,
            State::Submitting,
            format!("{} bytes to {:?}", submission.data.len(), submission.to),
        );
        let transaction_hash = self.network.send_transaction(&submission).await?;

        self.transition(state, State::Confirming, format!("{transaction_hash:?}"));
        let receipt = self.confirm(transaction_hash).await?;
        if !receipt.is_successful {
            return Err(Error::OnChainRevert {
                transaction_hash,
                block_number: receipt.block_number,
            });
        }

        self.transition(
            state,
            State::Verifying,
            crate::utils::address_to_checksum(&predicted),
        );
        self.verify(predicted, &receipt).await?;

        self.transition(
            state,
            State::Done,
            format!(
                "`{}` at {}, gas used {}",
                request.contract_name,
                crate::utils::address_to_checksum(&predicted),
                receipt
                    .gas_used
                    .map(|gas_used| gas_used.to_string())
                    .unwrap_or_else(|| "unknown".to_owned()),
            ),
        );
        Ok(DeploymentResult::deployed(
            request.contract_name.clone(),
            predicted,
            transaction_hash,
        ))
    }

    ///
    /// Polls for the receipt until the transaction is included or the timeout elapses.
    ///
    /// The transaction has already been broadcast, so failed polls are retried as well.
    ///
    async fn confirm(&self, transaction_hash: web3::types::H256) -> Result<Receipt, Error> {
        let started = Instant::now();
        loop {
            match self.network.transaction_receipt(transaction_hash).await {
                Ok(Some(receipt)) if receipt.block_number.is_some() => return Ok(receipt),
                Ok(_) => {}
                Err(error @ Error::TransientNetwork { .. }) => self
                    .summary
                    .lock()
                    .expect("Sync")
                    .warning(format!("Receipt of {transaction_hash:?}: {error}")),
                Err(error) => return Err(error),
            }

            let waited = started.elapsed();
            if let Some(timeout) = self.config.confirmation_timeout {
                if waited >= timeout {
                    return Err(Error::Unconfirmed {
                        transaction_hash,
                        waited,
                    });
                }
            }
            tokio::time::sleep(self.config.poll_interval).await;
        }
    }

    ///
    /// Checks that the contract has landed at the predicted address.
    ///
    /// The receipt contract address is trusted first, then the factory event.
    /// Without either, the code at the predicted address is the evidence.
    ///
    async fn verify(
        &self,
        predicted: web3::types::Address,
        receipt: &Receipt,
    ) -> Result<(), Error> {
        let found = receipt.contract_address.or_else(|| {
            self.descriptor
                .factory
                .deployed_address_from_logs(self.descriptor.address, receipt.logs.as_slice())
        });

        match found {
            Some(found) if found == predicted => Ok(()),
            Some(found) => Err(Error::AddressMismatch {
                expected: predicted,
                found: Some(found),
            }),
            None => {
                if self.network.has_code(predicted).await? {
                    Ok(())
                } else {
                    Err(Error::AddressMismatch {
                        expected: predicted,
                        found: None,
                    })
                }
            }
        }
    }

    ///
    /// Moves to the `next` state, printing the step.
    ///
    fn transition<S>(&self, state: &mut State, next: State, message: S)
    where
        S: std::fmt::Display,
    {
        *state = next;
        self.step(next, message);
    }

    ///
    /// Prints the step.
    ///
    fn step<S>(&self, state: State, message: S)
    where
        S: std::fmt::Display,
    {
        self.summary
            .lock()
            .expect("Sync")
            .step(state.label(), message);
    }
}
