//!
//! The deployment summary.
//!

pub mod element;

use std::sync::Arc;
use std::sync::Mutex;

use colored::Colorize;

use crate::result::DeploymentResult;

use self::element::outcome::Outcome;
use self::element::Element;

///
/// The deployment summary.
///
/// Collects one element per deployment and gates the console output.
///
#[derive(Debug)]
pub struct Summary {
    /// The summary elements.
    elements: Vec<Element>,
    /// The output verbosity.
    verbosity: bool,
    /// Whether the output is suppressed.
    quiet: bool,
    /// The deployed contracts counter.
    deployed: usize,
    /// The existing contracts counter.
    existing: usize,
    /// The predicted contracts counter.
    predicted: usize,
    /// The failed deployments counter.
    failed: usize,
}

impl Summary {
    ///
    /// A shortcut constructor.
    ///
    pub fn new(verbosity: bool, quiet: bool) -> Self {
        Self {
            elements: Vec::new(),
            verbosity,
            quiet,
            deployed: 0,
            existing: 0,
            predicted: 0,
            failed: 0,
        }
    }

    ///
    /// Whether the run has been successful.
    ///
    pub fn is_successful(&self) -> bool {
        !self
            .elements
            .iter()
            .any(|element| matches!(element.outcome, Outcome::Failed { .. }))
    }

    ///
    /// Returns the number of deployments in the summary.
    ///
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    ///
    /// Wraps data into a synchronized shared reference.
    ///
    pub fn wrap(self) -> Arc<Mutex<Self>> {
        Arc::new(Mutex::new(self))
    }

    ///
    /// Extracts the data from the synchronized shared reference.
    ///
    pub fn unwrap_arc(summary: Arc<Mutex<Self>>) -> Self {
        Arc::try_unwrap(summary)
            .expect("Last shared reference")
            .into_inner()
            .expect("Last shared reference")
    }

    ///
    /// Prints an intermediate deployment step, if verbose.
    ///
    pub fn step<S>(&self, label: &str, message: S)
    where
        S: std::fmt::Display,
    {
        if !self.verbosity || self.quiet {
            return;
        }
        println!("{:>12} {}", label.bright_green().bold(), message);
    }

    ///
    /// Prints a warning, unless quiet.
    ///
    pub fn warning<S>(&self, message: S)
    where
        S: std::fmt::Display,
    {
        if self.quiet {
            return;
        }
        println!("{:>12} {}", "Warning".bright_yellow().bold(), message);
    }

    ///
    /// Adds the outcome of a finished deployment.
    ///
    pub fn result(summary: Arc<Mutex<Self>>, result: &DeploymentResult) {
        let outcome = match result.transaction_hash {
            Some(transaction_hash) => Outcome::deployed(transaction_hash),
            None if result.already_existed => Outcome::existing(),
            None => Outcome::predicted(),
        };
        let element = Element::new(
            result.contract_name.clone(),
            Some(result.deployed_address),
            outcome,
        );
        summary.lock().expect("Sync").push_element(element);
    }

    ///
    /// Adds a failed outcome.
    ///
    pub fn failed<S>(
        summary: Arc<Mutex<Self>>,
        contract_name: String,
        error: S,
        is_retry_safe: bool,
    ) where
        S: ToString,
    {
        let element = Element::new(contract_name, None, Outcome::failed(error, is_retry_safe));
        summary.lock().expect("Sync").push_element(element);
    }

    ///
    /// Pushes an element to the summary, printing it.
    ///
    fn push_element(&mut self, element: Element) {
        if !self.quiet {
            if let Some(string) = element.print(self.verbosity) {
                println!("{string}");
            }
        }

        match element.outcome {
            Outcome::Deployed { .. } => self.deployed += 1,
            Outcome::Existing => self.existing += 1,
            Outcome::Predicted => self.predicted += 1,
            Outcome::Failed { .. } => self.failed += 1,
        }

        self.elements.push(element);
    }
}

impl std::fmt::Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.quiet {
            return Ok(());
        }

        writeln!(
            f,
            "╔═══════════════════════╡ DEPLOYMENT ╞═════════════════════════╗"
        )?;
        writeln!(
            f,
            "║                                                              ║"
        )?;
        writeln!(
            f,
            "║     {:9}                                 {:10}     ║",
            "DEPLOYED".green(),
            self.deployed.to_string().green(),
        )?;
        writeln!(
            f,
            "║     {:9}                                 {:10}     ║",
            "EXISTING".bright_black(),
            self.existing.to_string().bright_black(),
        )?;
        writeln!(
            f,
            "║     {:9}                                 {:10}     ║",
            "PREDICTED".cyan(),
            self.predicted.to_string().cyan(),
        )?;
        writeln!(
            f,
            "║     {:9}                                 {:10}     ║",
            "FAILED".bright_red(),
            self.failed.to_string().bright_red(),
        )?;
        writeln!(
            f,
            "╚══════════════════════════════════════════════════════════════╝"
        )?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::result::DeploymentResult;

    use super::Summary;

    #[test]
    fn counts_outcomes() {
        let summary = Summary::new(false, true).wrap();
        let address = web3::types::Address::repeat_byte(0x11);

        Summary::result(
            summary.clone(),
            &DeploymentResult::deployed(
                "TokenX".to_owned(),
                address,
                web3::types::H256::repeat_byte(0x01),
            ),
        );
        Summary::result(
            summary.clone(),
            &DeploymentResult::existing("TokenY".to_owned(), address),
        );
        Summary::result(
            summary.clone(),
            &DeploymentResult::predicted("TokenZ".to_owned(), address),
        );

        let summary = Summary::unwrap_arc(summary);
        assert_eq!(summary.len(), 3);
        assert_eq!(summary.deployed, 1);
        assert_eq!(summary.existing, 1);
        assert_eq!(summary.predicted, 1);
        assert!(summary.is_successful());
    }

    #[test]
    fn failure_is_unsuccessful() {
        let summary = Summary::new(false, true).wrap();
        Summary::failed(summary.clone(), "TokenX".to_owned(), "reverted", false);

        let summary = Summary::unwrap_arc(summary);
        assert!(!summary.is_successful());
        assert_eq!(summary.failed, 1);
    }
}
