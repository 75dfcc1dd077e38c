//!
//! The deployment summary element.
//!

pub mod outcome;

use colored::Colorize;

use self::outcome::Outcome;

///
/// The deployment summary element.
///
#[derive(Debug)]
pub struct Element {
    /// The logical contract name.
    pub contract_name: String,
    /// The contract address, if it has been predicted.
    pub address: Option<web3::types::Address>,
    /// The deployment outcome.
    pub outcome: Outcome,
}

impl Element {
    ///
    /// A shortcut constructor.
    ///
    pub fn new(
        contract_name: String,
        address: Option<web3::types::Address>,
        outcome: Outcome,
    ) -> Self {
        Self {
            contract_name,
            address,
            outcome,
        }
    }

    ///
    /// Prints the element.
    ///
    pub fn print(&self, verbosity: bool) -> Option<String> {
        if let Outcome::Existing = self.outcome {
            if !verbosity {
                return None;
            }
        }

        let outcome = match self.outcome {
            Outcome::Deployed { .. } => "DEPLOYED".green(),
            Outcome::Existing => "EXISTING".bright_black(),
            Outcome::Predicted => "PREDICTED".cyan(),
            Outcome::Failed { .. } => "FAILED".bright_red(),
        };

        let details = match self.outcome {
            Outcome::Deployed { transaction_hash } => {
                format!("(tx {transaction_hash:?})").bright_white().to_string()
            }
            Outcome::Failed {
                ref error,
                is_retry_safe,
            } => {
                if is_retry_safe {
                    format!("{error} (safe to re-run)")
                } else {
                    error.to_owned()
                }
            }
            _ => String::new(),
        };

        Some(format!(
            "{:>9} {:24} {:42} {}",
            outcome,
            self.contract_name,
            self.address
                .as_ref()
                .map(crate::utils::address_to_checksum)
                .unwrap_or_default()
                .bright_white(),
            details
        ))
    }
}
