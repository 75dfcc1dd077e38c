//!
//! The deployer workflows.
//!

use std::str::FromStr;

///
/// Describes sets of actions that the deployer is able to perform.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Workflow {
    /// Only predict and probe the addresses, without submitting anything.
    Predict,
    /// Predict, probe, and deploy the missing contracts.
    Deploy,
}

impl Workflow {
    ///
    /// Whether the workflow submits transactions.
    ///
    pub fn is_deploy_enabled(&self) -> bool {
        matches!(self, Self::Deploy)
    }
}

impl FromStr for Workflow {
    type Err = &'static str;

    fn from_str(string: &str) -> Result<Self, Self::Err> {
        match string {
            "predict" => Ok(Self::Predict),
            "deploy" => Ok(Self::Deploy),
            _ => Err("Could not parse workflow. Supported workflows: predict, deploy."),
        }
    }
}

impl std::fmt::Display for Workflow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Predict => write!(f, "predict"),
            Self::Deploy => write!(f, "deploy"),
        }
    }
}
