//!
//! The deployment state.
//!

///
/// The deployment state machine.
///
/// `Predicting -> Probing -> {AlreadyDeployed | Estimating -> Submitting -> Confirming
/// -> Verifying -> Done}`. Any state may go to `Failed`.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// The address is being predicted.
    Predicting,
    /// The predicted address is being checked for code.
    Probing,
    /// The code is already there. Terminal.
    AlreadyDeployed,
    /// The dry run has found no code. Terminal.
    Predicted,
    /// The factory call gas is being estimated.
    Estimating,
    /// The transaction is being signed and broadcast.
    Submitting,
    /// The receipt is being awaited.
    Confirming,
    /// The actual address is being compared to the prediction.
    Verifying,
    /// The contract is deployed at the predicted address. Terminal.
    Done,
    /// The deployment has failed. Terminal.
    Failed,
}

impl State {
    ///
    /// Returns the console status label.
    ///
    pub fn label(&self) -> &'static str {
        match self {
            Self::Predicting => "Predicting",
            Self::Probing => "Probing",
            Self::AlreadyDeployed => "Existing",
            Self::Predicted => "Predicted",
            Self::Estimating => "Estimating",
            Self::Submitting => "Submitting",
            Self::Confirming => "Confirming",
            Self::Verifying => "Verifying",
            Self::Done => "Deployed",
            Self::Failed => "Failed",
        }
    }
}

impl std::fmt::Display for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
