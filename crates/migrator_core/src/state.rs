use std::path::PathBuf;

/// Where the interactive profile-confirmation flow currently stands.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ConfirmState {
    /// Waiting for a usable profile directory from the operator.
    #[default]
    AwaitingProfile,
    /// A browser is up with `profile`; waiting for the operator's verdict.
    AwaitingConfirmation { profile: PathBuf },
    /// The operator confirmed the loaded account.
    Confirmed { profile: PathBuf },
    /// The operator interrupted the flow; the program must stop cleanly.
    Aborted,
}
