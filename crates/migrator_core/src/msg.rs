use std::path::PathBuf;

/// Inputs to the profile-confirmation state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmMsg {
    /// The operator proposed a profile directory (the CLI value or a typed
    /// correction). `is_dir` is the driver's filesystem check; the machine
    /// itself never touches the disk.
    ProfileProposed { path: PathBuf, is_dir: bool },
    /// The operator answered the loaded-correctly prompt.
    Answered(String),
    /// The prompt was interrupted (Ctrl-C or closed input).
    Interrupted,
}
