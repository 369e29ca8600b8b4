use std::path::PathBuf;

/// Which workflow a run performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Collect the subscribed-channel links into a file.
    Extract,
    /// Subscribe the logged-in account to a file of channel links.
    Set,
}

/// Immutable settings for one run, owned by the workflow for its duration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub action: Action,
    /// Browser profile directory with an actively logged-in account.
    pub profile: PathBuf,
    /// Output path (extract) or input path (set).
    pub filepath: PathBuf,
    pub verbose: bool,
    /// Checkpoint the remaining links when a set run is interrupted.
    pub save_progress: bool,
}
