use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use migrator_core::{Action, RunConfig};

/// Migrate a subscription list between accounts on a video platform.
#[derive(Debug, Parser)]
#[command(
    name = "channel-migrator",
    about = "Extract the channels a logged-in account is subscribed to into a list, \
             or subscribe the account to a list of channel links."
)]
pub struct Cli {
    /// The action to perform on the account: extract subscriptions or set them.
    #[arg(short, long, value_enum)]
    pub action: CliAction,

    /// Path to a browser profile with an actively logged-in account.
    #[arg(short, long)]
    pub profile: PathBuf,

    /// Path to output channel links to, or to take channel links from.
    #[arg(short, long)]
    pub filepath: PathBuf,

    /// Print all status messages.
    #[arg(short, long)]
    pub verbose: bool,

    /// When a set run is interrupted, save the remaining links in a .tmp
    /// file next to the input file.
    #[arg(short = 's', long = "saveprogress")]
    pub save_progress: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CliAction {
    /// Export subscribed channels into a list.
    Extract,
    /// Subscribe to every link in a list.
    Set,
}

impl From<CliAction> for Action {
    fn from(action: CliAction) -> Self {
        match action {
            CliAction::Extract => Action::Extract,
            CliAction::Set => Action::Set,
        }
    }
}

impl Cli {
    /// Validate the arguments against the filesystem and build the run
    /// configuration. Returns every guidance message when something is off,
    /// so the operator can fix all of it in one go.
    pub fn into_config(self) -> Result<RunConfig, Vec<String>> {
        let mut problems = Vec::new();

        if !self.profile.is_dir() {
            problems.push(
                "Please provide the path to your browser profile with the -p flag.\n\
                 Your profile can be found on the browser's profiles page."
                    .to_string(),
            );
        }

        match self.action {
            CliAction::Set => {
                if !self.filepath.is_file() {
                    problems.push(
                        "Please provide a file with channel links with the -f flag.".to_string(),
                    );
                }
            }
            CliAction::Extract => {
                if !output_dir(&self.filepath).is_dir() {
                    problems.push(
                        "Please provide a usable filepath location for outputting channel links \
                         with the -f flag."
                            .to_string(),
                    );
                }
            }
        }

        if problems.is_empty() {
            Ok(RunConfig {
                action: self.action.into(),
                profile: self.profile,
                filepath: self.filepath,
                verbose: self.verbose,
                save_progress: self.save_progress,
            })
        } else {
            Err(problems)
        }
    }
}

/// Directory the extract output lands in; a bare file name means the
/// current directory.
fn output_dir(filepath: &Path) -> &Path {
    match filepath.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}
