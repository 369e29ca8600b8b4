//! Migrator core: run configuration and the profile-confirmation state machine.
mod config;
mod effect;
mod msg;
mod state;
mod update;

pub use config::{Action, RunConfig};
pub use effect::{ConfirmEffect, PromptKind};
pub use msg::ConfirmMsg;
pub use state::ConfirmState;
pub use update::update;
