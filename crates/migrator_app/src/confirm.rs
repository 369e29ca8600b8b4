//! Interactive profile confirmation: drives the pure state machine from
//! `migrator_core` with real prompts and a real browser session.

use std::path::{Path, PathBuf};

use anyhow::Result;
use dialoguer::Input;
use migrator_core::{update, ConfirmEffect, ConfirmMsg, ConfirmState, PromptKind};
use migrator_engine::{CdpSession, Selectors, Session};

const CONFIRM_PROMPT: &str = "Please check that your profile has loaded your account in the \
automation browser window.\nIf it loaded correctly enter y, otherwise enter the path to the \
right browser profile";

const ENTER_PROFILE_PROMPT: &str =
    "Not a valid profile directory. Enter a valid browser profile directory";

/// Run the confirmation loop against `initial_profile`.
///
/// Returns the confirmed session, or `None` when the operator interrupted
/// the flow (the browser, if any, is already closed).
pub async fn acquire_session(
    initial_profile: &Path,
    selectors: &Selectors,
) -> Result<Option<CdpSession>> {
    let mut state = ConfirmState::AwaitingProfile;
    let mut session: Option<CdpSession> = None;
    let mut pending = Some(propose(initial_profile.to_path_buf()));

    while let Some(msg) = pending.take() {
        // A non-yes answer doubles as a replacement profile path; keep it so
        // it can be re-proposed once the browser is closed.
        let replacement = match &msg {
            ConfirmMsg::Answered(reply) => Some(PathBuf::from(reply.trim())),
            _ => None,
        };

        let (next, effects) = update(state, msg);
        state = next;

        for effect in effects {
            match effect {
                ConfirmEffect::LaunchBrowser { profile } => {
                    println!("Going to load profile at {}", profile.display());
                    println!(
                        "If the browser takes more than two minutes to load, the profile path \
                         may be wrong; check the browser's profiles page."
                    );
                    session = Some(CdpSession::launch(&profile, &selectors.home_url).await?);
                }
                ConfirmEffect::CloseBrowser => {
                    if let Some(mut open) = session.take() {
                        open.close().await;
                    }
                }
                ConfirmEffect::Prompt(kind) => {
                    pending = Some(read_reply(kind));
                }
            }
        }

        match &state {
            ConfirmState::Confirmed { .. } => return Ok(session),
            ConfirmState::Aborted => {
                println!("\nStopping program");
                return Ok(None);
            }
            ConfirmState::AwaitingProfile => {
                if pending.is_none() {
                    if let Some(path) = replacement {
                        pending = Some(propose(path));
                    }
                }
            }
            ConfirmState::AwaitingConfirmation { .. } => {}
        }
    }

    // Every non-terminal state queues a follow-up message, so falling out of
    // the loop means the flow ended without a usable session.
    Ok(None)
}

fn propose(path: PathBuf) -> ConfirmMsg {
    let is_dir = path.is_dir();
    ConfirmMsg::ProfileProposed { path, is_dir }
}

/// Put one prompt in front of the operator and map the reply to a message.
/// A cancelled or unreadable prompt counts as an interrupt.
fn read_reply(kind: PromptKind) -> ConfirmMsg {
    let message = match kind {
        PromptKind::ConfirmLoaded => CONFIRM_PROMPT,
        PromptKind::EnterProfile => ENTER_PROFILE_PROMPT,
    };

    match Input::<String>::new().with_prompt(message).interact_text() {
        Ok(reply) => match kind {
            PromptKind::ConfirmLoaded => ConfirmMsg::Answered(reply),
            PromptKind::EnterProfile => propose(PathBuf::from(reply.trim())),
        },
        Err(_) => ConfirmMsg::Interrupted,
    }
}
