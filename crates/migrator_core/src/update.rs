use crate::{ConfirmEffect, ConfirmMsg, ConfirmState, PromptKind};

/// Pure update function: applies a message to the confirmation state and
/// returns the effects the driver must run.
pub fn update(state: ConfirmState, msg: ConfirmMsg) -> (ConfirmState, Vec<ConfirmEffect>) {
    match (state, msg) {
        (ConfirmState::AwaitingProfile, ConfirmMsg::ProfileProposed { path, is_dir }) => {
            if is_dir {
                (
                    ConfirmState::AwaitingConfirmation {
                        profile: path.clone(),
                    },
                    vec![
                        ConfirmEffect::LaunchBrowser { profile: path },
                        ConfirmEffect::Prompt(PromptKind::ConfirmLoaded),
                    ],
                )
            } else {
                (
                    ConfirmState::AwaitingProfile,
                    vec![ConfirmEffect::Prompt(PromptKind::EnterProfile)],
                )
            }
        }
        (ConfirmState::AwaitingConfirmation { profile }, ConfirmMsg::Answered(reply)) => {
            if reply.trim().eq_ignore_ascii_case("y") {
                (ConfirmState::Confirmed { profile }, Vec::new())
            } else {
                // Any other reply is a replacement profile path; the driver
                // re-proposes it once the browser is closed.
                (
                    ConfirmState::AwaitingProfile,
                    vec![ConfirmEffect::CloseBrowser],
                )
            }
        }
        (ConfirmState::AwaitingConfirmation { .. }, ConfirmMsg::Interrupted) => {
            (ConfirmState::Aborted, vec![ConfirmEffect::CloseBrowser])
        }
        (ConfirmState::AwaitingProfile, ConfirmMsg::Interrupted) => {
            (ConfirmState::Aborted, Vec::new())
        }
        // Confirmed and Aborted are terminal; late messages change nothing.
        (state, _) => (state, Vec::new()),
    }
}
