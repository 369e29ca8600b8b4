use std::path::{Path, PathBuf};

use thiserror::Error;

use migrator_logging::{migrator_debug, migrator_info, migrator_warn};

use crate::links::filter_valid;
use crate::selectors::Selectors;
use crate::session::{Session, SessionError};
use crate::store::{self, StoreError};

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// How one channel link was handled by the set workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkOutcome {
    /// The control read "Subscribe" and was clicked.
    Subscribed,
    /// The control read "Subscribed"; nothing to do.
    AlreadySubscribed,
    /// No subscribe control on the page; skipped, non-fatal.
    ControlMissing,
    /// A control was found but its label matched neither known text.
    LabelUnrecognized,
}

/// Progress notifications emitted while a workflow runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowEvent {
    /// One channel link was handled by the set loop.
    LinkHandled { link: String, outcome: LinkOutcome },
    /// The session became unusable; the set loop stopped early.
    SessionFailed { message: String },
    /// A snapshot of the remaining links was written.
    CheckpointSaved { path: PathBuf },
    /// One subscription link was read off the subscriptions page.
    LinkExtracted { link: String },
    /// The subscriptions page could not be opened.
    PageUnavailable,
    /// The page loaded but the subscription entries could not be read.
    EnumerationFailed,
}

/// Receives workflow events as they happen. The app prints them for the
/// operator; tests record them.
pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: WorkflowEvent);
}

/// The validated set-mode input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedLinks {
    pub links: Vec<String>,
    /// True when the links came from an in-progress checkpoint.
    pub resumed: bool,
}

/// Resolve the set-mode input: checkpoint-aware load plus link validation.
///
/// An empty result (missing lines or nothing valid) is a fatal condition
/// decided by the caller, not an error here.
pub fn load_links(input_path: &Path) -> Result<LoadedLinks, StoreError> {
    let loaded = store::load_resumable(input_path)?;
    Ok(LoadedLinks {
        links: filter_valid(loaded.lines),
        resumed: loaded.resumed,
    })
}

/// Summary of a completed extract run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExtractReport {
    pub links: Vec<String>,
    /// True when the collected links were written to the output path.
    pub wrote: bool,
}

/// Collect every subscribed-channel link and, when any were found, write
/// them to `output_path`.
///
/// Navigation and enumeration failures degrade to an empty collection; the
/// output file is only touched when at least one link was read.
pub async fn run_extract(
    session: &dyn Session,
    selectors: &Selectors,
    output_path: &Path,
    sink: &dyn ProgressSink,
) -> Result<ExtractReport, WorkflowError> {
    let mut report = ExtractReport::default();

    if let Err(err) = session.navigate(&selectors.subscriptions_url).await {
        migrator_warn!("subscriptions page unavailable: {err}");
        sink.emit(WorkflowEvent::PageUnavailable);
        return Ok(report);
    }

    match session
        .read_attr_all(&selectors.subscription_entry, &selectors.entry_link_attr)
        .await
    {
        Ok(links) => {
            for link in &links {
                sink.emit(WorkflowEvent::LinkExtracted { link: link.clone() });
            }
            report.links = links;
        }
        Err(err) => {
            migrator_warn!("could not enumerate subscriptions: {err}");
            sink.emit(WorkflowEvent::EnumerationFailed);
            return Ok(report);
        }
    }

    if report.links.is_empty() {
        return Ok(report);
    }

    store::write_lines(output_path, &report.links)?;
    report.wrote = true;
    Ok(report)
}

/// Summary of a set run.
#[derive(Debug, Default)]
pub struct SetReport {
    pub subscribed: usize,
    pub already_subscribed: usize,
    pub control_missing: usize,
    /// Links left unattempted when the session failed, in input order.
    pub remaining: Vec<String>,
    /// The session error that ended the run early, if any.
    pub failure: Option<SessionError>,
}

/// Subscribe the logged-in account to each link, in order.
///
/// Iterates an immutable snapshot and tracks remaining work by position, so
/// a checkpoint taken mid-run reflects exactly the links not yet attempted.
/// A run that finishes the whole list clears any stale checkpoint.
pub async fn run_set(
    session: &dyn Session,
    selectors: &Selectors,
    links: &[String],
    input_path: &Path,
    save_progress: bool,
    sink: &dyn ProgressSink,
) -> SetReport {
    let mut report = SetReport::default();

    for (index, link) in links.iter().enumerate() {
        match subscribe_one(session, selectors, link).await {
            Ok(outcome) => {
                match outcome {
                    LinkOutcome::Subscribed => report.subscribed += 1,
                    LinkOutcome::AlreadySubscribed => report.already_subscribed += 1,
                    LinkOutcome::ControlMissing => report.control_missing += 1,
                    LinkOutcome::LabelUnrecognized => {
                        migrator_debug!("unrecognized subscribe label on {link}");
                    }
                }
                sink.emit(WorkflowEvent::LinkHandled {
                    link: link.clone(),
                    outcome,
                });
            }
            Err(err) => {
                // The link being processed was not handled, so it stays in
                // the remaining set along with everything after it.
                report.remaining = links[index..].to_vec();
                sink.emit(WorkflowEvent::SessionFailed {
                    message: err.to_string(),
                });
                if save_progress {
                    match store::write_checkpoint(input_path, &report.remaining) {
                        Ok(()) => sink.emit(WorkflowEvent::CheckpointSaved {
                            path: store::checkpoint_path(input_path),
                        }),
                        Err(write_err) => {
                            migrator_warn!("could not save checkpoint: {write_err}");
                        }
                    }
                }
                report.failure = Some(err);
                return report;
            }
        }
    }

    migrator_info!(
        "set run complete: {} subscribed, {} already subscribed, {} missing",
        report.subscribed,
        report.already_subscribed,
        report.control_missing
    );

    // A finished run supersedes any earlier interrupted one.
    if let Err(err) = store::clear_checkpoint(input_path) {
        migrator_debug!("could not remove stale checkpoint: {err}");
    }

    report
}

/// Handle a single channel page. `ElementNotFound` anywhere in the lookup
/// is the tolerated per-link outcome; other session errors propagate.
async fn subscribe_one(
    session: &dyn Session,
    selectors: &Selectors,
    link: &str,
) -> Result<LinkOutcome, SessionError> {
    session.navigate(link).await?;

    let label = match session.read_text(&selectors.subscribe_label).await {
        Ok(label) => label,
        Err(err) if err.is_recoverable() => return Ok(LinkOutcome::ControlMissing),
        Err(err) => return Err(err),
    };

    if label == selectors.label_unsubscribed {
        match session.click(&selectors.subscribe_button).await {
            Ok(()) => Ok(LinkOutcome::Subscribed),
            Err(err) if err.is_recoverable() => Ok(LinkOutcome::ControlMissing),
            Err(err) => Err(err),
        }
    } else if label == selectors.label_subscribed {
        Ok(LinkOutcome::AlreadySubscribed)
    } else {
        Ok(LinkOutcome::LabelUnrecognized)
    }
}
