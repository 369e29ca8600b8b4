use migrator_engine::{LinkOutcome, ProgressSink, WorkflowEvent};
use migrator_logging::{migrator_debug, migrator_error};

/// Prints workflow events for the operator, one line per handled link.
pub struct PrintSink;

impl ProgressSink for PrintSink {
    fn emit(&self, event: WorkflowEvent) {
        match event {
            WorkflowEvent::LinkHandled { link, outcome } => match outcome {
                LinkOutcome::Subscribed => println!("{link} -> subscribed"),
                LinkOutcome::AlreadySubscribed => println!("{link} -> already subscribed"),
                LinkOutcome::ControlMissing => println!("{link} -> element not found"),
                LinkOutcome::LabelUnrecognized => {
                    migrator_debug!("{link}: unrecognized subscribe control label");
                }
            },
            WorkflowEvent::SessionFailed { message } => {
                migrator_error!("session failure: {message}");
            }
            WorkflowEvent::CheckpointSaved { path } => {
                println!("Saving progress in tmp file");
                migrator_debug!("checkpoint written to {}", path.display());
            }
            WorkflowEvent::LinkExtracted { link } => println!("{link}"),
            WorkflowEvent::PageUnavailable => println!("Could not find page."),
            WorkflowEvent::EnumerationFailed => println!("No such element or attribute found."),
        }
    }
}
