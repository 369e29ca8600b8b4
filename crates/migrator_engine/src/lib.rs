//! Migrator engine: link validation, line-file store, browser session and workflows.
mod cdp;
mod links;
mod selectors;
mod session;
mod store;
mod workflow;

pub use cdp::CdpSession;
pub use links::{filter_valid, is_valid_link};
pub use selectors::Selectors;
pub use session::{Session, SessionError};
pub use store::{
    checkpoint_path, clear_checkpoint, load_resumable, read_lines, write_checkpoint, write_lines,
    ResumableList, StoreError,
};
pub use workflow::{
    load_links, run_extract, run_set, ExtractReport, LinkOutcome, LoadedLinks, ProgressSink,
    SetReport, WorkflowError, WorkflowEvent,
};
