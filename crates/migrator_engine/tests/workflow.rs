use std::collections::HashMap;
use std::fs;
use std::sync::Mutex;

use async_trait::async_trait;
use migrator_engine::{
    checkpoint_path, load_links, run_extract, run_set, write_checkpoint, write_lines, LinkOutcome,
    ProgressSink, Selectors, Session, SessionError, WorkflowEvent,
};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn init_logging() {
    migrator_logging::initialize_for_tests();
}

#[derive(Clone, Copy)]
enum PageScript {
    /// The subscribe label reads this text.
    Label(&'static str),
    /// The page loads but carries no subscribe control.
    NoControl,
    /// Navigating to this page kills the session.
    NavFails,
}

/// Scripted stand-in for the browser, keyed by URL.
#[derive(Default)]
struct ScriptedSession {
    pages: HashMap<String, PageScript>,
    entry_links: Vec<String>,
    fail_enumeration: bool,
    current: Mutex<String>,
    clicks: Mutex<Vec<String>>,
}

impl ScriptedSession {
    fn with_pages(pages: &[(&str, PageScript)]) -> Self {
        Self {
            pages: pages
                .iter()
                .map(|(url, script)| (url.to_string(), *script))
                .collect(),
            ..Self::default()
        }
    }

    fn click_count(&self) -> usize {
        self.clicks.lock().unwrap().len()
    }
}

#[async_trait]
impl Session for ScriptedSession {
    async fn navigate(&self, url: &str) -> Result<(), SessionError> {
        if let Some(PageScript::NavFails) = self.pages.get(url) {
            return Err(SessionError::Driver("connection lost".to_string()));
        }
        *self.current.lock().unwrap() = url.to_string();
        Ok(())
    }

    async fn read_attr_all(
        &self,
        _selector: &str,
        _attr: &str,
    ) -> Result<Vec<String>, SessionError> {
        if self.fail_enumeration {
            return Err(SessionError::Driver("stale document".to_string()));
        }
        Ok(self.entry_links.clone())
    }

    async fn read_text(&self, selector: &str) -> Result<String, SessionError> {
        let current = self.current.lock().unwrap().clone();
        match self.pages.get(&current) {
            Some(PageScript::Label(label)) => Ok((*label).to_string()),
            _ => Err(SessionError::ElementNotFound(selector.to_string())),
        }
    }

    async fn click(&self, _selector: &str) -> Result<(), SessionError> {
        let current = self.current.lock().unwrap().clone();
        self.clicks.lock().unwrap().push(current);
        Ok(())
    }

    async fn close(&mut self) {}
}

#[derive(Default)]
struct RecordingSink {
    events: Mutex<Vec<WorkflowEvent>>,
}

impl RecordingSink {
    fn events(&self) -> Vec<WorkflowEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl ProgressSink for RecordingSink {
    fn emit(&self, event: WorkflowEvent) {
        self.events.lock().unwrap().push(event);
    }
}

fn urls(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

#[tokio::test]
async fn set_clicks_when_label_reads_subscribe() {
    init_logging();
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("channels.txt");
    let session =
        ScriptedSession::with_pages(&[("https://x.com/a", PageScript::Label("Subscribe"))]);
    let sink = RecordingSink::default();

    let report = run_set(
        &session,
        &Selectors::default(),
        &urls(&["https://x.com/a"]),
        &input,
        false,
        &sink,
    )
    .await;

    assert_eq!(report.subscribed, 1);
    assert_eq!(session.click_count(), 1);
    assert!(report.failure.is_none());
    assert!(report.remaining.is_empty());
    assert_eq!(
        sink.events(),
        vec![WorkflowEvent::LinkHandled {
            link: "https://x.com/a".to_string(),
            outcome: LinkOutcome::Subscribed,
        }]
    );
}

#[tokio::test]
async fn set_is_idempotent_when_everything_is_already_subscribed() {
    init_logging();
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("channels.txt");
    let session = ScriptedSession::with_pages(&[
        ("https://x.com/a", PageScript::Label("Subscribed")),
        ("https://x.com/b", PageScript::Label("Subscribed")),
    ]);
    let links = urls(&["https://x.com/a", "https://x.com/b"]);

    for _ in 0..2 {
        let sink = RecordingSink::default();
        let report = run_set(&session, &Selectors::default(), &links, &input, false, &sink).await;
        assert_eq!(report.already_subscribed, 2);
        assert_eq!(report.subscribed, 0);
    }
    assert_eq!(session.click_count(), 0);
}

#[tokio::test]
async fn missing_control_is_nonfatal_and_loop_continues() {
    init_logging();
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("channels.txt");
    let session = ScriptedSession::with_pages(&[
        ("https://x.com/a", PageScript::NoControl),
        ("https://x.com/b", PageScript::Label("Subscribe")),
    ]);
    let sink = RecordingSink::default();

    let report = run_set(
        &session,
        &Selectors::default(),
        &urls(&["https://x.com/a", "https://x.com/b"]),
        &input,
        false,
        &sink,
    )
    .await;

    assert_eq!(report.control_missing, 1);
    assert_eq!(report.subscribed, 1);
    assert!(report.failure.is_none());
}

#[tokio::test]
async fn session_failure_checkpoints_exactly_the_unattempted_links() {
    init_logging();
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("channels.txt");
    write_lines(
        &input,
        &urls(&["https://x.com/a", "bad-link", "https://x.com/b"]),
    )
    .unwrap();

    let loaded = load_links(&input).unwrap();
    assert_eq!(loaded.links, urls(&["https://x.com/a", "https://x.com/b"]));

    let session = ScriptedSession::with_pages(&[
        ("https://x.com/a", PageScript::Label("Subscribe")),
        ("https://x.com/b", PageScript::NavFails),
    ]);
    let sink = RecordingSink::default();

    let report = run_set(
        &session,
        &Selectors::default(),
        &loaded.links,
        &input,
        true,
        &sink,
    )
    .await;

    assert_eq!(report.subscribed, 1);
    assert!(report.failure.is_some());
    assert_eq!(report.remaining, urls(&["https://x.com/b"]));
    assert_eq!(
        fs::read_to_string(checkpoint_path(&input)).unwrap(),
        "https://x.com/b"
    );
}

#[tokio::test]
async fn session_failure_without_save_progress_writes_no_checkpoint() {
    init_logging();
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("channels.txt");
    let session = ScriptedSession::with_pages(&[("https://x.com/a", PageScript::NavFails)]);
    let sink = RecordingSink::default();

    let report = run_set(
        &session,
        &Selectors::default(),
        &urls(&["https://x.com/a"]),
        &input,
        false,
        &sink,
    )
    .await;

    assert!(report.failure.is_some());
    assert!(!checkpoint_path(&input).exists());
}

#[tokio::test]
async fn completed_run_clears_stale_checkpoint() {
    init_logging();
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("channels.txt");
    write_checkpoint(&input, &urls(&["https://x.com/a"])).unwrap();

    let session =
        ScriptedSession::with_pages(&[("https://x.com/a", PageScript::Label("Subscribed"))]);
    let sink = RecordingSink::default();

    let report = run_set(
        &session,
        &Selectors::default(),
        &urls(&["https://x.com/a"]),
        &input,
        true,
        &sink,
    )
    .await;

    assert!(report.failure.is_none());
    assert!(!checkpoint_path(&input).exists());
}

#[tokio::test]
async fn load_links_resumes_from_checkpoint() {
    init_logging();
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("channels.txt");
    write_lines(
        &input,
        &urls(&["https://x.com/a", "https://x.com/b", "https://x.com/c"]),
    )
    .unwrap();
    write_checkpoint(&input, &urls(&["https://x.com/b", "https://x.com/c"])).unwrap();

    let loaded = load_links(&input).unwrap();
    assert!(loaded.resumed);
    assert_eq!(loaded.links, urls(&["https://x.com/b", "https://x.com/c"]));
}

#[tokio::test]
async fn extract_writes_collected_links() {
    init_logging();
    let temp = TempDir::new().unwrap();
    let output = temp.path().join("channels.txt");
    let session = ScriptedSession {
        entry_links: urls(&["https://x.com/a", "https://x.com/b"]),
        ..ScriptedSession::default()
    };
    let sink = RecordingSink::default();

    let report = run_extract(&session, &Selectors::default(), &output, &sink)
        .await
        .unwrap();

    assert!(report.wrote);
    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "https://x.com/a\nhttps://x.com/b"
    );
    assert_eq!(
        sink.events(),
        vec![
            WorkflowEvent::LinkExtracted {
                link: "https://x.com/a".to_string(),
            },
            WorkflowEvent::LinkExtracted {
                link: "https://x.com/b".to_string(),
            },
        ]
    );
}

#[tokio::test]
async fn extract_with_no_entries_leaves_output_untouched() {
    init_logging();
    let temp = TempDir::new().unwrap();
    let output = temp.path().join("channels.txt");
    let session = ScriptedSession::default();
    let sink = RecordingSink::default();

    let report = run_extract(&session, &Selectors::default(), &output, &sink)
        .await
        .unwrap();

    assert!(!report.wrote);
    assert!(report.links.is_empty());
    assert!(!output.exists());
}

#[tokio::test]
async fn extract_navigation_failure_degrades_to_empty() {
    init_logging();
    let temp = TempDir::new().unwrap();
    let output = temp.path().join("channels.txt");
    let selectors = Selectors::default();
    let session =
        ScriptedSession::with_pages(&[(selectors.subscriptions_url.as_str(), PageScript::NavFails)]);
    let sink = RecordingSink::default();

    let report = run_extract(&session, &selectors, &output, &sink)
        .await
        .unwrap();

    assert!(!report.wrote);
    assert!(report.links.is_empty());
    assert!(!output.exists());
    assert_eq!(sink.events(), vec![WorkflowEvent::PageUnavailable]);
}

#[tokio::test]
async fn extract_enumeration_failure_degrades_to_empty() {
    init_logging();
    let temp = TempDir::new().unwrap();
    let output = temp.path().join("channels.txt");
    let session = ScriptedSession {
        fail_enumeration: true,
        ..ScriptedSession::default()
    };
    let sink = RecordingSink::default();

    let report = run_extract(&session, &Selectors::default(), &output, &sink)
        .await
        .unwrap();

    assert!(!report.wrote);
    assert!(!output.exists());
    assert_eq!(sink.events(), vec![WorkflowEvent::EnumerationFailed]);
}
