use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("browser launch failed: {0}")]
    Launch(String),
    #[error("navigation to {url} failed: {message}")]
    Navigation { url: String, message: String },
    #[error("no element matched selector {0}")]
    ElementNotFound(String),
    #[error("browser driver error: {0}")]
    Driver(String),
}

impl SessionError {
    /// Per-link failures the set workflow tolerates; everything else ends
    /// the run.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, SessionError::ElementNotFound(_))
    }
}

/// Browser-driving primitives the workflows need from the external
/// automation collaborator.
///
/// The real implementation is [`crate::CdpSession`]; tests script this
/// trait directly.
#[async_trait]
pub trait Session: Send + Sync {
    /// Navigate the page to `url` and wait for the load to settle.
    async fn navigate(&self, url: &str) -> Result<(), SessionError>;

    /// Read `attr` from every element matching `selector`, in document
    /// order. Elements without the attribute are skipped.
    async fn read_attr_all(
        &self,
        selector: &str,
        attr: &str,
    ) -> Result<Vec<String>, SessionError>;

    /// Read the rendered text of the first element matching `selector`.
    async fn read_text(&self, selector: &str) -> Result<String, SessionError>;

    /// Click the first element matching `selector`.
    async fn click(&self, selector: &str) -> Result<(), SessionError>;

    /// Close the browser. Best effort; failures are logged, not returned.
    async fn close(&mut self);
}
