use std::future::Future;
use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::{Element, Page};
use futures_util::StreamExt;
use tokio::task::JoinHandle;

use migrator_logging::{migrator_debug, migrator_trace, migrator_warn};

use crate::session::{Session, SessionError};

/// How long element lookups keep polling before reporting "not found".
const FIND_TIMEOUT: Duration = Duration::from_secs(10);
const FIND_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// A real browser session driven over the Chrome DevTools Protocol.
///
/// Launches headed (the operator has to eyeball the loaded account) with
/// the given profile directory as the browser's user data dir.
pub struct CdpSession {
    browser: Browser,
    page: Page,
    event_pump: JoinHandle<()>,
}

impl CdpSession {
    /// Launch a browser bound to `profile` and open `start_url`.
    pub async fn launch(profile: &Path, start_url: &str) -> Result<Self, SessionError> {
        let config = BrowserConfig::builder()
            .with_head()
            .user_data_dir(profile)
            .viewport(None)
            .launch_timeout(Duration::from_secs(120))
            .build()
            .map_err(SessionError::Launch)?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|err| SessionError::Launch(err.to_string()))?;

        // The CDP event pump must keep running for the browser's lifetime.
        let event_pump = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                migrator_trace!("cdp event: {event:?}");
            }
        });

        let page = browser
            .new_page(start_url)
            .await
            .map_err(|err| SessionError::Launch(err.to_string()))?;

        Ok(Self {
            browser,
            page,
            event_pump,
        })
    }

    /// Look up one element, polling until it appears or the deadline passes.
    ///
    /// Dynamically rendered pages attach their controls well after the load
    /// event fires, so a one-shot DOM query would miss elements that a short
    /// wait turns up.
    async fn find_control(&self, selector: &str) -> Result<Element, SessionError> {
        poll_until(FIND_TIMEOUT, FIND_POLL_INTERVAL, || async {
            self.page.find_element(selector).await.ok()
        })
        .await
        .ok_or_else(|| SessionError::ElementNotFound(selector.to_string()))
    }
}

/// Retry `attempt` until it yields a value or `timeout` elapses.
async fn poll_until<T, F, Fut>(timeout: Duration, interval: Duration, mut attempt: F) -> Option<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Option<T>>,
{
    let deadline = tokio::time::Instant::now() + timeout;
    loop {
        if let Some(value) = attempt().await {
            return Some(value);
        }
        if tokio::time::Instant::now() >= deadline {
            return None;
        }
        tokio::time::sleep(interval).await;
    }
}

#[async_trait]
impl Session for CdpSession {
    async fn navigate(&self, url: &str) -> Result<(), SessionError> {
        self.page
            .goto(url)
            .await
            .map_err(|err| SessionError::Navigation {
                url: url.to_string(),
                message: err.to_string(),
            })?;
        self.page
            .wait_for_navigation()
            .await
            .map_err(|err| SessionError::Navigation {
                url: url.to_string(),
                message: err.to_string(),
            })?;
        Ok(())
    }

    async fn read_attr_all(
        &self,
        selector: &str,
        attr: &str,
    ) -> Result<Vec<String>, SessionError> {
        // An empty match set may just mean the entries have not rendered
        // yet; keep polling and only settle for empty at the deadline.
        let elements = poll_until(FIND_TIMEOUT, FIND_POLL_INTERVAL, || async {
            match self.page.find_elements(selector).await {
                Ok(elements) if !elements.is_empty() => Some(Ok(elements)),
                Ok(_) => None,
                Err(err) => Some(Err(SessionError::Driver(err.to_string()))),
            }
        })
        .await
        .unwrap_or_else(|| Ok(Vec::new()))?;

        let mut values = Vec::with_capacity(elements.len());
        for element in elements {
            match element.attribute(attr).await {
                Ok(Some(value)) => values.push(value),
                Ok(None) => {}
                Err(err) => return Err(SessionError::Driver(err.to_string())),
            }
        }
        Ok(values)
    }

    async fn read_text(&self, selector: &str) -> Result<String, SessionError> {
        let element = self.find_control(selector).await?;
        let text = element
            .inner_text()
            .await
            .map_err(|err| SessionError::Driver(err.to_string()))?;
        Ok(text.unwrap_or_default().trim().to_string())
    }

    async fn click(&self, selector: &str) -> Result<(), SessionError> {
        let element = self.find_control(selector).await?;
        element
            .click()
            .await
            .map_err(|err| SessionError::Driver(err.to_string()))?;
        Ok(())
    }

    async fn close(&mut self) {
        if let Err(err) = self.browser.close().await {
            migrator_warn!("browser close failed: {err}");
        }
        if let Err(err) = self.browser.wait().await {
            migrator_debug!("browser wait failed: {err}");
        }
        self.event_pump.abort();
    }
}
