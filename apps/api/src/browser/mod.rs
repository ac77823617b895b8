//! Browser capability: the narrow surface the scrapers drive.
//!
//! The scrapers depend only on `BrowserPage`, never on an engine. `HttpPage` is the
//! production backend; tests drive the same state machines through `fake::FakeBrowser`.
//!
//! One page per ranking run, used strictly sequentially.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[cfg(test)]
pub mod fake;
pub mod http_page;

pub use http_page::HttpPage;

/// How far a navigation must progress before it is considered complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaitUntil {
    DomContentLoaded,
    Load,
}

#[derive(Debug, Error)]
pub enum BrowserError {
    #[error("navigation to {url} failed: {message}")]
    Navigation { url: String, message: String },

    #[error("timed out after {timeout_ms}ms waiting for `{selector}`")]
    SelectorTimeout { selector: String, timeout_ms: u128 },

    #[error("invalid selector `{0}`")]
    InvalidSelector(String),

    #[error("element cannot be clicked: {0}")]
    NotClickable(String),

    #[error("no page loaded")]
    NoPage,

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),
}

/// Snapshot of one element matched by a selector query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementHandle {
    selector: String,
    index: usize,
    attributes: HashMap<String, String>,
    text: String,
}

impl ElementHandle {
    pub fn new(selector: impl Into<String>, index: usize, text: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            index,
            attributes: HashMap::new(),
            text: text.into(),
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Visible text, with line breaks between block-level children.
    pub fn inner_text(&self) -> &str {
        &self.text
    }

    /// The query that produced this handle and its position in the result.
    pub fn locator(&self) -> (&str, usize) {
        (&self.selector, self.index)
    }
}

#[async_trait]
pub trait BrowserPage: Send + Sync {
    async fn navigate(
        &mut self,
        url: &str,
        wait_until: WaitUntil,
        timeout: Duration,
    ) -> Result<(), BrowserError>;

    /// Fails with `SelectorTimeout` when nothing matches within `timeout`.
    async fn wait_for_selector(&self, selector: &str, timeout: Duration)
        -> Result<(), BrowserError>;

    async fn query_selector_all(&self, selector: &str) -> Result<Vec<ElementHandle>, BrowserError>;

    async fn click(&mut self, element: &ElementHandle) -> Result<(), BrowserError>;

    /// Politeness pause. Not cancellable.
    async fn sleep(&self, duration: Duration);
}
