//! Static-HTML page backend: fetches with `reqwest`, queries with `scraper` CSS selectors.
//!
//! It does not execute JavaScript, so a selector absent from the fetched document is
//! reported as a timeout straight away. Clicking an element follows its `href`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use scraper::{node::Node, ElementRef, Html, Selector};
use tracing::debug;
use url::Url;

use crate::browser::{BrowserError, BrowserPage, ElementHandle, WaitUntil};

/// Elements whose boundaries become line breaks in `inner_text`.
const BLOCK_TAGS: &[&str] = &[
    "address", "article", "aside", "blockquote", "br", "dd", "div", "dl", "dt", "footer",
    "form", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr", "li", "main", "nav", "ol", "p",
    "pre", "section", "table", "tr", "ul",
];

struct LoadedPage {
    url: Url,
    html: String,
}

pub struct HttpPage {
    client: Client,
    navigation_timeout: Duration,
    current: Option<LoadedPage>,
}

impl HttpPage {
    pub fn new(user_agent: &str, navigation_timeout: Duration) -> Result<Self, BrowserError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(navigation_timeout)
            .build()?;

        Ok(Self {
            client,
            navigation_timeout,
            current: None,
        })
    }

    fn loaded(&self) -> Result<&LoadedPage, BrowserError> {
        self.current.as_ref().ok_or(BrowserError::NoPage)
    }
}

#[async_trait]
impl BrowserPage for HttpPage {
    async fn navigate(
        &mut self,
        url: &str,
        wait_until: WaitUntil,
        timeout: Duration,
    ) -> Result<(), BrowserError> {
        let navigation_error = |message: String| BrowserError::Navigation {
            url: url.to_string(),
            message,
        };

        let target = Url::parse(url).map_err(|e| navigation_error(e.to_string()))?;
        // The body is fully read before returning, which satisfies either wait mode.
        debug!(%url, ?wait_until, "Navigating");

        let response = self
            .client
            .get(target)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| navigation_error(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(navigation_error(format!("HTTP {status}")));
        }

        let final_url = response.url().clone();
        let html = response
            .text()
            .await
            .map_err(|e| navigation_error(e.to_string()))?;

        self.current = Some(LoadedPage {
            url: final_url,
            html,
        });
        Ok(())
    }

    async fn wait_for_selector(
        &self,
        selector: &str,
        timeout: Duration,
    ) -> Result<(), BrowserError> {
        let page = self.loaded()?;
        if select_elements(&page.html, selector)?.is_empty() {
            return Err(BrowserError::SelectorTimeout {
                selector: selector.to_string(),
                timeout_ms: timeout.as_millis(),
            });
        }
        Ok(())
    }

    async fn query_selector_all(&self, selector: &str) -> Result<Vec<ElementHandle>, BrowserError> {
        let page = self.loaded()?;
        select_elements(&page.html, selector)
    }

    async fn click(&mut self, element: &ElementHandle) -> Result<(), BrowserError> {
        let href = element
            .attribute("href")
            .map(str::trim)
            .filter(|h| !h.is_empty() && !h.starts_with('#') && !h.starts_with("javascript:"))
            .ok_or_else(|| {
                let (selector, index) = element.locator();
                BrowserError::NotClickable(format!("{selector}[{index}] has no followable href"))
            })?;

        let target = self
            .loaded()?
            .url
            .join(href)
            .map_err(|e| BrowserError::NotClickable(e.to_string()))?;

        let timeout = self.navigation_timeout;
        self.navigate(target.as_str(), WaitUntil::DomContentLoaded, timeout)
            .await
    }

    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

// Parsing stays synchronous: `scraper::Html` must not be held across an await.
fn select_elements(html: &str, selector: &str) -> Result<Vec<ElementHandle>, BrowserError> {
    let parsed =
        Selector::parse(selector).map_err(|_| BrowserError::InvalidSelector(selector.to_string()))?;
    let document = Html::parse_document(html);

    Ok(document
        .select(&parsed)
        .enumerate()
        .map(|(index, element)| {
            element.value().attrs().fold(
                ElementHandle::new(selector, index, inner_text(element)),
                |handle, (name, value)| handle.with_attribute(name, value),
            )
        })
        .collect())
}

/// Approximates the browser's `innerText`: whitespace collapsed within a line, one line per
/// block-level element.
fn inner_text(element: ElementRef<'_>) -> String {
    let mut raw = String::new();
    for node in element.descendants() {
        match node.value() {
            Node::Text(text) => {
                raw.extend(text.chars().map(|c| if c.is_whitespace() { ' ' } else { c }))
            }
            Node::Element(el) if BLOCK_TAGS.contains(&el.name()) => raw.push('\n'),
            _ => {}
        }
    }

    raw.lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
