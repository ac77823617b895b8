//! In-memory `BrowserPage` for driving the scrapers in tests.
//!
//! Pages are keyed by URL; each page maps an exact selector string to the elements it
//! returns. Clicking follows the element's `href` attribute.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::browser::{BrowserError, BrowserPage, ElementHandle, WaitUntil};

type PageGenerator = Box<dyn Fn(&str) -> Option<FakePage> + Send + Sync>;

#[derive(Debug, Clone, Default)]
pub struct FakePage {
    elements: HashMap<String, Vec<ElementHandle>>,
}

impl FakePage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers elements under `selector`, given as `(text, attributes)` pairs.
    pub fn with(mut self, selector: &str, items: Vec<(&str, Vec<(&str, &str)>)>) -> Self {
        let handles = items
            .into_iter()
            .enumerate()
            .map(|(index, (text, attrs))| {
                attrs
                    .into_iter()
                    .fold(ElementHandle::new(selector, index, text), |el, (k, v)| {
                        el.with_attribute(k, v)
                    })
            })
            .collect();
        self.elements.insert(selector.to_string(), handles);
        self
    }
}

#[derive(Default)]
pub struct FakeBrowser {
    pages: HashMap<String, FakePage>,
    generator: Option<PageGenerator>,
    unreachable: HashSet<String>,
    current: Option<FakePage>,
    pub navigations: Vec<String>,
    pub clicks: usize,
    // `sleep` takes `&self`
    slept: Mutex<Vec<Duration>>,
}

impl FakeBrowser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: &str, page: FakePage) -> Self {
        self.pages.insert(url.to_string(), page);
        self
    }

    /// Serves any URL not registered with `with_page`.
    pub fn with_generator(
        mut self,
        generator: impl Fn(&str) -> Option<FakePage> + Send + Sync + 'static,
    ) -> Self {
        self.generator = Some(Box::new(generator));
        self
    }

    pub fn with_unreachable(mut self, url: &str) -> Self {
        self.unreachable.insert(url.to_string());
        self
    }

    pub fn slept(&self) -> Vec<Duration> {
        self.slept.lock().map(|s| s.clone()).unwrap_or_default()
    }

    fn current(&self) -> Result<&FakePage, BrowserError> {
        self.current.as_ref().ok_or(BrowserError::NoPage)
    }
}

#[async_trait]
impl BrowserPage for FakeBrowser {
    async fn navigate(
        &mut self,
        url: &str,
        _wait_until: WaitUntil,
        _timeout: Duration,
    ) -> Result<(), BrowserError> {
        self.navigations.push(url.to_string());

        let page = if self.unreachable.contains(url) {
            None
        } else {
            self.pages
                .get(url)
                .cloned()
                .or_else(|| self.generator.as_ref().and_then(|g| g(url)))
        };

        match page {
            Some(page) => {
                self.current = Some(page);
                Ok(())
            }
            None => {
                self.current = None;
                Err(BrowserError::Navigation {
                    url: url.to_string(),
                    message: "HTTP 404 Not Found".to_string(),
                })
            }
        }
    }

    async fn wait_for_selector(
        &self,
        selector: &str,
        timeout: Duration,
    ) -> Result<(), BrowserError> {
        let present = self
            .current()?
            .elements
            .get(selector)
            .is_some_and(|els| !els.is_empty());
        if present {
            Ok(())
        } else {
            Err(BrowserError::SelectorTimeout {
                selector: selector.to_string(),
                timeout_ms: timeout.as_millis(),
            })
        }
    }

    async fn query_selector_all(&self, selector: &str) -> Result<Vec<ElementHandle>, BrowserError> {
        Ok(self
            .current()?
            .elements
            .get(selector)
            .cloned()
            .unwrap_or_default())
    }

    async fn click(&mut self, element: &ElementHandle) -> Result<(), BrowserError> {
        self.clicks += 1;
        let href = element
            .attribute("href")
            .ok_or_else(|| BrowserError::NotClickable("no href".to_string()))?
            .to_string();
        self.navigate(&href, WaitUntil::DomContentLoaded, Duration::ZERO)
            .await
    }

    async fn sleep(&self, duration: Duration) {
        if let Ok(mut slept) = self.slept.lock() {
            slept.push(duration);
        }
    }
}
