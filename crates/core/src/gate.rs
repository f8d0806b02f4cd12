//! Page-load gate for single-page-app LMS hosts.
//!
//! Canvas renders most of its course pages client-side, so an extraction
//! pass that runs too early captures an empty application shell. The gate
//! polls for known "application ready" markers on a fixed interval and
//! returns once one is present and no script-disabled notice is showing.
//! The wait is bounded: at the timeout it returns regardless, because slow
//! pages are often still usable, and extraction degrades gracefully.

use std::time::{Duration, Instant};
use tracing::debug;

use crate::dom::DomRead;

/// Configuration for the page-load gate.
#[derive(Debug, Clone)]
pub struct GateConfig {
    /// Interval between readiness polls.
    pub poll_interval: Duration,
    /// Upper bound on the total wait.
    pub timeout: Duration,
    /// Selectors whose presence marks the application as rendered.
    pub ready_markers: Vec<String>,
    /// Visible-text fragments that mark the page as not actually rendered.
    pub blocked_text: Vec<String>,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(500),
            timeout: Duration::from_millis(5000),
            ready_markers: ["#content", ".user_content", "#application", "#main", ".ic-app"]
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
            blocked_text: vec!["you need to have javascript enabled".to_string()],
        }
    }
}

/// Waits until the page looks rendered, or until the timeout expires.
///
/// Best effort by design: this function never errors and never blocks
/// past `config.timeout`. It has no side effects beyond waiting.
pub async fn await_content_ready(host: &impl DomRead, config: &GateConfig) {
    let deadline = Instant::now() + config.timeout;

    loop {
        if is_ready(host, config) {
            debug!("page ready");
            return;
        }

        let now = Instant::now();
        if now >= deadline {
            debug!("page-load gate timed out; proceeding best-effort");
            return;
        }

        let wait = config.poll_interval.min(deadline - now);
        tokio::time::sleep(wait).await;
    }
}

fn is_ready(host: &impl DomRead, config: &GateConfig) -> bool {
    let marker_present = config.ready_markers.iter().any(|marker| host.has_match(marker));
    if !marker_present {
        return false;
    }

    let text = host.page_text().to_lowercase();
    !config.blocked_text.iter().any(|blocked| text.contains(blocked))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Heading;
    use crate::{Page, Result};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Fake host that reports ready after a fixed number of polls.
    struct SlowDom {
        polls_until_ready: usize,
        polls: AtomicUsize,
    }

    impl SlowDom {
        fn new(polls_until_ready: usize) -> Self {
            Self { polls_until_ready, polls: AtomicUsize::new(0) }
        }

        fn ready(&self) -> bool {
            self.polls.fetch_add(1, Ordering::SeqCst) >= self.polls_until_ready
        }
    }

    impl DomRead for SlowDom {
        fn region_texts(&self, _selector: &str) -> Result<Vec<String>> {
            Ok(if self.ready() { vec!["ready".to_string()] } else { Vec::new() })
        }

        fn page_text(&self) -> String {
            String::new()
        }

        fn page_title(&self) -> Option<String> {
            None
        }

        fn fallback_texts(&self, _tags: &[&str]) -> Vec<String> {
            Vec::new()
        }

        fn headings(&self) -> Vec<Heading> {
            Vec::new()
        }
    }

    fn quick_config() -> GateConfig {
        GateConfig {
            poll_interval: Duration::from_millis(2),
            timeout: Duration::from_millis(40),
            // Single marker so the fake sees one probe per poll.
            ready_markers: vec!["#content".to_string()],
            ..GateConfig::default()
        }
    }

    #[tokio::test]
    async fn test_returns_once_marker_present() {
        let dom = SlowDom::new(3);
        await_content_ready(&dom, &quick_config()).await;

        assert!(dom.polls.load(Ordering::SeqCst) >= 3);
    }

    #[tokio::test]
    async fn test_times_out_without_marker() {
        let dom = SlowDom::new(usize::MAX);
        let started = Instant::now();

        await_content_ready(&dom, &quick_config()).await;

        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_millis(40));
        assert!(elapsed < Duration::from_secs(2));
    }

    #[tokio::test]
    async fn test_rendered_page_passes_immediately() {
        let page = Page::parse(
            r#"<html><body><div id="content"><div class="user_content">Course material</div></div></body></html>"#,
        )
        .unwrap();

        let started = Instant::now();
        await_content_ready(&page, &quick_config()).await;
        assert!(started.elapsed() < Duration::from_millis(20));
    }

    #[tokio::test]
    async fn test_blocked_text_defers_readiness() {
        let page = Page::parse(
            r#"<html><body>
                <div id="content">You need to have JavaScript enabled to view this content.</div>
            </body></html>"#,
        )
        .unwrap();

        let started = Instant::now();
        await_content_ready(&page, &quick_config()).await;

        // Marker exists but the blocked notice holds the gate until timeout.
        assert!(started.elapsed() >= Duration::from_millis(40));
    }
}
