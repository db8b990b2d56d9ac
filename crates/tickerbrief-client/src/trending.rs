//! Trending list fallback and short-lived revalidation cache.

use std::time::{Duration, Instant};

/// Served when the trending endpoint is unreachable or returns non-2xx.
pub const FALLBACK_TRENDING: [&str; 10] = [
    "AAPL", "NVDA", "MSFT", "TSLA", "AMZN", "GOOGL", "META", "BRK-B", "LLY", "AVGO",
];

pub(crate) fn fallback_trending() -> Vec<String> {
    FALLBACK_TRENDING.iter().map(|s| (*s).to_string()).collect()
}

/// Last successful trending list and when it was fetched.
///
/// A zero window disables caching.
pub(crate) struct TrendingCache {
    window: Duration,
    entry: Option<(Instant, Vec<String>)>,
}

impl TrendingCache {
    pub(crate) fn new(window: Duration) -> Self {
        Self {
            window,
            entry: None,
        }
    }

    pub(crate) fn fresh(&self) -> Option<Vec<String>> {
        self.fresh_at(Instant::now())
    }

    fn fresh_at(&self, now: Instant) -> Option<Vec<String>> {
        let (fetched_at, tickers) = self.entry.as_ref()?;
        (now.saturating_duration_since(*fetched_at) < self.window).then(|| tickers.clone())
    }

    pub(crate) fn store(&mut self, tickers: Vec<String>) {
        if !self.window.is_zero() {
            self.entry = Some((Instant::now(), tickers));
        }
    }
}
