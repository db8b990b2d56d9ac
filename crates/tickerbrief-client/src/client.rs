//! Typed fetch operations for the brief, history and trending endpoints.

use std::sync::Mutex;
use std::time::Duration;

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use tickerbrief_core::{resolve_base_url, ApiBase, ApiConfig, HistoryPeriod, PricePoint, TickerBrief};

use crate::error::FetchError;
use crate::trending::{fallback_trending, TrendingCache};

const DEFAULT_USER_AGENT: &str = "tickerbrief/0.1";

/// Client for the ticker brief API.
///
/// The API root is resolved once from an [`ApiConfig`] at construction. Use
/// [`BriefClient::with_base_url`] to point at a mock server in tests.
pub struct BriefClient {
    client: Client,
    base_url: Url,
    trending_cache: Mutex<TrendingCache>,
}

impl BriefClient {
    /// Creates a client from injected configuration.
    ///
    /// In the client execution context the relative API path is anchored at
    /// `config.client_origin`.
    ///
    /// # Errors
    ///
    /// - [`FetchError::InvalidBaseUrl`] if the resolved root is not a usable
    ///   URL, or the client context has no origin.
    /// - [`FetchError::Http`] if the underlying `reqwest::Client` cannot be
    ///   constructed.
    pub fn new(config: &ApiConfig) -> Result<Self, FetchError> {
        let root = match resolve_base_url(config) {
            ApiBase::Absolute(url) => url,
            ApiBase::Relative(path) => {
                let origin =
                    config
                        .client_origin
                        .as_deref()
                        .ok_or_else(|| FetchError::InvalidBaseUrl {
                            base_url: path.clone(),
                            reason: "relative API path requires a client origin".to_string(),
                        })?;
                format!("{}{path}", origin.trim_end_matches('/'))
            }
        };
        tracing::debug!(context = %config.context, base_url = %root, "resolved API base URL");

        Self::from_parts(
            &root,
            config.request_timeout_secs,
            &config.user_agent,
            Duration::from_secs(config.trending_revalidate_secs),
        )
    }

    /// Creates a client against an absolute API root (for testing with
    /// wiremock). The trending revalidation window is disabled.
    ///
    /// # Errors
    ///
    /// - [`FetchError::InvalidBaseUrl`] if `base_url` does not parse or cannot
    ///   carry path segments.
    /// - [`FetchError::Http`] if the underlying `reqwest::Client` cannot be
    ///   constructed.
    pub fn with_base_url(base_url: &str, timeout_secs: u64) -> Result<Self, FetchError> {
        Self::from_parts(base_url, timeout_secs, DEFAULT_USER_AGENT, Duration::ZERO)
    }

    fn from_parts(
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
        trending_revalidate: Duration,
    ) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash so appended segments land under the
        // API root instead of replacing its last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let invalid = |reason: String| FetchError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason,
        };
        let base_url = Url::parse(&normalised).map_err(|e| invalid(e.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(invalid("URL cannot carry path segments".to_string()));
        }

        Ok(Self {
            client,
            base_url,
            trending_cache: Mutex::new(TrendingCache::new(trending_revalidate)),
        })
    }

    /// The resolved API root, always ending in `/`.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Fetches the aggregated brief for `symbol` (`GET /ticker/{symbol}`).
    ///
    /// The symbol is used as given; callers normalise case beforehand.
    ///
    /// # Errors
    ///
    /// - [`FetchError::Status`] on any non-2xx status.
    /// - [`FetchError::Http`] on network failure.
    /// - [`FetchError::Deserialize`] if the body is not a `TickerBrief`.
    pub async fn fetch_ticker_brief(&self, symbol: &str) -> Result<TickerBrief, FetchError> {
        let url = self.build_url(&["ticker", symbol], None)?;
        self.get_json(url, &format!("ticker brief for {symbol}")).await
    }

    /// Fetches the price history for `symbol` over `period`
    /// (`GET /ticker/{symbol}/history?period={period}`).
    ///
    /// # Errors
    ///
    /// - [`FetchError::Status`] on any non-2xx status.
    /// - [`FetchError::Http`] on network failure.
    /// - [`FetchError::Deserialize`] if the body is not a `PricePoint` array.
    pub async fn fetch_ticker_history(
        &self,
        symbol: &str,
        period: HistoryPeriod,
    ) -> Result<Vec<PricePoint>, FetchError> {
        let url = self.build_url(&["ticker", symbol, "history"], Some(("period", period.as_str())))?;
        self.get_json(url, &format!("price history for {symbol} ({period})"))
            .await
    }

    /// Fetches the trending ticker list (`GET /trending`).
    ///
    /// Never fails: any error is logged and [`crate::FALLBACK_TRENDING`] is
    /// returned. Successful lists are reused for the configured revalidation
    /// window; fallbacks are never cached.
    pub async fn fetch_trending_tickers(&self) -> Vec<String> {
        if let Some(cached) = self.cached_trending() {
            tracing::debug!(count = cached.len(), "serving trending tickers from cache");
            return cached;
        }

        match self.try_fetch_trending().await {
            Ok(tickers) => {
                if let Ok(mut cache) = self.trending_cache.lock() {
                    cache.store(tickers.clone());
                }
                tickers
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to fetch trending tickers; using fallback list");
                fallback_trending()
            }
        }
    }

    async fn try_fetch_trending(&self) -> Result<Vec<String>, FetchError> {
        let url = self.build_url(&["trending"], None)?;
        self.get_json(url, "trending tickers").await
    }

    fn cached_trending(&self) -> Option<Vec<String>> {
        self.trending_cache.lock().ok().and_then(|cache| cache.fresh())
    }

    /// Appends `segments` to the API root, percent-encoding each one.
    fn build_url(&self, segments: &[&str], query: Option<(&str, &str)>) -> Result<Url, FetchError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| FetchError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: "URL cannot carry path segments".to_string(),
            })?
            .pop_if_empty()
            .extend(segments);
        if let Some((key, value)) = query {
            url.query_pairs_mut().append_pair(key, value);
        }
        Ok(url)
    }

    /// Sends a GET request, treats every non-2xx status as a failure, and
    /// parses the body as JSON.
    async fn get_json<T: DeserializeOwned>(&self, url: Url, context: &str) -> Result<T, FetchError> {
        tracing::debug!(%url, "GET");
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| FetchError::Deserialize {
            context: context.to_owned(),
            source: e,
        })
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
