//! Wire types returned by the brief API (`/api/v1`).
//!
//! ## Observed shape
//!
//! ### Counts vs. articles
//! `bullish_count`, `bearish_count` and `neutral_count` are computed by the
//! backend over its whole corpus, while `articles` is a sample. The counts
//! are the source of truth for the sentiment bar and column badges; they
//! are never recomputed from `articles`.
//!
//! ### `change_percent`
//! A fraction (`0.0123` means +1.23%), not percentage-scaled.
//!
//! ### `shares` / `amount`
//! Display strings (`"1,200"`, `"$1,001 - $15,000"`). Not guaranteed numeric,
//! so they stay `String`.
//!
//! ### Moving averages
//! `ma50`, `ma100`, `ema50` and `ema100` are absent or `null` on the leading
//! points of a series where the window has too little history.

use serde::{Deserialize, Serialize};

/// Aggregated sentiment, safety and market data for one ticker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickerBrief {
    /// Canonical uppercase symbol (e.g. `"AAPL"`).
    pub symbol: String,
    pub bullish_count: u32,
    pub bearish_count: u32,
    pub neutral_count: u32,
    #[serde(default)]
    pub articles: Vec<Article>,
    /// Safety score in `[0.0, 1.0]`. Modelled as optional so a missing or
    /// `null` score degrades to an "Unknown" badge instead of failing the
    /// whole brief.
    #[serde(default)]
    pub safety_score: Option<f64>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub change_percent: Option<f64>,
    #[serde(default)]
    pub volume: Option<f64>,
    #[serde(default)]
    pub average_volume: Option<f64>,
    #[serde(default)]
    pub exchange: Option<String>,
    #[serde(default)]
    pub put_call_ratio: Option<f64>,
    #[serde(default)]
    pub institutional_holders: Option<Vec<String>>,
    /// Free-form label, usually `"Bullish"`, `"Bearish"` or `"Neutral"`.
    #[serde(default)]
    pub insider_sentiment: Option<String>,
    /// Free-form label, usually `"Bullish"`, `"Bearish"` or `"Neutral"`.
    #[serde(default)]
    pub retail_sentiment: Option<String>,
    #[serde(default)]
    pub corporate_insiders: Option<Vec<InsiderTransaction>>,
    #[serde(default)]
    pub politician_trades: Option<Vec<PoliticianTrade>>,
}

impl TickerBrief {
    /// Sum of the three supplied sentiment counts.
    #[must_use]
    pub fn total_count(&self) -> u64 {
        u64::from(self.bullish_count) + u64::from(self.bearish_count) + u64::from(self.neutral_count)
    }

    /// Whether the insider card has anything to show.
    #[must_use]
    pub fn has_insider_activity(&self) -> bool {
        let corp = self.corporate_insiders.as_ref().is_some_and(|v| !v.is_empty());
        let pol = self.politician_trades.as_ref().is_some_and(|v| !v.is_empty());
        corp || pol
    }
}

/// A news article with its classified stance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub headline: String,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub ticker: Option<String>,
    #[serde(default)]
    pub published_at: Option<String>,
    pub sentiment: ArticleSentiment,
}

impl Article {
    /// Parsed stance, or `None` when the backend sent an unrecognised value.
    #[must_use]
    pub fn stance(&self) -> Option<Stance> {
        Stance::parse(&self.sentiment.stance)
    }
}

/// Raw sentiment sub-record as delivered by the backend.
///
/// `stance` is kept as a string: values outside the three canonical ones
/// must render with neutral styling rather than fail deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleSentiment {
    pub stance: String,
    /// Classifier confidence in `[0.0, 1.0]`.
    pub confidence: f64,
}

/// The three canonical article stances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stance {
    Positive,
    Negative,
    Neutral,
}

impl Stance {
    /// Exact, case-sensitive match against the wire values.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "positive" => Some(Self::Positive),
            "negative" => Some(Self::Negative),
            "neutral" => Some(Self::Neutral),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
            Self::Neutral => "neutral",
        }
    }
}

impl std::fmt::Display for Stance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A Form 4 style corporate insider transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsiderTransaction {
    pub holder: String,
    pub shares: String,
    pub position: String,
    pub date: String,
    pub transaction_text: String,
}

/// A disclosed trade by a member of Congress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoliticianTrade {
    pub politician: String,
    pub party: String,
    pub date: String,
    /// `"Purchase"`, `"Sale"`, `"Sale (Partial)"`, ...
    #[serde(rename = "type")]
    pub trade_type: String,
    pub amount: String,
    pub ticker: String,
}

/// One point of a price history series, ordered by `time` ascending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub time: String,
    pub price: f64,
    #[serde(default)]
    pub ma50: Option<f64>,
    #[serde(default)]
    pub ma100: Option<f64>,
    #[serde(default)]
    pub ema50: Option<f64>,
    #[serde(default)]
    pub ema100: Option<f64>,
}
