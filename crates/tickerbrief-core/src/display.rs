//! Small derivations used by the brief renderers: sentiment bar shares,
//! article stance badges and crowd/insider label tones.

use crate::metrics::{round_half_up, Tone};
use crate::types::Stance;

/// One of the three sentiment columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
    Bullish,
    Neutral,
    Bearish,
}

impl Bucket {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Bullish => "Bullish",
            Self::Neutral => "Neutral",
            Self::Bearish => "Bearish",
        }
    }

    #[must_use]
    pub fn tone(self) -> Tone {
        match self {
            Self::Bullish => Tone::Positive,
            Self::Neutral => Tone::Neutral,
            Self::Bearish => Tone::Negative,
        }
    }
}

/// A non-empty segment of the sentiment bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarSegment {
    pub bucket: Bucket,
    pub count: u32,
    pub percent: f64,
}

impl BarSegment {
    /// Hover text, e.g. `"Bullish: 3 (60.0%)"`.
    #[must_use]
    pub fn tooltip(&self) -> String {
        format!("{}: {} ({:.1}%)", self.bucket.label(), self.count, self.percent)
    }
}

/// Segments of the stacked sentiment bar, ordered bullish, neutral, bearish.
///
/// Returns `None` when all counts are zero so nothing is drawn. Zero-count
/// buckets are omitted.
#[must_use]
pub fn sentiment_bar(bullish: u32, bearish: u32, neutral: u32) -> Option<Vec<BarSegment>> {
    let total = u64::from(bullish) + u64::from(bearish) + u64::from(neutral);
    if total == 0 {
        return None;
    }
    #[allow(clippy::cast_precision_loss)]
    let total = total as f64;

    let segments = [
        (Bucket::Bullish, bullish),
        (Bucket::Neutral, neutral),
        (Bucket::Bearish, bearish),
    ]
    .into_iter()
    .filter(|(_, count)| *count > 0)
    .map(|(bucket, count)| BarSegment {
        bucket,
        count,
        percent: f64::from(count) / total * 100.0,
    })
    .collect();

    Some(segments)
}

/// Badge tone for a raw stance string. Unrecognised stances use the
/// neutral style.
#[must_use]
pub fn stance_tone(raw: &str) -> Tone {
    match Stance::parse(raw) {
        Some(Stance::Positive) => Tone::Positive,
        Some(Stance::Negative) => Tone::Negative,
        Some(Stance::Neutral) | None => Tone::Neutral,
    }
}

/// Confidence as a whole percent (`0.874` -> `87`).
#[must_use]
pub fn confidence_percent(confidence: f64) -> i64 {
    if confidence.is_finite() {
        round_half_up(confidence * 100.0)
    } else {
        0
    }
}

/// Label and tone for the retail/insider sentiment rows.
#[must_use]
pub fn crowd_sentiment(label: Option<&str>) -> (&str, Tone) {
    match label {
        Some(l @ "Bullish") => (l, Tone::Positive),
        Some(l @ "Bearish") => (l, Tone::Negative),
        Some(l) if !l.is_empty() => (l, Tone::Neutral),
        _ => ("N/A", Tone::Neutral),
    }
}

/// Colour of a politician trade. Only the exact value `"Purchase"` is
/// treated as a buy.
#[must_use]
pub fn trade_tone(trade_type: &str) -> Tone {
    if trade_type == "Purchase" {
        Tone::Positive
    } else {
        Tone::Negative
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_is_absent_for_zero_total() {
        assert!(sentiment_bar(0, 0, 0).is_none());
    }

    #[test]
    fn bar_orders_bullish_neutral_bearish_and_skips_zero() {
        let segments = sentiment_bar(3, 2, 0).expect("bar should render");
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].bucket, Bucket::Bullish);
        assert_eq!(segments[1].bucket, Bucket::Bearish);
        assert_eq!(segments[0].tooltip(), "Bullish: 3 (60.0%)");
        assert_eq!(segments[1].tooltip(), "Bearish: 2 (40.0%)");
    }

    #[test]
    fn bar_percentages_sum_to_hundred() {
        let segments = sentiment_bar(1, 1, 1).expect("bar should render");
        let sum: f64 = segments.iter().map(|s| s.percent).sum();
        assert!((sum - 100.0).abs() < 1e-9, "sum was {sum}");
        assert_eq!(segments[1].tooltip(), "Neutral: 1 (33.3%)");
    }

    #[test]
    fn stance_tone_degrades_to_neutral() {
        assert_eq!(stance_tone("positive"), Tone::Positive);
        assert_eq!(stance_tone("negative"), Tone::Negative);
        assert_eq!(stance_tone("neutral"), Tone::Neutral);
        assert_eq!(stance_tone("sideways"), Tone::Neutral);
    }

    #[test]
    fn confidence_percent_rounds() {
        assert_eq!(confidence_percent(0.874), 87);
        assert_eq!(confidence_percent(0.875), 88);
        assert_eq!(confidence_percent(1.0), 100);
        assert_eq!(confidence_percent(f64::NAN), 0);
    }

    #[test]
    fn crowd_sentiment_labels() {
        assert_eq!(crowd_sentiment(Some("Bullish")), ("Bullish", Tone::Positive));
        assert_eq!(crowd_sentiment(Some("Bearish")), ("Bearish", Tone::Negative));
        assert_eq!(crowd_sentiment(Some("Neutral")), ("Neutral", Tone::Neutral));
        assert_eq!(crowd_sentiment(None), ("N/A", Tone::Neutral));
        assert_eq!(crowd_sentiment(Some("")), ("N/A", Tone::Neutral));
    }

    #[test]
    fn trade_tone_matches_purchase_exactly() {
        assert_eq!(trade_tone("Purchase"), Tone::Positive);
        assert_eq!(trade_tone("Sale"), Tone::Negative);
        assert_eq!(trade_tone("purchase"), Tone::Negative);
        assert_eq!(trade_tone("Sale (Partial)"), Tone::Negative);
    }
}
