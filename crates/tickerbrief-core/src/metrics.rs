//! Threshold classifiers for the safety badge, options flow and volume cards.
//!
//! Every classifier takes optional inputs and returns `None` (or
//! [`SafetyLevel::Unknown`]) instead of producing `NaN` or dividing by zero.

/// Display severity shared by all derived widgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Positive,
    Caution,
    Negative,
    Neutral,
}

pub const SAFE_THRESHOLD: f64 = 0.7;
pub const CAUTION_THRESHOLD: f64 = 0.4;

/// Put/call ratio below which flow is bullish (more calls).
pub const BULLISH_FLOW_BELOW: f64 = 0.7;
/// Put/call ratio above which flow is bearish (more puts).
pub const BEARISH_FLOW_ABOVE: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SafetyLevel {
    Safe,
    Caution,
    Risky,
    Unknown,
}

impl SafetyLevel {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Safe => "Safe",
            Self::Caution => "Caution",
            Self::Risky => "Risky",
            Self::Unknown => "Unknown",
        }
    }

    #[must_use]
    pub fn tone(self) -> Tone {
        match self {
            Self::Safe => Tone::Positive,
            Self::Caution => Tone::Caution,
            Self::Risky => Tone::Negative,
            Self::Unknown => Tone::Neutral,
        }
    }
}

/// Classify a safety score. Boundaries belong to the higher tier.
#[must_use]
pub fn classify_safety(score: Option<f64>) -> SafetyLevel {
    match score {
        Some(s) if !s.is_finite() => SafetyLevel::Unknown,
        Some(s) if s >= SAFE_THRESHOLD => SafetyLevel::Safe,
        Some(s) if s >= CAUTION_THRESHOLD => SafetyLevel::Caution,
        Some(_) => SafetyLevel::Risky,
        None => SafetyLevel::Unknown,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionsFlow {
    Bullish,
    Neutral,
    Bearish,
}

impl OptionsFlow {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Bullish => "Bullish Flow",
            Self::Neutral => "Neutral",
            Self::Bearish => "Bearish Flow",
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

/// Classify a put/call ratio. `None` means the options card is not shown.
#[must_use]
pub fn classify_options_flow(ratio: Option<f64>) -> Option<OptionsFlow> {
    let ratio = ratio.filter(|r| r.is_finite())?;
    let flow = if ratio < BULLISH_FLOW_BELOW {
        OptionsFlow::Bullish
    } else if ratio > BEARISH_FLOW_ABOVE {
        OptionsFlow::Bearish
    } else {
        OptionsFlow::Neutral
    };
    Some(flow)
}

/// Width of the options gauge, in percent. A ratio of 2.0 fills the gauge;
/// the bar never drops below 10%.
#[must_use]
pub fn options_gauge_percent(ratio: f64) -> f64 {
    (ratio / 2.0 * 100.0).clamp(10.0, 100.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolumeDirection {
    Above,
    Below,
}

impl VolumeDirection {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Above => "above",
            Self::Below => "below",
        }
    }

    #[must_use]
    pub fn tone(self) -> Tone {
        match self {
            Self::Above => Tone::Positive,
            Self::Below => Tone::Negative,
        }
    }
}

/// Today's volume relative to the average volume.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VolumeComparison {
    pub volume: f64,
    pub average_volume: f64,
    /// Signed, rounded percent difference from the average.
    pub percent_diff: i64,
    pub direction: VolumeDirection,
}

impl VolumeComparison {
    /// Magnitude shown on the card (`"50% vs Avg"`).
    #[must_use]
    pub fn abs_percent(&self) -> u64 {
        self.percent_diff.unsigned_abs()
    }

    #[must_use]
    pub fn summary(&self) -> String {
        format!("{}% vs Avg", self.abs_percent())
    }
}

/// Compare `volume` against `average_volume`.
///
/// Returns `None` when either value is missing, zero or non-finite, so the
/// division is never attempted on a bad denominator.
#[must_use]
pub fn compare_volume(volume: Option<f64>, average_volume: Option<f64>) -> Option<VolumeComparison> {
    let usable = |v: Option<f64>| v.filter(|x| x.is_finite() && *x != 0.0);
    let volume = usable(volume)?;
    let average_volume = usable(average_volume)?;

    let direction = if volume > average_volume {
        VolumeDirection::Above
    } else {
        VolumeDirection::Below
    };
    let percent_diff = round_half_up((volume - average_volume) / average_volume * 100.0);

    Some(VolumeComparison {
        volume,
        average_volume,
        percent_diff,
        direction,
    })
}

/// Format a share count in millions with one decimal (`1_500_000.0` -> `"1.5M"`).
#[must_use]
pub fn format_millions(value: f64) -> String {
    format!("{:.1}M", value / 1_000_000.0)
}

/// Rounds to the nearest integer, with halves going toward positive infinity.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

#[cfg(test)]
#[path = "metrics_test.rs"]
mod tests;
