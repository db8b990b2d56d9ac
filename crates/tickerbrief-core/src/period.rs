use std::str::FromStr;

use crate::error::CoreError;

/// Price history look-back windows accepted by the history endpoint.
///
/// The wire value is passed through verbatim as `?period=`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HistoryPeriod {
    OneDay,
    FiveDays,
    #[default]
    OneMonth,
    SixMonths,
    OneYear,
    Max,
}

impl HistoryPeriod {
    /// All periods in range-selector order.
    pub const ALL: [HistoryPeriod; 6] = [
        HistoryPeriod::OneDay,
        HistoryPeriod::FiveDays,
        HistoryPeriod::OneMonth,
        HistoryPeriod::SixMonths,
        HistoryPeriod::OneYear,
        HistoryPeriod::Max,
    ];

    /// Query-string value.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::OneDay => "1d",
            Self::FiveDays => "5d",
            Self::OneMonth => "1mo",
            Self::SixMonths => "6mo",
            Self::OneYear => "1y",
            Self::Max => "max",
        }
    }

    /// Button label in the range selector.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::OneDay => "1D",
            Self::FiveDays => "1W",
            Self::OneMonth => "1M",
            Self::SixMonths => "6M",
            Self::OneYear => "1Y",
            Self::Max => "All",
        }
    }
}

impl std::fmt::Display for HistoryPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HistoryPeriod {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| CoreError::UnknownPeriod(s.to_string()))
    }
}
