//! Line assembly for the price chart.
//!
//! Moving averages are sparse: the backend leaves them `null` until a window
//! has enough history. Overlay lines skip missing points and connect the
//! neighbours, so a line starts at its first non-null value and never breaks
//! in the middle. The price line always covers every point.

use tickerbrief_core::PricePoint;

/// Which pre-computed moving-average family the overlays read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MovingAverageKind {
    #[default]
    Sma,
    Ema,
}

impl MovingAverageKind {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Sma => "SMA",
            Self::Ema => "EMA",
        }
    }

    /// The 50-period value of `point` for this family.
    #[must_use]
    pub fn short(self, point: &PricePoint) -> Option<f64> {
        match self {
            Self::Sma => point.ma50,
            Self::Ema => point.ema50,
        }
    }

    /// The 100-period value of `point` for this family.
    #[must_use]
    pub fn long(self, point: &PricePoint) -> Option<f64> {
        match self {
            Self::Sma => point.ma100,
            Self::Ema => point.ema100,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinePoint<'a> {
    /// Position in the source series (the shared x axis).
    pub index: usize,
    pub time: &'a str,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Line<'a> {
    pub name: String,
    pub points: Vec<LinePoint<'a>>,
}

impl<'a> Line<'a> {
    fn collect<F>(name: String, series: &'a [PricePoint], value: F) -> Self
    where
        F: Fn(&PricePoint) -> Option<f64>,
    {
        let points = series
            .iter()
            .enumerate()
            .filter_map(|(index, p)| {
                value(p)
                    .filter(|v| v.is_finite())
                    .map(|value| LinePoint {
                        index,
                        time: p.time.as_str(),
                        value,
                    })
            })
            .collect();
        Self { name, points }
    }

    /// Index of the first drawn point, if any.
    #[must_use]
    pub fn starts_at(&self) -> Option<usize> {
        self.points.first().map(|p| p.index)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// The three lines drawn by the chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries<'a> {
    pub price: Line<'a>,
    pub short_ma: Line<'a>,
    pub long_ma: Line<'a>,
}

/// Assemble the price line and the `kind` overlays from `series`.
#[must_use]
pub fn build_series(series: &[PricePoint], kind: MovingAverageKind) -> ChartSeries<'_> {
    ChartSeries {
        price: Line::collect("Price".to_string(), series, |p| Some(p.price)),
        short_ma: Line::collect(format!("50-Day {}", kind.label()), series, |p| kind.short(p)),
        long_ma: Line::collect(format!("100-Day {}", kind.label()), series, |p| kind.long(p)),
    }
}
