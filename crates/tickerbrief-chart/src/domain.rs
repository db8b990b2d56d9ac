use tickerbrief_core::PricePoint;

/// Fraction of the price spread added above and below the data.
pub const DOMAIN_PADDING: f64 = 0.1;

/// Vertical axis bounds for the price chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisDomain {
    pub min: f64,
    pub max: f64,
}

/// `[min - 10% spread, max + 10% spread]` over the prices in `series`.
///
/// Returns `None` for an empty series (or one with no finite price); the
/// caller shows a loading or empty state instead of an axis.
#[must_use]
pub fn y_axis_domain(series: &[PricePoint]) -> Option<AxisDomain> {
    let mut prices = series.iter().map(|p| p.price).filter(|p| p.is_finite());
    let first = prices.next()?;
    let (low, high) = prices.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p)));
    let padding = (high - low) * DOMAIN_PADDING;
    Some(AxisDomain {
        min: low - padding,
        max: high + padding,
    })
}
