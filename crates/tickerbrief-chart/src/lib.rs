//! Interactive price history chart: range and moving-average selection,
//! re-fetch on change, and axis/series derivation for the renderer.
//!
//! [`state::ChartState`] is a pure state machine. [`PriceHistoryController`]
//! drives it against a [`HistorySource`], dispatching one fetch per range or
//! symbol change and committing only the newest response.

pub mod controller;
pub mod domain;
pub mod series;
pub mod source;
pub mod state;

pub use controller::{ChartView, PriceHistoryController};
pub use domain::{y_axis_domain, AxisDomain};
pub use series::{build_series, ChartSeries, Line, LinePoint, MovingAverageKind};
pub use source::HistorySource;
pub use state::{ChartEvent, ChartState, HistoryRequest, RangeButton, Transition};
