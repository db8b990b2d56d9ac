//! Finite-state model of the price chart.
//!
//! Inputs arrive as [`ChartEvent`]s and each one yields a [`Transition`]
//! telling the driver what happened. Every dispatched fetch gets a fresh
//! request id; only a completion carrying the latest id may touch `series`.

use tickerbrief_core::{HistoryPeriod, PricePoint};

use crate::series::MovingAverageKind;

/// A history fetch the driver must perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRequest {
    pub id: u64,
    pub symbol: String,
    pub period: HistoryPeriod,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChartEvent {
    /// The chart became visible; load the initial range.
    Mounted,
    SymbolChanged(String),
    RangeChanged(HistoryPeriod),
    MovingAverageChanged(MovingAverageKind),
    FetchSucceeded {
        request_id: u64,
        series: Vec<PricePoint>,
    },
    FetchFailed {
        request_id: u64,
        reason: String,
    },
}

/// Outcome of applying one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// A new fetch must be started. Any earlier in-flight fetch is now stale.
    Dispatch(HistoryRequest),
    /// A response for the latest request replaced the series.
    Committed { request_id: u64, points: usize },
    /// The latest request failed; the previous series is kept.
    Failed { request_id: u64 },
    /// A response arrived for a superseded request and was ignored.
    Discarded { request_id: u64 },
    /// Only presentation state changed (moving-average family).
    Redraw,
    /// Nothing changed.
    Unchanged,
}

/// A range selector button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeButton {
    pub period: HistoryPeriod,
    pub label: &'static str,
    pub selected: bool,
}

#[derive(Debug, Clone)]
pub struct ChartState {
    symbol: String,
    range: HistoryPeriod,
    ma_kind: MovingAverageKind,
    series: Vec<PricePoint>,
    loading: bool,
    latest_request: Option<u64>,
    next_request_id: u64,
}

impl ChartState {
    /// Initial state: range `1mo`, SMA overlays, no data, loading.
    #[must_use]
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            range: HistoryPeriod::default(),
            ma_kind: MovingAverageKind::default(),
            series: Vec::new(),
            loading: true,
            latest_request: None,
            next_request_id: 1,
        }
    }

    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    #[must_use]
    pub fn range(&self) -> HistoryPeriod {
        self.range
    }

    #[must_use]
    pub fn ma_kind(&self) -> MovingAverageKind {
        self.ma_kind
    }

    /// Last committed series.
    #[must_use]
    pub fn series(&self) -> &[PricePoint] {
        &self.series
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Id of the request whose response may still be committed.
    #[must_use]
    pub fn pending_request(&self) -> Option<u64> {
        self.latest_request
    }

    #[must_use]
    pub fn range_buttons(&self) -> Vec<RangeButton> {
        HistoryPeriod::ALL
            .into_iter()
            .map(|period| RangeButton {
                period,
                label: period.label(),
                selected: period == self.range,
            })
            .collect()
    }

    pub fn apply(&mut self, event: ChartEvent) -> Transition {
        match event {
            ChartEvent::Mounted => Transition::Dispatch(self.dispatch()),
            ChartEvent::SymbolChanged(symbol) => {
                if symbol == self.symbol {
                    return Transition::Unchanged;
                }
                self.symbol = symbol;
                // The old series belongs to another ticker.
                self.series.clear();
                Transition::Dispatch(self.dispatch())
            }
            ChartEvent::RangeChanged(range) => {
                if range == self.range {
                    return Transition::Unchanged;
                }
                self.range = range;
                Transition::Dispatch(self.dispatch())
            }
            ChartEvent::MovingAverageChanged(kind) => {
                if kind == self.ma_kind {
                    return Transition::Unchanged;
                }
                self.ma_kind = kind;
                Transition::Redraw
            }
            ChartEvent::FetchSucceeded { request_id, series } => {
                if !self.is_latest(request_id) {
                    return Transition::Discarded { request_id };
                }
                let points = series.len();
                self.series = series;
                self.settle();
                Transition::Committed { request_id, points }
            }
            ChartEvent::FetchFailed { request_id, .. } => {
                if !self.is_latest(request_id) {
                    return Transition::Discarded { request_id };
                }
                self.settle();
                Transition::Failed { request_id }
            }
        }
    }

    fn dispatch(&mut self) -> HistoryRequest {
        let id = self.next_request_id;
        self.next_request_id += 1;
        self.latest_request = Some(id);
        self.loading = true;
        HistoryRequest {
            id,
            symbol: self.symbol.clone(),
            period: self.range,
        }
    }

    fn is_latest(&self, request_id: u64) -> bool {
        self.latest_request == Some(request_id)
    }

    fn settle(&mut self) {
        self.loading = false;
        self.latest_request = None;
    }
}

#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
