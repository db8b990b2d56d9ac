//! Async driver for [`ChartState`].
//!
//! Each dispatched request runs as its own Tokio task and reports back over
//! a channel. Completions are fed through the state machine in arrival
//! order, which discards anything but the newest request, so a slow response
//! for an abandoned range can never overwrite a newer one.

use std::sync::Arc;

use tickerbrief_client::FetchError;
use tickerbrief_core::{HistoryPeriod, PricePoint};
use tokio::sync::mpsc;

use crate::domain::{y_axis_domain, AxisDomain};
use crate::series::{build_series, ChartSeries, MovingAverageKind};
use crate::source::HistorySource;
use crate::state::{ChartEvent, ChartState, HistoryRequest, Transition};

struct Completion {
    request: HistoryRequest,
    result: Result<Vec<PricePoint>, FetchError>,
}

/// What the chart renderer should draw right now.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartView<'a> {
    /// No data yet and a fetch is running.
    Loading,
    /// The latest fetch finished without any drawable points.
    NoData,
    Ready {
        domain: AxisDomain,
        series: ChartSeries<'a>,
        range: HistoryPeriod,
        ma_kind: MovingAverageKind,
        /// A newer range is loading; the lines show the previous data.
        refreshing: bool,
    },
}

impl<'a> ChartView<'a> {
    #[must_use]
    pub fn from_state(state: &'a ChartState) -> Self {
        let Some(domain) = y_axis_domain(state.series()) else {
            return if state.is_loading() {
                ChartView::Loading
            } else {
                ChartView::NoData
            };
        };
        ChartView::Ready {
            domain,
            series: build_series(state.series(), state.ma_kind()),
            range: state.range(),
            ma_kind: state.ma_kind(),
            refreshing: state.is_loading(),
        }
    }
}

/// Owns one chart's state and its in-flight history fetches.
///
/// Methods that may dispatch a fetch spawn a Tokio task and must be called
/// from within a runtime.
pub struct PriceHistoryController<S> {
    source: Arc<S>,
    state: ChartState,
    tx: mpsc::UnboundedSender<Completion>,
    rx: mpsc::UnboundedReceiver<Completion>,
    in_flight: usize,
}

impl<S: HistorySource> PriceHistoryController<S> {
    pub fn new(source: Arc<S>, symbol: impl Into<String>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            source,
            state: ChartState::new(symbol),
            tx,
            rx,
            in_flight: 0,
        }
    }

    /// Start loading the initial range.
    pub fn mount(&mut self) -> Transition {
        self.handle(ChartEvent::Mounted)
    }

    pub fn select_range(&mut self, period: HistoryPeriod) -> Transition {
        self.handle(ChartEvent::RangeChanged(period))
    }

    /// Switch the overlay family. Never fetches.
    pub fn select_moving_average(&mut self, kind: MovingAverageKind) -> Transition {
        self.handle(ChartEvent::MovingAverageChanged(kind))
    }

    pub fn change_symbol(&mut self, symbol: impl Into<String>) -> Transition {
        self.handle(ChartEvent::SymbolChanged(symbol.into()))
    }

    #[must_use]
    pub fn state(&self) -> &ChartState {
        &self.state
    }

    /// Number of spawned fetches whose completion has not been processed,
    /// including superseded ones.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    #[must_use]
    pub fn view(&self) -> ChartView<'_> {
        ChartView::from_state(&self.state)
    }

    /// Wait for the next fetch to finish and apply it.
    ///
    /// Returns `None` when nothing is in flight.
    pub async fn next_completion(&mut self) -> Option<Transition> {
        if self.in_flight == 0 {
            return None;
        }
        let Completion { request, result } = self.rx.recv().await?;
        self.in_flight -= 1;

        let event = match result {
            Ok(series) => ChartEvent::FetchSucceeded {
                request_id: request.id,
                series,
            },
            Err(e) => {
                if self.state.pending_request() == Some(request.id) {
                    tracing::warn!(
                        symbol = %request.symbol,
                        period = %request.period,
                        error = %e,
                        "failed to load price history; keeping previous series"
                    );
                }
                ChartEvent::FetchFailed {
                    request_id: request.id,
                    reason: e.to_string(),
                }
            }
        };

        let transition = self.state.apply(event);
        match &transition {
            Transition::Committed { request_id, points } => tracing::debug!(
                request_id,
                points,
                symbol = %request.symbol,
                period = %request.period,
                "committed price history"
            ),
            Transition::Discarded { request_id } => tracing::debug!(
                request_id,
                period = %request.period,
                "discarding superseded price history response"
            ),
            _ => {}
        }
        Some(transition)
    }

    /// Process completions until no fetch is in flight.
    pub async fn settle(&mut self) {
        while self.next_completion().await.is_some() {}
    }

    fn handle(&mut self, event: ChartEvent) -> Transition {
        let transition = self.state.apply(event);
        if let Transition::Dispatch(request) = &transition {
            self.spawn_fetch(request.clone());
        }
        transition
    }

    fn spawn_fetch(&mut self, request: HistoryRequest) {
        tracing::debug!(
            request_id = request.id,
            symbol = %request.symbol,
            period = %request.period,
            "dispatching price history fetch"
        );
        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();
        self.in_flight += 1;
        tokio::spawn(async move {
            let result = source.fetch_history(&request.symbol, request.period).await;
            // A closed channel means the controller was dropped.
            let _ = tx.send(Completion { request, result });
        });
    }
}
