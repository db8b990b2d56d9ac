//! Controller tests against a gated in-memory source and a wiremock backend.

use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use serde_json::json;
use tickerbrief_chart::{
    ChartView, HistorySource, MovingAverageKind, PriceHistoryController, Transition,
};
use tickerbrief_client::{BriefClient, FetchError};
use tickerbrief_core::{HistoryPeriod, PricePoint};
use tokio::sync::oneshot;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

type HistoryResult = Result<Vec<PricePoint>, FetchError>;

/// Each period's fetch blocks until the test releases it.
#[derive(Default)]
struct GatedSource {
    gates: Mutex<HashMap<HistoryPeriod, oneshot::Receiver<HistoryResult>>>,
    calls: AtomicUsize,
}

impl GatedSource {
    fn gate(&self, period: HistoryPeriod) -> oneshot::Sender<HistoryResult> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().expect("gate lock").insert(period, rx);
        tx
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl HistorySource for GatedSource {
    fn fetch_history(
        &self,
        _symbol: &str,
        period: HistoryPeriod,
    ) -> impl Future<Output = HistoryResult> + Send {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let gate = self.gates.lock().expect("gate lock").remove(&period);
        async move {
            match gate {
                Some(rx) => rx.await.unwrap_or_else(|_| Ok(Vec::new())),
                None => Ok(Vec::new()),
            }
        }
    }
}

fn point(time: &str, price: f64) -> PricePoint {
    PricePoint {
        time: time.to_string(),
        price,
        ma50: None,
        ma100: None,
        ema50: None,
        ema100: None,
    }
}

fn prices(controller: &PriceHistoryController<GatedSource>) -> Vec<f64> {
    controller.state().series().iter().map(|p| p.price).collect()
}

#[tokio::test]
async fn slower_superseded_range_never_overwrites_newer_one() {
    let source = Arc::new(GatedSource::default());
    let one_month = source.gate(HistoryPeriod::OneMonth);
    let one_year = source.gate(HistoryPeriod::OneYear);
    let mut controller = PriceHistoryController::new(Arc::clone(&source), "AAPL");

    assert!(matches!(controller.mount(), Transition::Dispatch(_)));
    assert!(matches!(
        controller.select_range(HistoryPeriod::OneYear),
        Transition::Dispatch(_)
    ));
    assert_eq!(controller.in_flight(), 2);

    one_year
        .send(Ok(vec![point("y1", 150.0), point("y2", 160.0)]))
        .expect("receiver alive");
    let committed = controller.next_completion().await;
    assert!(
        matches!(committed, Some(Transition::Committed { points: 2, .. })),
        "expected commit, got {committed:?}"
    );

    one_month
        .send(Ok(vec![point("m1", 1.0)]))
        .expect("receiver alive");
    let late = controller.next_completion().await;
    assert!(
        matches!(late, Some(Transition::Discarded { .. })),
        "expected discard, got {late:?}"
    );

    assert_eq!(prices(&controller), [150.0, 160.0]);
    assert_eq!(controller.state().range(), HistoryPeriod::OneYear);
    assert!(!controller.state().is_loading());
    assert_eq!(controller.next_completion().await, None);
}

#[tokio::test]
async fn superseded_range_arriving_first_keeps_loading() {
    let source = Arc::new(GatedSource::default());
    let one_month = source.gate(HistoryPeriod::OneMonth);
    let one_year = source.gate(HistoryPeriod::OneYear);
    let mut controller = PriceHistoryController::new(Arc::clone(&source), "AAPL");

    controller.mount();
    controller.select_range(HistoryPeriod::OneYear);

    one_month
        .send(Ok(vec![point("m1", 1.0)]))
        .expect("receiver alive");
    assert!(matches!(
        controller.next_completion().await,
        Some(Transition::Discarded { .. })
    ));
    assert!(controller.state().is_loading());
    assert_eq!(controller.view(), ChartView::Loading);

    one_year
        .send(Ok(vec![point("y1", 150.0)]))
        .expect("receiver alive");
    controller.settle().await;
    assert_eq!(prices(&controller), [150.0]);
}

#[tokio::test]
async fn failed_fetch_keeps_previous_series() {
    let source = Arc::new(GatedSource::default());
    let one_month = source.gate(HistoryPeriod::OneMonth);
    let five_days = source.gate(HistoryPeriod::FiveDays);
    let mut controller = PriceHistoryController::new(Arc::clone(&source), "AAPL");

    controller.mount();
    one_month
        .send(Ok(vec![point("t1", 10.0), point("t2", 12.0)]))
        .expect("receiver alive");
    controller.settle().await;

    controller.select_range(HistoryPeriod::FiveDays);
    match controller.view() {
        ChartView::Ready { refreshing, .. } => assert!(refreshing),
        other => panic!("expected stale data while refreshing, got {other:?}"),
    }

    five_days
        .send(Err(FetchError::Status {
            status: 503,
            url: "http://test/api/v1/ticker/AAPL/history".to_string(),
        }))
        .expect("receiver alive");
    assert!(matches!(
        controller.next_completion().await,
        Some(Transition::Failed { .. })
    ));

    assert_eq!(prices(&controller), [10.0, 12.0]);
    assert!(!controller.state().is_loading());
    assert!(matches!(
        controller.view(),
        ChartView::Ready {
            refreshing: false,
            ..
        }
    ));
}

#[tokio::test]
async fn moving_average_toggle_redraws_without_fetching() {
    let source = Arc::new(GatedSource::default());
    let mut controller = PriceHistoryController::new(Arc::clone(&source), "AAPL");

    controller.mount();
    controller.settle().await;
    assert_eq!(source.calls(), 1);

    assert_eq!(
        controller.select_moving_average(MovingAverageKind::Ema),
        Transition::Redraw
    );
    assert_eq!(
        controller.select_moving_average(MovingAverageKind::Ema),
        Transition::Unchanged
    );
    assert_eq!(controller.in_flight(), 0);
    assert_eq!(source.calls(), 1);
    assert_eq!(controller.state().ma_kind(), MovingAverageKind::Ema);
}

#[tokio::test]
async fn empty_series_after_load_is_no_data() {
    let source = Arc::new(GatedSource::default());
    let mut controller = PriceHistoryController::new(Arc::clone(&source), "AAPL");

    assert_eq!(controller.view(), ChartView::Loading);
    controller.mount();
    controller.settle().await;

    assert_eq!(controller.view(), ChartView::NoData);
}

#[tokio::test]
async fn symbol_change_fetches_new_symbol_at_current_range() {
    let source = Arc::new(GatedSource::default());
    let mut controller = PriceHistoryController::new(Arc::clone(&source), "AAPL");
    controller.mount();
    controller.settle().await;
    controller.select_range(HistoryPeriod::SixMonths);
    controller.settle().await;

    match controller.change_symbol("MSFT") {
        Transition::Dispatch(request) => {
            assert_eq!(request.symbol, "MSFT");
            assert_eq!(request.period, HistoryPeriod::SixMonths);
        }
        other => panic!("expected Dispatch, got {other:?}"),
    }
    controller.settle().await;
    assert_eq!(source.calls(), 3);
}

#[tokio::test]
async fn drives_brief_client_against_http_backend() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/ticker/NVDA/history"))
        .and(query_param("period", "1mo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "time": "2024-07-01", "price": 124.3, "ma50": null, "ema50": 118.2 },
            { "time": "2024-07-02", "price": 122.67, "ma50": 110.4, "ema50": 118.5 },
            { "time": "2024-07-03", "price": 128.28, "ma50": 111.0, "ema50": 118.9 }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = BriefClient::with_base_url(&format!("{}/api/v1", server.uri()), 5)
        .expect("client construction should not fail");
    let mut controller = PriceHistoryController::new(Arc::new(client), "NVDA");
    controller.mount();
    controller.settle().await;

    match controller.view() {
        ChartView::Ready {
            domain,
            series,
            ma_kind,
            refreshing,
            ..
        } => {
            assert!(!refreshing);
            assert_eq!(ma_kind, MovingAverageKind::Sma);
            assert_eq!(series.price.points.len(), 3);
            assert_eq!(series.short_ma.starts_at(), Some(1));
            assert!(domain.min < 122.67 && domain.max > 128.28);
        }
        other => panic!("expected Ready, got {other:?}"),
    }
}
