use std::future::Future;

use tickerbrief_client::{BriefClient, FetchError};
use tickerbrief_core::{HistoryPeriod, PricePoint};

/// Anything that can fetch a price history series.
pub trait HistorySource: Send + Sync + 'static {
    fn fetch_history(
        &self,
        symbol: &str,
        period: HistoryPeriod,
    ) -> impl Future<Output = Result<Vec<PricePoint>, FetchError>> + Send;
}

impl HistorySource for BriefClient {
    fn fetch_history(
        &self,
        symbol: &str,
        period: HistoryPeriod,
    ) -> impl Future<Output = Result<Vec<PricePoint>, FetchError>> + Send {
        self.fetch_ticker_history(symbol, period)
    }
}
