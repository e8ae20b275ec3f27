use std::time::Duration;

use bullion_model::{
    enums::{Metal, TimeRange},
    price::PricePoint,
};
use tracing::debug;

use crate::model::generator_error::GeneratorError;

use super::{RandomSource, SharedGenerator};

/// Number of days of history shown for a chart [`TimeRange`].
pub fn fetch_historical_days(range: TimeRange) -> u32 {
    match range {
        TimeRange::OneDay => 1,
        TimeRange::OneWeek => 7,
        TimeRange::OneMonth => 30,
        TimeRange::ThreeMonths => 90,
        TimeRange::SixMonths => 180,
        TimeRange::OneYear => 365,
        TimeRange::FiveYears => 1825,
        TimeRange::All => 3650,
    }
}

/// Serves historical series the way a remote market-data endpoint would, including its latency.
pub struct HistoricalFeed<R> {
    generator: SharedGenerator<R>,
    latency: Duration,
}

impl<R> HistoricalFeed<R>
where
    R: RandomSource,
{
    pub fn new(generator: SharedGenerator<R>, latency: Duration) -> Self {
        Self { generator, latency }
    }

    pub async fn fetch(
        &self,
        metal: Metal,
        range: TimeRange,
    ) -> Result<Vec<PricePoint>, GeneratorError> {
        let days = fetch_historical_days(range);

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let series = self.generator.lock().generate_metal_series(metal, i64::from(days))?;

        debug!(%metal, %range, points = series.len(), "served historical prices");
        Ok(series)
    }
}
