use bullion_model::{calculator::percent_change, price::PricePoint};
use serde::{Deserialize, Serialize};

/// Performance of a series over its whole window, as shown above a price chart.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SeriesSummary {
    pub change: f64,
    pub change_percent: f64,
    pub high: f64,
    pub low: f64,
}

impl SeriesSummary {
    /// Fewer than two points summarise to zeros.
    pub fn from_series(series: &[PricePoint]) -> Self {
        let (first, last) = match (series.first(), series.last()) {
            (Some(first), Some(last)) if series.len() >= 2 => (first, last),
            _ => return Self::default(),
        };

        let change = last.price - first.price;
        let (high, low) = series
            .iter()
            .fold((f64::MIN, f64::MAX), |(high, low), point| {
                (high.max(point.high), low.min(point.low))
            });

        Self {
            change,
            change_percent: percent_change(first.price, last.price).unwrap_or(0.0),
            high,
            low,
        }
    }

    pub fn is_positive(&self) -> bool {
        self.change >= 0.0
    }
}
