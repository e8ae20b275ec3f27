use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    enums::Metal,
    identifiers::{CurrencyCode, UnitCode},
};

/// Daily OHLC [`PricePoint`] model. `price` mirrors `close`.
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug, Deserialize, Serialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub price: f64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

/// Spot quote snapshot for one [`Metal`].
#[derive(Clone, PartialEq, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentPrice {
    pub metal: Metal,
    pub price: f64,
    pub currency: CurrencyCode,
    pub change: f64,
    pub change_percent: f64,
    #[serde(rename = "high24h")]
    pub high_24h: f64,
    #[serde(rename = "low24h")]
    pub low_24h: f64,
    pub timestamp: DateTime<Utc>,
    pub unit: UnitCode,
}

/// Gold and silver quotes generated together for one refresh.
#[derive(Clone, PartialEq, Debug, Deserialize, Serialize)]
pub struct MetalPrices {
    pub gold: CurrentPrice,
    pub silver: CurrentPrice,
}

impl MetalPrices {
    pub fn get(&self, metal: Metal) -> &CurrentPrice {
        match metal {
            Metal::Gold => &self.gold,
            Metal::Silver => &self.silver,
        }
    }
}
