use std::time::Duration;

use bullion_model::{enums::Metal, tables::MarketTables};
use serde::{Deserialize, Serialize};

use super::{engine_error::EngineError, generator_error::GeneratorError};

pub const DEFAULT_GOLD_BASE_PRICE: f64 = 2650.0;
pub const DEFAULT_SILVER_BASE_PRICE: f64 = 31.50;

/// Parameters of the synthetic quote and series generator. Prices are USD per troy ounce.
#[derive(Copy, Clone, PartialEq, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub gold_base_price: f64,
    pub silver_base_price: f64,
    /// Max relative deviation of a spot quote from its base price (eg/ 0.02 for 2%).
    pub volatility: f64,
    /// Per-day drift used to back-date the seed price of a series.
    pub trend: f64,
    /// A series never walks below `floor_ratio * base_price`.
    pub floor_ratio: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            gold_base_price: DEFAULT_GOLD_BASE_PRICE,
            silver_base_price: DEFAULT_SILVER_BASE_PRICE,
            volatility: 0.02,
            trend: 0.0001,
            floor_ratio: 0.7,
        }
    }
}

impl GeneratorConfig {
    pub fn base_price(&self, metal: Metal) -> f64 {
        match metal {
            Metal::Gold => self.gold_base_price,
            Metal::Silver => self.silver_base_price,
        }
    }

    pub fn validate(&self) -> Result<(), GeneratorError> {
        for (name, value) in [
            ("gold_base_price", self.gold_base_price),
            ("silver_base_price", self.silver_base_price),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(GeneratorError::InvalidArgument(format!(
                    "{name} must be finite and positive, got {value}"
                )));
            }
        }

        if !(self.volatility.is_finite() && (0.0..1.0).contains(&self.volatility)) {
            return Err(GeneratorError::InvalidArgument(format!(
                "volatility must be within [0, 1), got {}",
                self.volatility
            )));
        }

        if !self.trend.is_finite() {
            return Err(GeneratorError::InvalidArgument(format!(
                "trend must be finite, got {}",
                self.trend
            )));
        }

        if !(0.0..=1.0).contains(&self.floor_ratio) {
            return Err(GeneratorError::InvalidArgument(format!(
                "floor_ratio must be within [0, 1], got {}",
                self.floor_ratio
            )));
        }

        Ok(())
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct FeedConfig {
    pub refresh_interval_ms: u64,
    /// Artificial delay before historical data is returned.
    pub simulated_latency_ms: u64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            refresh_interval_ms: 30_000,
            simulated_latency_ms: 300,
        }
    }
}

impl FeedConfig {
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_millis(self.refresh_interval_ms)
    }

    pub fn simulated_latency(&self) -> Duration {
        Duration::from_millis(self.simulated_latency_ms)
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if self.refresh_interval_ms == 0 {
            return Err(EngineError::InvalidConfig(
                "refresh_interval_ms must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Everything needed to assemble a [`MarketDataService`](crate::service::MarketDataService).
#[derive(Clone, PartialEq, Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub tables: MarketTables,
    pub generator: GeneratorConfig,
    pub feed: FeedConfig,
}

impl ServiceConfig {
    pub fn from_json(input: &str) -> Result<Self, EngineError> {
        let config = serde_json::from_str::<ServiceConfig>(input)?;
        config.generator.validate()?;
        config.feed.validate()?;
        Ok(config)
    }
}
