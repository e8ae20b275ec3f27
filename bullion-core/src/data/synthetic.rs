use bullion_model::{
    calculator::round2,
    enums::Metal,
    identifiers::{CurrencyCode, UnitCode},
    price::{CurrentPrice, MetalPrices, PricePoint},
};
use chrono::{Days, NaiveDate, Utc};
use rand::{rngs::StdRng, SeedableRng};
use tracing::debug;

use crate::model::{config::GeneratorConfig, generator_error::GeneratorError};

use super::RandomSource;

/// Draws below this value push the walk down, so the series drifts slightly upwards.
const DAILY_DRIFT_PIVOT: f64 = 0.48;
const DAILY_MAX_MOVE: f64 = 0.03;
const INTRADAY_MAX_BAND: f64 = 0.015;

/// Shape of a spot quote for one metal.
#[derive(Copy, Clone, PartialEq, Debug)]
struct QuoteProfile {
    /// `change` is drawn from `(-change_span, change_span)`.
    change_span: f64,
    /// `high_24h`/`low_24h` are `price * (1 ± band_24h)`.
    band_24h: f64,
}

impl QuoteProfile {
    fn for_metal(metal: Metal) -> Self {
        match metal {
            Metal::Gold => Self {
                change_span: 20.0,
                band_24h: 0.008,
            },
            Metal::Silver => Self {
                change_span: 0.4,
                band_24h: 0.012,
            },
        }
    }
}

/// Produces believable daily OHLC series and spot quotes for demonstration purposes.
///
/// Output is random unless the [`RandomSource`] is seeded or scripted; tests should assert
/// shapes and ranges rather than values.
#[derive(Debug)]
pub struct SyntheticSeriesGenerator<R> {
    config: GeneratorConfig,
    rng: R,
}

impl SyntheticSeriesGenerator<StdRng> {
    pub fn from_entropy(config: GeneratorConfig) -> Result<Self, GeneratorError> {
        Self::new(config, StdRng::from_entropy())
    }
}

impl<R> SyntheticSeriesGenerator<R>
where
    R: RandomSource,
{
    pub fn new(config: GeneratorConfig, rng: R) -> Result<Self, GeneratorError> {
        config.validate()?;
        Ok(Self { config, rng })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Series of `days + 1` daily points ending today, using the configured trend.
    pub fn generate_series(
        &mut self,
        base_price: f64,
        days: i64,
    ) -> Result<Vec<PricePoint>, GeneratorError> {
        let trend = self.config.trend;
        self.generate_series_with_trend(base_price, days, trend)
    }

    pub fn generate_series_with_trend(
        &mut self,
        base_price: f64,
        days: i64,
        trend: f64,
    ) -> Result<Vec<PricePoint>, GeneratorError> {
        self.generate_series_ending(base_price, days, trend, Utc::now().date_naive())
    }

    /// Series for the configured base price of `metal`.
    pub fn generate_metal_series(
        &mut self,
        metal: Metal,
        days: i64,
    ) -> Result<Vec<PricePoint>, GeneratorError> {
        let base_price = self.config.base_price(metal);
        self.generate_series(base_price, days)
    }

    /// Generate `days + 1` consecutive daily points, oldest first, the last dated `today`.
    ///
    /// The walk starts at `base_price * (1 - trend * days)` and never drops below
    /// `floor_ratio * base_price`.
    pub fn generate_series_ending(
        &mut self,
        base_price: f64,
        days: i64,
        trend: f64,
        today: NaiveDate,
    ) -> Result<Vec<PricePoint>, GeneratorError> {
        if days < 0 {
            return Err(GeneratorError::InvalidArgument(format!(
                "days must be non-negative, got {days}"
            )));
        }
        if !(base_price.is_finite() && base_price > 0.0) {
            return Err(GeneratorError::InvalidArgument(format!(
                "base_price must be finite and positive, got {base_price}"
            )));
        }
        if !trend.is_finite() {
            return Err(GeneratorError::InvalidArgument(format!(
                "trend must be finite, got {trend}"
            )));
        }

        let first_day = today
            .checked_sub_days(Days::new(days as u64))
            .ok_or_else(|| {
                GeneratorError::InvalidArgument(format!(
                    "{days} days before {today} is outside the calendar range"
                ))
            })?;

        let floor = base_price * self.config.floor_ratio;
        let mut current_price = base_price * (1.0 - trend * days as f64);
        let mut series = Vec::with_capacity(days as usize + 1);

        for (date, _) in first_day.iter_days().zip(0..=days) {
            let daily_change = (self.rng.next_unit() - DAILY_DRIFT_PIVOT) * DAILY_MAX_MOVE * current_price;
            current_price = (current_price + daily_change).max(floor);

            let high = current_price * (1.0 + self.rng.next_unit() * INTRADAY_MAX_BAND);
            let low = current_price * (1.0 - self.rng.next_unit() * INTRADAY_MAX_BAND);
            let open = low + self.rng.next_unit() * (high - low);
            let close = low + self.rng.next_unit() * (high - low);

            series.push(PricePoint {
                date,
                price: round2(close),
                open: round2(open),
                high: round2(high),
                low: round2(low),
                close: round2(close),
            });
        }

        debug!(
            base_price,
            days,
            trend,
            first = %first_day,
            last = %today,
            "generated synthetic price series"
        );

        Ok(series)
    }

    /// Spot quote in USD per troy ounce around the configured base price of `metal`.
    pub fn generate_current_quote(&mut self, metal: Metal) -> CurrentPrice {
        let base_price = self.config.base_price(metal);
        let profile = QuoteProfile::for_metal(metal);

        let variation = (self.rng.next_unit() - 0.5) * 2.0 * self.config.volatility * base_price;
        let price = round2(base_price + variation);

        let change = (self.rng.next_unit() - 0.5) * 2.0 * profile.change_span;
        let change_percent = round2(change / price * 100.0);

        CurrentPrice {
            metal,
            price,
            currency: CurrencyCode::USD,
            change: round2(change),
            change_percent,
            high_24h: price * (1.0 + profile.band_24h),
            low_24h: price * (1.0 - profile.band_24h),
            timestamp: Utc::now(),
            unit: UnitCode::TROY_OUNCE,
        }
    }

    /// Gold then silver quote for one refresh.
    pub fn generate_current_prices(&mut self) -> MetalPrices {
        MetalPrices {
            gold: self.generate_current_quote(Metal::Gold),
            silver: self.generate_current_quote(Metal::Silver),
        }
    }
}
