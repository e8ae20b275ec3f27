use std::sync::Arc;

use bullion_model::{
    calculator::round2,
    identifiers::{CurrencyCode, UnitCode},
    tables::MarketTables,
};
use tracing::debug;

use crate::model::conversion_error::ConversionError;

/// Longest prefix of `input` that reads as a decimal number (sign, digits, fraction, exponent).
fn leading_number(input: &str) -> &str {
    let bytes = input.as_bytes();
    let is_digit = |position: usize| matches!(bytes.get(position), Some(b) if b.is_ascii_digit());

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }

    let integer_start = end;
    while is_digit(end) {
        end += 1;
    }
    let mut digits = end - integer_start;

    if bytes.get(end) == Some(&b'.') {
        let fraction_start = end + 1;
        let mut fraction_end = fraction_start;
        while is_digit(fraction_end) {
            fraction_end += 1;
        }
        digits += fraction_end - fraction_start;
        if digits > 0 {
            end = fraction_end;
        }
    }

    if digits == 0 {
        return "";
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exponent_end = end + 1;
        if matches!(bytes.get(exponent_end), Some(b'+' | b'-')) {
            exponent_end += 1;
        }
        let exponent_digits = exponent_end;
        while is_digit(exponent_end) {
            exponent_end += 1;
        }
        if exponent_end > exponent_digits {
            end = exponent_end;
        }
    }

    &input[..end]
}

/// Parse a calculator amount from its leading number, so `"10g"` reads as 10.
///
/// Input without a leading number, or a negative or non-finite amount, counts as zero.
pub fn parse_amount(input: &str) -> f64 {
    match leading_number(input.trim_start()).parse::<f64>() {
        Ok(amount) if amount.is_finite() && amount >= 0.0 => amount,
        _ => {
            debug!(input, "invalid calculator amount, treating as zero");
            0.0
        }
    }
}

/// Maps (price, unit, currency) triples to display values using the shared [`MarketTables`].
///
/// Every conversion goes through one formula:
/// `round2(price_per_oz * rate(to) / rate(from) * troy_ounces(unit))`.
/// The calculator path ([`ConversionEngine::value_for`]) is the same formula with
/// `from = USD` and `price_per_oz = amount * base_price`.
#[derive(Debug, Clone)]
pub struct ConversionEngine {
    tables: Arc<MarketTables>,
}

impl ConversionEngine {
    pub fn new(tables: Arc<MarketTables>) -> Self {
        Self { tables }
    }

    pub fn tables(&self) -> &MarketTables {
        &self.tables
    }

    fn rate(&self, code: &CurrencyCode) -> Result<f64, ConversionError> {
        self.tables
            .rate(code)
            .map_err(|_| ConversionError::UnknownCurrencyCode(code.clone()))
    }

    /// Convert a per-troy-ounce price quoted in `from` into the price of one `unit` in `to`.
    ///
    /// Unknown currencies fail; unknown units are priced as one troy ounce.
    pub fn convert(
        &self,
        price_per_oz: f64,
        from: &CurrencyCode,
        to: &CurrencyCode,
        unit: &UnitCode,
    ) -> Result<f64, ConversionError> {
        let from_rate = self.rate(from)?;
        let to_rate = self.rate(to)?;
        let troy_ounces = self.tables.units.multiplier_or_troy_ounce(unit);

        Ok(round2(price_per_oz * (to_rate / from_rate) * troy_ounces))
    }

    /// Value of `amount` units of metal priced at `base_price` USD per troy ounce.
    pub fn value_for(
        &self,
        amount: f64,
        unit: &UnitCode,
        currency: &CurrencyCode,
        base_price: f64,
    ) -> Result<f64, ConversionError> {
        let amount = if amount.is_finite() && amount >= 0.0 {
            amount
        } else {
            0.0
        };

        self.convert(amount * base_price, &CurrencyCode::USD, currency, unit)
    }

    /// [`ConversionEngine::value_for`] with the amount typed by a user.
    pub fn value_for_input(
        &self,
        amount: &str,
        unit: &UnitCode,
        currency: &CurrencyCode,
        base_price: f64,
    ) -> Result<f64, ConversionError> {
        self.value_for(parse_amount(amount), unit, currency, base_price)
    }

    /// Price of a single `unit` in `currency`.
    pub fn price_per_unit(
        &self,
        base_price: f64,
        unit: &UnitCode,
        currency: &CurrencyCode,
    ) -> Result<f64, ConversionError> {
        self.value_for(1.0, unit, currency, base_price)
    }
}
