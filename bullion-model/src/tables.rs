use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    error::TableError,
    identifiers::{CurrencyCode, UnitCode},
};

/// (code, name, symbol, units per USD)
const DEFAULT_CURRENCIES: [(&str, &str, &str, f64); 10] = [
    ("USD", "US Dollar", "$", 1.0),
    ("EUR", "Euro", "€", 0.92),
    ("GBP", "British Pound", "£", 0.79),
    ("INR", "Indian Rupee", "₹", 83.12),
    ("AUD", "Australian Dollar", "A$", 1.53),
    ("CAD", "Canadian Dollar", "C$", 1.36),
    ("JPY", "Japanese Yen", "¥", 149.50),
    ("CNY", "Chinese Yuan", "¥", 7.24),
    ("CHF", "Swiss Franc", "CHF", 0.88),
    ("AED", "UAE Dirham", "د.إ", 3.67),
];

/// (code, name, troy ounces per unit)
const DEFAULT_WEIGHT_UNITS: [(&str, &str, f64); 5] = [
    ("oz", "Troy Ounce", 1.0),
    ("g", "Gram", 0.0321507),
    ("kg", "Kilogram", 32.1507),
    ("tola", "Tola", 0.375),
    ("tael", "Tael", 1.20337),
];

#[derive(Clone, PartialEq, Eq, Debug, Deserialize, Serialize)]
pub struct Currency {
    pub code: CurrencyCode,
    pub name: String,
    pub symbol: String,
}

#[derive(Clone, PartialEq, Debug, Deserialize, Serialize)]
pub struct CurrencyRate {
    #[serde(flatten)]
    pub currency: Currency,
    /// Units of this currency per one USD.
    pub rate: f64,
}

#[derive(Clone, PartialEq, Debug, Deserialize, Serialize)]
pub struct WeightUnit {
    pub code: UnitCode,
    pub name: String,
    /// Troy ounces per one of this unit.
    pub troy_ounces: f64,
}

fn check_multiplier(table: &'static str, code: &str, multiplier: f64) -> Result<(), TableError> {
    if multiplier.is_finite() && multiplier > 0.0 {
        Ok(())
    } else {
        Err(TableError::InvalidMultiplier {
            table,
            code: code.to_string(),
            multiplier,
        })
    }
}

/// Currency code -> multiplier relative to USD. Declaration order is preserved for display.
#[derive(Clone, PartialEq, Debug, Deserialize, Serialize)]
#[serde(try_from = "Vec<CurrencyRate>", into = "Vec<CurrencyRate>")]
pub struct CurrencyRateTable {
    entries: Vec<CurrencyRate>,
    index: HashMap<CurrencyCode, usize>,
}

impl CurrencyRateTable {
    pub fn new(entries: Vec<CurrencyRate>) -> Result<Self, TableError> {
        let mut index = HashMap::with_capacity(entries.len());

        for (position, entry) in entries.iter().enumerate() {
            check_multiplier("currency", entry.currency.code.as_ref(), entry.rate)?;

            if index.insert(entry.currency.code.clone(), position).is_some() {
                return Err(TableError::DuplicateCode {
                    table: "currency",
                    code: entry.currency.code.to_string(),
                });
            }
        }

        if !index.contains_key(&CurrencyCode::USD) {
            return Err(TableError::MissingPivot);
        }

        debug!(currencies = entries.len(), "constructed currency rate table");
        Ok(Self { entries, index })
    }

    pub fn rate(&self, code: &CurrencyCode) -> Result<f64, TableError> {
        self.index
            .get(code)
            .map(|&position| self.entries[position].rate)
            .ok_or_else(|| TableError::UnknownCurrencyCode(code.clone()))
    }

    pub fn currency(&self, code: &CurrencyCode) -> Option<&Currency> {
        self.index
            .get(code)
            .map(|&position| &self.entries[position].currency)
    }

    pub fn contains(&self, code: &CurrencyCode) -> bool {
        self.index.contains_key(code)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CurrencyRate> {
        self.entries.iter()
    }

    pub fn currencies(&self) -> impl Iterator<Item = &Currency> {
        self.entries.iter().map(|entry| &entry.currency)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for CurrencyRateTable {
    fn default() -> Self {
        let entries = DEFAULT_CURRENCIES
            .iter()
            .map(|&(code, name, symbol, rate)| CurrencyRate {
                currency: Currency {
                    code: CurrencyCode::from(code),
                    name: name.to_string(),
                    symbol: symbol.to_string(),
                },
                rate,
            })
            .collect::<Vec<_>>();

        let index = entries
            .iter()
            .enumerate()
            .map(|(position, entry)| (entry.currency.code.clone(), position))
            .collect();

        Self { entries, index }
    }
}

impl TryFrom<Vec<CurrencyRate>> for CurrencyRateTable {
    type Error = TableError;

    fn try_from(entries: Vec<CurrencyRate>) -> Result<Self, Self::Error> {
        Self::new(entries)
    }
}

impl From<CurrencyRateTable> for Vec<CurrencyRate> {
    fn from(table: CurrencyRateTable) -> Self {
        table.entries
    }
}

/// Weight unit code -> multiplier converting one unit into troy ounces.
#[derive(Clone, PartialEq, Debug, Deserialize, Serialize)]
#[serde(try_from = "Vec<WeightUnit>", into = "Vec<WeightUnit>")]
pub struct WeightConversionTable {
    entries: Vec<WeightUnit>,
    index: HashMap<UnitCode, usize>,
}

impl WeightConversionTable {
    pub fn new(entries: Vec<WeightUnit>) -> Result<Self, TableError> {
        let mut index = HashMap::with_capacity(entries.len());

        for (position, entry) in entries.iter().enumerate() {
            check_multiplier("weight", entry.code.as_ref(), entry.troy_ounces)?;

            if index.insert(entry.code.clone(), position).is_some() {
                return Err(TableError::DuplicateCode {
                    table: "weight",
                    code: entry.code.to_string(),
                });
            }
        }

        debug!(units = entries.len(), "constructed weight conversion table");
        Ok(Self { entries, index })
    }

    pub fn multiplier(&self, code: &UnitCode) -> Result<f64, TableError> {
        self.index
            .get(code)
            .map(|&position| self.entries[position].troy_ounces)
            .ok_or_else(|| TableError::UnknownUnitCode(code.clone()))
    }

    /// Lenient lookup: unknown units are priced as one troy ounce.
    pub fn multiplier_or_troy_ounce(&self, code: &UnitCode) -> f64 {
        self.multiplier(code).unwrap_or_else(|_| {
            debug!(unit = %code, "unknown weight unit, falling back to troy ounce");
            1.0
        })
    }

    pub fn unit(&self, code: &UnitCode) -> Option<&WeightUnit> {
        self.index.get(code).map(|&position| &self.entries[position])
    }

    pub fn iter(&self) -> impl Iterator<Item = &WeightUnit> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for WeightConversionTable {
    fn default() -> Self {
        let entries = DEFAULT_WEIGHT_UNITS
            .iter()
            .map(|&(code, name, troy_ounces)| WeightUnit {
                code: UnitCode::from(code),
                name: name.to_string(),
                troy_ounces,
            })
            .collect::<Vec<_>>();

        let index = entries
            .iter()
            .enumerate()
            .map(|(position, entry)| (entry.code.clone(), position))
            .collect();

        Self { entries, index }
    }
}

impl TryFrom<Vec<WeightUnit>> for WeightConversionTable {
    type Error = TableError;

    fn try_from(entries: Vec<WeightUnit>) -> Result<Self, Self::Error> {
        Self::new(entries)
    }
}

impl From<WeightConversionTable> for Vec<WeightUnit> {
    fn from(table: WeightConversionTable) -> Self {
        table.entries
    }
}

/// Immutable lookup tables shared by every pricing component for the process lifetime.
#[derive(Clone, PartialEq, Debug, Default, Deserialize, Serialize)]
pub struct MarketTables {
    pub currencies: CurrencyRateTable,
    pub units: WeightConversionTable,
}

impl MarketTables {
    pub fn new(currencies: CurrencyRateTable, units: WeightConversionTable) -> Self {
        Self { currencies, units }
    }

    pub fn rate(&self, code: &CurrencyCode) -> Result<f64, TableError> {
        self.currencies.rate(code)
    }

    pub fn weight_multiplier(&self, code: &UnitCode) -> Result<f64, TableError> {
        self.units.multiplier(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rate_entry(code: &'static str, rate: f64) -> CurrencyRate {
        CurrencyRate {
            currency: Currency {
                code: CurrencyCode::from(code),
                name: code.to_string(),
                symbol: code.to_string(),
            },
            rate,
        }
    }

    #[test]
    fn test_default_currency_rates() {
        let table = CurrencyRateTable::default();

        struct TestCase {
            code: &'static str,
            expected: f64,
        }

        let cases = vec![
            TestCase { code: "USD", expected: 1.0 },
            TestCase { code: "EUR", expected: 0.92 },
            TestCase { code: "GBP", expected: 0.79 },
            TestCase { code: "INR", expected: 83.12 },
            TestCase { code: "AUD", expected: 1.53 },
            TestCase { code: "CAD", expected: 1.36 },
            TestCase { code: "JPY", expected: 149.50 },
            TestCase { code: "CNY", expected: 7.24 },
            TestCase { code: "CHF", expected: 0.88 },
            TestCase { code: "AED", expected: 3.67 },
        ];

        assert_eq!(table.len(), cases.len());
        for (i, test_case) in cases.iter().enumerate() {
            let actual = table.rate(&CurrencyCode::from(test_case.code)).unwrap();
            assert_eq!(actual, test_case.expected, "Test case {} failed", i);
        }
    }

    #[test]
    fn test_currency_lookup_preserves_display_order() {
        let table = CurrencyRateTable::default();
        let codes = table
            .currencies()
            .map(|currency| currency.code.to_string())
            .collect::<Vec<_>>();

        assert_eq!(codes.first().map(String::as_str), Some("USD"));
        assert_eq!(codes.last().map(String::as_str), Some("AED"));

        let pound = table.currency(&CurrencyCode::from("gbp")).unwrap();
        assert_eq!(pound.name, "British Pound");
        assert_eq!(pound.symbol, "£");
    }

    #[test]
    fn test_unknown_currency_rate_fails() {
        let table = CurrencyRateTable::default();
        let actual = table.rate(&CurrencyCode::from("XAU"));
        assert_eq!(
            actual,
            Err(TableError::UnknownCurrencyCode(CurrencyCode::from("XAU")))
        );
    }

    #[test]
    fn test_weight_multipliers() {
        let table = WeightConversionTable::default();

        assert_eq!(table.multiplier(&UnitCode::TROY_OUNCE), Ok(1.0));
        assert_eq!(table.multiplier(&UnitCode::from("g")), Ok(0.0321507));
        assert_eq!(table.multiplier(&UnitCode::from("kg")), Ok(32.1507));
        assert_eq!(table.multiplier(&UnitCode::from("tola")), Ok(0.375));
        assert_eq!(table.multiplier(&UnitCode::from("tael")), Ok(1.20337));
        assert_eq!(table.unit(&UnitCode::from("tael")).unwrap().name, "Tael");
    }

    #[test]
    fn test_unknown_unit_strict_and_lenient() {
        let table = WeightConversionTable::default();
        let pennyweight = UnitCode::from("dwt");

        assert!(matches!(
            table.multiplier(&pennyweight),
            Err(TableError::UnknownUnitCode(_))
        ));
        assert_eq!(table.multiplier_or_troy_ounce(&pennyweight), 1.0);
    }

    #[test]
    fn test_currency_table_validation() {
        struct TestCase {
            entries: Vec<CurrencyRate>,
            expected: Result<usize, TableError>,
        }

        let cases = vec![
            TestCase {
                // TC0: valid
                entries: vec![rate_entry("USD", 1.0), rate_entry("EUR", 0.92)],
                expected: Ok(2),
            },
            TestCase {
                // TC1: duplicate after normalisation
                entries: vec![rate_entry("USD", 1.0), rate_entry("usd", 1.0)],
                expected: Err(TableError::DuplicateCode {
                    table: "currency",
                    code: "USD".to_string(),
                }),
            },
            TestCase {
                // TC2: zero rate
                entries: vec![rate_entry("USD", 1.0), rate_entry("EUR", 0.0)],
                expected: Err(TableError::InvalidMultiplier {
                    table: "currency",
                    code: "EUR".to_string(),
                    multiplier: 0.0,
                }),
            },
            TestCase {
                // TC3: no USD pivot
                entries: vec![rate_entry("EUR", 0.92)],
                expected: Err(TableError::MissingPivot),
            },
        ];

        for (i, test_case) in cases.into_iter().enumerate() {
            let actual = CurrencyRateTable::new(test_case.entries).map(|table| table.len());
            assert_eq!(actual, test_case.expected, "Test case {} failed", i);
        }
    }

    #[test]
    fn test_weight_table_rejects_nan() {
        let actual = WeightConversionTable::new(vec![WeightUnit {
            code: UnitCode::from("g"),
            name: "Gram".to_string(),
            troy_ounces: f64::NAN,
        }]);

        assert!(matches!(actual, Err(TableError::InvalidMultiplier { .. })));
    }

    #[test]
    fn test_de_market_tables_validates() {
        let input = r#"{
            "currencies": [
                {"code": "usd", "name": "US Dollar", "symbol": "$", "rate": 1.0},
                {"code": "sgd", "name": "Singapore Dollar", "symbol": "S$", "rate": 1.34}
            ],
            "units": [
                {"code": "oz", "name": "Troy Ounce", "troy_ounces": 1.0},
                {"code": "g", "name": "Gram", "troy_ounces": 0.0321507}
            ]
        }"#;

        let tables = serde_json::from_str::<MarketTables>(input).unwrap();
        assert_eq!(tables.rate(&CurrencyCode::from("SGD")), Ok(1.34));
        assert_eq!(tables.units.len(), 2);

        let invalid = r#"{
            "currencies": [{"code": "EUR", "name": "Euro", "symbol": "€", "rate": 0.92}],
            "units": []
        }"#;
        assert!(serde_json::from_str::<MarketTables>(invalid).is_err());
    }
}
