use thiserror::Error;

use crate::identifiers::{CurrencyCode, UnitCode};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TableError {
    #[error("unknown currency code: {0}")]
    UnknownCurrencyCode(CurrencyCode),

    #[error("unknown weight unit code: {0}")]
    UnknownUnitCode(UnitCode),

    #[error("{table} table contains duplicate code: {code}")]
    DuplicateCode { table: &'static str, code: String },

    #[error("{table} table multiplier for {code} must be finite and positive, got {multiplier}")]
    InvalidMultiplier {
        table: &'static str,
        code: String,
        multiplier: f64,
    },

    #[error("currency table is missing the USD pivot rate")]
    MissingPivot,
}
