use bullion_model::identifiers::CurrencyCode;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConversionError {
    #[error("unknown currency code: {0}")]
    UnknownCurrencyCode(CurrencyCode),
}
