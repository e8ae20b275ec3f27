use bullion_model::error::TableError;
use thiserror::Error;

use super::{conversion_error::ConversionError, generator_error::GeneratorError};

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Failed to build struct due to missing attributes: {0}")]
    BuilderIncomplete(&'static str),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("lookup table error: {0}")]
    Table(#[from] TableError),

    #[error("conversion error: {0}")]
    Conversion(#[from] ConversionError),

    #[error("generator error: {0}")]
    Generator(#[from] GeneratorError),
}
