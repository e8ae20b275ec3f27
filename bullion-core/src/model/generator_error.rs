use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeneratorError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}
