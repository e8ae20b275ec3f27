pub mod config;
pub mod conversion_error;
pub mod engine_error;
pub mod event;
pub mod generator_error;
