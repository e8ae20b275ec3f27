pub mod analysis;
pub mod conversion;
pub mod data;
pub mod model;
pub mod service;
