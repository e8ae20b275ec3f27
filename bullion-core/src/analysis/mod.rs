pub mod ratio;
pub mod summary;
