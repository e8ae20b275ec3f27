pub mod enums;
pub mod error;
pub mod identifiers;

pub mod price;
pub mod tables;
pub mod alert;
pub mod news;

pub mod calculator;
