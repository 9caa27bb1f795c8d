//! Data models for energy-adviser

pub mod reading;

pub use reading::{coerce_number, hour_of_day, parse_leading_float, Reading};
