//! Water-filling solve use case.

pub mod service;

pub use service::{WaterFillingSolver, ACTIVE_TOLERANCE};
