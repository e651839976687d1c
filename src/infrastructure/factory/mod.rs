//! Factory modules for building infrastructure components.
//!
//! # Submodules
//!
//! - [`solver`] - Optimization backend construction

pub mod solver;
