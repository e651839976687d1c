//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! ```text
//!                 ┌──────────────────────────┐
//!   CLI ─────────►│ application::solver      │
//!                 │   WaterFillingSolver     │
//!                 └────────────┬─────────────┘
//!                              │ ConvexSolver
//!             ┌────────────────┼────────────────┐
//!             ▼                ▼                ▼
//!        ┌─────────┐     ┌──────────┐     ┌────────────┐
//!        │Clarabel │     │  HiGHS   │     │ Water level│
//!        └─────────┘     └──────────┘     └────────────┘
//! ```

pub mod outbound;

pub use outbound::solver::{BackendOutcome, ConvexSolver};
