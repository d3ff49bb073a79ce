//! # transport-solver
//!
//! Solver for the classical balanced transportation problem.
//!
//! Given `m` supply nodes with capacities, `n` demand nodes with
//! requirements and an `m×n` matrix of unit shipping costs, finds a
//! shipment plan meeting every requirement at minimum total cost.
//!
//! ## Architecture
//!
//! - **core** — Model, cells, node labels, errors
//! - **graph** — Basis graph checks and stepping-stone cycle search
//! - **optimization** — Balancing, least-cost initial plan, potentials, pivots, solver
//! - **simulation** — Random model generation

pub mod core;
pub mod graph;
pub mod optimization;
pub mod simulation;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::core::error::{ModelError, SolveError};
    pub use crate::core::model::{Cell, DummyNode, TransportModel};
    pub use crate::core::node::{Node, Position};
    pub use crate::optimization::pivot::PivotRecord;
    pub use crate::optimization::potentials::Potentials;
    pub use crate::optimization::solver::{Solution, Solver, SolverConfig};
}
