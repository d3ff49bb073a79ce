pub mod balance;
pub mod initial_plan;
pub mod pivot;
pub mod potentials;
pub mod solver;
