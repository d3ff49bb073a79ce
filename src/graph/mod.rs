pub mod basis_graph;
pub mod cycle;
