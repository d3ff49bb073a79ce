use serde::{Deserialize, Serialize};
use std::fmt;

/// A vertex of the bipartite supply/demand graph.
///
/// Supply nodes are the rows of the cost matrix, demand nodes its columns.
/// Both are zero-based; the display form is one-based (`A_1`, `B_1`), the
/// labelling used in plan tables.
///
/// # Examples
///
/// ```
/// use transport_solver::core::node::Node;
///
/// assert_eq!(Node::Supply(0).to_string(), "A_1");
/// assert_eq!(Node::Demand(2).to_string(), "B_3");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Node {
    Supply(usize),
    Demand(usize),
}

impl Node {
    pub fn index(&self) -> usize {
        match self {
            Node::Supply(i) | Node::Demand(i) => *i,
        }
    }

    pub fn is_supply(&self) -> bool {
        matches!(self, Node::Supply(_))
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Supply(i) => write!(f, "A_{}", i + 1),
            Node::Demand(j) => write!(f, "B_{}", j + 1),
        }
    }
}

/// Coordinates of one cell of the allocation matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(usize, usize)> for Position {
    fn from((row, col): (usize, usize)) -> Self {
        Self::new(row, col)
    }
}
