use thiserror::Error;

/// Structural problems with a transportation model, detected before solving.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("model has no supply nodes")]
    NoSupplyNodes,
    #[error("model has no demand nodes")]
    NoDemandNodes,
    #[error("cost matrix has {actual} rows, expected {expected} (one per supply node)")]
    CostRowCount { expected: usize, actual: usize },
    #[error("cost row {row} has {actual} entries, expected {expected} (one per demand node)")]
    CostColumnCount {
        row: usize,
        expected: usize,
        actual: usize,
    },
    #[error("supply of node A_{} must be positive, got {value}", .index + 1)]
    NonPositiveSupply { index: usize, value: String },
    #[error("demand of node B_{} must be positive, got {value}", .index + 1)]
    NonPositiveDemand { index: usize, value: String },
    #[error("allocation matrix must be {rows}×{cols}")]
    AllocationShape { rows: usize, cols: usize },
    #[error("cell ({row}, {col}) ships {value}, outside 0..=min(supply, demand)")]
    AllocationOutOfRange {
        row: usize,
        col: usize,
        value: String,
    },
    #[error("non-basic cell ({row}, {col}) ships {value}")]
    NonBasicFlow {
        row: usize,
        col: usize,
        value: String,
    },
    #[error("{node} is marked as a balancing node but is not one")]
    MisplacedDummy { node: String },
    #[error("quantities and costs are too large to solve exactly")]
    MagnitudeOverflow,
}

/// Failures of the solving pipeline.
///
/// Apart from [`SolveError::InvalidModel`], every variant means the basis
/// invariant (`m + n - 1` basic cells forming a spanning tree of the
/// supply/demand graph) was broken. These are never retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolveError {
    #[error("invalid model: {0}")]
    InvalidModel(#[from] ModelError),
    #[error("potential of {node} could not be derived from the basis")]
    UnresolvedPotential { node: String },
    #[error("potentials violate the dual equation at basic cell ({row}, {col})")]
    PotentialMismatch { row: usize, col: usize },
    #[error("cycle not found through entering cell ({row}, {col})")]
    CycleNotFound { row: usize, col: usize },
    #[error("basis is not a spanning tree: {basic} basic cells, expected {expected}")]
    MalformedBasis { basic: usize, expected: usize },
    #[error("plan does not ship every supply and meet every demand")]
    InfeasiblePlan,
    #[error("no optimal plan after {limit} pivots")]
    IterationLimit { limit: usize },
}
