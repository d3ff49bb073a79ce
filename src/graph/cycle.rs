use crate::core::error::SolveError;
use crate::core::model::TransportModel;
use crate::core::node::Position;
use serde::{Deserialize, Serialize};

/// A closed alternating path through the basis.
///
/// Starts at the entering cell and alternates a column move and a row move
/// until it returns to it. Positions at even indices are *plus* cells
/// (receive flow), positions at odd indices are *minus* cells (give it up).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PivotCycle {
    cells: Vec<Position>,
}

impl PivotCycle {
    /// The non-basic cell the cycle was built for.
    pub fn entering(&self) -> Position {
        self.cells[0]
    }

    /// All cells in cycle order, entering cell first.
    pub fn cells(&self) -> &[Position] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn plus_cells(&self) -> impl Iterator<Item = Position> + '_ {
        self.cells.iter().step_by(2).copied()
    }

    pub fn minus_cells(&self) -> impl Iterator<Item = Position> + '_ {
        self.cells.iter().skip(1).step_by(2).copied()
    }
}

/// Find the unique cycle that `entering` closes in the basis.
///
/// The entering cell is treated as basic. Rows and columns holding at most
/// one remaining basic cell are tree leaves and are pruned until nothing
/// changes; what survives is exactly the cycle, in which every row and
/// column has two cells. The walk then steps vertically first, then
/// horizontally, alternating until it is back at `entering`.
///
/// Fails with [`SolveError::CycleNotFound`] when the walk gets stuck, which
/// only happens on a basis that is not a spanning tree.
pub fn find_cycle(model: &TransportModel, entering: Position) -> Result<PivotCycle, SolveError> {
    let m = model.supply_nodes();
    let n = model.demand_nodes();
    let not_found = SolveError::CycleNotFound {
        row: entering.row,
        col: entering.col,
    };

    let mut basic: Vec<Vec<bool>> = model
        .cells()
        .iter()
        .map(|row| row.iter().map(|c| c.is_basic).collect())
        .collect();
    basic[entering.row][entering.col] = true;

    let mut row_pruned = vec![false; m];
    let mut col_pruned = vec![false; n];
    loop {
        let mut changed = false;
        for i in 0..m {
            if row_pruned[i] {
                continue;
            }
            let live = (0..n).filter(|&j| basic[i][j] && !col_pruned[j]).count();
            if live <= 1 {
                row_pruned[i] = true;
                changed = true;
            }
        }
        for j in 0..n {
            if col_pruned[j] {
                continue;
            }
            let live = (0..m).filter(|&i| basic[i][j] && !row_pruned[i]).count();
            if live <= 1 {
                col_pruned[j] = true;
                changed = true;
            }
        }
        if !changed {
            break;
        }
    }

    if row_pruned[entering.row] || col_pruned[entering.col] {
        return Err(not_found);
    }

    let mut cells = vec![entering];
    let mut current = entering;
    let mut vertical = true;
    // A simple cycle visits each row and column at most once.
    for _ in 0..=(m + n) {
        let next = if vertical {
            (0..m)
                .find(|&i| i != current.row && !row_pruned[i] && basic[i][current.col])
                .map(|i| Position::new(i, current.col))
        } else {
            (0..n)
                .find(|&j| j != current.col && !col_pruned[j] && basic[current.row][j])
                .map(|j| Position::new(current.row, j))
        };
        let next = next.ok_or_else(|| not_found.clone())?;
        if next == entering {
            return Ok(PivotCycle { cells });
        }
        cells.push(next);
        current = next;
        vertical = !vertical;
    }

    Err(not_found)
}
