use crate::core::error::SolveError;
use crate::core::model::TransportModel;
use crate::core::node::{Node, Position};
use log::trace;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Dual variables of the current basis (the MODI `u` and `v`).
///
/// For every basic cell `(i, j)`: `rows[i] + cols[j] == cost[i][j]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Potentials {
    rows: Vec<Decimal>,
    cols: Vec<Decimal>,
}

impl Potentials {
    pub fn rows(&self) -> &[Decimal] {
        &self.rows
    }

    pub fn cols(&self) -> &[Decimal] {
        &self.cols
    }

    /// `u[i] + v[j] - cost[i][j]`. Positive means shipping through
    /// `(i, j)` would lower the total cost.
    pub fn reduced_cost(&self, model: &TransportModel, row: usize, col: usize) -> Decimal {
        self.rows[row] + self.cols[col] - model.cost(row, col)
    }
}

/// Derive the potentials of the current basis.
///
/// Anchors `u[0] = 0` and relaxes over the basic cells until no further
/// potential can be derived. Every potential must end up known and every
/// basic cell must satisfy the dual equation; anything else means the basis
/// is not a spanning tree and the solve cannot continue.
pub fn compute_potentials(model: &TransportModel) -> Result<Potentials, SolveError> {
    let m = model.supply_nodes();
    let n = model.demand_nodes();
    let basic = model.basic_cells();

    let mut rows: Vec<Option<Decimal>> = vec![None; m];
    let mut cols: Vec<Option<Decimal>> = vec![None; n];
    rows[0] = Some(Decimal::ZERO);

    let mut changed = true;
    while changed {
        changed = false;
        for p in &basic {
            let cost = model.cost(p.row, p.col);
            match (rows[p.row], cols[p.col]) {
                (Some(u), None) => {
                    cols[p.col] = Some(cost - u);
                    changed = true;
                }
                (None, Some(v)) => {
                    rows[p.row] = Some(cost - v);
                    changed = true;
                }
                _ => {}
            }
        }
    }

    let rows = rows
        .into_iter()
        .enumerate()
        .map(|(i, u)| {
            u.ok_or_else(|| SolveError::UnresolvedPotential {
                node: Node::Supply(i).to_string(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    let cols = cols
        .into_iter()
        .enumerate()
        .map(|(j, v)| {
            v.ok_or_else(|| SolveError::UnresolvedPotential {
                node: Node::Demand(j).to_string(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let potentials = Potentials { rows, cols };
    if let Some(p) = basic
        .iter()
        .find(|p| !potentials.reduced_cost(model, p.row, p.col).is_zero())
    {
        return Err(SolveError::PotentialMismatch {
            row: p.row,
            col: p.col,
        });
    }

    trace!("potentials u = {:?}, v = {:?}", potentials.rows, potentials.cols);
    Ok(potentials)
}

/// The first non-basic cell, in row-major order, with a positive reduced
/// cost; `None` when the plan is optimal.
///
/// First improvement, not steepest descent: the scan order fixes the pivot
/// sequence.
pub fn find_entering_cell(model: &TransportModel, potentials: &Potentials) -> Option<Position> {
    model.positions().find(|p| {
        !model.cell(p.row, p.col).is_basic
            && potentials.reduced_cost(model, p.row, p.col) > Decimal::ZERO
    })
}
