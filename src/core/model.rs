use crate::core::error::ModelError;
use crate::core::node::{Node, Position};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One entry of the allocation matrix.
///
/// A cell is *epsilon-basic* when it belongs to the basis but ships
/// nothing: a degenerate basic variable kept so that the basis still has
/// `m + n - 1` cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Cell {
    /// Shipped quantity. Never negative.
    pub value: Decimal,
    /// Whether the cell is part of the current basis.
    pub is_basic: bool,
}

impl Cell {
    pub fn is_epsilon(&self) -> bool {
        self.is_basic && self.value.is_zero()
    }
}

/// Which balancing node, if any, was appended to make the model closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DummyNode {
    /// An extra supply row absorbing excess demand.
    Supply,
    /// An extra demand column absorbing excess supply.
    Demand,
}

/// A transportation problem together with its current shipment plan.
///
/// Holds `m` supply capacities, `n` demand requirements, the `m×n` per-unit
/// cost matrix and the co-indexed allocation matrix. The model only ever
/// grows (by one balancing row or column) and afterwards only the cells
/// change.
///
/// # Examples
///
/// ```
/// use transport_solver::core::model::TransportModel;
/// use rust_decimal_macros::dec;
///
/// let model = TransportModel::new(
///     vec![dec!(20), dec!(30)],
///     vec![dec!(25), dec!(25)],
///     vec![vec![dec!(4), dec!(6)], vec![dec!(5), dec!(3)]],
/// )
/// .unwrap();
///
/// assert_eq!(model.supply_nodes(), 2);
/// assert!(model.is_balanced());
/// assert!(!model.has_basis());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawModel")]
pub struct TransportModel {
    supply: Vec<Decimal>,
    demand: Vec<Decimal>,
    cost: Vec<Vec<Decimal>>,
    cells: Vec<Vec<Cell>>,
    dummy: Option<DummyNode>,
}

/// Unvalidated wire form of [`TransportModel`]. `cells` may be omitted.
#[derive(Deserialize)]
struct RawModel {
    supply: Vec<Decimal>,
    demand: Vec<Decimal>,
    cost: Vec<Vec<Decimal>>,
    #[serde(default)]
    cells: Option<Vec<Vec<Cell>>>,
    #[serde(default)]
    dummy: Option<DummyNode>,
}

impl TryFrom<RawModel> for TransportModel {
    type Error = ModelError;

    fn try_from(raw: RawModel) -> Result<Self, Self::Error> {
        let mut model = TransportModel::new(raw.supply, raw.demand, raw.cost)?;
        if let Some(cells) = raw.cells {
            let shape_ok = cells.len() == model.supply_nodes()
                && cells.iter().all(|row| row.len() == model.demand_nodes());
            if !shape_ok {
                return Err(ModelError::AllocationShape {
                    rows: model.supply_nodes(),
                    cols: model.demand_nodes(),
                });
            }
            model.cells = cells;
            model.check_allocation()?;
        }
        if let Some(dummy) = raw.dummy {
            model.check_dummy(dummy)?;
        }
        model.dummy = raw.dummy;
        Ok(model)
    }
}

/// `max(Σ supply, Σ demand) × max(|cost|, 1) × (m + n + 1) × 100` must fit in
/// a `Decimal`. That bounds every total, potential, reduced cost and savings
/// percentage the solver computes.
fn check_magnitudes(
    supply: &[Decimal],
    demand: &[Decimal],
    cost: &[Vec<Decimal>],
) -> Result<(), ModelError> {
    let total = |xs: &[Decimal]| {
        xs.iter()
            .try_fold(Decimal::ZERO, |acc, x| acc.checked_add(*x))
    };
    let max_cost = cost
        .iter()
        .flatten()
        .map(|c| c.abs())
        .max()
        .unwrap_or(Decimal::ZERO)
        .max(Decimal::ONE);
    let span = Decimal::from(supply.len() + demand.len() + 1);

    total(supply)
        .zip(total(demand))
        .map(|(s, d)| s.max(d))
        .and_then(|q| q.checked_mul(max_cost))
        .and_then(|b| b.checked_mul(span))
        .and_then(|b| b.checked_mul(Decimal::ONE_HUNDRED))
        .map(|_| ())
        .ok_or(ModelError::MagnitudeOverflow)
}

impl TransportModel {
    /// Build a model with an empty (all zero, non-basic) allocation.
    ///
    /// Fails if there are no supply or demand nodes, if the cost matrix is
    /// not `supply.len() × demand.len()`, if any capacity or requirement
    /// is not strictly positive, or if the totals are too large for the
    /// solver's exact arithmetic.
    pub fn new(
        supply: Vec<Decimal>,
        demand: Vec<Decimal>,
        cost: Vec<Vec<Decimal>>,
    ) -> Result<Self, ModelError> {
        if supply.is_empty() {
            return Err(ModelError::NoSupplyNodes);
        }
        if demand.is_empty() {
            return Err(ModelError::NoDemandNodes);
        }
        if cost.len() != supply.len() {
            return Err(ModelError::CostRowCount {
                expected: supply.len(),
                actual: cost.len(),
            });
        }
        if let Some((row, r)) = cost.iter().enumerate().find(|(_, r)| r.len() != demand.len()) {
            return Err(ModelError::CostColumnCount {
                row,
                expected: demand.len(),
                actual: r.len(),
            });
        }
        if let Some((index, value)) = supply.iter().enumerate().find(|(_, v)| **v <= Decimal::ZERO) {
            return Err(ModelError::NonPositiveSupply {
                index,
                value: value.to_string(),
            });
        }
        if let Some((index, value)) = demand.iter().enumerate().find(|(_, v)| **v <= Decimal::ZERO) {
            return Err(ModelError::NonPositiveDemand {
                index,
                value: value.to_string(),
            });
        }
        check_magnitudes(&supply, &demand, &cost)?;

        let cells = vec![vec![Cell::default(); demand.len()]; supply.len()];
        Ok(Self {
            supply,
            demand,
            cost,
            cells,
            dummy: None,
        })
    }

    /// Build a model from integer data, the common case in tests and demos.
    pub fn from_integers(
        supply: &[i64],
        demand: &[i64],
        cost: &[Vec<i64>],
    ) -> Result<Self, ModelError> {
        Self::new(
            supply.iter().copied().map(Decimal::from).collect(),
            demand.iter().copied().map(Decimal::from).collect(),
            cost.iter()
                .map(|row| row.iter().copied().map(Decimal::from).collect())
                .collect(),
        )
    }

    // --- Shape ---

    /// `m`, the number of supply nodes (rows).
    pub fn supply_nodes(&self) -> usize {
        self.supply.len()
    }

    /// `n`, the number of demand nodes (columns).
    pub fn demand_nodes(&self) -> usize {
        self.demand.len()
    }

    /// Size of a spanning-tree basis: `m + n - 1`.
    pub fn basis_size(&self) -> usize {
        self.supply_nodes() + self.demand_nodes() - 1
    }

    pub fn dummy(&self) -> Option<DummyNode> {
        self.dummy
    }

    // --- Data ---

    pub fn supply(&self) -> &[Decimal] {
        &self.supply
    }

    pub fn demand(&self) -> &[Decimal] {
        &self.demand
    }

    pub fn cost(&self, row: usize, col: usize) -> Decimal {
        self.cost[row][col]
    }

    pub fn costs(&self) -> &[Vec<Decimal>] {
        &self.cost
    }

    pub fn cell(&self, row: usize, col: usize) -> &Cell {
        &self.cells[row][col]
    }

    pub fn cells(&self) -> &[Vec<Cell>] {
        &self.cells
    }

    pub fn total_supply(&self) -> Decimal {
        self.supply.iter().sum()
    }

    pub fn total_demand(&self) -> Decimal {
        self.demand.iter().sum()
    }

    pub fn is_balanced(&self) -> bool {
        self.total_supply() == self.total_demand()
    }

    // --- Plan ---

    /// All basic cells in row-major order.
    pub fn basic_cells(&self) -> Vec<Position> {
        self.positions()
            .filter(|p| self.cells[p.row][p.col].is_basic)
            .collect()
    }

    pub fn basic_count(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|c| c.is_basic)
            .count()
    }

    /// Whether an initial plan has been built for this model.
    pub fn has_basis(&self) -> bool {
        self.cells.iter().flatten().any(|c| c.is_basic)
    }

    /// Quantity shipped out of supply node `row`.
    pub fn row_total(&self, row: usize) -> Decimal {
        self.cells[row].iter().map(|c| c.value).sum()
    }

    /// Quantity delivered to demand node `col`.
    pub fn col_total(&self, col: usize) -> Decimal {
        self.cells.iter().map(|r| r[col].value).sum()
    }

    /// Every supply shipped in full and every demand met exactly.
    pub fn is_feasible(&self) -> bool {
        (0..self.supply_nodes()).all(|i| self.row_total(i) == self.supply[i])
            && (0..self.demand_nodes()).all(|j| self.col_total(j) == self.demand[j])
    }

    /// `Σ cost[i][j] * value[i][j]` over all cells.
    pub fn total_cost(&self) -> Decimal {
        self.positions()
            .map(|p| self.cost[p.row][p.col] * self.cells[p.row][p.col].value)
            .sum()
    }

    /// All cell coordinates in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        let n = self.demand_nodes();
        (0..self.supply_nodes()).flat_map(move |row| (0..n).map(move |col| Position::new(row, col)))
    }

    // --- Mutation (solver internals) ---

    pub(crate) fn cell_mut(&mut self, row: usize, col: usize) -> &mut Cell {
        &mut self.cells[row][col]
    }

    /// Append a zero-cost supply row carrying `amount`.
    pub(crate) fn push_supply_node(&mut self, amount: Decimal) {
        let n = self.demand_nodes();
        self.supply.push(amount);
        self.cost.push(vec![Decimal::ZERO; n]);
        self.cells.push(vec![Cell::default(); n]);
        self.dummy = Some(DummyNode::Supply);
    }

    /// Append a zero-cost demand column requiring `amount`.
    pub(crate) fn push_demand_node(&mut self, amount: Decimal) {
        self.demand.push(amount);
        for row in &mut self.cost {
            row.push(Decimal::ZERO);
        }
        for row in &mut self.cells {
            row.push(Cell::default());
        }
        self.dummy = Some(DummyNode::Demand);
    }

    /// A supplied plan ships between zero and `min(supply, demand)` through
    /// every cell, and nothing through a non-basic one.
    fn check_allocation(&self) -> Result<(), ModelError> {
        for p in self.positions() {
            let cell = self.cells[p.row][p.col];
            let cap = self.supply[p.row].min(self.demand[p.col]);
            if cell.value < Decimal::ZERO || cell.value > cap {
                return Err(ModelError::AllocationOutOfRange {
                    row: p.row,
                    col: p.col,
                    value: cell.value.to_string(),
                });
            }
            if !cell.is_basic && !cell.value.is_zero() {
                return Err(ModelError::NonBasicFlow {
                    row: p.row,
                    col: p.col,
                    value: cell.value.to_string(),
                });
            }
        }
        Ok(())
    }

    /// A balancing node is the last row or column, has zero cost everywhere,
    /// and is never the only node on its side.
    fn check_dummy(&self, dummy: DummyNode) -> Result<(), ModelError> {
        let (node, valid) = match dummy {
            DummyNode::Supply => {
                let row = self.supply_nodes() - 1;
                (
                    Node::Supply(row),
                    row > 0 && self.cost[row].iter().all(|c| c.is_zero()),
                )
            }
            DummyNode::Demand => {
                let col = self.demand_nodes() - 1;
                (
                    Node::Demand(col),
                    col > 0 && self.cost.iter().all(|r| r[col].is_zero()),
                )
            }
        };
        if valid {
            Ok(())
        } else {
            Err(ModelError::MisplacedDummy {
                node: node.to_string(),
            })
        }
    }

    fn is_dummy_row(&self, row: usize) -> bool {
        self.dummy == Some(DummyNode::Supply) && row + 1 == self.supply_nodes()
    }

    fn is_dummy_col(&self, col: usize) -> bool {
        self.dummy == Some(DummyNode::Demand) && col + 1 == self.demand_nodes()
    }
}

/// Plan table: one row per supply node, one column per demand node.
///
/// Shipped amounts are printed as numbers, epsilon-basic cells as `ε` and
/// non-basic cells as `-`. Balancing nodes carry a `*` suffix.
impl fmt::Display for TransportModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut header = vec![String::new()];
        for j in 0..self.demand_nodes() {
            let dummy = if self.is_dummy_col(j) { "*" } else { "" };
            header.push(format!("B_{}{}", j + 1, dummy));
        }
        header.push("Supply".to_string());

        let mut rows = vec![header];
        for i in 0..self.supply_nodes() {
            let dummy = if self.is_dummy_row(i) { "*" } else { "" };
            let mut line = vec![format!("A_{}{}", i + 1, dummy)];
            for cell in &self.cells[i] {
                line.push(if cell.is_epsilon() {
                    "ε".to_string()
                } else if cell.is_basic || !cell.value.is_zero() {
                    cell.value.normalize().to_string()
                } else {
                    "-".to_string()
                });
            }
            line.push(self.supply[i].normalize().to_string());
            rows.push(line);
        }
        let mut footer = vec!["Demand".to_string()];
        footer.extend(self.demand.iter().map(|d| d.normalize().to_string()));
        footer.push(self.total_supply().normalize().to_string());
        rows.push(footer);

        let first = rows.iter().map(|r| r[0].chars().count()).max().unwrap_or(0) + 2;
        let width = rows
            .iter()
            .flat_map(|r| r[1..].iter())
            .map(|s| s.chars().count())
            .max()
            .unwrap_or(0)
            .max(6)
            + 2;

        for line in &rows {
            write!(f, "{:<first$}", line[0])?;
            for entry in &line[1..] {
                write!(f, "{:>width$}", entry)?;
            }
            writeln!(f)?;
        }
        write!(f, "Total cost: {}", self.total_cost().normalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample() -> TransportModel {
        TransportModel::from_integers(&[20, 30], &[10, 40], &[vec![4, 6], vec![5, 3]]).unwrap()
    }

    #[test]
    fn test_model_creation() {
        let model = sample();
        assert_eq!(model.supply_nodes(), 2);
        assert_eq!(model.demand_nodes(), 2);
        assert_eq!(model.basis_size(), 3);
        assert_eq!(model.cost(1, 0), dec!(5));
        assert_eq!(model.total_supply(), dec!(50));
        assert!(model.is_balanced());
        assert!(!model.has_basis());
        assert_eq!(model.total_cost(), Decimal::ZERO);
        assert!(model.dummy().is_none());
    }

    #[test]
    fn test_rejects_empty_sides() {
        assert_eq!(
            TransportModel::new(vec![], vec![dec!(1)], vec![]),
            Err(ModelError::NoSupplyNodes)
        );
        assert_eq!(
            TransportModel::new(vec![dec!(1)], vec![], vec![vec![]]),
            Err(ModelError::NoDemandNodes)
        );
    }

    #[test]
    fn test_rejects_mismatched_costs() {
        let err = TransportModel::from_integers(&[1, 2], &[3], &[vec![1]]).unwrap_err();
        assert_eq!(err, ModelError::CostRowCount { expected: 2, actual: 1 });

        let err = TransportModel::from_integers(&[1, 2], &[3], &[vec![1], vec![1, 2]]).unwrap_err();
        assert_eq!(
            err,
            ModelError::CostColumnCount {
                row: 1,
                expected: 1,
                actual: 2
            }
        );
    }

    #[test]
    fn test_rejects_non_positive_quantities() {
        let err = TransportModel::from_integers(&[5, 0], &[5], &[vec![1], vec![1]]).unwrap_err();
        assert!(matches!(err, ModelError::NonPositiveSupply { index: 1, .. }));

        let err = TransportModel::from_integers(&[5], &[-5], &[vec![1]]).unwrap_err();
        assert!(matches!(err, ModelError::NonPositiveDemand { index: 0, .. }));
    }

    #[test]
    fn test_negative_costs_accepted() {
        assert!(TransportModel::from_integers(&[5], &[5], &[vec![-3]]).is_ok());
    }

    #[test]
    fn test_totals_and_cost() {
        let mut model = sample();
        *model.cell_mut(0, 0) = Cell { value: dec!(10), is_basic: true };
        *model.cell_mut(0, 1) = Cell { value: dec!(10), is_basic: true };
        *model.cell_mut(1, 1) = Cell { value: dec!(30), is_basic: true };

        assert_eq!(model.row_total(0), dec!(20));
        assert_eq!(model.col_total(1), dec!(40));
        assert!(model.is_feasible());
        assert_eq!(model.total_cost(), dec!(190));
        assert_eq!(model.basic_count(), 3);
        assert_eq!(
            model.basic_cells(),
            vec![Position::new(0, 0), Position::new(0, 1), Position::new(1, 1)]
        );
    }

    #[test]
    fn test_push_demand_node() {
        let mut model = sample();
        model.push_demand_node(dec!(7));
        assert_eq!(model.demand_nodes(), 3);
        assert_eq!(model.cost(0, 2), Decimal::ZERO);
        assert_eq!(model.cells()[1].len(), 3);
        assert_eq!(model.dummy(), Some(DummyNode::Demand));
    }

    #[test]
    fn test_epsilon_cell() {
        let eps = Cell { value: Decimal::ZERO, is_basic: true };
        let empty = Cell::default();
        assert!(eps.is_epsilon());
        assert!(!empty.is_epsilon());
    }

    #[test]
    fn test_display_marks_epsilon_and_dummy() {
        let mut model = sample();
        model.push_supply_node(dec!(5));
        *model.cell_mut(0, 0) = Cell { value: dec!(10), is_basic: true };
        *model.cell_mut(1, 0) = Cell { value: Decimal::ZERO, is_basic: true };

        let table = model.to_string();
        assert!(table.contains("A_3*"));
        assert!(table.contains('ε'));
        assert!(table.contains("Supply"));
        assert!(table.contains("Demand"));
        assert!(table.ends_with("Total cost: 40"));
    }

    #[test]
    fn test_json_without_cells() {
        let json = r#"{ "supply": [10, "20"], "demand": [30], "cost": [[1], [2]] }"#;
        let model: TransportModel = serde_json::from_str(json).unwrap();
        assert_eq!(model.supply(), &[dec!(10), dec!(20)]);
        assert!(!model.has_basis());
    }

    #[test]
    fn test_json_validates() {
        let json = r#"{ "supply": [10], "demand": [10], "cost": [[1, 2]] }"#;
        let result: Result<TransportModel, _> = serde_json::from_str(json);
        assert!(result.is_err());

        let json = r#"{ "supply": [10], "demand": [10], "cost": [[1]], "cells": [] }"#;
        let result: Result<TransportModel, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    fn raw(cells: &[[(i64, bool); 2]; 2]) -> RawModel {
        RawModel {
            supply: vec![dec!(10), dec!(5)],
            demand: vec![dec!(5), dec!(10)],
            cost: vec![vec![dec!(1), dec!(100)], vec![dec!(100), dec!(1)]],
            cells: Some(
                cells
                    .iter()
                    .map(|row| {
                        row.iter()
                            .map(|&(v, is_basic)| Cell { value: Decimal::from(v), is_basic })
                            .collect()
                    })
                    .collect(),
            ),
            dummy: None,
        }
    }

    #[test]
    fn test_rejects_flow_in_non_basic_cell() {
        let err = TransportModel::try_from(raw(&[[(5, true), (5, true)], [(5, false), (0, true)]]))
            .unwrap_err();
        assert_eq!(
            err,
            ModelError::NonBasicFlow {
                row: 1,
                col: 0,
                value: "5".to_string()
            }
        );

        // Values without basic flags are not silently overwritten either.
        let err = TransportModel::try_from(raw(&[[(3, false), (0, false)], [(0, false), (0, false)]]))
            .unwrap_err();
        assert!(matches!(err, ModelError::NonBasicFlow { row: 0, col: 0, .. }));
    }

    #[test]
    fn test_rejects_out_of_range_allocation() {
        let err = TransportModel::try_from(raw(&[[(-5, true), (15, true)], [(0, false), (5, true)]]))
            .unwrap_err();
        assert!(matches!(err, ModelError::AllocationOutOfRange { row: 0, col: 0, .. }));

        let err = TransportModel::try_from(raw(&[[(0, true), (15, true)], [(5, true), (0, false)]]))
            .unwrap_err();
        assert!(matches!(err, ModelError::AllocationOutOfRange { row: 0, col: 1, .. }));
    }

    #[test]
    fn test_accepts_valid_allocation() {
        let model = TransportModel::try_from(raw(&[[(5, true), (5, true)], [(0, false), (5, true)]]))
            .unwrap();
        assert!(model.is_feasible());
        assert_eq!(model.total_cost(), dec!(510));
    }

    #[test]
    fn test_rejects_oversized_magnitudes() {
        let big = dec!(100000000000000000);
        let err = TransportModel::new(vec![big], vec![big], vec![vec![big]]).unwrap_err();
        assert_eq!(err, ModelError::MagnitudeOverflow);

        let json = r#"{ "supply": [100000000000000000], "demand": [1], "cost": [[100000000000000000]] }"#;
        assert!(serde_json::from_str::<TransportModel>(json).is_err());

        assert!(TransportModel::new(vec![big], vec![big], vec![vec![dec!(1)]]).is_ok());
    }

    #[test]
    fn test_dummy_tag_is_checked() {
        let json = r#"{ "supply": [10, 5], "demand": [15], "cost": [[1], [2]], "dummy": "supply" }"#;
        let err = serde_json::from_str::<TransportModel>(json).unwrap_err();
        assert!(err.to_string().contains("A_2 is marked as a balancing node"));

        let json = r#"{ "supply": [10, 5], "demand": [15], "cost": [[1], [0]], "dummy": "supply" }"#;
        let model: TransportModel = serde_json::from_str(json).unwrap();
        assert_eq!(model.dummy(), Some(DummyNode::Supply));

        let json = r#"{ "supply": [10], "demand": [10], "cost": [[0]], "dummy": "demand" }"#;
        assert!(serde_json::from_str::<TransportModel>(json).is_err());
    }
}
