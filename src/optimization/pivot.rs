use crate::core::error::SolveError;
use crate::core::model::TransportModel;
use crate::core::node::Position;
use crate::graph::cycle::PivotCycle;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One completed stepping-stone pivot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PivotRecord {
    /// Cell brought into the basis.
    pub entering: Position,
    /// Cell removed from the basis.
    pub leaving: Position,
    /// Flow moved around the cycle. Zero for a degenerate pivot.
    pub theta: Decimal,
    /// Total cost of the plan after the pivot.
    pub cost_after: Decimal,
}

impl PivotRecord {
    pub fn is_degenerate(&self) -> bool {
        self.theta.is_zero()
    }
}

/// Move flow around `cycle`, swapping its entering cell into the basis.
///
/// θ is the smallest value among the minus cells; the first minus cell (in
/// cycle order) holding θ leaves the basis. Plus cells gain θ, minus cells
/// lose it, so every row and column total is unchanged and the basis keeps
/// its size.
pub fn apply_pivot(
    model: &mut TransportModel,
    cycle: &PivotCycle,
) -> Result<PivotRecord, SolveError> {
    let entering = cycle.entering();
    let (leaving, theta) = cycle
        .minus_cells()
        .map(|p| (p, model.cell(p.row, p.col).value))
        .fold(None, |best: Option<(Position, Decimal)>, (p, value)| match best {
            Some((_, min)) if min <= value => best,
            _ => Some((p, value)),
        })
        .ok_or(SolveError::CycleNotFound {
            row: entering.row,
            col: entering.col,
        })?;

    for (k, p) in cycle.cells().iter().enumerate() {
        let cell = model.cell_mut(p.row, p.col);
        if k % 2 == 0 {
            cell.value += theta;
        } else {
            cell.value -= theta;
        }
    }
    model.cell_mut(leaving.row, leaving.col).is_basic = false;
    model.cell_mut(entering.row, entering.col).is_basic = true;

    Ok(PivotRecord {
        entering,
        leaving,
        theta,
        cost_after: model.total_cost(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::cycle::find_cycle;
    use crate::optimization::initial_plan::least_cost_plan;
    use rust_decimal_macros::dec;

    fn initial() -> TransportModel {
        least_cost_plan(
            TransportModel::from_integers(
                &[20, 30, 25],
                &[10, 25, 40],
                &[vec![8, 6, 10], vec![9, 12, 13], vec![14, 9, 16]],
            )
            .unwrap(),
        )
    }

    #[test]
    fn test_pivot_moves_theta() {
        let mut model = initial();
        let cycle = find_cycle(&model, Position::new(0, 0)).unwrap();
        // Minus cells (1,0)=10, (2,2)=20, (0,1)=20.
        let record = apply_pivot(&mut model, &cycle).unwrap();

        assert_eq!(record.entering, Position::new(0, 0));
        assert_eq!(record.leaving, Position::new(1, 0));
        assert_eq!(record.theta, dec!(10));
        assert_eq!(record.cost_after, dec!(825));
        assert!(!record.is_degenerate());

        assert_eq!(model.cell(0, 0).value, dec!(10));
        assert!(model.cell(0, 0).is_basic);
        assert!(!model.cell(1, 0).is_basic);
        assert_eq!(model.cell(1, 2).value, dec!(30));
        assert_eq!(model.cell(2, 1).value, dec!(15));
        assert_eq!(model.basic_count(), model.basis_size());
        assert!(model.is_feasible());
    }

    #[test]
    fn test_tie_leaves_first_minus_cell() {
        let mut model = initial();
        let cycle = find_cycle(&model, Position::new(0, 2)).unwrap();
        // Minus cells (2,2)=20 and (0,1)=20 tie; the first in cycle order leaves.
        let record = apply_pivot(&mut model, &cycle).unwrap();
        assert_eq!(record.leaving, Position::new(2, 2));
        assert_eq!(record.theta, dec!(20));
        assert!(!model.cell(2, 2).is_basic);
        assert!(model.cell(0, 1).is_epsilon());
        assert_eq!(model.basic_count(), model.basis_size());
    }

    #[test]
    fn test_degenerate_pivot_swaps_epsilon() {
        // Cell (1, 2) exhausts row 1 and column 2 together, so the
        // least-cost plan carries an epsilon at (1, 0).
        let mut model = least_cost_plan(
            TransportModel::from_integers(&[10, 15], &[5, 5, 15], &[vec![8, 9, 9], vec![8, 7, 3]])
                .unwrap(),
        );
        assert!(model.cell(1, 0).is_epsilon());
        let before = model.total_cost();

        let cycle = find_cycle(&model, Position::new(1, 1)).unwrap();
        assert_eq!(
            cycle.cells(),
            &[
                Position::new(1, 1),
                Position::new(0, 1),
                Position::new(0, 0),
                Position::new(1, 0),
            ]
        );
        let record = apply_pivot(&mut model, &cycle).unwrap();

        assert!(record.is_degenerate());
        assert_eq!(record.leaving, Position::new(1, 0));
        assert!(model.cell(1, 1).is_epsilon());
        assert!(!model.cell(1, 0).is_basic);
        assert_eq!(model.total_cost(), before);
        assert_eq!(model.basic_count(), 4);
    }
}
