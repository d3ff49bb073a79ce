use crate::core::model::TransportModel;
use crate::core::node::Position;
use log::debug;
use rust_decimal::Decimal;

/// Build a starting basic feasible solution with the least-cost rule.
///
/// The model must be balanced and carry no plan yet.
///
/// # Algorithm
///
/// 1. Order every cell by ascending unit cost; equal costs keep row-major
///    order.
/// 2. Walk the cells, shipping `min(remaining supply, remaining demand)`
///    through each and marking it basic when that amount is positive.
/// 3. When a cell would exhaust its row and its column at the same time,
///    first mark the leftmost other cell of that row whose column still has
///    demand as basic with zero flow. Without that epsilon cell the basis
///    would lose a row and a column for a single edge and end up smaller
///    than `m + n - 1`.
pub fn least_cost_plan(mut model: TransportModel) -> TransportModel {
    let n = model.demand_nodes();
    let mut order: Vec<Position> = model.positions().collect();
    order.sort_by_key(|p| model.cost(p.row, p.col));

    let mut remaining_supply: Vec<Decimal> = model.supply().to_vec();
    let mut remaining_demand: Vec<Decimal> = model.demand().to_vec();

    for p in order {
        let (i, j) = (p.row, p.col);
        let supply_left = remaining_supply[i];
        let demand_left = remaining_demand[j];

        if supply_left == demand_left && supply_left > Decimal::ZERO {
            if let Some(col) = (0..n).find(|&c| c != j && remaining_demand[c] > Decimal::ZERO) {
                debug!("epsilon cell ({}, {}) placed before exhausting row {} and column {}", i, col, i, j);
                model.cell_mut(i, col).is_basic = true;
            }
        }

        let delta = supply_left.min(demand_left);
        if delta > Decimal::ZERO {
            let cell = model.cell_mut(i, j);
            cell.value = delta;
            cell.is_basic = true;
            remaining_supply[i] -= delta;
            remaining_demand[j] -= delta;
        }
    }

    model
}
