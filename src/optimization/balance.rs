use crate::core::model::TransportModel;
use log::debug;

/// Close an open model so that total supply equals total demand.
///
/// Excess demand is covered by a new supply node, excess supply is absorbed
/// by a new demand node; either way the new node ships at zero cost. A model
/// that is already balanced is returned untouched.
///
/// # Examples
///
/// ```
/// use transport_solver::core::model::{DummyNode, TransportModel};
/// use transport_solver::optimization::balance::balance;
///
/// let open = TransportModel::from_integers(&[10, 10], &[5, 5, 5], &[vec![1, 2, 3], vec![4, 5, 6]]).unwrap();
/// let closed = balance(open);
///
/// assert_eq!(closed.demand_nodes(), 4);
/// assert_eq!(closed.dummy(), Some(DummyNode::Demand));
/// assert!(closed.is_balanced());
/// ```
pub fn balance(mut model: TransportModel) -> TransportModel {
    let total_supply = model.total_supply();
    let total_demand = model.total_demand();

    if total_demand > total_supply {
        let shortfall = total_demand - total_supply;
        debug!("adding dummy supply node A_{} with {}", model.supply_nodes() + 1, shortfall);
        model.push_supply_node(shortfall);
    } else if total_supply > total_demand {
        let surplus = total_supply - total_demand;
        debug!("adding dummy demand node B_{} with {}", model.demand_nodes() + 1, surplus);
        model.push_demand_node(surplus);
    }
    model
}
