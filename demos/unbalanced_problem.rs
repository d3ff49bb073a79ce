//! Supply exceeds demand by 5 units.
//!
//! The solver adds a zero-cost dummy customer (`B_4*` in the table) that
//! absorbs the surplus; whatever it receives simply stays at the source.

use transport_solver::prelude::*;

fn main() -> Result<(), SolveError> {
    let model = TransportModel::from_integers(
        &[10, 10],
        &[5, 5, 5],
        &[vec![1, 2, 3], vec![4, 5, 6]],
    )?;
    println!(
        "Total supply {} vs total demand {}\n",
        model.total_supply(),
        model.total_demand()
    );

    let solution = Solver::default().solve(model)?;
    println!("{}", solution);

    if let Some(DummyNode::Demand) = solution.model().dummy() {
        let dummy = solution.model().demand_nodes() - 1;
        for i in 0..solution.model().supply_nodes() {
            let kept = solution.model().cell(i, dummy).value;
            if !kept.is_zero() {
                println!("{} keeps {} units", Node::Supply(i), kept);
            }
        }
    }
    Ok(())
}
