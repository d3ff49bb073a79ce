//! Three suppliers, three customers.
//!
//! Shows the least-cost starting plan next to the optimum the potential
//! method reaches from it.

use transport_solver::prelude::*;

fn main() -> Result<(), SolveError> {
    let model = TransportModel::from_integers(
        &[20, 30, 25],
        &[10, 25, 40],
        &[vec![8, 6, 10], vec![9, 12, 13], vec![14, 9, 16]],
    )?;

    let solver = Solver::default();

    println!("=== Initial Plan (least cost) ===");
    let initial = solver.initial_plan(model.clone())?;
    println!("{}\n", initial);

    let solution = solver.solve(model)?;
    println!("{}", solution);

    let potentials = solution.potentials();
    println!("Row potentials:    {:?}", potentials.rows());
    println!("Column potentials: {:?}", potentials.cols());
    Ok(())
}
