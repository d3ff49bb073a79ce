use crate::core::error::SolveError;
use crate::core::model::TransportModel;
use crate::graph::basis_graph::BasisGraph;
use crate::graph::cycle::find_cycle;
use crate::optimization::balance::balance;
use crate::optimization::initial_plan::least_cost_plan;
use crate::optimization::pivot::{apply_pivot, PivotRecord};
use crate::optimization::potentials::{compute_potentials, find_entering_cell, Potentials};
use log::{debug, info, log_enabled, Level};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Tuning knobs for [`Solver`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Pivots allowed before the solve is abandoned. Plain stepping-stone
    /// can cycle on degenerate bases; this turns that into an error.
    pub max_iterations: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_iterations: 10_000,
        }
    }
}

/// An optimal shipment plan and how it was reached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Solution {
    model: TransportModel,
    potentials: Potentials,
    initial_cost: Decimal,
    pivots: Vec<PivotRecord>,
}

impl Solution {
    /// The balanced model carrying the optimal plan.
    pub fn model(&self) -> &TransportModel {
        &self.model
    }

    pub fn into_model(self) -> TransportModel {
        self.model
    }

    /// Potentials of the optimal basis. No reduced cost is positive.
    pub fn potentials(&self) -> &Potentials {
        &self.potentials
    }

    /// Cost of the plan the optimization started from.
    pub fn initial_cost(&self) -> Decimal {
        self.initial_cost
    }

    pub fn total_cost(&self) -> Decimal {
        self.model.total_cost()
    }

    pub fn savings(&self) -> Decimal {
        self.initial_cost - self.total_cost()
    }

    /// Savings as a percentage of the starting cost.
    pub fn savings_percent(&self) -> f64 {
        if self.initial_cost.is_zero() {
            return 0.0;
        }
        let pct = self.savings() * Decimal::from(100) / self.initial_cost;
        pct.to_string().parse::<f64>().unwrap_or(0.0)
    }

    pub fn pivots(&self) -> &[PivotRecord] {
        &self.pivots
    }

    pub fn iterations(&self) -> usize {
        self.pivots.len()
    }
}

/// Drives the transportation simplex.
///
/// `Unbalanced → Balanced → BasisBuilt → (potentials, entering cell,
/// cycle, pivot)* → Optimal`.
///
/// # Examples
///
/// ```
/// use transport_solver::prelude::*;
///
/// let model = TransportModel::from_integers(
///     &[20, 30, 25],
///     &[10, 25, 40],
///     &[vec![8, 6, 10], vec![9, 12, 13], vec![14, 9, 16]],
/// )
/// .unwrap();
///
/// let solution = Solver::default().solve(model).unwrap();
/// assert!(solution.model().is_feasible());
/// assert!(solution.total_cost() <= solution.initial_cost());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Solver {
    config: SolverConfig,
}

impl Solver {
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Balance the model and build the least-cost starting plan.
    ///
    /// A model that already carries a plan is only checked, so an optimal
    /// plan fed back in stays as it is.
    pub fn initial_plan(&self, model: TransportModel) -> Result<TransportModel, SolveError> {
        let model = if model.has_basis() {
            model
        } else {
            least_cost_plan(balance(model))
        };
        check_basis(&model)?;
        if !model.is_feasible() {
            return Err(SolveError::InfeasiblePlan);
        }
        Ok(model)
    }

    /// Solve `model` to optimality.
    pub fn solve(&self, model: TransportModel) -> Result<Solution, SolveError> {
        info!(
            "solving {}×{} transportation model",
            model.supply_nodes(),
            model.demand_nodes()
        );
        let mut model = self.initial_plan(model)?;
        let initial_cost = model.total_cost();
        debug!("initial plan cost {}", initial_cost);

        let mut pivots = Vec::new();
        loop {
            let potentials = compute_potentials(&model)?;
            let Some(entering) = find_entering_cell(&model, &potentials) else {
                info!(
                    "optimal after {} pivots: cost {} (initial {})",
                    pivots.len(),
                    model.total_cost(),
                    initial_cost
                );
                return Ok(Solution {
                    model,
                    potentials,
                    initial_cost,
                    pivots,
                });
            };

            if pivots.len() >= self.config.max_iterations {
                return Err(SolveError::IterationLimit {
                    limit: self.config.max_iterations,
                });
            }

            let cycle = find_cycle(&model, entering)?;
            let record = apply_pivot(&mut model, &cycle)?;
            debug!(
                "pivot {}: {} enters, {} leaves, theta {}, cost {}",
                pivots.len() + 1,
                record.entering,
                record.leaving,
                record.theta,
                record.cost_after
            );
            if log_enabled!(Level::Debug) {
                check_basis(&model)?;
            }
            pivots.push(record);
        }
    }
}

/// The basis must be a spanning tree of the supply/demand graph.
fn check_basis(model: &TransportModel) -> Result<(), SolveError> {
    if model.basic_count() != model.basis_size() || !BasisGraph::from_model(model).is_spanning_tree() {
        return Err(SolveError::MalformedBasis {
            basic: model.basic_count(),
            expected: model.basis_size(),
        });
    }
    Ok(())
}

impl std::fmt::Display for Solution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Optimal Plan ===")?;
        writeln!(f, "{}", self.model)?;
        writeln!(f)?;
        writeln!(f, "Initial cost:   {}", self.initial_cost.normalize())?;
        writeln!(f, "Optimal cost:   {}", self.total_cost().normalize())?;
        writeln!(f, "Savings:        {}", self.savings().normalize())?;
        writeln!(f, "Savings %:      {:.1}%", self.savings_percent())?;
        writeln!(f, "Pivots:         {}", self.iterations())?;

        for (k, pivot) in self.pivots.iter().enumerate() {
            writeln!(
                f,
                "  {:>3}. enter {} leave {} theta {} -> {}",
                k + 1,
                pivot.entering,
                pivot.leaving,
                pivot.theta.normalize(),
                pivot.cost_after.normalize()
            )?;
        }
        Ok(())
    }
}
