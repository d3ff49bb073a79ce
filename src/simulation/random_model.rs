//! Random transportation models for testing and benchmarking.

use crate::core::error::ModelError;
use crate::core::model::TransportModel;
use rand::Rng;
use rust_decimal::Decimal;

/// Configuration for generating a random transportation model.
#[derive(Debug, Clone)]
pub struct ModelConfig {
    /// Number of supply nodes.
    pub supply_nodes: usize,
    /// Number of demand nodes.
    pub demand_nodes: usize,
    /// Smallest capacity or requirement of a node.
    pub min_quantity: i64,
    /// Largest capacity or requirement of a node.
    pub max_quantity: i64,
    /// Smallest unit shipping cost.
    pub min_cost: i64,
    /// Largest unit shipping cost.
    pub max_cost: i64,
    /// Adjust the last nodes so that total supply equals total demand.
    pub balanced: bool,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            supply_nodes: 5,
            demand_nodes: 5,
            min_quantity: 10,
            max_quantity: 100,
            min_cost: 1,
            max_cost: 20,
            balanced: true,
        }
    }
}

/// Generate a random model with the thread-local RNG.
pub fn generate_random_model(config: &ModelConfig) -> Result<TransportModel, ModelError> {
    generate_random_model_with(config, &mut rand::thread_rng())
}

/// Generate a random model from the given RNG (seed it for reproducible runs).
///
/// With `balanced` set, the gap between total supply and total demand is
/// added to the last demand node, or to the last supply node when demand
/// is the larger side.
pub fn generate_random_model_with<R: Rng>(
    config: &ModelConfig,
    rng: &mut R,
) -> Result<TransportModel, ModelError> {
    let (lo, hi) = (config.min_quantity.max(1), config.max_quantity.max(1));
    let (lo, hi) = (lo.min(hi), lo.max(hi));
    let (cost_lo, cost_hi) = (
        config.min_cost.min(config.max_cost),
        config.min_cost.max(config.max_cost),
    );

    let mut supply: Vec<i64> = (0..config.supply_nodes)
        .map(|_| rng.gen_range(lo..=hi))
        .collect();
    let mut demand: Vec<i64> = (0..config.demand_nodes)
        .map(|_| rng.gen_range(lo..=hi))
        .collect();
    let cost: Vec<Vec<i64>> = (0..config.supply_nodes)
        .map(|_| {
            (0..config.demand_nodes)
                .map(|_| rng.gen_range(cost_lo..=cost_hi))
                .collect()
        })
        .collect();

    if config.balanced {
        let gap = supply.iter().sum::<i64>() - demand.iter().sum::<i64>();
        if gap > 0 {
            if let Some(last) = demand.last_mut() {
                *last += gap;
            }
        } else if gap < 0 {
            if let Some(last) = supply.last_mut() {
                *last -= gap;
            }
        }
    }

    let model = TransportModel::new(
        supply.into_iter().map(Decimal::from).collect(),
        demand.into_iter().map(Decimal::from).collect(),
        cost.into_iter()
            .map(|row| row.into_iter().map(Decimal::from).collect())
            .collect(),
    )?;
    Ok(model)
}
