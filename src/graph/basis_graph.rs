use crate::core::model::TransportModel;
use crate::core::node::{Node, Position};
use petgraph::algo::{connected_components, is_cyclic_undirected};
use petgraph::graph::{NodeIndex, UnGraph};

/// The basis of a plan viewed as a bipartite graph.
///
/// Vertices are the supply rows and demand columns; each basic cell
/// `(i, j)` is an undirected edge between `A_i` and `B_j`. A valid basis is a spanning
/// tree of this graph: connected, acyclic, `m + n - 1` edges. Only then are
/// the potentials uniquely determined.
#[derive(Debug, Clone)]
pub struct BasisGraph {
    graph: UnGraph<Node, Position>,
}

impl BasisGraph {
    pub fn from_model(model: &TransportModel) -> Self {
        let mut graph = UnGraph::new_undirected();
        let rows: Vec<NodeIndex> = (0..model.supply_nodes())
            .map(|i| graph.add_node(Node::Supply(i)))
            .collect();
        let cols: Vec<NodeIndex> = (0..model.demand_nodes())
            .map(|j| graph.add_node(Node::Demand(j)))
            .collect();
        for p in model.basic_cells() {
            graph.add_edge(rows[p.row], cols[p.col], p);
        }
        Self { graph }
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_connected(&self) -> bool {
        connected_components(&self.graph) == 1
    }

    pub fn is_acyclic(&self) -> bool {
        !is_cyclic_undirected(&self.graph)
    }

    pub fn is_spanning_tree(&self) -> bool {
        self.edge_count() + 1 == self.node_count() && self.is_connected() && self.is_acyclic()
    }

    /// Nodes touched by exactly one basic cell.
    pub fn leaves(&self) -> Vec<Node> {
        let mut leaves: Vec<Node> = self
            .graph
            .node_indices()
            .filter(|&ix| self.graph.neighbors(ix).count() == 1)
            .map(|ix| self.graph[ix])
            .collect();
        leaves.sort();
        leaves
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::Cell;
    use rust_decimal::Decimal;

    fn with_basis(basic: &[(usize, usize)]) -> TransportModel {
        let mut model = TransportModel::from_integers(
            &[10, 10],
            &[5, 5, 10],
            &[vec![1, 2, 3], vec![4, 5, 6]],
        )
        .unwrap();
        for &(i, j) in basic {
            *model.cell_mut(i, j) = Cell {
                value: Decimal::ONE,
                is_basic: true,
            };
        }
        model
    }

    #[test]
    fn test_spanning_tree() {
        let graph = BasisGraph::from_model(&with_basis(&[(0, 0), (0, 1), (0, 2), (1, 2)]));
        assert_eq!(graph.node_count(), 5);
        assert_eq!(graph.edge_count(), 4);
        assert!(graph.is_spanning_tree());
        assert_eq!(graph.leaves(), vec![Node::Supply(1), Node::Demand(0), Node::Demand(1)]);
    }

    #[test]
    fn test_disconnected_basis() {
        let graph = BasisGraph::from_model(&with_basis(&[(0, 0), (0, 1), (1, 2)]));
        assert!(graph.is_acyclic());
        assert!(!graph.is_connected());
        assert!(!graph.is_spanning_tree());
    }

    #[test]
    fn test_cyclic_basis() {
        let graph = BasisGraph::from_model(&with_basis(&[(0, 0), (0, 1), (1, 0), (1, 1), (1, 2)]));
        assert!(graph.is_connected());
        assert!(!graph.is_acyclic());
        assert!(!graph.is_spanning_tree());
    }
}
