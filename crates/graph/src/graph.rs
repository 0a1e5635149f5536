use crate::error::{GraphError, Result};
use crate::types::{Adjacency, EvolutionGraph};
use petgraph::graph::NodeIndex;
use petgraph::Direction;

impl EvolutionGraph {
    /// Entities `name` evolves into, in stored order
    pub fn forward_edges(&self, name: &str) -> Vec<&str> {
        self.named_edges(name, Direction::Outgoing)
    }

    /// Entities `name` evolves from, in stored order
    pub fn backward_edges(&self, name: &str) -> Vec<&str> {
        self.named_edges(name, Direction::Incoming)
    }

    /// Entities reachable in one step from `name` in either direction.
    /// Forward edges come first; an entity listed both ways appears once.
    pub fn neighbors(&self, name: &str) -> Vec<&str> {
        let Some(idx) = self.find_node(name) else {
            return Vec::new();
        };
        self.neighbors_of(idx)
            .iter()
            .filter_map(|&next| self.name_of(next))
            .collect()
    }

    /// Stored edge lists of `name`
    pub fn adjacency(&self, name: &str) -> Result<Adjacency> {
        if !self.contains(name) {
            return Err(GraphError::node_not_found(name));
        }
        Ok(Adjacency {
            forward: self.forward_edges(name).into_iter().map(String::from).collect(),
            backward: self.backward_edges(name).into_iter().map(String::from).collect(),
        })
    }

    /// Undirected neighbor list of a node
    pub(crate) fn neighbors_of(&self, idx: NodeIndex) -> &[NodeIndex] {
        self.neighbor_table()
            .get(idx.index())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Map node indices back to entity names
    pub(crate) fn names_of(&self, path: &[NodeIndex]) -> Vec<String> {
        path.iter()
            .filter_map(|&idx| self.name_of(idx))
            .map(String::from)
            .collect()
    }

    fn named_edges(&self, name: &str, dir: Direction) -> Vec<&str> {
        let Some(idx) = self.find_node(name) else {
            return Vec::new();
        };
        self.directed(idx, dir)
            .into_iter()
            .filter_map(|next| self.name_of(next))
            .collect()
    }
}
