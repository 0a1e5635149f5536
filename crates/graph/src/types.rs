use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::OnceLock;

/// One row of the evolution dataset: an entity and the entities it evolves into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvolutionRecord {
    /// Entity name; rows with a blank name are skipped by the builder
    pub name: String,

    /// Delimited target list (e.g. "Greymon; Tyrannomon"), or "none"
    #[serde(default)]
    pub targets: String,
}

impl EvolutionRecord {
    pub fn new(name: impl Into<String>, targets: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            targets: targets.into(),
        }
    }
}

/// Node in the evolution graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityNode {
    pub name: String,
}

/// Stored edge lists of a single entity, in insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Adjacency {
    /// Entities this one evolves into
    pub forward: Vec<String>,

    /// Entities this one evolves from
    pub backward: Vec<String>,
}

/// Evolution graph keyed by entity name.
///
/// Forward edges are outgoing petgraph edges, backward edges are incoming ones,
/// so every A→B edge is visible from both endpoints by construction.
pub struct EvolutionGraph {
    pub(crate) graph: DiGraph<EntityNode, ()>,

    /// Entity name -> NodeIndex mapping for fast lookup
    pub(crate) name_index: HashMap<String, NodeIndex>,

    /// Undirected neighbor lists, computed on first search
    neighbors: OnceLock<Vec<Vec<NodeIndex>>>,
}

impl EvolutionGraph {
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            name_index: HashMap::new(),
            neighbors: OnceLock::new(),
        }
    }

    /// Get or create the node for `name`
    pub(crate) fn ensure_entity(&mut self, name: &str) -> NodeIndex {
        if let Some(&idx) = self.name_index.get(name) {
            return idx;
        }
        let idx = self.graph.add_node(EntityNode {
            name: name.to_string(),
        });
        self.name_index.insert(name.to_string(), idx);
        self.neighbors.take();
        idx
    }

    /// Add a "from evolves into to" edge between existing nodes
    pub(crate) fn add_evolution(&mut self, from: NodeIndex, to: NodeIndex) {
        self.graph.add_edge(from, to, ());
        self.neighbors.take();
    }

    /// Find node by entity name
    pub fn find_node(&self, name: &str) -> Option<NodeIndex> {
        self.name_index.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.name_index.contains_key(name)
    }

    /// Entity name of a node
    pub fn name_of(&self, idx: NodeIndex) -> Option<&str> {
        self.graph.node_weight(idx).map(|node| node.name.as_str())
    }

    /// All entity names, in insertion order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.graph
            .node_indices()
            .filter_map(move |idx| self.name_of(idx))
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Neighbors of `idx` in one direction, in edge insertion order.
    ///
    /// petgraph walks a node's edge list newest-first, so the walk is reversed.
    pub(crate) fn directed(&self, idx: NodeIndex, dir: Direction) -> Vec<NodeIndex> {
        let mut out: Vec<NodeIndex> = self.graph.neighbors_directed(idx, dir).collect();
        out.reverse();
        out
    }

    /// Forward then backward neighbors of every node, duplicates removed.
    /// Indexed by `NodeIndex::index()`.
    pub(crate) fn neighbor_table(&self) -> &[Vec<NodeIndex>] {
        self.neighbors.get_or_init(|| {
            self.graph
                .node_indices()
                .map(|idx| {
                    let mut list: Vec<NodeIndex> = Vec::new();
                    for next in self
                        .directed(idx, Direction::Outgoing)
                        .into_iter()
                        .chain(self.directed(idx, Direction::Incoming))
                    {
                        if next != idx && !list.contains(&next) {
                            list.push(next);
                        }
                    }
                    list
                })
                .collect()
        })
    }
}

impl Default for EvolutionGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EvolutionGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EvolutionGraph")
            .field("nodes", &self.node_count())
            .field("edges", &self.edge_count())
            .finish()
    }
}
