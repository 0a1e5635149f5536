//! # Evopath Graph
//!
//! Evolution graph and constrained path search over it.
//!
//! ## Features
//!
//! - **Graph building** - bidirectional adjacency from flat evolution records
//! - **Constrained search** - shortest path touching one entity of every requirement group
//! - **Required-node search** - shortest path through a fixed set of entities
//! - **Candidate search** - brute force over concrete candidate choices
//!
//! ## Architecture
//!
//! ```text
//! EvolutionRecord[]
//!     │
//!     ├──> Graph Builder
//!     │      ├─ Pass 1: node per named record
//!     │      └─ Pass 2: forward + backward edges per target
//!     │
//!     ├──> Evolution Graph (petgraph)
//!     │      ├─ Nodes: entities
//!     │      └─ Edges: "evolves into", traversed both ways
//!     │
//!     └──> Path Finder
//!            ├─ BFS over (entity, covered groups)
//!            ├─ Prune groups that can no longer be satisfied
//!            └─ Stop at the frontier cap
//! ```
//!
//! ## Example
//!
//! ```rust
//! use evopath_graph::{EvolutionRecord, GraphBuilder, NoProgress, PathFinder};
//!
//! let graph = GraphBuilder::new().build(&[
//!     EvolutionRecord::new("Agumon", "Greymon"),
//!     EvolutionRecord::new("Greymon", "MetalGreymon"),
//! ]);
//!
//! let finder = PathFinder::new(&graph);
//! let groups = vec![vec!["Greymon"]];
//! let report = finder.find_path("Agumon", "MetalGreymon", &groups, &mut NoProgress);
//!
//! assert_eq!(report.into_path(), vec!["Agumon", "Greymon", "MetalGreymon"]);
//! ```

mod builder;
mod combinatorial;
mod coverage;
mod error;
mod finder;
mod graph;
mod progress;
mod required;
mod search;
mod types;

pub use builder::{BuildStats, GraphBuilder, DEFAULT_DELIMITER};
pub use combinatorial::{combination_count, CandidatePath};
pub use coverage::{Coverage, MASK_CAPACITY};
pub use error::{GraphError, Result};
pub use finder::PathFinder;
pub use progress::{LogProgress, NoProgress, ProgressEvent, ProgressSink};
pub use search::{
    SearchConfig, SearchOutcome, SearchReport, SearchStats, DEFAULT_MAX_FRONTIER,
    PROGRESS_INTERVAL,
};
pub use types::{Adjacency, EntityNode, EvolutionGraph, EvolutionRecord};
