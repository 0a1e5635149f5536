use crate::coverage::GroupIndex;
use crate::progress::ProgressSink;
use crate::search::{Bfs, BfsOutcome, SearchConfig, SearchOutcome, SearchReport};
use crate::types::EvolutionGraph;

/// Entry point for every path search over one evolution graph.
///
/// Holds only a shared borrow of the graph, so any number of finders can run
/// against the same graph at once; each search owns its own queue and visited set.
#[derive(Debug, Clone, Copy)]
pub struct PathFinder<'g> {
    pub(crate) graph: &'g EvolutionGraph,
    config: SearchConfig,
}

impl<'g> PathFinder<'g> {
    pub fn new(graph: &'g EvolutionGraph) -> Self {
        Self::with_config(graph, SearchConfig::default())
    }

    pub fn with_config(graph: &'g EvolutionGraph, config: SearchConfig) -> Self {
        Self { graph, config }
    }

    pub fn config(&self) -> SearchConfig {
        self.config
    }

    /// Shortest path from `start` to `end` whose entities intersect every group.
    ///
    /// Breadth-first over (last entity, satisfied groups); the first valid path
    /// dequeued is returned, so it is the shortest, with ties resolved by edge
    /// order. Stops with [`SearchOutcome::CapReached`] when the frontier would
    /// exceed `max_frontier`.
    pub fn find_path<S: AsRef<str>>(
        &self,
        start: &str,
        end: &str,
        groups: &[Vec<S>],
        progress: &mut dyn ProgressSink,
    ) -> SearchReport {
        let index = GroupIndex::resolve(self.graph, groups);
        let bfs = Bfs {
            graph: self.graph,
            groups: &index,
            prune: true,
            max_frontier: Some(self.config.max_frontier),
        };

        log::debug!(
            "Searching {start} -> {end} over {} groups (max frontier {})",
            index.group_count(),
            self.config.max_frontier
        );
        let (outcome, stats) = bfs.run(start, end, progress);

        let outcome = match outcome {
            BfsOutcome::Found(path) => SearchOutcome::Found(self.graph.names_of(&path)),
            BfsOutcome::Exhausted => SearchOutcome::Exhausted,
            BfsOutcome::CapReached => SearchOutcome::CapReached,
        };
        log::debug!("Search {start} -> {end}: {outcome:?} after {} steps", stats.steps);

        SearchReport { outcome, stats }
    }
}
