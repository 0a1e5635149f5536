use crate::coverage::{Coverage, GroupIndex};
use crate::error::{GraphError, Result};
use crate::progress::{ProgressEvent, ProgressSink};
use crate::types::EvolutionGraph;
use petgraph::graph::NodeIndex;
use serde::{Deserialize, Serialize};
use std::collections::{HashSet, VecDeque};

/// Frontier cap used when nothing else is configured
pub const DEFAULT_MAX_FRONTIER: usize = 200_000;

/// Dequeues between two `ProgressEvent::Step` reports
pub const PROGRESS_INTERVAL: usize = 1000;

/// Tunables of the constrained search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Maximum number of queued frontier items before the search gives up
    pub max_frontier: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_frontier: DEFAULT_MAX_FRONTIER,
        }
    }
}

impl SearchConfig {
    pub fn with_max_frontier(max_frontier: usize) -> Self {
        Self { max_frontier }
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_frontier == 0 {
            return Err(GraphError::invalid_config("max_frontier must be > 0"));
        }
        Ok(())
    }
}

/// How a search ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "path", rename_all = "snake_case")]
pub enum SearchOutcome {
    /// Shortest valid path, start to end
    Found(Vec<String>),

    /// Every reachable state was explored without a valid path
    Exhausted,

    /// The frontier cap stopped the search; a larger cap may still succeed
    CapReached,
}

impl SearchOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    pub fn path(&self) -> Option<&[String]> {
        match self {
            Self::Found(path) => Some(path),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    /// Frontier items dequeued
    pub steps: usize,
    /// Largest queue length observed
    pub max_queue: usize,
    /// Frontier items dropped by the stranded-group rule
    pub pruned: usize,
    /// Valid paths discovered (0 or 1, the first one is returned)
    pub found: usize,
    /// Distinct (node, coverage) states expanded or checked
    pub visited: usize,
}

/// Outcome plus counters of one search run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchReport {
    pub outcome: SearchOutcome,
    pub stats: SearchStats,
}

impl SearchReport {
    /// Found path, or an empty slice
    pub fn path(&self) -> &[String] {
        self.outcome.path().unwrap_or(&[])
    }

    /// Collapse to the plain sequence: the path when found, empty otherwise
    pub fn into_path(self) -> Vec<String> {
        match self.outcome {
            SearchOutcome::Found(path) => path,
            _ => Vec::new(),
        }
    }
}

/// Raw result of the breadth-first engine, in node indices
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum BfsOutcome {
    Found(Vec<NodeIndex>),
    Exhausted,
    CapReached,
}

struct FrontierItem {
    path: Vec<NodeIndex>,
    coverage: Coverage,
}

/// Breadth-first search over (last node, coverage) states.
///
/// Shared by the group search (pruning, capped) and the required-node search
/// (singleton groups, no pruning, uncapped).
pub(crate) struct Bfs<'a> {
    pub(crate) graph: &'a EvolutionGraph,
    pub(crate) groups: &'a GroupIndex,
    pub(crate) prune: bool,
    pub(crate) max_frontier: Option<usize>,
}

impl Bfs<'_> {
    pub(crate) fn run(
        &self,
        start: &str,
        end: &str,
        progress: &mut dyn ProgressSink,
    ) -> (BfsOutcome, SearchStats) {
        let mut stats = SearchStats::default();
        let outcome = self.explore(start, end, progress, &mut stats);
        progress.report(&ProgressEvent::Finished {
            steps: stats.steps,
            found: stats.found,
            pruned: stats.pruned,
        });
        (outcome, stats)
    }

    fn explore(
        &self,
        start: &str,
        end: &str,
        progress: &mut dyn ProgressSink,
        stats: &mut SearchStats,
    ) -> BfsOutcome {
        let Some(start) = self.graph.find_node(start) else {
            return BfsOutcome::Exhausted;
        };
        let end = self.graph.find_node(end);
        let group_count = self.groups.group_count();

        if self.max_frontier == Some(0) {
            progress.report(&ProgressEvent::CapReached {
                step: 0,
                max_frontier: 0,
            });
            return BfsOutcome::CapReached;
        }

        let mut queue: VecDeque<FrontierItem> = VecDeque::new();
        let mut visited: HashSet<(NodeIndex, Coverage)> = HashSet::new();
        queue.push_back(FrontierItem {
            path: vec![start],
            coverage: self.groups.coverage_of(start),
        });
        stats.max_queue = 1;

        while let Some(item) = queue.pop_front() {
            stats.steps += 1;
            if stats.steps % PROGRESS_INTERVAL == 0 {
                progress.report(&ProgressEvent::Step {
                    step: stats.steps,
                    queue: queue.len(),
                    max_queue: stats.max_queue,
                    found: stats.found,
                    pruned: stats.pruned,
                });
            }

            let Some(&last) = item.path.last() else {
                continue;
            };
            if !visited.insert((last, item.coverage.clone())) {
                continue;
            }
            stats.visited = visited.len();

            if Some(last) == end && item.coverage.is_complete(group_count) {
                stats.found += 1;
                progress.report(&ProgressEvent::Found {
                    step: stats.steps,
                    path_len: item.path.len(),
                });
                return BfsOutcome::Found(item.path);
            }

            if self.prune && self.groups.stranded_group(&item.coverage, &item.path).is_some() {
                stats.pruned += 1;
                progress.report(&ProgressEvent::Pruned {
                    step: stats.steps,
                    path_len: item.path.len(),
                    covered: item.coverage.indices(),
                    missing: self.groups.missing(&item.coverage),
                });
                continue;
            }

            for &next in self.graph.neighbors_of(last) {
                if item.path.contains(&next) {
                    continue;
                }
                if let Some(cap) = self.max_frontier {
                    if queue.len() >= cap {
                        progress.report(&ProgressEvent::CapReached {
                            step: stats.steps,
                            max_frontier: cap,
                        });
                        return BfsOutcome::CapReached;
                    }
                }
                let mut path = Vec::with_capacity(item.path.len() + 1);
                path.extend_from_slice(&item.path);
                path.push(next);
                queue.push_back(FrontierItem {
                    path,
                    coverage: self.groups.extend(&item.coverage, next),
                });
                stats.max_queue = stats.max_queue.max(queue.len());
            }
        }

        BfsOutcome::Exhausted
    }
}
