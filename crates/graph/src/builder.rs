use crate::types::{EvolutionGraph, EvolutionRecord};
use serde::Serialize;

/// Target-list value meaning "evolves into nothing"
const NONE_SENTINEL: &str = "none";

/// Default separator between targets in a record
pub const DEFAULT_DELIMITER: char = ';';

/// Counters reported by [`GraphBuilder::build_with_stats`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BuildStats {
    pub records: usize,
    pub skipped_records: usize,
    pub nodes: usize,
    pub edges: usize,
}

/// Build an evolution graph from flat records
#[derive(Debug, Clone)]
pub struct GraphBuilder {
    delimiter: char,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
        }
    }

    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Build graph from records
    pub fn build(&self, records: &[EvolutionRecord]) -> EvolutionGraph {
        self.build_with_stats(records).0
    }

    pub fn build_with_stats(&self, records: &[EvolutionRecord]) -> (EvolutionGraph, BuildStats) {
        let mut graph = EvolutionGraph::new();
        let mut stats = BuildStats {
            records: records.len(),
            ..BuildStats::default()
        };

        // Phase 1: a node for every named record, even without targets
        for (row, record) in records.iter().enumerate() {
            let name = record.name.trim();
            if name.is_empty() {
                log::debug!("Skipping evolution record {row}: missing entity name");
                stats.skipped_records += 1;
                continue;
            }
            graph.ensure_entity(name);
        }

        // Phase 2: forward edges on the source, backward edges on each target
        for (row, record) in records.iter().enumerate() {
            let name = record.name.trim();
            if name.is_empty() {
                continue;
            }
            let Some(from) = graph.find_node(name) else {
                continue;
            };

            for target in self.split_targets(&record.targets) {
                if target == name {
                    log::debug!("Ignoring self-evolution of {name} in record {row}");
                    continue;
                }
                let to = graph.ensure_entity(target);
                graph.add_evolution(from, to);
            }
        }

        stats.nodes = graph.node_count();
        stats.edges = graph.edge_count();

        log::info!(
            "Built evolution graph: {} nodes, {} edges ({} records, {} skipped)",
            stats.nodes,
            stats.edges,
            stats.records,
            stats.skipped_records
        );

        (graph, stats)
    }

    /// Split a delimited target list, dropping blanks and the "none" sentinel
    fn split_targets<'a>(&self, raw: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        let raw = raw.trim();
        let listed = !raw.is_empty() && !raw.eq_ignore_ascii_case(NONE_SENTINEL);
        raw.split(self.delimiter)
            .map(str::trim)
            .filter(move |t| listed && !t.is_empty() && !t.eq_ignore_ascii_case(NONE_SENTINEL))
    }
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn rec(name: &str, targets: &str) -> EvolutionRecord {
        EvolutionRecord::new(name, targets)
    }

    #[test]
    fn test_build_simple_graph() {
        let records = vec![
            rec("Agumon", "Greymon; Tyrannomon"),
            rec("Greymon", "MetalGreymon"),
        ];

        let graph = GraphBuilder::new().build(&records);

        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.edge_count(), 3);
        assert_eq!(graph.forward_edges("Agumon"), vec!["Greymon", "Tyrannomon"]);
        assert_eq!(graph.backward_edges("Greymon"), vec!["Agumon"]);
        assert_eq!(graph.backward_edges("MetalGreymon"), vec!["Greymon"]);
    }

    #[test]
    fn test_isolated_entities_get_nodes() {
        let records = vec![rec("Koromon", ""), rec("Tanemon", "None")];

        let (graph, stats) = GraphBuilder::new().build_with_stats(&records);

        assert!(graph.contains("Koromon"));
        assert!(graph.contains("Tanemon"));
        assert!(!graph.contains("None"));
        assert_eq!(stats.edges, 0);
        assert_eq!(stats.nodes, 2);
    }

    #[test]
    fn test_blank_names_are_skipped() {
        let records = vec![rec("   ", "Greymon"), rec("Agumon", "Greymon")];

        let (graph, stats) = GraphBuilder::new().build_with_stats(&records);

        assert_eq!(stats.skipped_records, 1);
        assert_eq!(graph.backward_edges("Greymon"), vec!["Agumon"]);
    }

    #[test]
    fn test_targets_are_trimmed_and_blanks_dropped() {
        let records = vec![rec("Agumon", " Greymon ;; ;GeoGreymon;none")];

        let graph = GraphBuilder::new().build(&records);

        assert_eq!(graph.forward_edges("Agumon"), vec!["Greymon", "GeoGreymon"]);
    }

    #[test]
    fn test_self_edges_are_not_created() {
        let records = vec![rec("Agumon", "Agumon;Greymon")];

        let graph = GraphBuilder::new().build(&records);

        assert_eq!(graph.forward_edges("Agumon"), vec!["Greymon"]);
        assert!(graph.backward_edges("Agumon").is_empty());
    }

    #[test]
    fn test_custom_delimiter() {
        let records = vec![rec("Agumon", "Greymon|Tyrannomon")];

        let graph = GraphBuilder::new().with_delimiter('|').build(&records);

        assert_eq!(graph.forward_edges("Agumon"), vec!["Greymon", "Tyrannomon"]);
    }

    #[test]
    fn test_neighbors_forward_first_without_duplicates() {
        // Greymon both evolves into and from Agumon (de-digivolution listed as evolution)
        let records = vec![
            rec("Agumon", "Greymon"),
            rec("Greymon", "Agumon;MetalGreymon"),
            rec("Koromon", "Agumon"),
        ];

        let graph = GraphBuilder::new().build(&records);

        assert_eq!(graph.neighbors("Agumon"), vec!["Greymon", "Koromon"]);
        assert_eq!(graph.neighbors("Greymon"), vec!["Agumon", "MetalGreymon"]);
        assert!(graph.neighbors("Gabumon").is_empty());
    }

    #[test]
    fn test_adjacency_unknown_entity() {
        let graph = GraphBuilder::new().build(&[rec("Agumon", "Greymon")]);

        let adjacency = graph.adjacency("Greymon").unwrap();
        assert_eq!(adjacency.forward, Vec::<String>::new());
        assert_eq!(adjacency.backward, vec!["Agumon".to_string()]);
        assert!(graph.adjacency("Gabumon").is_err());
    }
}
