use crate::coverage::GroupIndex;
use crate::finder::PathFinder;
use crate::progress::NoProgress;
use crate::search::{Bfs, BfsOutcome};

impl PathFinder<'_> {
    /// Shortest path from `start` to `end` that visits every entity in `required`,
    /// in any order, never repeating an entity.
    ///
    /// No pruning and no frontier cap: meant for small required sets.
    pub fn find_path_through<S: AsRef<str>>(
        &self,
        start: &str,
        end: &str,
        required: &[S],
    ) -> Option<Vec<String>> {
        if let Some(missing) = required
            .iter()
            .map(|name| name.as_ref().trim())
            .find(|name| !self.graph.contains(name))
        {
            log::debug!("Required entity {missing} is not in the evolution graph");
            return None;
        }

        let singletons: Vec<Vec<&str>> = required.iter().map(|name| vec![name.as_ref()]).collect();
        let index = GroupIndex::resolve(self.graph, &singletons);
        let bfs = Bfs {
            graph: self.graph,
            groups: &index,
            prune: false,
            max_frontier: None,
        };

        match bfs.run(start, end, &mut NoProgress).0 {
            BfsOutcome::Found(path) => Some(self.graph.names_of(&path)),
            BfsOutcome::Exhausted | BfsOutcome::CapReached => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{EvolutionRecord, GraphBuilder, PathFinder};
    use pretty_assertions::assert_eq;

    fn star() -> crate::EvolutionGraph {
        // Hub H with spokes; A-H-B, H-C-D
        GraphBuilder::new().build(&[
            EvolutionRecord::new("A", "H"),
            EvolutionRecord::new("H", "B;C"),
            EvolutionRecord::new("C", "D"),
        ])
    }

    #[test]
    fn test_visits_required_in_any_order() {
        let graph = star();
        let finder = PathFinder::new(&graph);

        let path = finder.find_path_through("A", "D", &["C", "H"]).unwrap();

        assert_eq!(path, vec!["A", "H", "C", "D"]);
    }

    #[test]
    fn test_required_spoke_off_the_route_is_unreachable() {
        let graph = star();
        let finder = PathFinder::new(&graph);

        // Visiting B then continuing to D would pass H twice
        assert_eq!(finder.find_path_through("A", "D", &["B"]), None);
    }

    #[test]
    fn test_unknown_required_entity() {
        let graph = star();
        let finder = PathFinder::new(&graph);

        assert_eq!(finder.find_path_through("A", "D", &["Q"]), None);
    }

    #[test]
    fn test_no_requirements() {
        let graph = star();
        let finder = PathFinder::new(&graph);

        let path = finder.find_path_through::<&str>("B", "A", &[]).unwrap();

        assert_eq!(path, vec!["B", "H", "A"]);
    }

    #[test]
    fn test_duplicate_requirements_collapse() {
        let graph = star();
        let finder = PathFinder::new(&graph);

        let path = finder.find_path_through("A", "B", &["H", "H"]).unwrap();

        assert_eq!(path, vec!["A", "H", "B"]);
    }
}
