use evopath_graph::{
    combination_count, EvolutionRecord, GraphBuilder, NoProgress, PathFinder, ProgressEvent,
    SearchConfig, SearchOutcome, MASK_CAPACITY, PROGRESS_INTERVAL,
};
use pretty_assertions::assert_eq;

fn chain() -> evopath_graph::EvolutionGraph {
    GraphBuilder::new().build(&[
        EvolutionRecord::new("A", "B"),
        EvolutionRecord::new("B", "C"),
        EvolutionRecord::new("C", "D"),
    ])
}

#[test]
fn chain_with_single_group() {
    let graph = chain();
    let report = PathFinder::new(&graph).find_path("A", "D", &[vec!["C"]], &mut NoProgress);

    assert_eq!(report.outcome, SearchOutcome::Found(vec!["A".into(), "B".into(), "C".into(), "D".into()]));
}

#[test]
fn isolated_groups_give_empty_path() {
    let graph = GraphBuilder::new().build(&[
        EvolutionRecord::new("A", "B"),
        EvolutionRecord::new("B", "D"),
        EvolutionRecord::new("X", "none"),
        EvolutionRecord::new("Y", ""),
    ]);

    let report = PathFinder::new(&graph).find_path("A", "D", &[vec!["X"], vec!["Y"]], &mut NoProgress);

    assert_eq!(report.outcome, SearchOutcome::Exhausted);
    assert!(report.into_path().is_empty());
}

#[test]
fn start_equals_end_and_already_satisfied() {
    let graph = chain();
    let report = PathFinder::new(&graph).find_path("C", "C", &[vec!["C"]], &mut NoProgress);

    assert_eq!(report.into_path(), vec!["C"]);
}

#[test]
fn frontier_cap_of_one_does_not_fault() {
    let graph = GraphBuilder::new().build(&[
        EvolutionRecord::new("A", "B;C;E"),
        EvolutionRecord::new("B", "D"),
        EvolutionRecord::new("C", "D"),
    ]);
    let finder = PathFinder::with_config(&graph, SearchConfig::with_max_frontier(1));
    let mut events = Vec::new();

    let report = finder.find_path(
        "A",
        "D",
        &[vec!["C"]],
        &mut |event: &ProgressEvent| events.push(event.clone()),
    );

    assert_eq!(report.outcome, SearchOutcome::CapReached);
    assert!(report.path().is_empty());
    assert!(events
        .iter()
        .any(|e| matches!(e, ProgressEvent::CapReached { max_frontier: 1, .. })));
}

#[test]
fn cap_reached_then_found_with_larger_cap() {
    let graph = GraphBuilder::new().build(&[
        EvolutionRecord::new("A", "B;C;E"),
        EvolutionRecord::new("B", "D"),
        EvolutionRecord::new("C", "D"),
    ]);

    let capped = PathFinder::with_config(&graph, SearchConfig::with_max_frontier(1))
        .find_path("A", "D", &[vec!["C"]], &mut NoProgress);
    let roomy = PathFinder::with_config(&graph, SearchConfig::with_max_frontier(64))
        .find_path("A", "D", &[vec!["C"]], &mut NoProgress);

    assert_eq!(capped.outcome, SearchOutcome::CapReached);
    assert_eq!(roomy.into_path(), vec!["A", "C", "D"]);
}

#[test]
fn revisits_count_against_the_frontier_cap() {
    // A-B-C is a triangle; the detours A-B-C and A-C-B both stay queued
    let graph = GraphBuilder::new().build(&[
        EvolutionRecord::new("A", "B;C"),
        EvolutionRecord::new("B", "C"),
        EvolutionRecord::new("C", "D"),
    ]);

    let capped = PathFinder::with_config(&graph, SearchConfig::with_max_frontier(2))
        .find_path::<&str>("A", "D", &[], &mut NoProgress);
    let roomy = PathFinder::with_config(&graph, SearchConfig::with_max_frontier(3))
        .find_path::<&str>("A", "D", &[], &mut NoProgress);

    assert_eq!(capped.outcome, SearchOutcome::CapReached);
    assert_eq!(capped.stats.steps, 3);
    assert_eq!(roomy.into_path(), vec!["A", "C", "D"]);
}

#[test]
fn long_search_reports_periodic_steps() {
    let len = PROGRESS_INTERVAL + 500;
    let records: Vec<EvolutionRecord> = (0..len)
        .map(|i| EvolutionRecord::new(format!("N{i}"), format!("N{}", i + 1)))
        .collect();
    let graph = GraphBuilder::new().build(&records);
    let mut steps = Vec::new();

    let report = PathFinder::new(&graph).find_path::<&str>(
        "N0",
        &format!("N{len}"),
        &[],
        &mut |event: &ProgressEvent| {
            if let ProgressEvent::Step { step, queue, .. } = event {
                steps.push((*step, *queue));
            }
        },
    );

    assert_eq!(report.path().len(), len + 1);
    assert_eq!(report.stats.steps, len + 1);
    assert_eq!(steps, vec![(PROGRESS_INTERVAL, 0)]);
}

#[test]
fn tie_break_follows_edge_order() {
    // Two equal-length routes A-B-D and A-C-D; B is listed first
    let graph = GraphBuilder::new().build(&[
        EvolutionRecord::new("A", "B;C"),
        EvolutionRecord::new("B", "D"),
        EvolutionRecord::new("C", "D"),
    ]);

    let report = PathFinder::new(&graph).find_path::<&str>("A", "D", &[], &mut NoProgress);

    assert_eq!(report.into_path(), vec!["A", "B", "D"]);
}

#[test]
fn one_node_can_satisfy_several_groups() {
    let graph = chain();
    let groups = vec![vec!["B", "Q"], vec!["C", "B"], vec!["B"]];

    let report = PathFinder::new(&graph).find_path("A", "B", &groups, &mut NoProgress);

    assert_eq!(report.into_path(), vec!["A", "B"]);
}

#[test]
fn many_groups_use_set_coverage() {
    let graph = chain();
    let groups: Vec<Vec<&str>> = (0..MASK_CAPACITY + 6)
        .map(|i| if i % 2 == 0 { vec!["B"] } else { vec!["C"] })
        .collect();

    let report = PathFinder::new(&graph).find_path("A", "D", &groups, &mut NoProgress);

    assert_eq!(report.into_path(), vec!["A", "B", "C", "D"]);
}

#[test]
fn graph_is_shared_across_threads() {
    let graph = std::sync::Arc::new(chain());

    let handles: Vec<_> = ["B", "C"]
        .into_iter()
        .map(|via| {
            let graph = std::sync::Arc::clone(&graph);
            std::thread::spawn(move || {
                PathFinder::new(&graph)
                    .find_path("A", "D", &[vec![via]], &mut NoProgress)
                    .into_path()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), vec!["A", "B", "C", "D"]);
    }
}

#[test]
fn candidate_search_matches_group_search_on_singletons() {
    let graph = GraphBuilder::new().build(&[
        EvolutionRecord::new("A", "B;F"),
        EvolutionRecord::new("B", "C"),
        EvolutionRecord::new("C", "E"),
        EvolutionRecord::new("F", "E"),
    ]);
    let candidates = vec![vec!["F", "C"]];
    let finder = PathFinder::new(&graph);

    let combo = finder.find_path_with_candidates("A", "E", &candidates).unwrap();
    let grouped = finder.find_path("A", "E", &candidates, &mut NoProgress);

    assert_eq!(combination_count(&candidates), 2);
    assert_eq!(combo.path, vec!["A", "F", "E"]);
    assert_eq!(combo.chosen, vec!["F"]);
    assert_eq!(grouped.into_path(), combo.path);
}
