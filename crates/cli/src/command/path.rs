use super::{emit, load_catalog, load_graph, require_catalog, split_list, threat_moves, warn_unknown};
use crate::config::AppConfig;
use crate::PathArgs;
use anyhow::Result;
use evopath_graph::{LogProgress, PathFinder, SearchConfig, SearchOutcome, SearchReport};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub(crate) struct PathOutput {
    pub start: String,
    pub end: String,
    /// Moves whose learners formed part of the groups
    pub moves: Vec<String>,
    pub groups: Vec<Vec<String>>,
    pub max_frontier: usize,
    #[serde(flatten)]
    pub report: SearchReport,
}

pub(crate) fn run(args: PathArgs, config: &AppConfig) -> Result<()> {
    let graph = load_graph(&args.graph)?;
    let catalog = load_catalog(&args.moves)?;

    let mut groups: Vec<Vec<String>> = args.groups.iter().map(|raw| split_list(raw)).collect();
    let mut moves = args.move_names.clone();
    if args.threats.optimize {
        let selected = threat_moves(require_catalog(catalog.as_ref())?, &args.threats);
        log::info!("Threat analysis picked {selected:?}");
        moves.extend(selected);
    }
    if !moves.is_empty() {
        groups.extend(require_catalog(catalog.as_ref())?.learner_groups(&moves));
    }

    warn_unknown(&graph, [args.start.as_str(), args.end.as_str()]);

    let search = match args.max_frontier {
        Some(max_frontier) => SearchConfig::with_max_frontier(max_frontier),
        None => config.search,
    };
    search.validate()?;

    let report = PathFinder::with_config(&graph, search).find_path(
        &args.start,
        &args.end,
        &groups,
        &mut LogProgress,
    );
    log::info!(
        "Search finished after {} steps (max queue {}, pruned {})",
        report.stats.steps,
        report.stats.max_queue,
        report.stats.pruned
    );

    let output = PathOutput {
        start: args.start,
        end: args.end,
        moves,
        groups,
        max_frontier: search.max_frontier,
        report,
    };
    emit(args.json, output, render)
}

fn render(output: &PathOutput) -> Vec<String> {
    let mut lines = Vec::new();
    if !output.moves.is_empty() {
        lines.push(format!("Moves: {}", output.moves.join(", ")));
    }
    match &output.report.outcome {
        SearchOutcome::Found(path) => {
            lines.push(path.join(" -> "));
            lines.push(format!("{} entities", path.len()));
        }
        SearchOutcome::Exhausted => {
            lines.push(format!("No path from {} to {}", output.start, output.end));
        }
        SearchOutcome::CapReached => lines.push(format!(
            "No path found before the frontier cap of {} was reached; try a larger --max-frontier",
            output.max_frontier
        )),
    }
    lines
}
