use super::{emit, load_catalog, load_graph, require_catalog, split_list, warn_unknown};
use crate::config::AppConfig;
use crate::ComboArgs;
use anyhow::{bail, Result};
use evopath_graph::{combination_count, CandidatePath, PathFinder};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub(crate) struct ComboOutput {
    pub start: String,
    pub end: String,
    pub candidates: Vec<Vec<String>>,
    pub combinations: usize,
    pub result: Option<CandidatePath>,
}

pub(crate) fn run(args: ComboArgs, config: &AppConfig) -> Result<()> {
    let graph = load_graph(&args.graph)?;
    let catalog = load_catalog(&args.moves)?;

    let mut candidates: Vec<Vec<String>> =
        args.candidates.iter().map(|raw| split_list(raw)).collect();
    if !args.move_names.is_empty() {
        candidates.extend(require_catalog(catalog.as_ref())?.learner_groups(&args.move_names));
    }

    let limit = args
        .max_combinations
        .unwrap_or(config.combo.max_combinations);
    let combinations = combination_count(&candidates);
    if combinations > limit {
        bail!(
            "{combinations} candidate combinations exceed the limit of {limit}; \
             use `evopath path` with groups or raise --max-combinations"
        );
    }

    warn_unknown(&graph, [args.start.as_str(), args.end.as_str()]);
    warn_unknown(&graph, candidates.iter().flatten().map(String::as_str));

    let result = PathFinder::new(&graph).find_path_with_candidates(&args.start, &args.end, &candidates);

    let output = ComboOutput {
        start: args.start,
        end: args.end,
        candidates,
        combinations,
        result,
    };
    emit(args.json, output, render)
}

fn render(output: &ComboOutput) -> Vec<String> {
    match &output.result {
        Some(found) => vec![
            found.path.join(" -> "),
            format!("Chosen: {}", found.chosen.join(", ")),
            format!(
                "{} entities, best of {} combinations",
                found.path.len(),
                output.combinations
            ),
        ],
        None => vec![format!(
            "No path from {} to {} in {} combinations",
            output.start, output.end, output.combinations
        )],
    }
}
