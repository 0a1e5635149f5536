use super::{emit, open_catalog, MAX_TOP_ELEMENTS};
use crate::ThreatsArgs;
use anyhow::Result;
use evopath_data::{ElementCount, MoveInfo};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub(crate) struct ThreatsOutput {
    pub elements: Vec<ElementCount>,
    pub moves: Vec<MoveInfo>,
    /// Learners of each selected move, in `moves` order
    pub learners: Vec<Vec<String>>,
}

pub(crate) fn run(args: ThreatsArgs) -> Result<()> {
    let catalog = open_catalog(&args.moves, &args.learners, args.fix_inheritable)?;

    let elements = catalog.top_threat_elements(args.top.clamp(1, MAX_TOP_ELEMENTS));
    let names: Vec<&str> = elements.iter().map(|e| e.element.as_str()).collect();
    let moves: Vec<MoveInfo> = catalog
        .strongest_inheritable_moves(&names, args.kind.as_deref())
        .into_iter()
        .cloned()
        .collect();
    let move_names: Vec<&str> = moves.iter().map(|m| m.name.as_str()).collect();
    let learners = catalog.learner_groups(&move_names);

    let output = ThreatsOutput {
        elements,
        moves,
        learners,
    };
    emit(args.json, output, render)
}

fn render(output: &ThreatsOutput) -> Vec<String> {
    let mut lines = vec!["Threat elements:".to_string()];
    for (rank, count) in output.elements.iter().enumerate() {
        lines.push(format!("{:>3}. {} ({} learners)", rank + 1, count.element, count.learners));
    }
    lines.push("Strongest inheritable moves:".to_string());
    for (info, learners) in output.moves.iter().zip(&output.learners) {
        lines.push(format!(
            "  {} [{} {}, power {}] learned by {}",
            info.name,
            info.element,
            info.kind,
            info.power_value(),
            learners.len()
        ));
    }
    lines
}
