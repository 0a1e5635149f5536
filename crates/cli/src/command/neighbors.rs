use super::{emit, load_graph, unknown_entity_message};
use crate::NeighborsArgs;
use anyhow::{anyhow, Result};
use evopath_graph::Adjacency;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub(crate) struct NeighborsOutput {
    pub name: String,
    #[serde(flatten)]
    pub adjacency: Adjacency,
}

pub(crate) fn run(args: NeighborsArgs) -> Result<()> {
    let graph = load_graph(&args.graph)?;
    let adjacency = graph
        .adjacency(&args.name)
        .map_err(|_| anyhow!(unknown_entity_message(&graph, &args.name)))?;

    let output = NeighborsOutput {
        name: args.name,
        adjacency,
    };
    emit(args.json, output, |out| {
        vec![
            out.name.clone(),
            format!("  evolves to:   {}", list(&out.adjacency.forward)),
            format!("  evolves from: {}", list(&out.adjacency.backward)),
        ]
    })
}

fn list(names: &[String]) -> String {
    if names.is_empty() {
        "-".to_string()
    } else {
        names.join(", ")
    }
}
