pub(crate) mod batch;
pub(crate) mod combo;
pub(crate) mod neighbors;
pub(crate) mod path;
pub(crate) mod threats;

use crate::suggest::suggest;
use crate::{print_stdout, GraphSource, MoveSource, ThreatSelection};
use anyhow::{bail, Context as AnyhowContext, Result};
use evopath_data::{read_evolutions, read_learners, read_moves, MoveCatalog};
use evopath_graph::{EvolutionGraph, GraphBuilder};
use serde::Serialize;

/// Threat elements a selection may cover
pub(crate) const MAX_TOP_ELEMENTS: usize = 8;

const SUGGESTION_LIMIT: usize = 3;

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub(crate) enum CommandStatus {
    Ok,
    Error,
}

/// JSON envelope written to stdout when `--json` is set
#[derive(Debug, Serialize)]
pub(crate) struct CommandResponse<T> {
    pub status: CommandStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> CommandResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            status: CommandStatus::Ok,
            message: None,
            data: Some(data),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: CommandStatus::Error,
            message: Some(message.into()),
            data: None,
        }
    }
}

/// Print `data` as a JSON envelope or as the lines `render` produces
pub(crate) fn emit<T: Serialize>(json: bool, data: T, render: impl FnOnce(&T) -> Vec<String>) -> Result<()> {
    if json {
        return print_stdout(&serde_json::to_string_pretty(&CommandResponse::ok(data))?);
    }
    for line in render(&data) {
        print_stdout(&line)?;
    }
    Ok(())
}

pub(crate) fn load_graph(source: &GraphSource) -> Result<EvolutionGraph> {
    let records = read_evolutions(&source.evolutions).context("Failed to load evolution dataset")?;
    let (graph, _) = GraphBuilder::new()
        .with_delimiter(source.delimiter)
        .build_with_stats(&records);
    Ok(graph)
}

/// Catalog for the move flags, if both CSVs were given
pub(crate) fn load_catalog(source: &MoveSource) -> Result<Option<MoveCatalog>> {
    let (Some(moves), Some(learners)) = (&source.moves, &source.learners) else {
        return Ok(None);
    };
    let catalog = open_catalog(moves, learners, source.fix_inheritable)?;
    Ok(Some(catalog))
}

pub(crate) fn open_catalog(
    moves: &std::path::Path,
    learners: &std::path::Path,
    fix_inheritable: bool,
) -> Result<MoveCatalog> {
    let moves = read_moves(moves).context("Failed to load move catalog")?;
    let learners = read_learners(learners).context("Failed to load learner dataset")?;
    let mut catalog = MoveCatalog::new(moves, learners);
    if fix_inheritable {
        catalog.fix_inheritable();
    }
    Ok(catalog)
}

pub(crate) fn require_catalog(catalog: Option<&MoveCatalog>) -> Result<&MoveCatalog> {
    match catalog {
        Some(catalog) => Ok(catalog),
        None => bail!("Move-based requirements need --moves and --learners"),
    }
}

/// Move names picked from the top threat elements
pub(crate) fn threat_moves(catalog: &MoveCatalog, selection: &ThreatSelection) -> Vec<String> {
    let top = selection.top.clamp(1, MAX_TOP_ELEMENTS);
    let elements: Vec<String> = catalog
        .top_threat_elements(top)
        .into_iter()
        .map(|count| count.element)
        .collect();
    catalog
        .strongest_inheritable_moves(&elements, selection.kind.as_deref())
        .into_iter()
        .map(|info| info.name.clone())
        .collect()
}

/// Split `"a; b;;c"` into `["a", "b", "c"]`
pub(crate) fn split_list(raw: &str) -> Vec<String> {
    raw.split(';')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(String::from)
        .collect()
}

/// Log a warning, with close matches, for every name the graph lacks
pub(crate) fn warn_unknown<'a>(graph: &EvolutionGraph, names: impl IntoIterator<Item = &'a str>) {
    for name in names {
        if !graph.contains(name) {
            log::warn!("{}", unknown_entity_message(graph, name));
        }
    }
}

pub(crate) fn unknown_entity_message(graph: &EvolutionGraph, name: &str) -> String {
    let close = suggest(name, graph.names(), SUGGESTION_LIMIT);
    if close.is_empty() {
        format!("Unknown entity '{name}'")
    } else {
        format!("Unknown entity '{name}'; did you mean {}?", close.join(", "))
    }
}
