//! Concurrent path queries over one shared graph.
//!
//! Each query runs on the blocking pool; a semaphore bounds how many searches
//! are in flight. Results keep the order of the query file.

use super::{emit, load_catalog, load_graph, require_catalog, warn_unknown};
use crate::config::{AppConfig, MAX_BATCH_CONCURRENCY};
use crate::BatchArgs;
use anyhow::{Context as AnyhowContext, Result};
use evopath_graph::{EvolutionGraph, NoProgress, PathFinder, SearchConfig, SearchOutcome, SearchReport};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Semaphore;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct BatchQuery {
    #[serde(default)]
    pub id: Option<String>,
    pub start: String,
    pub end: String,
    #[serde(default)]
    pub groups: Vec<Vec<String>>,
    /// Moves whose learners become extra groups
    #[serde(default)]
    pub moves: Vec<String>,
    #[serde(default)]
    pub max_frontier: Option<usize>,
}

#[derive(Debug, Serialize)]
pub(crate) struct BatchResult {
    pub id: String,
    pub start: String,
    pub end: String,
    #[serde(flatten)]
    pub report: SearchReport,
}

struct Job {
    id: String,
    start: String,
    end: String,
    groups: Vec<Vec<String>>,
    search: SearchConfig,
}

pub(crate) async fn run(args: BatchArgs, config: &AppConfig) -> Result<()> {
    let graph = Arc::new(load_graph(&args.graph)?);
    let catalog = load_catalog(&args.moves)?;

    let text = std::fs::read_to_string(&args.file)
        .with_context(|| format!("Failed to read batch file {}", args.file.display()))?;
    let queries: Vec<BatchQuery> = serde_json::from_str(&text)
        .with_context(|| format!("Invalid batch file {}", args.file.display()))?;

    let mut jobs = Vec::with_capacity(queries.len());
    for (idx, query) in queries.into_iter().enumerate() {
        let id = query.id.unwrap_or_else(|| format!("#{}", idx + 1));
        let search = query
            .max_frontier
            .map_or(config.search, SearchConfig::with_max_frontier);
        search
            .validate()
            .with_context(|| format!("Query {id}"))?;

        let mut groups = query.groups;
        if !query.moves.is_empty() {
            let catalog = require_catalog(catalog.as_ref()).with_context(|| format!("Query {id}"))?;
            groups.extend(catalog.learner_groups(&query.moves));
        }
        warn_unknown(&graph, [query.start.as_str(), query.end.as_str()]);

        jobs.push(Job {
            id,
            start: query.start,
            end: query.end,
            groups,
            search,
        });
    }

    let limit = args
        .concurrency
        .unwrap_or(config.batch.concurrency)
        .clamp(1, MAX_BATCH_CONCURRENCY);
    log::info!("Running {} queries, {} at a time", jobs.len(), limit);

    let results = run_jobs(graph, jobs, limit).await?;
    emit(args.json, results, |results| render(results))
}

async fn run_jobs(graph: Arc<EvolutionGraph>, jobs: Vec<Job>, limit: usize) -> Result<Vec<BatchResult>> {
    let semaphore = Arc::new(Semaphore::new(limit));
    let mut handles = Vec::with_capacity(jobs.len());

    for job in jobs {
        let permit = Arc::clone(&semaphore).acquire_owned().await?;
        let graph = Arc::clone(&graph);
        handles.push(tokio::task::spawn_blocking(move || {
            let _permit = permit;
            let report = PathFinder::with_config(&graph, job.search).find_path(
                &job.start,
                &job.end,
                &job.groups,
                &mut NoProgress,
            );
            log::debug!("Query {} finished after {} steps", job.id, report.stats.steps);
            BatchResult {
                id: job.id,
                start: job.start,
                end: job.end,
                report,
            }
        }));
    }

    let mut results = Vec::with_capacity(handles.len());
    for handle in handles {
        results.push(handle.await.context("Batch search task failed")?);
    }
    Ok(results)
}

fn render(results: &[BatchResult]) -> Vec<String> {
    results
        .iter()
        .map(|result| match &result.report.outcome {
            SearchOutcome::Found(path) => format!("{}: {}", result.id, path.join(" -> ")),
            SearchOutcome::Exhausted => format!("{}: no path", result.id),
            SearchOutcome::CapReached => format!("{}: frontier cap reached", result.id),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use evopath_graph::{EvolutionRecord, GraphBuilder};
    use pretty_assertions::assert_eq;

    fn job(id: &str, start: &str, end: &str, groups: &[Vec<&str>]) -> Job {
        Job {
            id: id.to_string(),
            start: start.to_string(),
            end: end.to_string(),
            groups: groups
                .iter()
                .map(|g| g.iter().map(|s| s.to_string()).collect())
                .collect(),
            search: SearchConfig::default(),
        }
    }

    #[tokio::test]
    async fn test_results_keep_query_order() {
        let graph = Arc::new(GraphBuilder::new().build(&[
            EvolutionRecord::new("A", "B"),
            EvolutionRecord::new("B", "C"),
            EvolutionRecord::new("C", "D"),
        ]));
        let jobs = vec![
            job("first", "A", "D", &[vec!["C"]]),
            job("second", "D", "A", &[]),
            job("third", "A", "Z", &[]),
        ];

        let results = run_jobs(graph, jobs, 2).await.unwrap();

        let ids: Vec<&str> = results.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["first", "second", "third"]);
        assert_eq!(results[0].report.path(), ["A", "B", "C", "D"]);
        assert_eq!(results[1].report.path(), ["D", "C", "B", "A"]);
        assert_eq!(results[2].report.outcome, SearchOutcome::Exhausted);
    }

    #[test]
    fn test_query_defaults() {
        let query: BatchQuery = serde_json::from_str(r#"{"start": "A", "end": "B"}"#).unwrap();
        assert!(query.id.is_none());
        assert!(query.groups.is_empty());
        assert!(query.moves.is_empty());
        assert_eq!(query.max_frontier, None);
    }
}
