use serde::Serialize;
use std::fmt;

/// Observational status emitted while a search runs
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ProgressEvent {
    /// Periodic heartbeat
    Step {
        step: usize,
        queue: usize,
        max_queue: usize,
        found: usize,
        pruned: usize,
    },

    /// A frontier item was dropped because some group can no longer be satisfied
    Pruned {
        step: usize,
        path_len: usize,
        covered: Vec<usize>,
        missing: Vec<usize>,
    },

    /// A valid path reached the end entity
    Found { step: usize, path_len: usize },

    /// The frontier would have grown beyond the cap
    CapReached { step: usize, max_frontier: usize },

    /// Search finished, whatever the outcome
    Finished {
        steps: usize,
        found: usize,
        pruned: usize,
    },
}

impl fmt::Display for ProgressEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Step {
                step,
                queue,
                max_queue,
                found,
                pruned,
            } => write!(
                f,
                "Step {step}: queue size={queue}, maxQueue={max_queue}, found={found}, pruned={pruned}"
            ),
            Self::Pruned {
                step,
                path_len,
                covered,
                missing,
            } => write!(
                f,
                "Pruned path at step {step}, path length={path_len}, covered=[{}], missing=[{}], reason=no unvisited candidate left for a missing group",
                join(covered),
                join(missing)
            ),
            Self::Found { step, path_len } => {
                write!(f, "Found path at step {step}, path length={path_len}")
            }
            Self::CapReached { step, max_frontier } => write!(
                f,
                "Frontier cap {max_frontier} reached at step {step}, stopping"
            ),
            Self::Finished {
                steps,
                found,
                pruned,
            } => write!(
                f,
                "Search ended after {steps} steps, found={found}, pruned={pruned}"
            ),
        }
    }
}

fn join(indices: &[usize]) -> String {
    indices
        .iter()
        .map(usize::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

/// Receiver for search progress. Must not block; it cannot change the outcome.
pub trait ProgressSink {
    fn report(&mut self, event: &ProgressEvent);
}

impl<F> ProgressSink for F
where
    F: FnMut(&ProgressEvent),
{
    fn report(&mut self, event: &ProgressEvent) {
        self(event)
    }
}

/// Discards every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn report(&mut self, _event: &ProgressEvent) {}
}

/// Forwards every event to the `log` facade at debug level
#[derive(Debug, Clone, Copy, Default)]
pub struct LogProgress;

impl ProgressSink for LogProgress {
    fn report(&mut self, event: &ProgressEvent) {
        log::debug!("{event}");
    }
}
