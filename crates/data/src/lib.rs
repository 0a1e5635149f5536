//! # Evopath Data
//!
//! Typed loading of the evolution, move and learner datasets, and selection of
//! requirement groups from the move data.
//!
//! ```text
//! evolutions.csv ──> EvolutionRecord[] ──> GraphBuilder
//! moves.csv ───────┐
//!                  ├──> MoveCatalog ──> threat elements ──> strongest moves
//! learners.csv ────┘                                            │
//!                                            learner_groups <───┘
//! ```

mod catalog;
mod error;
mod reader;
mod types;

pub use catalog::MoveCatalog;
pub use error::{DataError, Result};
pub use reader::{
    evolutions_from_reader, learners_from_reader, moves_from_reader, read_evolutions,
    read_learners, read_moves,
};
pub use types::{ElementCount, Learner, MoveInfo};
