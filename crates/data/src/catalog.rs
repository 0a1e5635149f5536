use crate::types::{ElementCount, Learner, MoveInfo};
use itertools::Itertools;
use std::collections::HashMap;

/// Learners at or above this count keep a level-1 move inheritable
const MIN_LEVEL_ONE_LEARNERS: usize = 3;

/// Move catalog joined with the learner table.
///
/// Move names are matched trimmed and case-insensitively; the first catalog
/// row wins when a name repeats.
#[derive(Debug, Clone, Default)]
pub struct MoveCatalog {
    moves: Vec<MoveInfo>,
    learners: Vec<Learner>,
    by_name: HashMap<String, usize>,
}

fn key(name: &str) -> String {
    name.trim().to_lowercase()
}

impl MoveCatalog {
    pub fn new(moves: Vec<MoveInfo>, learners: Vec<Learner>) -> Self {
        let mut by_name = HashMap::with_capacity(moves.len());
        for (idx, info) in moves.iter().enumerate() {
            by_name.entry(key(&info.name)).or_insert(idx);
        }

        log::info!(
            "Move catalog: {} moves, {} learner rows",
            moves.len(),
            learners.len()
        );

        Self {
            moves,
            learners,
            by_name,
        }
    }

    pub fn moves(&self) -> &[MoveInfo] {
        &self.moves
    }

    pub fn learners(&self) -> &[Learner] {
        &self.learners
    }

    pub fn get(&self, name: &str) -> Option<&MoveInfo> {
        self.by_name.get(&key(name)).map(|&idx| &self.moves[idx])
    }

    /// Elements ranked by how many learner rows use a move of that element.
    ///
    /// Ties keep the order in which the elements were first counted.
    pub fn top_threat_elements(&self, top_n: usize) -> Vec<ElementCount> {
        let mut counts: Vec<ElementCount> = Vec::new();
        let mut slots: HashMap<String, usize> = HashMap::new();

        for learner in &self.learners {
            let Some(info) = self.get(&learner.move_name) else {
                continue;
            };
            let element = key(&info.element);
            if element.is_empty() {
                continue;
            }
            let slot = *slots.entry(element.clone()).or_insert_with(|| {
                counts.push(ElementCount {
                    element,
                    learners: 0,
                });
                counts.len() - 1
            });
            counts[slot].learners += 1;
        }

        // Stable sort keeps first-seen order among equal counts
        counts.sort_by(|a, b| b.learners.cmp(&a.learners));
        counts.truncate(top_n);
        log::debug!("Top threat elements: {counts:?}");
        counts
    }

    /// Strongest inheritable move per element, optionally of a given kind.
    ///
    /// Elements without any candidate contribute nothing, so the result may be
    /// shorter than `elements`.
    pub fn strongest_inheritable_moves<S: AsRef<str>>(
        &self,
        elements: &[S],
        kind: Option<&str>,
    ) -> Vec<&MoveInfo> {
        let kind = kind.map(key);
        elements
            .iter()
            .filter_map(|element| {
                let element = key(element.as_ref());
                let best = self
                    .moves
                    .iter()
                    .filter(|m| m.inheritable && key(&m.element) == element)
                    .filter(|m| kind.as_deref().map_or(true, |k| key(&m.kind) == k))
                    .fold(None::<&MoveInfo>, |best, m| match best {
                        Some(b) if b.power_value() >= m.power_value() => Some(b),
                        _ => Some(m),
                    });
                log::debug!(
                    "Strongest inheritable {element} move: {:?}",
                    best.map(|m| &m.name)
                );
                best
            })
            .collect()
    }

    /// Entities learning each move, in dataset order with repeats removed.
    ///
    /// The outer order follows `moves`, so the result doubles as requirement
    /// groups for the constrained search or as candidate lists.
    pub fn learner_groups<S: AsRef<str>>(&self, moves: &[S]) -> Vec<Vec<String>> {
        moves
            .iter()
            .map(|name| {
                let wanted = key(name.as_ref());
                let group: Vec<String> = self
                    .learners
                    .iter()
                    .filter(|l| key(&l.move_name) == wanted)
                    .map(|l| l.entity.clone())
                    .unique()
                    .collect();
                if group.is_empty() {
                    log::warn!("No entity learns move '{}'", name.as_ref());
                }
                group
            })
            .collect()
    }

    /// Clear the inheritable flag of moves learned only at level 1 by fewer
    /// than three learners. Returns the names of the moves that changed.
    pub fn fix_inheritable(&mut self) -> Vec<String> {
        let mut levels: HashMap<String, Vec<Option<u32>>> = HashMap::new();
        for learner in &self.learners {
            levels
                .entry(key(&learner.move_name))
                .or_default()
                .push(learner.level);
        }

        let mut changed = Vec::new();
        for info in &mut self.moves {
            let Some(levels) = levels.get(&key(&info.name)) else {
                continue;
            };
            let level_one_only = levels.iter().all(|&level| level == Some(1));
            if info.inheritable && level_one_only && levels.len() < MIN_LEVEL_ONE_LEARNERS {
                info.inheritable = false;
                changed.push(info.name.clone());
            }
        }

        log::info!("Marked {} moves as not inheritable", changed.len());
        changed
    }
}
