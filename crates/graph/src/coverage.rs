//! Coverage state: which requirement groups a partial path already satisfies.

use crate::types::EvolutionGraph;
use petgraph::graph::NodeIndex;
use std::collections::{BTreeSet, HashMap};

/// Group counts up to this size use the bitmask representation
pub const MASK_CAPACITY: usize = u64::BITS as usize;

/// Set of satisfied group indices.
///
/// Used as part of the visited-set key, so equality and hashing must be cheap:
/// a `u64` mask for small group counts, an ordered index set beyond that.
/// Both variants never mix within one search run.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Coverage {
    Mask(u64),
    Set(BTreeSet<usize>),
}

impl Coverage {
    /// Empty coverage sized for `group_count` groups
    pub fn empty(group_count: usize) -> Self {
        if group_count <= MASK_CAPACITY {
            Self::Mask(0)
        } else {
            Self::Set(BTreeSet::new())
        }
    }

    pub fn insert(&mut self, idx: usize) {
        match self {
            Self::Mask(bits) if idx < MASK_CAPACITY => *bits |= 1u64 << idx,
            Self::Mask(_) => {
                let mut set: BTreeSet<usize> = self.indices().into_iter().collect();
                set.insert(idx);
                *self = Self::Set(set);
            }
            Self::Set(set) => {
                set.insert(idx);
            }
        }
    }

    pub fn contains(&self, idx: usize) -> bool {
        match self {
            Self::Mask(bits) => idx < MASK_CAPACITY && bits & (1u64 << idx) != 0,
            Self::Set(set) => set.contains(&idx),
        }
    }

    pub fn union_with(&mut self, other: &Coverage) {
        match (self, other) {
            (Self::Mask(a), Self::Mask(b)) => *a |= *b,
            (Self::Set(a), Self::Set(b)) => a.extend(b.iter().copied()),
            (this, other) => {
                for idx in other.indices() {
                    this.insert(idx);
                }
            }
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Mask(bits) => bits.count_ones() as usize,
            Self::Set(set) => set.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every group in `0..group_count` is satisfied
    pub fn is_complete(&self, group_count: usize) -> bool {
        self.len() == group_count
    }

    /// Satisfied group indices, ascending
    pub fn indices(&self) -> Vec<usize> {
        match self {
            Self::Mask(bits) => (0..MASK_CAPACITY).filter(|i| bits & (1u64 << i) != 0).collect(),
            Self::Set(set) => set.iter().copied().collect(),
        }
    }
}

/// Requirement groups resolved against a graph.
///
/// Members that are not entities of the graph can never be visited, so they are
/// dropped here; a group left without members can never be satisfied.
#[derive(Debug, Clone)]
pub(crate) struct GroupIndex {
    members: Vec<Vec<NodeIndex>>,
    membership: HashMap<NodeIndex, Coverage>,
}

impl GroupIndex {
    pub(crate) fn resolve<S: AsRef<str>>(graph: &EvolutionGraph, groups: &[Vec<S>]) -> Self {
        let group_count = groups.len();
        let mut members = Vec::with_capacity(group_count);
        let mut membership: HashMap<NodeIndex, Coverage> = HashMap::new();

        for (idx, group) in groups.iter().enumerate() {
            let mut resolved: Vec<NodeIndex> = Vec::new();
            for name in group {
                let name = name.as_ref().trim();
                match graph.find_node(name) {
                    Some(node) if !resolved.contains(&node) => resolved.push(node),
                    Some(_) => {}
                    None => log::debug!("Group {idx}: {name} is not in the evolution graph"),
                }
            }
            for &node in &resolved {
                membership
                    .entry(node)
                    .or_insert_with(|| Coverage::empty(group_count))
                    .insert(idx);
            }
            members.push(resolved);
        }

        Self {
            members,
            membership,
        }
    }

    pub(crate) fn group_count(&self) -> usize {
        self.members.len()
    }

    /// Groups satisfied by `node` alone
    pub(crate) fn coverage_of(&self, node: NodeIndex) -> Coverage {
        self.membership
            .get(&node)
            .cloned()
            .unwrap_or_else(|| Coverage::empty(self.group_count()))
    }

    /// `current` extended by whatever `node` satisfies
    pub(crate) fn extend(&self, current: &Coverage, node: NodeIndex) -> Coverage {
        let mut next = current.clone();
        if let Some(groups) = self.membership.get(&node) {
            next.union_with(groups);
        }
        next
    }

    /// Unsatisfied group indices, ascending
    pub(crate) fn missing(&self, coverage: &Coverage) -> Vec<usize> {
        (0..self.group_count())
            .filter(|&idx| !coverage.contains(idx))
            .collect()
    }

    /// First unsatisfied group whose members are all already on `path`.
    /// Such a group cannot be satisfied without revisiting a node.
    pub(crate) fn stranded_group(&self, coverage: &Coverage, path: &[NodeIndex]) -> Option<usize> {
        self.members.iter().enumerate().find_map(|(idx, members)| {
            let stranded = !coverage.contains(idx) && members.iter().all(|m| path.contains(m));
            stranded.then_some(idx)
        })
    }
}
