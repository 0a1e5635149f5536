use serde::{Deserialize, Serialize};

/// One row of the move catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveInfo {
    pub name: String,

    /// Attribute column, e.g. "Fire"
    pub element: String,

    /// Physical / Magical / Support ...
    pub kind: String,

    pub sp_cost: Option<u32>,

    /// Unparsable power reads as `None` and ranks as 0
    pub power: Option<i64>,

    pub inheritable: bool,
}

impl MoveInfo {
    pub fn power_value(&self) -> i64 {
        self.power.unwrap_or(0)
    }
}

/// An entity learning a move at some level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Learner {
    #[serde(rename = "move")]
    pub move_name: String,
    pub entity: String,
    pub level: Option<u32>,
}

impl Learner {
    pub fn new(move_name: impl Into<String>, entity: impl Into<String>, level: Option<u32>) -> Self {
        Self {
            move_name: move_name.into(),
            entity: entity.into(),
            level,
        }
    }
}

/// Occurrences of one element across the learner rows
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ElementCount {
    /// Lowercased element name
    pub element: String,
    pub learners: usize,
}
