// Participant and winner records.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single entrant in the draw.
///
/// Names need not be unique. Two entries with the same name are different
/// people, so the pool is never searched by name when recording a winner.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Participant {
    pub name: String,
    pub department: String,
}

impl Participant {
    pub fn new(name: impl Into<String>, department: impl Into<String>) -> Self {
        Participant {
            name: name.into(),
            department: department.into(),
        }
    }
}

impl fmt::Display for Participant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.department)
    }
}

/// One entry in the winner ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Winner {
    /// The participant who won this round.
    pub employee: Participant,
    /// 1-based round number the participant was drawn in.
    pub round: u32,
    /// Local wall-clock time the round was stopped.
    pub drawn_at: DateTime<Local>,
}

impl Winner {
    pub fn new(employee: Participant, round: u32) -> Self {
        Winner {
            employee,
            round,
            drawn_at: Local::now(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
