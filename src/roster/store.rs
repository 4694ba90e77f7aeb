// Roster store: full roster, eligible pool, winner ledger, round counter.

use tracing::{debug, info};

use super::participant::{Participant, Winner};

/// The complete roster state for a draw session.
///
/// Invariants:
/// - `eligible` is always a subset of `roster`.
/// - a participant in `winners` is never in `eligible`.
/// - `round == winners.len() + 1`.
#[derive(Debug, Clone, Default)]
pub struct RosterStore {
    /// Every participant, in import order.
    roster: Vec<Participant>,
    /// Participants not yet drawn, in import order.
    eligible: Vec<Participant>,
    /// Append-only ledger of completed rounds.
    winners: Vec<Winner>,
    /// Round number of the next draw, starting at 1.
    round: u32,
}

impl RosterStore {
    /// Create a store from the initial roster. The eligible pool starts equal
    /// to the roster and the ledger starts empty.
    pub fn new(records: Vec<Participant>) -> Self {
        RosterStore {
            eligible: records.clone(),
            roster: records,
            winners: Vec::new(),
            round: 1,
        }
    }

    /// Replace the roster with a freshly imported one.
    ///
    /// An empty `records` is ignored so the existing roster survives a failed
    /// import. A non-empty load clears the ledger and restarts at round 1.
    /// Returns whether the roster was replaced.
    pub fn load(&mut self, records: Vec<Participant>) -> bool {
        if records.is_empty() {
            debug!("Ignoring empty roster load");
            return false;
        }
        info!("Loaded roster of {} participants", records.len());
        *self = RosterStore::new(records);
        true
    }

    /// Restore the eligible pool to the full roster and clear the ledger.
    pub fn reset(&mut self) {
        self.eligible = self.roster.clone();
        self.winners.clear();
        self.round = 1;
    }

    /// Remove the first participant named `name` from the eligible pool.
    pub fn remove_from_eligible(&mut self, name: &str) {
        if let Some(idx) = self.eligible.iter().position(|p| p.name == name) {
            self.eligible.remove(idx);
        }
    }

    /// Record the eligible participant at `index` as this round's winner.
    ///
    /// Removes exactly that entry from the pool, so two participants who
    /// share a name are still drawn separately. Returns `None` when `index`
    /// is out of range.
    pub fn record_winner_at(&mut self, index: usize) -> Option<Winner> {
        if index >= self.eligible.len() {
            return None;
        }
        let participant = self.eligible.remove(index);
        Some(self.push_winner(participant))
    }

    /// Record `participant` as this round's winner.
    ///
    /// Drops the first eligible entry equal to `participant`, matching name
    /// and department, then appends it to the ledger.
    pub fn record_winner(&mut self, participant: Participant) -> Winner {
        match self.eligible.iter().position(|p| *p == participant) {
            Some(idx) => {
                self.eligible.remove(idx);
            }
            None => debug!("Recording winner {} who was not eligible", participant),
        }
        self.push_winner(participant)
    }

    fn push_winner(&mut self, participant: Participant) -> Winner {
        let winner = Winner::new(participant, self.round);
        self.winners.push(winner.clone());
        self.round += 1;
        winner
    }

    pub fn is_exhausted(&self) -> bool {
        self.eligible.is_empty()
    }

    pub fn roster(&self) -> &[Participant] {
        &self.roster
    }

    pub fn eligible(&self) -> &[Participant] {
        &self.eligible
    }

    pub fn winners(&self) -> &[Winner] {
        &self.winners
    }

    pub fn round(&self) -> u32 {
        self.round
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
