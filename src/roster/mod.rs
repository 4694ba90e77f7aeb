// Roster domain: participants, the eligible pool, and the winner ledger.

pub mod participant;
pub mod store;
