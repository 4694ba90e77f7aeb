// Initial roster load at startup.
//
// The startup roster is a JSON array of `{ "name": ..., "department": ... }`
// records. A missing or malformed file is not fatal: the draw starts with an
// empty roster and the operator can import one from the settings panel.

use std::path::Path;

use anyhow::Context;
use tracing::{info, warn};

use crate::roster::participant::Participant;

/// Parse the startup roster JSON at `path`.
pub fn read_participants(path: &Path) -> anyhow::Result<Vec<Participant>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read roster file {}", path.display()))?;
    let participants: Vec<Participant> = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse roster file {}", path.display()))?;
    Ok(participants)
}

/// Load the startup roster, falling back to an empty one on any error.
pub fn load_initial_roster(path: &Path) -> Vec<Participant> {
    match read_participants(path) {
        Ok(participants) => {
            info!(
                "Loaded {} participants from {}",
                participants.len(),
                path.display()
            );
            participants
        }
        Err(e) => {
            warn!("Initial roster load failed, starting empty: {:#}", e);
            Vec::new()
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
