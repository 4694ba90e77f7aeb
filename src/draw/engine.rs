// Draw engine: the Idle/Drawing state machine.
//
// The engine exclusively owns the roster store, the sampler, the music
// playback handle and the animation ticker. All transitions run on the
// single application loop, so no two of them ever interleave.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{debug, info};

use super::sampler::{sample, sample_index, Sampler};
use super::ticker::{AnimationTicker, TickEvent, DEFAULT_TICK_INTERVAL};
use crate::media::audio::Playback;
use crate::roster::participant::{Participant, Winner};
use crate::roster::store::RosterStore;

/// Whether a round is currently being drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DrawState {
    #[default]
    Idle,
    Drawing,
}

/// Result of a start request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    Started,
    /// A round is already running; nothing changed.
    AlreadyDrawing,
    /// Every participant has already won; nothing changed.
    Exhausted,
}

/// Result of the single "draw" action, which starts or stops a round
/// depending on the current state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleOutcome {
    Started,
    Stopped(Winner),
    Exhausted,
}

/// Why a roster replacement was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadRejection {
    Empty,
    DrawInProgress,
}

pub struct DrawEngine {
    roster: RosterStore,
    sampler: Box<dyn Sampler>,
    playback: Playback,
    state: DrawState,
    /// Transient sample shown while drawing. Never used for selection.
    rolling: Option<Participant>,
    /// The most recent winner, shown between rounds.
    current_winner: Option<Winner>,
    ticker: Option<AnimationTicker>,
    /// Where ticker tasks deliver ticks. `None` runs without an animation.
    tick_tx: Option<mpsc::Sender<TickEvent>>,
    tick_interval: Duration,
    /// Incremented on every start; ticks from older rounds are ignored.
    generation: u64,
}

impl DrawEngine {
    pub fn new(roster: RosterStore, sampler: Box<dyn Sampler>, playback: Playback) -> Self {
        DrawEngine {
            roster,
            sampler,
            playback,
            state: DrawState::Idle,
            rolling: None,
            current_winner: None,
            ticker: None,
            tick_tx: None,
            tick_interval: DEFAULT_TICK_INTERVAL,
            generation: 0,
        }
    }

    /// Attach the animation ticker. Each started round spawns a task that
    /// sends ticks to `tx` every `interval`.
    pub fn with_ticker(mut self, tx: mpsc::Sender<TickEvent>, interval: Duration) -> Self {
        self.tick_tx = Some(tx);
        self.tick_interval = interval;
        self
    }

    // -----------------------------------------------------------------------
    // Transitions
    // -----------------------------------------------------------------------

    /// Idle -> Drawing.
    pub fn start(&mut self) -> StartOutcome {
        if self.state == DrawState::Drawing {
            return StartOutcome::AlreadyDrawing;
        }
        if self.roster.is_exhausted() {
            info!("Start ignored: every participant has already won");
            return StartOutcome::Exhausted;
        }

        self.state = DrawState::Drawing;
        self.current_winner = None;
        self.rolling = None;
        self.generation += 1;

        self.playback.begin();

        if let Some(tx) = &self.tick_tx {
            self.ticker = Some(AnimationTicker::spawn(
                self.tick_interval,
                self.generation,
                tx.clone(),
            ));
        }

        info!(
            "Round {} started with {} eligible",
            self.roster.round(),
            self.roster.eligible().len()
        );
        StartOutcome::Started
    }

    /// Refresh the rolling display from one animation tick.
    ///
    /// Ticks are ignored unless a round is running and the tick belongs to
    /// it. Returns the new rolling value when it changed.
    pub fn tick(&mut self, event: TickEvent) -> Option<&Participant> {
        if self.state != DrawState::Drawing || event.generation != self.generation {
            debug!(
                "Discarding stale tick (gen {}, current {})",
                event.generation, self.generation
            );
            return None;
        }
        let picked = sample(self.sampler.as_mut(), self.roster.eligible())?.clone();
        let rolled: &Participant = self.rolling.insert(picked);
        Some(rolled)
    }

    /// Drawing -> Idle: choose, record and announce the winner.
    ///
    /// Returns `None` (and changes nothing) when no round is running.
    pub fn stop(&mut self) -> Option<Winner> {
        if self.state != DrawState::Drawing {
            return None;
        }

        self.cancel_ticker();
        self.playback.pause();

        self.state = DrawState::Idle;
        self.rolling = None;

        // start() refuses an exhausted pool and nothing else shrinks it
        // while drawing, so this only bails on a broken invariant.
        let index = sample_index(self.sampler.as_mut(), self.roster.eligible().len())?;
        let winner = self.roster.record_winner_at(index)?;

        self.current_winner = Some(winner.clone());

        info!(
            "Round {} winner: {} ({}), {} remaining",
            winner.round,
            winner.employee.name,
            winner.employee.department,
            self.roster.eligible().len()
        );
        Some(winner)
    }

    /// The operator's draw button: stop a running round, otherwise start one.
    pub fn toggle(&mut self) -> ToggleOutcome {
        match self.state {
            DrawState::Drawing => match self.stop() {
                Some(winner) => ToggleOutcome::Stopped(winner),
                None => ToggleOutcome::Exhausted,
            },
            DrawState::Idle => match self.start() {
                StartOutcome::Exhausted => ToggleOutcome::Exhausted,
                _ => ToggleOutcome::Started,
            },
        }
    }

    /// Abandon any running round and restart the session on the current
    /// roster.
    pub fn reset(&mut self) {
        self.cancel_ticker();
        self.playback.stop();
        self.roster.reset();
        self.state = DrawState::Idle;
        self.rolling = None;
        self.current_winner = None;
        info!("Draw reset: {} participants eligible", self.roster.eligible().len());
    }

    /// Swap in a newly imported roster.
    ///
    /// Refused while a round is running or when `records` is empty, leaving
    /// everything as it was.
    pub fn load_roster(&mut self, records: Vec<Participant>) -> Result<usize, LoadRejection> {
        if self.state == DrawState::Drawing {
            return Err(LoadRejection::DrawInProgress);
        }
        let count = records.len();
        if !self.roster.load(records) {
            return Err(LoadRejection::Empty);
        }
        self.current_winner = None;
        self.rolling = None;
        Ok(count)
    }

    /// Cancel any pending animation. Safe to call in any state, any number
    /// of times.
    pub fn teardown(&mut self) {
        self.cancel_ticker();
    }

    fn cancel_ticker(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            debug!("Cancelling animation ticker (gen {})", ticker.generation());
        }
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    pub fn state(&self) -> DrawState {
        self.state
    }

    pub fn rolling(&self) -> Option<&Participant> {
        self.rolling.as_ref()
    }

    pub fn current_winner(&self) -> Option<&Winner> {
        self.current_winner.as_ref()
    }

    pub fn roster(&self) -> &RosterStore {
        &self.roster
    }

    pub fn playback(&self) -> &Playback {
        &self.playback
    }

    pub fn playback_mut(&mut self) -> &mut Playback {
        &mut self.playback
    }

    pub fn has_active_ticker(&self) -> bool {
        self.ticker.is_some()
    }
}

impl std::fmt::Debug for DrawEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DrawEngine")
            .field("state", &self.state)
            .field("round", &self.roster.round())
            .field("eligible", &self.roster.eligible().len())
            .field("winners", &self.roster.winners().len())
            .field("generation", &self.generation)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
