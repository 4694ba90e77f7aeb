// Application state and orchestration logic.
//
// The single event loop that owns the draw engine. It serializes operator
// commands from the TUI and animation ticks from the ticker task, applies
// them to the engine, and pushes UI updates to the TUI render loop.

use std::path::Path;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::draw::engine::{DrawEngine, LoadRejection, ToggleOutcome};
use crate::draw::ticker::TickEvent;
use crate::import::import_roster;
use crate::media::image::Backdrop;
use crate::media::MediaError;
use crate::protocol::{DrawSnapshot, MusicStatus, Notice, UiUpdate, UserCommand};

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

/// The complete application state.
pub struct AppState {
    pub config: Config,
    pub engine: DrawEngine,
    pub backdrop: Backdrop,
}

impl AppState {
    pub fn new(config: Config, engine: DrawEngine) -> Self {
        let backdrop = Backdrop::new(config.media.max_image_bytes);
        AppState {
            config,
            engine,
            backdrop,
        }
    }

    /// Capture everything the TUI renders into one snapshot.
    pub fn build_snapshot(&self) -> DrawSnapshot {
        let roster = self.engine.roster();
        let playback = self.engine.playback();
        DrawSnapshot {
            state: self.engine.state(),
            total_participants: roster.roster().len(),
            remaining: roster.eligible().len(),
            round: roster.round(),
            winners: roster.winners().to_vec(),
            current_winner: self.engine.current_winner().cloned(),
            rolling: self.engine.rolling().cloned(),
            music: MusicStatus {
                track: playback.track().map(|t| t.title.clone()),
                playing: playback.is_playing(),
                audible: playback.is_audible(),
            },
            background: self.backdrop.label(),
        }
    }

    /// Apply a command and return the notice to show, if any.
    ///
    /// Every failure is turned into a notice here; none reaches the engine.
    pub fn apply_command(&mut self, cmd: UserCommand) -> Option<Notice> {
        match cmd {
            UserCommand::ToggleDraw => match self.engine.toggle() {
                ToggleOutcome::Started | ToggleOutcome::Stopped(_) => None,
                ToggleOutcome::Exhausted => Some(Notice::info("Everyone has already won!")),
            },
            UserCommand::Reset => {
                self.engine.reset();
                None
            }
            UserCommand::ImportRoster(path) => Some(self.import(&path)),
            UserCommand::LoadMusic(path) => {
                let playback = self.engine.playback_mut();
                let audible = playback.is_audible();
                let notice = match playback.set_track(&path) {
                    Ok(track) if audible => Notice::success(format!(
                        "Music track set: {}. Press p to play.",
                        track.title
                    )),
                    Ok(track) => Notice::success(format!(
                        "Music track set: {}. No audio device is attached, so nothing will be heard.",
                        track.title
                    )),
                    Err(e) => {
                        warn!("Music load failed: {}", e);
                        Notice::error(format!("Could not load music: {e}"))
                    }
                };
                Some(notice)
            }
            UserCommand::ToggleMusic => match self.engine.playback_mut().toggle() {
                Ok(playing) => {
                    info!("Music {}", if playing { "playing" } else { "paused" });
                    None
                }
                Err(MediaError::NoTrack) => Some(Notice::info("Load a music file first")),
                Err(e) => {
                    warn!("Playback failed: {}", e);
                    Some(Notice::error(format!("Playback failed: {e}")))
                }
            },
            UserCommand::SetBackground(path) => {
                let notice = match self.backdrop.set_image(&path) {
                    Ok(_) => Notice::success("Background image updated"),
                    Err(e) => {
                        warn!("Background image rejected: {}", e);
                        Notice::error(format!("Could not use image: {e}"))
                    }
                };
                Some(notice)
            }
            UserCommand::ClearBackground => {
                self.backdrop.clear();
                None
            }
            UserCommand::Quit => None,
        }
    }

    fn import(&mut self, path: &Path) -> Notice {
        let records = match import_roster(path) {
            Ok(records) => records,
            Err(e) => {
                warn!("Roster import rejected: {}", e);
                return Notice::error(format!("Import failed: {e}"));
            }
        };
        match self.engine.load_roster(records) {
            Ok(count) => Notice::success(format!("Imported {count} participants")),
            Err(LoadRejection::DrawInProgress) => {
                Notice::info("Stop the current round before importing a new roster")
            }
            Err(LoadRejection::Empty) => Notice::error("Import failed: no participants found"),
        }
    }
}

// ---------------------------------------------------------------------------
// Main event loop
// ---------------------------------------------------------------------------

/// Run the main application event loop.
///
/// Listens on two channels using `tokio::select!`:
/// 1. User commands from the TUI
/// 2. Animation ticks from the engine's ticker task
///
/// Pushes UI updates through `ui_tx`. On exit the engine is torn down so no
/// ticker outlives the loop.
pub async fn run(
    mut cmd_rx: mpsc::Receiver<UserCommand>,
    mut tick_rx: mpsc::Receiver<TickEvent>,
    ui_tx: mpsc::Sender<UiUpdate>,
    mut state: AppState,
) -> anyhow::Result<()> {
    info!("Application event loop started");

    let initial = snapshot_update(&state);
    let _ = ui_tx.send(initial).await;

    loop {
        tokio::select! {
            // --- User commands ---
            cmd = cmd_rx.recv() => {
                match cmd {
                    Some(UserCommand::Quit) => {
                        info!("Quit command received, shutting down");
                        break;
                    }
                    Some(cmd) => {
                        handle_user_command(&mut state, cmd, &ui_tx).await;
                    }
                    None => {
                        info!("Command channel closed, shutting down");
                        break;
                    }
                }
            }

            // --- Animation ticks ---
            Some(tick) = tick_rx.recv() => {
                let rolled = state.engine.tick(tick).cloned();
                if let Some(rolled) = rolled {
                    let _ = ui_tx.send(UiUpdate::Rolling(rolled)).await;
                }
            }
        }
    }

    // Cleanup
    state.engine.teardown();
    info!("Application event loop exiting");
    Ok(())
}

/// Handle a user command from the TUI.
async fn handle_user_command(
    state: &mut AppState,
    cmd: UserCommand,
    ui_tx: &mpsc::Sender<UiUpdate>,
) {
    debug!("Handling command: {:?}", cmd);
    let notice = state.apply_command(cmd);
    let update = snapshot_update(state);
    let _ = ui_tx.send(update).await;
    if let Some(notice) = notice {
        let _ = ui_tx.send(UiUpdate::Notice(notice)).await;
    }
}

/// Wrap the current state as a UI update. Kept synchronous so no borrow of
/// `AppState` is held across an await.
fn snapshot_update(state: &AppState) -> UiUpdate {
    UiUpdate::Snapshot(Box::new(state.build_snapshot()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use std::time::Duration;

    use crate::config::{DisplayConfig, DrawConfig, MediaConfig, RosterConfig};
    use crate::draw::engine::DrawState;
    use crate::draw::sampler::SeededSampler;
    use crate::media::audio::Playback;
    use crate::protocol::NoticeLevel;
    use crate::roster::participant::Participant;
    use crate::roster::store::RosterStore;

    fn test_config() -> Config {
        Config {
            display: DisplayConfig {
                title: "Test Draw".into(),
                subtitle: String::new(),
            },
            draw: DrawConfig {
                tick_interval_ms: 80,
                seed: Some(5),
            },
            roster: RosterConfig {
                path: "unused.json".into(),
            },
            media: MediaConfig {
                max_image_bytes: 1024,
            },
        }
    }

    fn abc() -> Vec<Participant> {
        vec![
            Participant::new("A", "D1"),
            Participant::new("B", "D2"),
            Participant::new("C", "D3"),
        ]
    }

    fn create_test_app_state() -> AppState {
        let engine = DrawEngine::new(
            RosterStore::new(abc()),
            Box::new(SeededSampler::from_seed(5)),
            Playback::silent(),
        );
        AppState::new(test_config(), engine)
    }

    fn temp_file(name: &str, contents: &[u8]) -> PathBuf {
        let dir = std::env::temp_dir().join("lucky_draw_app_tests");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    fn expect_snapshot(update: UiUpdate) -> DrawSnapshot {
        match update {
            UiUpdate::Snapshot(s) => *s,
            other => panic!("Expected Snapshot, got {:?}", other),
        }
    }

    // -----------------------------------------------------------------------
    // Tests: snapshot and command handling
    // -----------------------------------------------------------------------

    #[test]
    fn snapshot_reflects_engine_state() {
        let mut state = create_test_app_state();
        state.apply_command(UserCommand::ToggleDraw);
        state.apply_command(UserCommand::ToggleDraw);

        let snap = state.build_snapshot();
        assert_eq!(snap.state, DrawState::Idle);
        assert_eq!(snap.total_participants, 3);
        assert_eq!(snap.remaining, 2);
        assert_eq!(snap.round, 2);
        assert_eq!(snap.winners.len(), 1);
        assert_eq!(snap.current_winner.as_ref(), snap.winners.first());
        assert!(snap.rolling.is_none());
        assert!(!snap.music.playing);
        assert!(snap.background.is_none());
    }

    #[test]
    fn exhausted_toggle_yields_info_notice() {
        let mut state = create_test_app_state();
        for _ in 0..6 {
            assert!(state.apply_command(UserCommand::ToggleDraw).is_none());
        }
        let notice = state.apply_command(UserCommand::ToggleDraw).unwrap();
        assert_eq!(notice.level, NoticeLevel::Info);
        assert_eq!(state.engine.roster().winners().len(), 3);
    }

    #[test]
    fn reset_command_restores_full_pool() {
        let mut state = create_test_app_state();
        state.apply_command(UserCommand::ToggleDraw);
        state.apply_command(UserCommand::ToggleDraw);
        state.apply_command(UserCommand::ToggleDraw);

        state.apply_command(UserCommand::Reset);

        let snap = state.build_snapshot();
        assert_eq!(snap.state, DrawState::Idle);
        assert_eq!(snap.remaining, 3);
        assert_eq!(snap.round, 1);
        assert!(snap.winners.is_empty());
    }

    #[test]
    fn import_replaces_roster() {
        let mut state = create_test_app_state();
        state.apply_command(UserCommand::ToggleDraw);
        state.apply_command(UserCommand::ToggleDraw);
        let path = temp_file("import_ok.csv", b"name,dept\nX,DX\nY,DY\n");

        let notice = state.apply_command(UserCommand::ImportRoster(path)).unwrap();

        assert_eq!(notice.level, NoticeLevel::Success);
        assert_eq!(notice.text, "Imported 2 participants");
        let snap = state.build_snapshot();
        assert_eq!(snap.total_participants, 2);
        assert_eq!(snap.round, 1);
        assert!(snap.winners.is_empty());
    }

    #[test]
    fn empty_import_is_rejected_and_roster_kept() {
        let mut state = create_test_app_state();
        let path = temp_file("import_empty.csv", b"name,dept\n");

        let notice = state.apply_command(UserCommand::ImportRoster(path)).unwrap();

        assert_eq!(notice.level, NoticeLevel::Error);
        assert_eq!(state.engine.roster().roster(), abc().as_slice());
    }

    #[test]
    fn import_during_draw_is_deferred_to_operator() {
        let mut state = create_test_app_state();
        state.apply_command(UserCommand::ToggleDraw);
        let path = temp_file("import_mid_draw.csv", b"name,dept\nX,DX\n");

        let notice = state.apply_command(UserCommand::ImportRoster(path)).unwrap();

        assert_eq!(notice.level, NoticeLevel::Info);
        assert_eq!(state.engine.state(), DrawState::Drawing);
        assert_eq!(state.engine.roster().roster().len(), 3);
    }

    #[test]
    fn toggle_music_without_track_is_info() {
        let mut state = create_test_app_state();
        let notice = state.apply_command(UserCommand::ToggleMusic).unwrap();
        assert_eq!(notice.level, NoticeLevel::Info);
        assert_eq!(notice.text, "Load a music file first");
        assert!(!state.build_snapshot().music.playing);
    }

    #[test]
    fn music_plays_during_round_and_pauses_on_stop() {
        let mut state = create_test_app_state();
        let path = temp_file("theme.mp3", b"id3");
        let notice = state.apply_command(UserCommand::LoadMusic(path)).unwrap();
        assert_eq!(notice.level, NoticeLevel::Success);
        assert!(notice.text.contains("nothing will be heard"), "{}", notice.text);
        assert!(!notice.text.contains("Press p to play"));
        assert!(!state.build_snapshot().music.audible);

        state.apply_command(UserCommand::ToggleDraw);
        assert!(state.build_snapshot().music.playing);

        state.apply_command(UserCommand::ToggleDraw);
        let snap = state.build_snapshot();
        assert!(!snap.music.playing);
        assert_eq!(snap.music.track.as_deref(), Some("theme.mp3"));
    }

    #[test]
    fn bad_music_file_keeps_previous_state() {
        let mut state = create_test_app_state();
        let notice = state
            .apply_command(UserCommand::LoadMusic(PathBuf::from("notes.txt")))
            .unwrap();
        assert_eq!(notice.level, NoticeLevel::Error);
        assert!(state.build_snapshot().music.track.is_none());
    }

    #[test]
    fn background_set_and_cleared() {
        let mut state = create_test_app_state();
        let path = temp_file("stage.png", &[0u8; 16]);

        let notice = state.apply_command(UserCommand::SetBackground(path)).unwrap();
        assert_eq!(notice.level, NoticeLevel::Success);
        assert_eq!(state.build_snapshot().background.as_deref(), Some("stage.png"));

        state.apply_command(UserCommand::ClearBackground);
        assert!(state.build_snapshot().background.is_none());
    }

    #[test]
    fn oversized_background_is_rejected() {
        let mut state = create_test_app_state();
        let path = temp_file("huge.png", &[0u8; 2048]);

        let notice = state.apply_command(UserCommand::SetBackground(path)).unwrap();

        assert_eq!(notice.level, NoticeLevel::Error);
        assert!(state.build_snapshot().background.is_none());
    }

    // -----------------------------------------------------------------------
    // Tests: Async event loop
    // -----------------------------------------------------------------------

    #[test]
    fn event_loop_future_can_be_spawned() {
        fn assert_send<T: Send>(_: &T) {}

        let (_cmd_tx, cmd_rx) = mpsc::channel(1);
        let (_tick_tx, tick_rx) = mpsc::channel(1);
        let (ui_tx, _ui_rx) = mpsc::channel(1);
        let fut = run(cmd_rx, tick_rx, ui_tx, create_test_app_state());
        assert_send(&fut);
    }

    #[tokio::test]
    async fn event_loop_sends_initial_snapshot_and_quits() {
        let state = create_test_app_state();
        let (cmd_tx, cmd_rx) = mpsc::channel(16);
        let (_tick_tx, tick_rx) = mpsc::channel(16);
        let (ui_tx, mut ui_rx) = mpsc::channel(64);

        let handle = tokio::spawn(run(cmd_rx, tick_rx, ui_tx, state));

        let snap = expect_snapshot(ui_rx.recv().await.unwrap());
        assert_eq!(snap.remaining, 3);
        assert_eq!(snap.round, 1);

        cmd_tx.send(UserCommand::Quit).await.unwrap();
        let result = handle.await.unwrap();
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn event_loop_exits_when_command_channel_closes() {
        let state = create_test_app_state();
        let (cmd_tx, cmd_rx) = mpsc::channel(16);
        let (_tick_tx, tick_rx) = mpsc::channel(16);
        let (ui_tx, _ui_rx) = mpsc::channel(64);

        let handle = tokio::spawn(run(cmd_rx, tick_rx, ui_tx, state));
        drop(cmd_tx);

        let result = tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .expect("loop should exit")
            .unwrap();
        assert!(result.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn event_loop_streams_rolling_names_then_winner() {
        let (tick_tx, tick_rx) = mpsc::channel(16);
        let engine = DrawEngine::new(
            RosterStore::new(abc()),
            Box::new(SeededSampler::from_seed(5)),
            Playback::silent(),
        )
        .with_ticker(tick_tx, Duration::from_millis(80));
        let state = AppState::new(test_config(), engine);
        let (cmd_tx, cmd_rx) = mpsc::channel(16);
        let (ui_tx, mut ui_rx) = mpsc::channel(64);

        let handle = tokio::spawn(run(cmd_rx, tick_rx, ui_tx, state));
        expect_snapshot(ui_rx.recv().await.unwrap());

        cmd_tx.send(UserCommand::ToggleDraw).await.unwrap();
        let snap = expect_snapshot(ui_rx.recv().await.unwrap());
        assert_eq!(snap.state, DrawState::Drawing);

        // The paused clock auto-advances to the first tick.
        match ui_rx.recv().await.unwrap() {
            UiUpdate::Rolling(p) => assert!(abc().contains(&p)),
            other => panic!("Expected Rolling, got {:?}", other),
        }

        cmd_tx.send(UserCommand::ToggleDraw).await.unwrap();
        let snap = loop {
            match ui_rx.recv().await.unwrap() {
                UiUpdate::Snapshot(s) => break *s,
                UiUpdate::Rolling(_) => continue,
                other => panic!("Unexpected update {:?}", other),
            }
        };
        assert_eq!(snap.state, DrawState::Idle);
        assert_eq!(snap.winners.len(), 1);
        assert_eq!(snap.round, 2);
        assert_eq!(snap.remaining, 2);

        cmd_tx.send(UserCommand::Quit).await.unwrap();
        assert!(handle.await.unwrap().is_ok());
    }

    #[tokio::test]
    async fn event_loop_sends_notice_after_snapshot() {
        let state = create_test_app_state();
        let (cmd_tx, cmd_rx) = mpsc::channel(16);
        let (_tick_tx, tick_rx) = mpsc::channel(16);
        let (ui_tx, mut ui_rx) = mpsc::channel(64);

        let handle = tokio::spawn(run(cmd_rx, tick_rx, ui_tx, state));
        expect_snapshot(ui_rx.recv().await.unwrap());

        cmd_tx.send(UserCommand::ToggleMusic).await.unwrap();
        expect_snapshot(ui_rx.recv().await.unwrap());
        match ui_rx.recv().await.unwrap() {
            UiUpdate::Notice(n) => assert_eq!(n.text, "Load a music file first"),
            other => panic!("Expected Notice, got {:?}", other),
        }

        cmd_tx.send(UserCommand::Quit).await.unwrap();
        let _ = handle.await;
    }
}
