// Lucky draw entry point.
//
// Startup sequence:
// 1. Initialize tracing (log to file, not terminal)
// 2. Load config
// 3. Load the startup roster
// 4. Create mpsc channels
// 5. Build the draw engine
// 6. Spawn app logic task
// 7. Run the TUI until the operator quits
// 8. Cleanup on exit

use std::path::Path;

use lucky_draw::app;
use lucky_draw::bootstrap;
use lucky_draw::config;
use lucky_draw::draw::engine::DrawEngine;
use lucky_draw::draw::sampler::SeededSampler;
use lucky_draw::media::audio::Playback;
use lucky_draw::roster::store::RosterStore;
use lucky_draw::tui;

use anyhow::Context;
use tokio::sync::mpsc;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize tracing
    init_tracing()?;
    info!("Lucky draw starting up");

    // 2. Load config
    let config = config::load_config().context("failed to load configuration")?;
    info!(
        "Config loaded: title={:?}, tick={}ms, seeded={}",
        config.display.title,
        config.draw.tick_interval_ms,
        config.draw.seed.is_some()
    );

    // 3. Load the startup roster (missing file means an empty roster)
    let participants = bootstrap::load_initial_roster(Path::new(&config.roster.path));
    let roster = RosterStore::new(participants);

    // 4. Create mpsc channels
    let (cmd_tx, cmd_rx) = mpsc::channel(64);
    let (ui_tx, ui_rx) = mpsc::channel(256);
    let (tick_tx, tick_rx) = mpsc::channel(16);

    // 5. Build the draw engine
    let sampler = SeededSampler::from_config(config.draw.seed);
    let engine = DrawEngine::new(roster, Box::new(sampler), Playback::silent())
        .with_ticker(tick_tx, config.draw.tick_interval());

    let view_state = tui::ViewState::new(
        config.display.title.clone(),
        config.display.subtitle.clone(),
    );
    let app_state = app::AppState::new(config, engine);

    // 6. Spawn app logic task
    let app_handle = tokio::spawn(async move {
        if let Err(e) = app::run(cmd_rx, tick_rx, ui_tx, app_state).await {
            error!("Application loop error: {}", e);
        }
    });

    // 7. Run the TUI event loop (blocks until the operator quits)
    info!("Application ready");
    if let Err(e) = tui::run(ui_rx, cmd_tx, view_state).await {
        error!("TUI error: {:#}", e);
    }

    // 8. Cleanup: wait for app task to finish (with timeout)
    let _ = tokio::time::timeout(std::time::Duration::from_secs(5), async {
        let _ = app_handle.await;
    })
    .await;

    info!("Lucky draw shut down cleanly");
    Ok(())
}

/// Initialize tracing to log to a file (the terminal belongs to the TUI).
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = std::env::current_dir()?.join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::File::create(log_dir.join("lucky-draw.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("lucky_draw=info,warn")),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
