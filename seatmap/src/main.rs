//! Seat map - pick seats from a venue chart in the terminal
//!
//! 1. Event (key or click) -> SeatmapUi::map_event() -> Actions
//! 2. Actions dispatched to the SessionStore
//! 3. The reducer updates state and returns effects
//! 4. Effects load the venue or write the selection to storage
//! 5. If state changed, re-render
//!
//! # Usage
//!
//! ```sh
//! # Local venue document
//! cargo run -p seatmap -- --user Ada --venue venue.json
//!
//! # Venue served over HTTP, selection stored in ./data
//! cargo run -p seatmap -- --user Ada --venue https://example.com/venue.json --storage-dir data
//! ```

use std::cell::RefCell;
use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use seatmap::{EffectContext, SeatmapUi, SessionRuntime};
use seatmap_core::{
    load_venue, CliOverrides, Effect, FileStorage, KeyValueStorage, MemoryStorage,
    SelectionPersistence, SessionAction, SessionConfig, SessionState, SessionStore, Viewer,
};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Seat map - choose up to eight seats from a venue chart
#[derive(Parser, Debug)]
#[command(name = "seatmap")]
#[command(about = "Pick seats from a venue chart in the terminal")]
struct Args {
    /// Venue document: a file path or an http(s) URL [default: venue.json]
    #[arg(long)]
    venue: Option<String>,

    /// Directory the selection is stored in [default: platform data dir]
    #[arg(long)]
    storage_dir: Option<PathBuf>,

    /// Name of the signed-in viewer
    #[arg(long, short)]
    user: Option<String>,

    /// JSON config file with the same settings plus keybindings
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Write logs here; the terminal itself is taken by the UI
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let args = Args::parse();

    let cli = CliOverrides {
        venue: args.venue,
        storage_dir: args.storage_dir,
        user: args.user,
        log_file: args.log_file,
    };
    let config = match SessionConfig::load(args.config.as_deref(), cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    let Some(user) = config.user.clone() else {
        eprintln!("Error: no signed-in user. Pass --user <name> or set \"user\" in the config file.");
        std::process::exit(1);
    };

    let log_file = config
        .log_file
        .clone()
        .or_else(|| config.storage_dir.as_ref().map(|dir| dir.join("seatmap.log")));
    if let Some(path) = &log_file {
        if let Err(e) = init_logging(path) {
            eprintln!("Warning: logging disabled, cannot open {}: {e}", path.display());
        }
    }

    // ===== Terminal setup =====
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = match &config.storage_dir {
        Some(dir) => {
            let persistence = SelectionPersistence::new(FileStorage::new(dir));
            run_app(&mut terminal, &config, Viewer::new(user), persistence).await
        }
        None => {
            warn!("No data directory available, selection will not survive a restart");
            let persistence = SelectionPersistence::new(MemoryStorage::new());
            run_app(&mut terminal, &config, Viewer::new(user), persistence).await
        }
    };

    // ===== Cleanup =====
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn init_logging(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .init();
    Ok(())
}

async fn run_app<B, S>(
    terminal: &mut Terminal<B>,
    config: &SessionConfig,
    viewer: Viewer,
    mut persistence: SelectionPersistence<S>,
) -> io::Result<()>
where
    B: ratatui::backend::Backend,
    S: KeyValueStorage,
{
    info!(venue = %config.venue, viewer = %viewer.display_name, "Starting session");

    let state = SessionState::new(viewer, config.venue.clone(), persistence.load());
    let mut runtime = SessionRuntime::new(SessionStore::new(state));

    runtime.enqueue(SessionAction::VenueFetch);

    // render and map_event both need the UI; they never run at the same time
    let ui = RefCell::new(SeatmapUi::new(config.keybindings.clone()));
    runtime
        .run(
            terminal,
            |frame, area, state| ui.borrow_mut().render(frame, area, state),
            |event, state| ui.borrow_mut().map_event(event, state),
            |action| matches!(action, SessionAction::Quit),
            |effect, ctx| handle_effect(effect, ctx, &mut persistence),
        )
        .await
}

fn handle_effect<S: KeyValueStorage>(
    effect: Effect,
    ctx: &EffectContext,
    persistence: &mut SelectionPersistence<S>,
) {
    match effect {
        Effect::LoadVenue(source) => {
            let tx = ctx.action_tx();
            tokio::spawn(async move {
                let action = match load_venue(&source).await {
                    Ok(venue) => SessionAction::VenueDidLoad(Arc::new(venue)),
                    Err(e) => SessionAction::VenueDidError(e),
                };
                let _ = tx.send(action);
            });
        }
        Effect::PersistSelection(ids) => {
            if let Err(e) = persistence.save(&ids) {
                warn!(error = %e, "Failed to store selection");
            }
        }
        Effect::ClearPersistedSelection => {
            if let Err(e) = persistence.clear() {
                warn!(error = %e, "Failed to remove stored selection");
            }
        }
    }
}
