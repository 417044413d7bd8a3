// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! # Arcade Control TUI.
//!
//! A terminal control panel for a remote game launcher.
//!
//! This application coordinates a TUI frontend built with `ratatui` and a
//! background task worker that talks to the control server.
//!
//! It uses an event-driven architecture where:
//!
//! * The **Main Thread** owns all application state, manages the terminal
//!   lifecycle and renders the UI.
//! * The **Task Worker** runs remote calls and timers on its own runtime and
//!   reports back with events.
//! * **Event Loops** capture user input and system ticks to drive the UI
//!   state.
//!
//! ## Architecture
//!
//! The application follows a strict setup-run-teardown pattern to ensure the
//! terminal state is preserved even in the event of a crash. Results flow back
//! to the main thread via a `std::sync::mpsc` channel, so every state change
//! is serialized through a single owner.

mod commander;
mod config;
mod db;
mod events;
mod model;
mod navigator;
mod remote;
mod render;
mod search;
mod sidebar;
mod sync;
mod tasks;
mod theme;
mod util;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableBracketedPaste, DisableFocusChange, EnableBracketedPaste, EnableFocusChange},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{
    io::{self},
    sync::{
        Arc,
        mpsc::{self, Receiver, Sender},
    },
    thread,
    time::Duration,
};
use tokio::sync::mpsc::unbounded_channel;
use tracing::info;

use crate::{
    commander::Commander,
    config::AppConfig,
    db::Prefs,
    events::{AppEvent, process_events},
    model::{
        NowPlaying,
        facets::FacetModel,
        games::GameList,
        hash::History,
        volume::VolumeState,
    },
    navigator::Navigator,
    remote::{busy::BusyState, http::HttpRemote},
    search::SearchBox,
    sidebar::Sidebar,
    sync::SyncClock,
    tasks::{AppTask, TaskSender},
    theme::Theme,
};

const DATABASE_FILE: &str = "arcadectl.db";
const LOG_FILE: &str = "arcadectl.log";

const TICK_RATE: Duration = Duration::from_millis(250);

/// A one-line message shown in the status bar.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct StatusMessage {
    pub(crate) text: String,
    pub(crate) is_error: bool,
}

impl StatusMessage {
    pub(crate) fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
        }
    }

    pub(crate) fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: true,
        }
    }
}

/// Application state.
pub(crate) struct App {
    pub config: AppConfig,

    pub theme: Theme,

    pub event_tx: Sender<AppEvent>,
    pub event_rx: Receiver<AppEvent>,

    pub task_tx: TaskSender,

    pub prefs: Prefs,

    pub facets: FacetModel,
    pub games: GameList,
    pub history: History,

    pub navigator: Navigator,
    pub search: SearchBox,
    pub sidebar: Sidebar,
    pub commander: Commander,

    pub sync_clock: SyncClock,
    pub visible: bool,

    pub busy: BusyState,
    pub volume: VolumeState,
    pub now_playing: Option<NowPlaying>,

    pub status: Option<StatusMessage>,
    pub tick: usize,
}

impl App {
    /// Create a new instance of application state.
    pub fn new(config: AppConfig, task_tx: TaskSender, prefs: Prefs, fragment: &str) -> Self {
        let (event_tx, event_rx) = mpsc::channel();

        let sync_interval = Duration::from_secs(config.sync_interval_secs);

        Self {
            config,
            theme: Theme::default(),
            event_tx,
            event_rx,
            task_tx,
            prefs,
            facets: FacetModel::new(),
            games: GameList::new(),
            history: History::new(fragment),
            navigator: Navigator::new(),
            search: SearchBox::new(),
            sidebar: Sidebar::new(),
            commander: Commander::new(),
            sync_clock: SyncClock::new(sync_interval),
            visible: true,
            busy: BusyState::new(),
            volume: VolumeState::new(),
            now_playing: None,
            status: None,
            tick: 0,
        }
    }
}

/// The entry point of the application.
///
/// Sets up logging, the database and the communication channels, initializes
/// the application state, manages the terminal lifecycle, and returns an
/// error if any part of the execution fails.
///
/// An optional first argument is taken as the initial location fragment, for
/// example `arcadectl 'filters=o:portrait'`.
fn main() -> Result<()> {
    let data_dir = util::paths::data_dir().context("Failed to locate data directory")?;
    util::log::init_tracing(&data_dir.join(LOG_FILE)).context("Failed to open log file")?;

    let config = config::load_config();
    info!("Starting with server {}", config.server_url);

    let conn = db::init_db(&data_dir.join(DATABASE_FILE).to_string_lossy())
        .context("Failed to initialise database")?;
    let prefs = Prefs::new(conn, config.pre_mute_retention_days);

    let fragment = std::env::args().nth(1).unwrap_or_default();

    let remote = HttpRemote::new(&config).context("Failed to create HTTP client")?;

    let (task_tx, task_rx) = unbounded_channel();

    let mut app = App::new(config, task_tx, prefs, &fragment);

    tasks::spawn_task_worker(
        app.config.filter_mode,
        Arc::new(remote),
        task_rx,
        app.event_tx.clone(),
    )
    .context("Failed to start task worker")?;

    let mut terminal = setup_terminal(&app)?;
    let res = run(&mut terminal, &mut app);
    restore_terminal(&mut terminal);

    res.context("Application error occurred")
}

/// Prepares the terminal for the TUI application.
///
/// This function performs the following side effects:
/// * Sets the terminal background color based on the provided theme.
/// * Enables raw mode to capture all keyboard input.
/// * Switches the terminal to the alternate screen buffer.
/// * Enables focus-change reporting and bracketed paste.
///
/// # Errors
///
/// Returns an error if raw mode cannot be enabled or if the alternate screen
/// cannot be entered.
fn setup_terminal(app: &App) -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    // Set the background of the entire terminal window, without this we'd get
    // a thin black outline
    util::term::set_terminal_bg(&Theme::to_hex(app.theme.background_colour));

    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableFocusChange, EnableBracketedPaste)
        .context("Failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;

    Ok(terminal)
}

/// Restores the terminal to its original state.
///
/// This reverses the changes made by [`setup_terminal`]. It is best-effort
/// and does not return a result, as it is typically called during cleanup.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) {
    disable_raw_mode().ok();
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        DisableFocusChange,
        LeaveAlternateScreen
    )
    .ok();
    util::term::reset_terminal_bg();
    terminal.show_cursor().ok();
}

/// Starts the input and tick threads, issues the initial load and enters the
/// main event loop.
///
/// # Errors
///
/// Returns an error if the event processing loop encounters an unrecoverable
/// application error.
fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    // Spawn a thread to translate raw terminal events to application events.
    let tx_input = app.event_tx.clone();
    thread::spawn(move || {
        loop {
            let event = match event::read() {
                Ok(event::Event::Key(key)) => AppEvent::Key(key),
                Ok(event::Event::Paste(text)) => AppEvent::Paste(text),
                Ok(event::Event::FocusGained) => AppEvent::FocusChanged(true),
                Ok(event::Event::FocusLost) => AppEvent::FocusChanged(false),
                Ok(_) => AppEvent::Tick,
                Err(_) => continue,
            };
            if tx_input.send(event).is_err() {
                break;
            }
        }
    });

    // Spawn a thread to send a periodic tick application event, this is
    // effectively the minimum "frame rate" for rendering the TUI application.
    let tx_tick = app.event_tx.clone();
    thread::spawn(move || {
        while tx_tick.send(AppEvent::Tick).is_ok() {
            thread::sleep(TICK_RATE);
        }
    });

    // Initial load: remote snapshot, facets (which then refresh the list) and
    // the first sync.
    app.task_tx.send(AppTask::Query)?;
    app.task_tx.send(AppTask::FetchFilters)?;
    app.task_tx.send(AppTask::ArmSync(Duration::ZERO))?;

    // Application event loop, process events until the user quits
    process_events(terminal, app)
}
