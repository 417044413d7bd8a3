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

//! Application logic, event handling, and dispatching.
//!
//! This module acts as the central hub for the "Controller" logic of the
//! application. Terminal input, task results and timer firings all arrive as
//! [`AppEvent`]s on one channel and are applied to [`App`] one at a time, so
//! the selection, cursor and list state only ever change on the UI thread.
//!
//! # Organization
//!
//! * `handlers`: state transitions for task results and requests.
//! * `key_handlers`: keyboard routing for the list, search box and sidebar.

mod handlers;
mod key_handlers;

use handlers::*;
use key_handlers::process_key_event;

use std::{io::Stdout, path::PathBuf};

use anyhow::Result;
use crossterm::event::KeyEvent;
use ratatui::{Terminal, prelude::CrosstermBackend};
use tracing::error;

use crate::{
    App, StatusMessage,
    model::{FilterFacet, GameSummary, NowPlaying, RemoteSnapshot},
    remote::CallKind,
    render::draw,
};

#[derive(Debug)]
pub(crate) enum AppEvent {
    Key(KeyEvent),
    Paste(String),
    FocusChanged(bool),

    FiltersLoaded(Vec<FilterFacet>),
    FiltersFailed(String),

    GamesLoaded { seq: u64, games: Vec<GameSummary> },
    GamesFailed { seq: u64, error: String },

    SnapshotLoaded(RemoteSnapshot),

    Launched(Option<NowPlaying>),
    Stopped,
    VolumeSet(Option<u8>),
    Uploaded(usize),
    CallFailed(CallKind, String),

    SyncDue,
    SyncCompleted(Option<String>),

    HashChanged(String),
    NavigateBack,
    UploadRequested(Vec<PathBuf>),
    StopRequested,
    RefreshRequested,
    SetVolumeRequested(u8),

    Tick,

    ExitApplication,

    Error(String),
}

/// Runs the main application loop, handling events and rendering the UI in the
/// terminal.
///
/// This function loops until a 'quit' event is received or the event channel
/// is closed. A failing handler is reported in the status bar; it does not end
/// the loop.
pub(crate) fn process_events(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
) -> Result<()> {
    while let Ok(event) = app.event_rx.recv() {
        if matches!(event, AppEvent::ExitApplication) {
            break;
        }

        if let Err(e) = handle_event(app, event) {
            error!("Event handling failed: {:#}", e);
            app.status = Some(StatusMessage::error(format!("{:#}", e)));
        }

        terminal.draw(|f| draw(f, app))?;
    }

    Ok(())
}

pub(crate) fn handle_event(app: &mut App, event: AppEvent) -> Result<()> {
    match event {
        AppEvent::Key(key) => process_key_event(app, key)?,
        AppEvent::Paste(text) => handle_paste(app, text)?,
        AppEvent::FocusChanged(visible) => handle_focus_changed(app, visible),

        AppEvent::FiltersLoaded(facets) => handle_filters_loaded(app, facets)?,
        AppEvent::FiltersFailed(error) => handle_refresh_failed(app, error),

        AppEvent::GamesLoaded { seq, games } => handle_games_loaded(app, seq, games),
        AppEvent::GamesFailed { seq, error } => handle_games_failed(app, seq, error),

        AppEvent::SnapshotLoaded(snapshot) => handle_snapshot_loaded(app, snapshot),

        AppEvent::Launched(now_playing) => handle_launched(app, now_playing),
        AppEvent::Stopped => handle_stopped(app),
        AppEvent::VolumeSet(volume) => handle_volume_set(app, volume),
        AppEvent::Uploaded(count) => handle_uploaded(app, count),
        AppEvent::CallFailed(kind, error) => handle_call_failed(app, kind, error),

        AppEvent::SyncDue => handle_sync_due(app)?,
        AppEvent::SyncCompleted(orientation) => handle_sync_completed(app, orientation)?,

        AppEvent::HashChanged(fragment) => handle_hash_changed(app, fragment)?,
        AppEvent::NavigateBack => handle_navigate_back(app)?,
        AppEvent::UploadRequested(paths) => request_upload(app, paths)?,
        AppEvent::StopRequested => request_stop(app)?,
        AppEvent::RefreshRequested => handle_refresh_requested(app)?,
        AppEvent::SetVolumeRequested(level) => handle_set_volume_requested(app, level)?,

        AppEvent::Error(message) => app.status = Some(StatusMessage::error(message)),

        AppEvent::Tick | AppEvent::ExitApplication => handle_tick(app),
    }

    Ok(())
}
