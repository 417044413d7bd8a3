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

use std::{path::PathBuf, time::Instant};

use anyhow::Result;
use tracing::{debug, info, warn};
use tui_input::Input;

use crate::{
    App, StatusMessage,
    model::{
        FilterFacet, GameSummary, NowPlaying, ORIENTATION_FACET, ORIENTATION_PREFIX,
        RemoteSnapshot,
        games::ListQuery,
        hash::{self, Navigation},
    },
    remote::{CallKind, upload::parse_pasted_paths},
    sync::PollDecision,
    tasks::AppTask,
};

/// Issues a list refresh for the current search term and selection, then
/// brings the location fragment in line with the selection.
pub(super) fn sync_game_list(app: &mut App, navigation: Navigation) -> Result<()> {
    let seq = app.games.issue();
    let query = ListQuery {
        search: app.search.term().to_string(),
        filters: app.facets.selection().clone(),
    };
    app.task_tx.send(AppTask::FetchGames { seq, query })?;

    sync_hash(app, navigation);

    Ok(())
}

fn sync_hash(app: &mut App, navigation: Navigation) {
    let fragment = hash::encode(app.facets.selection());
    if app.history.navigate(&fragment, navigation) {
        debug!(
            "Location fragment is now {:?} ({} history entries)",
            fragment,
            app.history.len()
        );
    }
}

/// Re-reads the selection from the current fragment and refreshes.
fn apply_fragment(app: &mut App) -> Result<()> {
    let selection = hash::decode(app.history.current());
    app.facets.apply_selection(selection);
    sync_game_list(app, Navigation::Replace)
}

fn apply_now_playing(app: &mut App, now_playing: Option<NowPlaying>) {
    app.navigator
        .set_running(now_playing.as_ref().and_then(|n| n.id.clone()));
    app.now_playing = now_playing;
}

pub(super) fn handle_focus_changed(app: &mut App, visible: bool) {
    app.visible = visible;
}

pub(super) fn handle_paste(app: &mut App, text: String) -> Result<()> {
    if app.commander.active() {
        let value = format!("{}{}", app.commander.input.value(), text.trim_end());
        app.commander.input = Input::new(value);
        return Ok(());
    }

    if app.search.is_focused() {
        let value = format!("{}{}", app.search.input.value(), text.trim_end());
        app.search.input = Input::new(value);
        return sync_game_list(app, Navigation::Replace);
    }

    // Files dropped onto the terminal arrive as pasted paths.
    request_upload(app, parse_pasted_paths(&text))
}

pub(super) fn handle_filters_loaded(app: &mut App, facets: Vec<FilterFacet>) -> Result<()> {
    info!("Loaded {} filter facets", facets.len());
    app.facets.replace_facets(facets);
    app.sidebar.clamp(app.facets.facets());

    apply_fragment(app)
}

pub(super) fn handle_refresh_failed(app: &mut App, error: String) {
    app.busy.clear();
    app.status = Some(StatusMessage::error(error));
}

pub(super) fn handle_games_loaded(app: &mut App, seq: u64, games: Vec<GameSummary>) {
    if !app.games.accept(seq, games) {
        debug!("Discarding stale game list (request {})", seq);
        return;
    }

    debug!(
        "Showing {} games from request {}",
        app.games.games().len(),
        app.games.rendered_seq()
    );
    app.navigator.rebind(app.games.ids());
}

pub(super) fn handle_games_failed(app: &mut App, seq: u64, error: String) {
    if !app.games.is_current(seq) {
        debug!("Ignoring failure of superseded request {}", seq);
        return;
    }

    handle_refresh_failed(app, error);
}

pub(super) fn handle_snapshot_loaded(app: &mut App, snapshot: RemoteSnapshot) {
    apply_now_playing(app, snapshot.now_playing);
    if let Some(volume) = snapshot.volume {
        app.volume.apply_server(volume);
    }
}

pub(super) fn handle_launched(app: &mut App, now_playing: Option<NowPlaying>) {
    app.busy.finish(CallKind::Launch);
    apply_now_playing(app, now_playing);
}

pub(super) fn handle_stopped(app: &mut App) {
    app.busy.finish(CallKind::Stop);
    apply_now_playing(app, None);
}

pub(super) fn handle_volume_set(app: &mut App, volume: Option<u8>) {
    app.busy.finish(CallKind::Volume);
    if let Some(volume) = volume {
        app.volume.apply_server(volume);
    }
}

pub(super) fn handle_uploaded(app: &mut App, count: usize) {
    app.busy.finish(CallKind::Upload);
    app.status = Some(StatusMessage::info(format!("Uploaded {} file(s)", count)));
}

pub(super) fn handle_call_failed(app: &mut App, kind: CallKind, error: String) {
    app.busy.finish(kind);
    app.status = Some(StatusMessage::error(error));
}

pub(super) fn handle_sync_due(app: &mut App) -> Result<()> {
    let decision = app.sync_clock.begin(Instant::now(), app.visible);

    if decision == PollDecision::Poll {
        app.task_tx.send(AppTask::Sync)?;
    } else if decision.rearm_now() {
        app.task_tx.send(AppTask::ArmSync(app.sync_clock.interval()))?;
    }

    Ok(())
}

/// Completion path of a poll. The next timer is armed whether or not the poll
/// succeeded.
pub(super) fn handle_sync_completed(app: &mut App, orientation: Option<String>) -> Result<()> {
    let applied = orientation.and_then(|reported| {
        let filter = app.facets.selected_name(ORIENTATION_PREFIX);
        app.sync_clock.reconcile(&reported, filter)
    });

    let rearm = app.task_tx.send(AppTask::ArmSync(app.sync_clock.interval()));

    if let Some(orientation) = applied {
        if app.facets.select_exclusive(ORIENTATION_FACET, orientation.as_str()) {
            info!("Auto-orienting to {}", orientation.as_str());
            app.sync_clock.confirm(orientation);
            sync_game_list(app, Navigation::Replace)?;
        } else {
            debug!("No {} orientation option to apply", orientation.as_str());
        }
    }

    rearm?;
    Ok(())
}

pub(super) fn handle_hash_changed(app: &mut App, fragment: String) -> Result<()> {
    app.history.navigate(&fragment, Navigation::Push);
    apply_fragment(app)
}

pub(super) fn handle_navigate_back(app: &mut App) -> Result<()> {
    if app.history.back().is_none() {
        app.status = Some(StatusMessage::info("Already at the oldest entry"));
        return Ok(());
    }

    apply_fragment(app)
}

pub(super) fn handle_refresh_requested(app: &mut App) -> Result<()> {
    app.task_tx.send(AppTask::Query)?;
    app.task_tx.send(AppTask::FetchFilters)?;

    Ok(())
}

pub(super) fn handle_set_volume_requested(app: &mut App, level: u8) -> Result<()> {
    let level = app.volume.request(level, &mut app.prefs)?;
    request_volume(app, level)
}

pub(super) fn handle_tick(app: &mut App) {
    app.tick = app.tick.wrapping_add(1);
}

pub(super) fn request_launch(app: &mut App, id: String) -> Result<()> {
    if let Some(game) = app.games.get(&id) {
        app.status = Some(StatusMessage::info(format!("Launching {}", game.title)));
    }

    app.busy.begin(CallKind::Launch);
    app.task_tx.send(AppTask::Launch(id))?;

    Ok(())
}

pub(super) fn request_stop(app: &mut App) -> Result<()> {
    app.busy.begin(CallKind::Stop);
    app.task_tx.send(AppTask::Stop)?;

    Ok(())
}

pub(super) fn request_volume(app: &mut App, level: u8) -> Result<()> {
    app.busy.begin(CallKind::Volume);
    app.task_tx.send(AppTask::SetVolume(level))?;

    Ok(())
}

pub(super) fn request_upload(app: &mut App, paths: Vec<PathBuf>) -> Result<()> {
    if paths.is_empty() {
        warn!("Nothing to upload");
        return Ok(());
    }

    app.busy.begin(CallKind::Upload);
    app.task_tx.send(AppTask::Upload(paths))?;

    Ok(())
}
