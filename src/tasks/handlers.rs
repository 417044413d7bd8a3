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

use std::{path::PathBuf, time::Duration};

use anyhow::Result;
use tracing::{debug, warn};

use crate::{
    config::FilterMode,
    events::AppEvent,
    model::games::ListQuery,
    remote::{CallKind, upload::collect_uploads},
    tasks::TaskContext,
};

pub(super) async fn fetch_filters(ctx: &TaskContext) -> Result<()> {
    match ctx.remote.filters().await {
        Ok(facets) => ctx.event_tx.send(AppEvent::FiltersLoaded(facets))?,
        Err(e) => {
            warn!("Failed to fetch filters: {}", e);
            ctx.event_tx.send(AppEvent::FiltersFailed(e.to_string()))?;
        }
    }

    Ok(())
}

pub(super) async fn fetch_games(ctx: &TaskContext, seq: u64, query: ListQuery) -> Result<()> {
    let result = match ctx.filter_mode {
        FilterMode::Server => ctx.remote.games(&query).await,
        FilterMode::Client => ctx
            .remote
            .games(&ListQuery::default())
            .await
            .map(|games| games.into_iter().filter(|g| query.admits(g)).collect()),
    };

    match result {
        Ok(games) => ctx.event_tx.send(AppEvent::GamesLoaded { seq, games })?,
        Err(e) => {
            warn!("Failed to fetch games (request {}): {}", seq, e);
            ctx.event_tx.send(AppEvent::GamesFailed {
                seq,
                error: e.to_string(),
            })?;
        }
    }

    Ok(())
}

pub(super) async fn query(ctx: &TaskContext) -> Result<()> {
    match ctx.remote.query().await {
        Ok(snapshot) => ctx.event_tx.send(AppEvent::SnapshotLoaded(snapshot))?,
        Err(e) => {
            warn!("Failed to query remote state: {}", e);
            ctx.event_tx.send(AppEvent::Error(e.to_string()))?;
        }
    }

    Ok(())
}

pub(super) async fn launch(ctx: &TaskContext, id: String) -> Result<()> {
    match ctx.remote.launch(&id).await {
        Ok(now_playing) => ctx.event_tx.send(AppEvent::Launched(now_playing))?,
        Err(e) => call_failed(ctx, CallKind::Launch, e)?,
    }

    Ok(())
}

pub(super) async fn stop(ctx: &TaskContext) -> Result<()> {
    match ctx.remote.stop().await {
        Ok(()) => ctx.event_tx.send(AppEvent::Stopped)?,
        Err(e) => call_failed(ctx, CallKind::Stop, e)?,
    }

    Ok(())
}

pub(super) async fn set_volume(ctx: &TaskContext, level: u8) -> Result<()> {
    match ctx.remote.set_volume(level).await {
        Ok(volume) => ctx.event_tx.send(AppEvent::VolumeSet(volume))?,
        Err(e) => call_failed(ctx, CallKind::Volume, e)?,
    }

    Ok(())
}

pub(super) async fn upload(ctx: &TaskContext, paths: Vec<PathBuf>) -> Result<()> {
    let files = match collect_uploads(&paths) {
        Ok(files) => files,
        Err(e) => return call_failed(ctx, CallKind::Upload, e),
    };

    match ctx.remote.upload(&files).await {
        Ok(count) => ctx.event_tx.send(AppEvent::Uploaded(count))?,
        Err(e) => call_failed(ctx, CallKind::Upload, e)?,
    }

    Ok(())
}

pub(super) async fn sync(ctx: &TaskContext) -> Result<()> {
    let orientation = match ctx.remote.sync().await {
        Ok(orientation) => Some(orientation),
        Err(e) => {
            debug!("Sync poll failed: {}", e);
            None
        }
    };

    ctx.event_tx.send(AppEvent::SyncCompleted(orientation))?;

    Ok(())
}

pub(super) async fn arm_sync(ctx: &TaskContext, delay: Duration) -> Result<()> {
    tokio::time::sleep(delay).await;
    ctx.event_tx.send(AppEvent::SyncDue)?;

    Ok(())
}

fn call_failed(ctx: &TaskContext, kind: CallKind, e: impl std::fmt::Display) -> Result<()> {
    warn!("{:?} failed: {}", kind, e);
    ctx.event_tx.send(AppEvent::CallFailed(kind, e.to_string()))?;

    Ok(())
}
