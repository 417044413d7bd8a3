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

//! Asynchronous application task processing.
//!
//! This module implements the command pattern used to offload remote calls
//! and timers from the main UI thread. A dedicated worker thread owns a
//! single-threaded `tokio` runtime; every [`AppTask`] it receives runs as its
//! own future, so overlapping requests complete in whatever order the server
//! answers them. Results are broadcast back to the application via
//! [`AppEvent`]s, and all state mutation stays with the UI thread.
//!
//! Only remote calls and timers should be implemented as tasks. Everything
//! else is handled directly by events.

mod handlers;

use std::{path::PathBuf, sync::Arc, sync::mpsc::Sender, thread, time::Duration};

use anyhow::Result;
use tokio::{
    runtime,
    sync::mpsc::{UnboundedReceiver, UnboundedSender},
};
use tracing::error;

use crate::{config::FilterMode, events::AppEvent, model::games::ListQuery, remote::RemoteApi};

pub(crate) type TaskSender = UnboundedSender<AppTask>;

#[derive(Debug)]
pub(crate) enum AppTask {
    FetchFilters,
    FetchGames { seq: u64, query: ListQuery },

    Query,

    Launch(String),
    Stop,
    SetVolume(u8),
    Upload(Vec<PathBuf>),

    Sync,
    ArmSync(Duration),
}

/// Spawns a background thread to process application tasks.
///
/// # Arguments
///
/// * `filter_mode` - Where list filtering happens.
/// * `remote` - The control server.
/// * `task_rx` - The receiving end of the task channel.
/// * `event_tx` - The sending end of the channel for broadcasting results.
pub(crate) fn spawn_task_worker(
    filter_mode: FilterMode,
    remote: Arc<dyn RemoteApi>,
    mut task_rx: UnboundedReceiver<AppTask>,
    event_tx: Sender<AppEvent>,
) -> Result<()> {
    let rt = runtime::Builder::new_current_thread().enable_all().build()?;

    let ctx = TaskContext {
        filter_mode,
        remote,
        event_tx,
    };

    thread::spawn(move || {
        rt.block_on(async move {
            while let Some(task) = task_rx.recv().await {
                tokio::spawn(handle_task(task, ctx.clone()));
            }
        });
    });

    Ok(())
}

/// Bundles shared resources required by task handlers.
#[derive(Clone)]
pub(crate) struct TaskContext {
    pub(crate) filter_mode: FilterMode,
    pub(crate) remote: Arc<dyn RemoteApi>,
    pub(crate) event_tx: Sender<AppEvent>,
}

/// Orchestrates the execution of a single task.
pub(crate) async fn handle_task(task: AppTask, ctx: TaskContext) {
    let result = match task {
        AppTask::FetchFilters => handlers::fetch_filters(&ctx).await,
        AppTask::FetchGames { seq, query } => handlers::fetch_games(&ctx, seq, query).await,

        AppTask::Query => handlers::query(&ctx).await,

        AppTask::Launch(id) => handlers::launch(&ctx, id).await,
        AppTask::Stop => handlers::stop(&ctx).await,
        AppTask::SetVolume(level) => handlers::set_volume(&ctx, level).await,
        AppTask::Upload(paths) => handlers::upload(&ctx, paths).await,

        AppTask::Sync => handlers::sync(&ctx).await,
        AppTask::ArmSync(delay) => handlers::arm_sync(&ctx, delay).await,
    };

    if let Err(e) = result {
        // The UI loop has gone away, nothing left to report to.
        error!("Task failed: {:#}", e);
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::{Mutex, mpsc};

    use async_trait::async_trait;

    use super::*;
    use crate::{
        model::{FilterFacet, GameSummary, NowPlaying, RemoteSnapshot},
        remote::{RemoteError, RemoteResult},
    };

    /// Scriptable stand-in for the control server.
    #[derive(Default)]
    pub(crate) struct FakeRemote {
        pub(crate) facets: Vec<FilterFacet>,
        pub(crate) games: Vec<GameSummary>,
        pub(crate) snapshot: RemoteSnapshot,
        pub(crate) orientation: String,
        pub(crate) volume_echo: Option<u8>,
        pub(crate) fail: bool,
        pub(crate) calls: Mutex<Vec<String>>,
        pub(crate) games_queries: Mutex<Vec<ListQuery>>,
    }

    impl FakeRemote {
        fn record(&self, call: impl Into<String>) -> RemoteResult<()> {
            self.calls.lock().unwrap().push(call.into());
            if self.fail {
                return Err(RemoteError::Status {
                    endpoint: "fake",
                    status: 500,
                    message: "boom".into(),
                });
            }
            Ok(())
        }
    }

    #[async_trait]
    impl RemoteApi for FakeRemote {
        async fn query(&self) -> RemoteResult<RemoteSnapshot> {
            self.record("query")?;
            Ok(self.snapshot.clone())
        }

        async fn filters(&self) -> RemoteResult<Vec<FilterFacet>> {
            self.record("filters")?;
            Ok(self.facets.clone())
        }

        async fn games(&self, query: &ListQuery) -> RemoteResult<Vec<GameSummary>> {
            self.record("games")?;
            self.games_queries.lock().unwrap().push(query.clone());
            Ok(self.games.clone())
        }

        async fn launch(&self, id: &str) -> RemoteResult<Option<NowPlaying>> {
            self.record(format!("launch {}", id))?;
            Ok(self.games.iter().find(|g| g.id == id).map(|g| NowPlaying {
                id: Some(g.id.clone()),
                title: g.title.clone(),
            }))
        }

        async fn stop(&self) -> RemoteResult<()> {
            self.record("stop")
        }

        async fn set_volume(&self, level: u8) -> RemoteResult<Option<u8>> {
            self.record(format!("volume {}", level))?;
            Ok(self.volume_echo.or(Some(level)))
        }

        async fn sync(&self) -> RemoteResult<String> {
            self.record("sync")?;
            Ok(self.orientation.clone())
        }

        async fn upload(&self, files: &[PathBuf]) -> RemoteResult<usize> {
            self.record("upload")?;
            Ok(files.len())
        }
    }

    pub(crate) fn game(id: &str, title: &str, orientation: &str) -> GameSummary {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "title": title,
            "orientation": orientation,
        }))
        .unwrap()
    }

    fn context(remote: FakeRemote, filter_mode: FilterMode) -> (TaskContext, mpsc::Receiver<AppEvent>) {
        let (event_tx, event_rx) = mpsc::channel();
        let ctx = TaskContext {
            filter_mode,
            remote: Arc::new(remote),
            event_tx,
        };
        (ctx, event_rx)
    }

    #[tokio::test]
    async fn server_mode_passes_query_through() {
        let remote = FakeRemote {
            games: vec![game("a", "Galaga", "portrait")],
            ..Default::default()
        };
        let (ctx, event_rx) = context(remote, FilterMode::Server);

        let query = ListQuery {
            search: "gal".into(),
            ..Default::default()
        };
        handle_task(AppTask::FetchGames { seq: 3, query }, ctx).await;

        match event_rx.recv().unwrap() {
            AppEvent::GamesLoaded { seq, games } => {
                assert_eq!(seq, 3);
                assert_eq!(games.len(), 1);
            }
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[tokio::test]
    async fn client_mode_filters_locally() {
        let remote = FakeRemote {
            games: vec![
                game("a", "Galaga", "portrait"),
                game("b", "Out Run", "landscape"),
            ],
            ..Default::default()
        };
        let (event_tx, event_rx) = mpsc::channel();
        let remote = Arc::new(remote);
        let ctx = TaskContext {
            filter_mode: FilterMode::Client,
            remote: remote.clone(),
            event_tx,
        };

        let query = ListQuery {
            search: String::new(),
            filters: ["o:landscape"]
                .iter()
                .filter_map(|k| crate::model::selection::CompositeKey::parse(k))
                .collect(),
        };
        handle_task(AppTask::FetchGames { seq: 1, query }, ctx).await;

        match event_rx.recv().unwrap() {
            AppEvent::GamesLoaded { games, .. } => {
                assert_eq!(games.len(), 1);
                assert_eq!(games[0].id, "b");
            }
            other => panic!("unexpected event {:?}", other),
        }
        assert_eq!(remote.games_queries.lock().unwrap()[0], ListQuery::default());
    }

    #[tokio::test]
    async fn failed_list_refresh_reports_its_sequence() {
        let remote = FakeRemote {
            fail: true,
            ..Default::default()
        };
        let (ctx, event_rx) = context(remote, FilterMode::Server);

        handle_task(
            AppTask::FetchGames {
                seq: 7,
                query: ListQuery::default(),
            },
            ctx,
        )
        .await;

        assert!(matches!(
            event_rx.recv().unwrap(),
            AppEvent::GamesFailed { seq: 7, .. }
        ));
    }

    #[tokio::test]
    async fn failed_sync_still_completes() {
        let remote = FakeRemote {
            fail: true,
            ..Default::default()
        };
        let (ctx, event_rx) = context(remote, FilterMode::Server);

        handle_task(AppTask::Sync, ctx).await;

        assert!(matches!(
            event_rx.recv().unwrap(),
            AppEvent::SyncCompleted(None)
        ));
    }

    #[tokio::test]
    async fn launch_failure_names_the_call() {
        let remote = FakeRemote {
            fail: true,
            ..Default::default()
        };
        let (ctx, event_rx) = context(remote, FilterMode::Server);

        handle_task(AppTask::Launch("a".into()), ctx).await;

        assert!(matches!(
            event_rx.recv().unwrap(),
            AppEvent::CallFailed(crate::remote::CallKind::Launch, _)
        ));
    }

    #[tokio::test]
    async fn invalid_upload_never_reaches_the_server() {
        let remote = Arc::new(FakeRemote::default());
        let (event_tx, event_rx) = mpsc::channel();
        let ctx = TaskContext {
            filter_mode: FilterMode::Server,
            remote: remote.clone(),
            event_tx,
        };

        handle_task(AppTask::Upload(vec![PathBuf::from("notes.txt")]), ctx).await;

        assert!(matches!(
            event_rx.recv().unwrap(),
            AppEvent::CallFailed(crate::remote::CallKind::Upload, _)
        ));
        assert!(remote.calls.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn armed_sync_fires_after_delay() {
        let (ctx, event_rx) = context(FakeRemote::default(), FilterMode::Server);

        handle_task(AppTask::ArmSync(Duration::from_secs(5)), ctx).await;

        assert!(matches!(event_rx.recv().unwrap(), AppEvent::SyncDue));
    }
}
