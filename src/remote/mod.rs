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

//! Remote control server contract.
//!
//! The control server is consumed through the [`RemoteApi`] trait so that the
//! task worker can be exercised against a fake. [`http::HttpRemote`] is the
//! production implementation.

pub(crate) mod busy;
pub(crate) mod http;
pub(crate) mod upload;

use std::path::PathBuf;

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

use crate::model::{
    FilterFacet, GameSummary, NowPlaying, RemoteSnapshot, TitleRef, lenient_volume,
    games::ListQuery,
};

#[derive(Debug, Error)]
pub(crate) enum RemoteError {
    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{endpoint} returned {status}: {message}")]
    Status {
        endpoint: &'static str,
        status: u16,
        message: String,
    },

    #[error("unexpected response from {endpoint}: {detail}")]
    Decode {
        endpoint: &'static str,
        detail: String,
    },

    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{0}")]
    InvalidUpload(String),
}

pub(crate) type RemoteResult<T> = Result<T, RemoteError>;

#[async_trait]
pub(crate) trait RemoteApi: Send + Sync {
    async fn query(&self) -> RemoteResult<RemoteSnapshot>;
    async fn filters(&self) -> RemoteResult<Vec<FilterFacet>>;
    async fn games(&self, query: &ListQuery) -> RemoteResult<Vec<GameSummary>>;
    async fn launch(&self, id: &str) -> RemoteResult<Option<NowPlaying>>;
    async fn stop(&self) -> RemoteResult<()>;
    async fn set_volume(&self, level: u8) -> RemoteResult<Option<u8>>;
    async fn sync(&self) -> RemoteResult<String>;
    async fn upload(&self, files: &[PathBuf]) -> RemoteResult<usize>;
}

#[derive(Debug, Deserialize)]
pub(crate) struct QueryResponse {
    #[serde(default)]
    pub(crate) title: Option<TitleRef>,
    #[serde(default, deserialize_with = "lenient_volume")]
    pub(crate) volume: Option<u8>,
}

impl From<QueryResponse> for RemoteSnapshot {
    fn from(response: QueryResponse) -> Self {
        Self {
            now_playing: response.title.and_then(TitleRef::into_now_playing),
            volume: response.volume,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct LaunchResponse {
    #[serde(default)]
    pub(crate) title: Option<TitleRef>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct VolumeResponse {
    #[serde(default, deserialize_with = "lenient_volume")]
    pub(crate) volume: Option<u8>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SyncResponse {
    pub(crate) orientation: String,
}

/// Error body the server sends alongside a non-2xx status.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorResponse {
    pub(crate) message: Option<String>,
}

/// The remote calls bracketed by the busy indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum CallKind {
    Launch,
    Stop,
    Volume,
    Upload,
}
