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

//! HTTP implementation of the remote contract.

use std::path::PathBuf;

use async_trait::async_trait;
use reqwest::{
    Client, RequestBuilder, Response,
    header::{COOKIE, HeaderMap, HeaderValue},
    multipart::{Form, Part},
};
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::{debug, info};

use crate::{
    config::AppConfig,
    model::{FilterFacet, GameSummary, NowPlaying, RemoteSnapshot, TitleRef, games::ListQuery},
    remote::{
        ErrorResponse, LaunchResponse, QueryResponse, RemoteApi, RemoteError, RemoteResult,
        SyncResponse, VolumeResponse,
    },
};

pub(crate) struct HttpRemote {
    http: Client,
    base_url: String,
}

impl HttpRemote {
    pub(crate) fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let mut headers = HeaderMap::new();
        if let Some(cookie) = &config.session_cookie {
            headers.insert(COOKIE, HeaderValue::from_str(cookie)?);
        }

        let http = Client::builder().default_headers(headers).build()?;

        Ok(Self {
            http,
            base_url: config.server_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint)
    }

    /// Sends `request`, failing on transport errors and non-2xx statuses.
    async fn send_raw(&self, endpoint: &'static str, request: RequestBuilder) -> RemoteResult<Response> {
        let response = request
            .send()
            .await
            .map_err(|source| RemoteError::Transport { endpoint, source })?;

        check_status(endpoint, response).await
    }

    async fn send<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        request: RequestBuilder,
    ) -> RemoteResult<T> {
        let response = self.send_raw(endpoint, request).await?;

        let text = response
            .text()
            .await
            .map_err(|source| RemoteError::Transport { endpoint, source })?;

        serde_json::from_str(&text).map_err(|e| RemoteError::Decode {
            endpoint,
            detail: e.to_string(),
        })
    }

    async fn get<T: DeserializeOwned>(&self, endpoint: &'static str) -> RemoteResult<T> {
        self.send(endpoint, self.http.get(self.url(endpoint))).await
    }

    /// Builds the list request. Both parameters are always sent, even when
    /// empty, so the server never falls back to a stale default.
    fn games_request(&self, query: &ListQuery) -> RequestBuilder {
        let filters = query.filters.to_csv();
        self.http
            .get(self.url("games"))
            .query(&[("search", query.search.as_str()), ("filters", filters.as_str())])
    }

    async fn post<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        body: serde_json::Value,
    ) -> RemoteResult<T> {
        self.send(endpoint, self.http.post(self.url(endpoint)).json(&body))
            .await
    }
}

fn upload_part_name(index: usize) -> String {
    format!("files[{}]", index)
}

async fn check_status(endpoint: &'static str, response: Response) -> RemoteResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorResponse>(&text)
        .ok()
        .and_then(|e| e.message)
        .unwrap_or_else(|| text.chars().take(200).collect());

    Err(RemoteError::Status {
        endpoint,
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl RemoteApi for HttpRemote {
    async fn query(&self) -> RemoteResult<RemoteSnapshot> {
        let response: QueryResponse = self.get("query").await?;
        Ok(response.into())
    }

    async fn filters(&self) -> RemoteResult<Vec<FilterFacet>> {
        self.get("filters").await
    }

    async fn games(&self, query: &ListQuery) -> RemoteResult<Vec<GameSummary>> {
        debug!(
            "Fetching games search={:?} filters={:?}",
            query.search,
            query.filters.to_csv()
        );

        self.send("games", self.games_request(query)).await
    }

    async fn launch(&self, id: &str) -> RemoteResult<Option<NowPlaying>> {
        let response: LaunchResponse = self.post("launch", json!({ "id": id })).await?;
        Ok(response.title.and_then(TitleRef::into_now_playing))
    }

    async fn stop(&self) -> RemoteResult<()> {
        let request = self.http.post(self.url("stop")).json(&json!({}));
        self.send_raw("stop", request).await?;
        Ok(())
    }

    async fn set_volume(&self, level: u8) -> RemoteResult<Option<u8>> {
        let response: VolumeResponse = self.post("volume", json!({ "volume": level })).await?;
        Ok(response.volume)
    }

    async fn sync(&self) -> RemoteResult<String> {
        let response: SyncResponse = self.get("sync").await?;
        Ok(response.orientation)
    }

    async fn upload(&self, files: &[PathBuf]) -> RemoteResult<usize> {
        let mut form = Form::new();

        for (i, path) in files.iter().enumerate() {
            let bytes = tokio::fs::read(path).await.map_err(|source| RemoteError::Io {
                path: path.clone(),
                source,
            })?;
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();

            form = form.part(upload_part_name(i), Part::bytes(bytes).file_name(file_name));
        }

        info!("Uploading {} file(s)", files.len());

        let request = self.http.post(self.url("upload")).multipart(form);
        self.send_raw("upload", request).await?;

        Ok(files.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::selection::CompositeKey;

    fn remote() -> HttpRemote {
        let config = AppConfig {
            server_url: "http://arcade.local:8080/".into(),
            ..AppConfig::default()
        };
        HttpRemote::new(&config).unwrap()
    }

    #[test]
    fn games_request_always_sends_both_parameters() {
        let request = remote().games_request(&ListQuery::default()).build().unwrap();

        assert_eq!(request.url().path(), "/games");
        assert_eq!(request.url().query(), Some("search=&filters="));
    }

    #[test]
    fn games_request_encodes_search_and_filters() {
        let query = ListQuery {
            search: "street fighter".into(),
            filters: ["o:portrait", "p:fbneo"]
                .into_iter()
                .filter_map(CompositeKey::parse)
                .collect(),
        };

        let request = remote().games_request(&query).build().unwrap();
        assert_eq!(
            request.url().query(),
            Some("search=street+fighter&filters=o%3Aportrait%2Cp%3Afbneo")
        );
    }

    #[test]
    fn upload_parts_are_indexed() {
        assert_eq!(upload_part_name(0), "files[0]");
        assert_eq!(upload_part_name(4), "files[4]");
    }
}
