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

//! Application configuration.
//!
//! This module manages the application configuration file.

use serde::{Deserialize, Serialize};

const CONFIG_NAME: &str = "arcadectl";

/// Where game filtering happens.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub(crate) enum FilterMode {
    /// Search text and filters are sent to the server on every refresh.
    #[default]
    Server,
    /// The full list is fetched and narrowed locally.
    Client,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub(crate) struct AppConfig {
    pub(crate) version: u32,
    pub(crate) server_url: String,
    pub(crate) session_cookie: Option<String>,
    pub(crate) sync_interval_secs: u64,
    pub(crate) pre_mute_retention_days: i64,
    pub(crate) volume_step: u8,
    pub(crate) volume_coarse_step: u8,
    pub(crate) filter_mode: FilterMode,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: 1,
            server_url: "http://localhost:8080".into(),
            session_cookie: None,
            sync_interval_secs: 5,
            pre_mute_retention_days: 31,
            volume_step: 2,
            volume_coarse_step: 10,
            filter_mode: FilterMode::Server,
        }
    }
}

pub(crate) fn load_config() -> AppConfig {
    confy::load(CONFIG_NAME, None).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_falls_back_to_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{"server_url": "http://arcade:8080", "filter_mode": "client"}"#)
                .unwrap();

        assert_eq!(config.server_url, "http://arcade:8080");
        assert_eq!(config.filter_mode, FilterMode::Client);
        assert_eq!(config.sync_interval_secs, 5);
        assert_eq!(config.pre_mute_retention_days, 31);
    }
}
