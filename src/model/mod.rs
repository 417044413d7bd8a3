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

//! Domain models and core data structures.
//!
//! This module defines the central entities of the control panel, the games
//! offered by the remote host and the filter facets used to narrow them down,
//! as they arrive from the control server. Every fetch produces structurally
//! new values, so everything that must survive a refresh (selection, cursor)
//! refers to these by key or id rather than by reference.

pub(crate) mod facets;
pub(crate) mod games;
pub(crate) mod hash;
pub(crate) mod selection;
pub(crate) mod volume;

use std::collections::BTreeSet;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::model::selection::CompositeKey;

/// Facet prefix the server uses for orientation options.
pub(crate) const ORIENTATION_PREFIX: &str = "o";

/// Facet prefix the server uses for platform options.
pub(crate) const PLATFORM_PREFIX: &str = "p";

/// Facet id of the orientation axis.
pub(crate) const ORIENTATION_FACET: &str = "orientation";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Orientation {
    Portrait,
    Landscape,
}

impl Orientation {
    /// Parses a sensor or catalog value, ignoring case and surrounding
    /// whitespace. Anything other than the two known orientations is `None`.
    pub(crate) fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "portrait" => Some(Self::Portrait),
            "landscape" => Some(Self::Landscape),
            _ => None,
        }
    }

    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::Portrait => "portrait",
            Self::Landscape => "landscape",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) enum FacetKind {
    #[default]
    Single,
    Multi,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct FilterOption {
    pub(crate) name: String,
    #[serde(default, rename = "count")]
    pub(crate) match_count: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct FilterFacet {
    pub(crate) id: String,
    #[serde(default, rename = "type", deserialize_with = "facet_kind")]
    pub(crate) kind: FacetKind,
    #[serde(default)]
    pub(crate) label: String,
    pub(crate) prefix: String,
    #[serde(default)]
    pub(crate) options: Vec<FilterOption>,
}

impl FilterFacet {
    /// The composite selection key for one of this facet's options.
    pub(crate) fn key_for(&self, option: &FilterOption) -> CompositeKey {
        CompositeKey::new(&self.prefix, &option.name)
    }

    pub(crate) fn has_option(&self, name: &str) -> bool {
        self.options.iter().any(|o| o.name == name)
    }

    pub(crate) fn owns(&self, key: &CompositeKey) -> bool {
        key.prefix() == self.prefix && self.has_option(key.name())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub(crate) struct GameSummary {
    pub(crate) id: String,
    pub(crate) title: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub(crate) year: Option<String>,
    #[serde(default)]
    pub(crate) company: Option<String>,
    #[serde(default)]
    pub(crate) system: Option<String>,
    #[serde(default)]
    pub(crate) orientation: Option<String>,
    #[serde(default, rename = "app_id")]
    pub(crate) platform_id: Option<String>,
    #[serde(default, rename = "filters")]
    pub(crate) facet_tags: Vec<String>,
}

impl GameSummary {
    pub(crate) fn orientation(&self) -> Option<Orientation> {
        self.orientation.as_deref().and_then(Orientation::parse)
    }

    /// The composite keys this game satisfies.
    ///
    /// Explicit server tags are combined with the keys implied by the
    /// orientation and platform fields.
    pub(crate) fn tags(&self) -> BTreeSet<CompositeKey> {
        let mut tags: BTreeSet<CompositeKey> = self
            .facet_tags
            .iter()
            .filter_map(|t| CompositeKey::parse(t))
            .collect();

        if let Some(orientation) = self.orientation() {
            tags.insert(CompositeKey::new(ORIENTATION_PREFIX, orientation.as_str()));
        }
        if let Some(platform) = &self.platform_id {
            tags.insert(CompositeKey::new(PLATFORM_PREFIX, platform));
        }

        tags
    }
}

/// The game currently running on the remote host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct NowPlaying {
    pub(crate) id: Option<String>,
    pub(crate) title: String,
}

/// A title as reported by `query` or `launch`: either the full game record or
/// just its name.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum TitleRef {
    Game(GameSummary),
    Name(String),
}

impl TitleRef {
    /// Converts into [`NowPlaying`]; blank titles mean nothing is running.
    pub(crate) fn into_now_playing(self) -> Option<NowPlaying> {
        match self {
            TitleRef::Game(game) => Some(NowPlaying {
                id: Some(game.id),
                title: game.title,
            }),
            TitleRef::Name(name) if name.trim().is_empty() => None,
            TitleRef::Name(name) => Some(NowPlaying {
                id: None,
                title: name,
            }),
        }
    }
}

/// Remote playback and volume snapshot.
#[derive(Debug, Clone, Default)]
pub(crate) struct RemoteSnapshot {
    pub(crate) now_playing: Option<NowPlaying>,
    pub(crate) volume: Option<u8>,
}

fn facet_kind<'de, D>(deserializer: D) -> Result<FacetKind, D::Error>
where
    D: Deserializer<'de>,
{
    let kind = Option::<String>::deserialize(deserializer)?;
    Ok(match kind.as_deref() {
        Some("multi") => FacetKind::Multi,
        _ => FacetKind::Single,
    })
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Accepts a volume given as a number or as a numeric string, as the server
/// relays whatever the host's volume script printed.
pub(crate) fn lenient_volume<'de, D>(deserializer: D) -> Result<Option<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    let level = match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_u64(),
        Some(Value::String(s)) => s.trim().parse::<u64>().ok(),
        _ => None,
    };

    Ok(level.map(|l| l.min(100) as u8))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn facet_type_defaults_to_single() {
        let facets: Vec<FilterFacet> = serde_json::from_str(
            r#"[
                {"id": "orientation", "label": "Orientation", "prefix": "o",
                 "options": [{"name": "landscape", "count": 3}]},
                {"id": "tag", "label": "Tags", "prefix": "t", "type": "multi",
                 "options": [{"name": "coop", "count": 1}]}
            ]"#,
        )
        .unwrap();

        assert_eq!(facets[0].kind, FacetKind::Single);
        assert_eq!(facets[1].kind, FacetKind::Multi);
        assert_eq!(facets[0].options[0].match_count, 3);
        assert_eq!(facets[1].key_for(&facets[1].options[0]).as_str(), "t:coop");
    }

    #[test]
    fn game_tags_include_orientation_and_platform() {
        let game: GameSummary = serde_json::from_str(
            r#"{"id": "fbneo:sf2", "title": "Street Fighter II", "year": 1991,
                "orientation": "landscape", "app_id": "fbneo", "filters": ["t:fighting"]}"#,
        )
        .unwrap();

        assert_eq!(game.year.as_deref(), Some("1991"));
        assert_eq!(game.orientation(), Some(Orientation::Landscape));

        let tags: Vec<String> = game.tags().iter().map(|t| t.to_string()).collect();
        assert_eq!(tags, vec!["o:landscape", "p:fbneo", "t:fighting"]);
    }

    #[test]
    fn blank_title_means_nothing_running() {
        assert_eq!(TitleRef::Name("  ".into()).into_now_playing(), None);
        assert_eq!(
            TitleRef::Name("Galaga".into()).into_now_playing(),
            Some(NowPlaying { id: None, title: "Galaga".into() })
        );
    }

    #[test]
    fn orientation_parse_ignores_case() {
        assert_eq!(Orientation::parse(" Portrait\n"), Some(Orientation::Portrait));
        assert_eq!(Orientation::parse("upside-down"), None);
    }
}
