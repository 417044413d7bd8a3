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

//! Location fragment codec and navigation history.
//!
//! The addressable part of the view state is the filter selection, written
//! into a fragment of the form `key=value(&key=value)*`. Only the `filters`
//! key is understood; its value is a comma separated list of composite keys
//! whose components are percent-encoded.

use thiserror::Error;
use tracing::warn;

use crate::model::selection::{CompositeKey, SelectionState};

pub(crate) const FILTERS_KEY: &str = "filters";

#[derive(Debug, Error, PartialEq)]
pub(crate) enum FragmentError {
    #[error("invalid percent-encoding in {0:?}")]
    InvalidEncoding(String),
}

/// Decodes a fragment, treating anything malformed as the empty selection.
pub(crate) fn decode(fragment: &str) -> SelectionState {
    try_decode(fragment).unwrap_or_else(|e| {
        warn!("Ignoring malformed fragment {:?}: {}", fragment, e);
        SelectionState::new()
    })
}

pub(crate) fn try_decode(fragment: &str) -> Result<SelectionState, FragmentError> {
    let mut filters: Option<&str> = None;

    for pair in fragment.trim_start_matches('#').split('&') {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        if key == FILTERS_KEY {
            filters = Some(value);
        }
    }

    let Some(filters) = filters else {
        return Ok(SelectionState::new());
    };

    filters
        .split(',')
        .filter(|raw| !raw.is_empty())
        .map(|raw| {
            urlencoding::decode(raw)
                .map_err(|_| FragmentError::InvalidEncoding(raw.to_string()))
                .map(|decoded| CompositeKey::parse(&decoded))
        })
        .filter_map(Result::transpose)
        .collect()
}

/// Encodes a selection. The empty selection encodes to the empty fragment.
pub(crate) fn encode(selection: &SelectionState) -> String {
    if selection.is_empty() {
        return String::new();
    }

    let keys: Vec<String> = selection
        .iter()
        .map(|key| match key.parts() {
            Some((prefix, name)) => {
                format!("{}:{}", urlencoding::encode(prefix), urlencoding::encode(name))
            }
            None => urlencoding::encode(key.as_str()).into_owned(),
        })
        .collect();

    format!("{}={}", FILTERS_KEY, keys.join(","))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Navigation {
    /// Creates a new history entry (deliberate filter toggles).
    Push,
    /// Rewrites the current entry in place.
    Replace,
}

/// Fragment history, mirroring what the browser location would hold.
#[derive(Debug)]
pub(crate) struct History {
    entries: Vec<String>,
    index: usize,
}

impl History {
    pub(crate) fn new(initial: &str) -> Self {
        Self {
            entries: vec![initial.trim_start_matches('#').to_string()],
            index: 0,
        }
    }

    pub(crate) fn current(&self) -> &str {
        &self.entries[self.index]
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Moves to `fragment`. Returns `false` when it is already current.
    pub(crate) fn navigate(&mut self, fragment: &str, navigation: Navigation) -> bool {
        let fragment = fragment.trim_start_matches('#');
        if fragment == self.current() {
            return false;
        }

        match navigation {
            Navigation::Push => {
                self.entries.truncate(self.index + 1);
                self.entries.push(fragment.to_string());
                self.index += 1;
            }
            Navigation::Replace => self.entries[self.index] = fragment.to_string(),
        }

        true
    }

    pub(crate) fn back(&mut self) -> Option<&str> {
        if self.index == 0 {
            return None;
        }
        self.index -= 1;
        Some(self.current())
    }
}
