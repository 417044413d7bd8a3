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

//! Filter facet model and matching algebra.
//!
//! Facets are replaced wholesale on every fetch. The selection outlives them
//! and is pruned to keys that still name an existing option.
//!
//! Matching is an AND across facets and an OR within a facet: a game matches
//! when, for every facet with at least one selected option, it carries at
//! least one of that facet's selected keys. An empty selection matches every
//! game.

use std::collections::BTreeSet;

use crate::model::{
    FacetKind, FilterFacet,
    selection::{CompositeKey, SelectionState},
};

#[derive(Debug, Default)]
pub(crate) struct FacetModel {
    facets: Vec<FilterFacet>,
    selection: SelectionState,
}

impl FacetModel {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn facets(&self) -> &[FilterFacet] {
        &self.facets
    }

    pub(crate) fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub(crate) fn facet(&self, facet_id: &str) -> Option<&FilterFacet> {
        self.facets.iter().find(|f| f.id == facet_id)
    }

    /// Replaces every facet, dropping selected keys that no longer exist.
    pub(crate) fn replace_facets(&mut self, facets: Vec<FilterFacet>) {
        self.facets = facets;
        let facets = &self.facets;
        self.selection.retain(|key| facets.iter().any(|f| f.owns(key)));
    }

    /// Adopts `selection` (typically decoded from the location fragment),
    /// keeping only the keys that name a known option.
    pub(crate) fn apply_selection(&mut self, selection: SelectionState) {
        let facets = &self.facets;
        self.selection = selection;
        self.selection.retain(|key| facets.iter().any(|f| f.owns(key)));
    }

    /// Toggles `key` within `facet_id`.
    ///
    /// On a single-select facet, or when `extend` is false, selecting an
    /// option first clears its siblings. On a multi-select facet with
    /// `extend` the option flips independently. Returns `false` when the
    /// facet or option is unknown.
    pub(crate) fn toggle(&mut self, facet_id: &str, key: &CompositeKey, extend: bool) -> bool {
        let Some(facet) = self.facets.iter().find(|f| f.id == facet_id) else {
            return false;
        };
        if !facet.owns(key) {
            return false;
        }

        let exclusive = facet.kind == FacetKind::Single || !extend;
        if exclusive && !self.selection.contains(key) {
            self.selection.retain(|k| !facet.owns(k));
        }

        if !self.selection.remove(key) {
            self.selection.insert(key.clone());
        }

        true
    }

    /// Selects exactly `name` in `facet_id`, clearing its siblings.
    ///
    /// Returns `false`, leaving the selection untouched, when the facet or
    /// option is unknown or `name` is already the only selected option.
    pub(crate) fn select_exclusive(&mut self, facet_id: &str, name: &str) -> bool {
        let Some(facet) = self.facets.iter().find(|f| f.id == facet_id) else {
            return false;
        };
        if !facet.has_option(name) {
            return false;
        }

        let key = CompositeKey::new(&facet.prefix, name);
        let before = self.selection.len();
        self.selection.retain(|k| !facet.owns(k) || *k == key);
        let cleared = self.selection.len() != before;
        let inserted = self.selection.insert(key);

        cleared || inserted
    }

    /// A facet is active when at least one of its options is selected.
    pub(crate) fn is_active(&self, facet_id: &str) -> bool {
        self.facet(facet_id)
            .is_some_and(|f| self.selection.iter().any(|k| f.owns(k)))
    }

    /// The first selected option name in the facet using `prefix`.
    pub(crate) fn selected_name<'a>(&'a self, prefix: &'a str) -> Option<&'a str> {
        self.selection.with_prefix(prefix).next().map(CompositeKey::name)
    }
}

/// Whether a game carrying `tags` satisfies `selection`.
pub(crate) fn matches(tags: &BTreeSet<CompositeKey>, selection: &SelectionState) -> bool {
    selection
        .by_prefix()
        .values()
        .all(|selected| selected.iter().any(|key| tags.contains(*key)))
}
