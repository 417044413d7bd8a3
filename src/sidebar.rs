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

//! Cursor state for the filter sidebar.

use crate::model::{FilterFacet, selection::CompositeKey};

#[derive(Debug, Default)]
pub(crate) struct Sidebar {
    pub(crate) is_active: bool,
    facet_idx: usize,
    option_idx: usize,
}

impl Sidebar {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn facet_idx(&self) -> usize {
        self.facet_idx
    }

    pub(crate) fn option_idx(&self) -> usize {
        self.option_idx
    }

    pub(crate) fn next_facet(&mut self, facets: &[FilterFacet]) {
        if facets.is_empty() {
            return;
        }
        self.facet_idx = (self.facet_idx + 1) % facets.len();
        self.option_idx = 0;
    }

    pub(crate) fn previous_facet(&mut self, facets: &[FilterFacet]) {
        if facets.is_empty() {
            return;
        }
        self.facet_idx = self.facet_idx.checked_sub(1).unwrap_or(facets.len() - 1);
        self.option_idx = 0;
    }

    pub(crate) fn next_option(&mut self, facets: &[FilterFacet]) {
        let len = facets.get(self.facet_idx).map_or(0, |f| f.options.len());
        if self.option_idx + 1 < len {
            self.option_idx += 1;
        }
    }

    pub(crate) fn previous_option(&mut self) {
        self.option_idx = self.option_idx.saturating_sub(1);
    }

    /// Keeps the cursor in range after the facets were replaced.
    pub(crate) fn clamp(&mut self, facets: &[FilterFacet]) {
        if self.facet_idx >= facets.len() {
            self.facet_idx = 0;
            self.option_idx = 0;
        }
        let len = facets.get(self.facet_idx).map_or(0, |f| f.options.len());
        if self.option_idx >= len {
            self.option_idx = len.saturating_sub(1);
        }
    }

    /// The facet id and composite key under the cursor.
    pub(crate) fn current(&self, facets: &[FilterFacet]) -> Option<(String, CompositeKey)> {
        let facet = facets.get(self.facet_idx)?;
        let option = facet.options.get(self.option_idx)?;
        Some((facet.id.clone(), facet.key_for(option)))
    }
}
