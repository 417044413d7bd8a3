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

//! The visible game list.
//!
//! Refreshes are tagged with a monotonically increasing sequence number when
//! issued. A response is only rendered if no newer request has been issued
//! since, so overlapping requests completing out of order can never roll the
//! list back to an older result. Accepted responses replace the list
//! wholesale.

use crate::model::{GameSummary, selection::SelectionState};

/// The parameters of one list refresh.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct ListQuery {
    pub(crate) search: String,
    pub(crate) filters: SelectionState,
}

impl ListQuery {
    /// Client-side evaluation of this query against a single game: a
    /// case-insensitive title substring plus the facet algebra.
    pub(crate) fn admits(&self, game: &GameSummary) -> bool {
        let search = self.search.trim().to_lowercase();
        (search.is_empty() || game.title.to_lowercase().contains(&search))
            && crate::model::facets::matches(&game.tags(), &self.filters)
    }
}

#[derive(Debug, Default)]
pub(crate) struct GameList {
    games: Vec<GameSummary>,
    issued_seq: u64,
    rendered_seq: u64,
}

impl GameList {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Reserves the sequence number for a new request.
    pub(crate) fn issue(&mut self) -> u64 {
        self.issued_seq += 1;
        self.issued_seq
    }

    /// Offers a response. Returns `false`, leaving the list untouched, when
    /// the response predates the most recently issued request.
    pub(crate) fn accept(&mut self, seq: u64, games: Vec<GameSummary>) -> bool {
        if seq < self.issued_seq {
            return false;
        }

        self.games = games;
        self.rendered_seq = seq;
        true
    }

    pub(crate) fn is_current(&self, seq: u64) -> bool {
        seq >= self.issued_seq
    }

    pub(crate) fn games(&self) -> &[GameSummary] {
        &self.games
    }

    pub(crate) fn ids(&self) -> Vec<String> {
        self.games.iter().map(|g| g.id.clone()).collect()
    }

    pub(crate) fn get(&self, id: &str) -> Option<&GameSummary> {
        self.games.iter().find(|g| g.id == id)
    }

    pub(crate) fn rendered_seq(&self) -> u64 {
        self.rendered_seq
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::selection::CompositeKey;

    fn game(id: &str, title: &str) -> GameSummary {
        GameSummary {
            id: id.into(),
            title: title.into(),
            year: None,
            company: None,
            system: None,
            orientation: Some("landscape".into()),
            platform_id: Some("fbneo".into()),
            facet_tags: vec![],
        }
    }

    #[test]
    fn late_stale_response_is_discarded() {
        let mut list = GameList::new();
        let r1 = list.issue();
        let r2 = list.issue();

        assert!(list.accept(r2, vec![game("b", "Bravo")]));
        assert!(!list.accept(r1, vec![game("a", "Alpha")]));

        assert_eq!(list.ids(), vec!["b"]);
        assert_eq!(list.rendered_seq(), r2);
    }

    #[test]
    fn early_stale_response_is_discarded_too() {
        let mut list = GameList::new();
        let r1 = list.issue();
        let r2 = list.issue();

        assert!(!list.accept(r1, vec![game("a", "Alpha")]));
        assert!(list.games().is_empty());
        assert!(list.accept(r2, vec![game("b", "Bravo")]));
        assert_eq!(list.ids(), vec!["b"]);
    }

    #[test]
    fn identical_refreshes_are_idempotent() {
        let mut list = GameList::new();
        let payload = vec![game("a", "Alpha"), game("b", "Bravo")];

        let seq = list.issue();
        list.accept(seq, payload.clone());
        let seq = list.issue();
        list.accept(seq, payload.clone());

        assert_eq!(list.games(), payload.as_slice());
    }

    #[test]
    fn client_side_query_uses_search_and_facets() {
        let query = ListQuery {
            search: "STREET".into(),
            filters: [CompositeKey::parse("o:landscape").unwrap()].into_iter().collect(),
        };

        assert!(query.admits(&game("sf2", "Street Fighter II")));
        assert!(!query.admits(&game("galaga", "Galaga")));

        let mut portrait = game("sf2p", "Street Fighter II");
        portrait.orientation = Some("portrait".into());
        assert!(!query.admits(&portrait));
    }
}
