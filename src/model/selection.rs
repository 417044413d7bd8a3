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

//! Filter selection state.
//!
//! A selection is a set of composite keys of the form `prefix:option`. It is
//! the unit of state shared by the facet sidebar, the location fragment and
//! the game list request.

use std::{
    collections::{BTreeMap, BTreeSet},
    fmt,
};

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct CompositeKey(String);

impl CompositeKey {
    pub(crate) fn new(prefix: &str, name: &str) -> Self {
        Self(format!("{prefix}:{name}"))
    }

    /// Parses a raw key, returning `None` for blank input. Non-blank keys
    /// are kept verbatim so that option names with surrounding spaces still
    /// match their facet.
    pub(crate) fn parse(raw: &str) -> Option<Self> {
        (!raw.trim().is_empty()).then(|| Self(raw.to_string()))
    }

    /// The `(prefix, name)` pair, if the key is namespaced.
    pub(crate) fn parts(&self) -> Option<(&str, &str)> {
        self.0.split_once(':')
    }

    pub(crate) fn prefix(&self) -> &str {
        self.parts().map_or("", |(prefix, _)| prefix)
    }

    pub(crate) fn name(&self) -> &str {
        self.parts().map_or(self.0.as_str(), |(_, name)| name)
    }

    pub(crate) fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CompositeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct SelectionState {
    keys: BTreeSet<CompositeKey>,
}

impl SelectionState {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub(crate) fn len(&self) -> usize {
        self.keys.len()
    }

    pub(crate) fn contains(&self, key: &CompositeKey) -> bool {
        self.keys.contains(key)
    }

    pub(crate) fn insert(&mut self, key: CompositeKey) -> bool {
        self.keys.insert(key)
    }

    pub(crate) fn remove(&mut self, key: &CompositeKey) -> bool {
        self.keys.remove(key)
    }

    pub(crate) fn retain(&mut self, f: impl FnMut(&CompositeKey) -> bool) {
        self.keys.retain(f);
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &CompositeKey> {
        self.keys.iter()
    }

    pub(crate) fn with_prefix<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = &'a CompositeKey> {
        self.keys.iter().filter(move |k| k.prefix() == prefix)
    }

    /// Selected keys grouped by facet prefix.
    pub(crate) fn by_prefix(&self) -> BTreeMap<&str, Vec<&CompositeKey>> {
        let mut groups: BTreeMap<&str, Vec<&CompositeKey>> = BTreeMap::new();
        for key in &self.keys {
            groups.entry(key.prefix()).or_default().push(key);
        }
        groups
    }

    /// The comma separated key list sent as the `filters` request parameter.
    pub(crate) fn to_csv(&self) -> String {
        self.keys
            .iter()
            .map(CompositeKey::as_str)
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl FromIterator<CompositeKey> for SelectionState {
    fn from_iter<T: IntoIterator<Item = CompositeKey>>(iter: T) -> Self {
        Self {
            keys: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_parts_split_on_first_colon() {
        let key = CompositeKey::parse("s:Street Fighter: Alpha").unwrap();
        assert_eq!(key.prefix(), "s");
        assert_eq!(key.name(), "Street Fighter: Alpha");

        let bare = CompositeKey::parse("coop").unwrap();
        assert_eq!(bare.prefix(), "");
        assert_eq!(bare.name(), "coop");

        assert!(CompositeKey::parse("  ").is_none());
        assert_eq!(CompositeKey::parse("t:coop ").unwrap(), CompositeKey::new("t", "coop "));
    }

    #[test]
    fn groups_by_prefix() {
        let selection: SelectionState = ["p:a", "p:b", "o:landscape"]
            .into_iter()
            .filter_map(CompositeKey::parse)
            .collect();

        let groups = selection.by_prefix();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups["p"].len(), 2);
        assert_eq!(selection.to_csv(), "o:landscape,p:a,p:b");
    }
}
