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

use std::collections::HashMap;

use crate::remote::CallKind;

/// Busy indicator shared by launch, stop, volume and upload calls.
///
/// Shown when a call is issued and hidden in the completion path of any call,
/// so whichever call resolves last decides the final visible state. The
/// in-flight count is tracked per kind for display only.
#[derive(Debug, Default)]
pub(crate) struct BusyState {
    visible: bool,
    in_flight: HashMap<CallKind, usize>,
}

impl BusyState {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn begin(&mut self, kind: CallKind) {
        *self.in_flight.entry(kind).or_default() += 1;
        self.visible = true;
    }

    pub(crate) fn finish(&mut self, kind: CallKind) {
        if let Some(count) = self.in_flight.get_mut(&kind) {
            *count = count.saturating_sub(1);
            if *count == 0 {
                self.in_flight.remove(&kind);
            }
        }
        self.visible = false;
    }

    /// Clears the indicator without touching call bookkeeping, used when a
    /// list or facet refresh fails.
    pub(crate) fn clear(&mut self) {
        self.visible = false;
    }

    pub(crate) fn is_visible(&self) -> bool {
        self.visible
    }

    pub(crate) fn pending(&self) -> usize {
        self.in_flight.values().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_resolved_call_controls_visibility() {
        let mut busy = BusyState::new();

        busy.begin(CallKind::Volume);
        busy.begin(CallKind::Volume);
        assert!(busy.is_visible());
        assert_eq!(busy.pending(), 2);

        busy.finish(CallKind::Volume);
        assert!(!busy.is_visible());
        assert_eq!(busy.pending(), 1);

        busy.begin(CallKind::Launch);
        busy.finish(CallKind::Volume);
        assert!(!busy.is_visible());
        assert_eq!(busy.pending(), 1);
    }

    #[test]
    fn failure_path_also_clears() {
        let mut busy = BusyState::new();
        busy.begin(CallKind::Upload);
        busy.clear();
        assert!(!busy.is_visible());
    }
}
