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

//! Orientation polling.
//!
//! The poll runs on a single re-armed timer. Each firing asks the clock
//! whether a poll is due; the clock answers with a [`PollDecision`] that also
//! tells the caller whether to re-arm. The response is reconciled against the
//! orientation filter so that a manual choice is never fought.

use std::time::{Duration, Instant};

use tracing::debug;

use crate::model::Orientation;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PollDecision {
    /// Issue the poll; the completion path re-arms the timer.
    Poll,
    /// Terminal not visible: skip the network call but keep rescheduling.
    Hidden,
    /// A poll happened less than an interval ago. Another timer chain is
    /// already running, so do not re-arm.
    TooSoon,
}

impl PollDecision {
    pub(crate) fn rearm_now(self) -> bool {
        matches!(self, PollDecision::Hidden)
    }
}

#[derive(Debug)]
pub(crate) struct SyncClock {
    interval: Duration,
    last_sync: Option<Instant>,
    last_sensor: Option<Orientation>,
}

impl SyncClock {
    pub(crate) fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_sync: None,
            last_sensor: None,
        }
    }

    pub(crate) fn interval(&self) -> Duration {
        self.interval
    }

    pub(crate) fn begin(&mut self, now: Instant, visible: bool) -> PollDecision {
        if let Some(last) = self.last_sync {
            let elapsed = now.saturating_duration_since(last);
            if elapsed < self.interval {
                debug!("Ignoring sync request (last sync {:?} ago)", elapsed);
                return PollDecision::TooSoon;
            }
        }

        if !visible {
            return PollDecision::Hidden;
        }

        self.last_sync = Some(now);
        PollDecision::Poll
    }

    /// Decides whether a sensor reading should be applied as the orientation
    /// filter.
    ///
    /// Returns the orientation to select only when the reading is a known
    /// orientation that differs from both the current filter and the last
    /// reading applied. Nothing is remembered until [`SyncClock::confirm`].
    pub(crate) fn reconcile(
        &self,
        reported: &str,
        filter_orientation: Option<&str>,
    ) -> Option<Orientation> {
        let sensor = Orientation::parse(reported)?;

        let filter = filter_orientation.and_then(Orientation::parse);
        if filter == Some(sensor) || self.last_sensor == Some(sensor) {
            return None;
        }

        Some(sensor)
    }

    /// Records `sensor` as the last orientation actually applied.
    pub(crate) fn confirm(&mut self, sensor: Orientation) {
        self.last_sensor = Some(sensor);
    }
}
