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

//! Volume and mute state.
//!
//! The server is authoritative: the local level only changes when a volume
//! response arrives. Muting remembers the previous level in a
//! [`PreMuteMemory`] that outlives the process, and any other volume change
//! forgets it.

use anyhow::Result;

pub(crate) const MAX_VOLUME: u8 = 100;

pub(crate) trait PreMuteMemory {
    fn remember(&mut self, level: u8) -> Result<()>;
    fn recall(&mut self) -> Result<Option<u8>>;
    fn forget(&mut self) -> Result<()>;
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct VolumeState {
    level: u8,
}

impl VolumeState {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn level(&self) -> u8 {
        self.level
    }

    /// Adopts the level reported by the server.
    pub(crate) fn apply_server(&mut self, level: u8) {
        self.level = level.min(MAX_VOLUME);
    }

    /// Requests an absolute level, forgetting any remembered pre-mute level.
    pub(crate) fn request(&self, level: u8, memory: &mut dyn PreMuteMemory) -> Result<u8> {
        memory.forget()?;
        Ok(level.min(MAX_VOLUME))
    }

    /// Requests a relative change, clamped to `0..=100`. Returns `None` when
    /// the clamped level equals the current one.
    pub(crate) fn adjust(&self, delta: i32, memory: &mut dyn PreMuteMemory) -> Result<Option<u8>> {
        let target = (self.level as i32 + delta).clamp(0, MAX_VOLUME as i32) as u8;
        if target == self.level {
            return Ok(None);
        }

        self.request(target, memory).map(Some)
    }

    /// Mutes when audible, remembering the current level; otherwise restores
    /// the remembered level if there is one.
    pub(crate) fn toggle_mute(&self, memory: &mut dyn PreMuteMemory) -> Result<Option<u8>> {
        if self.level > 0 {
            memory.remember(self.level)?;
            return Ok(Some(0));
        }

        match memory.recall()? {
            Some(level) => self.request(level, memory).map(Some),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    #[derive(Default)]
    pub(crate) struct MemorySlot(pub(crate) Option<u8>);

    impl PreMuteMemory for MemorySlot {
        fn remember(&mut self, level: u8) -> Result<()> {
            self.0 = Some(level);
            Ok(())
        }

        fn recall(&mut self) -> Result<Option<u8>> {
            Ok(self.0)
        }

        fn forget(&mut self) -> Result<()> {
            self.0 = None;
            Ok(())
        }
    }

    #[test]
    fn mute_then_unmute_restores_level() {
        let mut volume = VolumeState::new();
        let mut memory = MemorySlot::default();
        volume.apply_server(40);

        let muted = volume.toggle_mute(&mut memory).unwrap();
        assert_eq!(muted, Some(0));
        volume.apply_server(0);
        assert_eq!(memory.0, Some(40));

        let restored = volume.toggle_mute(&mut memory).unwrap();
        assert_eq!(restored, Some(40));
        volume.apply_server(40);
        assert_eq!(volume.level(), 40);
        assert_eq!(memory.0, None);
    }

    #[test]
    fn unmute_without_memory_does_nothing() {
        let volume = VolumeState::new();
        let mut memory = MemorySlot::default();
        assert_eq!(volume.toggle_mute(&mut memory).unwrap(), None);
    }

    #[test]
    fn adjusting_forgets_pre_mute_level() {
        let mut volume = VolumeState::new();
        let mut memory = MemorySlot(Some(55));
        volume.apply_server(0);

        assert_eq!(volume.adjust(2, &mut memory).unwrap(), Some(2));
        assert_eq!(memory.0, None);
    }

    #[test]
    fn adjust_clamps_and_skips_no_ops() {
        let mut volume = VolumeState::new();
        let mut memory = MemorySlot::default();

        volume.apply_server(99);
        assert_eq!(volume.adjust(10, &mut memory).unwrap(), Some(100));

        volume.apply_server(100);
        assert_eq!(volume.adjust(10, &mut memory).unwrap(), None);

        volume.apply_server(1);
        assert_eq!(volume.adjust(-10, &mut memory).unwrap(), Some(0));
    }
}
