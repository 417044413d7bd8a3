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

//! Command-line input logic and state management.
//!
//! This module implements the logic for the command-line component, handling
//! a text input component, and dispatching a corresponding application event
//! when a command is submitted.

use std::sync::mpsc::Sender;

use anyhow::Result;
use crossterm::event::{Event, KeyCode};
use tui_input::{Input, backend::crossterm::EventHandler};

use crate::{events::AppEvent, remote::upload::parse_pasted_paths};

pub(crate) struct Commander {
    active: bool,
    pub(crate) input: Input,
}

impl Commander {
    pub(crate) fn new() -> Self {
        Self {
            active: false,
            input: Input::default(),
        }
    }

    pub(crate) fn active(&self) -> bool {
        self.active
    }

    /// Offers an event to the command line. Returns `true` if it was consumed.
    pub(crate) fn handle_event(&mut self, event: &Event, event_tx: &Sender<AppEvent>) -> Result<bool> {
        let Event::Key(key_event) = event else {
            return Ok(false);
        };

        if !self.active {
            if key_event.code == KeyCode::Char(':') {
                self.active = true;
                return Ok(true);
            }
            return Ok(false);
        }

        match key_event.code {
            KeyCode::Esc => {
                self.active = false;
                self.input.reset();
            }

            KeyCode::Enter => {
                let buffer = self.input.value().trim().to_string();
                self.input.reset();
                self.active = false;

                if !buffer.is_empty() {
                    event_tx.send(parse_command(&buffer))?;
                }
            }

            // Delegate everything else to the managed input component.
            _ => {
                self.input.handle_event(event);
            }
        }

        Ok(true)
    }
}

pub(crate) fn parse_command(buffer: &str) -> AppEvent {
    let (command, rest) = buffer
        .split_once(char::is_whitespace)
        .map(|(c, r)| (c, r.trim()))
        .unwrap_or((buffer, ""));

    match (command, rest) {
        ("q", "") => AppEvent::ExitApplication,

        ("hash", fragment) => AppEvent::HashChanged(fragment.to_string()),
        ("back", "") => AppEvent::NavigateBack,

        ("upload", "") => AppEvent::Error("usage: upload <path>...".into()),
        ("upload", paths) => AppEvent::UploadRequested(parse_pasted_paths(paths)),

        ("stop", "") => AppEvent::StopRequested,
        ("refresh", "") => AppEvent::RefreshRequested,

        ("vol", level) => match level.parse::<u8>() {
            Ok(level) if level <= 100 => AppEvent::SetVolumeRequested(level),
            _ => AppEvent::Error(format!("invalid volume: {:?}", level)),
        },

        (cmd, _) => AppEvent::Error(format!("unknown command: {}", cmd)),
    }
}

#[cfg(test)]
mod tests {
    use std::{path::PathBuf, sync::mpsc};

    use crossterm::event::{KeyEvent, KeyModifiers};

    use super::*;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn parses_commands() {
        assert!(matches!(parse_command("q"), AppEvent::ExitApplication));
        assert!(matches!(parse_command("back"), AppEvent::NavigateBack));
        assert!(matches!(parse_command("vol 40"), AppEvent::SetVolumeRequested(40)));
        assert!(matches!(parse_command("vol 400"), AppEvent::Error(_)));
        assert!(matches!(parse_command("frobnicate"), AppEvent::Error(_)));

        match parse_command("hash filters=o:portrait") {
            AppEvent::HashChanged(fragment) => assert_eq!(fragment, "filters=o:portrait"),
            other => panic!("unexpected {:?}", other),
        }

        match parse_command("hash") {
            AppEvent::HashChanged(fragment) => assert!(fragment.is_empty()),
            other => panic!("unexpected {:?}", other),
        }

        match parse_command("upload /roms/a.zip /roms/b.7z") {
            AppEvent::UploadRequested(paths) => assert_eq!(
                paths,
                vec![PathBuf::from("/roms/a.zip"), PathBuf::from("/roms/b.7z")]
            ),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn submits_and_leaves_command_mode() {
        let (event_tx, event_rx) = mpsc::channel();
        let mut commander = Commander::new();

        assert!(!commander.handle_event(&key(KeyCode::Char('x')), &event_tx).unwrap());
        assert!(commander.handle_event(&key(KeyCode::Char(':')), &event_tx).unwrap());
        assert!(commander.active());

        commander.handle_event(&key(KeyCode::Char('q')), &event_tx).unwrap();
        commander.handle_event(&key(KeyCode::Enter), &event_tx).unwrap();

        assert!(!commander.active());
        assert!(matches!(event_rx.try_recv().unwrap(), AppEvent::ExitApplication));
    }

    #[test]
    fn escape_discards_the_buffer() {
        let (event_tx, event_rx) = mpsc::channel();
        let mut commander = Commander::new();

        commander.handle_event(&key(KeyCode::Char(':')), &event_tx).unwrap();
        commander.handle_event(&key(KeyCode::Char('q')), &event_tx).unwrap();
        commander.handle_event(&key(KeyCode::Esc), &event_tx).unwrap();

        assert!(!commander.active());
        assert_eq!(commander.input.value(), "");
        assert!(event_rx.try_recv().is_err());
    }
}
