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

use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;

const APP_NAME: &str = "arcadectl";

/// The per-user data directory, created if missing.
pub(crate) fn data_dir() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("", "", APP_NAME).context("No home directory")?;
    let dir = dirs.data_dir().to_path_buf();
    fs::create_dir_all(&dir).with_context(|| format!("Failed to create {}", dir.display()))?;

    Ok(dir)
}
