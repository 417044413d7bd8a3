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

//! Collects and validates files before they are handed to the upload call.

use std::{
    path::{Path, PathBuf},
    sync::LazyLock,
};

use regex::Regex;
use walkdir::WalkDir;

use crate::remote::{RemoteError, RemoteResult};

pub(crate) const MAX_UPLOAD_FILES: usize = 5;

const ALLOWED_EXTENSIONS: [&str; 2] = ["zip", "7z"];

static FILE_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9]+\.[A-Za-z0-9]{1,7}$").expect("valid regex"));

/// Splits pasted text into candidate paths. Terminals paste dropped files
/// either one per line or space separated, optionally quoted or as
/// `file://` URLs.
pub(crate) fn parse_pasted_paths(text: &str) -> Vec<PathBuf> {
    let mut paths = Vec::new();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let tokens: Vec<&str> = if line.starts_with(['\'', '"']) || Path::new(line).exists() {
            vec![line]
        } else {
            line.split_whitespace().collect()
        };

        for token in tokens {
            let token = token.trim_matches(|c| c == '\'' || c == '"');
            let token = token.strip_prefix("file://").unwrap_or(token);
            let decoded = urlencoding::decode(token)
                .map(|d| d.into_owned())
                .unwrap_or_else(|_| token.to_string());

            if !decoded.is_empty() {
                paths.push(PathBuf::from(decoded));
            }
        }
    }

    paths
}

/// Expands directories and validates every file, returning the final list in
/// a stable order.
pub(crate) fn collect_uploads(paths: &[PathBuf]) -> RemoteResult<Vec<PathBuf>> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_dir() {
            let mut found: Vec<PathBuf> = WalkDir::new(path)
                .into_iter()
                .filter_map(Result::ok)
                .filter(|e| e.file_type().is_file())
                .map(|e| e.into_path())
                .collect();
            found.sort();
            files.extend(found);
        } else {
            files.push(path.clone());
        }
    }

    validate(&files)?;
    Ok(files)
}

pub(crate) fn validate(files: &[PathBuf]) -> RemoteResult<()> {
    if files.is_empty() {
        return Err(RemoteError::InvalidUpload("no files to upload".into()));
    }

    if files.len() > MAX_UPLOAD_FILES {
        return Err(RemoteError::InvalidUpload(format!(
            "at most {} files per upload, got {}",
            MAX_UPLOAD_FILES,
            files.len()
        )));
    }

    for file in files {
        let name = file
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default();

        if !FILE_NAME.is_match(&name) {
            return Err(RemoteError::InvalidUpload(format!(
                "invalid file name: {:?}",
                name
            )));
        }

        let extension = file
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
            return Err(RemoteError::InvalidUpload(format!(
                "unsupported file type: {}",
                name
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths(names: &[&str]) -> Vec<PathBuf> {
        names.iter().map(PathBuf::from).collect()
    }

    #[test]
    fn accepts_archives() {
        assert!(validate(&paths(&["/roms/sf2.zip", "/roms/dkong.7z"])).is_ok());
    }

    #[test]
    fn rejects_too_many_files() {
        let files = paths(&["a.zip", "b.zip", "c.zip", "d.zip", "e.zip", "f.zip"]);
        assert!(matches!(validate(&files), Err(RemoteError::InvalidUpload(_))));
    }

    #[test]
    fn rejects_bad_names_and_extensions() {
        assert!(validate(&paths(&["street fighter.zip"])).is_err());
        assert!(validate(&paths(&["sf2.tar.gz"])).is_err());
        assert!(validate(&paths(&["readme.txt"])).is_err());
        assert!(validate(&[]).is_err());
    }

    #[test]
    fn parses_pasted_file_urls() {
        let pasted = "file:///home/me/roms/sf2.zip\n'/home/me/roms/my%20game.7z'\n";
        assert_eq!(
            parse_pasted_paths(pasted),
            paths(&["/home/me/roms/sf2.zip", "/home/me/roms/my game.7z"])
        );
    }

    #[test]
    fn splits_space_separated_paste() {
        assert_eq!(
            parse_pasted_paths("/tmp/a.zip /tmp/b.zip"),
            paths(&["/tmp/a.zip", "/tmp/b.zip"])
        );
    }
}
