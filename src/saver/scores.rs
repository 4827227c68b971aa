/*
scores.rs

Copyright 2025 Hervé Quatremain

This file is part of Recallgrid.

Recallgrid is free software: you can redistribute it and/or modify it under the
terms of the GNU General Public License as published by the Free Software
Foundation, either version 3 of the License, or (at your option) any later
version.

Recallgrid is distributed in the hope that it will be useful, but WITHOUT ANY
WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR
A PARTICULAR PURPOSE. See the GNU General Public License for more details.

You should have received a copy of the GNU General Public License along with
Recallgrid. If not, see <https://www.gnu.org/licenses/>.

SPDX-License-Identifier: GPL-3.0-or-later
*/

//! Save and restore the score records.
//!
//! [`TextScoreStore`] appends the records to a text file, by using the format described in the
//! [`crate::score`] module.
//! [`MemoryScoreStore`] keeps the records in memory.

use log::debug;
use std::fs::{self, File, OpenOptions, remove_file};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::config::SCORE_FILE;
use crate::error::Result;
use crate::score::{ScoreRecord, parse_records};

/// Persistence of the score records.
///
/// Stores are owned by the engine, which can be moved to another thread.
pub trait ScoreStore: Send {
    /// Add a record after the existing ones.
    fn append(&mut self, record: &ScoreRecord) -> Result<()>;

    /// Return all the records, oldest first.
    fn read_all(&self) -> Result<Vec<ScoreRecord>>;
}

/// Object to save and restore score records in a text file.
pub struct TextScoreStore {
    /// Path to the score file.
    save_file: PathBuf,
}

impl TextScoreStore {
    /// Create a [`TextScoreStore`] object.
    ///
    /// The provided [`PathBuf`] is the path to the directory where the scores must be saved.
    pub fn new(mut data_dir: PathBuf) -> Self {
        data_dir.push(SCORE_FILE);
        Self::with_file(data_dir)
    }

    /// Create a [`TextScoreStore`] object that uses the given file.
    pub fn with_file(save_file: PathBuf) -> Self {
        debug!("Score file: {save_file:?}");
        Self { save_file }
    }

    /// Return the path to the score file.
    pub fn path(&self) -> &Path {
        &self.save_file
    }

    /// Delete the score file.
    pub fn delete_save(&self) {
        let _ = remove_file(&self.save_file);
    }
}

impl ScoreStore for TextScoreStore {
    fn append(&mut self, record: &ScoreRecord) -> Result<()> {
        if let Some(dir) = self.save_file.parent()
            && !dir.as_os_str().is_empty()
        {
            fs::create_dir_all(dir)?;
        }
        let file: File = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.save_file)?;
        let mut writer: BufWriter<File> = BufWriter::new(file);

        // A blank line separates the records
        writeln!(writer, "{record}")?;
        writer.flush()?;
        Ok(())
    }

    fn read_all(&self) -> Result<Vec<ScoreRecord>> {
        let content: String = match fs::read_to_string(&self.save_file) {
            Ok(c) => c,
            Err(error) => match error.kind() {
                ErrorKind::NotFound => return Ok(Vec::new()),
                _ => return Err(error.into()),
            },
        };
        parse_records(&content)
    }
}

/// Object to keep score records in memory.
#[derive(Debug, Default, Clone)]
pub struct MemoryScoreStore {
    records: Vec<ScoreRecord>,
}

impl MemoryScoreStore {
    /// Create a [`MemoryScoreStore`] object.
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScoreStore for MemoryScoreStore {
    fn append(&mut self, record: &ScoreRecord) -> Result<()> {
        self.records.push(*record);
        Ok(())
    }

    fn read_all(&self) -> Result<Vec<ScoreRecord>> {
        Ok(self.records.clone())
    }
}
