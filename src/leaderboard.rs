use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub name: String,
    pub score: u32,
}

/// The JSON leaderboard file: a plain list of `{name, score}` in play order.
///
/// Once the list reaches `capacity` after an append it is wiped to `[]`.
/// The list is not a rolling top-N.
#[derive(Debug, Clone)]
pub struct Leaderboard {
    entries: Vec<ScoreEntry>,
    path: PathBuf,
    capacity: usize,
}

impl Leaderboard {
    /// Reads the board at `path`. A missing or unreadable file is an empty board.
    pub fn load(path: impl Into<PathBuf>, capacity: usize) -> Self {
        let path = path.into();
        let entries = read_entries(&path);
        Self {
            entries,
            path,
            capacity: capacity.max(1),
        }
    }

    /// Appends a finished round and writes the file.
    pub fn record(&mut self, name: &str, score: u32) -> io::Result<()> {
        self.entries.push(ScoreEntry {
            name: name.to_string(),
            score,
        });
        if self.entries.len() >= self.capacity {
            log::info!(
                "leaderboard reached {} entries, wiping {}",
                self.capacity,
                self.path.display()
            );
            self.entries.clear();
        }
        self.save()
    }

    /// Empties the board and writes `[]`.
    pub fn reset(&mut self) -> io::Result<()> {
        self.entries.clear();
        self.save()
    }

    pub fn save(&self) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(&self.entries)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(&self.path, json)
    }

    /// Entries in the order they were played.
    pub fn entries(&self) -> &[ScoreEntry] {
        &self.entries
    }

    /// Entries best-first; equal scores keep play order.
    pub fn ranked(&self) -> Vec<ScoreEntry> {
        let mut ranked = self.entries.clone();
        ranked.sort_by(|a, b| b.score.cmp(&a.score));
        ranked
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

fn read_entries(path: &Path) -> Vec<ScoreEntry> {
    let json = match fs::read_to_string(path) {
        Ok(json) => json,
        Err(e) => {
            if e.kind() != io::ErrorKind::NotFound {
                log::warn!("could not read leaderboard {}: {}", path.display(), e);
            }
            return Vec::new();
        }
    };
    match serde_json::from_str(&json) {
        Ok(entries) => entries,
        Err(e) => {
            log::warn!("ignoring malformed leaderboard {}: {}", path.display(), e);
            Vec::new()
        }
    }
}
