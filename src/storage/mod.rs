//! Roster loading and bracket persistence.
//!
//! Rosters come from a JSON file holding either bare player names or full
//! player records; generated brackets are written back out as pretty JSON.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::models::{Player, PlayerId, Round};

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),
}

/// Typed reader for a JSON file holding an array of entities.
pub struct JsonReader<T> {
    path: PathBuf,
    _marker: PhantomData<T>,
}

impl<T: DeserializeOwned> JsonReader<T> {
    /// Create a new JSON reader for the given path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _marker: PhantomData,
        }
    }

    /// Check if the file exists.
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Read all entities from the file.
    pub fn read_all(&self) -> Result<Vec<T>, StorageError> {
        if !self.path.exists() {
            return Err(StorageError::PathNotFound(self.path.clone()));
        }

        let file = File::open(&self.path)?;
        let entities: Vec<T> = serde_json::from_reader(BufReader::new(file))?;

        debug!("Read {} entities from {:?}", entities.len(), self.path);
        Ok(entities)
    }
}

/// Typed writer for a JSON file holding an array of entities.
pub struct JsonWriter<T> {
    path: PathBuf,
    _marker: PhantomData<T>,
}

impl<T: Serialize> JsonWriter<T> {
    /// Create a new JSON writer for the given path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _marker: PhantomData,
        }
    }

    /// Ensure the parent directory exists.
    fn ensure_dir(&self) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(())
    }

    /// Write entities, replacing the entire file.
    pub fn write_all(&self, entities: &[T]) -> Result<usize, StorageError> {
        self.ensure_dir()?;

        let file = File::create(&self.path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, entities)?;
        writer.flush()?;

        info!("Wrote {} entities to {:?}", entities.len(), self.path);
        Ok(entities.len())
    }
}

/// One entry in a roster file: a bare name or a full record.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RosterEntry {
    Name(String),
    Record {
        name: String,
        #[serde(default)]
        id: Option<PlayerId>,
        #[serde(default)]
        historical_average: Option<f64>,
        #[serde(default = "default_show_odds")]
        show_odds: bool,
    },
}

fn default_show_odds() -> bool {
    true
}

/// Load the roster, assigning missing ids by position.
pub fn load_roster(path: &Path) -> Result<Vec<Player>, StorageError> {
    let entries: Vec<RosterEntry> = JsonReader::new(path).read_all()?;

    let roster: Vec<Player> = entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| match entry {
            RosterEntry::Name(name) => Player::new(index as PlayerId, name),
            RosterEntry::Record {
                name,
                id,
                historical_average,
                show_odds,
            } => Player {
                id: id.unwrap_or(index as PlayerId),
                name,
                historical_average,
                show_odds,
            },
        })
        .collect();

    info!("Loaded {} players from {:?}", roster.len(), path);
    Ok(roster)
}

/// Write generated rounds as pretty JSON.
pub fn write_brackets(path: &Path, rounds: &[Round]) -> Result<(), StorageError> {
    JsonWriter::new(path).write_all(rounds)?;
    Ok(())
}

/// Read previously generated rounds back in.
pub fn read_brackets(path: &Path) -> Result<Vec<Round>, StorageError> {
    JsonReader::new(path).read_all()
}
