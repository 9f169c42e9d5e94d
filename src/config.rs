// Copyright (c) Addison Crump, 2025, licensed under the EUPL-1.2-or-later.

//! Board configuration and the JSON layout loader.
//!
//! A layout file maps vehicle names to `[length, [row, column], orientation]`, with orientation
//! `0` for vertical and `1` for horizontal vehicles:
//!
//! ```json
//! { "R": [2, [3, 0], 1], "B": [3, [0, 2], 0] }
//! ```
//!
//! Loading is permissive: an entry which cannot describe a vehicle is skipped with a warning
//! rather than failing the whole file. Entries are admitted in file order.

use std::ops::DerefMut;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::{Board, BoardValue, Exit, LayoutError, Orientation, State, Vehicle};

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A configuration or layout file could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    FileRead {
        /// The file.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The file is not valid JSON of the expected shape.
    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The board geometry is unusable.
    #[error("invalid board geometry: {0}")]
    Layout(#[from] LayoutError<u8>),

    /// A configuration value is out of range.
    #[error("config validation error: {0}")]
    Validation(String),
}

/// The reason a single layout entry was skipped.
#[derive(Debug, Error)]
pub enum RecordError {
    /// The name is not exactly one character of the alphabet.
    #[error("{0:?} is not a single character of the vehicle alphabet")]
    Name(String),

    /// The entry does not have the shape `[length, [row, column], orientation]`.
    #[error("expected [length, [row, column], orientation]: {0}")]
    Shape(#[source] serde_json::Error),

    /// The length is outside the permitted range.
    #[error("length {0} is outside the permitted range")]
    Length(i64),

    /// The orientation is neither `0` nor `1`.
    #[error("orientation {0} is neither 0 (vertical) nor 1 (horizontal)")]
    Orientation(i64),

    /// The head position cannot be expressed as board coordinates.
    #[error("head position ({0}, {1}) cannot be placed on a board")]
    Position(i64, i64),
}

/// One layout entry: `[length, [row, column], orientation]`.
#[derive(Debug, Deserialize)]
struct VehicleRecord(i64, [i64; 2], i64);

/// The geometry of the board and the rules for the vehicles placed on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// The number of rows of the grid.
    pub rows: u8,
    /// The number of columns of the grid.
    pub columns: u8,
    /// The row whose right edge holds the exit.
    pub exit_row: u8,
    /// The vehicle which must reach the exit.
    pub target: char,
    /// The characters vehicles may be named with.
    pub alphabet: String,
    /// The shortest permitted vehicle.
    pub min_length: u8,
    /// The longest permitted vehicle.
    pub max_length: u8,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: 7,
            columns: 7,
            exit_row: 3,
            target: 'R',
            alphabet: "YBOGWR".to_owned(),
            min_length: 2,
            max_length: 4,
        }
    }
}

impl GameConfig {
    /// Load a configuration from a JSON file. Missing fields take their default values.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = read(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        tracing::info!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Validate configuration values. The board geometry itself is checked by [`Self::state`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.alphabet.is_empty() {
            return Err(ConfigError::Validation(
                "the vehicle alphabet must not be empty".into(),
            ));
        }
        if !self.alphabet.contains(self.target) {
            return Err(ConfigError::Validation(format!(
                "target {} is not part of the vehicle alphabet {:?}",
                self.target, self.alphabet
            )));
        }
        if self.min_length < 2 || self.min_length > self.max_length {
            return Err(ConfigError::Validation(format!(
                "vehicle lengths {}..={} are not a usable range",
                self.min_length, self.max_length
            )));
        }
        Ok(())
    }

    /// An empty state with this geometry.
    pub fn state(&self) -> Result<State<u8>, ConfigError> {
        Ok(State::empty(
            (self.rows, self.columns),
            Exit::new(self.exit_row, self.target),
        )?)
    }

    /// Convert one layout entry into a vehicle.
    pub fn record_to_vehicle(&self, name: &str, value: Value) -> Result<Vehicle<u8>, RecordError> {
        let mut chars = name.chars();
        let id = match (chars.next(), chars.next()) {
            (Some(id), None) if self.alphabet.contains(id) => id,
            _ => return Err(RecordError::Name(name.to_owned())),
        };

        let VehicleRecord(length, [row, column], orientation) =
            serde_json::from_value(value).map_err(RecordError::Shape)?;
        let length = u8::try_from(length)
            .ok()
            .filter(|length| (self.min_length..=self.max_length).contains(length))
            .ok_or(RecordError::Length(length))?;
        let orientation = match orientation {
            0 => Orientation::UpDown,
            1 => Orientation::LeftRight,
            other => return Err(RecordError::Orientation(other)),
        };
        let head = u8::try_from(row)
            .ok()
            .zip(u8::try_from(column).ok())
            .ok_or(RecordError::Position(row, column))?;

        Vehicle::new(id, length, head, orientation).ok_or(RecordError::Position(row, column))
    }
}

/// Parse a layout, skipping every entry which does not describe a vehicle.
pub fn parse_layout(json: &str, config: &GameConfig) -> Result<Vec<Vehicle<u8>>, ConfigError> {
    let entries: Map<String, Value> = serde_json::from_str(json)?;
    Ok(entries
        .into_iter()
        .filter_map(|(name, value)| {
            config
                .record_to_vehicle(&name, value)
                .inspect_err(|err| tracing::warn!(%name, %err, "skipping layout entry"))
                .ok()
        })
        .collect())
}

fn read(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|source| ConfigError::FileRead {
        path: path.to_path_buf(),
        source,
    })
}

/// Read and parse the layout file at `path`.
pub fn load_layout(path: &Path, config: &GameConfig) -> Result<Vec<Vehicle<u8>>, ConfigError> {
    let content = read(path)?;
    let vehicles = parse_layout(&content, config)?;
    tracing::info!(path = %path.display(), vehicles = vehicles.len(), "loaded layout");
    Ok(vehicles)
}

/// Admit each vehicle to the board, skipping (and logging) those the board rejects. Returns the
/// number of vehicles admitted.
pub fn admit_all<R, V>(
    board: &mut Board<R, V>,
    vehicles: impl IntoIterator<Item = Vehicle<V>>,
) -> usize
where
    R: DerefMut<Target = State<V>>,
    V: BoardValue,
{
    let mut admitted = 0;
    for vehicle in vehicles {
        let id = vehicle.id();
        match board.add_vehicle(vehicle) {
            Ok(_) => admitted += 1,
            Err(err) => tracing::warn!(%id, %err, "skipping vehicle"),
        }
    }
    admitted
}
