//! Layout and balance properties
//!
//! The game is configured from a flat `key=value` store (Java properties
//! syntax). Room layouts are keyed `<objectType>.<roomName>` and hold
//! semicolon-separated coordinate lists; the literal value `0` means the room
//! has no object of that type. Everything is parsed once before play begins,
//! so any malformed value is a fatal startup error.

use std::collections::BTreeMap;
use std::path::Path;

use glam::Vec2;
use thiserror::Error;

use crate::sim::RoomId;

/// Errors raised while reading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing property '{0}'")]
    MissingKey(String),

    #[error("property '{key}' is not a valid number: '{value}'")]
    InvalidNumber { key: String, value: String },

    #[error("property '{key}' has malformed coordinates: '{value}'")]
    InvalidCoords { key: String, value: String },

    #[error("property '{key}' names an unknown room: '{value}'")]
    UnknownRoom { key: String, value: String },

    #[error("room '{room}' is missing its {what}")]
    MissingLayout { room: &'static str, what: &'static str },

    #[error("player start {pos} overlaps a door in room '{room}'")]
    StartBlocked { room: &'static str, pos: String },

    #[error("failed to read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Sentinel meaning "no such object in this room"
pub const NONE_SENTINEL: &str = "0";

/// A door entry: where it stands and which room it leads to
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DoorSpec {
    pub pos: Vec2,
    pub to: RoomId,
}

/// A treasure chest entry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChestSpec {
    pub pos: Vec2,
    pub coins: u32,
}

/// Parsed key-value property store
#[derive(Debug, Clone, Default)]
pub struct GameProps {
    values: BTreeMap<String, String>,
}

impl GameProps {
    /// Parse properties text. Lines starting with `#` or `!` are comments.
    pub fn parse(text: &str) -> Self {
        let mut values = BTreeMap::new();
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
                continue;
            }
            let Some(split) = line.find(|c: char| c == '=' || c == ':') else {
                continue;
            };
            let (key, value) = line.split_at(split);
            values.insert(key.trim().to_string(), value[1..].trim().to_string());
        }
        Self { values }
    }

    /// Load and parse a properties file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let props = Self::parse(&text);
        log::info!("Loaded {} properties from {}", props.len(), path.display());
        Ok(props)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Insert or replace a property
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn require(&self, key: &str) -> Result<&str> {
        self.get(key)
            .ok_or_else(|| ConfigError::MissingKey(key.to_string()))
    }

    pub fn f32(&self, key: &str) -> Result<f32> {
        parse_number(key, self.require(key)?)
    }

    pub fn u32(&self, key: &str) -> Result<u32> {
        let value = self.require(key)?;
        value.parse().map_err(|_| ConfigError::InvalidNumber {
            key: key.to_string(),
            value: value.to_string(),
        })
    }

    /// `f32` with a fallback when the key is absent (present but malformed is still an error)
    pub fn f32_or(&self, key: &str, default: f32) -> Result<f32> {
        match self.get(key) {
            Some(value) => parse_number(key, value),
            None => Ok(default),
        }
    }

    pub fn point(&self, key: &str) -> Result<Vec2> {
        parse_point(key, self.require(key)?)
    }

    /// Layout value for `<object>.<room>`, `None` if absent or the `0` sentinel
    pub fn layout(&self, object: &str, room: RoomId) -> Option<(String, &str)> {
        let key = format!("{object}.{}", room.config_name());
        let value = self.get(&key)?;
        if value == NONE_SENTINEL || value.is_empty() {
            return None;
        }
        Some((key, value))
    }

    /// All points listed under `<object>.<room>`
    pub fn points(&self, object: &str, room: RoomId) -> Result<Vec<Vec2>> {
        match self.layout(object, room) {
            Some((key, value)) => parse_point_list(&key, value),
            None => Ok(Vec::new()),
        }
    }

    /// A door entry `x,y,destination` under `<object>.<room>`
    pub fn door(&self, object: &str, room: RoomId) -> Result<Option<DoorSpec>> {
        let Some((key, value)) = self.layout(object, room) else {
            return Ok(None);
        };
        let fields: Vec<&str> = value.split(',').map(str::trim).collect();
        if fields.len() != 3 {
            return Err(ConfigError::InvalidCoords {
                key,
                value: value.to_string(),
            });
        }
        let pos = parse_point(&key, &format!("{},{}", fields[0], fields[1]))?;
        let to = RoomId::from_config_name(fields[2]).ok_or_else(|| ConfigError::UnknownRoom {
            key: key.clone(),
            value: fields[2].to_string(),
        })?;
        Ok(Some(DoorSpec { pos, to }))
    }

    /// Treasure chests `x,y,coins;...` under `<object>.<room>`
    pub fn chests(&self, object: &str, room: RoomId) -> Result<Vec<ChestSpec>> {
        let Some((key, value)) = self.layout(object, room) else {
            return Ok(Vec::new());
        };
        value
            .split(';')
            .filter(|entry| !entry.trim().is_empty())
            .map(|entry| {
                let fields: Vec<&str> = entry.split(',').map(str::trim).collect();
                if fields.len() != 3 {
                    return Err(ConfigError::InvalidCoords {
                        key: key.clone(),
                        value: entry.to_string(),
                    });
                }
                let pos = parse_point(&key, &format!("{},{}", fields[0], fields[1]))?;
                let coins = fields[2].parse::<f32>().map_err(|_| ConfigError::InvalidNumber {
                    key: key.clone(),
                    value: fields[2].to_string(),
                })?;
                if coins < 0.0 {
                    return Err(ConfigError::InvalidNumber {
                        key: key.clone(),
                        value: fields[2].to_string(),
                    });
                }
                Ok(ChestSpec {
                    pos,
                    coins: coins.round() as u32,
                })
            })
            .collect()
    }
}

fn parse_number(key: &str, value: &str) -> Result<f32> {
    value
        .trim()
        .parse::<f32>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ConfigError::InvalidNumber {
            key: key.to_string(),
            value: value.to_string(),
        })
}

/// Parse `"x,y"`; any trailing fields (e.g. a door destination) are ignored
pub fn parse_point(key: &str, value: &str) -> Result<Vec2> {
    let invalid = || ConfigError::InvalidCoords {
        key: key.to_string(),
        value: value.to_string(),
    };
    let mut fields = value.split(',').map(str::trim);
    let x = fields.next().and_then(|f| f.parse::<f32>().ok()).ok_or_else(invalid)?;
    let y = fields.next().and_then(|f| f.parse::<f32>().ok()).ok_or_else(invalid)?;
    if !x.is_finite() || !y.is_finite() {
        return Err(invalid());
    }
    Ok(Vec2::new(x, y))
}

/// Parse `"x,y;x,y;..."`
pub fn parse_point_list(key: &str, value: &str) -> Result<Vec<Vec2>> {
    value
        .split(';')
        .filter(|entry| !entry.trim().is_empty())
        .map(|entry| parse_point(key, entry))
        .collect()
}
