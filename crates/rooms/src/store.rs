//! Game persistence.
//!
//! The room service only talks to storage through [`GameStore`], so the
//! engine never depends on where games live.

use chess_core::{Game, GameSnapshot, Move};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::{RoomError, RoomResult};

/// A persisted game: its current snapshot plus every move played since the
/// last `start`, in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredGame {
    pub snapshot: GameSnapshot,
    pub history: Vec<Move>,
}

impl StoredGame {
    pub fn new(game: &Game) -> Self {
        Self {
            snapshot: game.snapshot(),
            history: Vec::new(),
        }
    }
}

impl Default for StoredGame {
    fn default() -> Self {
        Self::new(&Game::new())
    }
}

/// Load and save games by room code.
pub trait GameStore: Send + Sync {
    /// `Ok(None)` when the room has never been saved.
    fn load(&self, room: &str) -> RoomResult<Option<StoredGame>>;

    fn save(&self, room: &str, game: &StoredGame) -> RoomResult<()>;

    /// Returns whether anything was deleted.
    fn delete(&self, room: &str) -> RoomResult<bool>;

    /// Codes of all stored rooms, sorted.
    fn rooms(&self) -> RoomResult<Vec<String>>;
}

impl<S: GameStore + ?Sized> GameStore for Box<S> {
    fn load(&self, room: &str) -> RoomResult<Option<StoredGame>> {
        (**self).load(room)
    }
    fn save(&self, room: &str, game: &StoredGame) -> RoomResult<()> {
        (**self).save(room, game)
    }
    fn delete(&self, room: &str) -> RoomResult<bool> {
        (**self).delete(room)
    }
    fn rooms(&self) -> RoomResult<Vec<String>> {
        (**self).rooms()
    }
}

/// Reject room codes that are empty or could escape a storage directory.
pub fn validate_room_name(room: &str) -> RoomResult<()> {
    let ok = !room.is_empty()
        && room
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if ok {
        Ok(())
    } else {
        Err(RoomError::InvalidRoomName(room.to_string()))
    }
}

/// Keeps games in process memory. Lost on exit.
#[derive(Debug, Default)]
pub struct MemoryStore {
    games: Mutex<HashMap<String, StoredGame>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn games(&self) -> RoomResult<std::sync::MutexGuard<'_, HashMap<String, StoredGame>>> {
        self.games
            .lock()
            .map_err(|_| RoomError::LockPoisoned("memory store".to_string()))
    }
}

impl GameStore for MemoryStore {
    fn load(&self, room: &str) -> RoomResult<Option<StoredGame>> {
        Ok(self.games()?.get(room).cloned())
    }

    fn save(&self, room: &str, game: &StoredGame) -> RoomResult<()> {
        validate_room_name(room)?;
        self.games()?.insert(room.to_string(), game.clone());
        Ok(())
    }

    fn delete(&self, room: &str) -> RoomResult<bool> {
        Ok(self.games()?.remove(room).is_some())
    }

    fn rooms(&self) -> RoomResult<Vec<String>> {
        let mut rooms: Vec<String> = self.games()?.keys().cloned().collect();
        rooms.sort();
        Ok(rooms)
    }
}

/// One pretty-printed JSON file per room: `<dir>/<ROOM>.json`.
#[derive(Debug, Clone)]
pub struct JsonDirStore {
    dir: PathBuf,
}

impl JsonDirStore {
    /// Use `dir`, creating it if needed.
    pub fn open(dir: impl Into<PathBuf>) -> RoomResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, room: &str) -> RoomResult<PathBuf> {
        validate_room_name(room)?;
        Ok(self.dir.join(format!("{room}.json")))
    }
}

impl GameStore for JsonDirStore {
    fn load(&self, room: &str) -> RoomResult<Option<StoredGame>> {
        let path = self.path(room)?;
        let contents = match fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_str(&contents)?))
    }

    fn save(&self, room: &str, game: &StoredGame) -> RoomResult<()> {
        let path = self.path(room)?;
        let json = serde_json::to_string_pretty(game)?;
        // Written beside the target, then renamed into place.
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn delete(&self, room: &str) -> RoomResult<bool> {
        match fs::remove_file(self.path(room)?) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    fn rooms(&self) -> RoomResult<Vec<String>> {
        let mut rooms = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                rooms.push(stem.to_string());
            }
        }
        rooms.sort();
        Ok(rooms)
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod store_tests;
