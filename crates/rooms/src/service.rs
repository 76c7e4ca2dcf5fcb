//! Room service: one game per room, persisted through a [`GameStore`].
//!
//! Every operation on a room holds that room's lock for its whole
//! load-apply-save cycle. Different rooms never wait on each other.

use chess_core::{
    BoardSnapshot, ChessError, EndReason, Game, GamePhase, GameStatus, Move, MoveOutcome, Piece,
    Side,
};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info, warn};

use crate::config::ServiceConfig;
use crate::error::{RoomError, RoomResult};
use crate::store::{validate_room_name, GameStore, StoredGame};

/// Result of an accepted move, as handed back to a transport layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveReport {
    pub mv: Move,
    pub moved: Piece,
    pub captured: Option<Piece>,
    /// Phase after the move; `Ended` when it took a king.
    pub phase: GamePhase,
}

impl MoveReport {
    fn new(outcome: &MoveOutcome, phase: GamePhase) -> Self {
        Self {
            mv: Move::new(outcome.from, outcome.to),
            moved: outcome.moved,
            captured: outcome.captured,
            phase,
        }
    }
}

pub struct RoomService<S: GameStore> {
    store: S,
    config: ServiceConfig,
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl<S: GameStore> RoomService<S> {
    pub fn new(store: S, config: ServiceConfig) -> Self {
        Self {
            store,
            config,
            locks: Mutex::new(HashMap::new()),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Create a room holding a not-yet-started game and return its code.
    pub fn create_room(&self) -> RoomResult<String> {
        let code = loop {
            let code = self.generate_code();
            if self.store.load(&code)?.is_none() {
                break code;
            }
        };
        self.open_room(&code)?;
        Ok(code)
    }

    /// Create the room `room` if it does not exist yet.
    pub fn open_room(&self, room: &str) -> RoomResult<()> {
        validate_room_name(room)?;
        self.locked(room, || {
            if self.store.load(room)?.is_none() {
                self.store.save(room, &StoredGame::default())?;
                info!(room, "room created");
            }
            Ok(())
        })
    }

    fn generate_code(&self) -> String {
        let mut rng = rand::thread_rng();
        (0..self.config.room_code_length.max(1))
            .map(|_| rng.gen_range(b'A'..=b'Z') as char)
            .collect()
    }

    pub fn rooms(&self) -> RoomResult<Vec<String>> {
        self.store.rooms()
    }

    pub fn delete_room(&self, room: &str) -> RoomResult<()> {
        self.locked(room, || {
            if !self.store.delete(room)? {
                return Err(RoomError::RoomNotFound(room.to_string()));
            }
            info!(room, "room deleted");
            Ok(())
        })
    }

    /// Start (or restart) the game in `room`.
    pub fn start(&self, room: &str) -> RoomResult<()> {
        self.update(room, |game, history| {
            game.start()?;
            history.clear();
            Ok(())
        })?;
        info!(room, "game started");
        Ok(())
    }

    /// Play a move given in rank-file notation for the side to move.
    pub fn submit_move(&self, room: &str, source: &str, target: &str) -> RoomResult<MoveReport> {
        let result = self.update(room, |game, history| {
            let outcome = game.submit_move(source, target)?;
            history.push(Move::new(outcome.from, outcome.to));
            Ok(MoveReport::new(&outcome, game.phase()))
        });
        match &result {
            Ok(report) => {
                debug!(room, mv = %report.mv, captured = ?report.captured, "move accepted");
                if let GamePhase::Ended { winner, .. } = report.phase {
                    info!(room, ?winner, "king captured, game over");
                }
            }
            Err(RoomError::Game(e)) => warn!(room, source, target, error = %e, "move rejected"),
            Err(e) => warn!(room, error = %e, "move failed"),
        }
        result
    }

    /// Stop a running game; the side ahead on material wins.
    pub fn end(&self, room: &str) -> RoomResult<GamePhase> {
        let phase = self.update(room, |game, _| game.end())?;
        info!(room, ?phase, "game stopped");
        Ok(phase)
    }

    pub fn board(&self, room: &str) -> RoomResult<BoardSnapshot> {
        self.view(room, Game::board_snapshot)
    }

    pub fn turn(&self, room: &str) -> RoomResult<Option<Side>> {
        self.view(room, Game::current_turn)
    }

    pub fn status(&self, room: &str) -> RoomResult<GameStatus> {
        self.view(room, Game::status)
    }

    pub fn history(&self, room: &str) -> RoomResult<Vec<Move>> {
        self.locked(room, || Ok(self.load(room)?.history))
    }

    /// Rebuild the room's game from its move log, replacing the stored
    /// snapshot. Useful when a snapshot was lost or hand-edited. The stored
    /// phase decides what is rebuilt; see [`replay_history`].
    pub fn replay(&self, room: &str) -> RoomResult<GameStatus> {
        self.locked(room, || {
            let stored = self.load(room)?;
            let game = replay_history(&stored).map_err(|source| {
                warn!(room, error = %source, "move history does not replay");
                RoomError::CorruptHistory {
                    room: room.to_string(),
                    source,
                }
            })?;
            let rebuilt = StoredGame {
                snapshot: game.snapshot(),
                history: stored.history,
            };
            self.store.save(room, &rebuilt)?;
            info!(room, moves = rebuilt.history.len(), "game replayed from history");
            Ok(game.status())
        })
    }

    /// Run `f` while holding the lock of `room`.
    ///
    /// Table entries only live while some caller holds or waits on them.
    fn locked<T>(&self, room: &str, f: impl FnOnce() -> RoomResult<T>) -> RoomResult<T> {
        validate_room_name(room)?;
        let lock = self.room_lock(room)?;
        let result = match lock.lock() {
            Ok(_guard) => f(),
            Err(_) => Err(RoomError::LockPoisoned(room.to_string())),
        };
        self.release_lock(room, lock);
        result
    }

    fn room_lock(&self, room: &str) -> RoomResult<Arc<Mutex<()>>> {
        Ok(self
            .lock_table()?
            .entry(room.to_string())
            .or_default()
            .clone())
    }

    fn release_lock(&self, room: &str, lock: Arc<Mutex<()>>) {
        let Ok(mut locks) = self.lock_table() else {
            return;
        };
        // Clones are only handed out under the table lock, so a count of two
        // (table and `lock`) means nobody else is waiting.
        let ours = locks.get(room).is_some_and(|l| Arc::ptr_eq(l, &lock));
        if ours && Arc::strong_count(&lock) == 2 {
            locks.remove(room);
        }
    }

    fn lock_table(&self) -> RoomResult<MutexGuard<'_, HashMap<String, Arc<Mutex<()>>>>> {
        self.locks
            .lock()
            .map_err(|_| RoomError::LockPoisoned("room table".to_string()))
    }

    fn load(&self, room: &str) -> RoomResult<StoredGame> {
        self.store
            .load(room)?
            .ok_or_else(|| RoomError::RoomNotFound(room.to_string()))
    }

    /// Run `f` on the room's game and persist the result. Nothing is saved
    /// when `f` fails.
    fn update<T>(
        &self,
        room: &str,
        f: impl FnOnce(&mut Game, &mut Vec<Move>) -> Result<T, ChessError>,
    ) -> RoomResult<T> {
        self.locked(room, || {
            let mut stored = self.load(room)?;
            let mut game = Game::from_snapshot(&stored.snapshot)?;

            let value = f(&mut game, &mut stored.history)?;
            stored.snapshot = game.snapshot();
            self.store.save(room, &stored)?;
            Ok(value)
        })
    }

    fn view<T>(&self, room: &str, f: impl FnOnce(&Game) -> T) -> RoomResult<T> {
        self.locked(room, || {
            let stored = self.load(room)?;
            Ok(f(&Game::from_snapshot(&stored.snapshot)?))
        })
    }
}

/// Rebuild the game `stored` describes by playing its history from the
/// initial position.
///
/// An unstarted game is returned as stored. The log only records moves, so a
/// game stopped with [`Game::end`] is stopped again after the replay.
pub fn replay_history(stored: &StoredGame) -> Result<Game, ChessError> {
    let phase = stored.snapshot.phase;
    if phase == GamePhase::NotStarted {
        return Game::from_snapshot(&stored.snapshot);
    }

    let mut game = Game::new();
    game.start()?;
    for &mv in &stored.history {
        game.play(mv)?;
    }
    if let GamePhase::Ended {
        reason: EndReason::Stopped,
        ..
    } = phase
    {
        if game.is_running() {
            game.end()?;
        }
    }
    Ok(game)
}

#[cfg(test)]
#[path = "service_tests.rs"]
mod service_tests;
