//! Serializable views of a board and a game, exchanged with persistence.
//!
//! A board snapshot serializes as a map from notation to piece, e.g.
//! `{"e1": {"kind": "King", "side": "White"}}`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::coord::Coordinate;
use crate::game::GamePhase;
use crate::types::{Piece, PieceKind, Side};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BoardSnapshot(BTreeMap<Coordinate, Piece>);

impl BoardSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place a piece, returning whatever was listed on that cell before.
    pub fn insert(&mut self, c: Coordinate, piece: Piece) -> Option<Piece> {
        self.0.insert(c, piece)
    }

    pub fn get(&self, c: Coordinate) -> Option<Piece> {
        self.0.get(&c).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Coordinate, Piece)> + '_ {
        self.0.iter().map(|(&c, &p)| (c, p))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Notation-keyed view for presentation: `"e2" -> (White, Pawn)`.
    pub fn by_notation(&self) -> BTreeMap<String, (Side, PieceKind)> {
        self.iter()
            .map(|(c, p)| (c.to_notation(), (p.side, p.kind)))
            .collect()
    }
}

impl FromIterator<(Coordinate, Piece)> for BoardSnapshot {
    fn from_iter<I: IntoIterator<Item = (Coordinate, Piece)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Everything needed to resume a game without its move history.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub board: BoardSnapshot,
    pub phase: GamePhase,
}
