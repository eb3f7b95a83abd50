//! Quoridor rules engine.
//!
//! # Board Layout
//!
//! ```text
//!        x=0 x=1 x=2 x=3 x=4 x=5 x=6 x=7 x=8
//!   y=0   .   .   .   .   1   .   .   .   .    <- Player One starts here
//!   y=1   .   .   .   .   .   .   .   .   .
//!   ...
//!   y=7   .   .   .   .   .   .   .   .   .
//!   y=8   .   .   .   .   2   .   .   .   .    <- Player Two starts here
//! ```
//!
//! Player One wins by reaching y=8, Player Two by reaching y=0.
//!
//! # Fence Anchors
//!
//! A fence is named by the cell it is anchored on. It cuts exactly one edge:
//!
//! ```text
//! Vertical at (x,y):    (x-1,y) | (x,y)
//!
//! Horizontal at (x,y):  (x,y-1)
//!                       -------
//!                       (x,y)
//! ```
//!
//! That is why vertical fences cannot be anchored on x=0 and horizontal
//! fences cannot be anchored on y=0.

pub mod board;
pub mod game;
pub mod notation;
pub mod path;
pub mod rules;

#[cfg(feature = "wasm")]
pub mod wasm;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use board::{Board, BoardError, Cell};
pub use game::{Game, Rejection};
pub use notation::NotationError;
pub use rules::{JumpRule, Rules};

/// Width and height of the board.
pub const BOARD_SIZE: i32 = 9;

/// Fences each player starts with.
pub const FENCES_PER_PLAYER: u8 = 10;

/// Player identifier.
///
/// Serialized as the integers 1 and 2.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
#[repr(u8)]
pub enum Player {
    One = 1,
    Two = 2,
}

/// A player number other than 1 or 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid player {0}, expected 1 or 2")]
pub struct InvalidPlayer(pub u8);

impl Player {
    /// Get the opponent player.
    #[inline]
    pub fn opponent(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// Convert from u8 (1 or 2) to Player.
    #[inline]
    pub fn from_bits(bits: u8) -> Option<Player> {
        match bits {
            1 => Some(Player::One),
            2 => Some(Player::Two),
            _ => None,
        }
    }

    /// Zero-based index for per-player arrays.
    #[inline]
    pub fn index(self) -> usize {
        self as usize - 1
    }

    /// Where this player's pawn starts.
    pub fn start(self) -> Coord {
        match self {
            Player::One => Coord::new(4, 0),
            Player::Two => Coord::new(4, BOARD_SIZE - 1),
        }
    }

    /// The row this player must reach, which is the opponent's starting row.
    #[inline]
    pub fn goal_row(self) -> i32 {
        self.opponent().start().y
    }

    /// The baseline cells this player is racing towards.
    pub fn baseline(self) -> impl Iterator<Item = Coord> {
        let y = self.goal_row();
        (0..BOARD_SIZE).map(move |x| Coord::new(x, y))
    }

    /// Both players, One first.
    pub fn all() -> impl Iterator<Item = Player> {
        [Player::One, Player::Two].into_iter()
    }
}

impl From<Player> for u8 {
    fn from(player: Player) -> u8 {
        player as u8
    }
}

impl TryFrom<u8> for Player {
    type Error = InvalidPlayer;

    fn try_from(bits: u8) -> Result<Self, Self::Error> {
        Player::from_bits(bits).ok_or(InvalidPlayer(bits))
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", *self as u8)
    }
}

/// A board coordinate.
///
/// Axes are signed so callers can name off-board squares; the engine rejects
/// them rather than the type making them unrepresentable.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Coord {
        Coord { x, y }
    }

    /// Check that both axes lie in 0..=8.
    #[inline]
    pub fn on_board(self) -> bool {
        (0..BOARD_SIZE).contains(&self.x) && (0..BOARD_SIZE).contains(&self.y)
    }

    /// Offset by (dx, dy). The result may be off the board.
    #[inline]
    pub fn offset(self, dx: i32, dy: i32) -> Coord {
        Coord::new(self.x + dx, self.y + dy)
    }

    /// The orthogonal neighbors in up, left, right, down order, clipped to the board.
    pub fn orthogonal(self) -> impl Iterator<Item = Coord> {
        [(0, -1), (-1, 0), (1, 0), (0, 1)]
            .into_iter()
            .map(move |(dx, dy)| self.offset(dx, dy))
            .filter(|c| c.on_board())
    }

    /// Iterate over all 81 coordinates in row-major order.
    pub fn all() -> impl Iterator<Item = Coord> {
        (0..BOARD_SIZE).flat_map(|y| (0..BOARD_SIZE).map(move |x| Coord::new(x, y)))
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

/// Fence orientation.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Vertical,
    Horizontal,
}

impl Orientation {
    /// The cell a fence anchored at `anchor` separates from the anchor.
    #[inline]
    pub fn paired(self, anchor: Coord) -> Coord {
        match self {
            Orientation::Vertical => anchor.offset(-1, 0),
            Orientation::Horizontal => anchor.offset(0, -1),
        }
    }

    /// Both orientations.
    pub fn all() -> impl Iterator<Item = Orientation> {
        [Orientation::Vertical, Orientation::Horizontal].into_iter()
    }
}

/// A single turn: either a pawn move or a fence placement.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Action {
    /// Move the pawn to a destination cell.
    Move { to: Coord },
    /// Place a fence at an anchor.
    Fence { orientation: Orientation, anchor: Coord },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_opponent() {
        assert_eq!(Player::One.opponent(), Player::Two);
        assert_eq!(Player::Two.opponent(), Player::One);
    }

    #[test]
    fn test_player_bits() {
        assert_eq!(Player::from_bits(1), Some(Player::One));
        assert_eq!(Player::from_bits(2), Some(Player::Two));
        assert_eq!(Player::from_bits(0), None);
        assert_eq!(Player::from_bits(3), None);
        assert_eq!(Player::try_from(7), Err(InvalidPlayer(7)));
    }

    #[test]
    fn test_player_goal_rows() {
        assert_eq!(Player::One.goal_row(), 8);
        assert_eq!(Player::Two.goal_row(), 0);
        assert_eq!(Player::One.baseline().count(), 9);
        assert!(Player::Two.baseline().all(|c| c.y == 0));
    }

    #[test]
    fn test_player_serde_as_integer() {
        assert_eq!(serde_json::to_string(&Player::Two).unwrap(), "2");
        let p: Player = serde_json::from_str("1").unwrap();
        assert_eq!(p, Player::One);
        assert!(serde_json::from_str::<Player>("3").is_err());
    }

    #[test]
    fn test_coord_bounds() {
        assert!(Coord::new(0, 0).on_board());
        assert!(Coord::new(8, 8).on_board());
        assert!(!Coord::new(-1, 4).on_board());
        assert!(!Coord::new(4, 9).on_board());
        assert_eq!(Coord::all().count(), 81);
    }

    #[test]
    fn test_coord_orthogonal_order() {
        let around: Vec<Coord> = Coord::new(4, 4).orthogonal().collect();
        assert_eq!(
            around,
            vec![Coord::new(4, 3), Coord::new(3, 4), Coord::new(5, 4), Coord::new(4, 5)]
        );
        assert_eq!(Coord::new(0, 0).orthogonal().count(), 2);
        assert_eq!(Coord::new(0, 4).orthogonal().count(), 3);
    }

    #[test]
    fn test_orientation_paired() {
        let a = Coord::new(3, 3);
        assert_eq!(Orientation::Vertical.paired(a), Coord::new(2, 3));
        assert_eq!(Orientation::Horizontal.paired(a), Coord::new(3, 2));
    }

    #[test]
    fn test_action_json_shape() {
        let fence = Action::Fence {
            orientation: Orientation::Vertical,
            anchor: Coord::new(3, 3),
        };
        let json = serde_json::to_value(fence).unwrap();
        assert_eq!(json["type"], "fence");
        assert_eq!(json["orientation"], "vertical");
        assert_eq!(json["anchor"]["x"], 3);
    }
}
