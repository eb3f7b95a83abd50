//! Game engine: turn order, pawn moves, fences and win detection.
//!
//! Every command is all-or-nothing. A rejected move or fence leaves the game
//! exactly as it was; an accepted one updates position or inventory, flips
//! the turn and (for moves) checks for a winner in one step.

use thiserror::Error;
use tracing::{debug, info};

use crate::board::{Board, BoardError, Cell};
use crate::path;
use crate::rules::{JumpRule, Rules};
use crate::{Action, Coord, Orientation, Player, FENCES_PER_PLAYER};

/// Why a move or fence was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("the game is already won")]
    GameOver,
    #[error("it is not player {0}'s turn")]
    NotYourTurn(Player),
    #[error("{0} is off the board")]
    OffBoard(Coord),
    #[error("{0} is occupied")]
    Occupied(Coord),
    #[error("{to} cannot be reached from {from}")]
    Unreachable { from: Coord, to: Coord },
    #[error("a {orientation:?} fence cannot be anchored at {anchor}")]
    EdgeAnchor { orientation: Orientation, anchor: Coord },
    #[error("player {0} has no fences left")]
    NoFencesLeft(Player),
    #[error("a {orientation:?} fence is already anchored at {anchor}")]
    DuplicateFence { orientation: Orientation, anchor: Coord },
    #[error("fence would leave player {0} with no path to the goal row")]
    PathBlocked(Player),
}

impl From<BoardError> for Rejection {
    fn from(err: BoardError) -> Self {
        match err {
            BoardError::OutOfBounds(coord) => Rejection::OffBoard(coord),
        }
    }
}

/// One game of Quoridor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Game {
    board: Board,
    pawns: [Coord; 2],
    fences_left: [u8; 2],
    turn: Player,
    vertical: Vec<Coord>,
    horizontal: Vec<Coord>,
    winner: Option<Player>,
    rules: Rules,
}

impl Game {
    /// A fresh game under the default (permissive) rules.
    pub fn new() -> Game {
        Game::with_rules(Rules::default())
    }

    /// A fresh game under the given rule variants.
    pub fn with_rules(rules: Rules) -> Game {
        let mut board = Board::new();
        for player in Player::all() {
            let placed = board.set_occupant(player.start(), Some(player));
            debug_assert!(placed.is_ok());
        }
        Game {
            board,
            pawns: [Player::One.start(), Player::Two.start()],
            fences_left: [FENCES_PER_PLAYER; 2],
            turn: Player::One,
            vertical: Vec::new(),
            horizontal: Vec::new(),
            winner: None,
            rules,
        }
    }

    // ========== Queries ==========

    #[inline]
    pub fn turn(&self) -> Player {
        self.turn
    }

    #[inline]
    pub fn is_won(&self) -> bool {
        self.winner.is_some()
    }

    #[inline]
    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    #[inline]
    pub fn position(&self, player: Player) -> Coord {
        self.pawns[player.index()]
    }

    #[inline]
    pub fn fences_left(&self, player: Player) -> u8 {
        self.fences_left[player.index()]
    }

    pub fn vertical_fences(&self) -> &[Coord] {
        &self.vertical
    }

    pub fn horizontal_fences(&self) -> &[Coord] {
        &self.horizontal
    }

    pub fn fences(&self, orientation: Orientation) -> &[Coord] {
        match orientation {
            Orientation::Vertical => &self.vertical,
            Orientation::Horizontal => &self.horizontal,
        }
    }

    /// The cell at a coordinate. Off-board lookups are an error, not a rejection.
    pub fn cell(&self, coord: Coord) -> Result<&Cell, BoardError> {
        self.board.cell_at(coord)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn rules(&self) -> Rules {
        self.rules
    }

    /// Shortest unobstructed route to the goal row, ignoring pawns.
    pub fn distance_to_goal(&self, player: Player) -> Option<usize> {
        path::distance_to_row(&self.board, self.position(player), player.goal_row(), &[])
    }

    // ========== Legality ==========

    fn basic_checks(&self, player: Player, target: Coord) -> Result<(), Rejection> {
        if self.is_won() {
            return Err(Rejection::GameOver);
        }
        if player != self.turn {
            return Err(Rejection::NotYourTurn(player));
        }
        if !target.on_board() {
            return Err(Rejection::OffBoard(target));
        }
        Ok(())
    }

    fn pawn_cell(&self, player: Player) -> Result<&Cell, BoardError> {
        self.board.cell_at(self.position(player))
    }

    /// Extra destinations from being next to the opponent, on top of plain steps.
    fn jump_targets(&self, player: Player) -> Result<Vec<Coord>, BoardError> {
        let from = self.position(player);
        let other = self.position(player.opponent());
        let (dx, dy) = (other.x - from.x, other.y - from.y);
        if dx.abs() + dy.abs() != 1 {
            return Ok(Vec::new());
        }

        let ours = self.pawn_cell(player)?;
        let theirs = self.pawn_cell(player.opponent())?;
        if self.rules.jumps == JumpRule::Strict && !ours.is_open_to(other) {
            return Ok(Vec::new());
        }

        let far = other.offset(dx, dy);
        if theirs.is_open_to(far) {
            return Ok(vec![far]);
        }

        Ok(match self.rules.jumps {
            JumpRule::Permissive => theirs.neighbors().to_vec(),
            JumpRule::Strict => [other.offset(dy, dx), other.offset(-dy, -dx)]
                .into_iter()
                .filter(|&side| theirs.is_open_to(side))
                .collect(),
        })
    }

    /// Check a pawn move without applying it.
    pub fn check_move(&self, player: Player, target: Coord) -> Result<(), Rejection> {
        self.basic_checks(player, target)?;

        let from = self.position(player);
        if target == from || target == self.position(player.opponent()) {
            return Err(Rejection::Occupied(target));
        }
        if self.pawn_cell(player)?.is_open_to(target) {
            return Ok(());
        }
        if self.jump_targets(player)?.contains(&target) {
            return Ok(());
        }
        Err(Rejection::Unreachable { from, to: target })
    }

    #[inline]
    pub fn can_move(&self, player: Player, target: Coord) -> bool {
        self.check_move(player, target).is_ok()
    }

    /// Check a fence placement without applying it.
    pub fn check_fence(
        &self,
        player: Player,
        orientation: Orientation,
        anchor: Coord,
    ) -> Result<(), Rejection> {
        self.basic_checks(player, anchor)?;

        let first_line = match orientation {
            Orientation::Vertical => anchor.x == 0,
            Orientation::Horizontal => anchor.y == 0,
        };
        if first_line {
            return Err(Rejection::EdgeAnchor { orientation, anchor });
        }
        if self.fences_left(player) == 0 {
            return Err(Rejection::NoFencesLeft(player));
        }
        if self.fences(orientation).contains(&anchor) {
            return Err(Rejection::DuplicateFence { orientation, anchor });
        }

        if self.rules.require_path {
            let cut = [(anchor, orientation.paired(anchor))];
            for p in Player::all() {
                if !path::reaches_row(&self.board, self.position(p), p.goal_row(), &cut) {
                    return Err(Rejection::PathBlocked(p));
                }
            }
        }
        Ok(())
    }

    #[inline]
    pub fn can_place_fence(&self, player: Player, orientation: Orientation, anchor: Coord) -> bool {
        self.check_fence(player, orientation, anchor).is_ok()
    }

    pub fn check(&self, player: Player, action: Action) -> Result<(), Rejection> {
        match action {
            Action::Move { to } => self.check_move(player, to),
            Action::Fence { orientation, anchor } => self.check_fence(player, orientation, anchor),
        }
    }

    /// Every cell the side to move could step or jump to.
    pub fn legal_pawn_moves(&self) -> Vec<Coord> {
        Coord::all()
            .filter(|&c| self.can_move(self.turn, c))
            .collect()
    }

    /// Every fence the side to move could place.
    pub fn legal_fences(&self) -> Vec<Action> {
        Orientation::all()
            .flat_map(|orientation| Coord::all().map(move |anchor| (orientation, anchor)))
            .filter(|&(orientation, anchor)| self.can_place_fence(self.turn, orientation, anchor))
            .map(|(orientation, anchor)| Action::Fence { orientation, anchor })
            .collect()
    }

    // ========== Commands ==========

    /// Move a pawn, reporting why if the move is refused.
    pub fn try_move(&mut self, player: Player, target: Coord) -> Result<(), Rejection> {
        if let Err(reason) = self.check_move(player, target) {
            debug!(%player, %target, %reason, "move rejected");
            return Err(reason);
        }

        let from = self.position(player);
        self.board.set_occupant(from, None)?;
        self.board.set_occupant(target, Some(player))?;
        self.pawns[player.index()] = target;
        self.turn = player.opponent();
        debug!(%player, %from, %target, "pawn moved");

        if target.y == player.goal_row() {
            self.winner = Some(player);
            info!(winner = %player, at = %target, "game won");
        }
        Ok(())
    }

    /// Move a pawn. Returns false, changing nothing, if the move is illegal.
    pub fn move_pawn(&mut self, player: Player, target: Coord) -> bool {
        self.try_move(player, target).is_ok()
    }

    /// Place a fence, reporting why if the placement is refused.
    pub fn try_place_fence(
        &mut self,
        player: Player,
        orientation: Orientation,
        anchor: Coord,
    ) -> Result<(), Rejection> {
        if let Err(reason) = self.check_fence(player, orientation, anchor) {
            debug!(%player, ?orientation, %anchor, %reason, "fence rejected");
            return Err(reason);
        }

        let paired = orientation.paired(anchor);
        self.board.apply_fence(anchor, orientation, paired)?;
        self.board.apply_fence(paired, orientation, anchor)?;
        match orientation {
            Orientation::Vertical => self.vertical.push(anchor),
            Orientation::Horizontal => self.horizontal.push(anchor),
        }
        self.fences_left[player.index()] -= 1;
        self.turn = player.opponent();
        debug!(
            %player, ?orientation, %anchor,
            remaining = self.fences_left(player),
            "fence placed"
        );
        Ok(())
    }

    /// Place a fence. Returns false, changing nothing, if the placement is illegal.
    pub fn place_fence(&mut self, player: Player, orientation: Orientation, anchor: Coord) -> bool {
        self.try_place_fence(player, orientation, anchor).is_ok()
    }

    pub fn apply(&mut self, player: Player, action: Action) -> Result<(), Rejection> {
        match action {
            Action::Move { to } => self.try_move(player, to),
            Action::Fence { orientation, anchor } => self.try_place_fence(player, orientation, anchor),
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
