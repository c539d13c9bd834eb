//! Game state, move legality, and capture resolution

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use thiserror::Error;

use crate::board::{Board, Hex, BOARD_RADIUS};

/// Stone colour
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    Red,
    Blue,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Player::Red => Player::Blue,
            Player::Blue => Player::Red,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::Red => write!(f, "RED"),
            Player::Blue => write!(f, "BLUE"),
        }
    }
}

/// Rejected placement: off-board, already owned, a non-capturing placement
/// touching the mover's own group, or any move after the game has ended.
///
/// Recoverable: the call leaves game state untouched and the caller may
/// re-prompt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("illegal placement at {0}")]
pub struct IllegalPlacement(pub Hex);

/// What a committed call to [`Game::attempt_move`] did
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Stone placed; `captured` holds every erased enemy cell (may be empty)
    Placed { captured: FxHashSet<Hex> },
    /// The mover had no legal move; the turn passed to the opponent
    Passed,
    /// The placement captured the opponent's last stone
    Won { captured: FxHashSet<Hex> },
}

/// Turn-boundary notification delivered to the observer
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnEvent {
    /// Normal hand-off; the named player is now to move
    Switched(Player),
    /// The previous mover had no legal move; the named player is now to move
    Passed(Player),
    /// The named player captured the last enemy stone
    Won(Player),
}

/// Observer callback, injected once at construction
pub type TurnObserver = Box<dyn FnMut(TurnEvent)>;

/// The HexOust rules engine.
///
/// Owns the board and the turn state. All mutation is funnelled through
/// [`Game::attempt_move`], which is atomic: either nothing changes
/// (`IllegalPlacement`) or a fully consistent new state is committed.
pub struct Game {
    board: Board,
    current: Player,
    game_over: bool,
    observer: Option<TurnObserver>,
}

impl fmt::Debug for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Game")
            .field("current", &self.current)
            .field("game_over", &self.game_over)
            .field("red_stones", &self.board.stone_count(Player::Red))
            .field("blue_stones", &self.board.stone_count(Player::Blue))
            .field("observer", &self.observer.is_some())
            .finish()
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Fresh radius-7 game, RED to move
    pub fn new() -> Self {
        Self {
            board: Board::new(BOARD_RADIUS),
            current: Player::Red,
            game_over: false,
            observer: None,
        }
    }

    /// Attach a turn observer, consuming the game before any move is made.
    ///
    /// The observer is fired after every committed turn flip, forced pass,
    /// or win. At most one observer exists and it is never reassigned.
    pub fn with_observer(mut self, observer: TurnObserver) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Build an arbitrary mid-game position.
    ///
    /// Fails with `IllegalPlacement` on an off-board or repeated coordinate.
    pub fn from_position(
        stones: &[(Hex, Player)],
        first: Player,
    ) -> Result<Self, IllegalPlacement> {
        let mut game = Self::new();
        game.current = first;

        for &(coord, player) in stones {
            let vacant = matches!(game.board.cell_at(coord), Some(cell) if cell.is_empty());
            if !vacant {
                return Err(IllegalPlacement(coord));
            }
            game.board.set_owner(coord, Some(player));
        }
        Ok(game)
    }

    pub fn current_player(&self) -> Player {
        self.current
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Read-only view of the board
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// True iff `player`'s opponent has no stones left on the board.
    ///
    /// Only meaningful right after a capture has been resolved; it is not
    /// polled continuously.
    pub fn check_win(&self, player: Player) -> bool {
        self.board.stone_count(player.opponent()) == 0
    }

    /// Every cell the current player may legally place on, in board order.
    ///
    /// A placement touching the mover's own group is legal only if it
    /// captures; a non-touching placement is always legal. Recomputed from
    /// scratch on every call, never cached.
    pub fn legal_moves(&self) -> Vec<Hex> {
        if self.game_over {
            return Vec::new();
        }

        self.board
            .cells()
            .iter()
            .filter(|cell| cell.is_empty())
            .map(|cell| cell.coord())
            .filter(|&coord| {
                !self.owns_neighbor(coord, self.current)
                    || !self.capture_move(coord).is_empty()
            })
            .collect()
    }

    pub fn has_legal_move(&self) -> bool {
        !self.legal_moves().is_empty()
    }

    /// Attempt to place the current player's stone at `coord`.
    ///
    /// The sole mutating entry point. In order:
    /// 1. A mover with no legal move anywhere forfeits the turn outright;
    ///    even an off-board or occupied target triggers the pass.
    /// 2. An absent or owned target fails with `IllegalPlacement`.
    /// 3. Otherwise the capture set is resolved; a capture keeps the turn
    ///    with the mover (and wins if the opponent is wiped out), a
    ///    capture-less placement touching the mover's own group is illegal,
    ///    and anything else flips the turn.
    pub fn attempt_move(&mut self, coord: Hex) -> Result<Outcome, IllegalPlacement> {
        if self.game_over {
            return Err(IllegalPlacement(coord));
        }

        if !self.has_legal_move() {
            self.current = self.current.opponent();
            self.notify(TurnEvent::Passed(self.current));
            return Ok(Outcome::Passed);
        }

        match self.board.cell_at(coord) {
            Some(cell) if cell.is_empty() => {}
            _ => return Err(IllegalPlacement(coord)),
        }

        let mover = self.current;
        let captured = self.capture_move(coord);

        if captured.is_empty() && self.owns_neighbor(coord, mover) {
            return Err(IllegalPlacement(coord));
        }

        self.board.set_owner(coord, Some(mover));
        for &cell in &captured {
            self.board.set_owner(cell, None);
        }

        if !captured.is_empty() {
            if self.check_win(mover) {
                self.game_over = true;
                self.notify(TurnEvent::Won(mover));
                return Ok(Outcome::Won { captured });
            }
            // Capture grants an extra move; the turn stays with the mover
            return Ok(Outcome::Placed { captured });
        }

        self.current = mover.opponent();
        self.notify(TurnEvent::Switched(self.current));
        Ok(Outcome::Placed { captured })
    }

    /// Capture resolution for a hypothetical stone of the current player at
    /// `placed`, which must be an empty on-board cell. Returns the set of
    /// opponent cells the placement would erase; the board is not touched.
    fn capture_move(&self, placed: Hex) -> FxHashSet<Hex> {
        let mover = self.current;
        let rival = mover.opponent();

        let own_group = self.connected_group(placed, mover, placed);

        // Each adjacent enemy group is flooded at most once
        let mut processed: FxHashSet<Hex> = FxHashSet::default();
        let mut enemy_groups: Vec<FxHashSet<Hex>> = Vec::new();

        for &cell in &own_group {
            for dir in 0..6 {
                let next = cell.neighbor(dir);
                if self.stone_at(next, placed) == Some(rival) && !processed.contains(&next) {
                    let group = self.connected_group(next, rival, placed);
                    processed.extend(group.iter().copied());
                    enemy_groups.push(group);
                }
            }
        }

        // Joining an existing friendly group while any adjacent enemy group
        // matches or outnumbers it voids the capture entirely; no partial
        // captures.
        let joins_group = own_group.len() > 1;
        if joins_group && enemy_groups.iter().any(|g| g.len() >= own_group.len()) {
            return FxHashSet::default();
        }

        // Strict size superiority captures; equal-sized groups never do
        let mut captured = FxHashSet::default();
        for group in enemy_groups {
            if group.len() < own_group.len() {
                captured.extend(group);
            }
        }
        captured
    }

    /// Breadth-first flood fill: the maximal connected set of `player`-owned
    /// cells reachable from `start`, with the hypothetical stone at `placed`
    /// overlaid on the board.
    fn connected_group(&self, start: Hex, player: Player, placed: Hex) -> FxHashSet<Hex> {
        let mut group = FxHashSet::default();
        let mut queue = VecDeque::new();
        group.insert(start);
        queue.push_back(start);

        while let Some(cell) = queue.pop_front() {
            for dir in 0..6 {
                let next = cell.neighbor(dir);
                if self.stone_at(next, placed) == Some(player) && group.insert(next) {
                    queue.push_back(next);
                }
            }
        }
        group
    }

    /// Owner of `coord` while the current player's stone is hypothetically
    /// placed at `placed`. Off-board coordinates read as vacant.
    fn stone_at(&self, coord: Hex, placed: Hex) -> Option<Player> {
        if coord == placed {
            return Some(self.current);
        }
        self.board.cell_at(coord).and_then(|cell| cell.owner())
    }

    /// True iff any of the six neighbors of `coord` is owned by `player`
    fn owns_neighbor(&self, coord: Hex, player: Player) -> bool {
        (0..6).any(|dir| {
            self.board
                .cell_at(coord.neighbor(dir))
                .and_then(|cell| cell.owner())
                == Some(player)
        })
    }

    fn notify(&mut self, event: TurnEvent) {
        if let Some(observer) = self.observer.as_mut() {
            observer(event);
        }
    }
}
