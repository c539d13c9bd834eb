//! HexOust Core - rules engine
//!
//! This crate provides the core game logic for HexOust:
//! - Board geometry (fixed hexagonal grid with cube coordinates)
//! - Connected-group discovery (flood fill) and capture resolution
//! - Move legality, forced passes, and win detection
//!
//! Presentation concerns (rendering, hit testing, input) live entirely
//! outside this crate; a view consumes the engine through [`Game`] and the
//! optional turn observer.

pub mod board;
pub mod game;

// Re-exports for convenient access
pub use board::{Board, Cell, Hex, InvalidCoordinate, BOARD_RADIUS, DIRECTIONS};
pub use game::{Game, IllegalPlacement, Outcome, Player, TurnEvent, TurnObserver};
