//! Sliding-tile puzzles solved with a generic A* search.
//!
//! [`astar`] is independent of the puzzle. [`player`] plugs the puzzle's
//! neighbours, step cost and a [`heuristic`] into it and turns the returned
//! path of boards back into moves.

pub mod astar;
pub mod config;
pub mod game;
pub mod heuristic;
pub mod player;
pub mod puzzle;

pub use astar::{AStar, SearchError, SearchResult};
pub use config::GameConfig;
pub use game::{Game, GameError, GameObserver, TracingObserver};
pub use heuristic::Heuristic;
pub use player::{AStarPlayer, Player, PlayerError};
pub use puzzle::{Move, Puzzle, PuzzleError};
