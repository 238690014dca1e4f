//! Game configuration.

use rand::Rng;

use crate::heuristic::Heuristic;
use crate::player::AStarPlayer;
use crate::puzzle::{Puzzle, PuzzleError};

/// Settings for one or more console games.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// Board width in tiles
    pub width: usize,

    /// Board height in tiles
    pub height: usize,

    /// Random legal moves applied to the solved board before play
    pub shuffle_moves: usize,

    /// Estimate used by the solver
    pub heuristic: Heuristic,

    /// Seed for the shuffle; a fresh thread RNG when absent
    pub seed: Option<u64>,

    /// Number of games to play back to back
    pub games: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 3,
            height: 3,
            shuffle_moves: 30,
            heuristic: Heuristic::default(),
            seed: None,
            games: 1,
        }
    }
}

impl GameConfig {
    /// A freshly shuffled board with round 0.
    pub fn starting_state<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Puzzle, PuzzleError> {
        let mut state = Puzzle::new(self.width, self.height)?;
        state.shuffle(self.shuffle_moves, rng);
        Ok(state)
    }

    pub fn player(&self) -> Result<AStarPlayer, PuzzleError> {
        AStarPlayer::new(self.width, self.height, self.heuristic)
    }
}
