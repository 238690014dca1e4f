//! Single-player turn loop.
//!
//! The loop only sequences turns. Rendering, logging and timing live in
//! observers that receive lifecycle hooks.

use std::fmt;

use tracing::info;

use crate::player::{Player, PlayerError};
use crate::puzzle::{Move, Puzzle, PuzzleError};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("player failed: {0}")]
    Player(#[from] PlayerError),
    #[error("move rejected: {0}")]
    Move(#[from] PuzzleError),
}

/// Hooks fired by [`Game::run`]. Every hook defaults to doing nothing.
pub trait GameObserver {
    fn start_of_game(&mut self, _state: &Puzzle) {}

    fn start_of_turn(&mut self, _state: &Puzzle, _player: &dyn fmt::Display) {}

    fn end_of_turn(&mut self, _state: &Puzzle, _player: &dyn fmt::Display, _movement: Move) {}

    fn end_of_game(&mut self, _state: &Puzzle) {}
}

/// Logs every turn through `tracing`.
#[derive(Debug, Default)]
pub struct TracingObserver;

impl GameObserver for TracingObserver {
    fn start_of_game(&mut self, state: &Puzzle) {
        info!(
            width = state.width(),
            height = state.height(),
            solvable = state.is_solvable(),
            "game started"
        );
    }

    fn end_of_turn(&mut self, state: &Puzzle, player: &dyn fmt::Display, movement: Move) {
        info!(
            player = %player,
            movement = %movement,
            round = state.round(),
            "turn played"
        );
    }

    fn end_of_game(&mut self, state: &Puzzle) {
        info!(rounds = state.round(), score = state.score(), "game over");
    }
}

pub struct Game<P> {
    state: Puzzle,
    player: P,
    observers: Vec<Box<dyn GameObserver>>,
}

impl<P: Player> Game<P> {
    pub fn new(state: &Puzzle, player: P) -> Self {
        Self {
            state: state.clone(),
            player,
            observers: Vec::new(),
        }
    }

    pub fn with_observer(mut self, observer: Box<dyn GameObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn state(&self) -> &Puzzle {
        &self.state
    }

    pub fn player(&self) -> &P {
        &self.player
    }

    pub fn is_over(&self) -> bool {
        self.state.is_solved()
    }

    /// Plays until the board is solved and returns the number of rounds.
    pub fn run(&mut self) -> Result<u32, GameError> {
        for observer in &mut self.observers {
            observer.start_of_game(&self.state);
        }

        while !self.is_over() {
            for observer in &mut self.observers {
                observer.start_of_turn(&self.state, &self.player);
            }

            let movement = self.player.get_move(&self.state)?;
            self.state.apply_move(movement)?;

            for observer in &mut self.observers {
                observer.end_of_turn(&self.state, &self.player, movement);
            }
        }

        for observer in &mut self.observers {
            observer.end_of_game(&self.state);
        }
        Ok(self.state.round())
    }
}
