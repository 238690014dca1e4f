use std::fmt;

use rustc_hash::FxHashMap;
use tracing::{debug, info};

use crate::astar::{AStar, SearchError};
use crate::heuristic::{Heuristic, HeuristicFn};
use crate::puzzle::{Move, Puzzle, PuzzleError};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PlayerError {
    #[error(transparent)]
    Search(#[from] SearchError),
    #[error(transparent)]
    Puzzle(#[from] PuzzleError),
    #[error("puzzle is already solved")]
    AlreadySolved,
    #[error("player solves {expected_width}x{expected_height} boards, got {width}x{height}")]
    DimensionMismatch {
        expected_width: usize,
        expected_height: usize,
        width: usize,
        height: usize,
    },
    #[error("no cached transition for the current state after searching")]
    InternalConsistency,
    #[error("no legal move leads to the next state on the path")]
    MoveReconstruction,
}

pub trait Player: fmt::Display {
    fn get_move(&mut self, state: &Puzzle) -> Result<Move, PlayerError>;
}

type NeighborFn = fn(&Puzzle) -> Vec<Puzzle>;
type CostFn = fn(&Puzzle, &Puzzle) -> u32;

pub type PuzzleSearch = AStar<NeighborFn, CostFn, HeuristicFn>;

/// Every board one legal slide away from `state`.
pub fn neighbors(state: &Puzzle) -> Vec<Puzzle> {
    state
        .legal_moves()
        .into_iter()
        .filter_map(|movement| {
            let mut copy = state.clone();
            copy.apply_move(movement).ok().map(|_| copy)
        })
        .collect()
}

/// Moves played between two boards; one for every edge `neighbors` produces.
pub fn step_cost(from: &Puzzle, to: &Puzzle) -> u32 {
    to.round().saturating_sub(from.round())
}

/// Finds the single legal move that turns `from` into `to`.
pub fn move_between(from: &Puzzle, to: &Puzzle) -> Result<Move, PlayerError> {
    for movement in from.legal_moves() {
        let mut copy = from.clone();
        copy.apply_move(movement)?;

        if copy == *to {
            return Ok(movement);
        }
    }
    Err(PlayerError::MoveReconstruction)
}

/// Plays optimally by running A* once per unseen board and replaying the
/// cached path afterwards.
pub struct AStarPlayer {
    search: PuzzleSearch,
    heuristic: Heuristic,
    goal: Puzzle,
    transitions: FxHashMap<Puzzle, Puzzle>,
}

impl AStarPlayer {
    pub fn new(width: usize, height: usize, heuristic: Heuristic) -> Result<Self, PuzzleError> {
        Ok(Self {
            search: AStar::new(
                neighbors as NeighborFn,
                step_cost as CostFn,
                heuristic.function(),
            ),
            heuristic,
            goal: Puzzle::new(width, height)?,
            transitions: FxHashMap::default(),
        })
    }

    pub fn goal(&self) -> &Puzzle {
        &self.goal
    }

    pub fn heuristic(&self) -> Heuristic {
        self.heuristic
    }

    pub fn transitions(&self) -> &FxHashMap<Puzzle, Puzzle> {
        &self.transitions
    }

    /// Full optimal move sequence from `state` to the goal.
    pub fn solve(&mut self, state: &Puzzle) -> Result<Vec<Move>, PlayerError> {
        self.check_dimensions(state)?;
        if state.is_solved() {
            return Ok(Vec::new());
        }

        let path = self.search_from(state)?;
        path.windows(2)
            .map(|pair| move_between(&pair[0], &pair[1]))
            .collect()
    }

    fn search_from(&mut self, state: &Puzzle) -> Result<Vec<Puzzle>, PlayerError> {
        if !state.is_solvable() {
            debug!("refusing to search from an unsolvable board");
            return Err(SearchError::NoPathFound.into());
        }

        let result = self.search.shortest_path(state, &self.goal)?;
        info!(
            cost = result.cost,
            expanded = result.expanded,
            heuristic = %self.heuristic,
            "computed optimal path"
        );

        // The path starts at `state`, so every board on it gets its successor
        for pair in result.path.windows(2) {
            self.transitions.insert(pair[0].clone(), pair[1].clone());
        }
        Ok(result.path)
    }

    fn check_dimensions(&self, state: &Puzzle) -> Result<(), PlayerError> {
        if state.width() != self.goal.width() || state.height() != self.goal.height() {
            return Err(PlayerError::DimensionMismatch {
                expected_width: self.goal.width(),
                expected_height: self.goal.height(),
                width: state.width(),
                height: state.height(),
            });
        }
        Ok(())
    }
}

impl Player for AStarPlayer {
    fn get_move(&mut self, state: &Puzzle) -> Result<Move, PlayerError> {
        self.check_dimensions(state)?;
        if state.is_solved() {
            return Err(PlayerError::AlreadySolved);
        }

        if !self.transitions.contains_key(state) {
            self.search_from(state)?;
        }

        let next = self
            .transitions
            .get(state)
            .ok_or(PlayerError::InternalConsistency)?;
        move_between(state, next)
    }
}

impl fmt::Display for AStarPlayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AStarPlayer({})", self.heuristic)
    }
}
