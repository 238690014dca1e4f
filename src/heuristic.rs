//! Admissible distance estimates between two boards of the same size.
//!
//! None of the estimates count the blank: a single slide moves the blank and
//! one tile, so counting both would overestimate a one-move position.

use std::fmt;
use std::str::FromStr;

use crate::puzzle::Puzzle;

/// Estimate functions have the shape the search engine expects.
pub type HeuristicFn = fn(&Puzzle, &Puzzle) -> u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Heuristic {
    /// Tiles out of place. Cheap but weak.
    Hamming,
    #[default]
    Manhattan,
    /// Manhattan plus two moves for every tile that has to leave its line.
    LinearConflict,
}

impl Heuristic {
    pub fn function(self) -> HeuristicFn {
        match self {
            Heuristic::Hamming => hamming,
            Heuristic::Manhattan => manhattan,
            Heuristic::LinearConflict => linear_conflict,
        }
    }
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            Heuristic::Hamming => "hamming",
            Heuristic::Manhattan => "manhattan",
            Heuristic::LinearConflict => "linear-conflict",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Heuristic {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "hamming" => Ok(Heuristic::Hamming),
            "manhattan" => Ok(Heuristic::Manhattan),
            "linear-conflict" | "linear_conflict" => Ok(Heuristic::LinearConflict),
            other => Err(format!(
                "unknown heuristic '{}' (expected hamming, manhattan or linear-conflict)",
                other
            )),
        }
    }
}

pub fn hamming(state: &Puzzle, goal: &Puzzle) -> u32 {
    let blank = state.blank();
    state
        .permutation()
        .iter()
        .zip(goal.permutation())
        .filter(|&(&tile, &expected)| tile != blank && tile != expected)
        .count() as u32
}

pub fn manhattan(state: &Puzzle, goal: &Puzzle) -> u32 {
    let width = state.width();
    let blank = state.blank();
    let targets = goal_positions(goal);

    let mut distance = 0;
    for (index, &tile) in state.permutation().iter().enumerate() {
        if tile != blank {
            let target = targets[tile];
            distance += (index / width).abs_diff(target / width);
            distance += (index % width).abs_diff(target % width);
        }
    }
    distance as u32
}

pub fn linear_conflict(state: &Puzzle, goal: &Puzzle) -> u32 {
    let width = state.width();
    let height = state.height();
    let blank = state.blank();
    let targets = goal_positions(goal);
    let permutation = state.permutation();

    let mut removals = 0;

    // Row conflicts
    for row in 0..height {
        let goal_cols: Vec<usize> = (0..width)
            .map(|col| permutation[row * width + col])
            .filter(|&tile| tile != blank && targets[tile] / width == row)
            .map(|tile| targets[tile] % width)
            .collect();
        removals += goal_cols.len() - longest_increasing_run(&goal_cols);
    }

    // Column conflicts
    for col in 0..width {
        let goal_rows: Vec<usize> = (0..height)
            .map(|row| permutation[row * width + col])
            .filter(|&tile| tile != blank && targets[tile] % width == col)
            .map(|tile| targets[tile] / width)
            .collect();
        removals += goal_rows.len() - longest_increasing_run(&goal_rows);
    }

    manhattan(state, goal) + 2 * removals as u32
}

fn goal_positions(goal: &Puzzle) -> Vec<usize> {
    let mut positions = vec![0; goal.permutation().len()];
    for (index, &tile) in goal.permutation().iter().enumerate() {
        positions[tile] = index;
    }
    positions
}

// Length of the longest strictly increasing subsequence.
fn longest_increasing_run(values: &[usize]) -> usize {
    let mut tails: Vec<usize> = Vec::with_capacity(values.len());
    for &value in values {
        match tails.binary_search(&value) {
            Ok(_) => {}
            Err(slot) if slot == tails.len() => tails.push(value),
            Err(slot) => tails[slot] = value,
        }
    }
    tails.len()
}
