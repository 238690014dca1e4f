use rand::{seq::SliceRandom, Rng};
use std::fmt;
use std::hash::{Hash, Hasher};

// Per-position multipliers for the permutation hash, indexed modulo the table length.
const HASH_WEIGHTS: [u64; 64] = hash_weights();

// Odd splitmix64 outputs from a fixed seed.
const fn hash_weights() -> [u64; 64] {
    let mut table = [0u64; 64];
    let mut seed: u64 = 0x5EED_5EED_5EED_5EED;
    let mut i = 0;
    while i < table.len() {
        seed = seed.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = seed;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        table[i] = (z ^ (z >> 31)) | 1;
        i += 1;
    }
    table
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PuzzleError {
    #[error("invalid move {0}")]
    InvalidMove(Move),
    #[error("invalid permutation: {0}")]
    InvalidPermutation(String),
    #[error("invalid dimensions {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
}

/// Direction a tile slides into the blank cell.
///
/// `Up` pulls the tile below the blank upwards, so the blank itself travels
/// one row down. The other directions follow the same convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    Up,
    Left,
    Down,
    Right,
}

impl Move {
    pub const ALL: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];

    /// Displacement of the blank as (row, column).
    pub fn as_offset(&self) -> (isize, isize) {
        match self {
            Move::Up => (1, 0),
            Move::Left => (0, 1),
            Move::Down => (-1, 0),
            Move::Right => (0, -1),
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            Move::Up => Move::Down,
            Move::Down => Move::Up,
            Move::Left => Move::Right,
            Move::Right => Move::Left,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            Move::Up => "Up",
            Move::Left => "Left",
            Move::Down => "Down",
            Move::Right => "Right",
        };
        write!(f, "{}", s)
    }
}

/// A sliding-tile board stored as a row-major permutation.
///
/// The value `width * height - 1` is the blank. Equality and hashing only
/// look at the dimensions and the permutation, never at `round`.
#[derive(Clone, Debug)]
pub struct Puzzle {
    width: usize,
    height: usize,
    permutation: Vec<usize>,
    open_position: usize,
    round: u32,
    hash: u64,
}

impl Puzzle {
    pub fn new(width: usize, height: usize) -> Result<Self, PuzzleError> {
        if width == 0 || height == 0 || width * height < 2 {
            return Err(PuzzleError::InvalidDimensions { width, height });
        }

        let permutation: Vec<usize> = (0..width * height).collect();
        let hash = Self::compute_hash(&permutation);

        Ok(Self {
            width,
            height,
            permutation,
            open_position: width * height - 1,
            round: 0,
            hash,
        })
    }

    pub fn from_permutation(
        width: usize,
        height: usize,
        permutation: &[usize],
    ) -> Result<Self, PuzzleError> {
        let mut puzzle = Self::new(width, height)?;
        let size = width * height;

        if permutation.len() != size {
            return Err(PuzzleError::InvalidPermutation(format!(
                "expected {} values, got {}",
                size,
                permutation.len()
            )));
        }

        let mut seen = vec![false; size];
        for &value in permutation {
            if value >= size || seen[value] {
                return Err(PuzzleError::InvalidPermutation(format!(
                    "value {} is out of range or repeated",
                    value
                )));
            }
            seen[value] = true;
        }

        puzzle.permutation = permutation.to_vec();
        puzzle.reset_derived();
        Ok(puzzle)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn permutation(&self) -> &[usize] {
        &self.permutation
    }

    pub fn open_position(&self) -> usize {
        self.open_position
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn blank(&self) -> usize {
        self.permutation.len() - 1
    }

    pub fn legal_moves(&self) -> Vec<Move> {
        Move::ALL
            .iter()
            .copied()
            .filter(|&movement| self.is_legal(movement))
            .collect()
    }

    pub fn is_legal(&self, movement: Move) -> bool {
        self.target_of(movement).is_some()
    }

    pub fn apply_move(&mut self, movement: Move) -> Result<(), PuzzleError> {
        let target = self
            .target_of(movement)
            .ok_or(PuzzleError::InvalidMove(movement))?;
        self.slide(target);
        Ok(())
    }

    /// Plays `count` random legal moves from the current position, then
    /// restarts the round counter.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, count: usize, rng: &mut R) {
        for _ in 0..count {
            let moves = self.legal_moves();
            if let Some(target) = moves.choose(rng).and_then(|&m| self.target_of(m)) {
                self.slide(target);
            }
        }
        self.reset_derived();
    }

    pub fn is_solved(&self) -> bool {
        self.permutation
            .iter()
            .enumerate()
            .all(|(index, &value)| index == value)
    }

    pub fn score(&self) -> i64 {
        -i64::from(self.round)
    }

    /// Whether the solved configuration is reachable from here.
    pub fn is_solvable(&self) -> bool {
        let blank = self.blank();

        if self.width == 1 || self.height == 1 {
            // On a strip the tiles can never pass each other
            let tiles: Vec<usize> = self
                .permutation
                .iter()
                .copied()
                .filter(|&value| value != blank)
                .collect();
            return tiles.windows(2).all(|pair| pair[0] < pair[1]);
        }

        let row = self.open_position / self.width;
        let col = self.open_position % self.width;
        let blank_distance = (self.height - 1 - row) + (self.width - 1 - col);

        Self::count_inversions(&self.permutation) % 2 == blank_distance % 2
    }

    fn count_inversions(values: &[usize]) -> usize {
        values
            .iter()
            .enumerate()
            .map(|(i, &val)| values[i + 1..].iter().filter(|&&next| next < val).count())
            .sum()
    }

    fn target_of(&self, movement: Move) -> Option<usize> {
        let (dr, dc) = movement.as_offset();

        let new_row = (self.open_position / self.width) as isize + dr;
        let new_col = (self.open_position % self.width) as isize + dc;

        if new_row >= 0
            && new_row < self.height as isize
            && new_col >= 0
            && new_col < self.width as isize
        {
            Some(new_row as usize * self.width + new_col as usize)
        } else {
            None
        }
    }

    fn slide(&mut self, target: usize) {
        let blank = self.blank() as u64;
        let tile = self.permutation[target] as u64;
        let open_weight = Self::weight(self.open_position);
        let target_weight = Self::weight(target);

        // The tile moves to the open cell and the blank moves to the target
        self.hash = self
            .hash
            .wrapping_add(open_weight.wrapping_mul(tile))
            .wrapping_sub(open_weight.wrapping_mul(blank))
            .wrapping_add(target_weight.wrapping_mul(blank))
            .wrapping_sub(target_weight.wrapping_mul(tile));

        self.permutation.swap(self.open_position, target);
        self.open_position = target;
        self.round += 1;
    }

    fn reset_derived(&mut self) {
        let blank = self.blank();
        self.open_position = self
            .permutation
            .iter()
            .position(|&value| value == blank)
            .unwrap_or(blank);
        self.hash = Self::compute_hash(&self.permutation);
        self.round = 0;
    }

    fn weight(index: usize) -> u64 {
        HASH_WEIGHTS[index % HASH_WEIGHTS.len()]
    }

    fn compute_hash(permutation: &[usize]) -> u64 {
        permutation
            .iter()
            .enumerate()
            .fold(0u64, |acc, (index, &value)| {
                acc.wrapping_add(Self::weight(index).wrapping_mul(value as u64))
            })
    }
}

impl PartialEq for Puzzle {
    fn eq(&self, other: &Self) -> bool {
        self.width == other.width
            && self.height == other.height
            && self.permutation == other.permutation
    }
}

impl Eq for Puzzle {}

impl Hash for Puzzle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.hash.hash(state);
    }
}

impl fmt::Display for Puzzle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let blank = self.blank();
        let label_width = blank.to_string().len();

        for row in self.permutation.chunks(self.width) {
            for &val in row {
                if val == blank {
                    write!(f, "{:>w$} ", ".", w = label_width)?;
                } else {
                    write!(f, "{:>w$} ", val + 1, w = label_width)?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
