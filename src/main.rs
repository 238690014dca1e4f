use std::error::Error;
use std::fmt;
use std::io::{self, Write};
use std::time::Instant;

use clap::Parser;
use crossterm::{
    cursor::MoveTo,
    execute,
    style::Stylize,
    terminal::{Clear, ClearType},
};
use rand::{rngs::StdRng, thread_rng, RngCore, SeedableRng};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use slide_solver::{
    AStarPlayer, Game, GameConfig, GameObserver, Heuristic, Move, Puzzle, PuzzleError,
    TracingObserver,
};

#[derive(Parser, Debug)]
#[command(
    name = "slide-solver",
    version,
    about = "Shuffle a sliding-tile puzzle and watch A* solve it optimally"
)]
struct Cli {
    /// Board width in tiles
    #[arg(long, default_value_t = 3)]
    width: usize,
    /// Board height in tiles
    #[arg(long, default_value_t = 3)]
    height: usize,
    /// Random legal moves used to shuffle the solved board
    #[arg(short, long, default_value_t = 30)]
    shuffle: usize,
    /// Solver estimate: hamming, manhattan or linear-conflict
    #[arg(long, default_value_t = Heuristic::Manhattan)]
    heuristic: Heuristic,
    /// Seed for a reproducible shuffle
    #[arg(long)]
    seed: Option<u64>,
    /// Games to play back to back
    #[arg(short, long, default_value_t = 1)]
    games: usize,
    /// Log turns instead of drawing the board
    #[arg(short, long)]
    quiet: bool,
    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl From<&Cli> for GameConfig {
    fn from(cli: &Cli) -> Self {
        GameConfig {
            width: cli.width,
            height: cli.height,
            shuffle_moves: cli.shuffle,
            heuristic: cli.heuristic,
            seed: cli.seed,
            games: cli.games,
        }
    }
}

/// Draws the board after every turn.
struct ConsoleObserver {
    stopwatch: Instant,
}

impl ConsoleObserver {
    fn new() -> Self {
        Self {
            stopwatch: Instant::now(),
        }
    }
}

impl GameObserver for ConsoleObserver {
    fn start_of_game(&mut self, state: &Puzzle) {
        let mut stdout = io::stdout();
        if let Err(err) = execute!(stdout, Clear(ClearType::All), MoveTo(0, 0)) {
            warn!(error = %err, "could not clear the terminal");
        }
        println!("Shuffled Puzzle:\n{}", state);
    }

    fn start_of_turn(&mut self, _state: &Puzzle, _player: &dyn fmt::Display) {
        self.stopwatch = Instant::now();
    }

    fn end_of_turn(&mut self, state: &Puzzle, player: &dyn fmt::Display, movement: Move) {
        println!(
            "{} played a move in {}ms => {}",
            player,
            self.stopwatch.elapsed().as_millis(),
            movement.to_string().cyan()
        );
        println!("{}", state);
    }

    fn end_of_game(&mut self, state: &Puzzle) {
        println!(
            "{}\n",
            format!("Solved in {} moves.", state.round()).green()
        );
        if let Err(err) = io::stdout().flush() {
            warn!(error = %err, "could not flush the terminal");
        }
    }
}

// The first turn runs the search, so its timing line includes it
fn build_game(
    config: &GameConfig,
    state: &Puzzle,
    quiet: bool,
) -> Result<Game<AStarPlayer>, PuzzleError> {
    let observer: Box<dyn GameObserver> = if quiet {
        Box::new(TracingObserver)
    } else {
        Box::new(ConsoleObserver::new())
    };
    Ok(Game::new(state, config.player()?).with_observer(observer))
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let config = GameConfig::from(&cli);
    let mut rng: Box<dyn RngCore> = match config.seed {
        Some(seed) => Box::new(StdRng::seed_from_u64(seed)),
        None => Box::new(thread_rng()),
    };

    for _ in 0..config.games {
        let state = config.starting_state(rng.as_mut())?;
        let mut game = build_game(&config, &state, cli.quiet)?;

        let rounds = game.run()?;
        if rounds as usize != game.player().transitions().len() {
            warn!(rounds, "game left the precomputed path");
        }
    }

    Ok(())
}
