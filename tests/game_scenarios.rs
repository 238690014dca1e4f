//! Whole games driven by the A* player.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use proptest::prelude::*;
use rand::{rngs::StdRng, SeedableRng};
use slide_solver::{AStarPlayer, Game, GameConfig, GameObserver, Heuristic, Move, Player, Puzzle};

#[derive(Clone, Default)]
struct MoveLog(Rc<RefCell<Vec<Move>>>);

impl MoveLog {
    fn moves(&self) -> Vec<Move> {
        self.0.borrow().clone()
    }
}

impl GameObserver for MoveLog {
    fn end_of_turn(&mut self, _state: &Puzzle, _player: &dyn fmt::Display, movement: Move) {
        self.0.borrow_mut().push(movement);
    }
}

fn play(state: &Puzzle, heuristic: Heuristic) -> (u32, Vec<Move>) {
    let player = AStarPlayer::new(state.width(), state.height(), heuristic).unwrap();
    let log = MoveLog::default();
    let mut game = Game::new(state, player).with_observer(Box::new(log.clone()));
    let rounds = game.run().unwrap();
    assert!(game.state().is_solved());
    (rounds, log.moves())
}

#[test]
fn solved_board_plays_no_turns() {
    let state = Puzzle::from_permutation(2, 2, &[0, 1, 2, 3]).unwrap();
    let player = AStarPlayer::new(2, 2, Heuristic::Manhattan).unwrap();
    let log = MoveLog::default();
    let mut game = Game::new(&state, player).with_observer(Box::new(log.clone()));

    assert!(game.is_over());
    assert_eq!(game.run(), Ok(0));
    assert!(log.moves().is_empty());
    assert!(game.player().transitions().is_empty());
}

#[test]
fn single_shuffle_move_is_undone() {
    for seed in 0..16 {
        let solved = Puzzle::new(2, 3).unwrap();
        let mut state = solved.clone();
        state.shuffle(1, &mut StdRng::seed_from_u64(seed));

        let shuffle_move = solved
            .legal_moves()
            .into_iter()
            .find(|&movement| {
                let mut copy = solved.clone();
                copy.apply_move(movement).unwrap();
                copy == state
            })
            .unwrap();

        let (rounds, moves) = play(&state, Heuristic::Manhattan);
        assert_eq!(rounds, 1);
        assert_eq!(moves, vec![shuffle_move.opposite()]);
    }
}

#[test]
fn one_slide_from_solved_three_by_three() {
    let state = Puzzle::from_permutation(3, 3, &[0, 1, 2, 3, 4, 5, 6, 8, 7]).unwrap();

    let mut player = AStarPlayer::new(3, 3, Heuristic::Manhattan).unwrap();
    assert_eq!(player.solve(&state), Ok(vec![Move::Left]));

    let (rounds, moves) = play(&state, Heuristic::Manhattan);
    assert_eq!(rounds, 1);
    assert_eq!(moves, vec![Move::Left]);
}

#[test]
fn shuffled_fifteen_puzzle_is_solved_optimally() {
    let config = GameConfig {
        width: 4,
        height: 4,
        shuffle_moves: 24,
        heuristic: Heuristic::LinearConflict,
        ..GameConfig::default()
    };
    let state = config
        .starting_state(&mut StdRng::seed_from_u64(42))
        .unwrap();

    let mut manhattan = AStarPlayer::new(4, 4, Heuristic::Manhattan).unwrap();
    let optimal = manhattan.solve(&state).unwrap();
    assert!(optimal.len() <= 24);

    let (rounds, moves) = play(&state, config.heuristic);
    assert_eq!(rounds as usize, optimal.len());
    assert_eq!(moves.len(), optimal.len());
}

#[test]
fn rectangular_board_game_matches_plan() {
    let config = GameConfig {
        width: 4,
        height: 2,
        shuffle_moves: 50,
        ..GameConfig::default()
    };
    let state = config
        .starting_state(&mut StdRng::seed_from_u64(8))
        .unwrap();

    let mut planner = config.player().unwrap();
    let plan = planner.solve(&state).unwrap();

    let (rounds, moves) = play(&state, config.heuristic);
    assert_eq!(rounds as usize, plan.len());
    assert_eq!(moves, plan);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn prop_get_move_is_stable(seed in any::<u64>(), shuffle in 1usize..40) {
        let mut state = Puzzle::new(3, 3).unwrap();
        state.shuffle(shuffle, &mut StdRng::seed_from_u64(seed));
        prop_assume!(!state.is_solved());

        let mut player = AStarPlayer::new(3, 3, Heuristic::Manhattan).unwrap();
        let first = player.get_move(&state).unwrap();
        let cached = player.transitions().len();
        let second = player.get_move(&state).unwrap();

        prop_assert_eq!(first, second);
        prop_assert_eq!(player.transitions().len(), cached);

        let mut next = state.clone();
        next.apply_move(first).unwrap();
        prop_assert_eq!(player.transitions().get(&state), Some(&next));
    }
}
