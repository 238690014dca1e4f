//! Checks A* against an exhaustive breadth-first search on boards small
//! enough to enumerate every reachable position.

use std::collections::{HashMap, VecDeque};

use slide_solver::player::{neighbors, step_cost};
use slide_solver::{AStar, Heuristic, Puzzle};

const HEURISTICS: [Heuristic; 3] = [
    Heuristic::Hamming,
    Heuristic::Manhattan,
    Heuristic::LinearConflict,
];

/// True distance to the solved board for every reachable position.
fn distances(width: usize, height: usize) -> HashMap<Puzzle, u32> {
    let goal = Puzzle::new(width, height).unwrap();
    let mut seen = HashMap::new();
    let mut queue = VecDeque::new();
    seen.insert(goal.clone(), 0);
    queue.push_back(goal);

    while let Some(state) = queue.pop_front() {
        let distance = seen[&state];
        for next in neighbors(&state) {
            if !seen.contains_key(&next) {
                seen.insert(next.clone(), distance + 1);
                queue.push_back(next);
            }
        }
    }
    seen
}

fn sorted_states(table: &HashMap<Puzzle, u32>) -> Vec<(&Puzzle, u32)> {
    let mut states: Vec<(&Puzzle, u32)> = table.iter().map(|(s, &d)| (s, d)).collect();
    states.sort_by(|a, b| a.0.permutation().cmp(b.0.permutation()));
    states
}

#[test]
fn reachable_state_counts() {
    assert_eq!(distances(2, 2).len(), 12);
    assert_eq!(distances(2, 3).len(), 360);
    assert_eq!(distances(3, 2).len(), 360);
}

#[test]
fn reachable_states_are_solvable() {
    for (state, _) in sorted_states(&distances(3, 2)) {
        assert!(state.is_solvable(), "{}", state);
    }
}

#[test]
fn heuristics_never_overestimate() {
    for (width, height) in [(2, 2), (2, 3), (3, 2)] {
        let goal = Puzzle::new(width, height).unwrap();
        let table = distances(width, height);
        for (state, distance) in sorted_states(&table) {
            for heuristic in HEURISTICS {
                let estimate = heuristic.function()(state, &goal);
                assert!(
                    estimate <= distance,
                    "{} estimated {} for a board {} moves away:\n{}",
                    heuristic,
                    estimate,
                    distance,
                    state
                );
            }
        }
    }
}

#[test]
fn astar_cost_matches_breadth_first_distance() {
    for (width, height) in [(2, 2), (2, 3), (3, 2)] {
        let goal = Puzzle::new(width, height).unwrap();
        let table = distances(width, height);

        for heuristic in HEURISTICS {
            let search = AStar::new(neighbors, step_cost, heuristic.function());

            for (state, distance) in sorted_states(&table) {
                let result = search.shortest_path(state, &goal).unwrap();
                assert_eq!(result.cost, distance, "{} on\n{}", heuristic, state);
                assert_eq!(result.path.len() as u32, distance + 1);
                assert_eq!(result.path.first(), Some(state));
                assert_eq!(result.path.last(), Some(&goal));
            }
        }
    }
}

#[test]
fn path_steps_are_single_moves() {
    let goal = Puzzle::new(3, 2).unwrap();
    let search = AStar::new(neighbors, step_cost, Heuristic::Manhattan.function());

    for (state, _) in sorted_states(&distances(3, 2)) {
        let result = search.shortest_path(state, &goal).unwrap();
        for pair in result.path.windows(2) {
            assert!(neighbors(&pair[0]).contains(&pair[1]));
        }
    }
}
