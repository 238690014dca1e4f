//! Generic A* over an implicit graph.
//!
//! The engine knows nothing about the states it searches. The caller hands
//! in three functions: one that expands a state into its neighbours, one that
//! prices a single edge, and an admissible estimate of the remaining cost.
//! Given those, [`AStar::shortest_path`] returns a cost-optimal path.

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::hash::Hash;
use std::ops::Add;

use rustc_hash::FxHashMap;
use tracing::debug;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("no path found from start to goal")]
    NoPathFound,
}

/// Outcome of a successful search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult<S, C> {
    /// States from the start (first) to the goal (last).
    pub path: Vec<S>,
    pub cost: C,
    /// Number of nodes taken off the frontier and expanded.
    pub expanded: usize,
}

struct Node<S, C> {
    state: S,
    g: C,
    parent: Option<usize>,
}

pub struct AStar<N, E, H> {
    neighbors: N,
    edge_cost: E,
    heuristic: H,
}

impl<N, E, H> AStar<N, E, H> {
    pub fn new(neighbors: N, edge_cost: E, heuristic: H) -> Self {
        Self {
            neighbors,
            edge_cost,
            heuristic,
        }
    }

    pub fn shortest_path<S, C>(
        &self,
        start: &S,
        goal: &S,
    ) -> Result<SearchResult<S, C>, SearchError>
    where
        S: Clone + Eq + Hash,
        C: Copy + Ord + Add<Output = C> + Default,
        N: Fn(&S) -> Vec<S>,
        E: Fn(&S, &S) -> C,
        H: Fn(&S, &S) -> C,
    {
        let mut nodes: Vec<Node<S, C>> = vec![Node {
            state: start.clone(),
            g: C::default(),
            parent: None,
        }];
        let mut index: FxHashMap<S, usize> = FxHashMap::default();
        index.insert(start.clone(), 0);

        // Entries are (f, insertion order, node, g); the insertion order keeps
        // ties deterministic and first-in first-out.
        let mut frontier = BinaryHeap::new();
        let mut sequence: u64 = 0;
        frontier.push(Reverse((
            (self.heuristic)(start, goal),
            sequence,
            0usize,
            C::default(),
        )));

        let mut expanded = 0;

        while let Some(Reverse((_, _, current, g))) = frontier.pop() {
            // A cheaper route to this node was found after this entry was pushed
            if g > nodes[current].g {
                continue;
            }

            if nodes[current].state == *goal {
                let path = Self::reconstruct(&nodes, current);
                debug!(
                    expanded,
                    discovered = nodes.len(),
                    path_len = path.len(),
                    "A* search reached goal"
                );
                return Ok(SearchResult {
                    path,
                    cost: g,
                    expanded,
                });
            }

            expanded += 1;

            let successors: Vec<(S, C)> = (self.neighbors)(&nodes[current].state)
                .into_iter()
                .map(|next| {
                    let step = (self.edge_cost)(&nodes[current].state, &next);
                    (next, step)
                })
                .collect();

            for (next, step) in successors {
                let tentative = g + step;

                let slot = match index.get(&next) {
                    Some(&known) if tentative >= nodes[known].g => continue,
                    Some(&known) => {
                        nodes[known].g = tentative;
                        nodes[known].parent = Some(current);
                        nodes[known].state = next.clone();
                        known
                    }
                    None => {
                        nodes.push(Node {
                            state: next.clone(),
                            g: tentative,
                            parent: Some(current),
                        });
                        index.insert(next.clone(), nodes.len() - 1);
                        nodes.len() - 1
                    }
                };

                sequence += 1;
                let priority = tentative + (self.heuristic)(&next, goal);
                frontier.push(Reverse((priority, sequence, slot, tentative)));
            }
        }

        debug!(expanded, discovered = nodes.len(), "A* frontier exhausted");
        Err(SearchError::NoPathFound)
    }

    fn reconstruct<S: Clone, C>(nodes: &[Node<S, C>], last: usize) -> Vec<S> {
        let mut path = Vec::new();
        let mut cursor = Some(last);
        while let Some(at) = cursor {
            path.push(nodes[at].state.clone());
            cursor = nodes[at].parent;
        }
        path.reverse();
        path
    }
}
