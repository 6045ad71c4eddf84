use std::collections::HashMap;

use log::debug;

use crate::board::{Board, Move};
use crate::error::PuzzleError;

/// How a search run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A node with zero heuristic distance to the goal was popped.
    GoalFound,
    /// The frontier emptied first; the report carries the last node
    /// examined as a closest-approach result. Not an error.
    Exhausted,
}

/// One explored state. Nodes own their boards outright; `parent` is an
/// index into the arena held by the [`SearchReport`].
#[derive(Debug, Clone)]
pub struct SearchNode {
    pub state: Board,
    pub path_cost: u32,
    /// Move that produced this node, `None` for the root.
    pub action: Option<Move>,
    parent: Option<usize>,
}

impl SearchNode {
    /// f(n) = g(n) + weight * h(n). Recomputed on demand rather than
    /// cached, since the goal differs between runs.
    pub fn f(&self, goal: &Board, weight: f64) -> f64 {
        self.path_cost as f64 + weight * self.state.manhattan_distance(goal) as f64
    }
}

/// Children of `node` reachable by one productive move, in fixed
/// Up/Down/Left/Right order. Moves that bounce off an edge leave the
/// board unchanged and are skipped, so no child ever equals its parent.
fn expand(node: &SearchNode, index: usize) -> impl Iterator<Item = SearchNode> + '_ {
    Move::ALL.into_iter().filter_map(move |direction| {
        let mut state = node.state.clone();
        state.apply_move(direction);
        (state != node.state).then_some(SearchNode {
            state,
            path_cost: node.path_cost + 1,
            action: Some(direction),
            parent: Some(index),
        })
    })
}

/// Open list ordered descending by f, cheapest at the back, so removal
/// is a pop. Insertion scans from the back and splices the new entry
/// just before the first strictly-lower-f one; equal-f ties therefore
/// pop the most recently inserted node first. f is fixed per entry for
/// the life of one run, so it is carried alongside the arena index.
struct Frontier {
    entries: Vec<(usize, f64)>,
}

impl Frontier {
    fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    fn push(&mut self, node: usize, f: f64) {
        let mut at = self.entries.len();
        while at > 0 && self.entries[at - 1].1 < f {
            at -= 1;
        }
        self.entries.insert(at, (node, f));
    }

    fn pop(&mut self) -> Option<usize> {
        self.entries.pop().map(|(node, _)| node)
    }
}

/// Everything a run produced: terminal outcome, node-generation count,
/// and the explored-node arena the solution path threads through.
#[derive(Debug)]
pub struct SearchReport {
    pub outcome: Outcome,
    pub generated: usize,
    goal: Board,
    arena: Vec<SearchNode>,
    result: usize,
}

/// Solution path statistics in chronological start-to-goal order.
#[derive(Debug)]
pub struct Solution {
    pub depth: usize,
    pub actions: Vec<Move>,
    pub f_trace: Vec<f64>,
}

impl SearchReport {
    /// The goal node, or the closest approach if the run exhausted.
    pub fn result(&self) -> &SearchNode {
        &self.arena[self.result]
    }

    /// Walk parent links from the result back to the root, collecting
    /// the search depth, the move sequence, and the f(n) value at every
    /// node on the path. The walk runs goal-to-root, so the collected
    /// sequences are reversed before returning.
    pub fn trace_back(&self, weight: f64) -> Solution {
        let mut depth = 0;
        let mut actions = Vec::new();
        let mut f_trace = Vec::new();

        let mut cursor = Some(self.result);
        while let Some(index) = cursor {
            let node = &self.arena[index];
            if let Some(action) = node.action {
                depth += 1;
                actions.push(action);
            }
            f_trace.push(node.f(&self.goal, weight));
            cursor = node.parent;
        }
        actions.reverse();
        f_trace.reverse();

        Solution {
            depth,
            actions,
            f_trace,
        }
    }
}

/// Weighted A* over the sliding-tile state graph.
///
/// Pops the cheapest-f frontier node until one measures zero Manhattan
/// distance to `goal`, expanding each popped node and suppressing
/// duplicate states that already have an equal-or-cheaper recorded
/// path. Weight 1.0 is plain A*; larger weights trade solution quality
/// for speed. There is no internal iteration bound.
pub fn a_star(start: &Board, goal: &Board, weight: f64) -> Result<SearchReport, PuzzleError> {
    if start.dimensions() != goal.dimensions() {
        return Err(PuzzleError::DimensionMismatch {
            start: start.dimensions(),
            goal: goal.dimensions(),
        });
    }
    if !start.is_valid() || !goal.is_valid() {
        return Err(PuzzleError::InvalidBoard {
            max_tile: start.size(),
        });
    }

    let root = SearchNode {
        state: start.clone(),
        path_cost: 0,
        action: None,
        parent: None,
    };
    let root_f = root.f(goal, weight);

    let mut arena = vec![root];
    let mut frontier = Frontier::new();
    frontier.push(0, root_f);

    // best known path cost per flattened board state
    let mut visited: HashMap<Vec<u32>, u32> = HashMap::new();
    visited.insert(start.flatten(), 0);

    let mut generated = 1;
    let mut current = 0;

    while let Some(popped) = frontier.pop() {
        current = popped;
        if arena[current].state.manhattan_distance(goal) == 0 {
            return Ok(SearchReport {
                outcome: Outcome::GoalFound,
                generated,
                goal: goal.clone(),
                arena,
                result: current,
            });
        }

        let children: Vec<SearchNode> = expand(&arena[current], current).collect();
        for child in children {
            let key = child.state.flatten();
            let improves = match visited.get(&key) {
                None => true,
                Some(&best) => child.path_cost < best,
            };
            if improves {
                visited.insert(key, child.path_cost);
                let f = child.f(goal, weight);
                let index = arena.len();
                arena.push(child);
                frontier.push(index, f);
                generated += 1;
                if generated % 10_000 == 0 {
                    debug!("{} nodes generated so far", generated);
                }
            }
        }
    }

    Ok(SearchReport {
        outcome: Outcome::Exhausted,
        generated,
        goal: goal.clone(),
        arena,
        result: current,
    })
}
