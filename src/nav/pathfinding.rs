//! A* pathfinding over the tile grid
//!
//! 8-connected search with integer fixed-point costs (1000 orthogonal,
//! 1414 diagonal) and an octile heuristic, which keeps cost ordering free
//! of float drift. Diagonal steps are refused when either flanking
//! orthogonal cell is blocked, so paths never cut corners through walls.
//! The frontier is capped: on large or unreachable queries the search stops
//! early and falls back to the explored node closest to the goal.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use ahash::AHashMap;
use glam::Vec2;

use crate::core::types::GridPos;
use crate::nav::PassabilityMap;

/// Cost of an orthogonal step, fixed-point thousandths
pub const COST_ORTHOGONAL: i64 = 1000;

/// Cost of a diagonal step (1000 * sqrt(2), truncated)
pub const COST_DIAGONAL: i64 = 1414;

const STEPS: [GridPos; 8] = [
    GridPos::new(0, -1),
    GridPos::new(-1, 0),
    GridPos::new(1, 0),
    GridPos::new(0, 1),
    GridPos::new(-1, -1),
    GridPos::new(1, -1),
    GridPos::new(-1, 1),
    GridPos::new(1, 1),
];

const WEIGHTS: [i64; 8] = [
    COST_ORTHOGONAL,
    COST_ORTHOGONAL,
    COST_ORTHOGONAL,
    COST_ORTHOGONAL,
    COST_DIAGONAL,
    COST_DIAGONAL,
    COST_DIAGONAL,
    COST_DIAGONAL,
];

/// Octile distance in the same fixed-point scale as the step costs
///
/// Admissible and consistent for the 1000/1414 cost model.
pub fn octile_heuristic(delta: GridPos) -> i64 {
    let dx = delta.x.abs() as i64;
    let dy = delta.y.abs() as i64;
    if dx > dy {
        1000 * dx + 414 * dy
    } else {
        1000 * dy + 414 * dx
    }
}

/// Search record for one explored cell
///
/// Parent links are coordinates into the arena map, not pointers.
#[derive(Debug, Clone, Copy)]
struct Node {
    parent: Option<GridPos>,
    actual: i64,
    heuristic: i64,
}

/// Frontier entry ordered as a min-heap on f = actual + heuristic
#[derive(Debug, Clone, Copy)]
struct FrontierEntry {
    pos: GridPos,
    f: i64,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.f == other.f
    }
}

impl Eq for FrontierEntry {}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse order for min-heap
        other.f.cmp(&self.f)
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Find a path from `start` toward `goal`
///
/// The returned waypoints run farthest-first: the element nearest the start
/// is at the back, so callers consume the path with `last()` + `pop()`.
/// The start cell is never included; `start == goal` yields an empty path.
/// When the goal cell is reached, the final (front) waypoint is the exact
/// un-rounded `goal` so a walker ends centered on the requested point.
/// Unreachable or cap-exhausted searches return the path to the explored
/// cell closest to the goal instead.
pub fn build_path(
    map: &mut impl PassabilityMap,
    start: Vec2,
    goal: Vec2,
    node_cap: usize,
) -> Vec<Vec2> {
    let start_cell = GridPos::round(start);
    let goal_cell = GridPos::round(goal);

    let mut nodes: AHashMap<GridPos, Node> = AHashMap::new();
    let mut frontier: BinaryHeap<FrontierEntry> = BinaryHeap::new();

    let start_h = octile_heuristic(start_cell - goal_cell);
    nodes.insert(
        start_cell,
        Node {
            parent: None,
            actual: 0,
            heuristic: start_h,
        },
    );
    frontier.push(FrontierEntry {
        pos: start_cell,
        f: start_h,
    });

    let mut current = start_cell;

    while !frontier.is_empty() && frontier.len() < node_cap {
        let entry = frontier.pop().expect("frontier checked non-empty");
        current = entry.pos;
        if current == goal_cell {
            break;
        }

        let current_actual = nodes[&current].actual;

        for (step, weight) in STEPS.iter().zip(WEIGHTS) {
            let next = current + *step;

            let mut passable = map.is_passable(next);
            // diagonal movement only when both flanking cells are open
            if step.x != 0 && step.y != 0 {
                passable = passable
                    && map.is_passable(current + GridPos::new(step.x, 0))
                    && map.is_passable(current + GridPos::new(0, step.y));
            }
            if !passable {
                continue;
            }

            let tentative = current_actual + weight;
            let known = nodes.get(&next).map(|n| n.actual).unwrap_or(i64::MAX);
            if tentative < known {
                let heuristic = octile_heuristic(next - goal_cell);
                nodes.insert(
                    next,
                    Node {
                        parent: Some(current),
                        actual: tentative,
                        heuristic,
                    },
                );
                frontier.push(FrontierEntry {
                    pos: next,
                    f: tentative + heuristic,
                });
            }
        }
    }

    // goal unreached: walk to the explored node closest to it instead.
    // Map iteration order is arbitrary, so ties on (heuristic, actual)
    // fall through to the coordinate to keep the endpoint stable.
    if current != goal_cell {
        let mut best = current;
        let mut best_node = nodes[&current];
        for (&pos, node) in &nodes {
            if (node.heuristic, node.actual, pos.x, pos.y)
                < (best_node.heuristic, best_node.actual, best.x, best.y)
            {
                best = pos;
                best_node = *node;
            }
        }
        current = best;
    }

    let reached_goal = current == goal_cell;
    let mut path = Vec::new();
    while current != start_cell {
        if reached_goal && current == goal_cell {
            path.push(goal);
        } else {
            path.push(current.to_vec2());
        }
        match nodes.get(&current).and_then(|n| n.parent) {
            Some(parent) => current = parent,
            None => break,
        }
    }

    tracing::trace!(
        "path {:?} -> {:?}: {} waypoints, reached={}",
        start_cell,
        goal_cell,
        path.len(),
        reached_goal
    );
    path
}
