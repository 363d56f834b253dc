mod frontier;
mod tree;

use std::fmt::{self, Debug, Display, Formatter};
use std::time::{Duration, Instant};

use fnv::FnvHashSet;
use log::debug;
use separator::Separatable;

use crate::board::{Action, Board, BoardError};
use crate::config::Strategy;

use self::frontier::{Entry, FifoFrontier, Frontier, Key, LifoFrontier, PriorityFrontier};
use self::tree::{NodeId, Tree};

/// Statistics gathered during one search run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    /// States removed from the frontier and expanded.
    pub nodes_expanded: u64,
    /// Largest cost among all states ever inserted into the frontier.
    /// The root's cost of 0 is the floor.
    pub max_search_depth: u32,
    pub running_time: Duration,
}

impl Display for Stats {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "Nodes expanded: {}", self.nodes_expanded.separated_string())?;
        writeln!(f, "Max search depth: {}", self.max_search_depth)?;
        writeln!(f, "Running time: {:.8}s", self.running_time.as_secs_f64())
    }
}

/// Outcome of a completed run. `path_to_goal == None` means the frontier
/// emptied without reaching the goal - a normal terminal result, not an
/// error.
pub struct SolverOk {
    /// Actions transforming the initial board into the goal, oldest first.
    pub path_to_goal: Option<Vec<Action>>,
    pub stats: Stats,
}

impl SolverOk {
    fn new(path_to_goal: Option<Vec<Action>>, stats: Stats) -> Self {
        Self { path_to_goal, stats }
    }

    /// Number of moves in the solution.
    pub fn cost_of_path(&self) -> Option<u32> {
        self.path_to_goal.as_ref().map(|path| path.len() as u32)
    }

    /// Depth of the goal state - always equal to the path cost.
    pub fn search_depth(&self) -> Option<u32> {
        self.cost_of_path()
    }
}

impl Debug for SolverOk {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.path_to_goal {
            None => writeln!(f, "No solution")?,
            Some(ref path) => writeln!(f, "Solved in {} moves", path.len())?,
        }
        write!(f, "{}", self.stats)
    }
}

/// Solves the board given as a flat tile sequence using the requested
/// strategy. Fails only when the tiles don't form a valid board; an
/// unsolvable board runs until the frontier empties.
pub fn run_search(strategy: Strategy, tiles: Vec<u8>, n: usize) -> Result<SolverOk, BoardError> {
    let root = Board::new(tiles, n)?;
    debug!("solving {}x{} board with {}:\n{}", n, n, strategy, root);

    Ok(match strategy {
        Strategy::Bfs => search(root, FifoFrontier::default()),
        Strategy::Dfs => search(root, LifoFrontier::default()),
        Strategy::AStar => search(root, PriorityFrontier::default()),
    })
}

/// The one search loop shared by all three strategies. Which state comes
/// out next - and the two discipline quirks - are decided entirely by the
/// frontier implementation.
fn search<F: Frontier>(root: Board, mut frontier: F) -> SolverOk {
    let start = Instant::now();

    let mut tree = Tree::new(root);
    let mut explored: FnvHashSet<Key> = FnvHashSet::default();
    let mut nodes_expanded: u64 = 0;
    let mut max_depth: u32 = 0;

    frontier.insert(entry(&tree, tree.root()));

    while let Some(cur) = frontier.remove_next() {
        explored.insert(cur.key);
        let cur = cur.id;

        if tree.node(cur).board.is_goal() {
            return finish(&tree, Some(cur), nodes_expanded, max_depth, start);
        }

        nodes_expanded += 1;
        let mut children = tree.expand(cur);
        if F::REVERSE_EXPANSION {
            children.reverse();
        }

        for child in children {
            if F::EAGER_GOAL_CHECK && tree.node(child).board.is_goal() {
                return finish(&tree, Some(child), nodes_expanded, max_depth, start);
            }

            let child_entry = entry(&tree, child);
            if frontier.contains(&child_entry.key) || explored.contains(&child_entry.key) {
                continue;
            }

            let cost = tree.node(child).cost;
            if cost > max_depth {
                max_depth = cost;
            }
            frontier.insert(child_entry);
        }
    }

    finish(&tree, None, nodes_expanded, max_depth, start)
}

fn entry(tree: &Tree, id: NodeId) -> Entry {
    let node = tree.node(id);
    Entry {
        id,
        key: node.board.tiles().into(),
        priority: node.cost + node.heuristic,
    }
}

fn finish(
    tree: &Tree,
    goal: Option<NodeId>,
    nodes_expanded: u64,
    max_depth: u32,
    start: Instant,
) -> SolverOk {
    let stats = Stats {
        nodes_expanded,
        max_search_depth: max_depth,
        running_time: start.elapsed(),
    };
    match goal {
        Some(id) => {
            debug!("goal reached at depth {}, backtracking", tree.node(id).cost);
            SolverOk::new(Some(tree.path_from_root(id)), stats)
        }
        None => {
            debug!("frontier exhausted after {} expansions", nodes_expanded);
            SolverOk::new(None, stats)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{HashSet, VecDeque};

    use crate::board::Action::*;
    use crate::board::ACTIONS;

    use super::*;

    fn solve(strategy: Strategy, tiles: &[u8], n: usize) -> SolverOk {
        run_search(strategy, tiles.to_vec(), n).unwrap()
    }

    /// Replays `path` on the initial tiles and checks it ends at the goal.
    fn assert_reaches_goal(tiles: &[u8], n: usize, path: &[Action]) {
        let mut board = Board::new(tiles.to_vec(), n).unwrap();
        for &action in path {
            board = board.apply(action).expect("illegal move in solution path");
        }
        assert!(board.is_goal(), "path does not end at the goal");
    }

    /// Plain breadth-first walk over raw tile vectors, independent of the
    /// solver machinery. Returns the minimum number of moves to the goal.
    fn optimal_depth(tiles: &[u8], n: usize) -> Option<u32> {
        let root = Board::new(tiles.to_vec(), n).unwrap();
        let mut seen = HashSet::new();
        seen.insert(root.tiles().to_vec());
        let mut queue = VecDeque::new();
        queue.push_back((root, 0));

        while let Some((board, depth)) = queue.pop_front() {
            if board.is_goal() {
                return Some(depth);
            }
            for &action in &ACTIONS {
                if let Some(child) = board.apply(action) {
                    if seen.insert(child.tiles().to_vec()) {
                        queue.push_back((child, depth + 1));
                    }
                }
            }
        }
        None
    }

    #[test]
    fn already_solved_board() {
        let goal = [0, 1, 2, 3, 4, 5, 6, 7, 8];
        for &strategy in &[Strategy::Bfs, Strategy::Dfs, Strategy::AStar] {
            let solution = solve(strategy, &goal, 3);
            assert_eq!(solution.path_to_goal, Some(vec![]));
            assert_eq!(solution.cost_of_path(), Some(0));
            assert_eq!(solution.stats.nodes_expanded, 0);
            assert_eq!(solution.stats.max_search_depth, 0);
        }
    }

    #[test]
    fn bfs_three_move_instance() {
        let solution = solve(Strategy::Bfs, &[1, 2, 5, 3, 4, 0, 6, 7, 8], 3);
        assert_eq!(solution.path_to_goal, Some(vec![Up, Left, Left]));
        assert_eq!(solution.cost_of_path(), Some(3));
        assert_eq!(solution.search_depth(), Some(3));
        assert_eq!(solution.stats.nodes_expanded, 10);
        assert_eq!(solution.stats.max_search_depth, 4);
    }

    #[test]
    fn astar_three_move_instance() {
        // same path as bfs but fewer expansions - the goal child is
        // recognized at generation time. No equal priorities show up in
        // this search, so the counts don't depend on heap tie order.
        let solution = solve(Strategy::AStar, &[1, 2, 5, 3, 4, 0, 6, 7, 8], 3);
        assert_eq!(solution.path_to_goal, Some(vec![Up, Left, Left]));
        assert_eq!(solution.cost_of_path(), Some(3));
        assert_eq!(solution.stats.nodes_expanded, 3);
        assert_eq!(solution.stats.max_search_depth, 3);
    }

    #[test]
    fn dfs_three_move_instance() {
        let tiles = [1, 2, 5, 3, 4, 0, 6, 7, 8];
        let solution = solve(Strategy::Dfs, &tiles, 3);
        let path = solution.path_to_goal.clone().expect("dfs failed on a solvable board");

        // depth-first wanders, but the path it returns must be playable
        assert_reaches_goal(&tiles, 3, &path);
        assert!(path.len() >= 3);
        assert_eq!(solution.cost_of_path(), Some(path.len() as u32));
    }

    #[test]
    fn bfs_is_optimal_on_rotated_rows() {
        // every row rotated left by one
        let tiles = [1, 2, 0, 4, 5, 3, 7, 8, 6];
        let optimal = optimal_depth(&tiles, 3).unwrap();

        let solution = solve(Strategy::Bfs, &tiles, 3);
        let path = solution.path_to_goal.clone().unwrap();
        assert_reaches_goal(&tiles, 3, &path);
        assert_eq!(solution.cost_of_path(), Some(optimal));
        assert!(solution.stats.nodes_expanded >= 1);
    }

    #[test]
    fn astar_on_rotated_rows() {
        let tiles = [1, 2, 0, 4, 5, 3, 7, 8, 6];
        let optimal = optimal_depth(&tiles, 3).unwrap();

        let solution = solve(Strategy::AStar, &tiles, 3);
        let path = solution.path_to_goal.clone().unwrap();
        assert_reaches_goal(&tiles, 3, &path);

        // every solution's length has the parity of the blank's distance
        // from its goal cell, so the cost can't be off by one
        let cost = solution.cost_of_path().unwrap();
        assert!(cost >= optimal);
        assert_eq!(cost % 2, optimal % 2);
    }

    #[test]
    fn solvable_2x2() {
        let tiles = [1, 0, 2, 3];
        let solution = solve(Strategy::Bfs, &tiles, 2);
        assert_eq!(solution.path_to_goal, Some(vec![Left]));

        let solution = solve(Strategy::AStar, &tiles, 2);
        assert_eq!(solution.path_to_goal, Some(vec![Left]));
        assert_eq!(solution.stats.nodes_expanded, 1);

        // dfs digs through the whole 12-state component first: the goal is
        // generated from the root, lands at the bottom of the stack and is
        // only popped after the other 11 states have been expanded
        let solution = solve(Strategy::Dfs, &tiles, 2);
        assert_eq!(solution.path_to_goal, Some(vec![Left]));
        assert_eq!(solution.stats.nodes_expanded, 11);
    }

    #[test]
    fn unsolvable_2x2_exhausts() {
        // two tiles swapped - wrong parity, the goal is unreachable
        let tiles = [0, 2, 1, 3];
        assert_eq!(optimal_depth(&tiles, 2), None);

        for &strategy in &[Strategy::Bfs, Strategy::Dfs, Strategy::AStar] {
            let solution = solve(strategy, &tiles, 2);
            assert_eq!(solution.path_to_goal, None);
            assert_eq!(solution.cost_of_path(), None);
            // the reachable component of a 2x2 board has exactly 12 states
            assert_eq!(solution.stats.nodes_expanded, 12);
        }
    }

    #[test]
    fn invalid_boards_fail_before_searching() {
        assert_eq!(
            run_search(Strategy::Bfs, vec![0, 1, 1, 3], 2).unwrap_err(),
            BoardError::NotAPermutation
        );
        assert_eq!(
            run_search(Strategy::AStar, vec![0, 1], 1).unwrap_err(),
            BoardError::TooSmall(1)
        );
    }

    #[test]
    fn bfs_and_astar_agree_on_shallow_instances() {
        let instances: &[&[u8]] = &[
            &[1, 0, 2, 3, 4, 5, 6, 7, 8],
            &[1, 2, 5, 3, 4, 0, 6, 7, 8],
            &[3, 1, 2, 0, 4, 5, 6, 7, 8],
        ];
        for &tiles in instances {
            let bfs = solve(Strategy::Bfs, tiles, 3);
            let astar = solve(Strategy::AStar, tiles, 3);
            assert_eq!(bfs.cost_of_path(), astar.cost_of_path(), "tiles {:?}", tiles);
            assert_reaches_goal(tiles, 3, &astar.path_to_goal.unwrap());
        }
    }
}
