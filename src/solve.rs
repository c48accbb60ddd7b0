//! A* search over sliding-tile boards.
//!
//! The initial board and its twin are searched in lockstep. Exactly one of them
//! reaches the goal, which decides solvability without any parity argument.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use arrayvec::ArrayVec;
use tracing::{debug, trace};

use crate::{Board, Direction};

type NodeId = usize;

/// Rounds between two trace events.
const TRACE_INTERVAL: usize = 1 << 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Running,
    /// The initial board reached the goal.
    SolvedPrimal,
    /// The twin reached the goal, so the initial board is unsolvable.
    SolvedTwin,
}

/// Progress of one round of the shared loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Round {
    pub index: usize,
    pub primal_priority: usize,
    pub twin_priority: usize,
}

#[derive(Debug)]
struct SearchNode {
    board: Board,
    moves: usize,
    manhattan: usize,
    prev: Option<NodeId>,
}

impl SearchNode {
    fn priority(&self) -> usize {
        self.moves + self.manhattan
    }
}

/// One best-first search. Nodes are never removed from the arena, so `prev`
/// handles stay valid until the search is dropped.
#[derive(Debug)]
struct Search {
    nodes: Vec<SearchNode>,
    // (priority, manhattan, insertion order)
    frontier: BinaryHeap<Reverse<(usize, usize, NodeId)>>,
    last_priority: usize,
}

impl Search {
    fn new(root: Board) -> Self {
        let mut search = Self {
            nodes: Vec::new(),
            frontier: BinaryHeap::new(),
            last_priority: 0,
        };
        search.push(root, 0, None);
        search
    }

    fn push(&mut self, board: Board, moves: usize, prev: Option<NodeId>) {
        let id = self.nodes.len();
        let node = SearchNode {
            manhattan: board.manhattan(),
            board,
            moves,
            prev,
        };
        self.frontier
            .push(Reverse((node.priority(), node.manhattan, id)));
        self.nodes.push(node);
    }

    fn pop(&mut self) -> (NodeId, usize) {
        // Every board has at least two neighbors and at most one is pruned.
        let Reverse((priority, _, id)) = self.frontier.pop().expect("Frontier never drains");
        debug_assert!(
            self.last_priority <= priority,
            "Pop priority decreased from {} to {priority}",
            self.last_priority,
        );
        self.last_priority = priority;
        (id, priority)
    }

    fn is_goal(&self, id: NodeId) -> bool {
        self.nodes[id].manhattan == 0
    }

    /// Pushes every neighbor except the board the node came from.
    fn expand(&mut self, id: NodeId) {
        let node = &self.nodes[id];
        let prev = node.prev.map(|prev| &self.nodes[prev].board);
        let moves = node.moves + 1;
        let successors = node
            .board
            .neighbors()
            .into_iter()
            .filter(|board| Some(board) != prev)
            .collect::<ArrayVec<_, 4>>();
        for board in successors {
            self.push(board, moves, Some(id));
        }
    }

    fn path(&self, id: NodeId) -> Vec<Board> {
        let mut boards = std::iter::successors(Some(id), |&i| self.nodes[i].prev)
            .map(|i| self.nodes[i].board.clone())
            .collect::<Vec<_>>();
        boards.reverse();
        boards
    }
}

/// Runs to completion on construction.
#[derive(Debug, Clone)]
pub struct Solver {
    status: Status,
    solution: Option<Vec<Board>>,
    rounds: usize,
}

impl Solver {
    pub fn new(initial: Board) -> Self {
        Self::with_progress(initial, |_| {})
    }

    /// Like [`Solver::new`], calling `on_round` after every round.
    pub fn with_progress(initial: Board, mut on_round: impl FnMut(&Round)) -> Self {
        debug!(
            dimension = initial.dimension(),
            manhattan = initial.manhattan(),
            hamming = initial.hamming(),
            "Search started",
        );

        let mut twin = Search::new(initial.twin());
        let mut primal = Search::new(initial);
        let mut status = Status::Running;
        let mut solution = None;
        let mut rounds = 0;

        while status == Status::Running {
            #[cfg(feature = "coz")]
            coz::scope!("Round");

            let (primal_id, primal_priority) = primal.pop();
            let (twin_id, twin_priority) = twin.pop();

            if primal.is_goal(primal_id) {
                solution = Some(primal.path(primal_id));
                status = Status::SolvedPrimal;
            } else if twin.is_goal(twin_id) {
                status = Status::SolvedTwin;
            } else {
                primal.expand(primal_id);
                twin.expand(twin_id);
            }

            on_round(&Round {
                index: rounds,
                primal_priority,
                twin_priority,
            });
            rounds += 1;

            #[cfg(feature = "coz")]
            coz::progress!("Round");

            if rounds % TRACE_INTERVAL == 0 {
                trace!(
                    rounds,
                    primal_priority,
                    primal_frontier = primal.frontier.len(),
                    twin_frontier = twin.frontier.len(),
                    "Searching",
                );
            }
        }

        debug!(
            ?status,
            rounds,
            primal_nodes = primal.nodes.len(),
            twin_nodes = twin.nodes.len(),
            moves = ?solution.as_ref().map(|path| path.len() - 1),
            "Search finished",
        );

        Self {
            status,
            solution,
            rounds,
        }
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_solvable(&self) -> bool {
        self.status == Status::SolvedPrimal
    }

    /// Minimum number of moves, `None` if unsolvable.
    pub fn moves(&self) -> Option<usize> {
        self.solution.as_ref().map(|path| path.len() - 1)
    }

    /// Boards from the initial board to the goal, both inclusive.
    pub fn solution(&self) -> Option<&[Board]> {
        self.solution.as_deref()
    }

    /// Blank moves along the solution.
    pub fn directions(&self) -> Option<Vec<Direction>> {
        self.solution()?
            .windows(2)
            .map(|w| w[0].direction_to(&w[1]))
            .collect()
    }

    /// Number of rounds the shared loop ran, the final one included.
    pub fn rounds(&self) -> usize {
        self.rounds
    }
}
