//! Unified best-first search over the grid.
//!
//! A* ranks open entries by `f = g + h`, Greedy Best-First by `f = h`. The
//! open list is a binary heap keyed by `(f, insertion order)`, so equal
//! priorities expand first-in first-out and the whole expansion order is
//! reproducible.
//!
//! There is no decrease-key: a cheaper rediscovery of a position is pushed as
//! a new entry, and the older entry is skipped when it is popped because its
//! position is already closed by then.

use super::heuristics::Heuristic;
use super::ports::{CancelCheck, SearchEvent, SearchObserver};
use crate::domains::grid::{Grid, Position};
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, HashSet};
use std::fmt;
use std::time::{Duration, Instant};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanningAlgorithm {
    #[default]
    AStar,
    GreedyBestFirst,
}

impl PlanningAlgorithm {
    pub fn priority(self, g: f64, h: f64) -> f64 {
        match self {
            PlanningAlgorithm::AStar => g + h,
            PlanningAlgorithm::GreedyBestFirst => h,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PlanningAlgorithm::AStar => "A*",
            PlanningAlgorithm::GreedyBestFirst => "Greedy Best-First (GBFS)",
        }
    }
}

impl fmt::Display for PlanningAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Handle of a node inside a node arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

#[derive(Debug, Clone, PartialEq)]
pub struct SearchNode {
    pub position: Position,
    pub parent: Option<NodeId>,
    pub g: f64,
    pub h: f64,
    pub f: f64,
}

/// The node that reached the goal together with its ancestor chain.
///
/// Only the chain survives the search: `nodes[0]` is the goal and every
/// parent handle points further along the vector, ending at the start node
/// whose parent is `None`.
#[derive(Debug, Clone)]
pub struct GoalNode {
    nodes: Vec<SearchNode>,
}

impl GoalNode {
    fn from_arena(arena: &[SearchNode], goal: NodeId) -> Self {
        let mut nodes = Vec::new();
        let mut cursor = Some(goal);
        while let Some(id) = cursor {
            let node = &arena[id.0];
            cursor = node.parent;
            let parent = cursor.map(|_| NodeId(nodes.len() + 1));
            nodes.push(SearchNode {
                parent,
                ..node.clone()
            });
        }
        Self { nodes }
    }

    pub fn id(&self) -> NodeId {
        NodeId(0)
    }

    pub fn node(&self, id: NodeId) -> Option<&SearchNode> {
        self.nodes.get(id.0)
    }

    pub fn goal(&self) -> &SearchNode {
        &self.nodes[0]
    }

    pub fn position(&self) -> Position {
        self.goal().position
    }

    /// Accumulated move cost from the start.
    pub fn cost(&self) -> f64 {
        self.goal().g
    }
}

#[derive(Debug, Clone)]
pub enum SearchOutcome {
    Found(GoalNode),
    NotFound,
    Aborted,
}

impl SearchOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, SearchOutcome::Found(_))
    }
}

#[derive(Debug, Clone)]
pub struct SearchReport {
    pub outcome: SearchOutcome,
    pub nodes_visited: usize,
    pub frontier_added: usize,
    pub elapsed: Duration,
}

impl SearchReport {
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed.as_secs_f64() * 1000.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SearchEngine {
    pub algorithm: PlanningAlgorithm,
    pub heuristic: Heuristic,
}

impl SearchEngine {
    pub fn new(algorithm: PlanningAlgorithm, heuristic: Heuristic) -> Self {
        Self {
            algorithm,
            heuristic,
        }
    }

    pub fn search(
        &self,
        grid: &Grid,
        start: Position,
        goal: Position,
        cancel: &dyn CancelCheck,
        observer: &mut dyn SearchObserver,
    ) -> SearchReport {
        let started = Instant::now();

        // arena index doubles as the insertion counter for tie-breaking
        let mut arena: Vec<SearchNode> = Vec::new();
        let mut open: BinaryHeap<Reverse<(OrderedFloat<f64>, NodeId)>> = BinaryHeap::new();
        let mut best_known: HashMap<Position, f64> = HashMap::new();
        let mut closed: HashSet<Position> = HashSet::new();
        let mut nodes_visited = 0;
        let mut frontier_added = 0;

        let h0 = self.heuristic.estimate(start, goal);
        let f0 = self.algorithm.priority(0.0, h0);
        arena.push(SearchNode {
            position: start,
            parent: None,
            g: 0.0,
            h: h0,
            f: f0,
        });
        open.push(Reverse((OrderedFloat(f0), NodeId(0))));
        best_known.insert(start, f0);

        let outcome = loop {
            if cancel.should_stop() {
                break SearchOutcome::Aborted;
            }
            let Some(Reverse((_, id))) = open.pop() else {
                break SearchOutcome::NotFound;
            };
            let (position, g) = {
                let node = &arena[id.0];
                (node.position, node.g)
            };
            if !closed.insert(position) {
                continue;
            }
            nodes_visited += 1;
            observer.on_search_event(SearchEvent::Visited(position));

            if position == goal {
                break SearchOutcome::Found(GoalNode::from_arena(&arena, id));
            }

            for (next, mv) in grid.moves_from(position) {
                if closed.contains(&next) {
                    continue;
                }
                let g_next = g + mv.cost();
                let h_next = self.heuristic.estimate(next, goal);
                let f_next = self.algorithm.priority(g_next, h_next);
                let improves = best_known.get(&next).map_or(true, |best| f_next < *best);
                if !improves {
                    continue;
                }
                best_known.insert(next, f_next);
                let next_id = NodeId(arena.len());
                arena.push(SearchNode {
                    position: next,
                    parent: Some(id),
                    g: g_next,
                    h: h_next,
                    f: f_next,
                });
                open.push(Reverse((OrderedFloat(f_next), next_id)));
                frontier_added += 1;
                observer.on_search_event(SearchEvent::FrontierAdded(next));
            }
        };

        let elapsed = started.elapsed();
        debug!(
            algorithm = %self.algorithm,
            heuristic = %self.heuristic,
            %start,
            %goal,
            nodes_visited,
            frontier_added,
            found = outcome.is_found(),
            "search finished"
        );
        SearchReport {
            outcome,
            nodes_visited,
            frontier_added,
            elapsed,
        }
    }
}
