#![allow(dead_code)]

use dynamic_pathfinder::domains::dynamics::ObstacleSpawner;
use dynamic_pathfinder::domains::grid::{Grid, Position, Workspace};
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

/// Exact shortest-path costs from `source` to every reachable cell, by plain
/// Dijkstra over the same 8-connected move set.
pub fn dijkstra_costs(grid: &Grid, source: Position) -> HashMap<Position, f64> {
    let mut dist: HashMap<Position, f64> = HashMap::new();
    let mut done: HashMap<Position, bool> = HashMap::new();
    dist.insert(source, 0.0);
    loop {
        let next = dist
            .iter()
            .filter(|(p, _)| !done.contains_key(p))
            .min_by(|a, b| a.1.partial_cmp(b.1).unwrap())
            .map(|(p, d)| (*p, *d));
        let Some((pos, d)) = next else { break };
        done.insert(pos, true);
        for (nb, mv) in grid.moves_from(pos) {
            let candidate = d + mv.cost();
            let entry = dist.entry(nb).or_insert(f64::INFINITY);
            if candidate < *entry {
                *entry = candidate;
            }
        }
    }
    dist
}

pub fn optimal_cost(grid: &Grid, from: Position, to: Position) -> Option<f64> {
    dijkstra_costs(grid, from).get(&to).copied()
}

/// Random grid with corners (0,0) and (rows-1, cols-1) kept open.
pub fn random_grid(seed: u64, rows: usize, cols: usize, density: f64) -> Grid {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut grid = Grid::new(rows, cols).unwrap();
    for pos in grid.positions().collect::<Vec<_>>() {
        if rng.gen::<f64>() < density {
            grid.set_obstacle(pos).unwrap();
        }
    }
    grid.clear_obstacle(Position::new(0, 0)).unwrap();
    grid.clear_obstacle(Position::new(rows as i32 - 1, cols as i32 - 1))
        .unwrap();
    grid
}

pub fn workspace(grid: Grid, start: (i32, i32), target: (i32, i32)) -> Workspace {
    let mut ws = Workspace::new(grid);
    ws.set_start(start.into()).unwrap();
    ws.set_target(target.into()).unwrap();
    ws
}

pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

/// Spawner that drops the queued positions one per traversal tick, ignoring
/// the spawn probability. Clones share the queue so a test can feed it
/// after the simulator has taken ownership.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSpawner {
    queue: Arc<Mutex<VecDeque<Position>>>,
    calls: Arc<Mutex<usize>>,
}

impl ScriptedSpawner {
    pub fn push(&self, pos: Position) {
        self.queue.lock().unwrap().push_back(pos);
    }

    pub fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

impl ObstacleSpawner for ScriptedSpawner {
    fn spawn(
        &mut self,
        grid: &mut Grid,
        _start: Position,
        _target: Position,
        _agent_position: Position,
        _spawn_probability: f64,
        _rng: &mut dyn RngCore,
    ) -> Option<Position> {
        *self.calls.lock().unwrap() += 1;
        let pos = self.queue.lock().unwrap().pop_front()?;
        grid.set_obstacle(pos).ok()?;
        Some(pos)
    }
}
