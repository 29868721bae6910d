use crate::domains::grid::{Grid, Position};
use rand::seq::SliceRandom;
use rand::{Rng, RngCore};

/// Possibly drop one new obstacle on the grid.
///
/// One uniform draw decides whether anything spawns (`draw < spawn_probability`,
/// with the probability given as a fraction in `[0, 1]`). When it does, the
/// obstacle lands on an empty cell chosen uniformly among all empty cells other
/// than `start`, `target` and `agent_position`. Returns the blocked cell.
pub fn maybe_spawn<R: Rng + ?Sized>(
    grid: &mut Grid,
    start: Position,
    target: Position,
    agent_position: Position,
    spawn_probability: f64,
    rng: &mut R,
) -> Option<Position> {
    if rng.gen::<f64>() >= spawn_probability {
        return None;
    }

    let candidates: Vec<Position> = grid
        .empty_cells()
        .filter(|p| *p != start && *p != target && *p != agent_position)
        .collect();
    let chosen = *candidates.choose(rng)?;
    grid.set_obstacle(chosen).ok()?;
    Some(chosen)
}

/// Port the simulator spawns obstacles through once per traversal tick.
pub trait ObstacleSpawner: Send {
    fn spawn(
        &mut self,
        grid: &mut Grid,
        start: Position,
        target: Position,
        agent_position: Position,
        spawn_probability: f64,
        rng: &mut dyn RngCore,
    ) -> Option<Position>;
}

/// The default spawner: `maybe_spawn` with the run's random source.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomSpawner;

impl ObstacleSpawner for RandomSpawner {
    fn spawn(
        &mut self,
        grid: &mut Grid,
        start: Position,
        target: Position,
        agent_position: Position,
        spawn_probability: f64,
        rng: &mut dyn RngCore,
    ) -> Option<Position> {
        maybe_spawn(grid, start, target, agent_position, spawn_probability, rng)
    }
}
