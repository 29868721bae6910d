mod common;

use common::{workspace, ScriptedSpawner};
use dynamic_pathfinder::common::DomainError;
use dynamic_pathfinder::domains::agent::*;
use dynamic_pathfinder::domains::grid::{Grid, Position, Workspace};
use dynamic_pathfinder::domains::logger::SilentLogger;
use dynamic_pathfinder::domains::path_planning::{CancelFlag, Heuristic, PlanningAlgorithm};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;
use std::sync::Arc;

fn octile_config(dynamic: bool, spawn_probability: f64) -> SimulationConfig {
    SimulationConfig {
        algorithm: PlanningAlgorithm::AStar,
        heuristic: Heuristic::Octile,
        dynamic_obstacles_enabled: dynamic,
        spawn_probability,
        ..SimulationConfig::default()
    }
}

fn simulator(config: SimulationConfig) -> AgentSimulator {
    AgentSimulator::new(config, SilentLogger::shared()).unwrap()
}

fn scripted(spawner: &ScriptedSpawner) -> AgentSimulator {
    simulator(octile_config(true, 1.0)).with_spawner(Box::new(spawner.clone()))
}

fn rng() -> StdRng {
    StdRng::seed_from_u64(99)
}

fn path_found(events: &[SimulationEvent]) -> Vec<Position> {
    events
        .iter()
        .find_map(|e| match e {
            SimulationEvent::PathFound { path, .. } => Some(path.clone()),
            _ => None,
        })
        .expect("PathFound event")
}

fn traversal_events(events: &[SimulationEvent]) -> Vec<SimulationEvent> {
    events
        .iter()
        .filter(|e| {
            !matches!(
                e,
                SimulationEvent::Visited { .. }
                    | SimulationEvent::FrontierAdded { .. }
                    | SimulationEvent::SearchFinished { .. }
            )
        })
        .cloned()
        .collect()
}

#[test]
fn test_invalid_spawn_probability_is_rejected() {
    let result = AgentSimulator::new(octile_config(true, 1.5), SilentLogger::shared());
    assert!(matches!(result, Err(DomainError::InvalidConfiguration { .. })));
}

#[test]
fn test_start_without_target_stays_idle() {
    let mut sim = simulator(octile_config(false, 0.0));
    let mut ws = Workspace::new(Grid::new(5, 5).unwrap());
    ws.set_start(Position::new(0, 0)).unwrap();

    let result = sim.start(&ws);
    assert!(matches!(result, Err(DomainError::InvalidConfiguration { .. })));
    assert_eq!(sim.state(), AgentState::Idle);
    assert!(sim.uncommitted_events().is_empty());
    assert!(sim.context().is_none());
}

#[test]
fn test_tick_without_run_fails() {
    let mut sim = simulator(octile_config(false, 0.0));
    assert!(matches!(sim.tick(&mut rng()), Err(DomainError::NoActiveRun)));
}

#[test]
fn test_run_to_completion_without_run_fails() {
    let ws = workspace(Grid::new(4, 4).unwrap(), (0, 0), (3, 3));
    let mut sim = simulator(octile_config(false, 0.0));
    assert!(matches!(
        sim.run_to_completion(&mut rng()),
        Err(DomainError::NoActiveRun)
    ));
    assert_eq!(sim.state(), AgentState::Idle);

    // a finished run does not count as active either
    sim.start(&ws).unwrap();
    assert_eq!(sim.run_to_completion(&mut rng()).unwrap(), AgentState::Arrived);
    assert!(matches!(
        sim.run_to_completion(&mut rng()),
        Err(DomainError::NoActiveRun)
    ));
}

#[test]
fn test_open_grid_run_arrives() {
    let ws = workspace(Grid::new(5, 5).unwrap(), (0, 0), (4, 4));
    let mut sim = simulator(octile_config(false, 0.0));

    assert_eq!(sim.start(&ws).unwrap(), AgentState::Planning);
    assert_eq!(sim.tick(&mut rng()).unwrap(), AgentState::Traversing);

    let ctx = sim.context().unwrap();
    assert_eq!(ctx.current_path.len(), 5);
    assert!((ctx.path_cost - 5.657).abs() < 1e-3);
    assert_eq!(ctx.replan_count, 0);

    assert_eq!(sim.run_to_completion(&mut rng()).unwrap(), AgentState::Arrived);
    let ctx = sim.context().unwrap();
    assert_eq!(ctx.agent_position, Position::new(4, 4));
    assert_eq!(ctx.path_index, 4);

    let events = traversal_events(sim.uncommitted_events());
    assert!(matches!(events.first(), Some(SimulationEvent::RunStarted { .. })));
    assert!(matches!(events.get(1), Some(SimulationEvent::PathFound { .. })));
    let moves: Vec<Position> = events
        .iter()
        .filter_map(|e| match e {
            SimulationEvent::AgentMoved { position } => Some(*position),
            _ => None,
        })
        .collect();
    assert_eq!(
        moves,
        vec![
            Position::new(1, 1),
            Position::new(2, 2),
            Position::new(3, 3),
            Position::new(4, 4)
        ]
    );
    assert!(matches!(
        events.last(),
        Some(SimulationEvent::Arrived { position }) if *position == Position::new(4, 4)
    ));
}

#[test]
fn test_adjacent_target_arrives_in_one_step() {
    let ws = workspace(Grid::new(3, 3).unwrap(), (1, 1), (1, 2));
    let mut sim = simulator(octile_config(false, 0.0));
    sim.start(&ws).unwrap();
    sim.tick(&mut rng()).unwrap();
    assert_eq!(sim.tick(&mut rng()).unwrap(), AgentState::Arrived);
    assert_eq!(sim.metrics().steps_taken, 1);
}

#[test]
fn test_enclosed_target_gets_stuck() {
    let grid = Grid::from_ascii(&[".....", ".###.", ".#.#.", ".###.", "....."]).unwrap();
    let ws = workspace(grid, (0, 0), (2, 2));
    let mut sim = simulator(octile_config(false, 0.0));
    sim.start(&ws).unwrap();

    assert_eq!(sim.tick(&mut rng()).unwrap(), AgentState::Stuck);
    let events = traversal_events(sim.uncommitted_events());
    assert!(matches!(
        events.last(),
        Some(SimulationEvent::Stuck { position, replan_count: 0 }) if *position == Position::new(0, 0)
    ));
    assert!(matches!(sim.tick(&mut rng()), Err(DomainError::NoActiveRun)));
}

#[test]
fn test_obstacle_on_next_cell_triggers_replan() {
    let ws = workspace(Grid::new(5, 7).unwrap(), (2, 0), (2, 6));
    let spawner = ScriptedSpawner::default();
    let mut sim = scripted(&spawner);
    sim.start(&ws).unwrap();
    assert_eq!(sim.tick(&mut rng()).unwrap(), AgentState::Traversing);

    let initial = path_found(sim.uncommitted_events());
    let blocked = initial[2];
    spawner.push(blocked);

    // agent steps to initial[1]; blocked is now its next cell
    assert_eq!(sim.tick(&mut rng()).unwrap(), AgentState::Replanning);
    let ctx = sim.context().unwrap();
    assert_eq!(ctx.agent_position, initial[1]);
    assert!(ctx.grid.is_obstacle(blocked));
    assert!(sim.uncommitted_events().iter().any(|e| matches!(
        e,
        SimulationEvent::ObstacleSpawned { position, blocks_path: true } if *position == blocked
    )));

    assert_eq!(sim.tick(&mut rng()).unwrap(), AgentState::Traversing);
    let ctx = sim.context().unwrap();
    assert_eq!(ctx.replan_count, 1);
    assert_eq!(ctx.path_index, 0);
    assert_eq!(ctx.current_path.first(), Some(initial[1]));
    assert_eq!(ctx.current_path.last(), Some(Position::new(2, 6)));
    assert!(!ctx.current_path.cells().contains(&blocked));
    assert!(ctx.current_path.is_contiguous());
    assert!((ctx.path_cost - ctx.current_path.cost()).abs() < 1e-12);

    assert_eq!(sim.run_to_completion(&mut rng()).unwrap(), AgentState::Arrived);
    assert_eq!(sim.metrics().replans, 1);
}

#[test]
fn test_obstacle_off_path_does_not_replan() {
    let ws = workspace(Grid::new(5, 7).unwrap(), (2, 0), (2, 6));
    let spawner = ScriptedSpawner::default();
    spawner.push(Position::new(4, 0));
    let mut sim = scripted(&spawner);
    sim.start(&ws).unwrap();
    sim.tick(&mut rng()).unwrap();

    assert_eq!(sim.tick(&mut rng()).unwrap(), AgentState::Traversing);
    assert!(sim.uncommitted_events().iter().any(|e| matches!(
        e,
        SimulationEvent::ObstacleSpawned { blocks_path: false, .. }
    )));
    assert_eq!(sim.run_to_completion(&mut rng()).unwrap(), AgentState::Arrived);
    assert_eq!(sim.context().unwrap().replan_count, 0);
}

#[test]
fn test_blocked_sole_corridor_gets_stuck() {
    let grid = Grid::from_ascii(&["#######", ".......", "#######"]).unwrap();
    let ws = workspace(grid, (1, 0), (1, 6));
    let spawner = ScriptedSpawner::default();
    spawner.push(Position::new(1, 3));
    let mut sim = scripted(&spawner);

    sim.start(&ws).unwrap();
    assert_eq!(sim.run_to_completion(&mut rng()).unwrap(), AgentState::Stuck);
    let ctx = sim.context().unwrap();
    assert_eq!(ctx.agent_position, Position::new(1, 1));
    assert_eq!(ctx.replan_count, 0);
    assert_eq!(sim.metrics().outcome, Some(AgentState::Stuck));
}

#[test]
fn test_blocked_route_with_alternate_corridor_arrives() {
    let grid = Grid::from_ascii(&[".......", ".#####.", "......."]).unwrap();
    let ws = workspace(grid, (0, 0), (0, 6));
    let spawner = ScriptedSpawner::default();
    spawner.push(Position::new(0, 3));
    let mut sim = scripted(&spawner);

    sim.start(&ws).unwrap();
    assert_eq!(sim.run_to_completion(&mut rng()).unwrap(), AgentState::Arrived);
    let ctx = sim.context().unwrap();
    assert!(ctx.replan_count >= 1);
    assert_eq!(ctx.agent_position, Position::new(0, 6));
    assert!(ctx.current_path.is_clear(&ctx.grid));
    assert!(!ctx.current_path.cells().contains(&Position::new(0, 3)));
    assert!(spawner.calls() > 1);
}

#[test]
fn test_dynamic_obstacles_disabled_never_spawn() {
    let ws = workspace(Grid::new(6, 6).unwrap(), (0, 0), (5, 5));
    let spawner = ScriptedSpawner::default();
    spawner.push(Position::new(2, 2));
    let mut sim =
        simulator(octile_config(false, 1.0)).with_spawner(Box::new(spawner.clone()));

    sim.start(&ws).unwrap();
    assert_eq!(sim.run_to_completion(&mut rng()).unwrap(), AgentState::Arrived);
    assert_eq!(spawner.calls(), 0);
    assert_eq!(sim.metrics().obstacles_spawned, 0);
}

#[test]
fn test_random_spawns_never_trap_the_agent_on_an_obstacle() {
    for seed in 0..10 {
        let ws = workspace(Grid::new(10, 10).unwrap(), (0, 0), (9, 9));
        let mut sim = simulator(octile_config(true, 1.0));
        let mut rng = StdRng::seed_from_u64(seed);
        sim.start(&ws).unwrap();
        let outcome = sim.run_to_completion(&mut rng).unwrap();
        assert!(matches!(outcome, AgentState::Arrived | AgentState::Stuck));

        let mut spawned: HashSet<Position> = HashSet::new();
        for event in sim.uncommitted_events() {
            match event {
                SimulationEvent::AgentMoved { position } => {
                    assert!(!spawned.contains(position), "seed {} moved onto {}", seed, position)
                }
                SimulationEvent::ObstacleSpawned { position, .. } => {
                    assert_ne!(*position, Position::new(0, 0));
                    assert_ne!(*position, Position::new(9, 9));
                    spawned.insert(*position);
                }
                _ => {}
            }
        }
        if outcome == AgentState::Arrived {
            // cells behind the agent may have been blocked after it left them
            let ctx = sim.context().unwrap();
            assert!(ctx.remaining_path().iter().all(|p| ctx.grid.is_passable(*p)));
            assert!(ctx.grid.is_passable(ctx.agent_position));
        }
    }
}

#[test]
fn test_cancel_before_planning_aborts() {
    let ws = workspace(Grid::new(5, 5).unwrap(), (0, 0), (4, 4));
    let flag = CancelFlag::new();
    let mut sim = simulator(octile_config(false, 0.0)).with_cancel(Arc::new(flag.clone()));
    sim.start(&ws).unwrap();
    flag.cancel();

    assert_eq!(sim.tick(&mut rng()).unwrap(), AgentState::Aborted);
    assert!(matches!(
        sim.uncommitted_events().last(),
        Some(SimulationEvent::Aborted { position: Some(p) }) if *p == Position::new(0, 0)
    ));
    assert_eq!(sim.metrics().outcome, Some(AgentState::Aborted));
}

#[test]
fn test_cancel_mid_traversal_aborts_in_place() {
    let ws = workspace(Grid::new(5, 5).unwrap(), (0, 0), (4, 4));
    let flag = CancelFlag::new();
    let mut sim = simulator(octile_config(false, 0.0)).with_cancel(Arc::new(flag.clone()));
    sim.start(&ws).unwrap();
    sim.tick(&mut rng()).unwrap();
    sim.tick(&mut rng()).unwrap();
    flag.cancel();

    assert_eq!(sim.tick(&mut rng()).unwrap(), AgentState::Aborted);
    assert_eq!(sim.context().unwrap().agent_position, Position::new(1, 1));
}

#[test]
fn test_active_run_rejects_restart_and_reconfiguration() {
    let ws = workspace(Grid::new(5, 5).unwrap(), (0, 0), (4, 4));
    let mut sim = simulator(octile_config(false, 0.0));
    sim.start(&ws).unwrap();

    assert!(matches!(sim.start(&ws), Err(DomainError::RunActive)));
    assert!(matches!(
        sim.set_config(SimulationConfig::default()),
        Err(DomainError::RunActive)
    ));
    assert!(matches!(sim.reset(), Err(DomainError::RunActive)));
}

#[test]
fn test_finished_run_can_restart_with_new_id() {
    let ws = workspace(Grid::new(4, 4).unwrap(), (0, 0), (3, 3));
    let mut sim = simulator(octile_config(false, 0.0));
    sim.start(&ws).unwrap();
    let first = sim.run_id();
    sim.run_to_completion(&mut rng()).unwrap();
    sim.mark_events_as_committed();

    assert_eq!(sim.start(&ws).unwrap(), AgentState::Planning);
    assert_ne!(sim.run_id(), first);
    assert_eq!(sim.metrics().steps_taken, 0);
    assert_eq!(sim.take_events().len(), 1);
    assert!(sim.uncommitted_events().is_empty());
}

#[test]
fn test_reset_clears_context_and_metrics() {
    let ws = workspace(Grid::new(4, 4).unwrap(), (0, 0), (3, 3));
    let mut sim = simulator(octile_config(false, 0.0));
    assert!(matches!(
        sim.run_to_completion(&mut rng()),
        Err(DomainError::NoActiveRun)
    ));
    sim.start(&ws).unwrap();
    sim.run_to_completion(&mut rng()).unwrap();

    sim.reset().unwrap();
    assert_eq!(sim.state(), AgentState::Idle);
    assert!(sim.context().is_none());
    assert_eq!(sim.metrics(), &SimulationMetrics::default());
}

#[test]
fn test_metrics_match_event_projection() {
    let grid = Grid::from_ascii(&[".......", ".#####.", "......."]).unwrap();
    let ws = workspace(grid, (0, 0), (0, 6));
    let spawner = ScriptedSpawner::default();
    spawner.push(Position::new(0, 3));
    let mut sim = scripted(&spawner);
    sim.start(&ws).unwrap();
    sim.run_to_completion(&mut rng()).unwrap();

    let metrics = sim.metrics().clone();
    assert_eq!(metrics, SimulationMetrics::from_events(sim.uncommitted_events()));
    assert_eq!(metrics.algorithm, "A*");
    assert_eq!(metrics.heuristic, "Octile");
    assert_eq!(metrics.searches, 2);
    assert_eq!(metrics.replans, 1);
    assert_eq!(metrics.obstacles_spawned, 1);
    assert_eq!(metrics.outcome, Some(AgentState::Arrived));
    assert_eq!(metrics.last_position, Some(Position::new(0, 6)));
    // one step to (0, 1), then the eight-cell detour
    assert_eq!(metrics.steps_taken, 9);
    assert_eq!(metrics.path_length, 9);
    assert!(metrics.total_nodes_visited >= metrics.nodes_visited);
}
