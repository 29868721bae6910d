use super::context::{SimulationConfig, SimulationContext};
use super::events::SimulationEvent;
use super::projections::SimulationMetrics;
use super::state::AgentState;
use crate::common::{DomainError, DomainResult};
use crate::domains::dynamics::{ObstacleSpawner, RandomSpawner};
use crate::domains::grid::{Position, Workspace};
use crate::domains::logger::DynStatusLogger;
use crate::domains::path_planning::{
    extract, CancelCheck, NeverCancel, SearchEvent, SearchOutcome, SearchReport,
};
use rand::RngCore;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

pub type DynCancelCheck = Arc<dyn CancelCheck + Send + Sync>;

/// Plans a path, walks it one cell per tick and re-plans when a spawned
/// obstacle lands on the part of the path still ahead.
///
/// Every tick of an active run first polls the cancellation signal. Events
/// produced by a tick accumulate in `uncommitted_events` until the caller
/// drains them.
pub struct AgentSimulator {
    config: SimulationConfig,
    state: AgentState,
    context: Option<SimulationContext>,
    run_id: Uuid,
    cancel: DynCancelCheck,
    spawner: Box<dyn ObstacleSpawner>,
    logger: DynStatusLogger,
    metrics: SimulationMetrics,
    uncommitted_events: Vec<SimulationEvent>,
}

impl AgentSimulator {
    pub fn new(config: SimulationConfig, logger: DynStatusLogger) -> DomainResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            state: AgentState::Idle,
            context: None,
            run_id: Uuid::nil(),
            cancel: Arc::new(NeverCancel),
            spawner: Box::new(RandomSpawner),
            logger,
            metrics: SimulationMetrics::default(),
            uncommitted_events: Vec::new(),
        })
    }

    pub fn with_cancel(mut self, cancel: DynCancelCheck) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn with_spawner(mut self, spawner: Box<dyn ObstacleSpawner>) -> Self {
        self.spawner = spawner;
        self
    }

    pub fn state(&self) -> AgentState {
        self.state
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: SimulationConfig) -> DomainResult<()> {
        if self.state.is_active() {
            return Err(DomainError::RunActive);
        }
        config.validate()?;
        self.config = config;
        Ok(())
    }

    /// The current or most recent run's state.
    pub fn context(&self) -> Option<&SimulationContext> {
        self.context.as_ref()
    }

    pub fn metrics(&self) -> &SimulationMetrics {
        &self.metrics
    }

    pub fn uncommitted_events(&self) -> &[SimulationEvent] {
        &self.uncommitted_events
    }

    pub fn mark_events_as_committed(&mut self) {
        self.uncommitted_events.clear();
    }

    pub fn take_events(&mut self) -> Vec<SimulationEvent> {
        std::mem::take(&mut self.uncommitted_events)
    }

    /// Forget the last run: back to Idle with no context and zeroed metrics.
    pub fn reset(&mut self) -> DomainResult<()> {
        if self.state.is_active() {
            return Err(DomainError::RunActive);
        }
        self.state = AgentState::Idle;
        self.context = None;
        self.metrics = SimulationMetrics::default();
        self.uncommitted_events.clear();
        Ok(())
    }

    /// Idle -> Planning. Snapshots the workspace grid; the run owns that copy
    /// until it ends. A terminal simulator is reset to Idle first.
    pub fn start(&mut self, workspace: &Workspace) -> DomainResult<AgentState> {
        if self.state.is_active() {
            return Err(DomainError::RunActive);
        }
        self.state = AgentState::Idle;
        self.context = None;

        let (start, target) = workspace.endpoints()?;
        self.run_id = Uuid::new_v4();
        self.context = Some(SimulationContext::new(workspace.grid.clone(), start, target));
        self.record(SimulationEvent::RunStarted {
            run_id: self.run_id,
            start,
            target,
            algorithm: self.config.algorithm,
            heuristic: self.config.heuristic,
        });
        self.transition(AgentState::Planning);
        Ok(self.state)
    }

    /// Advance an active run by one step.
    pub fn tick(&mut self, rng: &mut dyn RngCore) -> DomainResult<AgentState> {
        if !self.state.is_active() {
            return Err(DomainError::NoActiveRun);
        }
        if self.cancel.should_stop() {
            self.abort();
            return Ok(self.state);
        }

        match self.state {
            AgentState::Planning => self.plan()?,
            AgentState::Traversing => self.advance(rng)?,
            AgentState::Replanning => self.replan()?,
            _ => {}
        }
        Ok(self.state)
    }

    /// Tick until the active run ends. Fails with `NoActiveRun` when called
    /// without one, like `tick`.
    pub fn run_to_completion(&mut self, rng: &mut dyn RngCore) -> DomainResult<AgentState> {
        if !self.state.is_active() {
            return Err(DomainError::NoActiveRun);
        }
        while self.state.is_active() {
            self.tick(rng)?;
        }
        Ok(self.state)
    }

    fn ctx(&self) -> DomainResult<&SimulationContext> {
        self.context.as_ref().ok_or(DomainError::NoActiveRun)
    }

    fn ctx_mut(&mut self) -> DomainResult<&mut SimulationContext> {
        self.context.as_mut().ok_or(DomainError::NoActiveRun)
    }

    fn record(&mut self, event: SimulationEvent) {
        self.metrics.apply_event(&event);
        self.uncommitted_events.push(event);
    }

    fn transition(&mut self, next: AgentState) {
        info!(run_id = %self.run_id, from = ?self.state, to = ?next, "agent state changed");
        self.state = next;
    }

    fn search_from(&mut self, from: Position) -> DomainResult<SearchReport> {
        let engine = self.config.engine();
        let ctx = self.ctx()?;
        let mut events = Vec::new();
        let report = engine.search(
            &ctx.grid,
            from,
            ctx.target,
            self.cancel.as_ref(),
            &mut |event: SearchEvent| events.push(SimulationEvent::from(event)),
        );
        for event in events {
            self.record(event);
        }
        self.record(SimulationEvent::SearchFinished {
            from,
            nodes_visited: report.nodes_visited,
            elapsed_ms: report.elapsed_ms(),
            found: report.outcome.is_found(),
        });
        Ok(report)
    }

    fn plan(&mut self) -> DomainResult<()> {
        let start = self.ctx()?.start;
        self.logger.info("Searching…");

        match self.search_from(start)?.outcome {
            SearchOutcome::Found(goal) => {
                let path = extract(&goal);
                let ctx = self.ctx_mut()?;
                ctx.agent_position = start;
                ctx.replan_count = 0;
                ctx.adopt_path(path.clone());
                let cost = ctx.path_cost;
                self.record(SimulationEvent::PathFound {
                    path: path.into_cells(),
                    cost,
                });
                self.transition(AgentState::Traversing);
                self.logger.info("Path found! Agent moving…");
            }
            SearchOutcome::NotFound => {
                self.logger.error("No path found! Remove some walls.");
                self.stuck()?;
            }
            SearchOutcome::Aborted => self.abort(),
        }
        Ok(())
    }

    fn advance(&mut self, rng: &mut dyn RngCore) -> DomainResult<()> {
        let spawn_probability = self
            .config
            .dynamic_obstacles_enabled
            .then_some(self.config.spawn_probability);

        let Some(ctx) = self.context.as_mut() else {
            return Err(DomainError::NoActiveRun);
        };
        let next_index = ctx.path_index + 1;
        let Some(next) = ctx.current_path.get(next_index) else {
            // the path is exhausted without reaching the target
            return self.stuck();
        };
        ctx.path_index = next_index;
        ctx.agent_position = next;
        let (start, target) = (ctx.start, ctx.target);

        let spawned = match spawn_probability {
            Some(p) => self
                .spawner
                .spawn(&mut ctx.grid, start, target, next, p, rng),
            None => None,
        };
        let blocks_path = spawned.is_some_and(|pos| ctx.remaining_path().contains(&pos));

        self.record(SimulationEvent::AgentMoved { position: next });
        if let Some(position) = spawned {
            self.record(SimulationEvent::ObstacleSpawned {
                position,
                blocks_path,
            });
        }

        if blocks_path {
            warn!(run_id = %self.run_id, at = %next, "obstacle landed on the path ahead");
            self.logger.warn("Obstacle! Re-planning…");
            self.transition(AgentState::Replanning);
        } else if next == target {
            self.record(SimulationEvent::Arrived { position: next });
            self.transition(AgentState::Arrived);
            self.logger.info("Target Reached!");
        }
        Ok(())
    }

    fn replan(&mut self) -> DomainResult<()> {
        let from = self.ctx()?.agent_position;

        match self.search_from(from)?.outcome {
            SearchOutcome::Found(goal) => {
                let path = extract(&goal);
                let ctx = self.ctx_mut()?;
                ctx.adopt_path(path.clone());
                ctx.replan_count += 1;
                let (replan_count, cost) = (ctx.replan_count, ctx.path_cost);
                self.record(SimulationEvent::Replanned {
                    path: path.into_cells(),
                    replan_count,
                    cost,
                });
                self.transition(AgentState::Traversing);
                self.logger
                    .info(&format!("Re-planned around obstacle ({} so far)", replan_count));
            }
            SearchOutcome::NotFound => {
                self.logger.error("Stuck! No path after obstacle.");
                self.stuck()?;
            }
            SearchOutcome::Aborted => self.abort(),
        }
        Ok(())
    }

    fn stuck(&mut self) -> DomainResult<()> {
        let ctx = self.ctx()?;
        let (position, replan_count) = (ctx.agent_position, ctx.replan_count);
        warn!(run_id = %self.run_id, at = %position, replan_count, "no path to target");
        self.record(SimulationEvent::Stuck {
            position,
            replan_count,
        });
        self.transition(AgentState::Stuck);
        Ok(())
    }

    fn abort(&mut self) {
        let position = self.context.as_ref().map(|ctx| ctx.agent_position);
        self.record(SimulationEvent::Aborted { position });
        self.transition(AgentState::Aborted);
        self.logger.warn("Stopped.");
    }
}
