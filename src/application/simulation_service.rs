use crate::common::{ApplicationResult, DomainError, DomainResult};
use crate::config::Config;
use crate::domains::agent::{
    AgentSimulator, AgentState, EventSink, SimulationConfig, SimulationContext, SimulationMetrics,
};
use crate::domains::grid::{generate_random_map, Position, Workspace};
use crate::domains::logger::DynStatusLogger;
use crate::domains::path_planning::CancelFlag;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// Entry point for the control side: grid editing, configuration and the run
/// lifecycle. Edits are rejected while a run is active; once a run ends, its
/// grid (including any spawned obstacles) becomes the editable grid again.
pub struct SimulationService {
    workspace: Workspace,
    simulator: AgentSimulator,
    rng: StdRng,
    cancel: CancelFlag,
    sink: Box<dyn EventSink>,
    logger: DynStatusLogger,
    wall_density: f64,
}

impl SimulationService {
    pub fn new(
        config: &Config,
        sink: Box<dyn EventSink>,
        logger: DynStatusLogger,
    ) -> ApplicationResult<Self> {
        config.validate()?;
        let workspace = Workspace::with_defaults(config.grid.rows, config.grid.cols)?;
        let rng = match config.grid.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut service =
            Self::from_parts(workspace, config.simulation_config(), rng, sink, logger)?;
        service.wall_density = config.wall_density_fraction();
        Ok(service)
    }

    pub fn from_parts(
        workspace: Workspace,
        simulation: SimulationConfig,
        rng: StdRng,
        sink: Box<dyn EventSink>,
        logger: DynStatusLogger,
    ) -> DomainResult<Self> {
        let cancel = CancelFlag::new();
        let simulator =
            AgentSimulator::new(simulation, logger.clone())?.with_cancel(Arc::new(cancel.clone()));
        Ok(Self {
            workspace,
            simulator,
            rng,
            cancel,
            sink,
            logger,
            wall_density: Config::default().wall_density_fraction(),
        })
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn state(&self) -> AgentState {
        self.simulator.state()
    }

    pub fn run_id(&self) -> Uuid {
        self.simulator.run_id()
    }

    pub fn is_run_active(&self) -> bool {
        self.simulator.state().is_active()
    }

    pub fn metrics(&self) -> &SimulationMetrics {
        self.simulator.metrics()
    }

    /// The active or most recent run.
    pub fn run_context(&self) -> Option<&SimulationContext> {
        self.simulator.context()
    }

    pub fn simulation_config(&self) -> &SimulationConfig {
        self.simulator.config()
    }

    /// Handle the control side keeps to stop a run from elsewhere.
    pub fn cancel_handle(&self) -> CancelFlag {
        self.cancel.clone()
    }

    fn ensure_editable(&self) -> DomainResult<()> {
        if self.is_run_active() {
            return Err(DomainError::RunActive);
        }
        Ok(())
    }

    pub fn set_config(&mut self, config: SimulationConfig) -> DomainResult<()> {
        self.simulator.set_config(config)
    }

    pub fn set_wall_density(&mut self, density: f64) -> DomainResult<()> {
        if !(0.0..=1.0).contains(&density) {
            return Err(DomainError::invalid_configuration(format!(
                "Wall density must be within [0, 1], got {}",
                density
            )));
        }
        self.wall_density = density;
        Ok(())
    }

    pub fn set_obstacle(&mut self, pos: Position) -> DomainResult<()> {
        self.ensure_editable()?;
        self.workspace.set_obstacle(pos)
    }

    pub fn clear_obstacle(&mut self, pos: Position) -> DomainResult<()> {
        self.ensure_editable()?;
        self.workspace.clear_obstacle(pos)
    }

    pub fn set_start(&mut self, pos: Position) -> DomainResult<()> {
        self.ensure_editable()?;
        self.workspace.set_start(pos)
    }

    pub fn set_target(&mut self, pos: Position) -> DomainResult<()> {
        self.ensure_editable()?;
        self.workspace.set_target(pos)
    }

    pub fn clear_walls(&mut self) -> DomainResult<()> {
        self.ensure_editable()?;
        self.workspace.clear_walls();
        self.logger.info("Walls cleared.");
        Ok(())
    }

    /// Drop the last run's path and agent position, keeping the grid.
    pub fn clear_path(&mut self) -> DomainResult<()> {
        self.ensure_editable()?;
        self.simulator.reset()
    }

    pub fn resize(&mut self, rows: usize, cols: usize) -> DomainResult<()> {
        self.ensure_editable()?;
        self.workspace.resize(rows, cols)?;
        self.simulator.reset()?;
        self.logger.info("Grid resized.");
        Ok(())
    }

    /// Fresh empty grid of the current size, default markers, zeroed metrics.
    pub fn reset(&mut self) -> DomainResult<()> {
        self.ensure_editable()?;
        let (rows, cols) = (self.workspace.grid.rows(), self.workspace.grid.cols());
        self.workspace = Workspace::with_defaults(rows, cols)?;
        self.simulator.reset()?;
        self.logger.info("Reset complete.");
        Ok(())
    }

    pub fn generate_random_map(&mut self) -> DomainResult<usize> {
        self.ensure_editable()?;
        let placed = generate_random_map(&mut self.workspace, self.wall_density, &mut self.rng)?;
        self.logger.info("Random map generated.");
        Ok(placed)
    }

    pub fn start_run(&mut self) -> DomainResult<AgentState> {
        self.ensure_editable()?;
        self.cancel.reset();
        let result = self.simulator.start(&self.workspace);
        self.flush_events();
        if result.is_ok() {
            info!(run_id = %self.simulator.run_id(), "run started");
        }
        result
    }

    pub fn tick(&mut self) -> DomainResult<AgentState> {
        let result = self.simulator.tick(&mut self.rng);
        self.flush_events();
        if matches!(result, Ok(state) if state.is_terminal()) {
            self.absorb_run_grid();
        }
        result
    }

    pub fn run_to_completion(&mut self) -> DomainResult<AgentState> {
        if !self.is_run_active() {
            self.start_run()?;
        }
        while self.is_run_active() {
            self.tick()?;
        }
        Ok(self.state())
    }

    /// Request cancellation; the run stops at its next poll point.
    pub fn stop(&self) {
        self.cancel.cancel();
    }

    fn flush_events(&mut self) {
        let run_id = self.simulator.run_id();
        for event in self.simulator.take_events() {
            self.sink.publish(run_id, &event);
        }
    }

    fn absorb_run_grid(&mut self) {
        if let Some(ctx) = self.simulator.context() {
            self.workspace.grid = ctx.grid.clone();
        }
    }
}
