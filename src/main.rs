use dynamic_pathfinder::adapters::outbound::{
    init_channel_event_sink, init_combined_logger, init_tracing_logger,
};
use dynamic_pathfinder::application::SimulationService;
use dynamic_pathfinder::domains::agent::SimulationContext;
use dynamic_pathfinder::domains::grid::{Position, Workspace};
use dynamic_pathfinder::Config;
use std::collections::BTreeMap;
use std::error::Error;
use std::path::Path;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // the `log` facade stays free for fast_log
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.toml".to_string());
    let config = if Path::new(&config_path).exists() {
        let config = Config::from_file(&config_path).await?;
        info!(path = %config_path, "configuration loaded");
        config
    } else {
        warn!(path = %config_path, "no configuration file, using defaults");
        Config::default()
    };

    let logger = match &config.logging.file {
        Some(path) => init_combined_logger(path),
        None => init_tracing_logger(),
    };

    let (sink, mut events) = init_channel_event_sink(4096);
    let consumer = tokio::spawn(async move {
        let mut counts: BTreeMap<String, usize> = BTreeMap::new();
        while let Some(envelope) = events.recv().await {
            *counts.entry(envelope.event_type).or_default() += 1;
        }
        counts
    });

    let mut service = SimulationService::new(&config, Box::new(sink), logger)?;
    let cancel = service.cancel_handle();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            cancel.cancel();
        }
    });

    let walls = service.generate_random_map()?;
    info!(
        rows = config.grid.rows,
        cols = config.grid.cols,
        walls,
        "random map generated"
    );

    let step_delay = service.simulation_config().step_delay;
    match service.start_run() {
        Ok(_) => {
            while service.is_run_active() {
                service.tick()?;
                tokio::time::sleep(step_delay).await;
            }
        }
        Err(e) => error!(error = %e, "run could not start"),
    }

    println!("{}", render(service.workspace(), service.run_context()));
    let metrics = service.metrics();
    println!(
        "outcome={:?} algorithm={} heuristic={} visited={} total_visited={} cost={:.1} time_ms={:.2} replans={} steps={} spawned={}",
        service.state(),
        metrics.algorithm,
        metrics.heuristic,
        metrics.nodes_visited,
        metrics.total_nodes_visited,
        metrics.path_cost,
        metrics.search_time_ms,
        metrics.replans,
        metrics.steps_taken,
        metrics.obstacles_spawned,
    );

    // closing the channel ends the consumer
    drop(service);
    let counts = consumer.await?;
    info!(?counts, "events delivered");
    Ok(())
}

fn render(workspace: &Workspace, run: Option<&SimulationContext>) -> String {
    let grid = &workspace.grid;
    let mut out = String::with_capacity(grid.rows() * (grid.cols() + 1));
    for r in 0..grid.rows() as i32 {
        for c in 0..grid.cols() as i32 {
            let pos = Position::new(r, c);
            let ch = if Some(pos) == workspace.start {
                'S'
            } else if Some(pos) == workspace.target {
                'T'
            } else if grid.is_obstacle(pos) {
                '#'
            } else if run.is_some_and(|ctx| ctx.agent_position == pos) {
                '@'
            } else if run.is_some_and(|ctx| ctx.current_path.cells().contains(&pos)) {
                '*'
            } else {
                '.'
            };
            out.push(ch);
        }
        out.push('\n');
    }
    out
}
