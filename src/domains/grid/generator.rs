use super::workspace::Workspace;
use crate::common::{DomainError, DomainResult};
use rand::Rng;

/// Fill the grid with random walls. Every cell except start and target is
/// independently turned into an obstacle with probability `density` and
/// cleared otherwise. Returns the number of obstacles placed.
pub fn generate_random_map<R: Rng + ?Sized>(
    workspace: &mut Workspace,
    density: f64,
    rng: &mut R,
) -> DomainResult<usize> {
    let (start, target) = match (workspace.start, workspace.target) {
        (Some(start), Some(target)) => (start, target),
        _ => {
            return Err(DomainError::invalid_configuration(
                "Place start and target before generating a map",
            ))
        }
    };
    if !(0.0..=1.0).contains(&density) {
        return Err(DomainError::invalid_configuration(format!(
            "Wall density must be within [0, 1], got {}",
            density
        )));
    }

    let mut placed = 0;
    let cells: Vec<_> = workspace.grid.positions().collect();
    for pos in cells {
        if pos == start || pos == target {
            continue;
        }
        if rng.gen::<f64>() < density {
            workspace.grid.set_obstacle(pos)?;
            placed += 1;
        } else {
            workspace.grid.clear_obstacle(pos)?;
        }
    }
    tracing::debug!(placed, density, "generated random map");
    Ok(placed)
}
