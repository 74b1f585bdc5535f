//! Render system: read-only views for the presentation layer.

use std::collections::BTreeMap;

use rescue_core::enums::Team;
use rescue_core::state::{HazardRender, RenderFrame, ResourceRender};

use crate::vehicle::Vehicle;
use crate::world::World;

/// Build one animation frame. `alpha` is the fraction of the current logical
/// tick that has elapsed and only affects vehicle positions.
pub fn build_frame(tick: u64, alpha: f32, world: &World, vehicles: &[Vehicle]) -> RenderFrame {
    let grid = &world.grid;
    RenderFrame {
        tick,
        vehicles: vehicles
            .iter()
            .map(|v| v.render_state(alpha, grid))
            .collect(),
        resources: world
            .resources
            .iter()
            .map(|r| ResourceRender {
                id: r.id,
                kind: r.kind,
                position: grid.cell_to_pixel(r.cell),
            })
            .collect(),
        hazards: world
            .hazards
            .iter()
            .map(|h| HazardRender {
                id: h.id,
                kind: h.kind,
                center: grid.cell_center(h.cell),
                radius: h.radius,
                active: h.active,
            })
            .collect(),
        scores: team_scores(vehicles),
    }
}

/// Banked score per team. Both teams are always present.
pub fn team_scores(vehicles: &[Vehicle]) -> BTreeMap<Team, u32> {
    let mut scores: BTreeMap<Team, u32> = Team::ALL.into_iter().map(|t| (t, 0)).collect();
    for v in vehicles {
        *scores.entry(v.team).or_default() += v.score;
    }
    scores
}
