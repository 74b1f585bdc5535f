//! Guarded rules and the priority-chain evaluator.
//!
//! Rules are plain functions of (vehicle, view). The only state they touch is
//! the caller's random generator, used by exploration and escape jitter.

use glam::Vec2;
use rand::Rng;

use rescue_core::constants::{ESCAPE_DISTANCE, EXPLORATION_ATTEMPTS};
use rescue_core::enums::ResourceKind;
use rescue_core::types::Cell;

use crate::profiles::{get_profile, VehicleProfile};
use crate::strategy::StrategyId;
use crate::view::{DecisionContext, Intent, ResourceSighting, WorldView};

/// One guarded rule. `kinds: None` means "everything the class may carry";
/// an explicit list is intersected with the class's allowed kinds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rule {
    /// Move away from the nearest active hazard when closer than its radius
    /// plus `margin` pixels.
    EvadeHazards { margin: f32 },
    /// Return once the trip budget is spent or the hold is full.
    ForcedReturn,
    /// Return as soon as anything is on board.
    ReturnWhenLoaded,
    /// Sitting empty at base with trips left: go for the best target now.
    SeekFromBase,
    SeekHighValue {
        kinds: Option<&'static [ResourceKind]>,
        min_value: u32,
    },
    SeekNearest {
        kinds: Option<&'static [ResourceKind]>,
    },
    /// Drive at an enemy within `range` cells that is outside any base.
    ChaseEnemy { range: u32 },
    /// Step away from an enemy within `range` cells.
    AvoidEnemy { range: u32 },
    /// Random walkable, non-base cell; always fires.
    Explore,
}

/// Run the rule chain of `strategy` for one vehicle. Always returns an intent.
pub fn decide<V, R>(ctx: &DecisionContext, strategy: StrategyId, view: &V, rng: &mut R) -> Intent
where
    V: WorldView + ?Sized,
    R: Rng,
{
    let profile = get_profile(ctx.class);

    for rule in strategy.rules() {
        if let Some(intent) = evaluate(rule, ctx, &profile, view, rng) {
            log::debug!("{} [{}] {:?} -> {:?}", ctx.id, strategy, rule, intent);
            return intent;
        }
    }

    Intent::Move(explore(view, rng))
}

/// Evaluate a single rule. `None` means the guard did not fire.
pub fn evaluate<V, R>(
    rule: &Rule,
    ctx: &DecisionContext,
    profile: &VehicleProfile,
    view: &V,
    rng: &mut R,
) -> Option<Intent>
where
    V: WorldView + ?Sized,
    R: Rng,
{
    match *rule {
        Rule::EvadeHazards { margin } => evade_hazards(ctx, view, margin, rng).map(Intent::Move),
        Rule::ForcedReturn => {
            (ctx.trips_remaining == 0 || ctx.cargo_len >= profile.capacity)
                .then_some(Intent::ReturnToBase)
        }
        Rule::ReturnWhenLoaded => (ctx.cargo_len > 0).then_some(Intent::ReturnToBase),
        Rule::SeekFromBase => {
            if !ctx.at_base || ctx.cargo_len > 0 || ctx.trips_remaining == 0 {
                return None;
            }
            view.highest_value_resource(ctx.cell, profile.allowed, 0, profile.value_weight)
                .or_else(|| view.nearest_resource(ctx.cell, profile.allowed))
                .map(collect)
        }
        Rule::SeekHighValue { kinds, min_value } => {
            let kinds = allowed_kinds(kinds, profile);
            view.highest_value_resource(ctx.cell, &kinds, min_value, profile.value_weight)
                .map(collect)
        }
        Rule::SeekNearest { kinds } => {
            let kinds = allowed_kinds(kinds, profile);
            view.nearest_resource(ctx.cell, &kinds).map(collect)
        }
        Rule::ChaseEnemy { range } => view
            .nearest_enemy(ctx.team, ctx.cell)
            .filter(|enemy| ctx.cell.manhattan(*enemy) <= range && !view.is_base_cell(*enemy))
            .map(Intent::Move),
        Rule::AvoidEnemy { range } => {
            let enemy = view
                .nearest_enemy(ctx.team, ctx.cell)
                .filter(|enemy| ctx.cell.manhattan(*enemy) <= range)?;
            step_away_from(ctx.cell, enemy, view).map(Intent::Move)
        }
        Rule::Explore => Some(Intent::Move(explore(view, rng))),
    }
}

fn collect(resource: ResourceSighting) -> Intent {
    Intent::Collect {
        resource: resource.id,
        cell: resource.cell,
    }
}

fn allowed_kinds(kinds: Option<&'static [ResourceKind]>, profile: &VehicleProfile) -> Vec<ResourceKind> {
    match kinds {
        Some(kinds) => kinds
            .iter()
            .copied()
            .filter(|k| profile.can_carry(*k))
            .collect(),
        None => profile.allowed.to_vec(),
    }
}

/// Escape cell away from the nearest active hazard, or `None` when safe or
/// cornered.
fn evade_hazards<V, R>(ctx: &DecisionContext, view: &V, margin: f32, rng: &mut R) -> Option<Cell>
where
    V: WorldView + ?Sized,
    R: Rng,
{
    let hazard = view.nearest_active_hazard(ctx.cell)?;
    let here = view.cell_center(ctx.cell);
    let distance = here.distance(hazard.center);
    if distance >= hazard.radius + margin {
        return None;
    }

    let away = here - hazard.center;
    let direction = if away.length() < 1.0 {
        // Standing on the hazard center: any direction will do.
        let angle = rng.gen_range(0.0..std::f32::consts::TAU);
        Vec2::new(angle.cos(), angle.sin())
    } else {
        away.normalize()
    };

    let escape = view.point_to_cell(here + direction * ESCAPE_DISTANCE);
    if escape != ctx.cell && view.is_walkable(escape) {
        return Some(escape);
    }

    // Clipped by the map edge or an obstacle: take the best single step.
    ctx.cell
        .neighbors4()
        .into_iter()
        .filter(|n| view.in_bounds(*n) && view.is_walkable(*n))
        .map(|n| (n, view.cell_center(n).distance(hazard.center)))
        .filter(|(_, d)| *d > distance)
        .fold(None, |best: Option<(Cell, f32)>, candidate| match best {
            Some((_, d)) if d >= candidate.1 => best,
            _ => Some(candidate),
        })
        .map(|(cell, _)| cell)
}

fn step_away_from<V>(from: Cell, threat: Cell, view: &V) -> Option<Cell>
where
    V: WorldView + ?Sized,
{
    let current = from.manhattan(threat);
    from.neighbors4()
        .into_iter()
        .filter(|n| view.in_bounds(*n) && view.is_walkable(*n))
        .filter(|n| n.manhattan(threat) > current)
        .fold(None, |best: Option<Cell>, n| match best {
            Some(b) if b.manhattan(threat) >= n.manhattan(threat) => best,
            _ => Some(n),
        })
}

/// Random walkable, non-base cell, falling back to the map center.
pub fn explore<V, R>(view: &V, rng: &mut R) -> Cell
where
    V: WorldView + ?Sized,
    R: Rng,
{
    let (w, h) = view.dimensions();
    for _ in 0..EXPLORATION_ATTEMPTS {
        let cell = Cell::new(rng.gen_range(0..w.max(1)), rng.gen_range(0..h.max(1)));
        if view.is_walkable(cell) && !view.is_base_cell(cell) {
            return cell;
        }
    }
    Cell::new(w / 2, h / 2)
}
