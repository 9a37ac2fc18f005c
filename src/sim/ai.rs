use rand::Rng;

use super::commands;
use super::context::TickContext;
use super::production;
use super::research;
use crate::id::{CityId, PlayerId, UnitId};
use crate::model::{BuildingKind, DIRECTIONS, GameEvent, ProductionKind, UnitKind};

/// One pass of the computer player's policy: wander units, keep city
/// queues busy, and sometimes refocus research. Never fails; moves and
/// orders that do not apply are skipped.
pub fn take_turn(ctx: &mut TickContext, player: PlayerId) {
    move_units(ctx, player);
    fill_queues(ctx, player);

    if ctx.roll_percent(ctx.config.ai_research_chance) {
        match research::choose_next_tech(ctx.world, player) {
            Ok(Some(tech)) => ctx.events.push(GameEvent::ResearchChanged { player, tech }),
            Ok(None) => {}
            Err(err) => tracing::warn!(player, %err, "ai research choice failed"),
        }
    }
}

fn move_units(ctx: &mut TickContext, player: PlayerId) {
    let Ok(p) = ctx.world.player(player) else {
        return;
    };
    let movers: Vec<(UnitId, (usize, usize))> = p
        .units
        .values()
        .filter(|u| u.can_move())
        .map(|u| (u.id, u.position()))
        .collect();

    for (unit_id, (x, y)) in movers {
        let dir = DIRECTIONS[ctx.rng.random_range(0..DIRECTIONS.len())];
        let (nx, ny) = ctx.world.map.step(x, y, dir);
        let free = ctx.world.map.is_buildable(nx, ny) && ctx.world.unit_at(nx, ny).is_none();
        if !free {
            continue;
        }
        match commands::move_unit(ctx, player, unit_id, nx, ny) {
            Ok(()) => tracing::debug!(player, unit = unit_id, x = nx, y = ny, "ai moved unit"),
            Err(err) => tracing::debug!(player, unit = unit_id, %err, "ai move skipped"),
        }
    }
}

fn fill_queues(ctx: &mut TickContext, player: PlayerId) {
    let Ok(p) = ctx.world.player(player) else {
        return;
    };
    let idle: Vec<CityId> = p
        .cities
        .values()
        .filter(|c| c.queue.is_empty())
        .map(|c| c.id)
        .collect();

    for city_id in idle {
        let item = if ctx.rng.random_bool(0.5) {
            ProductionKind::Unit(UnitKind::ALL[ctx.rng.random_range(0..UnitKind::ALL.len())])
        } else {
            ProductionKind::Building(BuildingKind::ALL[ctx.rng.random_range(0..BuildingKind::ALL.len())])
        };
        match production::enqueue(ctx.world, city_id, item, ctx.config.max_queue_len) {
            Ok(event) => ctx.events.push(event),
            Err(err) => tracing::warn!(player, city = city_id, %err, "ai enqueue failed"),
        }
    }
}
