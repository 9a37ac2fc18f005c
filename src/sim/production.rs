use super::context::TickContext;
use super::system::SimSystem;
use crate::error::{GameError, Result};
use crate::id::{CityId, PlayerId};
use crate::model::{GameEvent, ProductionItem, ProductionKind, World};

/// Append an item to a city's queue at its table cost. Fails without
/// touching the queue when it is already at `max_len`.
pub fn enqueue(world: &mut World, city_id: CityId, kind: ProductionKind, max_len: usize) -> Result<GameEvent> {
    let city = world.city_mut(city_id).ok_or(GameError::CityNotFound(city_id))?;
    if city.queue.len() >= max_len {
        return Err(GameError::ProductionQueueFull { city_id });
    }
    let item = ProductionItem::new(kind);
    let cost = item.total_cost;
    city.queue.push_back(item);
    tracing::debug!(city = city_id, item = %kind, cost, "production queued");
    Ok(GameEvent::ProductionQueued {
        city_id,
        item: kind,
        cost,
    })
}

/// Where a freshly produced unit appears: an orthogonal neighbor of the city
/// owned by the same player with no unit on it, otherwise the first such
/// tile anywhere on the map in row-major order.
pub fn find_unit_placement(world: &World, city_pos: (usize, usize), owner: PlayerId) -> Option<(usize, usize)> {
    let free_and_owned = |&(x, y): &(usize, usize)| {
        world.map.is_buildable(x, y)
            && world
                .map
                .tile(x, y)
                .is_some_and(|t| t.owner == Some(owner) && t.unit.is_none())
    };
    world
        .map
        .adjacent(city_pos.0, city_pos.1)
        .into_iter()
        .find(free_and_owned)
        .or_else(|| world.map.coords().find(free_and_owned))
}

/// Advances the head of every city's queue by the city's yearly production
/// and applies whatever completes.
pub struct ProductionSystem;

impl SimSystem for ProductionSystem {
    fn name(&self) -> &str {
        "production"
    }

    fn tick(&mut self, ctx: &mut TickContext) {
        // Collect completions first, then apply them against the whole world.
        let mut completed: Vec<(PlayerId, CityId, ProductionKind)> = Vec::new();
        for player in &mut ctx.world.players {
            for city in player.cities.values_mut() {
                let per_year = city.production_per_year();
                let Some(head) = city.queue.front_mut() else {
                    continue;
                };
                head.progress += per_year;
                if head.is_complete() {
                    let kind = head.kind;
                    city.queue.pop_front();
                    completed.push((player.id, city.id, kind));
                }
            }
        }

        for (owner, city_id, kind) in completed {
            match complete(ctx.world, owner, city_id, kind) {
                Ok(event) => ctx.events.push(event),
                Err(err) => {
                    tracing::warn!(city = city_id, item = %kind, %err, "production completion failed");
                    ctx.events.push(GameEvent::ProductionFailed { city_id, item: kind });
                }
            }
        }
    }
}

/// Apply one finished item. The item has already left the queue, so a
/// failure here means it is lost.
fn complete(world: &mut World, owner: PlayerId, city_id: CityId, kind: ProductionKind) -> Result<GameEvent> {
    match kind {
        ProductionKind::Unit(unit_kind) => {
            let (city_pos, city_name) = {
                let city = world.city(city_id).ok_or(GameError::CityNotFound(city_id))?;
                (city.position(), city.name.clone())
            };
            let (x, y) = find_unit_placement(world, city_pos, owner).ok_or_else(|| {
                GameError::NoValidPlacement {
                    what: format!("{unit_kind} from {city_name}"),
                }
            })?;
            let unit_id = world.spawn_unit(owner, unit_kind, x, y)?;
            tracing::info!(city = %city_name, unit = %unit_kind, unit_id, x, y, "unit produced");
            Ok(GameEvent::UnitProduced {
                city_id,
                unit_id,
                kind: unit_kind,
                at: (x, y),
            })
        }
        ProductionKind::Building(building) => {
            let city = world.city_mut(city_id).ok_or(GameError::CityNotFound(city_id))?;
            city.buildings.push(building);
            tracing::info!(city = %city.name, %building, "building completed");
            Ok(GameEvent::BuildingCompleted {
                city_id,
                kind: building,
            })
        }
    }
}
