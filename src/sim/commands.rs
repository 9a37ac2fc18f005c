//! The command surface a player (human or AI) acts through.
//!
//! Every command validates before it mutates, so a returned error leaves
//! the world exactly as it was. Successful commands push their events onto
//! the context's event buffer.

use serde::{Deserialize, Serialize};

use super::combat::resolve_attack;
use super::context::TickContext;
use super::production;
use super::research;
use crate::error::{GameError, Result};
use crate::id::{CityId, PlayerId, UnitId};
use crate::model::{DiplomaticAction, GameEvent, ProductionKind, Tech, UnitKind, World};

pub const CITY_NAME_MIN: usize = 3;
pub const CITY_NAME_MAX: usize = 20;

/// One action requested by a player during their turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Command {
    MoveUnit { unit_id: UnitId, x: usize, y: usize },
    FoundCity { name: String },
    EnqueueProduction { city_id: CityId, item: ProductionKind },
    SetResearch { tech: Tech },
    SetRelation { target: PlayerId, action: DiplomaticAction },
    EndTurn,
}

/// Move one of `player`'s units to `(x, y)`.
///
/// Entering a tile held by another player's unit starts combat instead.
/// Entering an undefended enemy city captures it. Any move spends the
/// unit's remaining movement for the turn.
pub fn move_unit(ctx: &mut TickContext, player: PlayerId, unit_id: UnitId, x: usize, y: usize) -> Result<()> {
    if !ctx.world.map.in_bounds(x, y) {
        return Err(GameError::InvalidInput(format!("({x}, {y}) is off the map")));
    }
    let (from, movement) = ctx
        .world
        .player(player)?
        .units
        .get(&unit_id)
        .map(|u| (u.position(), u.movement))
        .ok_or(GameError::UnitNotFound(unit_id))?;
    if movement == 0 {
        return Err(GameError::InvalidMove {
            x,
            y,
            reason: "unit has no movement left",
        });
    }
    if from == (x, y) {
        return Err(GameError::InvalidMove {
            x,
            y,
            reason: "unit is already there",
        });
    }
    if !ctx.world.map.is_buildable(x, y) {
        return Err(GameError::InvalidMove {
            x,
            y,
            reason: "impassable terrain",
        });
    }

    if let Some(occupant) = ctx.world.unit_at(x, y) {
        if occupant.owner == player {
            return Err(GameError::InvalidMove {
                x,
                y,
                reason: "tile already occupied by a friendly unit",
            });
        }
        resolve_attack(ctx, unit_id, x, y)?;
        return Ok(());
    }

    let captured = ctx
        .world
        .city_at(x, y)
        .filter(|c| c.owner != player)
        .map(|c| (c.id, c.owner, c.name.clone()));

    ctx.world.relocate_unit(unit_id, x, y)?;
    if let Some(unit) = ctx.world.unit_mut(unit_id) {
        unit.movement = 0;
    }
    ctx.events.push(GameEvent::UnitMoved {
        unit_id,
        player,
        from,
        to: (x, y),
    });

    if let Some((city_id, old_owner, name)) = captured {
        ctx.world.transfer_city(city_id, player)?;
        tracing::info!(city = %name, old_owner, new_owner = player, "city captured");
        ctx.events.push(GameEvent::CityCaptured {
            city_id,
            old_owner,
            new_owner: player,
        });
    }
    Ok(())
}

/// Consume the player's first settler to found a city on its tile.
pub fn found_city(world: &mut World, player: PlayerId, name: &str) -> Result<GameEvent> {
    let name = name.trim();
    let len = name.chars().count();
    if !(CITY_NAME_MIN..=CITY_NAME_MAX).contains(&len) {
        return Err(GameError::InvalidInput(format!(
            "city name must be {CITY_NAME_MIN}-{CITY_NAME_MAX} characters, got {len}"
        )));
    }
    let (settler_id, (x, y)) = world
        .player(player)?
        .units
        .values()
        .find(|u| u.kind == UnitKind::Settler)
        .map(|u| (u.id, u.position()))
        .ok_or(GameError::NoSettler(player))?;

    let city_id = world.spawn_city(player, name.to_string(), x, y)?;
    world.remove_unit(settler_id)?;
    tracing::info!(player, city = %name, x, y, "city founded");
    Ok(GameEvent::CityFounded {
        city_id,
        player,
        name: name.to_string(),
        at: (x, y),
    })
}

/// Queue an item in one of the player's own cities.
pub fn enqueue_production(
    world: &mut World,
    player: PlayerId,
    city_id: CityId,
    item: ProductionKind,
    max_len: usize,
) -> Result<GameEvent> {
    if !world.player(player)?.cities.contains_key(&city_id) {
        return Err(GameError::CityNotFound(city_id));
    }
    production::enqueue(world, city_id, item, max_len)
}

pub fn set_research(world: &mut World, player: PlayerId, tech: Tech) -> Result<GameEvent> {
    research::set_research(world, player, tech)
}

/// Change how `player` regards `target`. Relations are one-sided.
pub fn set_relation(
    world: &mut World,
    player: PlayerId,
    target: PlayerId,
    action: DiplomaticAction,
) -> Result<GameEvent> {
    if target == player {
        return Err(GameError::InvalidInput(
            "a player has no relation with itself".to_string(),
        ));
    }
    world.player(target)?;
    let p = world.player_mut(player)?;
    let value = action.apply(p.relation(target));
    p.relations.insert(target, value);
    tracing::info!(player, target, %action, value, "relation changed");
    Ok(GameEvent::RelationChanged {
        player,
        target,
        action,
        value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BuildingKind, Terrain};
    use crate::scenario::Scenario;

    fn two_players() -> (Scenario, PlayerId, PlayerId) {
        let mut scenario = Scenario::new(8, 8);
        let a = scenario.add_player(false);
        let b = scenario.add_player(true);
        (scenario, a, b)
    }

    #[test]
    fn move_updates_both_tiles_and_spends_movement() {
        let (mut scenario, a, _) = two_players();
        let unit = scenario.add_unit(a, UnitKind::Warrior, 1, 1);

        let (result, events) = scenario.with_events(0, |ctx| move_unit(ctx, a, unit, 4, 5));
        result.unwrap();
        assert_eq!(
            events,
            vec![GameEvent::UnitMoved {
                unit_id: unit,
                player: a,
                from: (1, 1),
                to: (4, 5)
            }]
        );
        let world = scenario.world();
        assert_eq!(world.map.tile(1, 1).unwrap().unit, None);
        let dest = world.map.tile(4, 5).unwrap();
        assert_eq!(dest.unit, Some(unit));
        assert_eq!(dest.owner, Some(a));
        assert_eq!(world.unit(unit).unwrap().movement, 0);

        let again = scenario.with_context(0, |ctx| move_unit(ctx, a, unit, 4, 6));
        assert!(matches!(again, Err(GameError::InvalidMove { .. })));
    }

    #[test]
    fn rejected_moves_leave_world_untouched() {
        let (mut scenario, a, b) = two_players();
        let unit = scenario.add_unit(a, UnitKind::Warrior, 1, 1);
        scenario.add_unit(a, UnitKind::Archer, 2, 1);
        let theirs = scenario.add_unit(b, UnitKind::Archer, 6, 6);
        scenario.set_terrain(3, 3, Terrain::Mountains);
        let before = scenario.world().map.clone();

        let cases = [
            (unit, 9, 1),
            (unit, 2, 1),
            (unit, 3, 3),
            (unit, 1, 1),
            (theirs, 5, 5),
            (77, 5, 5),
        ];
        for (id, x, y) in cases {
            let result = scenario.with_context(0, |ctx| move_unit(ctx, a, id, x, y));
            assert!(result.is_err(), "move of {id} to ({x}, {y}) succeeded");
        }
        assert_eq!(scenario.world().map, before);
        assert_eq!(
            scenario.with_context(0, |ctx| move_unit(ctx, a, unit, 9, 1)),
            Err(GameError::InvalidInput("(9, 1) is off the map".to_string()))
        );
        assert_eq!(
            scenario.with_context(0, |ctx| move_unit(ctx, a, theirs, 5, 5)),
            Err(GameError::UnitNotFound(theirs))
        );
    }

    #[test]
    fn moving_into_enemy_unit_attacks() {
        let (mut scenario, a, b) = two_players();
        scenario.config_mut().combat_win_chance = 100;
        let unit = scenario.add_unit(a, UnitKind::Tank, 1, 1);
        let enemy = scenario.add_unit(b, UnitKind::Warrior, 1, 2);

        scenario.with_context(0, |ctx| move_unit(ctx, a, unit, 1, 2)).unwrap();
        let world = scenario.world();
        assert!(world.unit(enemy).is_none());
        assert_eq!(world.unit(unit).unwrap().position(), (1, 1));
        assert_eq!(world.map.tile(1, 2).unwrap().owner, Some(a));
    }

    #[test]
    fn moving_into_undefended_city_captures_it() {
        let (mut scenario, a, b) = two_players();
        let city = scenario.add_city(b, "Thebes", 5, 5);
        let unit = scenario.add_unit(a, UnitKind::Knight, 4, 5);

        let (result, events) = scenario.with_events(0, |ctx| move_unit(ctx, a, unit, 5, 5));
        result.unwrap();
        assert!(events.contains(&GameEvent::CityCaptured {
            city_id: city,
            old_owner: b,
            new_owner: a
        }));
        let world = scenario.world();
        assert_eq!(world.city(city).unwrap().owner, a);
        assert!(world.players[a].cities.contains_key(&city));
        assert!(!world.players[b].has_cities());
        let tile = world.map.tile(5, 5).unwrap();
        assert_eq!((tile.unit, tile.city, tile.owner), (Some(unit), Some(city), Some(a)));
    }

    #[test]
    fn found_city_consumes_lowest_settler() {
        let (mut scenario, a, _) = two_players();
        let first = scenario.add_unit(a, UnitKind::Settler, 2, 2);
        let second = scenario.add_unit(a, UnitKind::Settler, 6, 6);
        let world = scenario.world_mut();

        let event = found_city(world, a, "  Memphis ").unwrap();
        let GameEvent::CityFounded { city_id, name, at, .. } = event else {
            panic!("unexpected event {event:?}");
        };
        assert_eq!(name, "Memphis");
        assert_eq!(at, (2, 2));
        assert!(world.unit(first).is_none());
        assert!(world.unit(second).is_some());
        let tile = world.map.tile(2, 2).unwrap();
        assert_eq!((tile.city, tile.unit, tile.owner), (Some(city_id), None, Some(a)));
    }

    #[test]
    fn found_city_validation() {
        let (mut scenario, a, b) = two_players();
        scenario.add_unit(a, UnitKind::Settler, 2, 2);
        scenario.add_city(b, "Athens", 2, 2);
        let world = scenario.world_mut();

        assert!(matches!(found_city(world, a, "Ur"), Err(GameError::InvalidInput(_))));
        assert!(matches!(
            found_city(world, a, "An Extremely Long Name"),
            Err(GameError::InvalidInput(_))
        ));
        assert_eq!(found_city(world, b, "Sparta"), Err(GameError::NoSettler(b)));
        assert!(matches!(
            found_city(world, a, "Memphis"),
            Err(GameError::InvalidMove { .. })
        ));
        assert_eq!(world.players[a].unit_count(), 1);
    }

    #[test]
    fn enqueue_requires_own_city() {
        let (mut scenario, a, b) = two_players();
        let theirs = scenario.add_city(b, "Athens", 2, 2);
        let ours = scenario.add_city(a, "Memphis", 5, 5);
        let world = scenario.world_mut();
        let item = ProductionKind::Building(BuildingKind::Library);

        assert_eq!(
            enqueue_production(world, a, theirs, item, 5),
            Err(GameError::CityNotFound(theirs))
        );
        assert_eq!(
            enqueue_production(world, a, ours, item, 5),
            Ok(GameEvent::ProductionQueued {
                city_id: ours,
                item,
                cost: 120
            })
        );
    }

    #[test]
    fn relations_follow_actions() {
        let (mut scenario, a, b) = two_players();
        let world = scenario.world_mut();

        set_relation(world, a, b, DiplomaticAction::TradeAgreement).unwrap();
        assert_eq!(world.players[a].relation(b), 20);
        set_relation(world, a, b, DiplomaticAction::DeclareWar).unwrap();
        assert_eq!(world.players[a].relation(b), -100);
        set_relation(world, a, b, DiplomaticAction::MakePeace).unwrap();
        for _ in 0..5 {
            set_relation(world, a, b, DiplomaticAction::TradeAgreement).unwrap();
        }
        assert_eq!(world.players[a].relation(b), 100);
        // One-sided.
        assert_eq!(world.players[b].relation(a), 0);

        assert!(matches!(
            set_relation(world, a, a, DiplomaticAction::MakePeace),
            Err(GameError::InvalidInput(_))
        ));
        assert_eq!(
            set_relation(world, a, 9, DiplomaticAction::MakePeace),
            Err(GameError::PlayerNotFound(9))
        );
    }

    #[test]
    fn commands_deserialize_from_json() {
        let cmd: Command =
            serde_json::from_str(r#"{"command":"enqueue_production","city_id":3,"item":{"type":"unit","kind":"tank"}}"#)
                .unwrap();
        assert_eq!(
            cmd,
            Command::EnqueueProduction {
                city_id: 3,
                item: ProductionKind::Unit(UnitKind::Tank)
            }
        );
        let cmd: Command = serde_json::from_str(r#"{"command":"set_relation","target":1,"action":"war"}"#).unwrap();
        assert_eq!(
            cmd,
            Command::SetRelation {
                target: 1,
                action: DiplomaticAction::DeclareWar
            }
        );
        let cmd: Command = serde_json::from_str(r#"{"command":"end_turn"}"#).unwrap();
        assert_eq!(cmd, Command::EndTurn);
    }
}
