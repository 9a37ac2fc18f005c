use super::context::TickContext;
use crate::error::{GameError, Result};
use crate::id::UnitId;
use crate::model::GameEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombatOutcome {
    AttackerWon,
    DefenderWon,
}

/// Resolve `attacker_id` attacking whatever unit stands on `(x, y)`.
///
/// A single weighted roll decides it. The winner's opponent is removed
/// from the world; on a win the tile passes to the attacker, who stays
/// where it is. The attacker's movement is spent either way.
pub fn resolve_attack(ctx: &mut TickContext, attacker_id: UnitId, x: usize, y: usize) -> Result<CombatOutcome> {
    let attacker_owner = ctx
        .world
        .unit(attacker_id)
        .map(|u| u.owner)
        .ok_or(GameError::UnitNotFound(attacker_id))?;
    let (defender_id, defender_owner) = ctx
        .world
        .unit_at(x, y)
        .map(|u| (u.id, u.owner))
        .ok_or(GameError::InvalidMove {
            x,
            y,
            reason: "no unit to attack",
        })?;
    if defender_owner == attacker_owner {
        return Err(GameError::InvalidMove {
            x,
            y,
            reason: "tile already occupied by a friendly unit",
        });
    }

    let attacker_won = ctx.roll_percent(ctx.config.combat_win_chance);
    if attacker_won {
        ctx.world.remove_unit(defender_id)?;
        if let Some(tile) = ctx.world.map.tile_mut(x, y) {
            tile.owner = Some(attacker_owner);
        }
        if let Some(attacker) = ctx.world.unit_mut(attacker_id) {
            attacker.movement = 0;
        }
    } else {
        ctx.world.remove_unit(attacker_id)?;
    }

    tracing::debug!(
        attacker = attacker_id,
        defender = defender_id,
        x,
        y,
        attacker_won,
        "combat resolved"
    );
    ctx.events.push(GameEvent::Combat {
        attacker_id,
        attacker_owner,
        defender_id,
        defender_owner,
        at: (x, y),
        attacker_won,
    });

    Ok(if attacker_won {
        CombatOutcome::AttackerWon
    } else {
        CombatOutcome::DefenderWon
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::UnitKind;
    use crate::scenario::Scenario;

    fn duel(chance: u32) -> (Scenario, UnitId, UnitId) {
        let mut scenario = Scenario::new(6, 6);
        let a = scenario.add_player(true);
        let b = scenario.add_player(true);
        scenario.config_mut().combat_win_chance = chance;
        let attacker = scenario.add_unit(a, UnitKind::Swordsman, 1, 1);
        let defender = scenario.add_unit(b, UnitKind::Archer, 2, 1);
        scenario.world_mut().map.tile_mut(2, 1).unwrap().owner = Some(b);
        (scenario, attacker, defender)
    }

    #[test]
    fn certain_win_removes_defender_and_flips_tile() {
        let (mut scenario, attacker, defender) = duel(100);
        let outcome = scenario.with_context(0, |ctx| resolve_attack(ctx, attacker, 2, 1));
        assert_eq!(outcome, Ok(CombatOutcome::AttackerWon));

        let world = scenario.world();
        assert!(world.unit(defender).is_none());
        let tile = world.map.tile(2, 1).unwrap();
        assert_eq!(tile.unit, None);
        assert_eq!(tile.owner, Some(0));
        // The attacker stays put.
        let unit = world.unit(attacker).unwrap();
        assert_eq!(unit.position(), (1, 1));
        assert_eq!(unit.movement, 0);
        assert_eq!(world.map.tile(1, 1).unwrap().unit, Some(attacker));
    }

    #[test]
    fn certain_loss_removes_attacker_only() {
        let (mut scenario, attacker, defender) = duel(0);
        let before = scenario.world().map.tile(2, 1).unwrap().clone();
        let outcome = scenario.with_context(0, |ctx| resolve_attack(ctx, attacker, 2, 1));
        assert_eq!(outcome, Ok(CombatOutcome::DefenderWon));

        let world = scenario.world();
        assert!(world.unit(attacker).is_none());
        assert_eq!(world.map.tile(1, 1).unwrap().unit, None);
        assert_eq!(world.map.tile(2, 1).unwrap(), &before);
        assert!(world.unit(defender).is_some());
    }

    #[test]
    fn attacking_a_friend_is_rejected() {
        let mut scenario = Scenario::new(6, 6);
        let a = scenario.add_player(true);
        let first = scenario.add_unit(a, UnitKind::Warrior, 1, 1);
        scenario.add_unit(a, UnitKind::Warrior, 1, 2);
        let result = scenario.with_context(0, |ctx| resolve_attack(ctx, first, 1, 2));
        assert!(matches!(result, Err(GameError::InvalidMove { .. })));
        assert_eq!(scenario.world().players[a].unit_count(), 2);
    }

    #[test]
    fn win_rate_converges_to_configured_chance() {
        let trials = 4000;
        let mut wins = 0;
        for seed in 0..trials {
            let (mut scenario, attacker, _) = duel(70);
            let outcome = scenario
                .with_context(seed, |ctx| resolve_attack(ctx, attacker, 2, 1))
                .unwrap();
            if outcome == CombatOutcome::AttackerWon {
                wins += 1;
            }
        }
        let rate = wins as f64 / trials as f64;
        // Four standard deviations at n = 4000 is about 0.029.
        assert!((rate - 0.70).abs() < 0.03, "win rate {rate}");
    }
}
