use super::context::TickContext;
use super::system::SimSystem;
use crate::error::{GameError, Result};
use crate::id::PlayerId;
use crate::model::{GameEvent, Tech, World};

/// Point a player's research at `tech`. Known technologies are rejected so
/// the current target is always something still to learn.
pub fn set_research(world: &mut World, player: PlayerId, tech: Tech) -> Result<GameEvent> {
    let p = world.player_mut(player)?;
    if p.knows(tech) {
        return Err(GameError::TechAlreadyKnown(tech));
    }
    p.researching = Some(tech);
    Ok(GameEvent::ResearchChanged { player, tech })
}

/// Retarget research at the earliest unknown technology. Returns the new
/// target, or `None` once everything is known.
pub fn choose_next_tech(world: &mut World, player: PlayerId) -> Result<Option<Tech>> {
    let p = world.player_mut(player)?;
    p.researching = p.next_unknown_tech();
    Ok(p.researching)
}

/// Every year each player's current research completes with a fixed
/// chance; on success the next target is picked automatically.
pub struct ResearchSystem;

impl SimSystem for ResearchSystem {
    fn name(&self) -> &str {
        "research"
    }

    fn tick(&mut self, ctx: &mut TickContext) {
        let chance = ctx.config.research_chance;
        for index in 0..ctx.world.players.len() {
            if ctx.world.players[index].researching.is_none() {
                continue;
            }
            if !ctx.roll_percent(chance) {
                continue;
            }
            let player = &mut ctx.world.players[index];
            let Some(tech) = player.researching.take() else {
                continue;
            };
            player.techs.insert(tech);
            player.researching = player.next_unknown_tech();
            tracing::info!(player = %player.name, %tech, "technology discovered");
            ctx.events.push(GameEvent::TechDiscovered {
                player: player.id,
                tech,
            });
        }
    }
}
