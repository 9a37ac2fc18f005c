use rand::Rng;

use super::context::TickContext;
use super::system::SimSystem;

/// Food harvested per citizen each year.
const FOOD_PER_CITIZEN: u32 = 2;

/// Cities age by a year: population grows by zero or one, then the food
/// stock gains a harvest proportional to the new population.
pub struct GrowthSystem;

impl SimSystem for GrowthSystem {
    fn name(&self) -> &str {
        "growth"
    }

    fn tick(&mut self, ctx: &mut TickContext) {
        for player in &mut ctx.world.players {
            for city in player.cities.values_mut() {
                city.population += ctx.rng.random_range(0..2);
                city.food += city.population * FOOD_PER_CITIZEN;
            }
        }
    }
}
