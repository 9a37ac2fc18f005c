mod common;

use civ_sim::scenario::Scenario;
use civ_sim::sim::production::{ProductionSystem, enqueue};
use civ_sim::{BuildingKind, GameError, GameEvent, ProductionKind, UnitKind};

/// The first tick at which `10 + population` summed over ticks reaches `cost`.
fn expected_ticks(population: u32, cost: u32) -> usize {
    cost.div_ceil(10 + population) as usize
}

#[test]
fn units_complete_in_the_first_year_their_cost_is_reached() {
    for kind in UnitKind::ALL {
        for population in [1, 4, 17] {
            let mut scenario = Scenario::new(6, 6);
            let p = scenario.add_player(true);
            let city = scenario.add_city(p, "Ur", 2, 2);
            scenario.world_mut().city_mut(city).unwrap().population = population;
            enqueue(scenario.world_mut(), city, ProductionKind::Unit(kind), 5).unwrap();

            let mut completed_at = None;
            for tick in 1..=40 {
                let events = scenario.tick(&mut ProductionSystem, tick as u64);
                if events.iter().any(|e| matches!(e, GameEvent::UnitProduced { .. })) {
                    completed_at = Some(tick);
                    break;
                }
            }
            assert_eq!(
                completed_at,
                Some(expected_ticks(population, kind.cost())),
                "{kind} at population {population}"
            );
        }
    }
}

#[test]
fn queue_drains_in_fifo_order() {
    let mut scenario = Scenario::new(6, 6);
    let p = scenario.add_player(true);
    let city = scenario.add_city(p, "Ur", 2, 2);
    scenario.world_mut().city_mut(city).unwrap().population = 290;
    let order = [
        ProductionKind::Building(BuildingKind::Granary),
        ProductionKind::Unit(UnitKind::Archer),
        ProductionKind::Building(BuildingKind::Walls),
    ];
    for item in order {
        enqueue(scenario.world_mut(), city, item, 5).unwrap();
    }

    // 300 per year finishes exactly one item per tick.
    let mut finished = Vec::new();
    for seed in 0..3 {
        for event in scenario.tick(&mut ProductionSystem, seed) {
            match event {
                GameEvent::BuildingCompleted { kind, .. } => finished.push(ProductionKind::Building(kind)),
                GameEvent::UnitProduced { kind, .. } => finished.push(ProductionKind::Unit(kind)),
                other => panic!("unexpected {other:?}"),
            }
        }
    }
    assert_eq!(finished, order);
    common::assert_consistent(scenario.world());
}

#[test]
fn sixth_item_is_refused() {
    let mut scenario = Scenario::new(6, 6);
    let p = scenario.add_player(true);
    let city = scenario.add_city(p, "Ur", 2, 2);
    let world = scenario.world_mut();
    for kind in &UnitKind::ALL[..5] {
        enqueue(world, city, ProductionKind::Unit(*kind), 5).unwrap();
    }
    assert_eq!(
        enqueue(world, city, ProductionKind::Unit(UnitKind::Tank), 5),
        Err(GameError::ProductionQueueFull { city_id: city })
    );
    assert_eq!(world.city(city).unwrap().queue.len(), 5);
}
