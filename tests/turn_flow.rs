mod common;

use civ_sim::model::DiplomaticAction;
use civ_sim::scenario::Scenario;
use civ_sim::{Command, GameError, GameEvent, ProductionKind, Tech, UnitKind};
use common::ScriptedInput;

#[test]
fn scripted_human_turn_applies_commands_in_order() {
    let mut scenario = Scenario::new(10, 10);
    let human = scenario.add_player(false);
    let ai = scenario.add_player(true);
    let memphis = scenario.add_city(human, "Memphis", 1, 1);
    let athens = scenario.add_city(ai, "Athens", 8, 8);
    let settler = scenario.add_unit(human, UnitKind::Settler, 1, 1);
    scenario.config_mut().end_year = -3950;
    let mut game = scenario.into_game(4);

    let mut input = ScriptedInput::new([
        Command::MoveUnit { unit_id: settler, x: 4, y: 4 },
        Command::FoundCity { name: "Thebes".to_string() },
        Command::EnqueueProduction {
            city_id: memphis,
            item: ProductionKind::Unit(UnitKind::Warrior),
        },
        Command::EnqueueProduction {
            city_id: athens,
            item: ProductionKind::Unit(UnitKind::Warrior),
        },
        Command::SetResearch { tech: Tech::Agriculture },
        Command::SetResearch { tech: Tech::Writing },
        Command::SetRelation {
            target: ai,
            action: DiplomaticAction::DeclareWar,
        },
        Command::EndTurn,
    ]);
    game.run(&mut input);

    let outcomes: Vec<Result<(), GameError>> = input
        .results
        .iter()
        .map(|(player, result)| {
            assert_eq!(*player, human);
            result.as_ref().map(|_| ()).map_err(Clone::clone)
        })
        .collect();
    assert_eq!(
        outcomes,
        vec![
            Ok(()),
            Ok(()),
            Ok(()),
            Err(GameError::CityNotFound(athens)),
            Err(GameError::TechAlreadyKnown(Tech::Agriculture)),
            Ok(()),
            Ok(()),
        ]
    );

    let world = game.world();
    let player = &world.players[human];
    assert_eq!(player.city_count(), 2);
    assert!(player.units.values().all(|u| u.kind != UnitKind::Settler));
    assert_eq!(player.relation(ai), -100);
    assert!(game.is_over());
    assert_eq!(world.year.value(), -3950);
    assert!(game.events().iter().any(|e| matches!(
        e,
        GameEvent::CityFounded { name, at: (4, 4), .. } if name == "Thebes"
    )));
    common::assert_consistent(world);
}

#[test]
fn commands_after_game_over_are_refused() {
    let mut scenario = Scenario::new(6, 6);
    let p = scenario.add_player(false);
    scenario.add_player(true);
    scenario.add_city(p, "Memphis", 1, 1);
    // Only one city holder: the game is decided before anyone moves.
    let mut game = scenario.into_game(0);

    assert!(game.is_over());
    assert_eq!(game.world().winner, Some(p));
    assert_eq!(game.found_city("Thebes"), Err(GameError::GameOver));
    assert_eq!(game.set_research(Tech::Writing), Err(GameError::GameOver));
}

#[test]
fn combat_through_commands_never_moves_the_winner() {
    let mut wins = 0;
    for seed in 0..200 {
        let mut scenario = Scenario::new(8, 8);
        let a = scenario.add_player(false);
        let b = scenario.add_player(true);
        scenario.add_city(a, "Memphis", 0, 0);
        scenario.add_city(b, "Athens", 7, 7);
        let attacker = scenario.add_unit(a, UnitKind::Swordsman, 3, 3);
        let defender = scenario.add_unit(b, UnitKind::Warrior, 3, 4);
        let mut game = scenario.into_game(seed);

        let events = game.move_unit(attacker, 3, 4).unwrap();
        let [GameEvent::Combat { attacker_won, .. }] = events.as_slice() else {
            panic!("expected a single combat, got {events:?}");
        };
        let world = game.world();
        if *attacker_won {
            wins += 1;
            assert!(world.unit(defender).is_none());
            assert_eq!(world.unit(attacker).unwrap().position(), (3, 3));
            assert_eq!(world.map.tile(3, 4).unwrap().owner, Some(a));
        } else {
            assert!(world.unit(attacker).is_none());
            assert_eq!(world.unit(defender).unwrap().position(), (3, 4));
        }
        common::assert_consistent(world);
    }
    // 70% of 200 with generous slack.
    assert!((110..=170).contains(&wins), "{wins} wins");
}
