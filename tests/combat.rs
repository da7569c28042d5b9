mod common;

use rogue_core::ecs::resources::EventKind;
use rogue_core::ecs::test_helpers::tick_turns;
use rogue_core::ecs::{
    Element, ElementalAttack, ElementalDamage, ElementalResistances, EventLog, Health,
    RelationMap, Resistance, SimEntityMap, Stats, StatusEffect, StatusEffectType, StatusEffects,
    melee_attack,
};

use common::{sim_app, spawn_fighter};

#[test]
fn melee_kill_sweeps_all_traces_of_the_victim() {
    let mut app = sim_app();
    let a = spawn_fighter(&mut app, 1, "bruiser", 0, 0, Stats::default(), 20.0);
    let b = spawn_fighter(&mut app, 2, "victim", 1, 0, Stats::default(), 5.0);

    let result = melee_attack(app.world_mut(), a, 1, 0).unwrap();
    assert!(result.hit);
    // strength 10 through defense 5 (toughness 10 * 0.5)
    assert_eq!(result.damage, 5.0);
    assert!(result.killed);

    assert!(app.world_mut().get_entity(b).is_err());
    assert_eq!(app.world().resource::<SimEntityMap>().get_bevy(2), None);
    assert!(app.world().resource::<RelationMap>().is_empty());

    let log = app.world().resource::<EventLog>();
    assert!(log.events.iter().any(|e| matches!(
        e.kind,
        EventKind::Attack {
            attacker: 1,
            target: 2,
            ..
        }
    )));
    assert!(log
        .events
        .iter()
        .any(|e| matches!(e.kind, EventKind::Death { entity: 2 })));
}

#[test]
fn nimble_defender_dodges_outright() {
    let mut app = sim_app();
    let a = spawn_fighter(&mut app, 1, "bruiser", 0, 0, Stats::default(), 20.0);
    let b = spawn_fighter(
        &mut app,
        2,
        "dancer",
        1,
        0,
        Stats {
            dexterity: 30.0,
            ..Stats::default()
        },
        10.0,
    );

    let result = melee_attack(app.world_mut(), a, 1, 0).unwrap();
    assert!(!result.hit);
    assert_eq!(result.damage, 0.0);
    assert!(!result.killed);
    assert_eq!(app.world().get::<Health>(b).unwrap().current, 10.0);
}

#[test]
fn blinded_attacker_swings_at_half_accuracy() {
    let mut app = sim_app();
    let a = spawn_fighter(&mut app, 1, "bruiser", 0, 0, Stats::default(), 20.0);
    // Dodge 8 sits between the bruiser's blinded accuracy 5 and its clear
    // accuracy 10.
    let b = spawn_fighter(
        &mut app,
        2,
        "skirmisher",
        1,
        0,
        Stats {
            dexterity: 16.0,
            ..Stats::default()
        },
        20.0,
    );
    app.world_mut()
        .get_mut::<StatusEffects>(a)
        .unwrap()
        .apply(StatusEffect {
            effect_type: StatusEffectType::Blinded,
            duration: 1,
            strength: 1.0,
            source: "sand".into(),
        });

    let result = melee_attack(app.world_mut(), a, 1, 0).unwrap();
    assert!(!result.hit);
    assert_eq!(app.world().get::<Health>(b).unwrap().current, 20.0);

    // One turn ages the blindness away; the same swing now lands.
    tick_turns(&mut app, 1);
    assert!(!app
        .world()
        .get::<StatusEffects>(a)
        .unwrap()
        .has(StatusEffectType::Blinded));
    let result = melee_attack(app.world_mut(), a, 1, 0).unwrap();
    assert!(result.hit);
    assert_eq!(result.damage, 5.0);
}

#[test]
fn melee_damage_never_drops_below_one() {
    let mut app = sim_app();
    let a = spawn_fighter(
        &mut app,
        1,
        "weakling",
        0,
        0,
        Stats {
            strength: 1.0,
            ..Stats::default()
        },
        20.0,
    );
    let b = spawn_fighter(
        &mut app,
        2,
        "golem",
        1,
        0,
        Stats {
            toughness: 30.0,
            ..Stats::default()
        },
        10.0,
    );

    let result = melee_attack(app.world_mut(), a, 1, 0).unwrap();
    assert!(result.hit);
    assert_eq!(result.damage, 1.0);
    assert_eq!(app.world().get::<Health>(b).unwrap().current, 9.0);
}

#[test]
fn elemental_damage_passes_through_flat_then_percent_resistance() {
    let mut app = sim_app();
    let a = spawn_fighter(&mut app, 1, "pyromancer", 0, 0, Stats::default(), 20.0);
    let b = spawn_fighter(&mut app, 2, "warded", 1, 0, Stats::default(), 20.0);

    app.world_mut()
        .entity_mut(a)
        .insert(ElementalAttack(vec![ElementalDamage {
            element: Element::Fire,
            amount: 10.0,
        }]));
    app.world_mut()
        .get_mut::<ElementalResistances>(b)
        .unwrap()
        .set(
            Element::Fire,
            Resistance {
                flat_reduction: 4.0,
                percent_resistance: 0.5,
            },
        );

    let result = melee_attack(app.world_mut(), a, 1, 0).unwrap();
    // melee 5 + fire (10 - 4) * 0.5
    assert_eq!(result.damage, 8.0);
    assert_eq!(app.world().get::<Health>(b).unwrap().current, 12.0);
}

#[test]
fn negative_resistance_amplifies_damage() {
    let mut app = sim_app();
    let a = spawn_fighter(&mut app, 1, "pyromancer", 0, 0, Stats::default(), 20.0);
    let b = spawn_fighter(&mut app, 2, "oil-soaked", 1, 0, Stats::default(), 30.0);

    app.world_mut()
        .entity_mut(a)
        .insert(ElementalAttack(vec![ElementalDamage {
            element: Element::Fire,
            amount: 10.0,
        }]));
    app.world_mut()
        .get_mut::<ElementalResistances>(b)
        .unwrap()
        .set(
            Element::Fire,
            Resistance {
                flat_reduction: -5.0,
                percent_resistance: 0.0,
            },
        );

    let result = melee_attack(app.world_mut(), a, 1, 0).unwrap();
    // melee 5 + fire 10 amplified to 15 by the vulnerability
    assert_eq!(result.damage, 20.0);
    assert_eq!(app.world().get::<Health>(b).unwrap().current, 10.0);
}

#[test]
fn swinging_at_empty_air_is_a_no_op() {
    let mut app = sim_app();
    let a = spawn_fighter(&mut app, 1, "bruiser", 0, 0, Stats::default(), 20.0);

    assert!(melee_attack(app.world_mut(), a, 5, 5).is_none());
    assert!(app.world().resource::<EventLog>().events.is_empty());
}
