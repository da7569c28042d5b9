mod common;

use bevy_app::App;
use bevy_ecs::entity::Entity;
use rogue_core::ecs::resources::EventKind;
use rogue_core::ecs::spawn;
use rogue_core::ecs::test_helpers::tick_turns;
use rogue_core::ecs::{
    Ai, BaseStat, Disposition, EventLog, Health, Position, StatId, StatusEffect,
    StatusEffectType, StatusEffects, Stats, effective_stat_of,
};

use common::{attack_event_count, sim_app, spawn_fighter};

fn afflict(app: &mut App, e: Entity, effect_type: StatusEffectType, duration: i32, strength: f64) {
    app.world_mut()
        .get_mut::<StatusEffects>(e)
        .unwrap()
        .apply(StatusEffect {
            effect_type,
            duration,
            strength,
            source: "trap".into(),
        });
}

#[test]
fn burning_burns_for_exactly_its_duration() {
    let mut app = sim_app();
    let e = spawn_fighter(&mut app, 1, "torchbearer", 0, 0, Stats::default(), 20.0);
    afflict(&mut app, e, StatusEffectType::Burning, 3, 2.0);

    tick_turns(&mut app, 1);
    assert_eq!(app.world().get::<Health>(e).unwrap().current, 18.0);
    tick_turns(&mut app, 1);
    assert_eq!(app.world().get::<Health>(e).unwrap().current, 16.0);
    tick_turns(&mut app, 1);
    assert_eq!(app.world().get::<Health>(e).unwrap().current, 14.0);
    assert!(!app
        .world()
        .get::<StatusEffects>(e)
        .unwrap()
        .has(StatusEffectType::Burning));

    // Expired: no further damage.
    tick_turns(&mut app, 1);
    assert_eq!(app.world().get::<Health>(e).unwrap().current, 14.0);
}

#[test]
fn lethal_status_damage_removes_the_actor() {
    let mut app = sim_app();
    let e = spawn_fighter(&mut app, 1, "doomed", 0, 0, Stats::default(), 5.0);
    afflict(&mut app, e, StatusEffectType::Burning, 3, 10.0);

    tick_turns(&mut app, 1);
    assert!(app.world_mut().get_entity(e).is_err());
    assert!(app
        .world()
        .resource::<EventLog>()
        .events
        .iter()
        .any(|ev| matches!(ev.kind, EventKind::Death { entity: 1 })));
}

#[test]
fn frozen_actor_skips_turns_until_thawed() {
    let mut app = sim_app();
    let npc = spawn::spawn_npc(
        app.world_mut(),
        1,
        "brute".to_string(),
        Position::new(0, 0),
        Stats::default(),
        Health::new(50.0),
        Ai::new(Disposition::Hostile, 5.0),
    );
    spawn_fighter(&mut app, 2, "victim", 1, 0, Stats::default(), 50.0);
    afflict(&mut app, npc, StatusEffectType::Frozen, 2, 1.0);

    tick_turns(&mut app, 2);
    assert_eq!(attack_event_count(&app), 0);

    // Thawed on the third turn.
    tick_turns(&mut app, 1);
    assert_eq!(attack_event_count(&app), 1);
}

#[test]
fn poison_saps_body_while_it_runs() {
    let mut app = sim_app();
    let e = spawn_fighter(&mut app, 1, "envenomed", 0, 0, Stats::default(), 30.0);
    afflict(&mut app, e, StatusEffectType::Poisoned, 3, 2.0);

    tick_turns(&mut app, 1);
    assert_eq!(app.world().get::<Health>(e).unwrap().current, 28.0);
    assert_eq!(
        effective_stat_of(app.world(), e, StatId::Base(BaseStat::Strength)),
        Some(8.0)
    );
    assert_eq!(
        effective_stat_of(app.world(), e, StatId::Base(BaseStat::Toughness)),
        Some(8.0)
    );

    // Runs out after its third tick; penalties lift with it.
    tick_turns(&mut app, 2);
    assert_eq!(app.world().get::<Health>(e).unwrap().current, 24.0);
    assert_eq!(
        effective_stat_of(app.world(), e, StatId::Base(BaseStat::Strength)),
        Some(10.0)
    );
}

#[test]
fn reapplying_an_effect_refreshes_rather_than_stacks() {
    let mut app = sim_app();
    let e = spawn_fighter(&mut app, 1, "torchbearer", 0, 0, Stats::default(), 30.0);
    afflict(&mut app, e, StatusEffectType::Burning, 2, 2.0);
    afflict(&mut app, e, StatusEffectType::Burning, 4, 1.0);

    let effects = app.world().get::<StatusEffects>(e).unwrap();
    assert_eq!(effects.0.len(), 1);
    let burning = effects.get(StatusEffectType::Burning).unwrap();
    assert_eq!(burning.duration, 4);
    assert_eq!(burning.strength, 2.0);

    // One merged burn ticking for 2, not 3.
    tick_turns(&mut app, 1);
    assert_eq!(app.world().get::<Health>(e).unwrap().current, 28.0);
}
