use criterion::{black_box, criterion_group, criterion_main, Criterion};
use serde_json::Value;

use koenigsberg::board::{combat_units, GameState, Phase, Role, Side};
use koenigsberg::config::STANDARD_SCENARIO;
use koenigsberg::dice::{RngDice, ScriptedDice};
use koenigsberg::engine::{apply_verb, initialize, project};
use koenigsberg::movegen::legal_actions;

const GERMAN_SETUP: [(&str, &str); 6] = [
    ("ger_gd", "24"),
    ("ger_5pz", "2"),
    ("ger_1inf", "3"),
    ("ger_56inf", "4"),
    ("ger_561vg", "30"),
    ("ger_548vg", "1"),
];

const SOVIET_SETUP: [(&str, &str); 12] = [
    ("sov_16g", "23"),
    ("sov_36g", "23"),
    ("sov_1tk", "23"),
    ("sov_5g", "21"),
    ("sov_94", "21"),
    ("sov_113", "21"),
    ("sov_13g", "22"),
    ("sov_54", "22"),
    ("sov_90", "22"),
    ("sov_69", "10"),
    ("sov_81", "10"),
    ("sov_124", "10"),
];

fn play(state: &GameState, role: Role, verb: &str, arg: Option<&str>, dice: &[u8]) -> GameState {
    apply_verb(state, role, verb, arg, &mut ScriptedDice::new(dice)).unwrap()
}

/// A game with both sides set up, at the first event phase.
fn opening() -> GameState {
    let mut state = initialize(1945, STANDARD_SCENARIO, &Value::Null).unwrap();
    state = play(&state, Role::German, "set_stance", Some("track_land"), &[]);
    for (role, setup) in [(Role::German, &GERMAN_SETUP[..]), (Role::Soviet, &SOVIET_SETUP[..])] {
        for (id, space) in setup {
            state = play(&state, role, "select", Some(*id), &[]);
            state = play(&state, role, "place", Some(*space), &[]);
        }
        state = play(&state, role, "end_setup", None, &[]);
    }
    state
}

fn bench_initialize(c: &mut Criterion) {
    c.bench_function("initialize_standard_game", |b| {
        b.iter(|| initialize(black_box(1), STANDARD_SCENARIO, &Value::Null))
    });
}

fn bench_project(c: &mut Criterion) {
    let mut state = opening();
    state.phase = Phase::Movement(Side::Soviet);
    c.bench_function("project_soviet_movement", |b| {
        b.iter(|| project(black_box(&state), Role::Soviet))
    });
}

fn bench_legal_actions_combat_setup(c: &mut Criterion) {
    let mut state = opening();
    state.phase = Phase::CombatSetup(Side::Soviet);
    state.selected = combat_units(Side::Soviet).next();
    c.bench_function("legal_actions_soviet_combat_setup", |b| {
        b.iter(|| legal_actions(black_box(&state), Side::Soviet))
    });
}

fn bench_scripted_turn(c: &mut Criterion) {
    let state = opening();
    c.bench_function("scripted_quiet_turn", |b| {
        b.iter(|| {
            // Event 4 + 1: Russian Halt, so the turn ends after German combat.
            let s = play(black_box(&state), Role::German, "roll_event", None, &[4]);
            let s = play(&s, Role::German, "roll_evacuation", None, &[3, 1]);
            let s = play(&s, Role::German, "end_movement", None, &[]);
            let s = play(&s, Role::Soviet, "end_movement", None, &[]);
            play(&s, Role::German, "end_combat_setup", None, &[])
        })
    });
}

fn bench_movement_with_undo(c: &mut Criterion) {
    let mut state = opening();
    state.phase = Phase::Movement(Side::German);
    let state = play(&state, Role::German, "select", Some("ger_561vg"), &[]);
    let mut dice = RngDice::seeded(0);
    c.bench_function("move_then_undo", |b| {
        b.iter(|| {
            let moved = apply_verb(black_box(&state), Role::German, "move", Some("31"), &mut dice).unwrap();
            apply_verb(&moved, Role::German, "undo", None, &mut dice).unwrap()
        })
    });
}

criterion_group!(
    benches,
    bench_initialize,
    bench_project,
    bench_legal_actions_combat_setup,
    bench_scripted_turn,
    bench_movement_with_undo,
);
criterion_main!(benches);
