#![forbid(unsafe_code)]

//! Golden layout scenarios.
//!
//! Each scenario replays scripted host input through a real engine and
//! compares the final ASCII render. Per-step BLAKE3 checksums are compared
//! with `tests/golden/<name>.checksums` when present.
//!
//! # Running
//!
//! ```sh
//! cargo test -p fgrid-harness --test golden_scenarios
//! BLESS=1 cargo test -p fgrid-harness --test golden_scenarios
//! ```

use std::path::Path;

use fgrid_core::{Direction, DropTarget, Gap, GridCommand, LayoutHints, QuickSize};
use fgrid_harness::golden::{
    GoldenOutcome, golden_checksum_path, is_bless_mode, load_golden_checksums,
    save_golden_checksums,
};
use fgrid_harness::{GoldenLogger, Scenario, ScenarioEvent, ScenarioRun, run_scenario};
use fgrid_runtime::EngineConfig;
use proptest::prelude::*;

fn replay(scenario: &Scenario) -> ScenarioRun {
    let mut logger = GoldenLogger::noop();
    run_scenario(scenario, &mut logger).unwrap_or_else(|err| panic!("{}: {err}", scenario.name))
}

fn check_golden(run: &ScenarioRun) {
    let path = golden_checksum_path(Path::new(env!("CARGO_MANIFEST_DIR")), &run.name);
    let actual = run.checksums();
    if is_bless_mode() {
        save_golden_checksums(&path, &actual).unwrap();
        return;
    }
    let expected = load_golden_checksums(&path).unwrap();
    if expected.is_empty() {
        return;
    }
    let (outcome, index) = fgrid_harness::verify_checksums(&actual, &expected);
    assert_ne!(
        outcome,
        GoldenOutcome::Fail,
        "{}: checksum mismatch at step {index:?}",
        run.name
    );
}

fn command(command: GridCommand) -> ScenarioEvent {
    ScenarioEvent::Command { command }
}

fn resize_grow() -> Scenario {
    Scenario::new("resize_grow", vec![LayoutHints::span(6); 2])
        .then(ScenarioEvent::PointerDownRightEdge { item: 0, x: 600.0 })
        .then(ScenarioEvent::PointerMove { x: 700.0 })
        .then(ScenarioEvent::PointerMove { x: 800.0 })
        .then(ScenarioEvent::PointerUp { x: 800.0 })
}

fn resize_left_edge() -> Scenario {
    Scenario::new("resize_left_edge", vec![LayoutHints::span(6); 2])
        .then(ScenarioEvent::PointerDownLeftEdge { item: 1, x: 600.0 })
        .then(ScenarioEvent::PointerUp { x: 400.0 })
}

fn resize_canceled() -> Scenario {
    Scenario::new("resize_canceled", vec![LayoutHints::span(6); 2])
        .then(ScenarioEvent::PointerDownRightEdge { item: 0, x: 600.0 })
        .then(ScenarioEvent::PointerMove { x: 900.0 })
        .then(ScenarioEvent::PointerCancel)
}

fn drop_into_gap() -> Scenario {
    Scenario::new(
        "drop_into_gap",
        vec![
            LayoutHints::span(8),
            LayoutHints::span(6),
            LayoutHints::span(3),
        ],
    )
    .then(ScenarioEvent::DragStart { item: 0 })
    .then(ScenarioEvent::DragOver {
        target: DropTarget::Gap {
            row: 1,
            gap: Gap::new(9, 3),
        },
    })
    .then(ScenarioEvent::Drop)
    .then(ScenarioEvent::DragEnd)
}

fn command_sequence() -> Scenario {
    Scenario::new(
        "command_sequence",
        vec![LayoutHints::AUTO, LayoutHints::span(6), LayoutHints::span(6)],
    )
    .then(command(GridCommand::QuickSize {
        item: 1,
        size: QuickSize::Third,
    }))
    .then(command(GridCommand::MoveRow {
        row: 1,
        direction: Direction::Backward,
    }))
    .then(command(GridCommand::Swap {
        item: 2,
        direction: Direction::Backward,
    }))
    .then(command(GridCommand::MoveToNewRow { item: 1 }))
}

#[test]
fn golden_resize_grow() {
    let run = replay(&resize_grow());
    assert_eq!(run.render, "|000000001111|");
    assert_eq!(
        run.effect_names(),
        ["resize_started", "resize_previewed", "resize_previewed", "committed"]
    );
    assert_eq!(run.host.changes.len(), 1);
    check_golden(&run);
}

#[test]
fn golden_resize_left_edge() {
    let run = replay(&resize_left_edge());
    assert_eq!(run.render, "|000011111111|");
    assert_eq!(
        run.items,
        [LayoutHints::placed(1, 1, 4), LayoutHints::placed(1, 5, 8)]
    );
    check_golden(&run);
}

#[test]
fn golden_resize_canceled() {
    let run = replay(&resize_canceled());
    assert_eq!(run.render, "|000000111111|");
    assert!(run.host.changes.is_empty());
    // The preview shows up in the per-step checksums, then disappears.
    let sums = run.checksums();
    assert_eq!(sums[0], sums[2]);
    assert_ne!(sums[0], sums[1]);
    check_golden(&run);
}

#[test]
fn golden_drop_into_gap() {
    let run = replay(&drop_into_gap());
    assert_eq!(run.render, "|111111222000|");
    assert_eq!(
        run.effect_names(),
        ["drag_started", "target_updated", "committed", "noop"]
    );
    check_golden(&run);
}

#[test]
fn golden_command_sequence() {
    let run = replay(&command_sequence());
    assert_eq!(
        run.render,
        "|222222......|\n|111111111111|\n|000000000000|"
    );
    assert_eq!(run.host.changes.len(), 4);
    assert_eq!(run.host.last(), Some(run.items.as_slice()));
    check_golden(&run);
}

#[test]
fn replay_is_deterministic() {
    for scenario in [
        resize_grow(),
        resize_left_edge(),
        resize_canceled(),
        drop_into_gap(),
        command_sequence(),
    ] {
        let a = replay(&scenario);
        let b = replay(&scenario);
        assert_eq!(a.checksums(), b.checksums(), "{}", scenario.name);
        assert_eq!(a.render, b.render, "{}", scenario.name);
    }
}

#[test]
fn scenario_loads_from_json_fixture() {
    let scenario = Scenario::from_json_str(
        r#"{
            "name": "json_fixture",
            "items": [{"layoutColSpan": 6}, {"layoutColSpan": 6}],
            "events": [
                {"event": "pointer_down_right_edge", "item": 0, "x": 600.0},
                {"event": "pointer_move", "x": 800.0},
                {"event": "pointer_up", "x": 800.0}
            ]
        }"#,
    )
    .unwrap();
    assert_eq!(replay(&scenario).render, "|000000001111|");
}

#[test]
fn jsonl_log_has_one_line_per_step() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("logs").join("run.jsonl");
    let scenario = resize_grow();
    {
        let mut logger = GoldenLogger::new(&path).unwrap().with_run_id("golden");
        run_scenario(&scenario, &mut logger).unwrap();
    }

    let content = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<serde_json::Value> = content
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(lines.len(), scenario.events.len() + 2);
    assert_eq!(lines[0]["event"], "start");
    assert_eq!(lines[0]["case"], "resize_grow");
    assert_eq!(lines[1]["input"], "pointer_down_right_edge");
    assert_eq!(lines[1]["to"], "resizing_right");
    assert_eq!(lines[4]["effect"], "committed");
    assert_eq!(lines[4]["transition_id"], 4);
    let last = lines.last().unwrap();
    assert_eq!(last["event"], "complete");
    assert_eq!(last["outcome"], "pass");
    assert_eq!(last["checksums"].as_array().map(Vec::len), Some(4));
    assert!(lines.iter().all(|line| line["run_id"] == "golden"));
}

fn random_event() -> impl Strategy<Value = ScenarioEvent> {
    let item = 0usize..6;
    let x = 0.0f32..1200.0;
    let direction = prop_oneof![Just(Direction::Backward), Just(Direction::Forward)];
    prop_oneof![
        (item.clone(), x.clone())
            .prop_map(|(item, x)| ScenarioEvent::PointerDownRightEdge { item, x }),
        (item.clone(), x.clone())
            .prop_map(|(item, x)| ScenarioEvent::PointerDownLeftEdge { item, x }),
        x.clone().prop_map(|x| ScenarioEvent::PointerMove { x }),
        x.prop_map(|x| ScenarioEvent::PointerUp { x }),
        item.clone().prop_map(|item| ScenarioEvent::DragStart { item }),
        (0usize..4).prop_map(|row| ScenarioEvent::DragOver {
            target: DropTarget::Row { row }
        }),
        Just(ScenarioEvent::Drop),
        Just(ScenarioEvent::DragEnd),
        (item.clone(), direction)
            .prop_map(|(item, direction)| command(GridCommand::Nudge { item, direction })),
        item.prop_map(|item| ScenarioEvent::Remove { item }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn random_scenarios_replay_cleanly(
        spans in prop::collection::vec(1i32..13, 1..6),
        events in prop::collection::vec(random_event(), 0..40),
    ) {
        let mut scenario = Scenario::new(
            "random",
            spans.into_iter().map(LayoutHints::span).collect(),
        )
        .with_config(EngineConfig::default().with_invariant_checks(true));
        scenario.events = events;

        let mut logger = GoldenLogger::noop();
        let run = run_scenario(&scenario, &mut logger);
        prop_assert!(run.is_ok(), "{:?}", logger.lines().last());
        let run = run.unwrap();
        prop_assert_eq!(run.steps.len(), scenario.events.len());
        if let Some(last) = run.host.last() {
            prop_assert_eq!(last, run.items.as_slice());
        }
    }
}
