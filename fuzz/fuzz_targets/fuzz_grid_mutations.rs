#![no_main]

use arbitrary::Arbitrary;
use fgrid_core::{Direction, DropTarget, Gap, LayoutHints, QuickSize};
use fgrid_layout::{GridOperation, Outcome, build, project};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input {
    items: Vec<(Option<i8>, Option<i8>, Option<i8>)>,
    ops: Vec<Op>,
}

#[derive(Debug, Arbitrary)]
enum Op {
    ResizeRight(u8, i8),
    ResizeLeft(u8, i8),
    Nudge(u8, bool),
    Swap(u8, bool),
    MoveToGap(u8, u8, u8, u8),
    MoveToNewRow(u8, u8),
    MoveIntoRow(u8, u8),
    MoveRow(u8, bool),
    QuickSize(u8, u8),
    OwnRow(u8),
    Snap,
}

fn direction(forward: bool) -> Direction {
    if forward {
        Direction::Forward
    } else {
        Direction::Backward
    }
}

impl Op {
    fn to_operation(&self) -> GridOperation {
        match *self {
            Op::ResizeRight(item, delta) => GridOperation::ResizeRight {
                item: item.into(),
                delta: delta.into(),
            },
            Op::ResizeLeft(item, delta) => GridOperation::ResizeLeft {
                item: item.into(),
                delta: delta.into(),
            },
            Op::Nudge(item, fwd) => GridOperation::Nudge {
                item: item.into(),
                direction: direction(fwd),
            },
            Op::Swap(item, fwd) => GridOperation::Swap {
                item: item.into(),
                direction: direction(fwd),
            },
            Op::MoveToGap(item, row, start, span) => GridOperation::MoveCell {
                item: item.into(),
                target: DropTarget::Gap {
                    row: row.into(),
                    gap: Gap::new(start % 16, span % 16),
                },
            },
            Op::MoveToNewRow(item, row) => GridOperation::MoveCell {
                item: item.into(),
                target: DropTarget::NewRow { row: row.into() },
            },
            Op::MoveIntoRow(item, row) => GridOperation::MoveCell {
                item: item.into(),
                target: DropTarget::Row { row: row.into() },
            },
            Op::MoveRow(row, fwd) => GridOperation::MoveRow {
                row: row.into(),
                direction: direction(fwd),
            },
            Op::QuickSize(item, size) => GridOperation::QuickSize {
                item: item.into(),
                size: QuickSize::ALL[usize::from(size) % QuickSize::ALL.len()],
            },
            Op::OwnRow(item) => GridOperation::MoveToNewRow { item: item.into() },
            Op::Snap => GridOperation::Snap,
        }
    }
}

fuzz_target!(|input: Input| {
    let items: Vec<LayoutHints> = input
        .items
        .iter()
        .take(64)
        .map(|&(row, start, span)| LayoutHints {
            layout_row: row.map(i32::from),
            layout_col_start: start.map(i32::from),
            layout_col_span: span.map(i32::from),
        })
        .collect();
    let n = items.len();

    let mut grid = build(&items);
    assert!(grid.validate(Some(n)).is_ok(), "build broke an invariant");

    for op in input.ops.iter().take(256) {
        let before = grid.clone();
        let outcome = grid.apply(&op.to_operation());
        if outcome != Outcome::Applied {
            assert_eq!(grid, before, "{op:?} returned {outcome:?} but mutated");
        }
        if let Err(err) = grid.validate(Some(n)) {
            panic!("{op:?} broke an invariant: {err}");
        }
    }

    // Projection feeds back into an identical grid.
    assert_eq!(build(&project(&items, &grid)), grid);
});
