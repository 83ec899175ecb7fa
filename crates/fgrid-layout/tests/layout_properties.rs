//! End-to-end layout properties over the public builder/resolver/projection API.

use fgrid_core::{Cell, Direction, DropTarget, Gap, LayoutHints, LayoutItem};
use fgrid_layout::{
    Grid, Outcome, RejectReason, build, compute_gaps, move_cell_to_row, nudge, project,
    remove_and_rebuild, resize_right, swap_in_row,
};
use proptest::prelude::*;

#[derive(Debug, Clone, PartialEq)]
struct Field {
    key: String,
    hints: LayoutHints,
}

impl LayoutItem for Field {
    fn layout(&self) -> LayoutHints {
        self.hints
    }

    fn set_layout(&mut self, hints: LayoutHints) {
        self.hints = hints;
    }
}

fn fields(hints: &[LayoutHints]) -> Vec<Field> {
    hints
        .iter()
        .enumerate()
        .map(|(i, hints)| Field {
            key: format!("field-{i}"),
            hints: *hints,
        })
        .collect()
}

fn placements(grid: &Grid) -> Vec<Vec<(usize, u8, u8)>> {
    grid.rows()
        .iter()
        .map(|row| {
            row.cells()
                .iter()
                .map(|c| (c.item, c.col_start, c.col_span))
                .collect()
        })
        .collect()
}

fn hint_strategy() -> impl Strategy<Value = LayoutHints> {
    (
        proptest::option::of(-2i32..6),
        proptest::option::of(-3i32..16),
        proptest::option::of(-3i32..16),
    )
        .prop_map(|(layout_row, layout_col_start, layout_col_span)| LayoutHints {
            layout_row,
            layout_col_start,
            layout_col_span,
        })
}

fn assert_cells_in_bounds(grid: &Grid) {
    for (row, cell) in grid.cells() {
        assert!(
            cell.col_span >= 1 && cell.col_span <= 12,
            "row {row}: {cell:?}"
        );
        assert!(cell.col_end() <= 12, "row {row}: {cell:?}");
    }
}

#[test]
fn project_round_trips_single_half_width_item() {
    let items = fields(&[LayoutHints::span(6)]);
    let projected = project(&items, &build(&items));
    assert_eq!(projected[0].hints, LayoutHints::placed(1, 1, 6));
}

#[test]
fn three_half_width_items_wrap() {
    let grid = build(&[LayoutHints::span(6); 3]);
    assert_eq!(
        placements(&grid),
        vec![vec![(0, 0, 6), (1, 6, 6)], vec![(2, 0, 6)]]
    );
}

#[test]
fn resize_right_displaces_neighbor() {
    let mut grid = build(&[LayoutHints::span(6); 2]);
    assert_eq!(resize_right(&mut grid, 0, 2), Outcome::Applied);
    assert_eq!(placements(&grid), vec![vec![(0, 0, 8), (1, 8, 4)]]);

    let mut grid = build(&[LayoutHints::span(6); 2]);
    assert_eq!(resize_right(&mut grid, 0, 8), Outcome::Applied);
    assert_eq!(placements(&grid), vec![vec![(0, 0, 11), (1, 11, 1)]]);
}

#[test]
fn nudging_full_width_cell_is_noop() {
    let mut grid = build(&[LayoutHints::AUTO]);
    let before = grid.clone();
    assert_eq!(
        nudge(&mut grid, 0, Direction::Forward),
        Outcome::Rejected(RejectReason::OutOfBounds)
    );
    assert_eq!(grid, before);
}

#[test]
fn swap_moves_cells_past_each_other() {
    let mut grid = build(&[LayoutHints::span(4), LayoutHints::span(8)]);
    assert_eq!(swap_in_row(&mut grid, 0, Direction::Forward), Outcome::Applied);
    assert_eq!(grid.cell(0), Some(Cell::new(0, 8, 4)));
    assert_eq!(grid.cell(1), Some(Cell::new(1, 0, 8)));
}

#[test]
fn gaps_surround_cell() {
    let grid = build(&[LayoutHints::placed(1, 4, 4)]);
    assert_eq!(
        compute_gaps(&grid.rows()[0]),
        vec![Gap::new(0, 3), Gap::new(7, 5)]
    );
}

#[test]
fn drop_clips_to_gap() {
    let mut grid = build(&[LayoutHints::span(8), LayoutHints::placed(1, 1, 9)]);
    let gap = compute_gaps(&grid.rows()[0])[0];
    assert_eq!(gap, Gap::new(9, 3));
    let target = DropTarget::Gap { row: 0, gap };
    assert_eq!(move_cell_to_row(&mut grid, 0, target), Outcome::Applied);
    assert_eq!(placements(&grid), vec![vec![(1, 0, 9), (0, 9, 3)]]);
}

#[test]
fn remove_drops_one_item_and_keeps_the_rest() {
    let items = fields(&[
        LayoutHints::span(4),
        LayoutHints::span(4),
        LayoutHints::span(4),
        LayoutHints::AUTO,
    ]);
    let grid = build(&items);
    let (remaining, rebuilt) = remove_and_rebuild(&items, &grid, 1).unwrap();
    let keys: Vec<&str> = remaining.iter().map(|f| f.key.as_str()).collect();
    assert_eq!(keys, ["field-0", "field-2", "field-3"]);
    assert_eq!(remaining[0].hints, LayoutHints::placed(1, 1, 4));
    assert_eq!(remaining[1].hints, LayoutHints::placed(1, 9, 4));
    assert_eq!(remaining[2].hints, LayoutHints::placed(2, 1, 12));
    assert!(rebuilt.validate(Some(3)).is_ok());
}

proptest! {
    #[test]
    fn build_always_satisfies_invariants(hints in prop::collection::vec(hint_strategy(), 0..24)) {
        let grid = build(&hints);
        assert_cells_in_bounds(&grid);
        let report = grid.invariant_report(Some(hints.len()));
        prop_assert!(report.is_valid(), "{:?}", report.issues);
    }

    #[test]
    fn projection_round_trips_through_build(
        hints in prop::collection::vec(hint_strategy(), 0..24),
    ) {
        let items = fields(&hints);
        let grid = build(&items);
        let projected = project(&items, &grid);
        prop_assert_eq!(build(&projected), grid.clone());
        prop_assert_eq!(project(&projected, &grid), projected);
    }

    #[test]
    fn projection_never_touches_input(hints in prop::collection::vec(hint_strategy(), 1..12)) {
        let items = fields(&hints);
        let copy = items.clone();
        let _ = project(&items, &build(&items));
        prop_assert_eq!(items, copy);
    }

    #[test]
    fn remove_keeps_count_and_order(
        hints in prop::collection::vec(hint_strategy(), 1..16),
        pick in any::<prop::sample::Index>(),
    ) {
        let items = fields(&hints);
        let index = pick.index(items.len());
        let grid = build(&items);
        let (remaining, rebuilt) = remove_and_rebuild(&items, &grid, index).unwrap();
        prop_assert_eq!(remaining.len(), items.len() - 1);
        let expected: Vec<String> = items
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != index)
            .map(|(_, f)| f.key.clone())
            .collect();
        let actual: Vec<String> = remaining.iter().map(|f| f.key.clone()).collect();
        prop_assert_eq!(actual, expected);
        prop_assert!(rebuilt.validate(Some(remaining.len())).is_ok());
    }
}
