use lifegrid::Grid;
use lifegrid::Viewport;

fn grid_with(rows: usize, cols: usize, live: &[(usize, usize)]) -> Grid {
    let mut grid = Grid::new(rows, cols).unwrap();

    for &(r, c) in live {
        assert!(grid.set_alive(r, c, true), "({r}, {c}) is off the grid");
    }

    grid
}

fn live_cells(grid: &Grid) -> Vec<(usize, usize)> {
    let mut live = Vec::new();

    for (r, row) in grid.cells().rows().enumerate() {
        for (c, cell) in row.iter().enumerate() {
            if cell.is_alive() {
                live.push((r, c));
            }
        }
    }

    live
}

#[test]
fn dead_grid_stays_dead() {
    let mut grid = Grid::new(6, 9).unwrap();

    for _ in 0..5 {
        grid.advance_generation();
    }

    assert_eq!(grid.population(), 0);
}

#[test]
fn lone_cell_dies() {
    let mut grid = grid_with(5, 5, &[(2, 2)]);

    grid.advance_generation();

    assert!(live_cells(&grid).is_empty());
}

#[test]
fn block_is_still_life() {
    let block = [(1, 1), (1, 2), (2, 1), (2, 2)];
    let mut grid = grid_with(4, 4, &block);

    for _ in 0..10 {
        grid.advance_generation();
        assert_eq!(live_cells(&grid), block);
    }
}

#[test]
fn block_in_a_corner_is_still_life() {
    let block = [(0, 0), (0, 1), (1, 0), (1, 1)];
    let mut grid = grid_with(2, 2, &block);

    grid.advance_generation();

    assert_eq!(live_cells(&grid), block);
}

#[test]
fn blinker_oscillates() {
    let horizontal = [(2, 1), (2, 2), (2, 3)];
    let vertical = [(1, 2), (2, 2), (3, 2)];
    let mut grid = grid_with(5, 5, &horizontal);

    grid.advance_generation();
    assert_eq!(live_cells(&grid), vertical);

    grid.advance_generation();
    assert_eq!(live_cells(&grid), horizontal);
}

#[test]
fn glider_moves_diagonally() {
    let glider = [(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)];
    let mut grid = grid_with(8, 8, &glider);

    for _ in 0..4 {
        grid.advance_generation();
    }

    let moved: Vec<_> = glider.iter().map(|&(r, c)| (r + 1, c + 1)).collect();
    assert_eq!(live_cells(&grid), moved);
}

#[test]
fn blinker_against_the_edge_decays() {
    // Half the blinker would be off the board, and the edge does not wrap
    let mut grid = grid_with(3, 3, &[(0, 0), (0, 1), (0, 2)]);

    grid.advance_generation();
    assert_eq!(live_cells(&grid), [(0, 1), (1, 1)]);

    grid.advance_generation();
    assert!(live_cells(&grid).is_empty());
}

#[test]
fn append_rows_keeps_existing_cells() {
    let live = [(0, 0), (1, 3), (2, 2)];
    let mut grid = grid_with(3, 4, &live);

    grid.append_rows(2);

    assert_eq!(grid.row_count(), 5);
    assert_eq!(grid.column_count(), 4);
    assert_eq!(live_cells(&grid), live);
    for row in 3..5 {
        for col in 0..4 {
            assert!(!grid.is_alive(row, col));
        }
    }
}

#[test]
fn append_columns_keeps_existing_cells() {
    let live = [(0, 3), (2, 0)];
    let mut grid = grid_with(3, 4, &live);

    grid.append_columns(3);

    assert_eq!(grid.column_count(), 7);
    assert_eq!(live_cells(&grid), live);
}

#[test]
fn crop_rebases_to_the_viewport() {
    let mut grid = grid_with(4, 4, &[(0, 0), (1, 1), (2, 1), (3, 3)]);

    grid.set_viewport(Viewport::new(1, 2, 1, 2)).unwrap();
    grid.crop_to_viewport();

    assert_eq!((grid.row_count(), grid.column_count()), (2, 2));
    assert_eq!(grid.viewport(), Viewport::new(0, 1, 0, 1));
    assert!(grid.is_alive(0, 0));
    assert_eq!(live_cells(&grid), [(0, 0), (1, 0)]);

    // The corners were dropped, growing back does not restore them
    grid.append_rows(2);
    grid.append_columns(2);
    assert_eq!(live_cells(&grid), [(0, 0), (1, 0)]);
}

#[test]
fn toggle_out_of_range_is_ignored() {
    let mut grid = grid_with(3, 4, &[(1, 1)]);
    let before = grid.clone();

    let coords = [(0, 1), (4, 1), (1, 0), (1, 5), (0, 0), (4, 5)];
    for (row, col) in coords {
        assert!(!grid.toggle_cell_at(row, col), "({row}, {col})");
    }

    assert_eq!(grid, before);
}

#[test]
fn toggle_corners() {
    let mut grid = Grid::new(3, 4).unwrap();

    assert!(grid.toggle_cell_at(1, 1));
    assert!(grid.toggle_cell_at(3, 4));

    assert_eq!(live_cells(&grid), [(0, 0), (2, 3)]);
}

#[test]
fn evolution_covers_cells_outside_the_viewport() {
    let mut grid = grid_with(5, 5, &[(3, 2), (3, 3), (3, 4)]);
    grid.set_viewport(Viewport::new(0, 1, 0, 1)).unwrap();

    grid.advance_generation();

    assert_eq!(live_cells(&grid), [(2, 3), (3, 3), (4, 3)]);
}

mod properties {
    use lifegrid::Cell;
    use lifegrid::Grid;
    use lifegrid::Viewport;
    use proptest::prelude::*;

    fn arb_grid() -> impl Strategy<Value = Grid> {
        (1..12usize, 1..12usize)
            .prop_flat_map(|(rows, cols)| {
                prop::collection::vec(any::<bool>(), rows * cols)
                    .prop_map(move |states| (rows, cols, states))
            })
            .prop_map(|(rows, cols, states)| {
                let mut grid = Grid::new(rows, cols).unwrap();

                for (i, alive) in states.into_iter().enumerate() {
                    grid.set_alive(i / cols, i % cols, alive);
                }

                grid
            })
    }

    /// Conway's rule evaluated directly on a copy of the states.
    fn reference_step(grid: &Grid) -> Vec<bool> {
        let (rows, cols) = (grid.row_count() as isize, grid.column_count() as isize);
        let alive = |r: isize, c: isize| {
            (0..rows).contains(&r)
                && (0..cols).contains(&c)
                && grid.is_alive(r as usize, c as usize)
        };

        let mut next = Vec::new();
        for r in 0..rows {
            for c in 0..cols {
                let mut n = 0;
                for dr in -1..=1 {
                    for dc in -1..=1 {
                        if (dr, dc) != (0, 0) && alive(r + dr, c + dc) {
                            n += 1;
                        }
                    }
                }

                next.push(n == 3 || (n == 2 && alive(r, c)));
            }
        }

        next
    }

    fn states(grid: &Grid) -> Vec<bool> {
        grid.cells().rows().flatten().map(Cell::is_alive).collect()
    }

    proptest! {
        #[test]
        fn step_matches_reference(mut grid in arb_grid()) {
            let want = reference_step(&grid);

            grid.advance_generation();

            prop_assert_eq!(states(&grid), want);
        }

        #[test]
        fn dead_grids_stay_dead(rows in 1..20usize, cols in 1..20usize, steps in 0..5usize) {
            let mut grid = Grid::new(rows, cols).unwrap();

            for _ in 0..steps {
                grid.advance_generation();
            }

            prop_assert_eq!(grid.population(), 0);
        }

        #[test]
        fn neighbor_counts_are_bounded(grid in arb_grid()) {
            for r in 0..grid.row_count() {
                for c in 0..grid.column_count() {
                    prop_assert!(grid.count_live_neighbors(r, c) <= 8);
                }
            }
        }

        #[test]
        fn staging_is_idempotent(alive: bool, n in 0..=8u8) {
            let mut once = if alive { Cell::alive() } else { Cell::dead() };
            once.stage_next_state(n);

            let mut twice = once;
            twice.stage_next_state(n);

            prop_assert_eq!(once.pending(), twice.pending());
            prop_assert_eq!(once.is_alive(), alive);
        }

        #[test]
        fn append_preserves_cells(grid in arb_grid(), extra_rows in 0..5usize, extra_cols in 0..5usize) {
            let before = grid.clone();
            let mut grid = grid;

            grid.append_rows(extra_rows);
            grid.append_columns(extra_cols);

            prop_assert_eq!(grid.row_count(), before.row_count() + extra_rows);
            prop_assert_eq!(grid.column_count(), before.column_count() + extra_cols);
            prop_assert_eq!(grid.population(), before.population());

            for r in 0..before.row_count() {
                for c in 0..before.column_count() {
                    prop_assert_eq!(grid.is_alive(r, c), before.is_alive(r, c));
                }
            }
        }

        #[test]
        fn crop_rebases(grid in arb_grid(), a in any::<prop::sample::Index>(), b in any::<prop::sample::Index>(), c in any::<prop::sample::Index>(), d in any::<prop::sample::Index>()) {
            let (rows, cols) = (grid.row_count(), grid.column_count());
            let (r0, r1) = (a.index(rows), b.index(rows));
            let (c0, c1) = (c.index(cols), d.index(cols));
            let vp = Viewport::new(r0.min(r1), r0.max(r1), c0.min(c1), c0.max(c1));

            let before = grid.clone();
            let mut grid = grid;
            grid.set_viewport(vp).unwrap();
            grid.crop_to_viewport();

            prop_assert_eq!(grid.row_count(), vp.row_count());
            prop_assert_eq!(grid.column_count(), vp.column_count());
            prop_assert_eq!(grid.viewport(), Viewport::full(vp.row_count(), vp.column_count()));

            for r in 0..grid.row_count() {
                for c in 0..grid.column_count() {
                    prop_assert_eq!(grid.is_alive(r, c), before.is_alive(vp.row_start + r, vp.col_start + c));
                }
            }
        }
    }
}
