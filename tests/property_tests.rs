//! Property tests for fit testing, rotation, row clearing and scoring

use proptest::prelude::*;

use blockfall::core::shapes::rotation_count;
use blockfall::core::{clear_score, fits, next_rotation, shape, GameSession, Grid, Pos};
use blockfall::types::{GameAction, PieceKind, GRID_HEIGHT, GRID_WIDTH};

fn kind_strategy() -> impl Strategy<Value = PieceKind> {
    prop::sample::select(PieceKind::ALL.to_vec())
}

fn action_strategy() -> impl Strategy<Value = GameAction> {
    prop::sample::select(vec![
        GameAction::MoveLeft,
        GameAction::MoveRight,
        GameAction::SoftDrop,
        GameAction::Rotate,
        GameAction::HardDrop,
        GameAction::Hold,
        GameAction::Pause,
        GameAction::Restart,
    ])
}

/// Grid with each cell filled independently.
fn grid_strategy() -> impl Strategy<Value = Grid> {
    prop::collection::vec(any::<bool>(), (GRID_WIDTH as usize) * (GRID_HEIGHT as usize)).prop_map(
        |filled| {
            let mut grid = Grid::new();
            for (i, on) in filled.into_iter().enumerate() {
                let x = (i % GRID_WIDTH as usize) as i8;
                let y = (i / GRID_WIDTH as usize) as i8;
                if let (true, Some(pos)) = (on, Pos::new(x, y)) {
                    grid.set(pos, Some(PieceKind::Z));
                }
            }
            grid
        },
    )
}

/// Grid whose rows are each either full or sparse.
fn banded_grid_strategy() -> impl Strategy<Value = Grid> {
    prop::collection::vec((any::<bool>(), 0u8..10), GRID_HEIGHT as usize).prop_map(|rows| {
        let mut grid = Grid::new();
        for (y, (full, hole)) in rows.into_iter().enumerate() {
            for x in 0..GRID_WIDTH {
                if !full && x != hole && x % 3 != 0 {
                    continue;
                }
                if let Some(pos) = Pos::new(x as i8, y as i8) {
                    grid.set(pos, Some(PieceKind::ALL[(y + x as usize) % 7]));
                }
            }
        }
        grid
    })
}

proptest! {
    #[test]
    fn fits_iff_every_cell_in_bounds_and_free(
        grid in grid_strategy(),
        kind in kind_strategy(),
        rotation in 0usize..4,
        x in -4i8..13,
        y in -4i8..23,
    ) {
        let expected = shape(kind, rotation).iter().all(|&(dx, dy)| {
            let (cx, cy) = (x + dx, y + dy);
            cx >= 0
                && cy >= 0
                && cx < GRID_WIDTH as i8
                && cy < GRID_HEIGHT as i8
                && grid.get(cx, cy) == Some(None)
        });
        prop_assert_eq!(fits(&grid, kind, rotation, x, y), expected);
    }

    #[test]
    fn rotation_cycle_returns_to_start(kind in kind_strategy(), start in 0usize..4) {
        let start = start % rotation_count(kind);
        let mut r = start;
        for _ in 0..rotation_count(kind) {
            r = next_rotation(kind, r);
        }
        prop_assert_eq!(r, start);
        prop_assert_eq!(shape(kind, r), shape(kind, start));
    }

    #[test]
    fn clear_order_does_not_matter(grid in banded_grid_strategy(), seed in any::<u64>()) {
        let rows = grid.full_rows();
        let mut shuffled: Vec<usize> = rows.iter().copied().collect();
        // Deterministic shuffle driven by the seed.
        let len = shuffled.len();
        if len > 1 {
            for i in (1..len).rev() {
                let j = (seed.rotate_left(i as u32) as usize) % (i + 1);
                shuffled.swap(i, j);
            }
        }

        let mut a = grid.clone();
        let mut b = grid.clone();
        prop_assert_eq!(a.clear_rows(&rows), rows.len());
        prop_assert_eq!(b.clear_rows(&shuffled), rows.len());
        prop_assert_eq!(&a, &b);
        prop_assert!(a.full_rows().is_empty());
        prop_assert_eq!(
            a.filled_count(),
            grid.filled_count() - rows.len() * GRID_WIDTH as usize
        );
    }

    #[test]
    fn clear_score_formula(lines in 1u32..=4, combo in -1i32..20) {
        let expected = lines * 100 + combo.max(0) as u32 * 50;
        prop_assert_eq!(clear_score(lines, combo).total, expected);
    }

    #[test]
    fn session_invariants_hold_under_random_play(
        seed in any::<u32>(),
        actions in prop::collection::vec(action_strategy(), 0..200),
    ) {
        let mut game = GameSession::new(seed);
        game.start();
        let mut last_score = game.score();
        let mut last_best = game.high_score();

        for action in actions {
            game.apply_action(action);
            if action != GameAction::HardDrop && action != GameAction::Pause {
                // Gravity interleaved with play.
                game.tick();
            }

            if action == GameAction::Restart {
                prop_assert!(!game.game_over());
                prop_assert_eq!(game.score(), 0);
            } else {
                prop_assert!(game.score() >= last_score);
            }
            prop_assert!(game.high_score() >= last_best);
            prop_assert!(game.grid().full_rows().is_empty());
            prop_assert!(game.high_score() >= game.score());
            if let Some(active) = game.active() {
                prop_assert!(active.fits(game.grid()));
            }
            let combo = game.combo();
            prop_assert!(combo >= -1);

            last_score = game.score();
            last_best = game.high_score();
        }
    }
}
