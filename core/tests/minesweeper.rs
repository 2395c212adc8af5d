use proptest::prelude::*;
use retrodesk_core::*;

fn policy() -> impl Strategy<Value = FirstMovePolicy> {
    prop_oneof![
        Just(FirstMovePolicy::SafeCell),
        Just(FirstMovePolicy::SafeNeighborhood),
    ]
}

/// A valid config plus an in-bounds first click.
fn board_and_click() -> impl Strategy<Value = (BoardConfig, Coord2)> {
    (1..=16u8, 1..=16u8, policy())
        .prop_flat_map(|(rows, cols, policy)| {
            let cells = mult(rows, cols);
            (
                Just((rows, cols)),
                0..cells,
                Just(policy),
                0..rows,
                0..cols,
            )
        })
        .prop_map(|(size, mines, policy, row, col)| {
            let config = BoardConfig::new(size, mines)
                .unwrap()
                .with_first_move(policy);
            (config, (row, col))
        })
}

fn all_coords(size: Coord2) -> impl Iterator<Item = Coord2> {
    (0..size.0).flat_map(move |row| (0..size.1).map(move |col| (row, col)))
}

#[test]
fn classic_board_center_click_is_safe_for_many_seeds() {
    for seed in 0..1000 {
        let mut engine = MinesweeperEngine::new(BoardConfig::classic(), seed).unwrap();
        engine.reveal((5, 5));

        assert!(!engine.cell((5, 5)).unwrap().is_mine(), "seed {seed}");
        assert_ne!(engine.status(), BoardStatus::Lost, "seed {seed}");
    }
}

proptest! {
    #[test]
    fn first_reveal_never_loses((config, click) in board_and_click(), seed in any::<u64>()) {
        let mut engine = MinesweeperEngine::new(config, seed).unwrap();
        let outcome = engine.reveal(click);

        prop_assert_ne!(outcome, RevealOutcome::HitMine);
        prop_assert!(matches!(engine.status(), BoardStatus::Running | BoardStatus::Won));
        let mines = all_coords(config.size())
            .filter(|&pos| engine.cell(pos).unwrap().is_mine())
            .count();
        prop_assert_eq!(mines, usize::from(config.mines()));
    }

    #[test]
    fn flood_fill_opens_whole_zero_regions((config, click) in board_and_click(), seed in any::<u64>()) {
        let mut engine = MinesweeperEngine::new(config, seed).unwrap();
        engine.reveal(click);
        let size = config.size();

        for pos in all_coords(size) {
            let cell = engine.cell(pos).unwrap();
            if !cell.is_revealed() {
                continue;
            }
            prop_assert!(!cell.is_mine());

            // zero cells expand into every neighbor
            if cell.adjacent_mines() == 0 {
                for next in Neighbors::new(pos, size) {
                    prop_assert!(engine.cell(next).unwrap().is_revealed());
                }
            }

            // anything opened besides the click was reached through a zero cell
            if pos != click {
                let reached = Neighbors::new(pos, size).any(|next| {
                    let cell = engine.cell(next).unwrap();
                    cell.is_revealed() && cell.adjacent_mines() == 0
                });
                prop_assert!(reached);
            }
        }
    }

    #[test]
    fn win_exactly_when_all_safe_cells_are_open(
        (config, click) in board_and_click(),
        seed in any::<u64>(),
        keys in proptest::collection::vec(any::<u32>(), 256),
    ) {
        let mut engine = MinesweeperEngine::new(config, seed).unwrap();
        engine.reveal(click);

        let mut order: Vec<Coord2> = all_coords(config.size()).collect();
        order.sort_by_key(|&(row, col)| keys[usize::from(row) * 16 + usize::from(col)]);

        for pos in order {
            let won_before = engine.status() == BoardStatus::Won;
            prop_assert_eq!(won_before, engine.revealed_count() == config.safe_cells());
            if won_before {
                break;
            }
            if engine.cell(pos).unwrap().is_mine() {
                continue;
            }
            engine.reveal(pos);
        }

        prop_assert_eq!(engine.status(), BoardStatus::Won);
        prop_assert_eq!(engine.revealed_count(), config.safe_cells());
    }

    #[test]
    fn stale_input_after_loss_changes_nothing(seed in any::<u64>(), row in 0..8u8, col in 0..8u8) {
        let mut engine = MinesweeperEngine::new(BoardConfig::compact(), seed).unwrap();
        engine.reveal((0, 0));
        prop_assume!(engine.status() == BoardStatus::Running);
        let mine = all_coords((8, 8)).find(|&pos| engine.cell(pos).unwrap().is_mine()).unwrap();
        engine.reveal(mine);
        prop_assert_eq!(engine.status(), BoardStatus::Lost);

        let revealed = engine.revealed_count();
        prop_assert!(!engine.apply(BoardInput::Reveal((row, col))));
        prop_assert!(!engine.apply(BoardInput::ToggleFlag((row, col))));
        prop_assert_eq!(engine.revealed_count(), revealed);
    }
}
