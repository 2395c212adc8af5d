use ndarray::Array2;
use rand::prelude::*;
use rand::rngs::SmallRng;

use crate::*;

/// Resolves the configured policy against the board, falling back to a single safe cell
/// when the neighborhood cannot be kept clear.
fn effective_policy(config: &BoardConfig, safe: Coord2) -> FirstMovePolicy {
    match config.first_move() {
        FirstMovePolicy::SafeCell => FirstMovePolicy::SafeCell,
        FirstMovePolicy::SafeNeighborhood => {
            let reserved = 1 + Neighbors::new(safe, config.size()).count() as CellCount;
            if config.mines() > config.total_cells() - reserved {
                log::warn!("Cannot keep the start neighborhood clear, fallback to safe cell");
                FirstMovePolicy::SafeCell
            } else {
                FirstMovePolicy::SafeNeighborhood
            }
        }
    }
}

const fn is_reserved(policy: FirstMovePolicy, safe: Coord2, coords: Coord2) -> bool {
    match policy {
        FirstMovePolicy::SafeCell => safe.0 == coords.0 && safe.1 == coords.1,
        FirstMovePolicy::SafeNeighborhood => {
            safe.0.abs_diff(coords.0) <= 1 && safe.1.abs_diff(coords.1) <= 1
        }
    }
}

/// Scatters `config.mines()` mines by rejection sampling, never on the reserved cells
/// around `safe`.
pub(super) fn place_mines(
    cells: &mut Array2<Cell>,
    config: &BoardConfig,
    safe: Coord2,
    rng: &mut SmallRng,
) {
    let policy = effective_policy(config, safe);
    let (rows, cols) = config.size();
    let mut placed = 0;

    while placed < config.mines() {
        let coords = (rng.random_range(0..rows), rng.random_range(0..cols));
        if is_reserved(policy, safe, coords) {
            continue;
        }
        let cell = &mut cells[coords.to_nd_index()];
        if cell.is_mine {
            continue;
        }
        cell.is_mine = true;
        placed += 1;
    }

    log::debug!("placed {} mines, first move at {:?} ({:?})", placed, safe, policy);
}

/// Fills in `adjacent_mines` for every safe cell.
pub(super) fn count_adjacent(cells: &mut Array2<Cell>, size: Coord2) {
    for row in 0..size.0 {
        for col in 0..size.1 {
            let coords = (row, col);
            if cells[coords.to_nd_index()].is_mine {
                continue;
            }
            let count = Neighbors::new(coords, size)
                .filter(|pos| cells[pos.to_nd_index()].is_mine)
                .count();
            cells[coords.to_nd_index()].adjacent_mines = count as u8;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(seed: u64) -> SmallRng {
        SmallRng::seed_from_u64(seed)
    }

    #[test]
    fn places_exact_count_and_skips_safe_cell() {
        let config = BoardConfig::new((4, 4), 15).unwrap();
        for seed in 0..32 {
            let mut cells = Array2::default(config.size().to_nd_index());
            place_mines(&mut cells, &config, (2, 1), &mut seeded(seed));

            assert_eq!(cells.iter().filter(|cell| cell.is_mine).count(), 15);
            assert!(!cells[[2, 1]].is_mine);
        }
    }

    #[test]
    fn safe_neighborhood_keeps_ring_clear() {
        let config = BoardConfig::new((10, 10), 30)
            .unwrap()
            .with_first_move(FirstMovePolicy::SafeNeighborhood);
        for seed in 0..32 {
            let mut cells = Array2::default(config.size().to_nd_index());
            place_mines(&mut cells, &config, (0, 9), &mut seeded(seed));
            count_adjacent(&mut cells, config.size());

            assert_eq!(cells[[0, 9]].adjacent_mines, 0);
            for pos in Neighbors::new((0, 9), config.size()) {
                assert!(!cells[pos.to_nd_index()].is_mine);
            }
        }
    }

    #[test]
    fn crowded_board_degrades_to_safe_cell() {
        let config = BoardConfig::new((3, 3), 8)
            .unwrap()
            .with_first_move(FirstMovePolicy::SafeNeighborhood);
        let mut cells = Array2::default(config.size().to_nd_index());
        place_mines(&mut cells, &config, (1, 1), &mut seeded(7));

        assert!(!cells[[1, 1]].is_mine);
        assert_eq!(cells.iter().filter(|cell| cell.is_mine).count(), 8);
    }

    #[test]
    fn counts_ignore_out_of_bounds() {
        let size = (2, 3);
        let mut cells: Array2<Cell> = Array2::default(size.to_nd_index());
        cells[[0, 0]].is_mine = true;
        cells[[1, 2]].is_mine = true;
        count_adjacent(&mut cells, size);

        assert_eq!(cells[[0, 1]].adjacent_mines, 2);
        assert_eq!(cells[[1, 0]].adjacent_mines, 1);
        assert_eq!(cells[[0, 2]].adjacent_mines, 1);
        assert_eq!(cells[[0, 0]].adjacent_mines, 0);
    }
}
