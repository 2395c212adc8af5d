use alloc::vec;
use ndarray::Array2;
use rand::prelude::*;
use rand::rngs::SmallRng;

use super::layout;
use crate::*;

#[derive(Clone, Debug)]
pub struct MinesweeperEngine<L = ()> {
    config: BoardConfig,
    cells: Array2<Cell>,
    rng: SmallRng,
    mines_placed: bool,
    revealed_count: CellCount,
    flag_count: CellCount,
    status: BoardStatus,
    triggered_mine: Option<Coord2>,
    listener: L,
}

impl MinesweeperEngine {
    pub fn new(config: BoardConfig, seed: u64) -> Result<Self> {
        Self::with_listener(config, seed, ())
    }
}

impl<L: BoardListener> MinesweeperEngine<L> {
    pub fn with_listener(config: BoardConfig, seed: u64, listener: L) -> Result<Self> {
        let config = config.validate()?;
        Ok(Self {
            config,
            cells: Array2::default(config.size().to_nd_index()),
            rng: SmallRng::seed_from_u64(seed),
            mines_placed: false,
            revealed_count: 0,
            flag_count: 0,
            status: BoardStatus::Idle,
            triggered_mine: None,
            listener,
        })
    }

    /// Builds a board with a fixed mine layout, skipping lazy placement.
    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2], listener: L) -> Result<Self> {
        let mut cells: Array2<Cell> = Array2::default(size.to_nd_index());
        for &coords in mine_coords {
            if coords.0 >= size.0 || coords.1 >= size.1 {
                return Err(GameError::InvalidCoords);
            }
            cells[coords.to_nd_index()].is_mine = true;
        }
        let mines = cells.iter().filter(|cell| cell.is_mine).count() as CellCount;
        let config = BoardConfig::new(size, mines)?;
        layout::count_adjacent(&mut cells, size);

        let mut engine = Self::with_listener(config, 0, listener)?;
        engine.cells = cells;
        engine.mines_placed = true;
        Ok(engine)
    }

    /// Starts over on a fresh board of the given shape, keeping the first-move policy.
    pub fn reset(&mut self, rows: Coord, cols: Coord, mines: CellCount) -> Result<()> {
        let config =
            BoardConfig::new((rows, cols), mines)?.with_first_move(self.config.first_move());
        self.reinit(config);
        Ok(())
    }

    /// Starts over with the current configuration.
    pub fn restart(&mut self) {
        self.reinit(self.config);
    }

    fn reinit(&mut self, config: BoardConfig) {
        self.config = config;
        self.cells = Array2::default(config.size().to_nd_index());
        self.mines_placed = false;
        self.revealed_count = 0;
        self.flag_count = 0;
        self.status = BoardStatus::Idle;
        self.triggered_mine = None;
        log::debug!("new board {:?} with {} mines", config.size(), config.mines());
        self.listener.on_board_redraw();
        self.listener.on_status(self.status);
    }

    pub fn apply(&mut self, input: BoardInput) -> bool {
        match input {
            BoardInput::Reveal(coords) => self.reveal(coords).has_update(),
            BoardInput::ToggleFlag(coords) => self.toggle_flag(coords).has_update(),
        }
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> FlagOutcome {
        if self.status.is_finished() || !self.config.contains(coords) {
            return FlagOutcome::NoChange;
        }

        let cell = &mut self.cells[coords.to_nd_index()];
        if cell.is_revealed {
            return FlagOutcome::NoChange;
        }
        cell.is_flagged = !cell.is_flagged;
        if cell.is_flagged {
            self.flag_count += 1;
        } else {
            self.flag_count -= 1;
        }

        self.listener.on_cell_changed(coords, self.cell_view(coords));
        FlagOutcome::Changed
    }

    pub fn reveal(&mut self, coords: Coord2) -> RevealOutcome {
        if self.status.is_finished() || !self.config.contains(coords) {
            return RevealOutcome::NoChange;
        }

        let cell = self.cells[coords.to_nd_index()];
        if cell.is_revealed || cell.is_flagged {
            return RevealOutcome::NoChange;
        }

        if !self.mines_placed {
            layout::place_mines(&mut self.cells, &self.config, coords, &mut self.rng);
            layout::count_adjacent(&mut self.cells, self.config.size());
            self.mines_placed = true;
        }

        if self.cells[coords.to_nd_index()].is_mine {
            self.lose(coords);
            return RevealOutcome::HitMine;
        }

        self.flood_reveal(coords);
        if self.status == BoardStatus::Idle {
            self.status = BoardStatus::Running;
            self.listener.on_status(self.status);
        }

        if self.revealed_count == self.config.safe_cells() {
            self.finish(BoardStatus::Won);
            RevealOutcome::Won
        } else {
            RevealOutcome::Revealed
        }
    }

    /// Opens `start` and, through zero cells, every safe cell connected to it.
    fn flood_reveal(&mut self, start: Coord2) {
        let size = self.config.size();
        let mut worklist = vec![start];

        while let Some(coords) = worklist.pop() {
            let cell = &mut self.cells[coords.to_nd_index()];
            if !cell.is_floodable() {
                continue;
            }
            cell.is_revealed = true;
            let adjacent = cell.adjacent_mines;
            self.revealed_count += 1;
            log::trace!("revealed {:?}, adjacent mines: {}", coords, adjacent);
            self.listener.on_cell_changed(coords, CellView::Revealed(adjacent));

            if adjacent == 0 {
                let cells = &self.cells;
                worklist.extend(
                    Neighbors::new(coords, size)
                        .filter(|pos| cells[pos.to_nd_index()].is_floodable()),
                );
            }
        }
    }

    fn lose(&mut self, triggered: Coord2) {
        self.triggered_mine = Some(triggered);
        let (rows, cols) = self.config.size();
        for row in 0..rows {
            for col in 0..cols {
                let coords = (row, col);
                let cell = &mut self.cells[coords.to_nd_index()];
                if cell.is_mine {
                    cell.is_revealed = true;
                    let view = self.cell_view(coords);
                    self.listener.on_cell_changed(coords, view);
                }
            }
        }
        self.finish(BoardStatus::Lost);
    }

    fn finish(&mut self, status: BoardStatus) {
        self.status = status;
        log::debug!("game finished: {:?}", status);
        self.listener.on_status(status);
    }

    pub fn status(&self) -> BoardStatus {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_finished()
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn size(&self) -> Coord2 {
        self.config.size()
    }

    pub fn mines_placed(&self) -> bool {
        self.mines_placed
    }

    /// Safe cells opened so far. Mines shown after a loss are not counted.
    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    pub fn flag_count(&self) -> CellCount {
        self.flag_count
    }

    pub fn mines_left(&self) -> isize {
        self.config.mines() as isize - self.flag_count as isize
    }

    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    pub fn cell(&self, coords: Coord2) -> Option<Cell> {
        self.config
            .contains(coords)
            .then(|| self.cells[coords.to_nd_index()])
    }

    pub fn cell_view(&self, coords: Coord2) -> CellView {
        let Some(cell) = self.cell(coords) else {
            return CellView::Hidden;
        };
        match cell {
            Cell {
                is_revealed: true,
                is_mine: true,
                ..
            } if self.triggered_mine == Some(coords) => CellView::TriggeredMine,
            Cell {
                is_revealed: true,
                is_mine: true,
                ..
            } => CellView::Mine,
            Cell {
                is_revealed: true,
                adjacent_mines,
                ..
            } => CellView::Revealed(adjacent_mines),
            Cell {
                is_flagged: true, ..
            } => CellView::Flagged,
            _ => CellView::Hidden,
        }
    }

    pub fn listener(&self) -> &L {
        &self.listener
    }

    pub fn listener_mut(&mut self) -> &mut L {
        &mut self.listener
    }
}
