use alloc::collections::VecDeque;
use ndarray::Array2;
use rand::prelude::*;
use rand::rngs::SmallRng;

use crate::*;

#[derive(Clone, Debug)]
pub struct SnakeEngine<L = ()> {
    config: SnakeConfig,
    body: VecDeque<Position>,
    occupied: Array2<bool>,
    direction: Direction,
    pending_direction: Option<Direction>,
    food: Position,
    score: u32,
    high_score: u32,
    status: SnakeStatus,
    rng: SmallRng,
    listener: L,
}

impl SnakeEngine {
    pub fn new(config: SnakeConfig, seed: u64) -> Result<Self> {
        Self::with_listener(config, seed, ())
    }
}

impl<L: SnakeListener> SnakeEngine<L> {
    pub fn with_listener(config: SnakeConfig, seed: u64, listener: L) -> Result<Self> {
        let config = config.validate()?;
        let mut engine = Self {
            body: VecDeque::new(),
            occupied: Array2::default([0, 0]),
            direction: config.initial_direction(),
            pending_direction: None,
            food: Position::default(),
            score: 0,
            high_score: 0,
            status: SnakeStatus::Idle,
            rng: SmallRng::seed_from_u64(seed),
            config,
            listener,
        };
        engine.lay_out();
        Ok(engine)
    }

    /// Seeds the best score so far, usually loaded from storage.
    pub fn with_high_score(mut self, high_score: u32) -> Self {
        self.high_score = high_score;
        self
    }

    /// Puts the starting body on a `tile_count` grid and begins a run.
    pub fn start(&mut self, tile_count: Coord) -> Result<()> {
        self.config = self.config.clone().with_tile_count(tile_count)?;
        self.restart();
        Ok(())
    }

    /// Begins a new run on the current grid.
    pub fn restart(&mut self) {
        self.lay_out();
        self.status = SnakeStatus::Running;
        log::debug!(
            "snake started on {}x{} grid, food at {:?}",
            self.config.tile_count(),
            self.config.tile_count(),
            self.food
        );
        self.listener.on_score(self.score);
        self.listener.on_status(self.status);
        self.emit_frame();
    }

    /// Halts a run without ending it as a loss, e.g. when its window goes away.
    pub fn stop(&mut self) {
        if self.status.is_running() {
            log::debug!("snake stopped");
            self.status = SnakeStatus::Idle;
            self.listener.on_status(self.status);
        }
    }

    fn lay_out(&mut self) {
        let tile_count = usize::from(self.config.tile_count());
        self.occupied = Array2::default([tile_count, tile_count]);
        self.body = self.config.initial_body().iter().copied().collect();
        for pos in &self.body {
            self.occupied[pos.to_nd_index()] = true;
        }
        self.direction = self.config.initial_direction();
        self.pending_direction = None;
        self.score = 0;
        // a validated config always leaves a free cell
        if let Some(food) = self.free_cell() {
            self.food = food;
        }
    }

    pub fn apply(&mut self, input: SnakeInput) -> bool {
        match input {
            SnakeInput::Start => {
                self.restart();
                true
            }
            SnakeInput::Turn(direction) => self.set_direction(direction),
            SnakeInput::Tick => self.tick().has_update(),
        }
    }

    /// Queues a turn for the next tick. Turning back onto the neck is refused.
    pub fn set_direction(&mut self, direction: Direction) -> bool {
        if !self.status.is_running() || direction == self.direction.opposite() {
            return false;
        }
        self.pending_direction = Some(direction);
        true
    }

    pub fn tick(&mut self) -> TickOutcome {
        if !self.status.is_running() {
            return TickOutcome::Ignored;
        }

        if let Some(direction) = self.pending_direction.take() {
            self.direction = direction;
        }

        let Some(head) = self.head().step(self.direction, self.config.tile_count()) else {
            return self.crash(Collision::Wall);
        };
        if self.occupied[head.to_nd_index()] {
            return self.crash(Collision::SelfCollision);
        }

        self.body.push_front(head);
        self.occupied[head.to_nd_index()] = true;
        log::trace!("snake moved {:?} to {:?}", self.direction, head);

        let outcome = if head == self.food {
            self.eat()
        } else {
            if let Some(tail) = self.body.pop_back() {
                self.occupied[tail.to_nd_index()] = false;
            }
            TickOutcome::Moved
        };

        self.emit_frame();
        if outcome.is_terminal() {
            self.listener.on_status(self.status);
        }
        outcome
    }

    fn eat(&mut self) -> TickOutcome {
        self.score += 1;
        self.listener.on_score(self.score);
        if self.score > self.high_score {
            self.high_score = self.score;
            log::debug!("new high score: {}", self.high_score);
            self.listener.on_high_score(self.high_score);
        }

        match self.free_cell() {
            Some(food) => {
                self.food = food;
                TickOutcome::Ate
            }
            None => {
                log::debug!("snake filled the board");
                self.status = SnakeStatus::GameOver;
                TickOutcome::BoardFull
            }
        }
    }

    fn crash(&mut self, collision: Collision) -> TickOutcome {
        log::debug!("snake crashed: {:?}, score: {}", collision, self.score);
        self.status = SnakeStatus::GameOver;
        self.listener.on_status(self.status);
        TickOutcome::Crashed(collision)
    }

    /// Picks a random cell outside the body. Rejection sampling first, then a uniform
    /// draw over the free cells once the board gets crowded.
    fn free_cell(&mut self) -> Option<Position> {
        let tile_count = self.config.tile_count();
        let cells = self.occupied.len();
        if self.body.len() >= cells {
            return None;
        }

        for _ in 0..cells * 4 {
            let candidate = Position::new(
                self.rng.random_range(0..tile_count),
                self.rng.random_range(0..tile_count),
            );
            if !self.occupied[candidate.to_nd_index()] {
                return Some(candidate);
            }
        }

        log::warn!("food placement falling back to a free-cell scan");
        let free = cells - self.body.len();
        let pick = self.rng.random_range(0..free);
        self.occupied
            .indexed_iter()
            .filter(|&(_, &taken)| !taken)
            .nth(pick)
            .map(|((x, y), _)| Position::new(x as Coord, y as Coord))
    }

    fn emit_frame(&mut self) {
        let body = self.body.make_contiguous();
        self.listener.on_frame(body, self.food);
    }

    /// Moves the food to `food` if that cell is on the grid and free.
    pub fn place_food_at(&mut self, food: Position) -> bool {
        let tile_count = self.config.tile_count();
        if food.x >= tile_count || food.y >= tile_count || self.occupied[food.to_nd_index()] {
            return false;
        }
        self.food = food;
        true
    }

    pub fn head(&self) -> Position {
        self.body[0]
    }

    pub fn body(&self) -> &VecDeque<Position> {
        &self.body
    }

    pub fn food(&self) -> Position {
        self.food
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn pending_direction(&self) -> Option<Direction> {
        self.pending_direction
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn status(&self) -> SnakeStatus {
        self.status
    }

    pub fn config(&self) -> &SnakeConfig {
        &self.config
    }

    pub fn is_occupied(&self, pos: Position) -> bool {
        let tile_count = self.config.tile_count();
        pos.x < tile_count && pos.y < tile_count && self.occupied[pos.to_nd_index()]
    }

    pub fn listener(&self) -> &L {
        &self.listener
    }

    pub fn listener_mut(&mut self) -> &mut L {
        &mut self.listener
    }
}
