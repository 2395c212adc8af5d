use crate::*;

/// A snake game together with the timer that drives it.
///
/// The timer handle is whatever the host's scheduler returns; dropping it must cancel
/// the timer. The session keeps at most one alive and drops it as soon as the game can
/// no longer advance.
#[derive(Debug)]
pub struct SnakeSession<H, L = ()> {
    engine: SnakeEngine<L>,
    timer: TimerSlot<H>,
}

impl<H, L: SnakeListener> SnakeSession<H, L> {
    pub fn new(engine: SnakeEngine<L>) -> Self {
        Self {
            engine,
            timer: TimerSlot::new(),
        }
    }

    /// Starts a run on a `tile_count` grid and arms a fresh timer from `schedule`,
    /// which receives the tick period in milliseconds.
    pub fn start<F>(&mut self, tile_count: Coord, schedule: F) -> Result<()>
    where
        F: FnOnce(u32) -> H,
    {
        self.engine.start(tile_count)?;
        self.timer.arm(schedule(self.engine.config().tick_period_ms()));
        Ok(())
    }

    pub fn restart<F>(&mut self, schedule: F)
    where
        F: FnOnce(u32) -> H,
    {
        self.engine.restart();
        self.timer.arm(schedule(self.engine.config().tick_period_ms()));
    }

    pub fn tick(&mut self) -> TickOutcome {
        let outcome = self.engine.tick();
        if !self.engine.status().is_running() && self.timer.disarm() {
            log::debug!("snake timer cancelled after {:?}", outcome);
        }
        outcome
    }

    pub fn turn(&mut self, direction: Direction) -> bool {
        self.engine.set_direction(direction)
    }

    /// Cancels the timer and halts the run. Returns whether a timer was running.
    pub fn stop(&mut self) -> bool {
        self.engine.stop();
        self.timer.disarm()
    }

    pub fn is_ticking(&self) -> bool {
        self.timer.is_armed()
    }

    pub fn engine(&self) -> &SnakeEngine<L> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut SnakeEngine<L> {
        &mut self.engine
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use alloc::vec;
    use core::cell::Cell;

    /// Stand-in for a host interval: counts how often it gets cancelled.
    struct FakeTimer {
        period: u32,
        cancelled: Rc<Cell<u32>>,
    }

    impl Drop for FakeTimer {
        fn drop(&mut self) {
            self.cancelled.set(self.cancelled.get() + 1);
        }
    }

    fn session() -> (SnakeSession<FakeTimer>, Rc<Cell<u32>>) {
        let engine = SnakeEngine::new(SnakeConfig::default(), 3).unwrap();
        (SnakeSession::new(engine), Rc::new(Cell::new(0)))
    }

    fn timer(cancelled: &Rc<Cell<u32>>) -> impl FnOnce(u32) -> FakeTimer + use<> {
        let cancelled = cancelled.clone();
        move |period| FakeTimer { period, cancelled }
    }

    #[test]
    fn start_arms_one_timer_with_configured_period() {
        let (mut session, cancelled) = session();
        let mut seen_period = 0;
        session
            .start(12, |period| {
                seen_period = period;
                FakeTimer {
                    period,
                    cancelled: cancelled.clone(),
                }
            })
            .unwrap();

        assert_eq!(seen_period, SnakeConfig::DEFAULT_TICK_PERIOD_MS);
        assert!(session.is_ticking());
        assert_eq!(cancelled.get(), 0);
    }

    #[test]
    fn restarting_replaces_the_previous_timer() {
        let (mut session, cancelled) = session();
        session.start(12, timer(&cancelled)).unwrap();
        session.restart(timer(&cancelled));
        session.restart(timer(&cancelled));

        assert_eq!(cancelled.get(), 2);
        assert!(session.is_ticking());
    }

    #[test]
    fn game_over_cancels_exactly_once() {
        let config = SnakeConfig::default()
            .with_body(vec![Position::new(11, 0), Position::new(10, 0)], Direction::Right)
            .unwrap();
        let engine = SnakeEngine::new(config, 3).unwrap();
        let mut session = SnakeSession::new(engine);
        let cancelled = Rc::new(Cell::new(0));
        session.start(12, timer(&cancelled)).unwrap();

        assert_eq!(session.tick(), TickOutcome::Crashed(Collision::Wall));
        assert_eq!(cancelled.get(), 1);
        assert!(!session.is_ticking());

        assert_eq!(session.tick(), TickOutcome::Ignored);
        assert!(!session.stop());
        drop(session);
        assert_eq!(cancelled.get(), 1);
    }

    #[test]
    fn stop_cancels_and_halts() {
        let (mut session, cancelled) = session();
        session.start(12, timer(&cancelled)).unwrap();

        assert!(session.stop());
        assert_eq!(cancelled.get(), 1);
        assert_eq!(session.engine().status(), SnakeStatus::Idle);
        assert!(!session.turn(Direction::Up));
        assert!(!session.stop());
        assert_eq!(cancelled.get(), 1);
    }

    #[test]
    fn dropping_the_session_cancels_a_live_timer() {
        let (mut session, cancelled) = session();
        session.start(12, timer(&cancelled)).unwrap();
        session.tick();

        drop(session);
        assert_eq!(cancelled.get(), 1);
    }

    #[test]
    fn failed_start_leaves_no_timer() {
        let (mut session, cancelled) = session();
        assert_eq!(
            session.start(3, timer(&cancelled)),
            Err(GameError::InvalidInitialBody)
        );
        assert!(!session.is_ticking());
    }

    #[test]
    fn fake_timer_keeps_its_period() {
        let cancelled = Rc::new(Cell::new(0));
        let fake = timer(&cancelled)(150);
        assert_eq!(fake.period, 150);
    }
}
