/// Owns at most one host timer handle. Dropping a handle is what cancels its timer.
#[derive(Debug)]
pub struct TimerSlot<H> {
    handle: Option<H>,
}

impl<H> TimerSlot<H> {
    pub const fn new() -> Self {
        Self { handle: None }
    }

    /// Installs `handle`, cancelling whatever timer was armed before.
    pub fn arm(&mut self, handle: H) {
        if self.handle.replace(handle).is_some() {
            log::trace!("replaced a running timer");
        }
    }

    /// Cancels the armed timer. Returns `false` if there was none.
    pub fn disarm(&mut self) -> bool {
        self.handle.take().is_some()
    }

    pub fn is_armed(&self) -> bool {
        self.handle.is_some()
    }
}

impl<H> Default for TimerSlot<H> {
    fn default() -> Self {
        Self::new()
    }
}
