//! Game logic for the retrodesk minigames.
//!
//! Both engines are plain state machines: the host feeds them input events and a
//! tick, and they report back through listener callbacks and outcome values. Nothing
//! in here touches a rendering surface, a timer, or storage directly.

#![no_std]

extern crate alloc;

pub use error::*;
pub use minesweeper::*;
pub use score::*;
pub use snake::*;
pub use timer::*;
pub use types::*;

mod error;
mod minesweeper;
mod score;
mod snake;
mod timer;
mod types;
