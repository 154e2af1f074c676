//! Game logic for a single-player grid-clearing puzzle.
//!
//! A [`Board`] holds the hidden mines and precomputed adjacency counts, the
//! [`RevealEngine`] applies the reveal and burst rules to it, a [`GameSession`] tracks
//! score and win/loss for one game, and a [`SessionManager`] owns the sessions together
//! with the [`Leaderboard`].
//!
//! ```
//! use sweeper_core::*;
//!
//! let mut manager = SessionManager::with_seed(Leaderboard::new(), 7);
//! let handle = manager.create_session(Difficulty::Easy.config(), Some(42))?;
//! manager.reveal(handle, (0, 0))?;
//! assert!(manager.status(handle)?.score > 0 || manager.status(handle)?.status == GameStatus::Lost);
//! # Ok::<(), GameError>(())
//! ```
#![no_std]

extern crate alloc;

pub use board::*;
pub use cell::*;
pub use config::*;
pub use engine::*;
pub use error::*;
pub use leaderboard::*;
pub use manager::*;
pub use session::*;
pub use types::*;
pub use view::*;

mod board;
mod cell;
mod config;
mod engine;
mod error;
mod leaderboard;
mod manager;
mod session;
mod types;
mod view;
