//! Gemfall: a match-3 board engine.
//!
//! A rectangular board of typed gems supports swapping neighbors, finding
//! runs of three or more, removing them, letting the columns above fall and
//! refilling from the top, repeating until the board is quiet again. Every
//! change is reported as a [`cascade::RoundDelta`] so a presentation layer
//! can animate it; the engine itself has no notion of time.
//!
//! ## Modules
//!
//! - [`constants`] - Default geometry and engine limits
//! - [`config`] - Board configuration and validation
//! - [`error`] - Error taxonomy
//! - [`gem`] - Gem types, ids and positions
//! - [`rng`] - Seedable random gem sources
//! - [`board`] - The gem grid and initial fill
//! - [`matching`] - Run detection
//! - [`gravity`] - Column compaction and refill
//! - [`cascade`] - Round-by-round cascade resolution
//! - [`swap`] - Swap validation, commit and rollback
//! - [`game`] - Engine facade
//! - [`shell`] - Text command protocol
//!
//! ## Example
//!
//! ```
//! use gemfall::game::new_board;
//! use gemfall::swap::SwapOutcome;
//!
//! let mut game = new_board(8, 8, 5, 42).unwrap();
//! match game.attempt_swap((3, 3), (3, 4)).unwrap() {
//!     SwapOutcome::Rejected => println!("no match, swapped back"),
//!     SwapOutcome::Committed { rounds } => println!("{} cascade rounds", rounds.len()),
//! }
//! println!("{}", game.board());
//! ```

pub mod board;
pub mod cascade;
pub mod config;
pub mod constants;
pub mod error;
pub mod game;
pub mod gem;
pub mod gravity;
pub mod matching;
pub mod rng;
pub mod shell;
pub mod swap;
