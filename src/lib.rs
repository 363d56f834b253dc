// Opt in to warnings about new 2018 idioms
#![warn(rust_2018_idioms)]
// Additional warnings that are allow by default (`rustc -W help`)
#![warn(missing_copy_implementations)]
#![warn(missing_debug_implementations)]
#![warn(trivial_casts)]
#![warn(trivial_numeric_casts)]
#![warn(unreachable_pub)]
#![warn(unused)]

pub mod board;
pub mod config;
pub mod solver;

pub use crate::board::{Action, Board, BoardError};
pub use crate::config::{Strategy, UnknownStrategy};
pub use crate::solver::{run_search, SolverOk, Stats};
