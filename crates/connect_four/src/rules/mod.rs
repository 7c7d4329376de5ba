//! Game rules for four-in-a-row.
//!
//! This module contains pure functions for evaluating a grid. Rules are
//! separated from grid storage so the grid stays a plain data structure.

pub mod draw;
pub mod win;

pub use draw::is_full;
pub use win::completes_run;
