//! Search and evaluation for sable.
//!
//! The crate exposes one operation to its environment: given a mutable
//! [`Position`](sable_board::Position) and a search depth, return a chosen
//! move ([`Searcher::choose_move`]). Everything else (board representation,
//! legal-move generation, clocks, rendering) lives outside.

pub mod eval;
pub mod search;

pub use eval::evaluate;
pub use search::control::SearchControl;
pub use search::tt::{Bound, ReplacementPolicy, TranspositionTable, TtError};
pub use search::{SearchReport, Searcher};
