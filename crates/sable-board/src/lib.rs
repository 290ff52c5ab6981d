//! Board facade for the sable engine.
//!
//! The search core treats board representation and legal-move generation as
//! external collaborators. This crate adapts [`shakmaty`] to the narrow
//! surface the core consumes: in-place make/unmake with strict LIFO pairing,
//! Zobrist hashing, captures-only generation, and per-piece attack queries.

pub mod error;
pub mod position;

pub use error::FenError;
pub use position::Position;

// Vocabulary types come straight from shakmaty; the engine never needs to
// name the crate itself.
pub use shakmaty::{attacks, Bitboard, CastlingMode, Color, File, Move, Piece, Rank, Role, Square};
