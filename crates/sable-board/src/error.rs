//! Error types for position setup.

/// Errors that occur when building a [`Position`](crate::Position) from FEN.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FenError {
    /// The FEN string could not be parsed at all.
    #[error("malformed FEN: {0}")]
    Parse(#[from] shakmaty::fen::ParseFenError),
    /// The FEN parsed but does not describe a legal chess position.
    #[error("illegal position: {0}")]
    IllegalPosition(String),
}
