//! Mutable position with paired make/unmake.
//!
//! The search mutates one [`Position`] in place and relies on strict LIFO
//! pairing of [`make`](Position::make) and [`unmake`](Position::unmake):
//! every make issued inside a search frame is undone exactly once before the
//! frame returns, including on pruning paths. [`with_move`](Position::with_move)
//! is the scoped form that makes the pairing impossible to get wrong.

use shakmaty::fen::Fen;
use shakmaty::zobrist::{Zobrist64, ZobristHash};
use shakmaty::{Bitboard, CastlingMode, Chess, Color, EnPassantMode, Move, Piece, Role, Square};
use shakmaty::Position as _;

use crate::error::FenError;

/// Mutable game state: board, side to move, structural hash, undo stack.
#[derive(Debug, Clone)]
pub struct Position {
    inner: Chess,
    /// Cached Zobrist hash of `inner`, refreshed on every mutation.
    hash: u64,
    /// Prior states, innermost last. Doubles as the repetition history.
    undo: Vec<(Chess, u64)>,
}

impl Position {
    /// The standard chess starting position.
    pub fn startpos() -> Self {
        Self::from_inner(Chess::default())
    }

    /// Build a position from a FEN string.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let setup: Fen = fen.parse()?;
        let inner = setup
            .into_position::<Chess>(CastlingMode::Standard)
            .map_err(|e| FenError::IllegalPosition(e.to_string()))?;
        tracing::debug!(fen, "position set from FEN");
        Ok(Self::from_inner(inner))
    }

    fn from_inner(inner: Chess) -> Self {
        let hash = zobrist(&inner);
        Self {
            inner,
            hash,
            undo: Vec::with_capacity(64),
        }
    }

    /// The side to move.
    pub fn side_to_move(&self) -> Color {
        self.inner.turn()
    }

    /// 64-bit structural hash of the current state.
    pub fn hash(&self) -> u64 {
        self.hash
    }

    /// All legal moves for the side to move.
    pub fn legal_moves(&self) -> Vec<Move> {
        self.inner.legal_moves().to_vec()
    }

    /// Legal captures only (including en passant and capturing promotions).
    pub fn capture_moves(&self) -> Vec<Move> {
        self.inner.capture_moves().to_vec()
    }

    /// Whether the side to move is in check.
    pub fn is_check(&self) -> bool {
        self.inner.is_check()
    }

    /// Whether the side to move has been checkmated.
    pub fn is_checkmate(&self) -> bool {
        self.inner.is_checkmate()
    }

    /// Whether the position is drawn.
    ///
    /// Folds stalemate, insufficient material, the 50-move rule, and
    /// repetition (an identical position earlier on the undo stack) into a
    /// single predicate.
    pub fn is_draw(&self) -> bool {
        self.inner.is_stalemate()
            || self.inner.is_insufficient_material()
            || self.inner.halfmoves() >= 100
            || self.is_repetition()
    }

    fn is_repetition(&self) -> bool {
        self.undo.iter().any(|(_, h)| *h == self.hash)
    }

    /// Apply `m` in place. Must be balanced by exactly one [`unmake`](Self::unmake).
    pub fn make(&mut self, m: &Move) {
        self.undo.push((self.inner.clone(), self.hash));
        self.inner.play_unchecked(m);
        self.hash = zobrist(&self.inner);
    }

    /// Undo the most recent [`make`](Self::make).
    pub fn unmake(&mut self) {
        let (inner, hash) = self
            .undo
            .pop()
            .expect("unmake without a matching make");
        self.inner = inner;
        self.hash = hash;
    }

    /// Run `f` with `m` applied, undoing the move on the way out.
    ///
    /// This is the only way search code touches make/unmake: the pairing is
    /// enforced structurally, so pruning early-returns cannot leak a move.
    pub fn with_move<T>(&mut self, m: &Move, f: impl FnOnce(&mut Self) -> T) -> T {
        self.make(m);
        let result = f(self);
        self.unmake();
        result
    }

    /// Piece on `sq`, if any.
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.inner.board().piece_at(sq)
    }

    /// Role of the piece on `sq`, if any.
    pub fn role_at(&self, sq: Square) -> Option<Role> {
        self.inner.board().role_at(sq)
    }

    /// Square of `color`'s king.
    pub fn king_square(&self, color: Color) -> Square {
        self.inner
            .board()
            .king_of(color)
            .expect("legal position has both kings")
    }

    /// Squares and roles of all of `color`'s pieces.
    pub fn pieces(&self, color: Color) -> Vec<(Square, Role)> {
        let board = self.inner.board();
        board
            .by_color(color)
            .into_iter()
            .filter_map(|sq| board.role_at(sq).map(|role| (sq, role)))
            .collect()
    }

    /// Attack set of the piece on `sq` (empty if the square is empty).
    pub fn attacks_from(&self, sq: Square) -> Bitboard {
        self.inner.board().attacks_from(sq)
    }

    /// Whether any piece of `by` attacks `sq`.
    pub fn is_attacked(&self, sq: Square, by: Color) -> bool {
        let board = self.inner.board();
        board.attacks_to(sq, by, board.occupied()).any()
    }

    /// Whether `color` still has a queen on the board.
    pub fn has_queen(&self, color: Color) -> bool {
        let board = self.inner.board();
        (board.by_color(color) & board.by_role(Role::Queen)).any()
    }

    /// Whether any pawn (either color) sits on `file`.
    pub fn file_has_pawn(&self, file: shakmaty::File) -> bool {
        let board = self.inner.board();
        (board.by_role(Role::Pawn) & Bitboard::from_file(file)).any()
    }
}

impl std::str::FromStr for Position {
    type Err = FenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_fen(s)
    }
}

fn zobrist(inner: &Chess) -> u64 {
    inner.zobrist_hash::<Zobrist64>(EnPassantMode::Legal).0
}
