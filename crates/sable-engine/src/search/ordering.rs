//! Combined transposition probing and move ordering.
//!
//! One pass over a node's candidate moves produces both the ordered list
//! the search will walk and, when the table already proves enough about
//! this node, a short-circuit score that makes searching unnecessary.
//! The result is an explicit value; no scratch state survives the call,
//! so the search stays reentrant.

use sable_board::{Move, Position, Role};

use crate::search::tt::{Bound, TranspositionTable};

/// Output of the ordering/probing pass.
#[derive(Debug, Clone)]
pub struct OrderedMoves {
    /// Moves worth searching, highest priority first.
    pub moves: Vec<Move>,
    /// Score to return for the whole node without searching, if the table
    /// already proves an exact value or a beta cutoff here.
    pub shortcut: Option<i32>,
}

/// Order the node's legal moves and probe each successor in the table.
///
/// Per candidate: apply, look up the child hash, undo.
/// - Miss, or hit shallower than `depth`: the move is kept; a shallow hit
///   seeds its priority with the stored score.
/// - Deep `Exact` hit: the move is dropped and its score folded into the
///   short-circuit bound; scanning continues to collect the best bound.
/// - Deep `LowerBound` hit with score ≥ beta: one such cutoff decides the
///   whole node; scanning stops immediately.
/// - Deep `UpperBound` hit with score ≤ alpha: the move cannot improve
///   alpha and is dropped; scanning continues.
pub fn order_and_probe(
    pos: &mut Position,
    tt: &TranspositionTable,
    depth: i8,
    alpha: i32,
    beta: i32,
) -> OrderedMoves {
    let mut kept: Vec<(Move, i32)> = Vec::new();
    let mut shortcut: Option<i32> = None;

    for m in pos.legal_moves() {
        let probe = pos.with_move(&m, |child| tt.probe(child.hash()));

        match probe {
            Some(entry) if entry.depth >= depth => match entry.bound {
                Bound::Exact => {
                    shortcut = Some(shortcut.map_or(entry.score, |s| s.max(entry.score)));
                }
                Bound::LowerBound if entry.score >= beta => {
                    let bound = shortcut.map_or(entry.score, |s| s.max(entry.score));
                    return OrderedMoves {
                        moves: Vec::new(),
                        shortcut: Some(bound),
                    };
                }
                Bound::UpperBound if entry.score <= alpha => {
                    // Proven unable to improve alpha: skip searching it.
                }
                _ => kept.push((m.clone(), capture_priority(&m))),
            },
            Some(entry) => kept.push((m.clone(), entry.score + capture_priority(&m))),
            None => kept.push((m.clone(), capture_priority(&m))),
        }
    }

    kept.sort_by(|a, b| b.1.cmp(&a.1));
    OrderedMoves {
        moves: kept.into_iter().map(|(m, _)| m).collect(),
        shortcut,
    }
}

/// Heuristic priority: favor cheap pieces capturing valuable ones.
fn capture_priority(m: &Move) -> i32 {
    10 * m.capture().map_or(0, ordering_weight) - ordering_weight(m.role())
}

/// Piece-type weight used for ordering (not a centipawn value).
pub(crate) fn ordering_weight(role: Role) -> i32 {
    match role {
        Role::Pawn => 1,
        Role::Knight => 2,
        Role::Bishop => 3,
        Role::Rook => 4,
        Role::Queen => 5,
        Role::King => 6,
    }
}
