//! Fixed-depth negamax with alpha-beta pruning and quiescence.
//!
//! Scores are always from the perspective of the side to move at the node
//! being evaluated; a parent negates its child's result. Windows are
//! fail-hard: a cutoff returns `beta` itself, never a score above it.

use sable_board::Position;

use crate::eval::{endgame, side_score};
use crate::search::control::SearchControl;
use crate::search::ordering::{self, order_and_probe};
use crate::search::tt::{Bound, TranspositionTable};

/// Window sentinel strictly above any reachable score.
pub const INF: i32 = 30_000;

/// Magnitude of a checkmate score. Not adjusted by ply: a forced mate
/// found deeper scores the same as one found immediately.
pub const MATE_SCORE: i32 = 29_000;

/// Maximum number of check extensions along one line. Bounds the tree
/// against perpetual-check blowup.
pub const MAX_CHECK_EXTENSIONS: u8 = 16;

/// Mutable state threaded through one search tree.
pub(crate) struct SearchContext<'a> {
    pub nodes: u64,
    pub tt: &'a mut TranspositionTable,
    pub control: &'a SearchControl,
}

/// Alpha-beta negamax over `pos` to the given remaining depth.
///
/// `ext_budget` is the number of check extensions still available on this
/// line. On a cooperative stop the current `alpha` is returned; the partial
/// result is discarded by the caller, not stored.
pub(crate) fn negamax(
    pos: &mut Position,
    mut depth: i8,
    mut alpha: i32,
    beta: i32,
    mut ext_budget: u8,
    ctx: &mut SearchContext<'_>,
) -> i32 {
    ctx.nodes += 1;
    if ctx.control.should_stop(ctx.nodes) {
        return alpha;
    }

    if pos.is_checkmate() {
        return -MATE_SCORE;
    }
    if pos.is_draw() {
        return 0;
    }

    if pos.is_check() && ext_budget > 0 {
        depth += 1;
        ext_budget -= 1;
    }
    if depth <= 0 {
        return quiescence(pos, alpha, beta, ctx);
    }

    let ordered = order_and_probe(pos, ctx.tt, depth, alpha, beta);
    if let Some(score) = ordered.shortcut {
        return score;
    }

    let original_alpha = alpha;
    for m in &ordered.moves {
        let score = pos.with_move(m, |child| {
            -negamax(child, depth - 1, -beta, -alpha, ext_budget, ctx)
        });

        if score >= beta {
            ctx.tt.store(pos.hash(), depth, beta, Bound::LowerBound);
            return beta;
        }
        if score > alpha {
            alpha = score;
        }
    }

    let bound = if alpha > original_alpha {
        Bound::Exact
    } else {
        Bound::UpperBound
    };
    ctx.tt.store(pos.hash(), depth, alpha, bound);
    alpha
}

/// Capture-only search that settles tactical dust below the horizon.
///
/// The stand-pat score may be accepted immediately; otherwise captures are
/// tried most-valuable-victim first under the same fail-hard window.
pub(crate) fn quiescence(
    pos: &mut Position,
    mut alpha: i32,
    beta: i32,
    ctx: &mut SearchContext<'_>,
) -> i32 {
    ctx.nodes += 1;
    if ctx.control.should_stop(ctx.nodes) {
        return alpha;
    }

    if pos.is_checkmate() {
        return -MATE_SCORE;
    }
    if pos.is_draw() {
        return 0;
    }

    let score = stand_pat(pos);
    if score >= beta {
        return beta;
    }
    if score > alpha {
        alpha = score;
    }

    let mut captures = pos.capture_moves();
    captures.sort_by_key(|m| {
        (
            std::cmp::Reverse(m.capture().map_or(0, ordering::ordering_weight)),
            ordering::ordering_weight(m.role()),
        )
    });

    for m in &captures {
        let score = pos.with_move(m, |child| -quiescence(child, -beta, -alpha, ctx));
        if score >= beta {
            return beta;
        }
        if score > alpha {
            alpha = score;
        }
    }
    alpha
}

/// Static score at a quiescence node, with endgame shaping.
///
/// When the opponent is nearly out of material and the mover is clearly
/// winning, a king-driving bonus pushes the search toward positions that
/// make progress on the mate.
fn stand_pat(pos: &Position) -> i32 {
    let us = pos.side_to_move();
    let mut score = side_score(pos, us) - side_score(pos, !us);

    if endgame::material_score(pos, !us) < 300 && score > 499 {
        score += 10 * endgame::king_drive_bonus(pos, us);
    }
    score
}
