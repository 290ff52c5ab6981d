//! Move search: fixed-depth negamax driven from a root move loop.
//!
//! [`Searcher`] owns the transposition table across calls, so consecutive
//! searches in one game reuse earlier work. The root loop keeps its own
//! best score and searches each move with the window open only above it,
//! which prunes siblings that cannot beat the current best.

pub mod control;
pub mod negamax;
pub mod ordering;
pub mod tt;

use sable_board::{Move, Position};

use crate::eval::piece_value;
use crate::search::control::SearchControl;
use crate::search::negamax::{negamax, SearchContext, INF, MAX_CHECK_EXTENSIONS};
use crate::search::tt::TranspositionTable;

/// Result of one root search.
#[derive(Debug, Clone)]
pub struct SearchReport {
    /// Chosen move, or `None` when the root has no legal moves.
    pub best_move: Option<Move>,
    /// Score of the chosen move from the mover's perspective, centipawns.
    pub score: i32,
    /// Nodes visited, main search and quiescence combined.
    pub nodes: u64,
}

/// Stateful search driver. Keep one per game to retain the table.
pub struct Searcher {
    tt: TranspositionTable,
}

impl Searcher {
    /// Searcher with a default-sized transposition table.
    pub fn new() -> Self {
        Self {
            tt: TranspositionTable::new(),
        }
    }

    /// Searcher over a caller-configured table.
    pub fn with_table(tt: TranspositionTable) -> Self {
        Self { tt }
    }

    /// Drop all remembered search results.
    pub fn clear(&mut self) {
        self.tt.clear();
    }

    /// Search `pos` to `depth` plies and report the best root move.
    pub fn search(
        &mut self,
        pos: &mut Position,
        depth: u8,
        control: &SearchControl,
    ) -> SearchReport {
        let mut ctx = SearchContext {
            nodes: 0,
            tt: &mut self.tt,
            control,
        };

        let mut best_move: Option<Move> = None;
        let mut best_score = -INF;
        let depth = saturate_depth(depth);

        for m in order_root_moves(pos) {
            // Each root move is searched at the full requested depth with
            // the window open only above the best score found so far.
            let score = pos.with_move(&m, |child| {
                -negamax(
                    child,
                    depth,
                    -INF,
                    -best_score,
                    MAX_CHECK_EXTENSIONS,
                    &mut ctx,
                )
            });

            if score > best_score {
                best_score = score;
                best_move = Some(m);
            }
        }

        if control.budget_elapsed() {
            tracing::debug!(depth, nodes = ctx.nodes, "time budget elapsed during search");
        }
        tracing::debug!(
            depth,
            nodes = ctx.nodes,
            score = best_score,
            best = best_move
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_default(),
            "search finished"
        );

        SearchReport {
            best_move,
            score: best_score,
            nodes: ctx.nodes,
        }
    }

    /// Convenience wrapper returning only the chosen move.
    pub fn choose_move(
        &mut self,
        pos: &mut Position,
        depth: u8,
        control: &SearchControl,
    ) -> Option<Move> {
        self.search(pos, depth, control).best_move
    }
}

impl Default for Searcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Requested depths beyond the recursion's `i8` range saturate at the
/// maximum instead of wrapping into the quiescence range.
fn saturate_depth(depth: u8) -> i8 {
    i8::try_from(depth).unwrap_or(i8::MAX)
}

/// Root move order: captures first, most valuable victim first.
fn order_root_moves(pos: &Position) -> Vec<Move> {
    let mut moves = pos.legal_moves();
    moves.sort_by_key(|m| std::cmp::Reverse(m.capture().map_or(-1, piece_value)));
    moves
}

#[cfg(test)]
mod tests {
    use super::*;
    use sable_board::CastlingMode;

    fn uci(m: &Move) -> String {
        m.to_uci(CastlingMode::Standard).to_string()
    }

    #[test]
    fn depth_one_from_startpos_picks_a_legal_move() {
        let mut pos = Position::startpos();
        let legal = pos.legal_moves();

        let mut searcher = Searcher::new();
        let report = searcher.search(&mut pos, 1, &SearchControl::unbounded());

        let chosen = report.best_move.expect("startpos has moves");
        assert!(legal.contains(&chosen));
        assert!(report.nodes > 0);
        // The root loop must leave the position untouched.
        assert_eq!(pos.legal_moves().len(), 20);
    }

    #[test]
    fn finds_mate_in_one() {
        // Scholar's mate: Qxf7# is the only mating move.
        let mut pos: Position =
            "r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 4 4"
                .parse()
                .unwrap();

        let mut searcher = Searcher::new();
        let report = searcher.search(&mut pos, 2, &SearchControl::unbounded());

        let chosen = report.best_move.expect("mating side has moves");
        assert_eq!(uci(&chosen), "h5f7");
        assert_eq!(report.score, negamax::MATE_SCORE);
    }

    #[test]
    fn does_not_hang_the_queen_in_kqk() {
        // KQ vs K. At depth 3 the search must not leave the queen en prise
        // to the defending king.
        let mut pos: Position = "8/8/4k3/8/8/3Q4/8/3K4 w - - 0 1".parse().unwrap();

        let mut searcher = Searcher::new();
        let chosen = searcher
            .choose_move(&mut pos, 3, &SearchControl::unbounded())
            .expect("white has moves");

        let hangs = pos.with_move(&chosen, |child| {
            child
                .legal_moves()
                .iter()
                .any(|reply| reply.is_capture() && reply.capture() == Some(sable_board::Role::Queen))
        });
        assert!(!hangs, "chose {} which hangs the queen", uci(&chosen));
    }

    #[test]
    fn no_legal_moves_yields_none() {
        let mut searcher = Searcher::new();
        let control = SearchControl::unbounded();

        // Stalemate.
        let mut stalemate: Position = "k7/2K5/1Q6/8/8/8/8/8 b - - 0 1".parse().unwrap();
        let report = searcher.search(&mut stalemate, 3, &control);
        assert!(report.best_move.is_none());
        assert_eq!(report.score, -INF);

        // Checkmate.
        let mut mated: Position = "7k/6Q1/5K2/8/8/8/8/8 b - - 0 1".parse().unwrap();
        assert!(searcher.choose_move(&mut mated, 3, &control).is_none());
    }

    #[test]
    fn oversized_depth_saturates_instead_of_wrapping() {
        // `255 as i8` would be -1 and drop the whole search into
        // quiescence; the root must clamp to the deepest valid depth.
        assert_eq!(saturate_depth(u8::MAX), i8::MAX);
        assert_eq!(saturate_depth(128), i8::MAX);
        assert_eq!(saturate_depth(127), 127);
        assert_eq!(saturate_depth(3), 3);

        // The saturated depth still flows through a real search: with no
        // legal moves the root loop is empty and returns immediately.
        let mut pos: Position = "k7/2K5/1Q6/8/8/8/8/8 b - - 0 1".parse().unwrap();
        let mut searcher = Searcher::new();
        let report = searcher.search(&mut pos, u8::MAX, &SearchControl::unbounded());
        assert!(report.best_move.is_none());
    }

    #[test]
    fn root_ordering_puts_fattest_capture_first() {
        // White pawn on d4 can take either the e5 queen or the c5 knight.
        // The king sits on d1 so neither black piece gives check and both
        // captures are legal.
        let pos: Position = "4k3/8/8/2n1q3/3P4/8/8/3K4 w - - 0 1".parse().unwrap();
        let ordered = order_root_moves(&pos);
        assert_eq!(uci(&ordered[0]), "d4e5");
        assert_eq!(ordered[1].capture(), Some(sable_board::Role::Knight));
    }

    #[test]
    fn search_results_persist_in_the_table() {
        // Every root child is searched at the full requested depth, so its
        // entry must survive in the searcher's table for reuse.
        let mut pos: Position = "4k3/8/8/3p4/4P3/8/8/4K3 w - - 0 1".parse().unwrap();
        let mut searcher = Searcher::new();
        searcher.search(&mut pos, 3, &SearchControl::unbounded());

        for m in pos.legal_moves() {
            let hash = pos.with_move(&m, |child| child.hash());
            let entry = searcher.tt.probe(hash).expect("root child must be stored");
            assert_eq!(entry.depth, 3);
        }

        searcher.clear();
        let m = pos.legal_moves().into_iter().next().unwrap();
        let hash = pos.with_move(&m, |child| child.hash());
        assert!(searcher.tt.probe(hash).is_none());
    }
}
