//! Heuristic position evaluation.
//!
//! [`side_score`] computes a one-sided material/positional total for one
//! color; [`evaluate`] combines both sides from the mover's perspective.
//! Scores are centipawns.

pub mod endgame;
pub mod king_safety;

use sable_board::{attacks, Bitboard, Color, Position, Role, Square};

/// Base material values in centipawns.
pub const fn piece_value(role: Role) -> i32 {
    match role {
        Role::Pawn => 100,
        Role::Knight => 300,
        Role::Bishop => 320,
        Role::Rook => 500,
        Role::Queen => 900,
        Role::King => 0,
    }
}

/// Bonus per square attacked by a piece.
const MOBILITY_BONUS: i32 = 4;

/// King-ring pressure weight per attacking piece type.
///
/// Pawns and kings contribute to the attacker count but carry no weight.
const fn king_attack_weight(role: Role) -> i32 {
    match role {
        Role::Knight | Role::Bishop => 20,
        Role::Rook => 40,
        Role::Queen => 80,
        Role::Pawn | Role::King => 0,
    }
}

/// Saturating scale over the number of distinct ring attackers.
///
/// A lone attacker is easily parried (50%); swarms compound toward the
/// full weighted sum (99% at six or more).
const ATTACKER_COUNT_WEIGHT: [i32; 7] = [0, 50, 75, 88, 94, 97, 99];

/// Score the position from the perspective of the side to move
/// (positive = advantage to the mover).
pub fn evaluate(pos: &Position) -> i32 {
    let us = pos.side_to_move();
    side_score(pos, us) - side_score(pos, !us)
}

/// One-sided score for `color`'s pieces.
///
/// Per piece: material, mobility (`4 ×` attacked squares), a quadratic
/// pawn-advancement bonus (`ranks² / 5`), and king-ring pressure tracked as
/// an attacker count plus a weighted sum. The final pressure term is
/// `weighted × ATTACKER_COUNT_WEIGHT[min(6, count)] / 100`. The king-safety
/// danger penalty for the *enemy* king is added once, and only when at
/// least one ring attacker was found, so quiet positions skip the scan.
pub fn side_score(pos: &Position, color: Color) -> i32 {
    let ring = king_ring(pos.king_square(!color), color);

    let mut score = 0;
    let mut ring_attackers: usize = 0;
    let mut ring_pressure = 0;

    for (sq, role) in pos.pieces(color) {
        score += piece_value(role);

        let attack_set = pos.attacks_from(sq);
        score += MOBILITY_BONUS * attack_set.count() as i32;

        if role == Role::Pawn {
            let progress = pawn_progress(sq, color);
            score += progress * progress / 5;
        }

        if (attack_set & ring).any() {
            ring_pressure += king_attack_weight(role);
            ring_attackers += 1;
        }
    }

    if ring_attackers > 0 {
        score += king_safety::danger_penalty(pos, color);
    }

    score + ring_pressure * ATTACKER_COUNT_WEIGHT[ring_attackers.min(6)] / 100
}

/// Zone around the enemy king, extended one rank toward the attacker.
///
/// The extension catches pieces bearing down on the shelter squares in
/// front of a castled king, not just the squares the king touches.
fn king_ring(king_sq: Square, attacker: Color) -> Bitboard {
    let zone = attacks::king_attacks(king_sq);
    match attacker {
        Color::White => zone | Bitboard(zone.0 >> 8),
        Color::Black => zone | Bitboard(zone.0 << 8),
    }
}

/// Ranks a pawn has advanced from its starting side.
fn pawn_progress(sq: Square, color: Color) -> i32 {
    let rank = u32::from(sq.rank()) as i32;
    match color {
        Color::White => rank,
        Color::Black => 7 - rank,
    }
}
