//! Endgame helpers: material gates and the king-driving bonus.
//!
//! These are deliberately separate from the king-ring attack scoring in
//! the evaluator: one family answers "how much material is left", the
//! other scores attack pressure. They must not be conflated even where
//! the weights look similar.

use sable_board::{Color, Position, Role};

use crate::eval::piece_value;

/// Abstract material points for one piece (pawn 1, minor 3, rook 5, queen 9).
const fn material_point(role: Role) -> i32 {
    match role {
        Role::Pawn => 1,
        Role::Knight | Role::Bishop => 3,
        Role::Rook => 5,
        Role::Queen => 9,
        Role::King => 0,
    }
}

/// Total material points on the board, both sides.
///
/// Used by the king-safety middle-game gate. A full standard army is 39
/// points per side.
pub fn material_points(pos: &Position) -> i32 {
    Color::ALL
        .into_iter()
        .flat_map(|color| pos.pieces(color))
        .map(|(_, role)| material_point(role))
        .sum()
}

/// Raw material for one side in centipawns (no positional terms).
pub fn material_score(pos: &Position, color: Color) -> i32 {
    pos.pieces(color)
        .into_iter()
        .map(|(_, role)| piece_value(role))
        .sum()
}

/// Basic mating-technique shaping for won endgames.
///
/// Rewards pushing the defending king toward the board edge and pulling
/// the attacking king closer to it. The caller scales the result.
pub fn king_drive_bonus(pos: &Position, winner: Color) -> i32 {
    let loser_king = pos.king_square(!winner);
    let winner_king = pos.king_square(winner);

    let lf = u32::from(loser_king.file()) as i32;
    let lr = u32::from(loser_king.rank()) as i32;
    let wf = u32::from(winner_king.file()) as i32;
    let wr = u32::from(winner_king.rank()) as i32;

    // Distance of the defending king from the center, per axis.
    let mut bonus = (3 - lr).max(lr - 4) + (3 - lf).max(lf - 4);
    // Proximity of the two kings (14 = maximum Manhattan distance).
    bonus += 14 - (wr - lr).abs() - (wf - lf).abs();
    bonus
}
