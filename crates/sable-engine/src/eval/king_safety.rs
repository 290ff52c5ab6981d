//! King safety analysis: pawn shelter, open files, and constrained mobility.
//!
//! The analyzer produces a danger index for one king and maps it through
//! [`KING_ATTACK_TABLE`]. It is gated so the full scan only runs when the
//! position actually looks dangerous: enough material on the board, at
//! least two pieces bearing on the king zone, and a queen still present
//! for the attacker.

use sable_board::{attacks, Color, File, Position, Rank, Role, Square};

use crate::eval::endgame;

/// Danger-index to centipawn-penalty lookup.
///
/// Quadratic ramp (`i²/4`) saturating at 1260 from index 71 onward.
/// Monotonically nondecreasing by construction.
pub const KING_ATTACK_TABLE: [i32; 100] = [
    0, 0, 1, 2, 4, 6, 9, 12, 16, 20, //
    25, 30, 36, 42, 49, 56, 64, 72, 81, 90, //
    100, 110, 121, 132, 144, 156, 169, 182, 196, 210, //
    225, 240, 256, 272, 289, 306, 324, 342, 361, 380, //
    400, 420, 441, 462, 484, 506, 529, 552, 576, 600, //
    625, 650, 676, 702, 729, 756, 784, 812, 841, 870, //
    900, 930, 961, 992, 1024, 1056, 1089, 1122, 1156, 1190, //
    1225, 1260, 1260, 1260, 1260, 1260, 1260, 1260, 1260, 1260, //
    1260, 1260, 1260, 1260, 1260, 1260, 1260, 1260, 1260, 1260, //
    1260, 1260, 1260, 1260, 1260, 1260, 1260, 1260, 1260, 1260, //
];

/// Total board material points above which king attacks are taken seriously.
const MIDDLE_GAME_THRESHOLD: i32 = 100;

/// The eight ray directions from a square: `(file step, rank step, diagonal)`.
const RAYS: [(i32, i32, bool); 8] = [
    (1, 0, false),
    (-1, 0, false),
    (0, 1, false),
    (0, -1, false),
    (1, 1, true),
    (1, -1, true),
    (-1, 1, true),
    (-1, -1, true),
];

/// Danger penalty for the king defended by `!attacker`.
///
/// Returns zero unless all three gates hold: total board material exceeds
/// the middle-game threshold, at least two of `attacker`'s pieces bear on
/// the king zone, and `attacker` still has a queen. When gated in, the
/// danger index combines pawn shelter, open files near the king, and the
/// king's constrained mobility, clamped into [`KING_ATTACK_TABLE`].
pub fn danger_penalty(pos: &Position, attacker: Color) -> i32 {
    let defender = !attacker;
    let king_sq = pos.king_square(defender);

    if endgame::material_points(pos) <= MIDDLE_GAME_THRESHOLD {
        return 0;
    }
    if zone_attacker_count(pos, attacker, king_sq) < 2 {
        return 0;
    }
    if !pos.has_queen(attacker) {
        return 0;
    }

    let index = shelter_score(pos, defender, king_sq) + king_mobility(pos, defender, king_sq);
    let index = index.clamp(0, KING_ATTACK_TABLE.len() as i32 - 1);
    KING_ATTACK_TABLE[index as usize]
}

/// Number of `attacker` pieces whose attack set touches the king zone.
fn zone_attacker_count(pos: &Position, attacker: Color, king_sq: Square) -> usize {
    let zone = attacks::king_attacks(king_sq);
    pos.pieces(attacker)
        .into_iter()
        .filter(|(sq, _)| (pos.attacks_from(*sq) & zone).any())
        .count()
}

/// Pawn shelter and open-file component of the danger index.
///
/// +1 per protective pawn in the 3×3 zone around the king, −2 if the
/// king's own file is open, −1 per adjacent open file.
fn shelter_score(pos: &Position, defender: Color, king_sq: Square) -> i32 {
    let kf = u32::from(king_sq.file()) as i32;
    let kr = u32::from(king_sq.rank()) as i32;

    let mut score = 0;
    for df in -1..=1 {
        for dr in -1..=1 {
            if let Some(sq) = square_at(kf + df, kr + dr)
                && pos
                    .piece_at(sq)
                    .is_some_and(|p| p.role == Role::Pawn && p.color == defender)
            {
                score += 1;
            }
        }
    }

    if is_open_file(pos, kf) {
        score -= 2;
    }
    for adjacent in [kf - 1, kf + 1] {
        if (0..8).contains(&adjacent) && is_open_file(pos, adjacent) {
            score -= 1;
        }
    }
    score
}

/// A file is open when no pawn of either color sits on it.
fn is_open_file(pos: &Position, file: i32) -> bool {
    !pos.file_has_pawn(File::new(file as u32))
}

/// Count of adjacent squares the king could safely step to.
///
/// A square counts only if it is on the board, not attacked by the enemy,
/// and stepping there would not expose the king along a line held shut by
/// a currently-pinned defender.
fn king_mobility(pos: &Position, defender: Color, king_sq: Square) -> i32 {
    let pins = pinned_defender_lines(pos, defender, king_sq);
    attacks::king_attacks(king_sq)
        .into_iter()
        .filter(|sq| !pos.is_attacked(*sq, !defender) && !exposes_pin(*sq, &pins))
        .count() as i32
}

/// Find defenders pinned against the king by an enemy slider.
///
/// Walks each of the eight rays from the king: the first piece must be a
/// defender, and the next piece beyond it an enemy rook/bishop/queen
/// matching the line type. Returns `(pinned square, pinner square)` pairs.
fn pinned_defender_lines(
    pos: &Position,
    defender: Color,
    king_sq: Square,
) -> Vec<(Square, Square)> {
    let kf = u32::from(king_sq.file()) as i32;
    let kr = u32::from(king_sq.rank()) as i32;

    let mut pins = Vec::new();
    for (df, dr, diagonal) in RAYS {
        let mut shield: Option<Square> = None;
        let (mut f, mut r) = (kf + df, kr + dr);
        while let Some(sq) = square_at(f, r) {
            if let Some(piece) = pos.piece_at(sq) {
                match shield {
                    None if piece.color == defender => shield = Some(sq),
                    None => break,
                    Some(pinned) => {
                        let pinning_slider = piece.color != defender
                            && match piece.role {
                                Role::Queen => true,
                                Role::Rook => !diagonal,
                                Role::Bishop => diagonal,
                                _ => false,
                            };
                        if pinning_slider {
                            pins.push((pinned, sq));
                        }
                        break;
                    }
                }
            }
            f += df;
            r += dr;
        }
    }
    pins
}

/// A king destination exposes a pin when it leaves the line held by any
/// pinned defender and its pinner.
fn exposes_pin(dest: Square, pins: &[(Square, Square)]) -> bool {
    pins.iter()
        .any(|&(pinned, pinner)| !collinear(dest, pinned, pinner))
}

/// Three squares on one rank, one file, or one diagonal line.
fn collinear(a: Square, b: Square, c: Square) -> bool {
    if a.file() == b.file() && b.file() == c.file() {
        return true;
    }
    if a.rank() == b.rank() && b.rank() == c.rank() {
        return true;
    }
    let (af, ar) = coords(a);
    let (bf, br) = coords(b);
    let (cf, cr) = coords(c);
    (af - bf).abs() == (ar - br).abs() && (bf - cf).abs() == (br - cr).abs()
}

fn coords(sq: Square) -> (i32, i32) {
    (u32::from(sq.file()) as i32, u32::from(sq.rank()) as i32)
}

fn square_at(file: i32, rank: i32) -> Option<Square> {
    if (0..8).contains(&file) && (0..8).contains(&rank) {
        Some(Square::from_coords(
            File::new(file as u32),
            Rank::new(rank as u32),
        ))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attack_table_is_monotonic() {
        for window in KING_ATTACK_TABLE.windows(2) {
            assert!(window[0] <= window[1], "table must never decrease");
        }
        assert_eq!(KING_ATTACK_TABLE.len(), 100);
        assert_eq!(KING_ATTACK_TABLE[99], 1260);
    }

    #[test]
    fn standard_chess_stays_below_material_gate() {
        // A full standard army is 39 points per side; the analyzer only
        // wakes up beyond 100, i.e. with promoted material on the board.
        let pos = Position::startpos();
        assert_eq!(danger_penalty(&pos, Color::White), 0);
        assert_eq!(danger_penalty(&pos, Color::Black), 0);
    }

    #[test]
    fn gates_require_two_attackers_and_a_queen() {
        // Heavy promoted material but the white queens are parked far from
        // the black king: no zone attackers, no penalty.
        let pos: Position = "rnbqkbnr/pppppppp/8/8/8/8/PPPP4/RNBQKBNR w KQkq - 0 1"
            .parse()
            .unwrap();
        assert_eq!(danger_penalty(&pos, Color::White), 0);
    }

    #[test]
    fn gated_in_position_reads_the_table() {
        // Four promoted white queens (material 110 > 100). Queens on d4 and
        // e3 both hit the black king zone (d7 and e7), and white has queens,
        // so all three gates pass.
        //
        // Danger index for the e8 king: shelter pawns d7/e7/f7 = +3, no open
        // files near e8, and zero safe king squares: d7/e7/f7 are attacked,
        // while d8/f8 step off the e-file line held by the pinned e7 pawn
        // (pinned by the e3 queen). Index 3 -> KING_ATTACK_TABLE[3] = 2.
        let pos: Position = "rnbqkbnr/pppppppp/8/8/2QQ4/3QQ3/PPPP4/RNBQKBNR w KQkq - 0 1"
            .parse()
            .unwrap();
        assert_eq!(danger_penalty(&pos, Color::White), 2);
    }

    #[test]
    fn pin_detection_finds_classic_pin() {
        // Black knight on e7 pinned against the e8 king by the white rook
        // on e1.
        let pos: Position = "4k3/4n3/8/8/8/8/8/4RK2 w - - 0 1".parse().unwrap();
        let pins = pinned_defender_lines(&pos, Color::Black, Square::E8);
        assert_eq!(pins, vec![(Square::E7, Square::E1)]);
        // Stepping off the e-file breaks the pin line; staying on it does not.
        assert!(exposes_pin(Square::D8, &pins));
        assert!(!exposes_pin(Square::E6, &pins));
    }

    #[test]
    fn no_pin_without_matching_slider() {
        // A bishop on e1 cannot pin along the e-file.
        let pos: Position = "4k3/4n3/8/8/8/8/8/4BK2 w - - 0 1".parse().unwrap();
        assert!(pinned_defender_lines(&pos, Color::Black, Square::E8).is_empty());
    }

    #[test]
    fn shelter_counts_own_pawns_and_open_files() {
        // Black king on g8 behind f7/g7/h7: shelter +3, no open files
        // adjacent to g8 (f, g, h all hold pawns).
        let pos: Position = "6k1/5ppp/8/8/8/8/5PPP/6K1 w - - 0 1".parse().unwrap();
        assert_eq!(shelter_score(&pos, Color::Black, Square::G8), 3);

        // Strip the g7 pawn: one less shelter pawn and the g-file is now
        // open under the king (no pawns of either color): 2 - 2 = 0.
        let stripped: Position = "6k1/5p1p/8/8/8/8/5P1P/6K1 w - - 0 1".parse().unwrap();
        assert_eq!(shelter_score(&stripped, Color::Black, Square::G8), 0);
    }
}
