//! Piece-square tables, bit-exact with the originating program.
//!
//! Every table is written here exactly as the source presents it — rank
//! 1 on the first row — so index `0` reads as a1 and index `63` as h8
//! with no reversal needed at load time. Values are centipawns; callers
//! divide by 100 when blending them into a `Value`.

use shakmaty::{Color, Role};

pub type Table = [i32; 64];

#[rustfmt::skip]
pub const PAWNS_OPENING: Table = [
     0,  0,  0,  0,  0,  0,  0,  0,
     5,  5,  5,-20,-20, 10, 10, -5,
    -5, -5,-10,  0,  0,-10, -5,  5,
     0,  0,  0, 20, 20,  0,  0,  0,
     5,  5, 10, 25, 25, 10,  5,  5,
    10, 10, 20, 30, 30, 30, 25, 15,
    75, 80, 75, 60, 60, 90, 50, 50,
     0,  0,  0,  0,  0,  0,  0,  0,
];

#[rustfmt::skip]
pub const PAWNS_ENDGAME: Table = [
      0,  0,  0,  0,  0,  0,  0,  0,
     15, 10, 10,  0,  0,  0,  0,-10,
      5,  5, -5,  0,  0, -5, -5, -7,
     15, 10,  0,-10,-10,-10,  0,  0,
     30, 25, 15,  5,  5,  5, 20, 20,
    100,100,100, 80, 60, 50, 80, 90,
    150,150,125,120,130,120,160,190,
      0,  0,  0,  0,  0,  0,  0,  0,
];

#[rustfmt::skip]
pub const KNIGHTS_OPENING: Table = [
    -50,-40,-30,-30,-30,-30,-40,-50,
    -40,-20,  0,  5,  5,  0,-20,-40,
    -30,  5, 10, 15, 15, 10,  5,-30,
    -30,  0, 15, 20, 20, 15,  0,-30,
    -30,  5, 15, 20, 20, 15,  5,-30,
    -30,  0, 10, 15, 15, 10,  0,-30,
    -40,-20,  0,  0,  0,  0,-20,-40,
    -50,-40,-30,-30,-30,-30,-40,-50,
];

/// Identical to `KNIGHTS_OPENING` in the source; kept as a separate
/// constant rather than an alias so the blend code reads symmetrically
/// for every piece kind.
pub const KNIGHTS_ENDGAME: Table = KNIGHTS_OPENING;

#[rustfmt::skip]
pub const BISHOPS_OPENING: Table = [
    -20,-10,-10,-10,-10,-10,-10,-20,
    -10, 10,  0,  0,  0,  0, 10,-10,
     -5, 10, 10, 10, 10, 10, 10, -5,
    -10,  0, 10, 10, 10, 10,  0,-10,
    -10,  5,  5, 10, 10,  5,  5,-10,
    -10,  0,  5, 10, 10,  5,  0,-10,
    -10,  0,  0,  0,  0,  0,  0,-10,
    -20,-10,-10,-10,-10,-10,-10,-20,
];

#[rustfmt::skip]
pub const BISHOPS_ENDGAME: Table = [
     0,  0,  0,  0,  0,  0,  0,  0,
     0,  5,  5,  5,  5,  5,  5,  0,
     0,  5,  7,  7,  7,  7,  5,  0,
     0,  5,  7, 10, 10,  7,  5,  0,
     0,  5,  7, 10, 10,  7,  5,  0,
     0,  5,  7,  7,  7,  7,  5,  0,
     0,  5,  5,  5,  5,  5,  5,  0,
     0,  0,  0,  0,  0,  0,  0,  0,
];

#[rustfmt::skip]
pub const ROOKS_OPENING: Table = [
    -25,-25,  5, 20, 20,  0,-10,-15,
    -70, -5, 10,  0,  0,-10,-15,-40,
    -30, -5,  0,  0,-20,-15,-20,-40,
    -20,  5, -5,  5,  0,-10,-15,-30,
    -20,  0, 35, 20, 20,  5,-10,-20,
     15, 50, 45, 20, 35,  0,-10,  0,
     30, 25, 60, 80, 60,  5, -5, -5,
     30, 25, 10, 60, 50,-10,-20,-15,
];

#[rustfmt::skip]
pub const ROOKS_ENDGAME: Table = [
    -30,-20, -5, 20, 20,  0,  0,  0,
      0,  0,  0,  0,  0,  0,  0,  0,
      0,  0,  0,  0,  0,  0,  0,  0,
      0,  0,  0,  0,  0,  0,  0,  0,
      5,  5,  5,  5,  5,  5,  5,  5,
     10, 10, 10, 10, 10, 10, 10, 10,
     35, 35, 35, 35, 35, 35, 35, 35,
     15, 15, 15, 15, 15, 15, 15, 15,
];

#[rustfmt::skip]
pub const QUEENS_OPENING: Table = [
    -20,-10,-10, -5, -5,-10,-10,-20,
    -10,  0,  0,  0,  0,  0,  0,-10,
    -10,  5,  5,  5,  5,  5,  0,-10,
      0,  0,  5,  5,  5, 10,  5, -5,
     -5, 10,  5,  5,  5, 15, 10, -5,
    -10, 10,  5,  5,  5, 15, 10, -5,
    -10, 10,  0,  0, 10, 10, 10, -5,
    -20,-10,-10, -5, -5, -5, -5,-10,
];

#[rustfmt::skip]
pub const QUEENS_ENDGAME: Table = [
    -50,-35,-20,-10,-10,-20,-35,-50,
    -30,-25,-15,-15,-15,-15,-20,-15,
      5, 10, 15, 10, 10, 15,-10,-15,
     20, 30, 35, 35, 35, 30, 20, 10,
     35, 40, 40, 50, 50, 30, 20, 20,
     10, 20, 35, 50, 45, 10, 10,-10,
      0, 30, 20, 50, 50, 30, 20, -5,
      5, 10, 10, 25, 25, 10, 10,  0,
];

#[rustfmt::skip]
pub const KINGS_OPENING: Table = [
     20, 50, 10,-25,-10, 12, 50, 20,
      5,  5,-10,-40,-40,-10,  5,  0,
    -25,-15,-30,-45,-45,-30,-15,-20,
    -50,-30,-30,-40,-40,-30,-30,-20,
    -30,-40,-40,-50,-50,-40,-40,-30,
    -30,-40,-40,-50,-50,-40,-40,-30,
    -30,-40,-40,-50,-50,-40,-40,-30,
    -30,-40,-40,-50,-50,-40,-40,-30,
];

#[rustfmt::skip]
pub const KINGS_ENDGAME: Table = [
    -45,-30,-30,-30,-30,-30,-35,-45,
    -30,-25,  0,  0,  0,  0,-25,-30,
    -30, -5, 15, 20, 20, 15, -5,-30,
    -30,-10, 30, 40, 40, 30,-10,-30,
    -30,-10, 30, 40, 40, 30,-10,-30,
    -30,-10, 20, 30, 30, 20,-10,-30,
    -30,-20,-10,  0,  0,-10,-20,-30,
    -50,-40,-30,-20,-20,-30,-40,-50,
];

/// Returns the `(opening, endgame)` piece-square table pair for `role`.
pub fn tables_for(role: Role) -> (&'static Table, &'static Table) {
    match role {
        Role::Pawn => (&PAWNS_OPENING, &PAWNS_ENDGAME),
        Role::Knight => (&KNIGHTS_OPENING, &KNIGHTS_ENDGAME),
        Role::Bishop => (&BISHOPS_OPENING, &BISHOPS_ENDGAME),
        Role::Rook => (&ROOKS_OPENING, &ROOKS_ENDGAME),
        Role::Queen => (&QUEENS_OPENING, &QUEENS_ENDGAME),
        Role::King => (&KINGS_OPENING, &KINGS_ENDGAME),
    }
}

/// Vertical flip `sq ⊕ 0x38`, swapping rank `r` with rank `7 - r`.
///
/// PSTs are stored from White's perspective; reading an enemy piece's
/// square through this flip rotates the table to the opponent's
/// viewpoint without re-indexing the table itself.
pub fn mirror_square(square: u32) -> u32 {
    square ^ 0x38
}

/// Swaps the two colours a mirrored table pair would be read for.
pub fn opposite(color: Color) -> Color {
    match color {
        Color::White => Color::Black,
        Color::Black => Color::White,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn knight_tables_are_bit_identical() {
        assert_eq!(KNIGHTS_OPENING, KNIGHTS_ENDGAME);
    }

    #[test]
    fn mirror_square_is_an_involution() {
        for sq in 0..64u32 {
            assert_eq!(mirror_square(mirror_square(sq)), sq);
        }
    }

    #[test]
    fn mirror_square_swaps_rank_1_and_rank_8() {
        assert_eq!(mirror_square(0), 56); // a1 <-> a8
        assert_eq!(mirror_square(7), 63); // h1 <-> h8
    }

    #[test]
    fn every_table_has_64_entries_and_is_visually_rank_one_first() {
        for role in [
            Role::Pawn,
            Role::Knight,
            Role::Bishop,
            Role::Rook,
            Role::Queen,
            Role::King,
        ] {
            let (opening, endgame) = tables_for(role);
            assert_eq!(opening.len(), 64);
            assert_eq!(endgame.len(), 64);
        }
        // Rank 1 and rank 8 are structurally dull (zeros or symmetric
        // corner penalties) for the majority of pieces, which is the
        // easiest thing to get backwards by reversing groups of 8.
        assert_eq!(PAWNS_OPENING[0..8], [0; 8]);
        assert_eq!(PAWNS_OPENING[56..64], [0; 8]);
    }
}
