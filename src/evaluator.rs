//! Static position evaluation: phase-blended piece-square tables plus
//! material, from the perspective of a given side.

use shakmaty::{Color, Role, Square};

use crate::phase;
use crate::position::{GamePosition, TerminalResult};
use crate::pst;
use crate::value::{Value, VALUE_DECISIVE, VALUE_DRAW};

const ROLES: [Role; 6] = [
    Role::Pawn,
    Role::Knight,
    Role::Bishop,
    Role::Rook,
    Role::Queen,
    Role::King,
];

/// Evaluates `position` from `side`'s perspective.
///
/// Terminal positions short-circuit to the single decisive sentinel or
/// to a draw (see `value::VALUE_DECISIVE`'s doc comment for why the
/// sentinel is not signed by which side actually won). Non-terminal
/// positions blend each piece's opening and endgame piece-square value
/// by the game phase and add material, summing over both sides from
/// `side`'s point of view.
pub fn evaluate(position: &GamePosition, side: Color) -> Value {
    if let Some(result) = position.terminal_result() {
        return match result {
            TerminalResult::Win => VALUE_DECISIVE,
            TerminalResult::Draw => VALUE_DRAW,
        };
    }

    let blend = phase::phase(position.total_piece_count());
    let mut total = 0.0;

    for role in ROLES {
        for color in [Color::White, Color::Black] {
            let squares = position.squares_of(color, role);
            if squares.is_empty() {
                continue;
            }
            let (opening, endgame) = pst::tables_for(role);
            let is_own = color == side;
            let sign = if is_own { 1.0 } else { -1.0 };

            for square in squares {
                let index = pst_index(square, is_own);
                let table_value =
                    opening[index] as f64 * (1.0 - blend) + endgame[index] as f64 * blend;
                total += sign * (table_value / 100.0 + crate::material::value(role));
            }
        }
    }

    total
}

/// Piece-square tables are stored from the evaluating side's own point
/// of view: an own piece's square is read as-is, an enemy piece's
/// square is read through the vertical flip (see `pst::mirror_square`),
/// per §4.1's `Σ_own T[sq] − Σ_enemy T[mirror_v(sq)]`. This is *not* the
/// same split as White/Black — evaluating the same position from
/// Black's side mirrors White's squares, not Black's.
fn pst_index(square: Square, is_own: bool) -> usize {
    let raw = square as u32;
    if is_own {
        raw as usize
    } else {
        pst::mirror_square(raw) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starting_position_is_symmetric_for_both_sides() {
        let position = GamePosition::starting();
        assert_eq!(
            evaluate(&position, Color::White),
            evaluate(&position, Color::Black)
        );
    }

    #[test]
    fn mate_in_one_after_mating_move_is_decisive() {
        let mut position = GamePosition::from_fen("7k/5Q2/6K1/8/8/8/8/8 w - - 0 1");
        let mating_move = position
            .legal_moves()
            .into_iter()
            .find(|m| {
                crate::position::to_square(m) == "f8".parse().unwrap()
                    && crate::position::from_square(m) == "f7".parse().unwrap()
            })
            .expect("Qf8# should be legal");
        position.push(&mating_move);
        assert_eq!(evaluate(&position, Color::White), VALUE_DECISIVE);
        assert_eq!(evaluate(&position, Color::Black), VALUE_DECISIVE);
    }

    #[test]
    fn stalemate_is_a_draw_regardless_of_side() {
        let position = GamePosition::from_fen("7k/5Q2/5K2/8/8/8/8/8 b - - 0 1");
        assert_eq!(evaluate(&position, Color::White), VALUE_DRAW);
        assert_eq!(evaluate(&position, Color::Black), VALUE_DRAW);
    }

    #[test]
    fn an_extra_queen_is_a_large_material_advantage() {
        let with_queen = GamePosition::from_fen("4k3/8/8/8/8/8/8/Q3K3 w - - 0 1");
        let bare = GamePosition::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1");
        assert!(evaluate(&with_queen, Color::White) > evaluate(&bare, Color::White) + 8.0);
    }
}
