//! The game-phase scalar blends opening and endgame piece-square tables.

/// Fewer than this many pieces on the board and the position is
/// considered a pure endgame for blending purposes.
const MIN_PIECES: f64 = 2.0;

/// More than this many pieces and the position is a pure opening.
const MAX_PIECES: f64 = 32.0;

/// Steepness of the logistic blend between opening and endgame tables.
const STEEPNESS: f64 = 6.0;

/// Returns a scalar in `[0, 1]` describing how far the position has
/// progressed from the opening (`phase ≈ 0`) towards the endgame
/// (`phase ≈ 1`), as a pure function of the total piece count `n`.
///
/// `phase(32)` is close to `0`, `phase(2)` is close to `1`; the curve is
/// a logistic, not linear, so the transition is sharpest around the
/// midpoint of the piece-count range.
pub fn phase(piece_count: u32) -> f64 {
    let n = piece_count as f64;
    let scaled = 2.0 * (n - MIN_PIECES) / (MAX_PIECES - MIN_PIECES) - 1.0;
    1.0 / (1.0 + (STEEPNESS * scaled).exp())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_board_is_nearly_pure_opening() {
        assert!(phase(32) < 0.03);
    }

    #[test]
    fn bare_kings_is_nearly_pure_endgame() {
        assert!(phase(2) > 0.97);
    }

    #[test]
    fn phase_is_monotonically_decreasing_in_piece_count() {
        let mut previous = phase(2);
        for n in 3..=32 {
            let current = phase(n);
            assert!(
                current <= previous,
                "phase({}) = {} should not exceed phase({}) = {}",
                n,
                current,
                n - 1,
                previous
            );
            previous = current;
        }
    }

    #[test]
    fn pure_function_of_piece_count() {
        assert_eq!(phase(16), phase(16));
    }
}
