//! Fixed-depth alpha-beta search with a quiescence extension at the
//! search horizon.
//!
//! The outer search is written as an explicit maximiser/minimiser, not
//! a negamax — scores are always reported from White's point of view
//! and the caller mirrors the position to search from Black's side
//! (see §4.3 and `position::GamePosition::mirror`). The quiescence
//! extension underneath is a negamax layered on top of that same
//! White-relative evaluation: every leaf calls `evaluate(position,
//! Color::White)` and the `maximising` flag supplies the sign, so a
//! minimising node's stand-pat is the negative of a maximising node's.

use log::{debug, info};
use shakmaty::{Color, Move};

use crate::evaluator;
use crate::move_order;
use crate::position::GamePosition;
use crate::value::{Value, VALUE_MAX, VALUE_MIN};

/// How many plies quiescence search is allowed to extend past the
/// nominal search depth, chasing captures until the position is quiet.
/// The original has no such cap; this one exists only to bound
/// pathological capture chains and is generous enough never to bite in
/// practice (see `DESIGN.md`).
const MAX_QUIESCENCE_PLY: u32 = 32;

/// Counts nodes visited by a single `choose_move` call, for logging.
#[derive(Default)]
struct NodeCounter {
    count: u64,
}

impl NodeCounter {
    fn tick(&mut self) {
        self.count += 1;
    }
}

/// Picks the best move for `side` to play in `position`, searching
/// `depth` plies before dropping into quiescence.
///
/// Returns `None` if `position` is already terminal, or if `side` is
/// not actually the side to move (callers should check `is_terminal`
/// and `side_to_move` themselves — see §7, failure modes 1 and 2).
pub fn choose_move(position: &GamePosition, side: Color, depth: u32) -> Option<Move> {
    if position.is_terminal() || position.side_to_move() != side {
        return None;
    }

    let mut counter = NodeCounter::default();
    let oriented = orient(position, side);
    debug!("choose_move: side {:?}, mirrored board: {}", side, side == Color::Black);
    let moves = move_order::order(&oriented);

    let mut best_move = None;
    let mut best_score = VALUE_MIN;
    let mut alpha = VALUE_MIN;
    let beta = VALUE_MAX;

    for m in moves {
        let mut child = oriented.clone();
        child.push(&m);
        // The outer search always maximises for White's perspective
        // (`orient` put `side` on the White side of the board), so the
        // recursive call is a minimising node.
        let score = minimax(&child, false, depth.saturating_sub(1), alpha, beta, &mut counter);

        if best_move.is_none() || score > best_score {
            best_score = score;
            best_move = Some(unorient(&m, position, side));
        }
        alpha = alpha.max(score);
    }

    if let Some(ref m) = best_move {
        info!(
            "choose_move: {} scores {} for {:?} at depth {}, {} nodes",
            crate::position::to_uci(m),
            best_score,
            side,
            depth,
            counter.count
        );
    }

    best_move
}

/// `orient` and `unorient` implement the mirroring convention: when
/// `side` is Black, the position is mirrored so the search always
/// maximises from White's point of view, and the chosen move is
/// mirrored back before being returned to the caller.
fn orient(position: &GamePosition, side: Color) -> GamePosition {
    match side {
        Color::White => position.clone(),
        Color::Black => position.mirror(),
    }
}

fn unorient(m: &Move, original: &GamePosition, side: Color) -> Move {
    match side {
        Color::White => m.clone(),
        Color::Black => {
            // The move was generated against the mirrored position;
            // find the matching legal move in the original position by
            // mirroring the squares back and re-resolving through the
            // rules engine, since `shakmaty::Move` carries piece and
            // capture metadata specific to the position it was played
            // from.
            let mirrored_from = crate::pst::mirror_square(crate::position::from_square(m) as u32);
            let mirrored_to = crate::pst::mirror_square(crate::position::to_square(m) as u32);
            original
                .legal_moves()
                .into_iter()
                .find(|candidate| {
                    crate::position::from_square(candidate) as u32 == mirrored_from
                        && crate::position::to_square(candidate) as u32 == mirrored_to
                        && crate::position::promotion(candidate) == crate::position::promotion(m)
                })
                .expect("mirrored move must correspond to a legal move in the original position")
        }
    }
}

/// Explicit maximising/minimising alpha-beta search, fail-hard at the
/// bounds. Drops into `quiesce` once `depth` reaches zero.
fn minimax(
    position: &GamePosition,
    maximising: bool,
    depth: u32,
    mut alpha: Value,
    mut beta: Value,
    counter: &mut NodeCounter,
) -> Value {
    counter.tick();

    // The evaluator's terminal shortcut returns the same unsigned
    // sentinel (`VALUE_DECISIVE` for any win, `VALUE_DRAW` otherwise)
    // no matter which side is asked about — see `value::VALUE_DECISIVE`
    // and `DESIGN.md`, "Single infinity sentinel". It is used as-is
    // here, not signed by `maximising`, to keep that quirk intact.
    if position.is_terminal() {
        return evaluator::evaluate(position, Color::White);
    }

    if depth == 0 {
        return quiesce(position, maximising, VALUE_MIN, VALUE_MAX, 0, counter);
    }

    let moves = move_order::order(position);
    if maximising {
        let mut value = VALUE_MIN;
        for m in moves {
            let mut child = position.clone();
            child.push(&m);
            value = value.max(minimax(&child, false, depth - 1, alpha, beta, counter));
            alpha = alpha.max(value);
            if alpha >= beta {
                break;
            }
        }
        value
    } else {
        let mut value = VALUE_MAX;
        for m in moves {
            let mut child = position.clone();
            child.push(&m);
            value = value.min(minimax(&child, true, depth - 1, alpha, beta, counter));
            beta = beta.min(value);
            if alpha >= beta {
                break;
            }
        }
        value
    }
}

/// Quiescence search: a negamax restricted to captures (plus the
/// stand-pat option), extending past the nominal horizon until the
/// position is quiet or `MAX_QUIESCENCE_PLY` is reached.
///
/// `maximising` plays the same role it does in `minimax`: every node,
/// at every depth, evaluates the position with the single fixed call
/// `evaluate(position, Color::White)`, and `maximising` supplies the
/// sign (`+1` for a maximising node, `-1` for a minimising one) so the
/// two are directly comparable with `minimax`'s own White-relative
/// alpha/beta bounds — there is no side-to-move-relative scoring here.
fn quiesce(
    position: &GamePosition,
    maximising: bool,
    mut alpha: Value,
    beta: Value,
    ply: u32,
    counter: &mut NodeCounter,
) -> Value {
    counter.tick();

    if position.is_terminal() {
        return evaluator::evaluate(position, Color::White);
    }

    let sign = if maximising { 1.0 } else { -1.0 };
    let stand_pat = sign * evaluator::evaluate(position, Color::White);
    if stand_pat >= beta {
        return beta;
    }
    alpha = alpha.max(stand_pat);

    if ply >= MAX_QUIESCENCE_PLY {
        return alpha;
    }

    for m in position.legal_captures() {
        let mut child = position.clone();
        child.push(&m);
        let score = -quiesce(&child, !maximising, -beta, -alpha, ply + 1, counter);

        if score >= beta {
            return beta;
        }
        alpha = alpha.max(score);
    }

    alpha
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Exhaustive (unpruned) mirror of `quiesce`, used only so the
    /// oracle below walks exactly the same tree `minimax` does at its
    /// horizon — without this, comparing a depth-limited flat `evaluate`
    /// against a search that extends into captures would be comparing
    /// two different trees, not testing that pruning preserves the
    /// value of one tree.
    fn slow_quiesce(position: &GamePosition, maximising: bool, ply: u32) -> Value {
        if position.is_terminal() {
            return evaluator::evaluate(position, Color::White);
        }

        let sign = if maximising { 1.0 } else { -1.0 };
        let mut best = sign * evaluator::evaluate(position, Color::White);
        if ply >= MAX_QUIESCENCE_PLY {
            return best;
        }

        for m in position.legal_captures() {
            let mut child = position.clone();
            child.push(&m);
            let score = -slow_quiesce(&child, !maximising, ply + 1);
            best = best.max(score);
        }
        best
    }

    fn slow_minimax(position: &GamePosition, maximising: bool, depth: u32) -> Value {
        if position.is_terminal() {
            return evaluator::evaluate(position, Color::White);
        }
        if depth == 0 {
            return slow_quiesce(position, maximising, 0);
        }

        let moves = position.legal_moves();
        if maximising {
            let mut best = VALUE_MIN;
            for m in moves {
                let mut child = position.clone();
                child.push(&m);
                best = best.max(slow_minimax(&child, false, depth - 1));
            }
            best
        } else {
            let mut best = VALUE_MAX;
            for m in moves {
                let mut child = position.clone();
                child.push(&m);
                best = best.min(slow_minimax(&child, true, depth - 1));
            }
            best
        }
    }

    #[test]
    fn alpha_beta_agrees_with_unpruned_minimax_at_shallow_depth() {
        let position = GamePosition::starting();
        let mut counter = NodeCounter::default();
        let pruned = minimax(&position, true, 2, VALUE_MIN, VALUE_MAX, &mut counter);
        let unpruned = slow_minimax(&position, true, 2);
        assert!((pruned - unpruned).abs() < 1e-6);
    }

    #[test]
    fn choose_move_finds_mate_in_one() {
        // A back-rank mate: Ra1-a8# with the black king boxed in by its
        // own pawns.
        let position = GamePosition::from_fen("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1");
        let m = choose_move(&position, Color::White, 2).expect("a move should be chosen");
        let mut after = position.clone();
        after.push(&m);
        assert!(after.is_terminal());
        assert_eq!(
            after.terminal_result(),
            Some(crate::position::TerminalResult::Win)
        );
    }

    #[test]
    fn choose_move_returns_none_for_a_terminal_position() {
        let position = GamePosition::from_fen("7k/5Q2/5K2/8/8/8/8/8 b - - 0 1");
        assert_eq!(choose_move(&position, Color::Black, 3), None);
    }

    #[test]
    fn choose_move_at_depth_one_takes_a_free_queen() {
        // White to move; the e4 pawn can capture a hanging queen on d5
        // outright. A sign error in quiescence would make this look
        // like the worst move on the board instead of the best.
        let position = GamePosition::from_fen("4k3/8/8/3q4/4P3/8/8/4K3 w - - 0 1");
        let m = choose_move(&position, Color::White, 1).expect("a move should be chosen");
        assert_eq!(crate::position::to_square(&m), "d5".parse().unwrap());
    }

    #[test]
    fn quiescence_search_declines_a_losing_capture() {
        // White's only capture is Qxc6, but b7 recaptures the queen for
        // a pawn; quiescence must prefer standing pat over forcing that
        // trade.
        let position = GamePosition::from_fen("4k3/1p6/2p5/3Q4/8/8/8/4K3 w - - 0 1");
        let mut counter = NodeCounter::default();
        let stand_pat = evaluator::evaluate(&position, Color::White);
        let score = quiesce(&position, true, VALUE_MIN, VALUE_MAX, 0, &mut counter);
        assert!((score - stand_pat).abs() < 1e-9);
    }

    #[test]
    fn black_to_move_choose_move_mirrors_correctly() {
        // The mirror image of the back-rank mate above: black mates
        // with Ra8-a1#.
        let position = GamePosition::from_fen("r5k1/8/8/8/8/8/5PPP/6K1 b - - 0 1");
        let m = choose_move(&position, Color::Black, 2).expect("a move should be chosen");
        assert!(position.legal_moves().contains(&m));
        let mut after = position.clone();
        after.push(&m);
        assert!(after.is_terminal());
        assert_eq!(
            after.terminal_result(),
            Some(crate::position::TerminalResult::Win)
        );
    }
}
