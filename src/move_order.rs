//! Move ordering heuristics.
//!
//! `order` is the primary MVV/LVA-based ranking described in §4.2:
//! captures are weighted far above quiet moves, scored by the value of
//! the victim minus the attacker's own value, with flat bonuses for
//! checks and promotions. `order_coarse` is the cheaper
//! alternative the original kept around: bucket into checks, then
//! captures, then everything else, with no finer ranking inside a
//! bucket.

use shakmaty::Move;

use crate::material;
use crate::position::{self, GamePosition};

/// Captures are weighted this many times their raw MVV/LVA score
/// relative to quiet moves, so that even a poor trade outranks every
/// non-capturing, non-checking move.
const CAPTURE_WEIGHT: f64 = 15.0;

/// Flat bonus added to a move's score if it gives check.
const CHECK_BONUS: f64 = 100.0;

/// Ranks every legal move in `position` from most to least promising,
/// highest score first.
pub fn order(position: &GamePosition) -> Vec<Move> {
    let moves = position.legal_moves();
    let scores: Vec<f64> = moves.iter().map(|m| score(position, m)).collect();

    let mut indices: Vec<usize> = (0..moves.len()).collect();
    indices.sort_by(|&a, &b| scores[b].partial_cmp(&scores[a]).unwrap());

    indices.into_iter().map(|i| moves[i].clone()).collect()
}

fn score(position: &GamePosition, m: &Move) -> f64 {
    let mut s = 0.0;

    if position::is_capture(m) {
        let victim = position
            .piece_at(position::to_square(m))
            .map(|(_, role)| role);
        let attacker = position
            .piece_at(position::from_square(m))
            .map(|(_, role)| role);

        let victim_value = victim.map(material::value).unwrap_or(1.0);
        let attacker_value = attacker.map(material::value).unwrap_or(0.0);
        s += CAPTURE_WEIGHT * victim_value - attacker_value;
    }

    if position.gives_check(m) {
        s += CHECK_BONUS;
    }

    if let Some(role) = position::promotion(m) {
        s += material::value(role);
    }

    s
}

/// Cheap three-bucket ordering: checks first, then captures, then
/// everything else, each bucket in whatever order the rules engine
/// generated them. No move appears in more than one bucket — a move
/// that both checks and captures is ranked as a check.
pub fn order_coarse(position: &GamePosition) -> Vec<Move> {
    let legal = position.legal_moves();
    let mut checks = Vec::new();
    let mut captures = Vec::new();
    let mut rest = Vec::new();

    for m in legal {
        if position.gives_check(&m) {
            checks.push(m);
        } else if position::is_capture(&m) {
            captures.push(m);
        } else {
            rest.push(m);
        }
    }

    checks.extend(captures);
    checks.extend(rest);
    checks
}
