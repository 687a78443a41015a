//! Material values for the six piece kinds.
//!
//! The king's value is deliberately huge: its loss must dominate any
//! positional consideration, which is what makes losing it unrecoverable
//! inside the search without a dedicated mate detector (see `DESIGN.md`).

use shakmaty::Role;

use crate::value::Value;

/// Material value of one piece of the given role, in pawns.
pub fn value(role: Role) -> Value {
    match role {
        Role::Pawn => 1.0,
        Role::Knight => 2.8,
        Role::Bishop => 3.1,
        Role::Rook => 5.0,
        Role::Queen => 9.0,
        Role::King => 100_000.0,
    }
}
