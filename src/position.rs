//! A thin adapter between the core and the `shakmaty` rules engine.
//!
//! Nothing outside this module imports `shakmaty` types directly (other
//! than `Color`, `Role` and `Square`, which the core re-uses verbatim as
//! its own colour/piece-kind/square vocabulary per the data model). The
//! rest of the core only ever talks to the contract below: legal move
//! and capture generation, terminal detection, `push`/`pop`, `clone`,
//! `mirror`, and per-square piece queries.

use shakmaty::fen::{EnPassantMode, Fen};
use shakmaty::{CastlingMode, Chess, Color, Move, Outcome, Position as _, Role, Square};

/// The result of a terminal position, relative to the side that is
/// **not** to move (the side that just moved).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TerminalResult {
    /// The side not to move just delivered checkmate.
    Win,
    /// Stalemate, insufficient material, or any other non-winning
    /// terminal result the rules engine reports.
    Draw,
}

/// A chess position, with a `push`/`pop` stack discipline layered on
/// top of `shakmaty`'s value-semantics `Chess` type.
#[derive(Clone, Debug)]
pub struct GamePosition {
    current: Chess,
    history: Vec<Chess>,
}

impl GamePosition {
    /// The standard starting position.
    pub fn starting() -> Self {
        GamePosition {
            current: Chess::default(),
            history: Vec::new(),
        }
    }

    /// Parses a FEN string. Panics on a malformed or illegal FEN; for a
    /// caller-facing boundary that must not panic on bad input (such as
    /// the CLI), use [`GamePosition::try_from_fen`] instead.
    pub fn from_fen(fen: &str) -> Self {
        Self::try_from_fen(fen).expect("malformed or illegal FEN")
    }

    /// Parses a FEN string, reporting a malformed string or an illegal
    /// position as an error instead of panicking.
    pub fn try_from_fen(fen: &str) -> Result<Self, String> {
        let parsed: Fen = fen.parse().map_err(|e| format!("{e}"))?;
        let chess: Chess = parsed
            .into_position(CastlingMode::Standard)
            .map_err(|e| format!("{e}"))?;
        Ok(GamePosition {
            current: chess,
            history: Vec::new(),
        })
    }

    /// Renders the current position back to a FEN string.
    pub fn to_fen(&self) -> String {
        Fen::from_position(&self.current, EnPassantMode::Legal).to_string()
    }

    pub fn side_to_move(&self) -> Color {
        self.current.turn()
    }

    pub fn is_terminal(&self) -> bool {
        self.current.is_game_over()
    }

    /// `Win` means the side *not* to move just delivered mate; `Draw`
    /// covers stalemate and the other non-winning terminal results
    /// `shakmaty` recognises (insufficient material, no legal moves
    /// under a variant end). Threefold repetition and the 50-move rule
    /// are not tracked by `shakmaty::Chess` itself and so are out of
    /// scope for the core, matching §6's "opaque position" contract.
    pub fn terminal_result(&self) -> Option<TerminalResult> {
        match self.current.outcome() {
            None => None,
            Some(Outcome::Draw) => Some(TerminalResult::Draw),
            Some(Outcome::Decisive { .. }) => Some(TerminalResult::Win),
        }
    }

    pub fn legal_moves(&self) -> Vec<Move> {
        self.current.legal_moves().into_iter().collect()
    }

    /// Every legal move that captures a piece, including en passant.
    pub fn legal_captures(&self) -> Vec<Move> {
        self.legal_moves().into_iter().filter(is_capture).collect()
    }

    /// Whether playing `m` would put the opponent's king in check.
    /// `m` must be a legal move for the current position.
    pub fn gives_check(&self, m: &Move) -> bool {
        let mut scratch = self.current.clone();
        scratch.play_unchecked(m);
        scratch.is_check()
    }

    /// Plays `m`, remembering the pre-move position so a matching
    /// `pop()` can restore it. `m` must be legal for the current
    /// position (it is not re-validated here — see §7, failure mode 3).
    pub fn push(&mut self, m: &Move) {
        self.history.push(self.current.clone());
        self.current.play_unchecked(m);
    }

    /// Undoes the last `push()`. Panics if called without a matching
    /// `push()`, which would indicate an unbalanced caller, not a
    /// recoverable condition (see §7).
    pub fn pop(&mut self) {
        self.current = self
            .history
            .pop()
            .expect("pop() called without a matching push()");
    }

    pub fn piece_at(&self, square: Square) -> Option<(Color, Role)> {
        self.current.board().piece_at(square).map(|p| (p.color, p.role))
    }

    pub fn squares_of(&self, color: Color, role: Role) -> Vec<Square> {
        Square::ALL
            .iter()
            .copied()
            .filter(|&sq| {
                self.current
                    .board()
                    .piece_at(sq)
                    .is_some_and(|p| p.color == color && p.role == role)
            })
            .collect()
    }

    pub fn total_piece_count(&self) -> u32 {
        Square::ALL
            .iter()
            .filter(|&&sq| self.current.board().piece_at(sq).is_some())
            .count() as u32
    }

    /// Swaps colours and flips every rank vertically, round-tripping
    /// through FEN text (see §6.1 for why: it keeps this adapter from
    /// depending on any `shakmaty` internals beyond FEN parsing and
    /// printing, which is part of its stable public surface).
    pub fn mirror(&self) -> Self {
        GamePosition::from_fen(&mirror_fen(&self.to_fen()))
    }
}

impl PartialEq for GamePosition {
    fn eq(&self, other: &Self) -> bool {
        self.to_fen() == other.to_fen()
    }
}

/// Whether `m` removes an enemy piece from the board, including the
/// one chess capture that does not land on the captured piece's square.
pub fn is_capture(m: &Move) -> bool {
    matches!(
        m,
        Move::Normal { capture: Some(_), .. } | Move::EnPassant { .. }
    )
}

pub fn from_square(m: &Move) -> Square {
    match *m {
        Move::Normal { from, .. } => from,
        Move::EnPassant { from, .. } => from,
        Move::Castle { king, .. } => king,
        Move::Put { to, .. } => to,
    }
}

pub fn to_square(m: &Move) -> Square {
    match *m {
        Move::Normal { to, .. } => to,
        Move::EnPassant { to, .. } => to,
        Move::Castle { rook, .. } => rook,
        Move::Put { to, .. } => to,
    }
}

pub fn promotion(m: &Move) -> Option<Role> {
    match *m {
        Move::Normal { promotion, .. } => promotion,
        _ => None,
    }
}

/// Stable textual form `"<file><rank><file><rank>[<promo>]"`, used only
/// for logging (see §7).
pub fn to_uci(m: &Move) -> String {
    let mut s = format!("{}{}", from_square(m), to_square(m));
    if let Some(role) = promotion(m) {
        s.push(role_letter(role));
    }
    s
}

fn role_letter(role: Role) -> char {
    match role {
        Role::Pawn => 'p',
        Role::Knight => 'n',
        Role::Bishop => 'b',
        Role::Rook => 'r',
        Role::Queen => 'q',
        Role::King => 'k',
    }
}

/// Textual "swap colours, flip ranks" — the one board transformation
/// `shakmaty` does not expose directly, so it is done on the FEN string
/// itself. See §6.1.
fn mirror_fen(fen: &str) -> String {
    let mut fields = fen.split_whitespace();
    let board = fields.next().expect("FEN missing board field");
    let turn = fields.next().unwrap_or("w");
    let castling = fields.next().unwrap_or("-");
    let ep = fields.next().unwrap_or("-");
    let halfmove = fields.next().unwrap_or("0");
    let fullmove = fields.next().unwrap_or("1");

    let ranks: Vec<&str> = board.split('/').collect();
    let mirrored_board = ranks
        .iter()
        .rev()
        .map(|rank| rank.chars().map(swap_piece_case).collect::<String>())
        .collect::<Vec<_>>()
        .join("/");

    let mirrored_turn = if turn == "w" { "b" } else { "w" };

    let mirrored_castling = if castling == "-" {
        "-".to_string()
    } else {
        castling.chars().map(swap_piece_case).collect()
    };

    let mirrored_ep = mirror_ep_square(ep);

    format!(
        "{mirrored_board} {mirrored_turn} {mirrored_castling} {mirrored_ep} {halfmove} {fullmove}"
    )
}

fn swap_piece_case(c: char) -> char {
    if c.is_ascii_uppercase() {
        c.to_ascii_lowercase()
    } else if c.is_ascii_lowercase() {
        c.to_ascii_uppercase()
    } else {
        c
    }
}

fn mirror_ep_square(ep: &str) -> String {
    if ep == "-" {
        return "-".to_string();
    }
    let mut chars = ep.chars();
    let file = chars.next().expect("en passant square missing file");
    let rank = chars.next().expect("en passant square missing rank");
    let rank_digit = rank.to_digit(10).expect("en passant rank is not a digit");
    let mirrored_rank = char::from_digit(9 - rank_digit, 10).expect("rank out of range");
    format!("{file}{mirrored_rank}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starting_position_has_twenty_legal_moves() {
        let position = GamePosition::starting();
        assert_eq!(position.legal_moves().len(), 20);
        assert!(position.legal_captures().is_empty());
    }

    #[test]
    fn push_pop_round_trips_to_an_equal_position() {
        let mut position = GamePosition::starting();
        let before = position.clone();
        let m = position.legal_moves().into_iter().next().unwrap();
        position.push(&m);
        assert_ne!(position, before);
        position.pop();
        assert_eq!(position, before);
    }

    #[test]
    fn mirror_is_an_involution() {
        let position = GamePosition::starting();
        assert_eq!(position.mirror().mirror(), position);
    }

    #[test]
    fn mirror_flips_side_to_move() {
        let position = GamePosition::starting();
        assert_eq!(position.side_to_move(), Color::White);
        assert_eq!(position.mirror().side_to_move(), Color::Black);
    }

    #[test]
    fn mate_in_one_is_terminal_after_the_mating_move() {
        let mut position = GamePosition::from_fen("7k/5Q2/6K1/8/8/8/8/8 w - - 0 1");
        // Qf7-f8 mates, delivering back-rank mate from an adjacent king.
        let mating_move = position
            .legal_moves()
            .into_iter()
            .find(|m| to_square(m) == "f8".parse().unwrap() && from_square(m) == "f7".parse().unwrap())
            .expect("Qf8# should be legal");
        position.push(&mating_move);
        assert!(position.is_terminal());
        assert_eq!(position.terminal_result(), Some(TerminalResult::Win));
    }

    #[test]
    fn stalemate_position_is_terminal_with_a_draw_result() {
        let position = GamePosition::from_fen("7k/5Q2/5K2/8/8/8/8/8 b - - 0 1");
        assert!(position.is_terminal());
        assert_eq!(position.terminal_result(), Some(TerminalResult::Draw));
    }

    #[test]
    fn total_piece_count_matches_the_starting_position() {
        assert_eq!(GamePosition::starting().total_piece_count(), 32);
    }
}
