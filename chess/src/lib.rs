//! Chess domain model for MoveXplainer.
//!
//! Scores, moves and evaluations exchanged between the engine adapter, the
//! analyzer and the explainer, plus FEN/move validation on top of cozy-chess.
//! Move generation and legality are entirely cozy-chess's job.

pub mod evaluation;
pub mod fen;
pub mod moves;
pub mod position;
pub mod san;
pub mod score;
pub mod uci;
pub mod validator;

pub use evaluation::{Evaluation, InvalidEvaluationError, PrincipalVariation, MAX_PV_LEN};
pub use fen::{format_fen, parse_fen, side_to_move_name, FenError};
pub use moves::{InvalidMoveError, Move};
pub use position::{terminal_status, Terminal};
pub use san::{annotate_line, format_move_as_san};
pub use score::{InvalidScoreError, Score, MATE_VALUE};
pub use uci::{format_standard_uci, format_uci_move, parse_uci_move, resolve_legal_move, UciMoveError};
pub use validator::{CozyValidator, MoveValidator, ValidationError};

/// Standard starting position.
pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
