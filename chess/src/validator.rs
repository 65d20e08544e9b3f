//! FEN and move validation backed by cozy-chess.

use crate::fen::parse_fen;
use crate::uci::{format_standard_uci, format_uci_move, parse_uci_move, resolve_legal_move};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid FEN: {0}")]
    InvalidFen(String),
    #[error("Invalid UCI move format: {0}")]
    InvalidMoveFormat(String),
}

/// Move validation adapter consumed by the analyzer.
pub trait MoveValidator: Send + Sync {
    /// True if `fen` is a complete, parseable position.
    fn validate_fen(&self, fen: &str) -> bool;

    /// Trim and lowercase a coordinate move, returning its canonical form.
    fn sanitize_move(&self, move_text: &str) -> Result<String, ValidationError>;

    /// True if the canonical move is legal in `fen`.
    fn validate_move(&self, fen: &str, mv: &str) -> Result<bool, ValidationError>;

    /// Every legal move in `fen`, coordinate notation.
    fn legal_moves(&self, fen: &str) -> Result<Vec<String>, ValidationError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CozyValidator;

impl MoveValidator for CozyValidator {
    fn validate_fen(&self, fen: &str) -> bool {
        parse_fen(fen).is_ok()
    }

    fn sanitize_move(&self, move_text: &str) -> Result<String, ValidationError> {
        let sanitized = move_text.trim().to_lowercase();
        parse_uci_move(&sanitized)
            .map(format_uci_move)
            .map_err(|_| ValidationError::InvalidMoveFormat(move_text.to_string()))
    }

    fn validate_move(&self, fen: &str, mv: &str) -> Result<bool, ValidationError> {
        let board = parse_fen(fen).map_err(|_| ValidationError::InvalidFen(fen.to_string()))?;
        Ok(resolve_legal_move(&board, mv).is_some())
    }

    fn legal_moves(&self, fen: &str) -> Result<Vec<String>, ValidationError> {
        let board = parse_fen(fen).map_err(|_| ValidationError::InvalidFen(fen.to_string()))?;
        let mut moves = Vec::new();
        board.generate_moves(|mvs| {
            moves.extend(mvs.into_iter().map(|mv| format_standard_uci(&board, mv)));
            false
        });
        Ok(moves)
    }
}
