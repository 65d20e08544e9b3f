use cozy_chess::{Board, Color};

/// Number of whitespace-separated fields in a complete FEN record.
const FEN_FIELDS: usize = 6;

/// Parse a FEN string into a Board.
///
/// All six fields are required; cozy-chess would otherwise accept
/// shortened records that the engine does not.
pub fn parse_fen(fen: &str) -> Result<Board, FenError> {
    let fields = fen.split_whitespace().count();
    if fields != FEN_FIELDS {
        return Err(FenError::FieldCount(fields));
    }

    fen.parse().map_err(|_| FenError::InvalidFormat)
}

/// Format a Board as a FEN string
pub fn format_fen(board: &Board) -> String {
    board.to_string()
}

/// "white" / "black" for the side to move.
pub fn side_to_move_name(board: &Board) -> &'static str {
    match board.side_to_move() {
        Color::White => "white",
        Color::Black => "black",
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FenError {
    #[error("Invalid FEN format")]
    InvalidFormat,
    #[error("FEN must have 6 fields, got {0}")]
    FieldCount(usize),
}
