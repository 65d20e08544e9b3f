//! UCI (Universal Chess Interface) move notation utilities

use cozy_chess::{Board, File, Move, Piece, Rank, Square};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum UciMoveError {
    #[error("Invalid move: {0}")]
    InvalidMove(String),
    #[error("Invalid square: {0}")]
    InvalidSquare(String),
    #[error("Invalid promotion: {0}")]
    InvalidPromotion(String),
}

/// Parse UCI move format (e2e4, e7e8q)
pub fn parse_uci_move(s: &str) -> Result<Move, UciMoveError> {
    if !s.is_ascii() || !matches!(s.len(), 4 | 5) {
        return Err(UciMoveError::InvalidMove(s.to_string()));
    }

    let from = parse_square(&s[0..2])?;
    let to = parse_square(&s[2..4])?;

    let promotion = if s.len() == 5 {
        Some(match &s[4..5] {
            "q" => Piece::Queen,
            "r" => Piece::Rook,
            "b" => Piece::Bishop,
            "n" => Piece::Knight,
            _ => return Err(UciMoveError::InvalidPromotion(s.to_string())),
        })
    } else {
        None
    };

    Ok(Move {
        from,
        to,
        promotion,
    })
}

fn parse_square(s: &str) -> Result<Square, UciMoveError> {
    s.parse()
        .map_err(|_| UciMoveError::InvalidSquare(s.to_string()))
}

/// Format a move in UCI notation (e.g., "e2e4", "e7e8q")
pub fn format_uci_move(mv: Move) -> String {
    let mut s = format!("{}{}", mv.from, mv.to);
    if let Some(promo) = mv.promotion {
        s.push(match promo {
            Piece::Queen => 'q',
            Piece::Rook => 'r',
            Piece::Bishop => 'b',
            Piece::Knight => 'n',
            Piece::Pawn | Piece::King => '?',
        });
    }
    s
}

/// Convert UCI castling notation to cozy_chess notation
///
/// UCI uses standard notation (king moves 2 squares): e1g1, e1c1, e8g8, e8c8
/// cozy_chess uses king-to-rook notation: e1h1, e1a1, e8h8, e8a8
///
/// The converted move is only returned when it is legal on `board`.
pub fn convert_uci_castling_to_cozy(board: &Board, mv: Move) -> Move {
    let is_rank_1_or_8 = matches!(mv.from.rank(), Rank::First | Rank::Eighth);
    let is_e_file = matches!(mv.from.file(), File::E);
    let is_g_or_c_file = matches!(mv.to.file(), File::G | File::C);

    if !(is_rank_1_or_8 && is_e_file && is_g_or_c_file && mv.promotion.is_none()) {
        return mv;
    }
    if board.piece_on(mv.from) != Some(Piece::King) {
        return mv;
    }

    let rook_file = match mv.to.file() {
        File::G => File::H,
        _ => File::A,
    };
    let converted = Move {
        from: mv.from,
        to: Square::new(rook_file, mv.from.rank()),
        promotion: None,
    };

    if board.is_legal(converted) {
        converted
    } else {
        mv
    }
}

/// Format a legal cozy_chess move in standard UCI notation.
///
/// Castling (king-to-rook in cozy_chess) is written as the king's two-square move.
pub fn format_standard_uci(board: &Board, mv: Move) -> String {
    let castles = board.piece_on(mv.from) == Some(Piece::King)
        && board.color_on(mv.to) == Some(board.side_to_move());
    if !castles {
        return format_uci_move(mv);
    }
    let king_file = if mv.to.file() as u8 > mv.from.file() as u8 { File::G } else { File::C };
    format_uci_move(Move {
        from: mv.from,
        to: Square::new(king_file, mv.from.rank()),
        promotion: None,
    })
}

/// Parse a UCI move and resolve it against `board`, returning it only if legal.
pub fn resolve_legal_move(board: &Board, s: &str) -> Option<Move> {
    let mv = parse_uci_move(s).ok()?;
    let mv = convert_uci_castling_to_cozy(board, mv);
    board.is_legal(mv).then_some(mv)
}
