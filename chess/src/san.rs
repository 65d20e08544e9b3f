//! Standard Algebraic Notation formatting.

use cozy_chess::{Board, File, GameStatus, Move, Piece, Rank, Square};

/// Format a legal move as SAN ("Nf3", "exd5", "O-O", "e8=Q+", "Qh4#").
///
/// `mv` must be legal on `board` and use cozy-chess castling notation
/// (king captures own rook).
pub fn format_move_as_san(board: &Board, mv: Move) -> String {
    let Some(piece) = board.piece_on(mv.from) else {
        return crate::uci::format_uci_move(mv);
    };

    let mut san = if is_castling(board, mv, piece) {
        if mv.to.file() as u8 > mv.from.file() as u8 {
            "O-O".to_string()
        } else {
            "O-O-O".to_string()
        }
    } else {
        piece_move_san(board, mv, piece)
    };

    let mut after = board.clone();
    after.play_unchecked(mv);
    if !after.checkers().is_empty() {
        san.push(if after.status() == GameStatus::Won {
            '#'
        } else {
            '+'
        });
    }

    san
}

/// Annotate a line of UCI moves played from `board` with SAN.
///
/// Stops at the first move that cannot be parsed or is illegal, so the
/// returned line is always playable.
pub fn annotate_line(board: &Board, line: &[String]) -> Vec<crate::Move> {
    let mut board = board.clone();
    let mut annotated = Vec::with_capacity(line.len());

    for uci in line {
        let Some(mv) = crate::uci::resolve_legal_move(&board, uci) else {
            break;
        };
        let san = format_move_as_san(&board, mv);
        match crate::Move::new(uci.as_str(), Some(san)) {
            Ok(m) => annotated.push(m),
            Err(_) => break,
        }
        board.play_unchecked(mv);
    }

    annotated
}

fn is_castling(board: &Board, mv: Move, piece: Piece) -> bool {
    piece == Piece::King && board.color_on(mv.to) == Some(board.side_to_move())
}

fn piece_move_san(board: &Board, mv: Move, piece: Piece) -> String {
    let mut san = String::new();
    let is_capture = board.color_on(mv.to).is_some()
        || (piece == Piece::Pawn && mv.from.file() != mv.to.file());

    match piece {
        Piece::Pawn => {
            if is_capture {
                san.push(file_to_char(mv.from));
            }
        }
        _ => {
            san.push(piece_letter(piece));
            san.push_str(&disambiguation(board, mv, piece));
        }
    }

    if is_capture {
        san.push('x');
    }
    san.push_str(&mv.to.to_string());

    if let Some(promo) = mv.promotion {
        san.push('=');
        san.push(piece_letter(promo));
    }

    san
}

/// File, rank, or full square of the origin when another piece of the same
/// kind can reach the same destination.
fn disambiguation(board: &Board, mv: Move, piece: Piece) -> String {
    let mut rivals = Vec::new();
    board.generate_moves(|moves| {
        if moves.piece == piece && moves.from != mv.from && moves.to.has(mv.to) {
            rivals.push(moves.from);
        }
        false
    });

    if rivals.is_empty() {
        return String::new();
    }
    if rivals.iter().all(|sq| sq.file() != mv.from.file()) {
        return file_to_char(mv.from).to_string();
    }
    if rivals.iter().all(|sq| sq.rank() != mv.from.rank()) {
        return rank_to_char(mv.from).to_string();
    }
    mv.from.to_string()
}

fn file_to_char(square: Square) -> char {
    match square.file() {
        File::A => 'a',
        File::B => 'b',
        File::C => 'c',
        File::D => 'd',
        File::E => 'e',
        File::F => 'f',
        File::G => 'g',
        File::H => 'h',
    }
}

fn rank_to_char(square: Square) -> char {
    match square.rank() {
        Rank::First => '1',
        Rank::Second => '2',
        Rank::Third => '3',
        Rank::Fourth => '4',
        Rank::Fifth => '5',
        Rank::Sixth => '6',
        Rank::Seventh => '7',
        Rank::Eighth => '8',
    }
}

fn piece_letter(piece: Piece) -> char {
    match piece {
        Piece::Pawn => 'P',
        Piece::Knight => 'N',
        Piece::Bishop => 'B',
        Piece::Rook => 'R',
        Piece::Queen => 'Q',
        Piece::King => 'K',
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::uci::resolve_legal_move;

    const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    fn san(fen: &str, uci: &str) -> String {
        let board: Board = fen.parse().unwrap();
        let mv = resolve_legal_move(&board, uci).unwrap();
        format_move_as_san(&board, mv)
    }

    #[test]
    fn test_pawn_push() {
        assert_eq!(san(START_FEN, "e2e4"), "e4");
    }

    #[test]
    fn test_knight() {
        assert_eq!(san(START_FEN, "g1f3"), "Nf3");
    }

    #[test]
    fn test_capture() {
        let fen = "rnbqkbnr/ppp1pppp/8/3p4/4P3/8/PPPP1PPP/RNBQKBNR w KQkq - 0 2";
        assert_eq!(san(fen, "e4d5"), "exd5");
    }

    #[test]
    fn test_castling() {
        let fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq - 0 1";
        assert_eq!(san(fen, "e1g1"), "O-O");
        assert_eq!(san(fen, "e1c1"), "O-O-O");
    }

    #[test]
    fn test_promotion() {
        let fen = "8/P7/8/8/8/8/8/4K2k w - - 0 1";
        assert_eq!(san(fen, "a7a8q"), "a8=Q+");
        assert_eq!(san(fen, "a7a8n"), "a8=N");
    }

    #[test]
    fn test_promotion_along_rank() {
        let fen = "7k/P7/8/8/8/8/8/4K3 w - - 0 1";
        assert_eq!(san(fen, "a7a8q"), "a8=Q+");
    }

    #[test]
    fn test_checkmate_suffix() {
        let fen = "rnbqkbnr/pppp1ppp/8/4p3/6P1/5P2/PPPPP2P/RNBQKBNR b KQkq - 0 2";
        assert_eq!(san(fen, "d8h4"), "Qh4#");
    }

    #[test]
    fn test_file_disambiguation() {
        let fen = "4k3/8/8/8/8/8/4K3/R6R w - - 0 1";
        assert_eq!(san(fen, "a1d1"), "Rad1");
    }

    #[test]
    fn test_annotate_line() {
        let board: Board = START_FEN.parse().unwrap();
        let line: Vec<String> = ["e2e4", "e7e5", "g1f3", "b8c6", "e1g1", "d7d5"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let annotated = annotate_line(&board, &line);
        let sans: Vec<_> = annotated.iter().map(|m| m.notation()).collect();
        // castling is still blocked by the f1 bishop, so the line stops there
        assert_eq!(sans, vec!["e4", "e5", "Nf3", "Nc6"]);
        assert_eq!(annotated[2].coordinate, "g1f3");
    }

    #[test]
    fn test_rank_disambiguation() {
        let fen = "4k3/8/8/8/R7/8/8/R3K3 w - - 0 1";
        assert_eq!(san(fen, "a1a2"), "R1a2");
    }
}
