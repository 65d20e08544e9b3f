use cozy_chess::{Board, GameStatus};

/// Position with no legal moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Terminal {
    /// Side to move is checkmated.
    Checkmate,
    Stalemate,
}

/// Check if a position has no legal moves (checkmate or stalemate).
///
/// Draws by rule (fifty moves, insufficient material) are not terminal here;
/// the engine still searches them.
pub fn terminal_status(board: &Board) -> Option<Terminal> {
    let mut has_moves = false;
    board.generate_moves(|_| {
        has_moves = true;
        true
    });
    if has_moves {
        return None;
    }

    if board.status() == GameStatus::Won || !board.checkers().is_empty() {
        Some(Terminal::Checkmate)
    } else {
        Some(Terminal::Stalemate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_terminal_checkmate() {
        // Fool's mate final position
        let board: Board = "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3"
            .parse()
            .unwrap();
        assert_eq!(terminal_status(&board), Some(Terminal::Checkmate));
    }

    #[test]
    fn test_is_terminal_stalemate() {
        let board: Board = "k7/8/1Q6/8/8/8/8/2K5 b - - 0 1".parse().unwrap();
        assert_eq!(terminal_status(&board), Some(Terminal::Stalemate));
    }

    #[test]
    fn test_not_terminal_ongoing() {
        assert_eq!(terminal_status(&Board::default()), None);
    }
}
