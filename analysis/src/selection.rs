//! Best-move selection over mate-normalized scores.

use std::collections::HashMap;

use chess::Evaluation;

/// Pick the candidate with the strictly greatest comparable score.
///
/// Walks `moves` in order so that, on equal scores, the earlier move wins.
/// Moves without an evaluation are ignored; `None` when nothing was evaluated.
pub fn select_best<'a>(
    moves: &'a [String],
    evaluations: &HashMap<String, Evaluation>,
) -> Option<(&'a str, i32)> {
    let mut best: Option<(&str, i32)> = None;

    for mv in moves {
        let Some(eval) = evaluations.get(mv) else {
            continue;
        };
        let value = eval.score.to_comparable();
        match best {
            Some((_, best_value)) if value <= best_value => {}
            _ => best = Some((mv.as_str(), value)),
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess::Score;
    use proptest::prelude::*;

    fn evals(entries: &[(&str, Score)]) -> HashMap<String, Evaluation> {
        entries
            .iter()
            .map(|(mv, score)| (mv.to_string(), Evaluation::new(*score, 10, Vec::new()).unwrap()))
            .collect()
    }

    fn moves(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_higher_centipawns_wins() {
        let list = moves(&["e2e4", "d2d4"]);
        let map = evals(&[("e2e4", Score::centipawns(20)), ("d2d4", Score::centipawns(35))]);
        assert_eq!(select_best(&list, &map), Some(("d2d4", 35)));
    }

    #[test]
    fn test_tie_keeps_first() {
        let list = moves(&["e2e4", "g1f3"]);
        let map = evals(&[("e2e4", Score::centipawns(10)), ("g1f3", Score::centipawns(10))]);
        assert_eq!(select_best(&list, &map), Some(("e2e4", 10)));
    }

    #[test]
    fn test_mate_beats_centipawns() {
        let list = moves(&["e2e4", "d8h4", "g1f3"]);
        let map = evals(&[
            ("e2e4", Score::centipawns(900)),
            ("d8h4", Score::mate(1)),
            ("g1f3", Score::mate(-2)),
        ]);
        assert_eq!(select_best(&list, &map), Some(("d8h4", 9999)));
    }

    #[test]
    fn test_missing_evaluations() {
        let list = moves(&["e2e4", "d2d4"]);
        let map = evals(&[("d2d4", Score::centipawns(-40))]);
        assert_eq!(select_best(&list, &map), Some(("d2d4", -40)));
        assert_eq!(select_best(&list, &HashMap::new()), None);
        assert_eq!(select_best(&[], &map), None);
    }

    fn arb_score() -> impl Strategy<Value = Score> {
        prop_oneof![
            (-3000i32..3000).prop_map(Score::centipawns),
            (-20i32..=20).prop_map(Score::mate),
        ]
    }

    proptest! {
        #[test]
        fn prop_selects_first_maximum(scores in proptest::collection::vec(arb_score(), 1..12)) {
            let list: Vec<String> = (0..scores.len()).map(|i| format!("m{:03}", i)).collect();
            let map: HashMap<String, Evaluation> = list
                .iter()
                .zip(&scores)
                .map(|(mv, s)| (mv.clone(), Evaluation::new(*s, 1, Vec::new()).unwrap()))
                .collect();

            let (best_mv, best_value) = select_best(&list, &map).unwrap();
            let max = scores.iter().map(Score::to_comparable).max().unwrap();
            let first = scores.iter().position(|s| s.to_comparable() == max).unwrap();

            prop_assert_eq!(best_value, max);
            prop_assert_eq!(best_mv, list[first].as_str());
        }
    }
}
