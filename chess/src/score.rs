//! Engine evaluation score.

use serde::{Deserialize, Serialize};

/// Comparable value of a mate score before the distance adjustment.
pub const MATE_VALUE: i32 = 10_000;

/// Engine evaluation score, from the perspective of the side to move.
///
/// Exactly one of `centipawns` / `mate_in` is set.
/// Mate: positive N = side to move mates in N moves,
/// negative N = side to move gets mated in N moves,
/// zero = side to move is already checkmated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawScore", into = "RawScore")]
pub struct Score {
    centipawns: Option<i32>,
    mate_in: Option<i32>,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum InvalidScoreError {
    #[error("Score cannot have both cp and mate value")]
    Both,
    #[error("Score must have either cp or mate value")]
    Neither,
}

impl Score {
    pub fn new(centipawns: Option<i32>, mate_in: Option<i32>) -> Result<Self, InvalidScoreError> {
        match (centipawns, mate_in) {
            (Some(_), Some(_)) => Err(InvalidScoreError::Both),
            (None, None) => Err(InvalidScoreError::Neither),
            _ => Ok(Self {
                centipawns,
                mate_in,
            }),
        }
    }

    pub fn centipawns(cp: i32) -> Self {
        Self {
            centipawns: Some(cp),
            mate_in: None,
        }
    }

    pub fn mate(moves: i32) -> Self {
        Self {
            centipawns: None,
            mate_in: Some(moves),
        }
    }

    pub fn cp(&self) -> Option<i32> {
        self.centipawns
    }

    pub fn mate_in(&self) -> Option<i32> {
        self.mate_in
    }

    pub fn is_mate(&self) -> bool {
        self.mate_in.is_some()
    }

    /// Collapse the score into one integer where greater is better for the side to move.
    ///
    /// Positive mates map just below [`MATE_VALUE`] (shorter is higher), mates
    /// against the side to move map just above `-MATE_VALUE` (later is higher),
    /// centipawns pass through unchanged.
    pub fn to_comparable(&self) -> i32 {
        match (self.mate_in, self.centipawns) {
            (Some(m), _) if m > 0 => MATE_VALUE - m,
            (Some(m), _) => -MATE_VALUE - m,
            (None, Some(cp)) => cp,
            // unreachable through the constructors
            (None, None) => 0,
        }
    }

    /// Negate the score (flip perspective).
    pub fn negate(&self) -> Self {
        Self {
            centipawns: self.centipawns.map(|cp| -cp),
            mate_in: self.mate_in.map(|m| -m),
        }
    }

    /// Short label used in prompts and logs ("12 centipawns", "Mate in 3").
    pub fn describe(&self) -> String {
        match (self.mate_in, self.centipawns) {
            (Some(m), _) => format!("Mate in {}", m),
            (None, Some(cp)) => format!("{} centipawns", cp),
            (None, None) => "unknown".to_string(),
        }
    }
}

impl std::fmt::Display for Score {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.mate_in, self.centipawns) {
            (Some(m), _) if m > 0 => write!(f, "+M{}", m),
            (Some(m), _) => write!(f, "-M{}", m.abs()),
            (None, Some(cp)) => write!(f, "{:+.2}", cp as f64 / 100.0),
            (None, None) => write!(f, "?"),
        }
    }
}

/// Wire form: `{"cp": 35}` or `{"mate": -2}`.
#[derive(Serialize, Deserialize)]
struct RawScore {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    cp: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    mate: Option<i32>,
}

impl TryFrom<RawScore> for Score {
    type Error = InvalidScoreError;

    fn try_from(raw: RawScore) -> Result<Self, Self::Error> {
        Score::new(raw.cp, raw.mate)
    }
}

impl From<Score> for RawScore {
    fn from(score: Score) -> Self {
        Self {
            cp: score.centipawns,
            mate: score.mate_in,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_centipawns_pass_through() {
        assert_eq!(Score::centipawns(50).to_comparable(), 50);
        assert_eq!(Score::centipawns(-130).to_comparable(), -130);
    }

    #[test]
    fn test_mated_values() {
        assert_eq!(Score::mate(-1).to_comparable(), -9999);
        assert_eq!(Score::mate(-3).to_comparable(), -9997);
        assert_eq!(Score::mate(0).to_comparable(), -10_000);
    }

    #[test]
    fn test_mating_values() {
        assert_eq!(Score::mate(1).to_comparable(), 9999);
        assert_eq!(Score::mate(5).to_comparable(), 9995);
    }

    #[test]
    fn test_both_fields_rejected() {
        assert_eq!(Score::new(Some(10), Some(2)), Err(InvalidScoreError::Both));
    }

    #[test]
    fn test_neither_field_rejected() {
        assert_eq!(Score::new(None, None), Err(InvalidScoreError::Neither));
    }

    #[test]
    fn test_new_accepts_one_field() {
        assert_eq!(Score::new(Some(10), None), Ok(Score::centipawns(10)));
        assert_eq!(Score::new(None, Some(-2)), Ok(Score::mate(-2)));
    }

    #[test]
    fn test_negate() {
        assert_eq!(Score::centipawns(40).negate(), Score::centipawns(-40));
        assert_eq!(Score::mate(-3).negate(), Score::mate(3));
    }

    #[test]
    fn test_display() {
        assert_eq!(Score::centipawns(35).to_string(), "+0.35");
        assert_eq!(Score::centipawns(-120).to_string(), "-1.20");
        assert_eq!(Score::mate(3).to_string(), "+M3");
        assert_eq!(Score::mate(-2).to_string(), "-M2");
    }

    #[test]
    fn test_describe() {
        assert_eq!(Score::centipawns(12).describe(), "12 centipawns");
        assert_eq!(Score::mate(3).describe(), "Mate in 3");
    }

    #[test]
    fn test_serde_shape() {
        let json = serde_json::to_string(&Score::mate(-2)).unwrap();
        assert_eq!(json, r#"{"mate":-2}"#);
        let back: Score = serde_json::from_str(r#"{"cp":35}"#).unwrap();
        assert_eq!(back, Score::centipawns(35));
        assert!(serde_json::from_str::<Score>(r#"{"cp":1,"mate":2}"#).is_err());
        assert!(serde_json::from_str::<Score>("{}").is_err());
    }

    #[test]
    fn test_equal_rank_is_not_equality() {
        // Equality is field-wise; ranking goes through to_comparable.
        let cp = Score::centipawns(9999);
        let mate = Score::mate(1);
        assert_eq!(cp.to_comparable(), mate.to_comparable());
        assert_ne!(cp, mate);

        let set: std::collections::HashSet<Score> = [cp, mate].into_iter().collect();
        assert_eq!(set.len(), 2);

        let mated = Score::mate(0);
        assert_eq!(mated.to_comparable(), Score::centipawns(-10_000).to_comparable());
        assert_ne!(mated, Score::centipawns(-10_000));
    }

    #[test]
    fn test_best_by_key() {
        let scores = [Score::centipawns(950), Score::mate(3), Score::mate(2), Score::mate(-1)];
        let best = scores.iter().copied().max_by_key(Score::to_comparable);
        assert_eq!(best, Some(Score::mate(2)));
    }

    proptest! {
        #[test]
        fn faster_mate_ranks_higher(n1 in 1i32..500, delta in 1i32..500) {
            let n2 = n1 + delta;
            prop_assert!(Score::mate(n1).to_comparable() > Score::mate(n2).to_comparable());
        }

        #[test]
        fn later_mated_ranks_higher(m2 in -500i32..=-1, delta in 1i32..500) {
            let m1 = m2 - delta;
            prop_assert!(Score::mate(m1).to_comparable() < Score::mate(m2).to_comparable());
        }

        #[test]
        fn mate_in_one_beats_any_centipawn(cp in -9998i32..9999) {
            prop_assert!(Score::mate(1).to_comparable() > Score::centipawns(cp).to_comparable());
        }

        #[test]
        fn being_mated_loses_to_any_centipawn(cp in -9000i32..9999, m in -500i32..=0) {
            prop_assert!(Score::mate(m).to_comparable() < Score::centipawns(cp).to_comparable());
        }
    }
}
