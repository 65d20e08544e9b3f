use serde::{Deserialize, Serialize};

/// A single half-move as reported to callers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// Coordinate notation, e.g. "e2e4" or "e7e8q".
    pub coordinate: String,
    /// Standard Algebraic Notation, when a board was available to derive it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub algebraic: Option<String>,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Invalid UCI move length: {0}")]
pub struct InvalidMoveError(pub String);

impl Move {
    pub fn new(
        coordinate: impl Into<String>,
        algebraic: Option<String>,
    ) -> Result<Self, InvalidMoveError> {
        let coordinate = coordinate.into();
        if !matches!(coordinate.len(), 4 | 5) {
            return Err(InvalidMoveError(coordinate));
        }
        Ok(Self {
            coordinate,
            algebraic,
        })
    }

    /// SAN if known, otherwise the coordinate form.
    pub fn notation(&self) -> &str {
        self.algebraic.as_deref().unwrap_or(&self.coordinate)
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.notation())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_accepts_four_and_five_chars() {
        assert!(Move::new("e2e4", None).is_ok());
        assert!(Move::new("e7e8q", Some("e8=Q".to_string())).is_ok());
    }

    #[test]
    fn test_new_rejects_bad_length() {
        assert_eq!(
            Move::new("e2", None),
            Err(InvalidMoveError("e2".to_string()))
        );
        assert!(Move::new("", None).is_err());
        assert!(Move::new("e7e8qq", None).is_err());
    }

    #[test]
    fn test_display_prefers_san() {
        let mv = Move::new("g1f3", Some("Nf3".to_string())).unwrap();
        assert_eq!(mv.to_string(), "Nf3");
        let bare = Move::new("g1f3", None).unwrap();
        assert_eq!(bare.to_string(), "g1f3");
    }
}
