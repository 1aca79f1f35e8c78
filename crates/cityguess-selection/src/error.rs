//! Error types for the selection engine.

use cityguess_types::{Difficulty, SelectionErrorKind};

/// Terminal failures of a selection request.
///
/// Neither is retried internally and neither carries a partial result.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    /// The tier has fewer eligible cities than were requested.
    #[error("only {eligible} eligible {difficulty} cities, {requested} requested")]
    NoCitiesAvailable {
        /// Tier that was requested.
        difficulty: Difficulty,
        /// Size of the eligible pool.
        eligible: usize,
        /// Number of cities asked for.
        requested: usize,
    },

    /// Every diversity relaxation was exhausted before the result was full.
    #[error(
        "could not fill {requested} diverse {difficulty} slots; stopped after {selected}"
    )]
    InsufficientDiversity {
        /// Tier that was requested.
        difficulty: Difficulty,
        /// Slots filled before the draw gave up.
        selected: usize,
        /// Number of cities asked for.
        requested: usize,
    },
}

impl SelectionError {
    /// Machine-readable identifier for this failure.
    pub const fn kind(&self) -> SelectionErrorKind {
        match self {
            Self::NoCitiesAvailable { .. } => SelectionErrorKind::NoCitiesAvailable,
            Self::InsufficientDiversity { .. } => SelectionErrorKind::InsufficientDiversity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_and_messages() {
        let err = SelectionError::NoCitiesAvailable {
            difficulty: Difficulty::Advanced,
            eligible: 3,
            requested: 10,
        };
        assert_eq!(err.kind(), SelectionErrorKind::NoCitiesAvailable);
        assert_eq!(
            err.to_string(),
            "only 3 eligible advanced cities, 10 requested"
        );

        let err = SelectionError::InsufficientDiversity {
            difficulty: Difficulty::Beginner,
            selected: 4,
            requested: 5,
        };
        assert_eq!(err.kind().as_str(), "insufficient_diversity");
    }
}
