//! Participant model and roster validation

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::ExchangeError;

/// One member of the exchange.
///
/// Loaded by an ingestion collaborator (CSV, database row, …) and immutable
/// afterwards. Names must be unique within a roster; the pipeline checks
/// this defensively via [`validate_roster`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// Unique display name, also the plaintext sealed for the giver
    pub name: String,
    /// Subgroup (household); no assignment may stay within one group
    pub group: String,
}

impl Participant {
    /// Creates a participant. Validation happens at the roster level.
    pub fn new(name: impl Into<String>, group: impl Into<String>) -> Self {
        Self { name: name.into(), group: group.into() }
    }
}

/// Defensive validation of an ingested roster.
///
/// Ingestion owns data quality, but malformed rosters are cheap to detect
/// here and would otherwise corrupt a whole run.
///
/// # Errors
///
/// [`ExchangeError::InvalidRoster`] on an empty name, an empty group, or a
/// duplicate name.
pub fn validate_roster(participants: &[Participant]) -> Result<(), ExchangeError> {
    let mut seen = BTreeSet::new();
    for participant in participants {
        if participant.name.trim().is_empty() {
            return Err(ExchangeError::InvalidRoster {
                reason: "participant with empty name".to_string(),
            });
        }
        if participant.group.trim().is_empty() {
            return Err(ExchangeError::InvalidRoster {
                reason: format!("participant {:?} has an empty group", participant.name),
            });
        }
        if !seen.insert(participant.name.as_str()) {
            return Err(ExchangeError::InvalidRoster {
                reason: format!("duplicate participant name {:?}", participant.name),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_a_clean_roster() {
        let roster = vec![
            Participant::new("Alice", "House1"),
            Participant::new("Bob", "House2"),
        ];
        assert!(validate_roster(&roster).is_ok());
    }

    #[test]
    fn accepts_an_empty_roster() {
        assert!(validate_roster(&[]).is_ok());
    }

    #[test]
    fn rejects_empty_name() {
        let roster = vec![Participant::new("  ", "House1")];
        let err = validate_roster(&roster).unwrap_err();
        assert!(matches!(err, ExchangeError::InvalidRoster { .. }));
    }

    #[test]
    fn rejects_empty_group() {
        let roster = vec![Participant::new("Alice", "")];
        assert!(validate_roster(&roster).is_err());
    }

    #[test]
    fn rejects_duplicate_names() {
        let roster = vec![
            Participant::new("Alice", "House1"),
            Participant::new("Alice", "House2"),
        ];
        let err = validate_roster(&roster).unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }
}
