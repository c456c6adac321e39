//! Constrained random matcher
//!
//! Produces a giver→giftee permutation with no fixed points and no pair
//! inside one group, by randomized retry: shuffle a candidate pool, walk the
//! givers in fixed order, pick uniformly among still-valid candidates, and
//! restart the whole attempt if any giver runs out of candidates.
//!
//! The retry loop is an explicit state machine driven by a pure per-attempt
//! function, so runtime is bounded even on infeasible rosters:
//!
//! ```text
//! ┌────────────┐  attempt ok   ┌───────────┐
//! │ Attempting │──────────────>│ Succeeded │
//! └────────────┘               └───────────┘
//!       │ ▲
//!       │ │ attempt aborted, budget left
//!       │ └────────────────────┐
//!       │ budget spent    ┌───────────┐
//!       └────────────────>│ Exhausted │
//!                         └───────────┘
//! ```
//!
//! Exact construction (bipartite matching with Hall checks) would be more
//! robust, but retry is simple and ample for rosters of tens of names; the
//! failure probability per attempt is small whenever no group outnumbers
//! all others combined.

use std::collections::BTreeMap;

use rand::{Rng, seq::SliceRandom};
use tracing::{debug, trace};

use crate::{error::ExchangeError, participant::Participant};

/// Retry budget for the matcher. Exceeding it is a fatal
/// [`ExchangeError::AssignmentInfeasible`].
pub const MAX_ATTEMPTS: u32 = 1000;

/// A complete giver→giftee mapping.
///
/// Every participant of the run appears exactly once as a giver and exactly
/// once as a giftee. Constructed atomically by [`assign_giftees`] or
/// rebuilt from persisted pieces by
/// [`reconstruct_assignment`](crate::exchange::reconstruct_assignment);
/// never partially materialized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment(BTreeMap<String, String>);

impl Assignment {
    pub(crate) fn from_map(map: BTreeMap<String, String>) -> Self {
        Self(map)
    }

    /// The giftee assigned to `giver`, if `giver` is part of this run.
    pub fn giftee_of(&self, giver: &str) -> Option<&str> {
        self.0.get(giver).map(String::as_str)
    }

    /// Iterates over `(giver, giftee)` pairs in giver-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(g, t)| (g.as_str(), t.as_str()))
    }

    /// Number of pairs.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when the run had no participants.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Audits this assignment against the roster it was built from.
    ///
    /// Checks that the mapping is a permutation of the roster names, has no
    /// fixed points, and crosses groups on every pair. Meant for operators
    /// re-validating a persisted run after
    /// [`reconstruct_assignment`](crate::exchange::reconstruct_assignment).
    ///
    /// # Errors
    ///
    /// [`ExchangeError::ConstraintViolated`] naming the first offending pair.
    pub fn verify(&self, participants: &[Participant]) -> Result<(), ExchangeError> {
        let groups: BTreeMap<&str, &str> = participants
            .iter()
            .map(|p| (p.name.as_str(), p.group.as_str()))
            .collect();

        let mut seen_giftees = std::collections::BTreeSet::new();
        for (giver, giftee) in self.iter() {
            let violation = |reason| ExchangeError::ConstraintViolated {
                giver: giver.to_string(),
                giftee: giftee.to_string(),
                reason,
            };

            if giver == giftee {
                return Err(violation("self-assignment"));
            }
            let (Some(giver_group), Some(giftee_group)) =
                (groups.get(giver), groups.get(giftee))
            else {
                return Err(violation("name not in roster"));
            };
            if giver_group == giftee_group {
                return Err(violation("same group"));
            }
            if !seen_giftees.insert(giftee) {
                return Err(violation("giftee assigned twice"));
            }
        }

        if self.0.len() != participants.len() {
            return Err(ExchangeError::ConstraintViolated {
                giver: String::new(),
                giftee: String::new(),
                reason: "assignment does not cover the roster",
            });
        }
        Ok(())
    }
}

/// Matcher retry states.
enum MatcherState {
    /// Attempts made so far; budget remains
    Attempting { attempt: u32 },
    /// An attempt produced a full valid assignment
    Succeeded(Assignment),
    /// Budget spent without success
    Exhausted,
}

/// Computes a valid assignment for `participants`.
///
/// Randomness comes from the caller; pass a seeded RNG for reproducible
/// runs. The caller is expected to have validated the roster
/// ([`crate::participant::validate_roster`]).
///
/// # Errors
///
/// [`ExchangeError::AssignmentInfeasible`] after [`MAX_ATTEMPTS`] aborted
/// attempts. Guaranteed whenever one group outnumbers all others combined
/// (pigeonhole), and vanishingly rare otherwise.
pub fn assign_giftees<R: Rng>(
    participants: &[Participant],
    rng: &mut R,
) -> Result<Assignment, ExchangeError> {
    let mut state = MatcherState::Attempting { attempt: 0 };
    loop {
        state = match state {
            MatcherState::Attempting { attempt } if attempt >= MAX_ATTEMPTS => {
                MatcherState::Exhausted
            },
            MatcherState::Attempting { attempt } => match attempt_assignment(participants, rng) {
                Some(assignment) => MatcherState::Succeeded(assignment),
                None => {
                    trace!(attempt, "assignment attempt aborted, reshuffling");
                    MatcherState::Attempting { attempt: attempt + 1 }
                },
            },
            MatcherState::Succeeded(assignment) => {
                debug!(pairs = assignment.len(), "assignment found");
                return Ok(assignment);
            },
            MatcherState::Exhausted => {
                debug!(attempts = MAX_ATTEMPTS, "assignment retry budget exhausted");
                return Err(ExchangeError::AssignmentInfeasible { attempts: MAX_ATTEMPTS });
            },
        };
    }
}

/// One attempt: pure given the RNG draws, with no state carried across
/// attempts. Returns `None` as soon as any giver has no valid candidate.
fn attempt_assignment<R: Rng>(
    participants: &[Participant],
    rng: &mut R,
) -> Option<Assignment> {
    let mut pool: Vec<&Participant> = participants.iter().collect();
    pool.shuffle(rng);

    let mut assignment = BTreeMap::new();
    for giver in participants {
        let valid: Vec<usize> = pool
            .iter()
            .enumerate()
            .filter(|(_, candidate)| {
                candidate.group != giver.group && candidate.name != giver.name
            })
            .map(|(index, _)| index)
            .collect();

        let &chosen = valid.choose(rng)?;
        let giftee = pool.swap_remove(chosen);
        assignment.insert(giver.name.clone(), giftee.name.clone());
    }

    Some(Assignment::from_map(assignment))
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    fn two_houses() -> Vec<Participant> {
        vec![
            Participant::new("Alice", "House1"),
            Participant::new("Bob", "House1"),
            Participant::new("Carol", "House2"),
            Participant::new("Dave", "House2"),
        ]
    }

    #[test]
    fn produces_a_valid_assignment() {
        let roster = two_houses();
        let mut rng = ChaCha8Rng::seed_from_u64(42);

        let assignment = assign_giftees(&roster, &mut rng).unwrap();

        assignment.verify(&roster).unwrap();
        assert_eq!(assignment.len(), 4);
    }

    #[test]
    fn two_houses_always_cross_assign() {
        let roster = two_houses();
        for seed in 0..50 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let assignment = assign_giftees(&roster, &mut rng).unwrap();
            for house1 in ["Alice", "Bob"] {
                let giftee = assignment.giftee_of(house1).unwrap();
                assert!(giftee == "Carol" || giftee == "Dave");
            }
        }
    }

    #[test]
    fn single_group_is_infeasible() {
        let roster = vec![
            Participant::new("Alice", "House1"),
            Participant::new("Bob", "House1"),
            Participant::new("Carol", "House1"),
        ];
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let err = assign_giftees(&roster, &mut rng).unwrap_err();

        assert!(matches!(err, ExchangeError::AssignmentInfeasible { attempts: MAX_ATTEMPTS }));
    }

    #[test]
    fn dominant_group_is_infeasible() {
        // 3 in House1 vs 2 elsewhere: pigeonhole forces a House1 pair
        let roster = vec![
            Participant::new("A", "House1"),
            Participant::new("B", "House1"),
            Participant::new("C", "House1"),
            Participant::new("D", "House2"),
            Participant::new("E", "House3"),
        ];
        let mut rng = ChaCha8Rng::seed_from_u64(2);

        assert!(assign_giftees(&roster, &mut rng).is_err());
    }

    #[test]
    fn empty_roster_yields_empty_assignment() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let assignment = assign_giftees(&[], &mut rng).unwrap();
        assert!(assignment.is_empty());
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let roster = two_houses();
        let a = assign_giftees(&roster, &mut ChaCha8Rng::seed_from_u64(9)).unwrap();
        let b = assign_giftees(&roster, &mut ChaCha8Rng::seed_from_u64(9)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn different_seeds_reach_different_assignments() {
        // Uniform-ish randomization: across seeds, Alice must not always get
        // the lexicographically first valid giftee
        let roster = two_houses();
        let giftees: std::collections::BTreeSet<String> = (0..100)
            .map(|seed| {
                let mut rng = ChaCha8Rng::seed_from_u64(seed);
                let assignment = assign_giftees(&roster, &mut rng).unwrap();
                assignment.giftee_of("Alice").unwrap().to_string()
            })
            .collect();
        assert!(giftees.len() > 1, "assignment is biased toward one giftee");
    }

    #[test]
    fn verify_rejects_self_assignment() {
        let roster = two_houses();
        let mut map = BTreeMap::new();
        map.insert("Alice".to_string(), "Alice".to_string());
        let err = Assignment::from_map(map).verify(&roster).unwrap_err();
        assert!(matches!(err, ExchangeError::ConstraintViolated { reason, .. } if reason == "self-assignment"));
    }

    #[test]
    fn verify_rejects_same_group_pair() {
        let roster = two_houses();
        let mut map = BTreeMap::new();
        map.insert("Alice".to_string(), "Bob".to_string());
        let err = Assignment::from_map(map).verify(&roster).unwrap_err();
        assert!(matches!(err, ExchangeError::ConstraintViolated { reason, .. } if reason == "same group"));
    }

    #[test]
    fn verify_rejects_partial_cover() {
        let roster = two_houses();
        let mut map = BTreeMap::new();
        map.insert("Alice".to_string(), "Carol".to_string());
        let err = Assignment::from_map(map).verify(&roster).unwrap_err();
        assert!(matches!(err, ExchangeError::ConstraintViolated { .. }));
    }
}
