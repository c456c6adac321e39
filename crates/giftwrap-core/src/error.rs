//! Error types for the exchange pipeline.
//!
//! Strongly-typed errors for the two layers that can fail: building a run
//! (roster validation, constrained matching) and resolving a code back to a
//! giftee name (lookup, decryption). Lookup misses and decryption failures
//! are distinct variants so callers can give different user feedback
//! ("unknown code" vs "decryption failed").

use giftwrap_crypto::CipherError;
use thiserror::Error;

/// Errors from building or resolving a gift exchange.
#[derive(Debug, Error)]
pub enum ExchangeError {
    /// Roster failed defensive validation (empty name/group, duplicate name)
    #[error("invalid roster: {reason}")]
    InvalidRoster {
        /// What was wrong with the roster
        reason: String,
    },

    /// Matcher exhausted its retry budget without a valid assignment.
    /// Expected when one group outnumbers all others combined.
    #[error("no valid assignment found after {attempts} attempts")]
    AssignmentInfeasible {
        /// Number of shuffled attempts made before giving up
        attempts: u32,
    },

    /// Supplied lookup code is not 4 characters over A-Z0-9
    #[error("malformed code {input:?}: expected 4 characters from A-Z0-9")]
    InvalidCode {
        /// The rejected input, as supplied
        input: String,
    },

    /// Supplied code has no entry in the artifact
    #[error("unknown code: {code}")]
    UnknownCode {
        /// The code that was looked up
        code: String,
    },

    /// Ciphertext could not be reversed under the supplied key
    #[error("decryption failed (wrong code or key): {0}")]
    Decryption(#[from] CipherError),

    /// A reconstructed assignment breaks a matching constraint
    #[error("assignment violates constraints: {giver} -> {giftee} ({reason})")]
    ConstraintViolated {
        /// Giver side of the offending pair
        giver: String,
        /// Giftee side of the offending pair
        giftee: String,
        /// Which constraint was broken
        reason: &'static str,
    },
}

impl ExchangeError {
    /// Returns true if this error is caused by caller-supplied input and
    /// can be fixed by correcting that input.
    ///
    /// `AssignmentInfeasible` and `ConstraintViolated` are run-level
    /// failures: retrying with the same roster or artifact will not help.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidRoster { .. }
                | Self::InvalidCode { .. }
                | Self::UnknownCode { .. }
                | Self::Decryption(_)
        )
    }
}
