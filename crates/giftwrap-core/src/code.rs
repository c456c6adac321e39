//! Short public lookup codes
//!
//! Each participant gets a 4-character code over `A-Z0-9`. Codes are public:
//! knowing one reveals nothing without the artifact entry and the secret
//! key. Uniqueness is per run, by rejection sampling against the set of
//! codes already issued.

use std::{collections::BTreeMap, fmt};

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{error::ExchangeError, participant::Participant};

/// Code length in characters.
pub const CODE_LEN: usize = 4;

/// Alphabet codes are drawn from (36 symbols).
pub const CODE_ALPHABET: &[u8; 36] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Total code space (36^4).
///
/// Rejection sampling degrades as issued codes approach this bound; callers
/// must keep rosters far below it (realistic rosters are tens of names).
pub const CODE_SPACE: u32 = 1_679_616;

/// A 4-character public lookup code.
///
/// Always stored normalized (uppercase). Serializes as its string form.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Code(String);

impl Code {
    /// Parses user-supplied input into a code.
    ///
    /// Input is normalized first (surrounding whitespace trimmed, letters
    /// uppercased), matching what lookup frontends send.
    ///
    /// # Errors
    ///
    /// [`ExchangeError::InvalidCode`] unless the normalized input is exactly
    /// [`CODE_LEN`] characters from [`CODE_ALPHABET`].
    pub fn parse(input: &str) -> Result<Self, ExchangeError> {
        let normalized = input.trim().to_ascii_uppercase();
        let well_formed = normalized.len() == CODE_LEN
            && normalized.bytes().all(|b| b.is_ascii_uppercase() || b.is_ascii_digit());
        if !well_formed {
            return Err(ExchangeError::InvalidCode { input: input.to_string() });
        }
        Ok(Self(normalized))
    }

    /// The code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Draws a uniformly random code.
    fn random<R: Rng>(rng: &mut R) -> Self {
        let chars = (0..CODE_LEN)
            .map(|_| char::from(CODE_ALPHABET[rng.gen_range(0..CODE_ALPHABET.len())]))
            .collect();
        Self(chars)
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Code {
    type Error = ExchangeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Code> for String {
    fn from(code: Code) -> Self {
        code.0
    }
}

/// Issues one unique code per participant, in input order.
///
/// Code values are independent of input order; only the name→code pairing
/// follows it. Precondition (documented, not enforced): the roster is far
/// smaller than [`CODE_SPACE`], or sampling degenerates.
pub fn generate_unique_codes<R: Rng>(
    participants: &[Participant],
    rng: &mut R,
) -> BTreeMap<String, Code> {
    let mut used = std::collections::BTreeSet::new();
    let mut codes = BTreeMap::new();

    for participant in participants {
        let code = loop {
            let candidate = Code::random(rng);
            if used.insert(candidate.clone()) {
                break candidate;
            }
        };
        codes.insert(participant.name.clone(), code);
    }

    codes
}
