//! Exchange pipeline
//!
//! Orchestrates the matcher, code generator, and cipher into one run:
//!
//! ```text
//! roster ──> matcher ──> giver→giftee
//!                            │
//! codes  <── code generator  │
//!   │                        ▼
//!   └──> artifact[code] = encrypt(giftee, secret_key)
//! ```
//!
//! The three outputs together reconstruct the assignment; no single one
//! does. Persisting them is the storage collaborator's job; nothing here
//! touches a file, database, or network.

use std::collections::BTreeMap;

use rand::Rng;
use tracing::debug;

use crate::{
    code::{Code, generate_unique_codes},
    error::ExchangeError,
    matcher::{Assignment, assign_giftees},
    participant::{Participant, validate_roster},
    secret::SecretKey,
};

/// The distributable artifact: public code → sealed giftee name.
///
/// Serializes as a plain string map (JSON object, table rows, …) without
/// loss; ciphertexts are URL-safe base64 with no whitespace.
pub type Artifact = BTreeMap<Code, String>;

/// Participant name → public code, for telling each giver their own code.
///
/// Never exposed to giftee-lookup callers; [`resolve`] takes only a code.
pub type CodeTable = BTreeMap<String, Code>;

/// Everything one run produces.
///
/// Each concurrent run draws its own [`SecretKey`]; mixing keys or
/// artifacts across runs is a caller error the types do not prevent.
#[derive(Debug)]
pub struct Exchange {
    /// Code → ciphertext, safe to publish to the lookup service
    pub artifact: Artifact,
    /// Shared decryption key, distributed out-of-band
    pub secret_key: SecretKey,
    /// Name → code, held back by the distribution collaborator
    pub code_table: CodeTable,
}

/// Builds a complete exchange for `participants`.
///
/// Validates the roster, computes a constrained assignment, issues codes,
/// draws a fresh secret key, and seals each giftee name under the giver's
/// code. Pure computation apart from the injected RNG.
///
/// # Errors
///
/// - [`ExchangeError::InvalidRoster`] on empty names/groups or duplicates
/// - [`ExchangeError::AssignmentInfeasible`] when the matcher exhausts its
///   retry budget
pub fn build_exchange<R: Rng>(
    participants: &[Participant],
    rng: &mut R,
) -> Result<Exchange, ExchangeError> {
    validate_roster(participants)?;

    let assignment = assign_giftees(participants, rng)?;
    let code_table = generate_unique_codes(participants, rng);
    let secret_key = SecretKey::generate(rng);

    let mut artifact = Artifact::new();
    for (giver, giftee) in assignment.iter() {
        // Every giver got a code above; the matcher only emits roster names
        let Some(code) = code_table.get(giver) else {
            return Err(ExchangeError::InvalidRoster {
                reason: format!("assignment names unknown giver {giver:?}"),
            });
        };
        let ciphertext = giftwrap_crypto::encrypt(giftee, secret_key.expose());
        artifact.insert(code.clone(), ciphertext);
    }

    debug!(participants = participants.len(), entries = artifact.len(), "exchange built");
    Ok(Exchange { artifact, secret_key, code_table })
}

/// Resolves a participant-supplied code to their giftee's name.
///
/// Input is normalized the way lookup frontends send it (whitespace
/// trimmed, lowercase accepted).
///
/// # Errors
///
/// - [`ExchangeError::InvalidCode`] if the input is not a well-formed code
/// - [`ExchangeError::UnknownCode`] if the artifact has no such entry
/// - [`ExchangeError::Decryption`] if the entry does not decrypt under
///   `key`, surfaced as "wrong code or key", never as garbage text
pub fn resolve(code: &str, key: &str, artifact: &Artifact) -> Result<String, ExchangeError> {
    let code = Code::parse(code)?;
    let Some(ciphertext) = artifact.get(&code) else {
        return Err(ExchangeError::UnknownCode { code: code.to_string() });
    };
    Ok(giftwrap_crypto::decrypt(ciphertext, key)?)
}

/// Rebuilds the full giver→giftee assignment from the persisted pieces.
///
/// Operator-side inverse of [`build_exchange`], for auditing a run (pair
/// with [`Assignment::verify`]). Requires all three secrets of the run:
/// artifact, code table, and key.
///
/// # Errors
///
/// - [`ExchangeError::UnknownCode`] if the artifact holds a code the code
///   table does not
/// - [`ExchangeError::Decryption`] if any entry fails to decrypt
pub fn reconstruct_assignment(
    artifact: &Artifact,
    code_table: &CodeTable,
    key: &str,
) -> Result<Assignment, ExchangeError> {
    let name_by_code: BTreeMap<&Code, &str> =
        code_table.iter().map(|(name, code)| (code, name.as_str())).collect();

    let mut map = BTreeMap::new();
    for (code, ciphertext) in artifact {
        let Some(giver) = name_by_code.get(code) else {
            return Err(ExchangeError::UnknownCode { code: code.to_string() });
        };
        let giftee = giftwrap_crypto::decrypt(ciphertext, key)?;
        map.insert((*giver).to_string(), giftee);
    }

    Ok(Assignment::from_map(map))
}
