//! Giftwrap Exchange Core
//!
//! Assigns every member of a group a secret giftee under exclusion
//! constraints (never yourself, never your own subgroup) and seals each
//! assignment so it can be published as `{code: ciphertext}` and recovered
//! only with the run's shared key.
//!
//! # Pipeline
//!
//! ```text
//! roster ──> matcher ──> giver→giftee ──┐
//!               codes ──> name→code ────┤
//!          secret key ──────────────────┴──> artifact {code: ciphertext}
//! ```
//!
//! The artifact, the code table, and the secret key reconstruct the
//! assignment together; none of the three alone does. Everything here is
//! synchronous pure computation; ingestion, persistence, and notification
//! belong to collaborating crates, and all randomness is injected as
//! `&mut impl rand::Rng` so tests can seed it.
//!
//! # Example
//!
//! ```
//! use giftwrap_core::{Participant, build_exchange, resolve};
//!
//! let roster = vec![
//!     Participant::new("Alice", "House1"),
//!     Participant::new("Bob", "House1"),
//!     Participant::new("Carol", "House2"),
//!     Participant::new("Dave", "House2"),
//! ];
//! let exchange = build_exchange(&roster, &mut rand::thread_rng())?;
//!
//! let code = exchange.code_table["Alice"].as_str();
//! let giftee = resolve(code, exchange.secret_key.expose(), &exchange.artifact)?;
//! assert_ne!(giftee, "Alice");
//! # Ok::<(), giftwrap_core::ExchangeError>(())
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod code;
pub mod error;
pub mod exchange;
pub mod matcher;
pub mod participant;
pub mod secret;

pub use code::{CODE_ALPHABET, CODE_LEN, Code, generate_unique_codes};
pub use error::ExchangeError;
pub use exchange::{Artifact, CodeTable, Exchange, build_exchange, reconstruct_assignment, resolve};
pub use matcher::{Assignment, MAX_ATTEMPTS, assign_giftees};
pub use participant::{Participant, validate_roster};
pub use secret::{SECRET_KEY_LEN, SecretKey};
