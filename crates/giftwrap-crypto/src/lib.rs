//! Giftwrap Cipher Primitives
//!
//! Keystream derivation and the XOR stream cipher used to seal gift-exchange
//! assignments. Pure functions with deterministic outputs; no randomness and
//! no I/O live in this crate.
//!
//! # Scheme
//!
//! ```text
//! Secret Key ──┐
//!              ▼
//! SHA-256 counter mode → Keystream (exactly plaintext length)
//!              │
//!              ▼
//! Plaintext XOR Keystream → URL-safe base64 → Ciphertext string
//! ```
//!
//! A lookup service stores only `{code: ciphertext}`; recovering a giftee
//! name requires both an entry and the run's secret key.
//!
//! # Security
//!
//! This construction hides assignments from casual inspection of the stored
//! artifact. It is NOT a general-purpose cipher:
//!
//! - No integrity or authentication: flipping a ciphertext bit flips the
//!   matching plaintext bit undetected
//! - Keystream reuse across entries of one run is accepted by design; keys
//!   must be fresh per run
//! - Decrypting under the wrong key usually yields invalid UTF-8, which is
//!   surfaced as an error rather than garbage text

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod cipher;
pub mod error;
pub mod keystream;

pub use cipher::{decrypt, encrypt};
pub use error::CipherError;
pub use keystream::generate_keystream;
