//! Per-run secret key material

use std::fmt;

use rand::{Rng, distributions::Alphanumeric};
use zeroize::Zeroize;

/// Characters drawn for a fresh key. 24 alphanumerics ≈ 143 bits, well above
/// the 16 bytes of entropy the scheme calls for.
pub const SECRET_KEY_LEN: usize = 24;

/// The shared secret for one exchange run.
///
/// Generated once per run from the injected RNG and handed to participants
/// out-of-band; the same string must come back verbatim for decryption.
/// Must outlive every resolve operation against the run's artifact.
///
/// The key is wiped from memory on drop, and `Debug` redacts it so a stray
/// log line cannot leak a run.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretKey(String);

impl SecretKey {
    /// Draws a fresh key from `rng`.
    ///
    /// Production callers must pass a cryptographically secure RNG
    /// (`rand::thread_rng()`); seeded RNGs are for tests only.
    pub fn generate<R: Rng>(rng: &mut R) -> Self {
        let key = rng.sample_iter(&Alphanumeric).take(SECRET_KEY_LEN).map(char::from).collect();
        Self(key)
    }

    /// Wraps an externally supplied key, e.g. one read back from storage.
    pub fn from_string(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// The key material, for encryption and out-of-band distribution.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretKey(..)")
    }
}

// Wipe key material when the run handle is dropped
impl Drop for SecretKey {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}
