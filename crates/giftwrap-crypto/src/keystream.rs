//! Keystream derivation via SHA-256 in counter mode

use sha2::{Digest, Sha256};

/// SHA-256 digest length in bytes.
const DIGEST_LEN: usize = 32;

/// Derive a pseudorandom keystream of exactly `length` bytes from `key`.
///
/// Hashes `UTF8(key) || big_endian_u32(counter)` for counter = 0, 1, …,
/// concatenating digests until `length` bytes are available, then truncates.
///
/// # Properties
///
/// - Deterministic: same `(key, length)` always yields the same bytes
/// - Prefix-stable: `generate_keystream(k, n)` is a prefix of
///   `generate_keystream(k, n + m)` for any `m`
///
/// Counter wrap beyond 2^32 blocks (128 GiB of keystream) is out of scope
/// for the name-sized payloads this crate seals.
pub fn generate_keystream(key: &str, length: usize) -> Vec<u8> {
    let mut keystream = Vec::with_capacity(length.next_multiple_of(DIGEST_LEN));
    let mut counter: u32 = 0;

    while keystream.len() < length {
        let mut hasher = Sha256::new();
        hasher.update(key.as_bytes());
        hasher.update(counter.to_be_bytes());
        keystream.extend_from_slice(&hasher.finalize());
        counter = counter.wrapping_add(1);
    }

    keystream.truncate(length);
    keystream
}
