//! XOR stream cipher with URL-safe base64 transport encoding
//!
//! Each call derives a fresh keystream of exactly the payload length from
//! the key (see [`crate::keystream`]), so encrypt and decrypt are the same
//! XOR with an encoding step on either side.
//!
//! No integrity tag is attached. A tampered ciphertext either fails UTF-8
//! decoding or silently decrypts to a different name; callers that need
//! tamper evidence must layer it on top.

use base64::{Engine as _, engine::general_purpose::URL_SAFE};

use crate::{error::CipherError, keystream::generate_keystream};

/// Encrypt `plaintext` under `key`.
///
/// Returns the URL-safe base64 encoding (alphabet `A–Z a–z 0–9 - _`, with
/// `=` padding, no whitespace) of the plaintext XOR keystream.
pub fn encrypt(plaintext: &str, key: &str) -> String {
    let mut bytes = plaintext.as_bytes().to_vec();
    xor_in_place(&mut bytes, key);
    URL_SAFE.encode(bytes)
}

/// Decrypt a ciphertext produced by [`encrypt`] under the same `key`.
///
/// # Errors
///
/// - [`CipherError::InvalidEncoding`] if the input is not valid URL-safe
///   base64
/// - [`CipherError::MalformedPlaintext`] if the XOR result is not UTF-8,
///   which is the expected failure mode under a wrong key
pub fn decrypt(ciphertext: &str, key: &str) -> Result<String, CipherError> {
    let mut bytes = URL_SAFE.decode(ciphertext)?;
    xor_in_place(&mut bytes, key);
    Ok(String::from_utf8(bytes)?)
}

/// XOR `bytes` with a keystream of matching length derived from `key`.
fn xor_in_place(bytes: &mut [u8], key: &str) {
    let keystream = generate_keystream(key, bytes.len());
    for (byte, pad) in bytes.iter_mut().zip(keystream) {
        *byte ^= pad;
    }
}
