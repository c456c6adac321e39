//! Error types for cipher operations

use thiserror::Error;

/// Errors from decrypting a sealed assignment.
///
/// Encryption is infallible; both variants here indicate a ciphertext/key
/// pair that cannot be reversed into a valid plaintext.
#[derive(Debug, Error)]
pub enum CipherError {
    /// Ciphertext is not valid URL-safe base64
    #[error("ciphertext is not valid url-safe base64: {0}")]
    InvalidEncoding(#[from] base64::DecodeError),

    /// XOR of ciphertext and keystream is not valid UTF-8.
    /// The usual cause is decrypting with the wrong key.
    #[error("decrypted bytes are not valid utf-8 (wrong code or key)")]
    MalformedPlaintext(#[from] std::string::FromUtf8Error),
}
