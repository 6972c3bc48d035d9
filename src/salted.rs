//! OpenSSL-compatible `Salted__` envelope
//!
//! The binary layout, base64-encoded with the standard alphabet and padding:
//! - magic: the 8 ASCII bytes `Salted__`
//! - salt: 8 bytes
//! - ciphertext: AES-256-CBC, PKCS#7-padded, keyed via [`legacykdf`]

use base64::{Engine, engine::general_purpose::STANDARD};
use zeroize::Zeroizing;

use crate::aescbc;
use crate::error::{DecryptionFailed, Result};
use crate::legacykdf::{self, SALT_LEN};
use crate::pbkdf;

/// Marker that opens every inner envelope
pub const SALTED_MAGIC: &[u8; 8] = b"Salted__";

/// Shortest decoded input that still holds the magic and the salt
const HEADER_LEN: usize = SALTED_MAGIC.len() + SALT_LEN;

/// Encrypt `plaintext` under `password` with a fresh random salt.
pub fn encrypt(plaintext: &str, password: &str) -> Result<String> {
    let salt = pbkdf::generate_salt::<SALT_LEN>()?;
    Ok(encrypt_with_salt(plaintext, password, &salt))
}

/// Encrypt `plaintext` under `password` using the provided salt.
///
/// This function is ONLY for testing purposes to generate deterministic output.
/// NEVER use this in production - always use `encrypt()` which generates a random salt.
pub fn encrypt_with_salt(plaintext: &str, password: &str, salt: &[u8; SALT_LEN]) -> String {
    let (key, iv) = legacykdf::derive(password.as_bytes(), salt);
    let ciphertext = aescbc::encrypt(plaintext.as_bytes(), &key, &iv);

    let mut output = Vec::with_capacity(HEADER_LEN + ciphertext.len());
    output.extend_from_slice(SALTED_MAGIC);
    output.extend_from_slice(salt);
    output.extend_from_slice(&ciphertext);

    STANDARD.encode(output)
}

/// Decrypt a `Salted__` envelope.
///
/// Every failure, whatever the step, is the same [`DecryptionFailed`].
pub fn decrypt(
    envelope: &str,
    password: &str,
) -> std::result::Result<Zeroizing<String>, DecryptionFailed> {
    let raw = STANDARD.decode(envelope).map_err(|_| DecryptionFailed)?;
    if raw.len() < HEADER_LEN || !raw.starts_with(SALTED_MAGIC) {
        return Err(DecryptionFailed);
    }

    let salt: [u8; SALT_LEN] = raw[SALTED_MAGIC.len()..HEADER_LEN]
        .try_into()
        .map_err(|_| DecryptionFailed)?;
    let ciphertext = &raw[HEADER_LEN..];

    let (key, iv) = legacykdf::derive(password.as_bytes(), &salt);
    let plaintext = aescbc::decrypt(ciphertext, &key, &iv)?;
    let plaintext = String::from_utf8(plaintext).map_err(|e| {
        let mut bytes = e.into_bytes();
        zeroize::Zeroize::zeroize(&mut bytes);
        DecryptionFailed
    })?;

    Ok(Zeroizing::new(plaintext))
}
