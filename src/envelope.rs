//! Two-layer password envelope for recovery phrases
//!
//! ```text
//! envelope   := base64( hex(outer_salt[16]) ":" inner )
//! inner      := base64( "Salted__" inner_salt[8] ciphertext )
//! ciphertext := AES-256-CBC(PKCS7(phrase), EVP_BytesToKey-MD5(key_string, inner_salt))
//! key_string := hex( PBKDF2-HMAC-SHA256(password, outer_salt, 10000, 32) )
//! ```
//!
//! Base64 is the standard alphabet with padding and hex is lowercase. The
//! format is byte-compatible with the desktop and mobile clients, which is
//! why the key string (and not the raw key) keys the inner layer.
//!
//! The format is not authenticated. Padding and UTF-8 checks reject most
//! wrong passwords and corruptions but are not an integrity guarantee.

use base64::{Engine, engine::general_purpose::STANDARD};
use zeroize::Zeroizing;

use crate::error::{DecryptionFailed, Result, SeedboxError};
use crate::legacykdf;
use crate::pbkdf::{self, SALT_LEN};
use crate::salted;

/// Minimum password length, in characters, accepted for encryption
pub const MIN_PASSWORD_CHARS: usize = 8;

/// Separator between the hex outer salt and the inner envelope
const SEPARATOR: char = ':';

/// Encrypt a phrase under a password, returning the portable envelope text.
///
/// Fails with an `InvalidInput` error, before any cryptographic work, when
/// the phrase is empty or whitespace-only or the password is shorter than
/// [`MIN_PASSWORD_CHARS`]. The phrase itself is encrypted verbatim.
pub fn encrypt_mnemonic(plaintext: &str, password: &str) -> Result<String> {
    validate_inputs(plaintext, password)?;

    let outer_salt = pbkdf::generate_salt::<SALT_LEN>()?;
    let key_string = pbkdf::derive_key_string(password, &outer_salt);
    let inner = salted::encrypt(plaintext, &key_string)?;

    Ok(wrap(&outer_salt, &inner))
}

/// Encrypt a phrase using the provided outer and inner salts.
///
/// This function is ONLY for testing purposes to generate deterministic output.
/// NEVER use this in production - always use `encrypt_mnemonic()` which
/// generates fresh random salts.
pub fn encrypt_with_salts(
    plaintext: &str,
    password: &str,
    outer_salt: &[u8; SALT_LEN],
    inner_salt: &[u8; legacykdf::SALT_LEN],
) -> Result<String> {
    validate_inputs(plaintext, password)?;

    let key_string = pbkdf::derive_key_string(password, outer_salt);
    let inner = salted::encrypt_with_salt(plaintext, &key_string, inner_salt);

    Ok(wrap(outer_salt, &inner))
}

/// Decrypt an envelope produced by any client of the format.
///
/// Never panics on malformed input. Every failure, whether a wrong
/// password, a corrupted envelope or text that was never an envelope,
/// yields the same [`DecryptionFailed`].
pub fn decrypt_mnemonic(
    envelope: &str,
    password: &str,
) -> std::result::Result<Zeroizing<String>, DecryptionFailed> {
    if envelope.is_empty() || password.is_empty() {
        return Err(DecryptionFailed);
    }

    let combined = Zeroizing::new(STANDARD.decode(envelope).map_err(|_| DecryptionFailed)?);
    let combined = std::str::from_utf8(&combined).map_err(|_| DecryptionFailed)?;

    let mut parts = combined.split(SEPARATOR);
    let (salt_hex, inner) = match (parts.next(), parts.next(), parts.next()) {
        (Some(salt_hex), Some(inner), None) => (salt_hex, inner),
        _ => return Err(DecryptionFailed),
    };

    let mut outer_salt = [0u8; SALT_LEN];
    hex::decode_to_slice(salt_hex, &mut outer_salt).map_err(|_| DecryptionFailed)?;

    let key_string = pbkdf::derive_key_string(password, &outer_salt);
    let plaintext = salted::decrypt(inner, &key_string)?;

    // An empty recovered phrase is never a valid result of encryption.
    if plaintext.is_empty() {
        return Err(DecryptionFailed);
    }

    Ok(plaintext)
}

fn validate_inputs(plaintext: &str, password: &str) -> Result<()> {
    if plaintext.trim().is_empty() {
        return Err(SeedboxError::invalid_input("mnemonic cannot be empty"));
    }
    if password.chars().count() < MIN_PASSWORD_CHARS {
        return Err(SeedboxError::invalid_input(format!(
            "password must be at least {} characters",
            MIN_PASSWORD_CHARS
        )));
    }
    Ok(())
}

fn wrap(outer_salt: &[u8; SALT_LEN], inner: &str) -> String {
    let combined = format!("{}{}{}", hex::encode(outer_salt), SEPARATOR, inner);
    STANDARD.encode(combined)
}
