//! Outer key derivation: PBKDF2-HMAC-SHA256 from the user's password
//!
//! The iteration count is not stored in the envelope. Every envelope ever
//! issued assumes [`PBKDF2_ITERATIONS`]; changing it is a format break.

use pbkdf2::pbkdf2_hmac;
use rand::RngCore;
use rand::rngs::OsRng;
use sha2::Sha256;
use zeroize::Zeroizing;

use crate::error::{ErrorCategory, ErrorKind, Result, SeedboxError};

/// PBKDF2 rounds shared by all clients of the format.
pub const PBKDF2_ITERATIONS: u32 = 10_000;

/// Length of the outer salt in bytes
pub const SALT_LEN: usize = 16;

/// Length of the derived key in bytes
pub const KEY_LEN: usize = 32;

/// Generate a fresh `N`-byte salt from the operating system RNG.
///
/// Both layers draw their salts here: `N` is [`SALT_LEN`] for the outer
/// layer and [`crate::legacykdf::SALT_LEN`] for the inner one.
pub fn generate_salt<const N: usize>() -> Result<[u8; N]> {
    let mut salt = [0u8; N];
    OsRng.try_fill_bytes(&mut salt).map_err(|e| {
        SeedboxError::with_kind_and_source(
            ErrorCategory::Internal,
            ErrorKind::RandomSource,
            format!("failed to generate salt: {}", e),
            e,
        )
    })?;
    Ok(salt)
}

/// Derive the 32-byte outer key for `password` and `salt`.
pub fn derive_key(password: &str, salt: &[u8; SALT_LEN]) -> Zeroizing<[u8; KEY_LEN]> {
    let mut key = Zeroizing::new([0u8; KEY_LEN]);
    pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, PBKDF2_ITERATIONS, &mut *key);
    key
}

/// Derive the outer key and return its lowercase hex text.
///
/// The inner layer is keyed by these 64 ASCII characters, not by the raw
/// key bytes.
pub fn derive_key_string(password: &str, salt: &[u8; SALT_LEN]) -> Zeroizing<String> {
    let key = derive_key(password, salt);
    Zeroizing::new(hex::encode(*key))
}
