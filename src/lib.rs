//! Seedbox - password-based encryption of recovery phrases
//!
//! Produces the two-layer text envelope (PBKDF2-HMAC-SHA256 over an
//! OpenSSL-style `Salted__` AES-256-CBC blob) shared by the desktop and
//! mobile clients, so an envelope made by any of them opens in any other.

#![forbid(unsafe_code)]

pub mod aescbc;
pub mod envelope;
pub mod error;
pub mod file_ops;
pub mod legacykdf;
pub mod mnemonic;
pub mod passphrase;
pub mod pbkdf;
pub mod salted;
pub mod strength;

pub use envelope::{decrypt_mnemonic, encrypt_mnemonic};
pub use error::{DecryptionFailed, SeedboxError};
pub use mnemonic::is_valid_mnemonic_format;
