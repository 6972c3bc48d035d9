//! OpenSSL `EVP_BytesToKey`-style key and IV derivation (MD5, one round)
//!
//! This is the derivation behind the `Salted__` format produced by
//! `openssl enc` without `-pbkdf2` and by CryptoJS's passphrase mode. MD5
//! and a single hash per block are weak; the routine is kept bit-for-bit
//! because every deployed peer derives the inner key this way. Swapping in
//! anything else requires a new envelope format.
//!
//! Callers must never feed a user password here directly. The envelope
//! layer only passes the hex form of a PBKDF2 output.

use md5::{Digest, Md5};
use zeroize::Zeroizing;

use crate::aescbc::{IV_LEN, KEY_LEN};

/// Length of the salt the derivation expects in bytes
pub const SALT_LEN: usize = 8;

/// Derive an AES-256 key and CBC IV from `password` and `salt`.
///
/// `block[0] = MD5(password || salt)`, `block[i] = MD5(block[i-1] || password || salt)`,
/// concatenated until 48 bytes are available. The key is the first 32 bytes
/// and the IV the following 16.
pub fn derive(
    password: &[u8],
    salt: &[u8; SALT_LEN],
) -> (Zeroizing<[u8; KEY_LEN]>, Zeroizing<[u8; IV_LEN]>) {
    let mut material = Zeroizing::new(Vec::with_capacity(KEY_LEN + IV_LEN + 16));
    let mut block: Option<md5::digest::Output<Md5>> = None;

    while material.len() < KEY_LEN + IV_LEN {
        let mut hasher = Md5::new();
        if let Some(prev) = &block {
            hasher.update(prev);
        }
        hasher.update(password);
        hasher.update(salt);
        let digest = hasher.finalize();
        material.extend_from_slice(&digest);
        block = Some(digest);
    }

    let mut key = Zeroizing::new([0u8; KEY_LEN]);
    let mut iv = Zeroizing::new([0u8; IV_LEN]);
    key.copy_from_slice(&material[..KEY_LEN]);
    iv.copy_from_slice(&material[KEY_LEN..KEY_LEN + IV_LEN]);
    (key, iv)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_openssl() {
        // openssl enc -aes-256-cbc -md md5 -P -S 0001020304050607 -pass pass:password
        let salt = [0u8, 1, 2, 3, 4, 5, 6, 7];
        let (key, iv) = derive(b"password", &salt);

        assert_eq!(
            hex::encode(*key),
            "b03096345e805d3aa4392d2e72791dfb13e12d3f61094a3fc347ace86b99ada6"
        );
        assert_eq!(hex::encode(*iv), "acde38b46073eef81840283e44a4b22a");
    }

    #[test]
    fn test_first_block_is_md5_of_password_and_salt() {
        let salt = [9u8; SALT_LEN];
        let (key, _) = derive(b"key string", &salt);

        let mut hasher = Md5::new();
        hasher.update(b"key string");
        hasher.update(salt);
        assert_eq!(&key[..16], hasher.finalize().as_slice());
    }

    #[test]
    fn test_salt_changes_output() {
        let (key1, iv1) = derive(b"same", &[1u8; SALT_LEN]);
        let (key2, iv2) = derive(b"same", &[2u8; SALT_LEN]);
        assert_ne!(*key1, *key2);
        assert_ne!(*iv1, *iv2);
    }

    #[test]
    fn test_empty_password_is_still_deterministic() {
        let salt = [0u8; SALT_LEN];
        assert_eq!(*derive(b"", &salt).0, *derive(b"", &salt).0);
    }
}
