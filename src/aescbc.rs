//! AES-256-CBC with PKCS#7 padding
//!
//! There is no authentication tag. A decrypt that yields valid padding is
//! not proof that the ciphertext is authentic, only that the last block
//! happened to unpad cleanly.

use aes::Aes256;
use aes::cipher::block_padding::Pkcs7;
use aes::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};

use crate::error::DecryptionFailed;

/// Length of the AES-256 key in bytes
pub const KEY_LEN: usize = 32;

/// Length of the CBC initialization vector (one AES block) in bytes
pub const IV_LEN: usize = 16;

type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;

/// Pad `plaintext` to a 16-byte boundary and encrypt it.
///
/// Output length is always a non-zero multiple of 16; block-aligned input
/// gains a full block of padding.
pub fn encrypt(plaintext: &[u8], key: &[u8; KEY_LEN], iv: &[u8; IV_LEN]) -> Vec<u8> {
    Aes256CbcEnc::new(&(*key).into(), &(*iv).into()).encrypt_padded_vec_mut::<Pkcs7>(plaintext)
}

/// Decrypt `ciphertext` and strip its PKCS#7 padding.
///
/// Input that is empty, not block-aligned, or whose padding does not
/// validate fails with [`DecryptionFailed`].
pub fn decrypt(
    ciphertext: &[u8],
    key: &[u8; KEY_LEN],
    iv: &[u8; IV_LEN],
) -> Result<Vec<u8>, DecryptionFailed> {
    if ciphertext.is_empty() || ciphertext.len() % IV_LEN != 0 {
        return Err(DecryptionFailed);
    }
    Aes256CbcDec::new(&(*key).into(), &(*iv).into())
        .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
        .map_err(|_| DecryptionFailed)
}
