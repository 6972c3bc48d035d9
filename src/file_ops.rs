//! File encryption/decryption operations
//!
//! High-level operations the command-line tool is built on: read a phrase
//! or an envelope from a file, run it through [`crate::envelope`], and
//! write the result with owner-only permissions.

use crate::envelope;
use crate::error::{ErrorCategory, ErrorKind, Result, SeedboxError};
use crate::mnemonic;
use crate::passphrase::PassphraseReader;
use crate::strength::{self, Strength};
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use tracing::{debug, warn};
use zeroize::Zeroizing;

/// Encrypt the phrase in a file with a password
///
/// Reads the phrase from `input_path` (surrounding whitespace is trimmed),
/// encrypts it using a password from `passphrase_reader`, and writes the
/// envelope followed by a newline to `output_path`.
///
/// A phrase that is not 12, 15, 18, 21 or 24 alphabetic words is refused
/// unless `allow_nonstandard` is set, which stands for the user's explicit
/// confirmation.
///
/// The output file is created with mode 0o600 (read/write for owner only) on Unix systems.
pub fn encrypt_file(
    input_path: &Path,
    output_path: &Path,
    passphrase_reader: &mut dyn PassphraseReader,
    allow_nonstandard: bool,
) -> Result<()> {
    let phrase = read_text(input_path)?;
    let phrase = phrase.trim();

    if !mnemonic::is_valid_mnemonic_format(phrase) {
        if !allow_nonstandard {
            return Err(SeedboxError::invalid_input(format!(
                "{} does not look like a 12, 15, 18, 21 or 24 word recovery phrase \
                 (use --allow-nonstandard to encrypt it anyway)",
                input_path.display()
            )));
        }
        warn!(path = %input_path.display(), "encrypting a phrase of non-standard shape");
    }

    let password = passphrase_reader.read_passphrase()?;
    let report = strength::check(&password);
    if report.strength <= Strength::Weak {
        warn!(strength = %report.strength, "password is weak");
    }

    debug!(path = %input_path.display(), "deriving keys and encrypting");
    let envelope = envelope::encrypt_mnemonic(phrase, &password)
        .map_err(|e| e.with_context("encryption failed"))?;

    write_file_secure(output_path, format!("{}\n", envelope).as_bytes())
        .map_err(|e| e.with_context(format!("failed to write to {}", output_path.display())))?;
    debug!(path = %output_path.display(), "wrote envelope");

    Ok(())
}

/// Decrypt an envelope file with a password
///
/// Reads the envelope from `input_path` (surrounding whitespace is trimmed),
/// decrypts it using a password from `passphrase_reader`, and writes the
/// phrase followed by a newline to `output_path`.
///
/// Any decryption failure is reported as the same `DecryptionFailed` error.
///
/// The output file is created with mode 0o600 (read/write for owner only) on Unix systems.
pub fn decrypt_file(
    input_path: &Path,
    output_path: &Path,
    passphrase_reader: &mut dyn PassphraseReader,
) -> Result<()> {
    let armored = read_text(input_path)?;
    let password = passphrase_reader.read_passphrase()?;

    debug!(path = %input_path.display(), "deriving keys and decrypting");
    let phrase = envelope::decrypt_mnemonic(armored.trim(), &password)?;

    let contents = Zeroizing::new(format!("{}\n", phrase.as_str()));
    write_file_secure(output_path, contents.as_bytes())
        .map_err(|e| e.with_context(format!("failed to write to {}", output_path.display())))?;
    debug!(path = %output_path.display(), "wrote phrase");

    Ok(())
}

/// Check whether the phrase in a file has a standard shape
pub fn check_file(input_path: &Path) -> Result<bool> {
    let phrase = read_text(input_path)?;
    Ok(mnemonic::is_valid_mnemonic_format(&phrase))
}

fn read_text(path: &Path) -> Result<Zeroizing<String>> {
    let bytes = fs::read(path).map_err(|e| read_error(path, e))?;
    let text = String::from_utf8(bytes).map_err(|e| {
        SeedboxError::with_kind_and_source(
            ErrorCategory::User,
            ErrorKind::Io,
            format!("{} is not valid UTF-8", path.display()),
            e.utf8_error(),
        )
    })?;
    Ok(Zeroizing::new(text))
}

/// Write file with secure permissions (0o600 on Unix)
fn write_file_secure(path: &Path, contents: &[u8]) -> Result<()> {
    #[cfg(unix)]
    {
        use std::fs::OpenOptions;
        use std::os::unix::fs::OpenOptionsExt;

        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .mode(0o600)
            .open(path)
            .map_err(|e| {
                SeedboxError::with_kind_and_source(
                    ErrorCategory::User,
                    ErrorKind::Io,
                    format!("failed to open {}", path.display()),
                    e,
                )
            })?;

        file.write_all(contents).map_err(|e| {
            SeedboxError::with_kind_and_source(
                ErrorCategory::Internal,
                ErrorKind::Io,
                format!("failed to write {}", path.display()),
                e,
            )
        })?;
        Ok(())
    }

    #[cfg(not(unix))]
    {
        fs::write(path, contents).map_err(|e| {
            SeedboxError::with_kind_and_source(
                ErrorCategory::User,
                ErrorKind::Io,
                format!("failed to write {}", path.display()),
                e,
            )
        })?;
        Ok(())
    }
}

fn read_error(path: &Path, err: io::Error) -> SeedboxError {
    let category = if err.kind() == io::ErrorKind::NotFound {
        ErrorCategory::User
    } else {
        ErrorCategory::Internal
    };
    SeedboxError::with_kind_and_source(
        category,
        ErrorKind::Io,
        format!("failed to read from {}", path.display()),
        err,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::passphrase::ConstantPassphraseReader;
    use std::fs;
    use tempfile::TempDir;

    #[cfg(unix)]
    use std::os::unix::fs::PermissionsExt;

    const PHRASE: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

    #[test]
    fn test_encrypt_decrypt_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let plain_path = temp_dir.path().join("phrase.txt");
        let crypt_path = temp_dir.path().join("phrase.seedbox");
        let decrypted_path = temp_dir.path().join("decrypted.txt");

        fs::write(&plain_path, format!("  {}\n", PHRASE)).unwrap();

        let mut reader = ConstantPassphraseReader::new("testpass123");
        encrypt_file(&plain_path, &crypt_path, &mut reader, false).unwrap();
        assert!(crypt_path.exists());

        let mut reader = ConstantPassphraseReader::new("testpass123");
        decrypt_file(&crypt_path, &decrypted_path, &mut reader).unwrap();
        let decrypted = fs::read_to_string(&decrypted_path).unwrap();
        assert_eq!(decrypted, format!("{}\n", PHRASE));
    }

    #[test]
    fn test_nonstandard_phrase_requires_confirmation() {
        let temp_dir = TempDir::new().unwrap();
        let plain_path = temp_dir.path().join("phrase.txt");
        let crypt_path = temp_dir.path().join("phrase.seedbox");

        fs::write(&plain_path, "only three words").unwrap();

        let mut reader = ConstantPassphraseReader::new("testpass123");
        let err = encrypt_file(&plain_path, &crypt_path, &mut reader, false)
            .expect_err("expected non-standard phrase to be refused");
        assert_eq!(err.kind, Some(ErrorKind::InvalidInput));
        assert!(!crypt_path.exists());

        let mut reader = ConstantPassphraseReader::new("testpass123");
        encrypt_file(&plain_path, &crypt_path, &mut reader, true).unwrap();
        assert!(crypt_path.exists());
    }

    #[test]
    fn test_short_password_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let plain_path = temp_dir.path().join("phrase.txt");
        let crypt_path = temp_dir.path().join("phrase.seedbox");

        fs::write(&plain_path, PHRASE).unwrap();

        let mut reader = ConstantPassphraseReader::new("short");
        let err = encrypt_file(&plain_path, &crypt_path, &mut reader, false)
            .expect_err("expected short password to be rejected");
        assert_eq!(err.kind, Some(ErrorKind::InvalidInput));
        assert_eq!(err.to_string(), "encryption failed");
    }

    #[test]
    fn test_decrypt_wrong_password() {
        let temp_dir = TempDir::new().unwrap();
        let plain_path = temp_dir.path().join("phrase.txt");
        let crypt_path = temp_dir.path().join("phrase.seedbox");
        let decrypted_path = temp_dir.path().join("decrypted.txt");

        fs::write(&plain_path, PHRASE).unwrap();

        let mut reader = ConstantPassphraseReader::new("testpass123");
        encrypt_file(&plain_path, &crypt_path, &mut reader, false).unwrap();

        let mut reader = ConstantPassphraseReader::new("wrongpassword123");
        let err = decrypt_file(&crypt_path, &decrypted_path, &mut reader)
            .expect_err("expected decryption failure");

        assert_eq!(err.kind, Some(ErrorKind::DecryptionFailed));
        assert_eq!(err.to_string(), "decryption failed, check password and input");
        assert!(!decrypted_path.exists());
    }

    #[test]
    fn test_decrypt_garbage_looks_like_wrong_password() {
        let temp_dir = TempDir::new().unwrap();
        let crypt_path = temp_dir.path().join("garbage.seedbox");
        let decrypted_path = temp_dir.path().join("decrypted.txt");

        fs::write(&crypt_path, "definitely not an envelope").unwrap();

        let mut reader = ConstantPassphraseReader::new("testpass123");
        let err = decrypt_file(&crypt_path, &decrypted_path, &mut reader)
            .expect_err("expected decryption failure");

        assert_eq!(err.kind, Some(ErrorKind::DecryptionFailed));
        assert_eq!(err.to_string(), "decryption failed, check password and input");
    }

    #[test]
    #[cfg(unix)]
    fn test_file_permissions() {
        let temp_dir = TempDir::new().unwrap();
        let plain_path = temp_dir.path().join("phrase.txt");
        let crypt_path = temp_dir.path().join("phrase.seedbox");
        let decrypted_path = temp_dir.path().join("decrypted.txt");

        fs::write(&plain_path, PHRASE).unwrap();

        let mut reader = ConstantPassphraseReader::new("testpass123");
        encrypt_file(&plain_path, &crypt_path, &mut reader, false).unwrap();
        let mut reader = ConstantPassphraseReader::new("testpass123");
        decrypt_file(&crypt_path, &decrypted_path, &mut reader).unwrap();

        for path in [&crypt_path, &decrypted_path] {
            let permissions = fs::metadata(path).unwrap().permissions();
            assert_eq!(permissions.mode() & 0o777, 0o600);
        }
    }

    #[test]
    fn test_missing_input_is_user_error() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing.txt");
        let output = temp_dir.path().join("out.seedbox");

        let mut reader = ConstantPassphraseReader::new("testpass123");
        let err = encrypt_file(&missing, &output, &mut reader, false).unwrap_err();
        assert_eq!(err.kind, Some(ErrorKind::Io));
        assert_eq!(err.category, ErrorCategory::User);
    }

    #[test]
    fn test_check_file() {
        let temp_dir = TempDir::new().unwrap();
        let good = temp_dir.path().join("good.txt");
        let bad = temp_dir.path().join("bad.txt");

        fs::write(&good, format!("{}\n", PHRASE)).unwrap();
        fs::write(&bad, "abandon 1 about").unwrap();

        assert!(check_file(&good).unwrap());
        assert!(!check_file(&bad).unwrap());
    }
}
