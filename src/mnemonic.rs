//! Advisory shape check for recovery phrases
//!
//! Only word count and alphabet are checked; there is no wordlist or
//! checksum validation. Nothing on the decrypt path calls this.

/// Word counts of standard recovery phrases
pub const VALID_WORD_COUNTS: [usize; 5] = [12, 15, 18, 21, 24];

/// Returns true if `text` looks like a recovery phrase: 12, 15, 18, 21 or 24
/// whitespace-separated words made only of ASCII letters.
pub fn is_valid_mnemonic_format(text: &str) -> bool {
    let words: Vec<&str> = text.split_whitespace().collect();

    VALID_WORD_COUNTS.contains(&words.len())
        && words
            .iter()
            .all(|word| word.chars().all(|c| c.is_ascii_alphabetic()))
}
