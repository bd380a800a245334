/// True for bytes that survive normalization: ASCII letters and digits.
/// Matches C-locale `isalnum()`; bytes >= 0x80 are never word content.
#[inline]
pub fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric()
}

/// Normalize a raw token: drop every byte that is not an ASCII letter or
/// digit and lowercase the rest. Returns `None` when nothing is left, so
/// tokens like `"--"` or `"!!!"` never reach a word set.
///
/// This is the only definition of "same word" in the crate.
pub fn normalize(token: &[u8]) -> Option<String> {
    let mut word = String::with_capacity(token.len());
    for &b in token {
        if is_word_byte(b) {
            word.push(b.to_ascii_lowercase() as char);
        }
    }
    if word.is_empty() { None } else { Some(word) }
}
