use std::iter::FusedIterator;

/// Whitespace lookup table for token boundary detection.
/// Uses the C locale `isspace()` set: space, tab, newline, CR, form feed, vertical tab.
const fn make_ws_table() -> [bool; 256] {
    let mut t = [false; 256];
    t[0x09] = true; // \t  horizontal tab
    t[0x0A] = true; // \n  newline
    t[0x0B] = true; // \v  vertical tab
    t[0x0C] = true; // \f  form feed
    t[0x0D] = true; // \r  carriage return
    t[0x20] = true; //     space
    t
}

/// Precomputed whitespace lookup: `WS_TABLE[byte]` is true if whitespace.
const WS_TABLE: [bool; 256] = make_ws_table();

/// True if `b` separates tokens. Also the delimiter used for boundary extension.
#[inline]
pub fn is_whitespace(b: u8) -> bool {
    WS_TABLE[b as usize]
}

/// Lazy iterator over the whitespace-delimited raw tokens of a buffer.
///
/// A clone resumes from the same position, so cloning before the first
/// `next()` gives a replayable copy of the whole sequence.
#[derive(Debug, Clone)]
pub struct Tokens<'a> {
    rest: &'a [u8],
}

impl<'a> Iterator for Tokens<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<&'a [u8]> {
        let Some(start) = self.rest.iter().position(|&b| !is_whitespace(b)) else {
            self.rest = &[];
            return None;
        };
        let rest = &self.rest[start..];
        let end = rest
            .iter()
            .position(|&b| is_whitespace(b))
            .unwrap_or(rest.len());
        let (token, tail) = rest.split_at(end);
        self.rest = tail;
        Some(token)
    }
}

impl FusedIterator for Tokens<'_> {}

/// Split `data` on runs of whitespace. Empty tokens are never produced.
#[inline]
pub fn tokens(data: &[u8]) -> Tokens<'_> {
    Tokens { rest: data }
}
