//! Low-level scanning over PDF byte buffers.
//!
//! This module owns byte classification (whitespace, delimiters), the
//! whitespace-and-comment skipper, and the lexeme scanners the object
//! parser builds on: locating the end of a token, computing a
//! balanced-parenthesis prefix, validating `#xx` name escapes and
//! normalizing hex-literal content.
//!
//! # PDF whitespace
//!
//! PDF whitespace per the spec is NUL, TAB, LF, FF, CR and space; VT,
//! NEL (0x85) and NBSP (0xA0) are additionally accepted because real
//! producers emit them between tokens.

use nom::{
    IResult,
    bytes::complete::take_till,
    character::complete::char,
    combinator::value,
    sequence::preceded,
};

use crate::error::{Error, Result};

/// True for any byte the parser treats as whitespace between tokens.
pub fn is_whitespace(b: u8) -> bool {
    matches!(b, 0x00 | 0x09 | 0x0A | 0x0B | 0x0C | 0x0D | 0x20 | 0x85 | 0xA0)
}

/// Whitespace excluding the CR/LF line terminators.
///
/// Relaxed dictionary parsing needs to know whether a line ended between a
/// key and its value, so line terminators are classified separately.
fn is_whitespace_no_eol(b: u8) -> bool {
    matches!(b, 0x00 | 0x09 | 0x0B | 0x0C | 0x20 | 0x85 | 0xA0)
}

/// True for the PDF delimiter bytes `< > [ ] ( ) /`.
pub fn is_delimiter(b: u8) -> bool {
    matches!(b, b'<' | b'>' | b'[' | b']' | b'(' | b')' | b'/')
}

/// A `%` comment: everything up to (and excluding) the next CR or LF.
fn comment(input: &[u8]) -> IResult<&[u8], ()> {
    value((), preceded(char('%'), take_till(|c| c == b'\r' || c == b'\n')))(input)
}

/// Skip leading whitespace and `%`-comments.
///
/// Returns the remaining suffix and, in relaxed mode, whether at least one
/// line terminator was crossed before the first non-whitespace byte. In
/// strict mode (`relaxed = false`) the flag is always false.
///
/// Never fails; on whitespace-only input the returned suffix is empty.
pub fn skip_space(buf: &[u8], relaxed: bool) -> (&[u8], bool) {
    let mut s = buf;
    let mut eol = false;

    loop {
        if relaxed {
            while let Some(&b) = s.first() {
                if !is_whitespace_no_eol(b) {
                    break;
                }
                s = &s[1..];
            }
            if matches!(s.first(), Some(b'\n') | Some(b'\r')) {
                eol = true;
            }
        }

        while let Some(&b) = s.first() {
            if !is_whitespace(b) {
                break;
            }
            s = &s[1..];
        }

        // A solitary '%' as the very last byte is not a comment.
        if s.len() <= 1 || s[0] != b'%' {
            break;
        }

        match comment(s) {
            Ok((rest, ())) => s = rest,
            Err(_) => break,
        }
    }

    (s, eol)
}

/// Index of the first whitespace byte in `s`, or 0 if there is none.
///
/// The 0-for-none shape means "no delimiter — the whole remaining buffer
/// is one token"; callers disambiguate via the token length. Kept distinct
/// from [`next_whitespace_or_char`], whose callers need `None`.
pub fn next_whitespace(s: &[u8]) -> usize {
    s.iter().position(|&b| is_whitespace(b)).unwrap_or(0)
}

/// Index of the first byte that is whitespace or one of `chars`.
///
/// With an empty `chars` this defers to [`next_whitespace`] and therefore
/// yields `Some(0)` when nothing matches; with a non-empty `chars` a miss
/// is `None`.
pub fn next_whitespace_or_char(s: &[u8], chars: &[u8]) -> Option<usize> {
    if chars.is_empty() {
        return Some(next_whitespace(s));
    }
    s.iter().position(|&b| is_whitespace(b) || chars.contains(&b))
}

/// Index of the `)` closing the balanced-parenthesis prefix of `s`, or
/// `None` if the parentheses never balance. `s` must start with `(`.
///
/// A `\` makes the following byte depth-neutral whatever it is, which
/// handles `\(`, `\)` and `\\` without decoding them.
pub fn balanced_parentheses_prefix(s: &[u8]) -> Option<usize> {
    let mut depth = 0i64;
    let mut escaped = false;

    for (i, &c) in s.iter().enumerate() {
        if !escaped && c == b'\\' {
            escaped = true;
            continue;
        }
        if escaped {
            escaped = false;
            continue;
        }
        if c == b'(' {
            depth += 1;
        }
        if c == b')' {
            depth -= 1;
        }
        if depth == 0 {
            return Some(i);
        }
    }

    None
}

/// Validate the `#xx` escapes of a raw name: every `#` must be followed by
/// two hex digits. Bytes outside `#xx` sequences pass through unchecked.
pub fn validate_name_hex(s: &[u8]) -> Result<()> {
    let mut i = 0;
    while i < s.len() {
        if s[i] != b'#' {
            i += 1;
            continue;
        }
        // '#' detected, the next 2 bytes have to exist and be hex digits.
        if s.len() < i + 3 || !s[i + 1].is_ascii_hexdigit() || !s[i + 2].is_ascii_hexdigit() {
            return Err(Error::NameCorrupt);
        }
        i += 3;
    }
    Ok(())
}

/// Normalize raw hex-literal content: uppercase the digits, strip interior
/// whitespace, and pad an odd digit count with a trailing `'0'`.
///
/// Returns `None` when a byte is neither a hex digit nor whitespace.
pub fn normalize_hex(s: &[u8]) -> Option<String> {
    let mut out = String::with_capacity(s.len());

    for &c in s {
        if is_whitespace(c) {
            continue;
        }
        if !c.is_ascii_hexdigit() {
            return None;
        }
        out.push(c.to_ascii_uppercase() as char);
    }

    // If the final digit is missing, it shall be assumed to be 0.
    if out.len() % 2 != 0 {
        out.push('0');
    }

    Some(out)
}
