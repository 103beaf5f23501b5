//! Recursive-descent PDF object parser.
//!
//! All productions share one cursor: a mutable reference to a byte slice
//! that always designates a suffix of the original buffer. On success a
//! production replaces the cursor with the suffix starting at the first
//! unconsumed byte; after a failure the cursor is unspecified and must not
//! be reused.
//!
//! # Architecture
//!
//! [`parse_object`] skips leading whitespace, dispatches on the first
//! byte, and recurses through arrays and dictionaries. The grammar is
//! mildly ambiguous: `3 0 R` is one indirect reference while `3 0` is two
//! integers, so the numeric production looks ahead across up to three
//! tokens and falls back to the "short remainder" (the suffix right after
//! the first token) whenever disambiguation fails.
//!
//! # Tolerance
//!
//! Real-world producers get the syntax slightly wrong in recurring ways.
//! The parser repairs zero-prefixed numerics, retries dictionaries in a
//! relaxed mode that accepts a key terminated by a line break as having an
//! empty string value, and resolves duplicate dictionary keys by keeping
//! the last occurrence. Anything that would silently alter semantics
//! (unbalanced parentheses, corrupt `#xx` escapes) stays an error.

use nom::{
    IResult,
    branch::alt,
    bytes::complete::tag,
    combinator::value,
};
use std::num::IntErrorKind;

use crate::error::{Error, Result};
use crate::lexer::{
    balanced_parentheses_prefix, is_delimiter, next_whitespace_or_char, normalize_hex, skip_space,
    validate_name_hex,
};
use crate::object::{Dict, Name, Object, ObjectRef};
use crate::parser_config::ParserOptions;

/// Parse the next object from the buffer with default (lenient) options.
///
/// This is the main entry point. It handles every object kind: null,
/// booleans, integers, floats, names, string and hex literals, arrays,
/// dictionaries and indirect references.
///
/// # Example
///
/// ```
/// use pdflex::parser::parse_object;
/// use pdflex::object::Object;
///
/// let mut buf: &[u8] = b"[ 1 2 /Name ] trailing";
/// let obj = parse_object(&mut buf).unwrap();
/// assert!(matches!(obj, Object::Array(_)));
/// assert_eq!(buf, b" trailing");
/// ```
pub fn parse_object(line: &mut &[u8]) -> Result<Object> {
    parse_object_with_options(line, &ParserOptions::default())
}

/// Parse the next object with explicit [`ParserOptions`].
pub fn parse_object_with_options(line: &mut &[u8], opts: &ParserOptions) -> Result<Object> {
    parse_object_inner(line, opts)
}

fn parse_object_inner(line: &mut &[u8], opts: &ParserOptions) -> Result<Object> {
    if line.is_empty() {
        return Err(Error::BufNotAvailable);
    }

    let mut l: &[u8] = *line;

    // position to first non-whitespace byte
    (l, _) = skip_space(l, false);
    if l.is_empty() {
        return Err(Error::BufNotAvailable);
    }

    let val = match l[0] {
        b'[' => {
            log::trace!("parse_object: value = Array");
            Object::Array(parse_array(&mut l, opts)?)
        }
        b'/' => {
            log::trace!("parse_object: value = Name");
            Object::Name(parse_name(&mut l)?)
        }
        b'<' => parse_hex_literal_or_dict(&mut l, opts)?,
        b'(' => {
            log::trace!("parse_object: value = String Literal");
            parse_string_literal(&mut l)?
        }
        _ => {
            if let Some((obj, rest)) = parse_boolean_or_null(l) {
                l = rest;
                obj
            } else {
                // Must be numeric or an indirect reference.
                parse_numeric_or_ind_ref(&mut l)?
            }
        }
    };

    *line = l;
    Ok(val)
}

/// Parse an indirect-object header of the form `<obj-num> <gen-num> obj`.
///
/// Locates the first occurrence of the literal `obj`; everything before it
/// must be two whitespace-separated integers. On success the cursor is
/// advanced to just past the `obj` keyword.
pub fn parse_object_attributes(line: &mut &[u8]) -> Result<(i64, i64)> {
    if line.is_empty() {
        return Err(Error::BufNotAvailable);
    }

    let l = *line;

    let pos = l
        .windows(3)
        .position(|w| w == b"obj")
        .ok_or_else(|| Error::ObjHeaderCorrupt("can't find keyword `obj`".to_string()))?;
    let remainder = &l[pos + 3..];
    let mut head = &l[..pos];

    (head, _) = skip_space(head, false);
    let obj_nr = scan_header_int(&mut head, "object number")?;

    (head, _) = skip_space(head, false);
    let gen_nr = scan_header_int(&mut head, "generation number")?;

    *line = remainder;
    Ok((obj_nr, gen_nr))
}

fn scan_header_int(head: &mut &[u8], what: &str) -> Result<i64> {
    if head.is_empty() {
        return Err(Error::ObjHeaderCorrupt(format!("can't find {what}")));
    }
    let i = match next_whitespace_or_char(head, b"%") {
        Some(i) if i > 0 => i,
        _ => return Err(Error::ObjHeaderCorrupt(format!("can't find end of {what}"))),
    };
    let tok = &head[..i];
    let n = std::str::from_utf8(tok)
        .ok()
        .and_then(|t| t.parse::<i64>().ok())
        .ok_or_else(|| {
            Error::ObjHeaderCorrupt(format!("invalid {what} `{}`", String::from_utf8_lossy(tok)))
        })?;
    *head = &head[i..];
    Ok(n)
}

fn parse_array(line: &mut &[u8], opts: &ParserOptions) -> Result<Vec<Object>> {
    if line.is_empty() {
        return Err(Error::NoArray);
    }

    let mut l: &[u8] = *line;

    if l[0] != b'[' {
        return Err(Error::ArrayCorrupt);
    }
    if l.len() == 1 {
        return Err(Error::ArrayNotTerminated);
    }

    // position behind '['
    l = &l[1..];
    (l, _) = skip_space(l, false);
    if l.is_empty() {
        return Err(Error::ArrayNotTerminated);
    }

    let mut a = Vec::new();

    while !l.starts_with(b"]") {
        let obj = parse_object_inner(&mut l, opts)?;
        log::trace!("parse_array: new array obj = {:?}", obj);
        // Null stays in arrays: positions carry meaning.
        a.push(obj);

        if l.is_empty() {
            return Err(Error::ArrayNotTerminated);
        }
        (l, _) = skip_space(l, false);
        if l.is_empty() {
            return Err(Error::ArrayNotTerminated);
        }
    }

    // position behind ']'
    *line = &l[1..];
    Ok(a)
}

fn insert_entry(d: &mut Dict, key: Name, value: Object, opts: &ParserOptions) -> Result<()> {
    let label = opts.duplicate_keys_strict.then(|| key.to_string());
    if !d.insert(key, value) {
        if let Some(label) = label {
            return Err(Error::DictionaryDuplicateKey(label));
        }
    }
    Ok(())
}

fn parse_dict(line: &mut &[u8], relaxed: bool, opts: &ParserOptions) -> Result<Dict> {
    if line.is_empty() {
        return Err(Error::NoDictionary);
    }

    let mut l: &[u8] = *line;

    if l.len() < 4 || !l.starts_with(b"<<") {
        return Err(Error::DictionaryCorrupt);
    }

    // position behind '<<'
    l = &l[2..];
    (l, _) = skip_space(l, false);
    if l.is_empty() {
        return Err(Error::DictionaryNotTerminated);
    }

    let mut d = Dict::new();

    while !l.starts_with(b">>") {
        let key = parse_name(&mut l)?;
        log::trace!("parse_dict: key = {}", key);

        let (rest, eol) = skip_space(l, relaxed);
        l = rest;
        if l.is_empty() {
            // only whitespace after the key
            return Err(Error::DictionaryNotTerminated);
        }

        // Relaxed mode: a key/value pair cut short by a line terminator
        // gets an empty string literal as its value.
        if eol {
            insert_entry(&mut d, key, Object::StringLiteral(Vec::new()), opts)?;
            continue;
        }

        let obj = parse_object_inner(&mut l, opts)?;

        // Specifying null as the value of a dictionary entry is
        // equivalent to omitting the entry entirely.
        if !obj.is_null() {
            log::trace!("parse_dict: dict[{}] = {:?}", key, obj);
            insert_entry(&mut d, key, obj, opts)?;
        }

        if l.is_empty() {
            return Err(Error::DictionaryNotTerminated);
        }
        (l, _) = skip_space(l, false);
        if l.is_empty() {
            return Err(Error::DictionaryNotTerminated);
        }
    }

    // position behind '>>'
    *line = &l[2..];
    Ok(d)
}

fn parse_hex_literal_or_dict(line: &mut &[u8], opts: &ParserOptions) -> Result<Object> {
    if line.len() < 2 {
        return Err(Error::BufNotAvailable);
    }

    if (*line)[1] != b'<' {
        log::trace!("parse_object: value = Hex Literal");
        return parse_hex_literal(line);
    }

    log::trace!("parse_object: value = Dictionary");

    // Two attempts: strict first, then relaxed. A failed parse_dict leaves
    // *line untouched, so the retry restarts from the original position.
    let d = match parse_dict(line, false, opts) {
        Ok(d) => d,
        Err(err) if opts.relaxed_dicts => {
            log::trace!("parse_dict: strict attempt failed ({err}), retrying relaxed");
            parse_dict(line, true, opts)?
        }
        Err(err) => return Err(err),
    };

    Ok(Object::Dictionary(d))
}

fn parse_string_literal(line: &mut &[u8]) -> Result<Object> {
    if line.is_empty() {
        return Err(Error::BufNotAvailable);
    }

    let l = *line;

    if l.len() < 2 || l[0] != b'(' {
        return Err(Error::StringLiteralCorrupt);
    }

    // Index of the ')' enclosing the balanced-parentheses prefix.
    let i = balanced_parentheses_prefix(l).ok_or(Error::StringLiteralCorrupt)?;

    // Content between '(' and ')', escape sequences untouched; decoding
    // is a consumer concern (see crate::decode).
    let content = l[1..i].to_vec();

    // position behind ')'
    *line = &l[i + 1..];
    Ok(Object::StringLiteral(content))
}

fn parse_hex_literal(line: &mut &[u8]) -> Result<Object> {
    if line.is_empty() {
        return Err(Error::BufNotAvailable);
    }

    let l = *line;

    if l.len() < 2 || l[0] != b'<' {
        return Err(Error::HexLiteralCorrupt);
    }

    // position behind '<'
    let l = &l[1..];

    let eov = l
        .iter()
        .position(|&b| b == b'>')
        .ok_or(Error::HexLiteralNotTerminated)?;

    let hex = normalize_hex(&l[..eov]).ok_or(Error::HexLiteralCorrupt)?;

    // position behind '>'
    *line = &l[eov + 1..];
    Ok(Object::HexLiteral(hex))
}

fn parse_name(line: &mut &[u8]) -> Result<Name> {
    if line.is_empty() {
        return Err(Error::BufNotAvailable);
    }

    let l = *line;

    if l.len() < 2 || l[0] != b'/' {
        return Err(Error::NameCorrupt);
    }

    // position behind '/'
    let l = &l[1..];

    // cut off on whitespace or delimiter
    let raw = match next_whitespace_or_char(l, b"/<>()[]%") {
        None => {
            // name terminated by end of buffer
            *line = &l[l.len()..];
            l
        }
        Some(eok) => {
            *line = &l[eok..];
            &l[..eok]
        }
    };

    validate_name_hex(raw)?;
    Ok(Name::new(raw))
}

fn parse_boolean_or_null(l: &[u8]) -> Option<(Object, &[u8])> {
    let res: IResult<&[u8], Object> = alt((
        value(Object::Null, tag(b"null".as_slice())),
        value(Object::Boolean(true), tag(b"true".as_slice())),
        value(Object::Boolean(false), tag(b"false".as_slice())),
    ))(l);

    match res {
        Ok((rest, obj)) => Some((obj, rest)),
        Err(_) => None,
    }
}

/// Strip the leading-zero junk some producers prefix onto signed numbers:
/// `0+17`, `0-3`, `0.000-3.5` all carry an ignorable zero prefix.
fn repair_leading_zero(tok: &[u8]) -> &[u8] {
    if tok.len() > 1 && tok[0] == b'0' {
        if tok[1] == b'+' || tok[1] == b'-' {
            return &tok[1..];
        }
        if tok[1] == b'.' {
            let mut i = 2;
            while tok.len() > i && tok[i] == b'0' {
                i += 1;
            }
            if tok.len() > i && (tok[i] == b'+' || tok[i] == b'-') {
                return &tok[i..];
            }
        }
    }
    tok
}

fn parse_float(s: &str) -> Result<Object> {
    let f: f64 = s
        .parse()
        .map_err(|_| Error::NumericCorrupt(s.to_string()))?;
    log::trace!("parse_float: value is: {}", f);
    Ok(Object::Float(f))
}

fn parse_numeric_or_ind_ref(line: &mut &[u8]) -> Result<Object> {
    if line.is_empty() {
        return Err(Error::BufNotAvailable);
    }

    let l = *line;

    // Token end and "short remainder": the suffix right after the first
    // token. Integer returns advance to the short remainder whenever the
    // indirect-reference lookahead fails.
    let i1 = next_whitespace_or_char(l, b"/<([]>%");
    let (tok, l1) = match i1 {
        Some(i) if i > 0 => (&l[..i], &l[i..]),
        _ => (l, &l[l.len()..]),
    };

    let tok = repair_leading_zero(tok);
    let txt = std::str::from_utf8(tok)
        .map_err(|_| Error::NumericCorrupt(String::from_utf8_lossy(tok).into_owned()))?;

    // Try int first; an indirect reference needs one.
    let mut range_err = false;
    let i: i64 = match txt.parse() {
        Ok(v) => v,
        Err(e) => match e.kind() {
            // Keep going: inside a confirmed reference shape an oversized
            // object number degrades to a null placeholder instead of
            // killing the parse.
            IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
                range_err = true;
                0
            }
            _ => {
                *line = l1;
                return parse_float(txt);
            }
        },
    };

    // Not followed by whitespace: the integer stands alone.
    let sep = match i1 {
        Some(i) if i > 0 && !is_delimiter(l[i]) => Some(i),
        _ => None,
    };
    let Some(ip) = sep else {
        if range_err {
            return Err(Error::IntegerRange(txt.to_string()));
        }
        log::trace!("parse_numeric_or_ind_ref: value is numeric int: {}", i);
        *line = l1;
        return Ok(Object::Integer(i));
    };

    // Might be an indirect reference (`123 0 R`); still missing the
    // second int and the `R`.
    let (l2, _) = skip_space(&l[ip..], false);
    if l2.is_empty() {
        if range_err {
            return Err(Error::IntegerRange(txt.to_string()));
        }
        *line = l1;
        return Ok(Object::Integer(i));
    }

    let i2 = next_whitespace_or_char(l2, b"/<([]>");
    let sep2 = match i2 {
        Some(j) if j > 0 && !is_delimiter(l2[j]) => Some(j),
        _ => None,
    };
    let Some(j) = sep2 else {
        // Only two tokens: cannot be an indirect reference.
        if range_err {
            return Err(Error::IntegerRange(txt.to_string()));
        }
        log::trace!("parse_numeric_or_ind_ref: 2 objects => numeric int: {}", i);
        *line = l1;
        return Ok(Object::Integer(i));
    };

    parse_ind_ref(l2, l1, line, i, j, range_err, txt)
}

fn parse_ind_ref<'a>(
    l2: &'a [u8],
    l1: &'a [u8],
    line: &mut &'a [u8],
    i: i64,
    j: usize,
    range_err: bool,
    tok_txt: &str,
) -> Result<Object> {
    let gen: i64 = match std::str::from_utf8(&l2[..j]).ok().and_then(|t| t.parse().ok()) {
        Some(g) => g,
        None => {
            // Second token is no int; the two tokens are unrelated.
            *line = l1;
            return Ok(Object::Integer(i));
        }
    };

    let (l3, _) = skip_space(&l2[j..], false);
    if l3.is_empty() {
        if range_err {
            return Err(Error::IntegerRange(tok_txt.to_string()));
        }
        *line = l1;
        return Ok(Object::Integer(i));
    }

    if l3[0] == b'R' {
        *line = &l3[1..];
        if range_err {
            // All three tokens are in place but the object number does not
            // fit: the target is unresolvable, so hand back a null
            // placeholder for the caller to skip.
            return Ok(Object::Null);
        }
        return Ok(Object::Reference(ObjectRef::new(i, gen)));
    }

    if range_err {
        return Err(Error::IntegerRange(tok_txt.to_string()));
    }

    // No 'R': a plain integer after all.
    *line = l1;
    Ok(Object::Integer(i))
}
