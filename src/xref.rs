//! Cross-reference stream descriptors (PDF 1.5+).
//!
//! A cross-reference stream replaces the classic `xref` table: its
//! dictionary carries the decoding parameters (`W`, `Size`, optional
//! `Index` and `Prev`) and its body holds the packed entry rows. This
//! module validates the dictionary shape and projects it into a
//! [`XRefStreamDict`]; decoding the packed rows is the xref loader's job.
//!
//! # Dictionary shape
//!
//! ```text
//! << /Type /XRef
//!    /Size 124              % total entry count
//!    /W [1 2 1]             % byte widths of the three entry fields
//!    /Index [0 12 88 36]    % optional (start, count) subsections
//!    /Prev 117216           % optional offset of the previous xref
//! >>
//! ```

use crate::error::{Error, Result};
use crate::object::StreamDict;

/// A stream dictionary validated and projected for xref decoding.
#[derive(Debug, Clone, PartialEq)]
pub struct XRefStreamDict {
    /// The underlying stream dictionary and raw body
    pub stream_dict: StreamDict,
    /// Value of the `Size` entry
    pub size: i64,
    /// Object numbers described by the stream body, in row order
    pub objects: Vec<i64>,
    /// Field widths from `W`: three non-negative integers
    pub w: [i64; 3],
    /// Value of the optional `Prev` entry
    pub previous_offset: Option<i64>,
}

/// Build a [`XRefStreamDict`] from a parsed stream dictionary.
///
/// Requires `Size` and a well-formed `W`; an absent `Index` defaults the
/// object set to `0..Size`.
pub fn parse_xref_stream_dict(sd: StreamDict) -> Result<XRefStreamDict> {
    log::trace!("parse_xref_stream_dict: begin");

    let size = sd
        .dict
        .int_entry("Size")
        .ok_or(Error::XRefStreamMissingSize)?;

    // Object numbers covered by the stream: either the concatenation of
    // the (start, count) Index subsections or the full 0..Size range.
    let mut objects: Vec<i64> = Vec::new();
    match sd.dict.array_entry("Index") {
        Some(pairs) => {
            log::trace!("parse_xref_stream_dict: using Index");
            if pairs.len() % 2 != 0 {
                return Err(Error::XRefStreamCorruptIndex);
            }
            for pair in pairs.chunks_exact(2) {
                let start = pair[0].as_integer().ok_or(Error::XRefStreamCorruptIndex)?;
                let count = pair[1].as_integer().ok_or(Error::XRefStreamCorruptIndex)?;
                objects.extend(start..start.saturating_add(count.max(0)));
            }
        }
        None => objects.extend(0..size),
    }

    // W drives entry decoding: the byte width of each of the three fields
    // in a single cross-reference entry.
    let w_arr = match sd.dict.get("W") {
        None => return Err(Error::XRefStreamMissingW),
        Some(obj) => obj.as_array().ok_or(Error::XRefStreamCorruptW)?,
    };
    if w_arr.len() != 3 {
        return Err(Error::XRefStreamCorruptW);
    }

    let mut w = [0i64; 3];
    for (slot, obj) in w.iter_mut().zip(w_arr) {
        let width = obj.as_integer().ok_or(Error::XRefStreamCorruptW)?;
        if width < 0 {
            return Err(Error::XRefStreamCorruptW);
        }
        *slot = width;
    }

    let previous_offset = sd.dict.int_entry("Prev");

    log::trace!("parse_xref_stream_dict: end");

    Ok(XRefStreamDict {
        stream_dict: sd,
        size,
        objects,
        w,
        previous_offset,
    })
}
