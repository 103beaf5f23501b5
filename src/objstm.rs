//! Object stream descriptors (PDF 1.5+).
//!
//! An object stream (`/Type /ObjStm`) packs multiple non-stream objects
//! into one compressed body. Its dictionary names the object count (`N`)
//! and the byte offset of the first embedded object (`First`). This
//! module validates those entries and projects the dictionary into an
//! [`ObjectStreamDict`]; extracting the embedded objects happens in a
//! later pass once the body has been decoded.

use crate::error::{Error, Result};
use crate::object::{Object, StreamDict};

/// A stream dictionary validated and projected for object extraction.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectStreamDict {
    /// The underlying stream dictionary and raw body
    pub stream_dict: StreamDict,
    /// Value of the `N` entry: number of embedded objects
    pub obj_count: i64,
    /// Value of the `First` entry: offset of the first object's data
    pub first_obj_offset: i64,
    /// Embedded objects, filled by the pass that decodes the body
    pub obj_array: Option<Vec<Object>>,
}

/// Build an [`ObjectStreamDict`] from a parsed stream dictionary.
pub fn parse_object_stream_dict(sd: StreamDict) -> Result<ObjectStreamDict> {
    let first_obj_offset = sd
        .dict
        .int_entry("First")
        .ok_or(Error::ObjStreamMissingFirst)?;

    let obj_count = sd.dict.int_entry("N").ok_or(Error::ObjStreamMissingN)?;

    Ok(ObjectStreamDict {
        stream_dict: sd,
        obj_count,
        first_obj_offset,
        obj_array: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::{Dict, Name};

    fn stream_dict(entries: Vec<(Name, Object)>) -> StreamDict {
        let mut dict = Dict::new();
        for (k, v) in entries {
            dict.insert(k, v);
        }
        StreamDict::new(dict, &b""[..])
    }

    #[test]
    fn test_valid_object_stream_dict() {
        let sd = stream_dict(vec![
            (Name::from("N"), Object::Integer(5)),
            (Name::from("First"), Object::Integer(30)),
        ]);
        let osd = parse_object_stream_dict(sd).unwrap();
        assert_eq!(osd.obj_count, 5);
        assert_eq!(osd.first_obj_offset, 30);
        assert!(osd.obj_array.is_none());
    }

    #[test]
    fn test_missing_n() {
        let sd = stream_dict(vec![(Name::from("First"), Object::Integer(30))]);
        assert!(matches!(
            parse_object_stream_dict(sd),
            Err(Error::ObjStreamMissingN)
        ));
    }

    #[test]
    fn test_missing_first() {
        let sd = stream_dict(vec![(Name::from("N"), Object::Integer(5))]);
        assert!(matches!(
            parse_object_stream_dict(sd),
            Err(Error::ObjStreamMissingFirst)
        ));
    }

    #[test]
    fn test_non_integer_entries_count_as_missing() {
        let sd = stream_dict(vec![
            (Name::from("N"), Object::Name(Name::from("five"))),
            (Name::from("First"), Object::Integer(30)),
        ]);
        assert!(matches!(
            parse_object_stream_dict(sd),
            Err(Error::ObjStreamMissingN)
        ));
    }
}
