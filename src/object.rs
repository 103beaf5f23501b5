//! PDF object types.
//!
//! The parser produces values of the [`Object`] sum type. Names and string
//! literals hold raw bytes exactly as they appeared in the source; escape
//! resolution lives in [`crate::decode`] so that byte-exact round-tripping
//! stays possible for consumers that need it.

use std::borrow::Borrow;
use std::fmt;

use indexmap::IndexMap;

/// PDF object representation.
#[derive(Debug, Clone, PartialEq)]
pub enum Object {
    /// Null object
    Null,
    /// Boolean value
    Boolean(bool),
    /// Integer value
    Integer(i64),
    /// Real (floating-point) value
    Float(f64),
    /// Name (bytes after `/`, `#xx` escapes validated but not decoded)
    Name(Name),
    /// Literal string content without the enclosing parentheses,
    /// escape sequences not decoded
    StringLiteral(Vec<u8>),
    /// Hex string content, normalized: uppercase, whitespace stripped,
    /// padded to even length
    HexLiteral(String),
    /// Array of objects
    Array(Vec<Object>),
    /// Dictionary (key-value pairs, insertion order preserved)
    Dictionary(Dict),
    /// Indirect object reference
    Reference(ObjectRef),
}

/// A PDF name object: the raw bytes following the `/` introducer.
///
/// `#xx` hex escapes are kept verbatim; [`crate::decode::decode_name`]
/// resolves them when a consumer wants the decoded form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Name(Vec<u8>);

impl Name {
    /// Create a name from its raw bytes (without the leading `/`).
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Name(bytes.into())
    }

    /// The raw bytes of this name.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl Borrow<[u8]> for Name {
    fn borrow(&self) -> &[u8] {
        &self.0
    }
}

impl From<&str> for Name {
    fn from(s: &str) -> Self {
        Name(s.as_bytes().to_vec())
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.0))
    }
}

/// Reference to an indirect object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectRef {
    /// Object number
    pub num: i64,
    /// Generation number
    pub gen: i64,
}

impl ObjectRef {
    /// Create a new object reference.
    pub fn new(num: i64, gen: i64) -> Self {
        Self { num, gen }
    }
}

impl fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} R", self.num, self.gen)
    }
}

/// A PDF dictionary.
///
/// Keys keep their first-occurrence order; re-inserting an existing key
/// overwrites the value in place (last write wins).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dict(IndexMap<Name, Object>);

impl Dict {
    /// Create an empty dictionary.
    pub fn new() -> Self {
        Dict(IndexMap::new())
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if the dictionary has no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Insert an entry. Returns true if the key was fresh; on a repeated
    /// key the value is overwritten in place and false is returned.
    pub fn insert(&mut self, key: Name, value: Object) -> bool {
        self.0.insert(key, value).is_none()
    }

    /// Look up an entry by its textual key.
    pub fn get(&self, key: &str) -> Option<&Object> {
        self.0.get(key.as_bytes())
    }

    /// Look up an integer-valued entry.
    pub fn int_entry(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(Object::as_integer)
    }

    /// Look up an array-valued entry.
    pub fn array_entry(&self, key: &str) -> Option<&Vec<Object>> {
        self.get(key).and_then(Object::as_array)
    }

    /// Look up a name-valued entry.
    pub fn name_entry(&self, key: &str) -> Option<&Name> {
        self.get(key).and_then(Object::as_name)
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&Name, &Object)> {
        self.0.iter()
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &Name> {
        self.0.keys()
    }
}

impl<const N: usize> From<[(Name, Object); N]> for Dict {
    fn from(entries: [(Name, Object); N]) -> Self {
        Dict(IndexMap::from_iter(entries))
    }
}

/// A stream dictionary together with the raw, still-encoded stream body.
///
/// Filter decoding happens elsewhere in the toolkit; this type exists as
/// the input to the xref-stream and object-stream descriptor constructors.
#[derive(Debug, Clone, PartialEq)]
pub struct StreamDict {
    /// The dictionary preceding the stream body
    pub dict: Dict,
    /// Raw stream content, exactly as found between `stream`/`endstream`
    pub data: bytes::Bytes,
}

impl StreamDict {
    /// Create a stream dictionary from its parts.
    pub fn new(dict: Dict, data: impl Into<bytes::Bytes>) -> Self {
        Self { dict, data: data.into() }
    }
}

impl Object {
    /// Get the type name of this object (without data).
    pub fn type_name(&self) -> &'static str {
        match self {
            Object::Null => "Null",
            Object::Boolean(_) => "Boolean",
            Object::Integer(_) => "Integer",
            Object::Float(_) => "Float",
            Object::Name(_) => "Name",
            Object::StringLiteral(_) => "StringLiteral",
            Object::HexLiteral(_) => "HexLiteral",
            Object::Array(_) => "Array",
            Object::Dictionary(_) => "Dictionary",
            Object::Reference(_) => "Reference",
        }
    }

    /// Try to cast to integer.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Object::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Try to cast to float.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Object::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Try to cast to boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Object::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to cast to name.
    pub fn as_name(&self) -> Option<&Name> {
        match self {
            Object::Name(n) => Some(n),
            _ => None,
        }
    }

    /// Try to cast to raw string-literal bytes.
    pub fn as_string_literal(&self) -> Option<&[u8]> {
        match self {
            Object::StringLiteral(s) => Some(s),
            _ => None,
        }
    }

    /// Try to cast to normalized hex-literal text.
    pub fn as_hex_literal(&self) -> Option<&str> {
        match self {
            Object::HexLiteral(h) => Some(h),
            _ => None,
        }
    }

    /// Try to cast to array.
    pub fn as_array(&self) -> Option<&Vec<Object>> {
        match self {
            Object::Array(a) => Some(a),
            _ => None,
        }
    }

    /// Try to cast to dictionary.
    pub fn as_dict(&self) -> Option<&Dict> {
        match self {
            Object::Dictionary(d) => Some(d),
            _ => None,
        }
    }

    /// Try to cast to reference.
    pub fn as_reference(&self) -> Option<ObjectRef> {
        match self {
            Object::Reference(r) => Some(*r),
            _ => None,
        }
    }

    /// Check if object is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Object::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_integer() {
        let obj = Object::Integer(42);
        assert_eq!(obj.as_integer(), Some(42));
        assert!(obj.as_name().is_none());
        assert!(!obj.is_null());
    }

    #[test]
    fn test_object_name() {
        let obj = Object::Name(Name::from("Type"));
        assert_eq!(obj.as_name(), Some(&Name::from("Type")));
        assert_eq!(obj.type_name(), "Name");
    }

    #[test]
    fn test_name_display_is_lossy() {
        let n = Name::new(vec![b'A', 0xFF, b'B']);
        assert_eq!(n.as_bytes(), &[b'A', 0xFF, b'B']);
        assert_eq!(format!("{}", n), "A\u{FFFD}B");
    }

    #[test]
    fn test_object_ref_display() {
        assert_eq!(format!("{}", ObjectRef::new(10, 0)), "10 0 R");
    }

    #[test]
    fn test_dict_insertion_order_preserved() {
        let mut d = Dict::new();
        assert!(d.insert(Name::from("Zebra"), Object::Integer(1)));
        assert!(d.insert(Name::from("Apple"), Object::Integer(2)));
        assert!(d.insert(Name::from("Mango"), Object::Integer(3)));

        let keys: Vec<String> = d.keys().map(|k| k.to_string()).collect();
        assert_eq!(keys, ["Zebra", "Apple", "Mango"]);
    }

    #[test]
    fn test_dict_last_write_wins_keeps_position() {
        let mut d = Dict::new();
        d.insert(Name::from("A"), Object::Integer(1));
        d.insert(Name::from("B"), Object::Integer(2));
        assert!(!d.insert(Name::from("A"), Object::Integer(9)));

        assert_eq!(d.int_entry("A"), Some(9));
        let keys: Vec<String> = d.keys().map(|k| k.to_string()).collect();
        assert_eq!(keys, ["A", "B"]);
    }

    #[test]
    fn test_dict_typed_accessors() {
        let d = Dict::from([
            (Name::from("Size"), Object::Integer(12)),
            (Name::from("Type"), Object::Name(Name::from("XRef"))),
            (Name::from("W"), Object::Array(vec![Object::Integer(1)])),
        ]);
        assert_eq!(d.int_entry("Size"), Some(12));
        assert_eq!(d.name_entry("Type"), Some(&Name::from("XRef")));
        assert_eq!(d.array_entry("W").map(Vec::len), Some(1));
        assert_eq!(d.int_entry("Missing"), None);
        assert_eq!(d.int_entry("Type"), None);
    }

    #[test]
    fn test_stream_dict_holds_raw_data() {
        let sd = StreamDict::new(Dict::new(), &b"\x78\x9c"[..]);
        assert_eq!(&sd.data[..], b"\x78\x9c");
        assert!(sd.dict.is_empty());
    }

    #[test]
    fn test_object_accessors_reject_wrong_type() {
        let obj = Object::StringLiteral(b"abc".to_vec());
        assert_eq!(obj.as_string_literal(), Some(&b"abc"[..]));
        assert!(obj.as_hex_literal().is_none());
        assert!(obj.as_array().is_none());
        assert!(obj.as_dict().is_none());
        assert!(obj.as_reference().is_none());
    }
}
