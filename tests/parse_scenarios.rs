//! Integration tests driving the public parsing surface end-to-end:
//! header parsing, object parsing, descriptor construction and payload
//! decoding over realistic PDF fragments.

use pdflex::decode::{decode_hex_literal, decode_name, decode_string_literal};
use pdflex::{
    Name, Object, ObjectRef, ParserOptions, StreamDict, parse_object, parse_object_attributes,
    parse_object_stream_dict, parse_object_with_options, parse_xref_stream_dict,
};

#[test]
fn parses_an_indirect_object_from_header_to_body() {
    let mut buf: &[u8] = b"4 0 obj\n<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>\nendobj";

    let (num, gen) = parse_object_attributes(&mut buf).unwrap();
    assert_eq!((num, gen), (4, 0));

    let obj = parse_object(&mut buf).unwrap();
    let dict = obj.as_dict().unwrap();
    assert_eq!(dict.name_entry("Type"), Some(&Name::from("Font")));
    assert_eq!(dict.name_entry("BaseFont"), Some(&Name::from("Helvetica")));
    assert_eq!(buf, b"\nendobj");
}

#[test]
fn parses_a_catalog_with_mixed_values() {
    let mut buf: &[u8] = b"<< /Type /Catalog\n   /Pages 3 0 R\n   /MediaBox [0 0 612 792]\n   /Title (Annual \\(draft\\) report)\n   /ID <4E6f>\n>>";
    let obj = parse_object(&mut buf).unwrap();
    let dict = obj.as_dict().unwrap();

    assert_eq!(
        dict.get("Pages").unwrap().as_reference(),
        Some(ObjectRef::new(3, 0))
    );

    let media_box = dict.array_entry("MediaBox").unwrap();
    assert_eq!(media_box.len(), 4);
    assert_eq!(media_box[3], Object::Integer(792));

    // Raw literal: escapes are preserved until the consumer decodes them.
    let raw_title = dict.get("Title").unwrap().as_string_literal().unwrap();
    assert_eq!(raw_title, b"Annual \\(draft\\) report");
    assert_eq!(decode_string_literal(raw_title), b"Annual (draft) report");

    let id = dict.get("ID").unwrap().as_hex_literal().unwrap();
    assert_eq!(id, "4E6F");
    assert_eq!(decode_hex_literal(id), b"No");
}

#[test]
fn concrete_scenarios_from_the_wild() {
    // Array of integers, cursor fully consumed.
    let mut buf: &[u8] = b"[1 2 3]";
    let obj = parse_object(&mut buf).unwrap();
    assert_eq!(
        obj,
        Object::Array(vec![
            Object::Integer(1),
            Object::Integer(2),
            Object::Integer(3)
        ])
    );
    assert!(buf.is_empty());

    // Escaped paren stays raw, remainder untouched.
    let mut buf: &[u8] = b"(ab\\(cd)e";
    let obj = parse_object(&mut buf).unwrap();
    assert_eq!(obj, Object::StringLiteral(b"ab\\(cd".to_vec()));
    assert_eq!(buf, b"e");

    // Odd-length hex literal padded with '0'.
    let mut buf: &[u8] = b"<414>";
    assert_eq!(
        parse_object(&mut buf).unwrap(),
        Object::HexLiteral("4140".to_string())
    );

    // Zero-prefix repair turns `0.000-3.5` into a float.
    let mut buf: &[u8] = b"0.000-3.5";
    assert_eq!(parse_object(&mut buf).unwrap(), Object::Float(-3.5));
    assert!(buf.is_empty());

    // Two integers never collapse into a reference.
    let mut buf: &[u8] = b"1 2";
    assert_eq!(parse_object(&mut buf).unwrap(), Object::Integer(1));
    assert_eq!(buf, b" 2");

    // Duplicate key: last write wins.
    let mut buf: &[u8] = b"<< /K (v) /K (w) >>";
    let obj = parse_object(&mut buf).unwrap();
    let dict = obj.as_dict().unwrap();
    assert_eq!(dict.len(), 1);
    assert_eq!(dict.get("K").unwrap().as_string_literal(), Some(&b"w"[..]));
}

#[test]
fn strict_options_reject_producer_bugs() {
    let opts = ParserOptions::strict();

    let mut buf: &[u8] = b"<< /K 1 /K 2 >>";
    assert!(parse_object_with_options(&mut buf, &opts).is_err());

    let mut buf: &[u8] = b"<< /Interpolate\n/Width 5 >>";
    assert!(parse_object_with_options(&mut buf, &opts).is_err());

    // The same inputs pass with the lenient defaults.
    let mut buf: &[u8] = b"<< /Interpolate\n/Width 5 >>";
    let obj = parse_object(&mut buf).unwrap();
    assert_eq!(obj.as_dict().unwrap().int_entry("Width"), Some(5));
}

#[test]
fn xref_stream_descriptor_from_parsed_dict() {
    let mut buf: &[u8] =
        b"<< /Type /XRef /Size 6 /W [1 2 1] /Index [2 3] /Prev 98 /Length 24 >> tail";
    let obj = parse_object(&mut buf).unwrap();
    let sd = StreamDict::new(obj.as_dict().unwrap().clone(), &b"\x01\x02"[..]);

    let x = parse_xref_stream_dict(sd).unwrap();
    assert_eq!(x.size, 6);
    assert_eq!(x.objects, vec![2, 3, 4]);
    assert_eq!(x.w, [1, 2, 1]);
    assert_eq!(x.previous_offset, Some(98));
    assert_eq!(buf, b" tail");
}

#[test]
fn object_stream_descriptor_from_parsed_dict() {
    let mut buf: &[u8] = b"<< /Type /ObjStm /N 5 /First 30 /Length 256 >>";
    let obj = parse_object(&mut buf).unwrap();
    let sd = StreamDict::new(obj.as_dict().unwrap().clone(), &b""[..]);

    let osd = parse_object_stream_dict(sd).unwrap();
    assert_eq!(osd.obj_count, 5);
    assert_eq!(osd.first_obj_offset, 30);
    assert!(osd.obj_array.is_none());
}

#[test]
fn name_escapes_survive_until_decode() {
    let mut buf: &[u8] = b"<< /Producer#20Info (x) >>";
    let obj = parse_object(&mut buf).unwrap();
    let dict = obj.as_dict().unwrap();

    let key = dict.keys().next().unwrap();
    assert_eq!(key.as_bytes(), b"Producer#20Info");
    assert_eq!(decode_name(key.as_bytes()), b"Producer Info");
}

#[test]
fn content_stream_fragment_walks_token_by_token() {
    // A page-content-like run of objects sharing one cursor.
    let mut buf: &[u8] = b" /F1 12 0 R % font\n [ (Hel) 3.5 (lo) ] true null ";

    assert_eq!(
        parse_object(&mut buf).unwrap(),
        Object::Name(Name::from("F1"))
    );
    assert_eq!(
        parse_object(&mut buf).unwrap(),
        Object::Reference(ObjectRef::new(12, 0))
    );

    let arr = parse_object(&mut buf).unwrap();
    assert_eq!(
        arr,
        Object::Array(vec![
            Object::StringLiteral(b"Hel".to_vec()),
            Object::Float(3.5),
            Object::StringLiteral(b"lo".to_vec()),
        ])
    );

    assert_eq!(parse_object(&mut buf).unwrap(), Object::Boolean(true));
    assert_eq!(parse_object(&mut buf).unwrap(), Object::Null);

    // Only trailing whitespace left: the next pull reports an empty buffer.
    assert!(parse_object(&mut buf).is_err());
}
