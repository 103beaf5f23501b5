//! # pdflex
//!
//! Object-level lexical parser for PDF: hand a cursor positioned anywhere
//! inside a PDF byte buffer to [`parse_object`] and get back the next
//! typed object (array, dictionary, name, string, hex string, integer,
//! float, boolean, null or indirect reference), with the cursor advanced
//! past the consumed bytes.
//!
//! The parser is deliberately tolerant of the ways real-world producers
//! bend the syntax (zero-prefixed numerics, dictionary values cut short by
//! a line break, duplicate dictionary keys, odd-length hex literals) while
//! staying strict wherever tolerance would silently change meaning.
//! Names and string literals are returned byte-exact; escape resolution
//! lives in [`decode`] for consumers that want decoded bytes.
//!
//! ## Quick start
//!
//! ```
//! use pdflex::parse_object;
//!
//! let mut buf: &[u8] = b"<< /Type /Catalog /Pages 3 0 R >>";
//! let obj = parse_object(&mut buf)?;
//!
//! let dict = obj.as_dict().unwrap();
//! assert_eq!(dict.get("Pages").unwrap().as_reference().unwrap().num, 3);
//! # Ok::<(), pdflex::Error>(())
//! ```
//!
//! ## Scope
//!
//! File I/O, xref table loading, stream filter decoding and content-stream
//! interpretation belong to the surrounding toolkit; this crate only turns
//! bytes into objects and validates the two derived stream-dictionary
//! shapes ([`xref`], [`objstm`]) needed to decode a document's object
//! table.

#![warn(missing_docs)]

pub mod decode;
pub mod error;
pub mod lexer;
pub mod object;
pub mod objstm;
pub mod parser;
pub mod parser_config;
pub mod xref;

pub use error::{Error, Result};
pub use object::{Dict, Name, Object, ObjectRef, StreamDict};
pub use objstm::{ObjectStreamDict, parse_object_stream_dict};
pub use parser::{parse_object, parse_object_attributes, parse_object_with_options};
pub use parser_config::ParserOptions;
pub use xref::{XRefStreamDict, parse_xref_stream_dict};
