//! Error types for the object parser.
//!
//! Every failure mode of the parser and of the derived-dictionary
//! constructors is a distinct variant, so callers can react to framing
//! errors (unterminated array, missing `>>`) differently from content
//! errors (bad hex digit, corrupt name escape).

/// Result type alias for parser operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced while parsing PDF objects.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Cursor was empty when a token was required
    #[error("no buffer available")]
    BufNotAvailable,

    /// Array parse requested on an empty buffer
    #[error("no array")]
    NoArray,

    /// Buffer does not start with `[`
    #[error("corrupt array")]
    ArrayCorrupt,

    /// `]` never found
    #[error("unterminated array")]
    ArrayNotTerminated,

    /// Dictionary parse requested on an empty buffer
    #[error("no dictionary")]
    NoDictionary,

    /// `<<` missing or dictionary too short to be well formed
    #[error("corrupt dictionary")]
    DictionaryCorrupt,

    /// `>>` never found
    #[error("unterminated dictionary")]
    DictionaryNotTerminated,

    /// A key occurred twice (strict duplicate-key mode only)
    #[error("duplicate dictionary key `{0}`")]
    DictionaryDuplicateKey(String),

    /// Hex literal contains a byte that is neither hex nor whitespace
    #[error("corrupt hex literal")]
    HexLiteralCorrupt,

    /// `>` terminating a hex literal never found
    #[error("hex literal not terminated")]
    HexLiteralNotTerminated,

    /// Unbalanced parentheses or missing `(`
    #[error("corrupt string literal, possibly unbalanced parenthesis")]
    StringLiteralCorrupt,

    /// Malformed `#xx` escape inside a name, or missing `/`
    #[error("corrupt name object")]
    NameCorrupt,

    /// Token parsed as neither integer nor float
    #[error("corrupt numeric literal `{0}`")]
    NumericCorrupt(String),

    /// Integer token does not fit in 64 bits and could not be absorbed
    /// into an indirect reference
    #[error("integer out of range `{0}`")]
    IntegerRange(String),

    /// Indirect-object header (`n g obj`) is malformed
    #[error("corrupt object header: {0}")]
    ObjHeaderCorrupt(String),

    /// Xref stream dictionary has no `Size` entry
    #[error("xref stream dict missing entry Size")]
    XRefStreamMissingSize,

    /// Xref stream dictionary has no `W` entry
    #[error("xref stream dict missing entry W")]
    XRefStreamMissingW,

    /// `W` entry is not an array of 3 non-negative integers
    #[error("xref stream dict corrupt entry W: expecting array of 3 int")]
    XRefStreamCorruptW,

    /// `Index` entry is not an array of integer pairs
    #[error("xref stream dict corrupt entry Index")]
    XRefStreamCorruptIndex,

    /// Object stream dictionary has no `N` entry
    #[error("obj stream dict missing entry N")]
    ObjStreamMissingN,

    /// Object stream dictionary has no `First` entry
    #[error("obj stream dict missing entry First")]
    ObjStreamMissingFirst,
}
