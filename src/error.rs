//! Error types for the BER/DER parser and serializer

use displaydoc::Display;
use nom::error::{ErrorKind, FromExternalError, ParseError};
use nom::IResult;
use thiserror::Error;

/// Holds the result of parsing and decoding functions
pub type Asn1Result<T> = Result<T, Asn1Error>;

/// Holds the result of wire-level parsing functions
///
/// This type is a wrapper around nom's `IResult` type: internal parsers thread
/// the remaining input through, and signal truncation with `Err::Incomplete`.
/// The public entry points unwrap it into an [`Asn1Result`].
pub(crate) type ParseResult<'a, T> = IResult<&'a [u8], T, Asn1Error>;

/// Error for BER/DER parsing, decoding and encoding
///
/// The taxonomy is closed: every failure of the codec maps to one of these
/// kinds, with a short human-readable message attached. Errors are always
/// propagated to the caller; nothing is retried and nothing is logged.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Display, Error)]
#[ignore_extra_doc_attributes]
pub enum Asn1Error {
    /// invalid ASN.1 object: {0}
    ///
    /// Structural or constraint violation: end-of-contents misuse, excessive
    /// depth or node count, trailing bytes, bad boolean byte, illegal OID
    /// component ranges, NaN or decimal REAL.
    InvalidAsn1Object(&'static str),

    /// truncated ASN.1 field: {0}
    ///
    /// The input ran out in the middle of a tag-length-value frame.
    TruncatedAsn1Field(&'static str),

    /// unsupported field length: {0}
    ///
    /// Indefinite length under DER, long form where short form is required,
    /// or non-minimal length octets.
    UnsupportedFieldLength(&'static str),

    /// unexpected field type: {0}
    ///
    /// Identifier mismatch, or primitive/constructed shape mismatch, during
    /// typed decoding.
    UnexpectedFieldType(&'static str),

    /// value out of range: {0}
    ValueOutOfRange(&'static str),

    /// malformed ASN.1 identifier: {0}
    MalformedAsn1Identifier(&'static str),

    /// invalid ASN.1 integer encoding: {0}
    InvalidAsn1IntegerEncoding(&'static str),

    /// too few OID components: {0}
    TooFewOidComponents(&'static str),

    /// error raised by the underlying parser: {0:?}
    NomError(ErrorKind),
}

impl From<Asn1Error> for nom::Err<Asn1Error> {
    #[inline]
    fn from(e: Asn1Error) -> nom::Err<Asn1Error> {
        nom::Err::Error(e)
    }
}

impl<I> ParseError<I> for Asn1Error {
    fn from_error_kind(_input: I, kind: ErrorKind) -> Self {
        Asn1Error::NomError(kind)
    }
    fn append(_input: I, kind: ErrorKind, _other: Self) -> Self {
        Asn1Error::NomError(kind)
    }
}

impl<I, E> FromExternalError<I, E> for Asn1Error {
    fn from_external_error(_input: I, kind: ErrorKind, _e: E) -> Asn1Error {
        Asn1Error::NomError(kind)
    }
}
