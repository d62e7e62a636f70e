//! Recursive-descent BER/DER parser emitting the flat object tree
//!
//! The parser walks the input once, emitting one [`FlatNode`] record per
//! object in pre-order. Definite-length constructed objects recurse on their
//! content slice; indefinite-length objects (BER only) parse children until
//! the end-of-contents sentinel.

use core::convert::TryFrom;

use crate::asn1::{Class, Identifier, Length};
use crate::error::{Asn1Error, Asn1Result, ParseResult};
use crate::tree::{FlatNode, Tree};
use nom::bytes::streaming::{take, take_till};
use nom::combinator::map;
use nom::number::streaming::be_u8;
use nom::sequence::pair;
use nom::{Err, Needed};

/// Maximum nesting depth accepted by the parser
pub const MAX_DEPTH: usize = 50;

/// Maximum number of objects accepted in a single parse
pub const MAX_NODES: usize = 100_000;

/// Encoding rule set applied while parsing
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum EncodingRules {
    /// Distinguished Encoding Rules: canonical, definite lengths only
    Distinguished,
    /// Basic Encoding Rules: indefinite lengths and non-minimal length octets
    Basic,
}

impl EncodingRules {
    #[inline]
    fn is_der(self) -> bool {
        self == EncodingRules::Distinguished
    }
}

/// Decoded identifier and length octets of one object
#[derive(Debug, Copy, Clone, PartialEq)]
struct RawHeader {
    identifier: Identifier,
    constructed: bool,
    length: Length,
}

/// Read the identifier octets: class, constructed flag and tag number
pub(crate) fn parse_identifier(i: &[u8]) -> ParseResult<'_, (Identifier, bool)> {
    let (rem, octet) = be_u8(i)?;
    let class = Class::from_identifier_octet(octet);
    let constructed = octet & 0b0010_0000 != 0;
    match octet & 0b0001_1111 {
        0b0001_1111 => {
            let (rem, number) = parse_long_form_tag_number(rem)?;
            Ok((rem, (Identifier { class, number }, constructed)))
        }
        low => {
            let number = u32::from(low);
            Ok((rem, (Identifier { class, number }, constructed)))
        }
    }
}

#[inline]
fn is_final_septet(byte: u8) -> bool {
    byte & 0x80 == 0
}

/// Read a base-128 big-endian tag number following a `0x1f` leading octet
///
/// Validated strictly: the number must not fit the short form, must not start
/// with a zero septet, and must fit a `u32`.
fn parse_long_form_tag_number(i: &[u8]) -> ParseResult<'_, u32> {
    let (rem, (leading, last)) = pair(take_till(is_final_septet), be_u8)(i)?;
    if leading.first() == Some(&0x80) {
        return Err(Err::Error(Asn1Error::MalformedAsn1Identifier(
            "leading zero octet in long-form tag number",
        )));
    }
    // X.690 doesn't specify a maximum tag width; five septets are the most
    // that can fit the number in a u32
    if leading.len() > 4 {
        return Err(Err::Error(Asn1Error::MalformedAsn1Identifier(
            "tag number does not fit in 32 bits",
        )));
    }
    let mut number: u32 = 0;
    for &byte in leading {
        number = (number << 7) | u32::from(byte & 0x7f);
    }
    if number > (u32::MAX >> 7) {
        return Err(Err::Error(Asn1Error::MalformedAsn1Identifier(
            "tag number does not fit in 32 bits",
        )));
    }
    number = (number << 7) | u32::from(last & 0x7f);
    if number < 31 {
        return Err(Err::Error(Asn1Error::MalformedAsn1Identifier(
            "long form used for a tag number below 31",
        )));
    }
    Ok((rem, number))
}

/// Try to parse input bytes as u64
#[inline]
fn bytes_to_u64(s: &[u8]) -> Result<u64, Asn1Error> {
    let mut u: u64 = 0;
    for &c in s {
        if u & 0xff00_0000_0000_0000 != 0 {
            return Err(Asn1Error::UnsupportedFieldLength(
                "length does not fit in 64 bits",
            ));
        }
        u <<= 8;
        u |= u64::from(c);
    }
    Ok(u)
}

/// Read the length octets following the identifier
pub(crate) fn parse_length(i: &[u8], rules: EncodingRules) -> ParseResult<'_, Length> {
    let (rem, first) = be_u8(i)?;
    if first == 0x80 {
        if rules.is_der() {
            return Err(Err::Error(Asn1Error::UnsupportedFieldLength(
                "indefinite length is forbidden under DER",
            )));
        }
        return Ok((rem, Length::Indefinite));
    }
    if first < 0x80 {
        return Ok((rem, Length::Definite(usize::from(first))));
    }
    let n = usize::from(first & 0x7f);
    // 0xff is reserved (X.690 8.1.3.5)
    if n == 0x7f {
        return Err(Err::Error(Asn1Error::UnsupportedFieldLength(
            "reserved length octet 0xff",
        )));
    }
    let (rem, length_octets) = take(n)(rem)?;
    if rules.is_der() && length_octets[0] == 0x00 {
        return Err(Err::Error(Asn1Error::UnsupportedFieldLength(
            "length octets have leading zero padding",
        )));
    }
    let value = bytes_to_u64(length_octets).map_err(Err::Error)?;
    if rules.is_der() && value < 128 {
        return Err(Err::Error(Asn1Error::UnsupportedFieldLength(
            "long-form length used for a value below 128",
        )));
    }
    let value = usize::try_from(value).map_err(|_| {
        Err::Error(Asn1Error::UnsupportedFieldLength(
            "length does not fit in memory",
        ))
    })?;
    Ok((rem, Length::Definite(value)))
}

fn parse_header(i: &[u8], rules: EncodingRules) -> ParseResult<'_, RawHeader> {
    let (rem, header) = map(
        pair(parse_identifier, move |i| parse_length(i, rules)),
        |((identifier, constructed), length)| RawHeader {
            identifier,
            constructed,
            length,
        },
    )(i)?;
    if header.length == Length::Indefinite && !header.constructed {
        return Err(Err::Error(Asn1Error::UnsupportedFieldLength(
            "indefinite length on a primitive object",
        )));
    }
    Ok((rem, header))
}

#[inline]
fn is_eoc(identifier: Identifier) -> bool {
    identifier.class == Class::Universal && identifier.number == 0
}

/// Parse one object at `depth`, appending its records to `nodes` in pre-order
fn parse_node_recursive<'a>(
    i: &'a [u8],
    depth: usize,
    rules: EncodingRules,
    nodes: &mut Vec<FlatNode<'a>>,
) -> ParseResult<'a, ()> {
    if depth > MAX_DEPTH {
        return Err(Err::Error(Asn1Error::InvalidAsn1Object(
            "maximum nesting depth exceeded",
        )));
    }
    if nodes.len() >= MAX_NODES {
        return Err(Err::Error(Asn1Error::InvalidAsn1Object(
            "maximum object count exceeded",
        )));
    }
    let start = i;
    let (rem, header) = parse_header(i, rules)?;
    let header_len = start.len() - rem.len();

    match header.length {
        Length::Definite(len) => {
            let (after, content) = take(len)(rem)?;
            let encoded = &start[..header_len + len];
            if header.constructed {
                nodes.push(FlatNode {
                    identifier: header.identifier,
                    depth,
                    constructed: true,
                    encoded,
                    data: None,
                });
                let mut inner = content;
                while !inner.is_empty() {
                    let child = nodes.len();
                    let (next, ()) = parse_node_recursive(inner, depth + 1, rules, nodes)?;
                    if is_eoc(nodes[child].identifier) {
                        return Err(Err::Error(Asn1Error::InvalidAsn1Object(
                            "end-of-contents inside a definite-length object",
                        )));
                    }
                    inner = next;
                }
            } else {
                nodes.push(FlatNode {
                    identifier: header.identifier,
                    depth,
                    constructed: false,
                    encoded,
                    data: Some(content),
                });
            }
            Ok((after, ()))
        }
        Length::Indefinite => {
            let placeholder = nodes.len();
            nodes.push(FlatNode {
                identifier: header.identifier,
                depth,
                constructed: true,
                encoded: start,
                data: None,
            });
            let mut inner = rem;
            loop {
                if inner.is_empty() {
                    return Err(Err::Incomplete(Needed::new(2)));
                }
                let child = nodes.len();
                let (next, ()) = parse_node_recursive(inner, depth + 1, rules, nodes)?;
                inner = next;
                if is_eoc(nodes[child].identifier) {
                    if nodes[child].constructed || nodes[child].encoded != &[0x00, 0x00][..] {
                        return Err(Err::Error(Asn1Error::InvalidAsn1Object(
                            "malformed end-of-contents marker",
                        )));
                    }
                    // drop the sentinel, it is not part of the tree
                    nodes.truncate(child);
                    break;
                }
            }
            let consumed = start.len() - inner.len();
            nodes[placeholder].encoded = &start[..consumed];
            Ok((inner, ()))
        }
    }
}

fn parse_tree(input: &[u8], rules: EncodingRules) -> Asn1Result<Tree<'_>> {
    let mut nodes = Vec::new();
    let rem = match parse_node_recursive(input, 1, rules, &mut nodes) {
        Ok((rem, ())) => rem,
        Err(Err::Incomplete(_)) => {
            return Err(Asn1Error::TruncatedAsn1Field(
                "input ended inside an object",
            ))
        }
        Err(Err::Error(e)) | Err(Err::Failure(e)) => return Err(e),
    };
    if !rem.is_empty() {
        return Err(Asn1Error::InvalidAsn1Object(
            "trailing bytes after the top-level object",
        ));
    }
    if nodes.first().map_or(false, |n| is_eoc(n.identifier)) {
        return Err(Asn1Error::InvalidAsn1Object(
            "end-of-contents cannot be a top-level object",
        ));
    }
    Ok(Tree { nodes })
}

/// Parse DER-encoded bytes into an object [`Tree`]
///
/// The whole input must hold exactly one object; trailing bytes are an error.
///
/// # Examples
///
/// ```rust
/// use der_codec::parse;
///
/// let bytes = [0x30, 0x06, 0x02, 0x01, 0x01, 0x02, 0x01, 0x02];
/// let tree = parse(&bytes).expect("parsing failed");
/// assert!(tree.root().is_constructed());
/// ```
pub fn parse(input: &[u8]) -> Asn1Result<Tree<'_>> {
    parse_tree(input, EncodingRules::Distinguished)
}

/// Parse BER-encoded bytes into an object [`Tree`]
///
/// Accepts everything [`parse`] accepts, plus indefinite-length constructed
/// objects and non-minimal length octets.
pub fn parse_ber(input: &[u8]) -> Asn1Result<Tree<'_>> {
    parse_tree(input, EncodingRules::Basic)
}
