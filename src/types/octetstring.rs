use super::{FromDer, Tagged, ToDer};
use crate::asn1::{Identifier, Tag};
use crate::error::Asn1Result;

/// OCTET STRING (X.690 8.7), primitive form only
///
/// The content octets are the value, verbatim. The slice borrows from the
/// parsed input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OctetString<'a>(pub &'a [u8]);

impl<'a> OctetString<'a> {
    /// Borrow the octets
    pub fn as_bytes(&self) -> &'a [u8] {
        self.0
    }
}

impl<'a> AsRef<[u8]> for OctetString<'a> {
    fn as_ref(&self) -> &[u8] {
        self.0
    }
}

impl<'a> Tagged for OctetString<'a> {
    fn default_identifier() -> Identifier {
        Identifier::universal(Tag::OctetString)
    }
}

impl<'a> FromDer<'a> for OctetString<'a> {
    fn from_der_content(content: &'a [u8]) -> Asn1Result<Self> {
        Ok(OctetString(content))
    }
}

impl<'a> ToDer for OctetString<'a> {
    fn write_der_content(&self, out: &mut Vec<u8>) -> Asn1Result<()> {
        out.extend_from_slice(self.0);
        Ok(())
    }
}
