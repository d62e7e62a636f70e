use super::{FromDer, Tagged, ToDer};
use crate::asn1::{Identifier, Tag};
use crate::error::{Asn1Error, Asn1Result};

/// BOOLEAN (X.690 8.2)
///
/// The content is a single octet. DER narrows the encoding of TRUE to 0xff;
/// any other non-zero octet is rejected.
impl Tagged for bool {
    fn default_identifier() -> Identifier {
        Identifier::universal(Tag::Boolean)
    }
}

impl<'a> FromDer<'a> for bool {
    fn from_der_content(content: &'a [u8]) -> Asn1Result<Self> {
        match content {
            [0x00] => Ok(false),
            [0xff] => Ok(true),
            [_] => Err(Asn1Error::InvalidAsn1Object(
                "boolean octet must be 0x00 or 0xff",
            )),
            _ => Err(Asn1Error::InvalidAsn1Object(
                "boolean content must be a single octet",
            )),
        }
    }
}

impl ToDer for bool {
    fn write_der_content(&self, out: &mut Vec<u8>) -> Asn1Result<()> {
        out.push(if *self { 0xff } else { 0x00 });
        Ok(())
    }
}
