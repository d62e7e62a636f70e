use super::{FromDer, Tagged, ToDer};
use crate::asn1::{Identifier, Tag};
use crate::error::{Asn1Error, Asn1Result};

/// NULL (X.690 8.8): no content
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Null;

impl Tagged for Null {
    fn default_identifier() -> Identifier {
        Identifier::universal(Tag::Null)
    }
}

impl<'a> FromDer<'a> for Null {
    fn from_der_content(content: &'a [u8]) -> Asn1Result<Self> {
        if !content.is_empty() {
            return Err(Asn1Error::InvalidAsn1Object("null content must be empty"));
        }
        Ok(Null)
    }
}

impl ToDer for Null {
    fn write_der_content(&self, _out: &mut Vec<u8>) -> Asn1Result<()> {
        Ok(())
    }
}
