//! Universal ASN.1 value types and their DER codecs
//!
//! Every type in this module decodes from a parsed [`Node`] and encodes
//! through a [`Serializer`]. The `*_with_identifier` variants implement
//! IMPLICIT tagging: the caller supplies the outer identifier while the
//! content rules stay those of the underlying type.

mod bitstring;
mod boolean;
mod integer;
mod null;
mod octetstring;
mod oid;
mod real;
mod strings;

pub use bitstring::BitString;
pub use integer::Integer;
pub use null::Null;
pub use octetstring::OctetString;
pub use oid::Oid;
pub use strings::{Ia5String, PrintableString, Utf8String};

use crate::asn1::Identifier;
use crate::error::Asn1Result;
use crate::serializer::Serializer;
use crate::tree::Node;

/// A type with a well-known default identifier
pub trait Tagged {
    /// The identifier this type decodes from and encodes to by default
    fn default_identifier() -> Identifier;
}

/// Decode a value of this type from a parsed node
///
/// All the universal types here have primitive content, so implementors only
/// provide the content decoder; identifier and shape verification is shared.
pub trait FromDer<'a>: Tagged + Sized {
    /// Decode from raw content octets
    fn from_der_content(content: &'a [u8]) -> Asn1Result<Self>;

    /// Decode from a node carrying the type's default identifier
    fn from_der_node(node: &Node<'a>) -> Asn1Result<Self> {
        Self::from_der_node_with_identifier(node, Self::default_identifier())
    }

    /// Decode from an IMPLICIT-tagged node carrying `identifier`
    fn from_der_node_with_identifier(node: &Node<'a>, identifier: Identifier) -> Asn1Result<Self> {
        Self::from_der_content(node.expect_primitive(identifier)?)
    }
}

/// Encode a value of this type through a serializer
pub trait ToDer: Tagged {
    /// Append the raw content octets to `out`
    fn write_der_content(&self, out: &mut Vec<u8>) -> Asn1Result<()>;

    /// Emit a frame carrying the type's default identifier
    fn serialize(&self, out: &mut Serializer) -> Asn1Result<()> {
        self.serialize_with_identifier(out, Self::default_identifier())
    }

    /// Emit an IMPLICIT-tagged frame carrying `identifier`
    fn serialize_with_identifier(
        &self,
        out: &mut Serializer,
        identifier: Identifier,
    ) -> Asn1Result<()> {
        out.append_primitive(identifier, |buf| self.write_der_content(buf))
    }
}
