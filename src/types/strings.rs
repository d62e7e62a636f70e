use super::{FromDer, Tagged, ToDer};
use crate::asn1::{Identifier, Tag};
use crate::error::{Asn1Error, Asn1Result};

/// Restricted character string types (X.690 8.23), primitive form only
///
/// All three share the same content rules: the octets are the UTF-8 encoding
/// of the string. They differ only in their default identifier. The IA5 and
/// Printable repertoire restrictions are not enforced here; callers that need
/// them can validate on top.
macro_rules! impl_der_string {
    ($(#[$attr:meta])* $name:ident => $tag:ident) => {
        $(#[$attr])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name<'a>(pub &'a str);

        impl<'a> $name<'a> {
            /// Borrow the decoded string
            pub fn as_str(&self) -> &'a str {
                self.0
            }
        }

        impl<'a> AsRef<str> for $name<'a> {
            fn as_ref(&self) -> &str {
                self.0
            }
        }

        impl<'a> Tagged for $name<'a> {
            fn default_identifier() -> Identifier {
                Identifier::universal(Tag::$tag)
            }
        }

        impl<'a> FromDer<'a> for $name<'a> {
            fn from_der_content(content: &'a [u8]) -> Asn1Result<Self> {
                let s = core::str::from_utf8(content).map_err(|_| {
                    Asn1Error::InvalidAsn1Object("string content is not valid UTF-8")
                })?;
                Ok($name(s))
            }
        }

        impl<'a> ToDer for $name<'a> {
            fn write_der_content(&self, out: &mut Vec<u8>) -> Asn1Result<()> {
                out.extend_from_slice(self.0.as_bytes());
                Ok(())
            }
        }
    };
}

impl_der_string!(
    /// UTF8String (universal tag 12)
    Utf8String => Utf8String
);
impl_der_string!(
    /// IA5String (universal tag 22)
    Ia5String => Ia5String
);
impl_der_string!(
    /// PrintableString (universal tag 19)
    PrintableString => PrintableString
);
