use core::fmt;

use super::{FromDer, Tagged, ToDer};
use crate::asn1::{Identifier, Tag};
use crate::error::{Asn1Error, Asn1Result};
use num_bigint::BigInt;

/// INTEGER (X.690 8.3): arbitrary-precision signed integer
///
/// The content octets are the two's-complement big-endian value in minimal
/// form. DER integers can be of any size, so the value is held as a `BigInt`;
/// use [`as_i64`](Integer::as_i64) and friends to extract a native value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Integer(BigInt);

impl Integer {
    /// Wrap a big integer
    pub fn new(value: BigInt) -> Self {
        Integer(value)
    }

    /// Borrow the underlying big integer
    pub fn as_bigint(&self) -> &BigInt {
        &self.0
    }

    /// Attempt to read the value as an `i64`
    ///
    /// Fails with [`Asn1Error::ValueOutOfRange`] if the value does not fit.
    pub fn as_i64(&self) -> Asn1Result<i64> {
        let bytes = self.0.to_signed_bytes_be();
        decode_array_int8(&bytes).map(i64::from_be_bytes)
    }

    /// Attempt to read the value as an `i32`
    pub fn as_i32(&self) -> Asn1Result<i32> {
        let bytes = self.0.to_signed_bytes_be();
        decode_array_int4(&bytes).map(i32::from_be_bytes)
    }

    /// Attempt to read the value as a `u64`
    ///
    /// Fails with [`Asn1Error::ValueOutOfRange`] if the value is negative or
    /// does not fit.
    pub fn as_u64(&self) -> Asn1Result<u64> {
        let bytes = self.0.to_signed_bytes_be();
        decode_array_uint8(&bytes).map(u64::from_be_bytes)
    }

    /// Attempt to read the value as a `u32`
    pub fn as_u32(&self) -> Asn1Result<u32> {
        let bytes = self.0.to_signed_bytes_be();
        decode_array_uint4(&bytes).map(u32::from_be_bytes)
    }
}

impl fmt::Display for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<BigInt> for Integer {
    fn from(v: BigInt) -> Self {
        Integer(v)
    }
}

impl From<i64> for Integer {
    fn from(v: i64) -> Self {
        Integer(BigInt::from(v))
    }
}

impl From<u64> for Integer {
    fn from(v: u64) -> Self {
        Integer(BigInt::from(v))
    }
}

impl From<i32> for Integer {
    fn from(v: i32) -> Self {
        Integer(BigInt::from(v))
    }
}

impl From<u32> for Integer {
    fn from(v: u32) -> Self {
        Integer(BigInt::from(v))
    }
}

impl Tagged for Integer {
    fn default_identifier() -> Identifier {
        Identifier::universal(Tag::Integer)
    }
}

impl<'a> FromDer<'a> for Integer {
    fn from_der_content(content: &'a [u8]) -> Asn1Result<Self> {
        if content.is_empty() {
            return Err(Asn1Error::InvalidAsn1Object(
                "integer content must not be empty",
            ));
        }
        // DER 8.3.2: the first nine bits must not be all zeros or all ones
        if content.len() > 1 {
            if content[0] == 0x00 && content[1] & 0x80 == 0 {
                return Err(Asn1Error::InvalidAsn1IntegerEncoding(
                    "redundant leading zero octet",
                ));
            }
            if content[0] == 0xff && content[1] & 0x80 != 0 {
                return Err(Asn1Error::InvalidAsn1IntegerEncoding(
                    "redundant leading 0xff octet",
                ));
            }
        }
        Ok(Integer(BigInt::from_signed_bytes_be(content)))
    }
}

impl ToDer for Integer {
    fn write_der_content(&self, out: &mut Vec<u8>) -> Asn1Result<()> {
        // BigInt already produces the minimal two's-complement form
        out.extend_from_slice(&self.0.to_signed_bytes_be());
        Ok(())
    }
}

/// Is the highest bit of the first byte in the slice 1? (if present)
#[inline]
fn is_highest_bit_set(bytes: &[u8]) -> bool {
    bytes
        .first()
        .map(|byte| byte & 0b1000_0000 != 0)
        .unwrap_or(false)
}

fn decode_array_uint8(mut bytes: &[u8]) -> Asn1Result<[u8; 8]> {
    // Check if MSB is set *before* leading zeroes
    if is_highest_bit_set(bytes) {
        return Err(Asn1Error::ValueOutOfRange(
            "negative integer cannot be read as unsigned",
        ));
    }

    if bytes.len() > 9 {
        return Err(Asn1Error::ValueOutOfRange("integer does not fit in 64 bits"));
    } else if bytes.len() == 9 {
        if bytes[0] != 0 {
            return Err(Asn1Error::ValueOutOfRange("integer does not fit in 64 bits"));
        }
        bytes = &bytes[1..];
    }

    // Input has leading zeroes removed, so we need to add them back
    let mut output = [0u8; 8];
    output[8_usize.saturating_sub(bytes.len())..].copy_from_slice(bytes);
    Ok(output)
}

fn decode_array_uint4(mut bytes: &[u8]) -> Asn1Result<[u8; 4]> {
    if is_highest_bit_set(bytes) {
        return Err(Asn1Error::ValueOutOfRange(
            "negative integer cannot be read as unsigned",
        ));
    }

    if bytes.len() > 5 {
        return Err(Asn1Error::ValueOutOfRange("integer does not fit in 32 bits"));
    } else if bytes.len() == 5 {
        if bytes[0] != 0 {
            return Err(Asn1Error::ValueOutOfRange("integer does not fit in 32 bits"));
        }
        bytes = &bytes[1..];
    }

    let mut output = [0u8; 4];
    output[4_usize.saturating_sub(bytes.len())..].copy_from_slice(bytes);
    Ok(output)
}

fn decode_array_int8(input: &[u8]) -> Asn1Result<[u8; 8]> {
    if input.len() > 8 {
        return Err(Asn1Error::ValueOutOfRange("integer does not fit in 64 bits"));
    }
    let fill = if is_highest_bit_set(input) { 0xff } else { 0x00 };
    let mut output = [fill; 8];
    output[8 - input.len()..].copy_from_slice(input);
    Ok(output)
}

fn decode_array_int4(input: &[u8]) -> Asn1Result<[u8; 4]> {
    if input.len() > 4 {
        return Err(Asn1Error::ValueOutOfRange("integer does not fit in 32 bits"));
    }
    let fill = if is_highest_bit_set(input) { 0xff } else { 0x00 };
    let mut output = [fill; 4];
    output[4 - input.len()..].copy_from_slice(input);
    Ok(output)
}
