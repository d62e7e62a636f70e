use super::{FromDer, Tagged, ToDer};
use crate::asn1::{Identifier, Tag};
use crate::error::{Asn1Error, Asn1Result};

/// REAL (X.690 8.5), primitive form, binary encoding
///
/// Decoding accepts bases 2, 8 and 16 and any scale factor; encoding always
/// derives the minimal base-2, scale-0 form from the IEEE-754 double bits.
/// The decimal character encoding (ISO 6093) is not supported.
impl Tagged for f64 {
    fn default_identifier() -> Identifier {
        Identifier::universal(Tag::Real)
    }
}

impl<'a> FromDer<'a> for f64 {
    fn from_der_content(content: &'a [u8]) -> Asn1Result<Self> {
        let (&first, rest) = match content.split_first() {
            None => return Ok(0.0),
            Some(split) => split,
        };
        if first & 0x80 == 0 {
            // special values are single octets (8.5.9); everything else in
            // this range is the decimal character encoding
            return match (first, rest.is_empty()) {
                (0x40, true) => Ok(f64::INFINITY),
                (0x41, true) => Ok(f64::NEG_INFINITY),
                (0x40, false) | (0x41, false) => Err(Asn1Error::InvalidAsn1Object(
                    "special REAL value with trailing octets",
                )),
                _ => Err(Asn1Error::InvalidAsn1Object(
                    "decimal REAL encoding is not supported",
                )),
            };
        }

        let sign = if first & 0x40 != 0 { -1.0 } else { 1.0 };
        let base_shift: i64 = match (first >> 4) & 0x03 {
            0b00 => 1, // base 2
            0b01 => 3, // base 8
            0b10 => 4, // base 16
            _ => {
                return Err(Asn1Error::InvalidAsn1Object(
                    "reserved REAL base bits",
                ))
            }
        };
        let scale = i64::from((first >> 2) & 0x03);
        let (exponent_len, rest) = match first & 0x03 {
            0b11 => match rest.split_first() {
                Some((&len, rest)) => (usize::from(len), rest),
                None => {
                    return Err(Asn1Error::InvalidAsn1Object(
                        "REAL exponent length octet is missing",
                    ))
                }
            },
            bits => (usize::from(bits) + 1, rest),
        };
        if exponent_len == 0 || rest.len() < exponent_len {
            return Err(Asn1Error::InvalidAsn1Object(
                "REAL exponent exceeds the content",
            ));
        }
        let (exponent_octets, mantissa_octets) = rest.split_at(exponent_len);
        let exponent = decode_exponent(exponent_octets)?;
        let mantissa = decode_mantissa(mantissa_octets)?;

        let total = exponent
            .checked_mul(base_shift)
            .and_then(|e| e.checked_add(scale))
            .ok_or(Asn1Error::ValueOutOfRange("REAL exponent out of range"))?;
        Ok(sign * scale_by_power_of_two(mantissa, total))
    }
}

impl ToDer for f64 {
    fn write_der_content(&self, out: &mut Vec<u8>) -> Asn1Result<()> {
        let value = *self;
        if value.is_nan() {
            return Err(Asn1Error::InvalidAsn1Object("cannot encode NaN as REAL"));
        }
        if value == 0.0 {
            return Ok(());
        }
        if value.is_infinite() {
            out.push(if value > 0.0 { 0x40 } else { 0x41 });
            return Ok(());
        }

        let bits = value.to_bits();
        let sign = ((bits >> 63) as u8) << 6;
        let biased = ((bits >> 52) & 0x7ff) as i64;
        let fraction = bits & 0x000f_ffff_ffff_ffff;
        // treat the mantissa as an integer: shift the exponent down by the
        // 52 fraction bits; denormals use the fixed -1022 exponent
        let (mut mantissa, mut exponent) = if biased == 0 {
            (fraction, -1022 - 52)
        } else {
            (fraction | (1 << 52), biased - 1023 - 52)
        };
        while mantissa & 0xff == 0 {
            mantissa >>= 8;
            exponent += 8;
        }
        while mantissa & 0x01 == 0 {
            mantissa >>= 1;
            exponent += 1;
        }

        let exponent_octets = encode_exponent(exponent);
        // base 2, scale factor 0
        let mut header = 0x80 | sign;
        if exponent_octets.len() <= 3 {
            header |= exponent_octets.len() as u8 - 1;
            out.push(header);
        } else {
            out.push(header | 0x03);
            out.push(exponent_octets.len() as u8);
        }
        out.extend_from_slice(&exponent_octets);

        let mantissa_octets = mantissa.to_be_bytes();
        let skip = mantissa_octets.iter().take_while(|&&b| b == 0).count();
        out.extend_from_slice(&mantissa_octets[skip..]);
        Ok(())
    }
}

/// Signed big-endian exponent of up to eight significant octets
fn decode_exponent(octets: &[u8]) -> Asn1Result<i64> {
    let fill = if octets[0] & 0x80 != 0 { 0xff } else { 0x00 };
    let mut s = octets;
    // drop redundant sign-extension octets
    while s.len() > 1 && s[0] == fill && (s[1] & 0x80 != 0) == (fill == 0xff) {
        s = &s[1..];
    }
    if s.len() > 8 {
        return Err(Asn1Error::ValueOutOfRange(
            "REAL exponent does not fit in 64 bits",
        ));
    }
    let mut buf = [fill; 8];
    buf[8 - s.len()..].copy_from_slice(s);
    Ok(i64::from_be_bytes(buf))
}

/// Unsigned big-endian mantissa of up to eight significant octets
fn decode_mantissa(octets: &[u8]) -> Asn1Result<u64> {
    let mut s = octets;
    while !s.is_empty() && s[0] == 0 {
        s = &s[1..];
    }
    if s.len() > 8 {
        return Err(Asn1Error::ValueOutOfRange(
            "REAL mantissa does not fit in 64 bits",
        ));
    }
    let mut buf = [0u8; 8];
    buf[8 - s.len()..].copy_from_slice(s);
    Ok(u64::from_be_bytes(buf))
}

/// Minimal two's-complement big-endian encoding of `exponent`
fn encode_exponent(exponent: i64) -> Vec<u8> {
    let bytes = exponent.to_be_bytes();
    let fill = if exponent < 0 { 0xff } else { 0x00 };
    let mut skip = 0;
    // keep one sign-bearing octet: stop trimming when the next octet's MSB
    // disagrees with the sign
    while skip + 1 < bytes.len()
        && bytes[skip] == fill
        && (bytes[skip + 1] & 0x80 != 0) == (exponent < 0)
    {
        skip += 1;
    }
    bytes[skip..].to_vec()
}

/// Compute `mantissa * 2^exponent` without overflowing intermediate powers
fn scale_by_power_of_two(mantissa: u64, exponent: i64) -> f64 {
    let mut value = mantissa as f64;
    let mut e = exponent;
    while e > 0 && value.is_finite() && value != 0.0 {
        let step = e.min(1023);
        value *= pow2(step as i32);
        e -= step;
    }
    while e < 0 && value.is_finite() && value != 0.0 {
        let step = (-e).min(1022);
        value *= pow2(-(step as i32));
        e += step;
    }
    value
}

/// Exact power of two for exponents in the normal f64 range
#[inline]
fn pow2(exponent: i32) -> f64 {
    f64::from_bits(((exponent + 1023) as u64) << 52)
}
