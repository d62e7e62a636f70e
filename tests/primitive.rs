use der_codec::asn1::{Class, Identifier};
use der_codec::error::Asn1Error;
use der_codec::parse;
use der_codec::types::{BitString, FromDer, Integer, Null, OctetString, Oid, Utf8String};
use hex_literal::hex;
use pretty_assertions::assert_eq;

#[test]
fn test_der_bool() {
    let tree = parse(&hex!("01 01 ff")).expect("parsing failed");
    assert_eq!(bool::from_der_node(&tree.root()), Ok(true));

    let tree = parse(&hex!("01 01 00")).expect("parsing failed");
    assert_eq!(bool::from_der_node(&tree.root()), Ok(false));

    let tree = parse(&hex!("01 01 01")).expect("parsing failed");
    assert_eq!(
        bool::from_der_node(&tree.root()),
        Err(Asn1Error::InvalidAsn1Object("boolean octet must be 0x00 or 0xff"))
    );
}

#[test]
fn test_der_int() {
    let tree = parse(&hex!("02 01 7f")).expect("parsing failed");
    let value = Integer::from_der_node(&tree.root()).expect("decoding failed");
    assert_eq!(value.as_i64(), Ok(127));

    let tree = parse(&hex!("02 01 80")).expect("parsing failed");
    let value = Integer::from_der_node(&tree.root()).expect("decoding failed");
    assert_eq!(value.as_i64(), Ok(-128));

    let tree = parse(&hex!("02 03 01 00 01")).expect("parsing failed");
    let value = Integer::from_der_node(&tree.root()).expect("decoding failed");
    assert_eq!(value.as_u64(), Ok(65_537));

    let tree = parse(&hex!("02 02 00 7f")).expect("parsing failed");
    assert_eq!(
        Integer::from_der_node(&tree.root()),
        Err(Asn1Error::InvalidAsn1IntegerEncoding("redundant leading zero octet"))
    );
}

#[test]
fn test_der_int_type_mismatch() {
    let tree = parse(&hex!("04 01 7f")).expect("parsing failed");
    assert_eq!(
        Integer::from_der_node(&tree.root()),
        Err(Asn1Error::UnexpectedFieldType(
            "identifier does not match the expected type"
        ))
    );
}

#[test]
fn test_der_utf8string() {
    let tree = parse(&hex!("0c 02 48 49")).expect("parsing failed");
    let s = Utf8String::from_der_node(&tree.root()).expect("decoding failed");
    assert_eq!(s.as_str(), "HI");
}

#[test]
fn test_der_octetstring() {
    let tree = parse(&hex!("04 05 41 41 41 41 41")).expect("parsing failed");
    let os = OctetString::from_der_node(&tree.root()).expect("decoding failed");
    assert_eq!(os.as_bytes(), b"AAAAA");
}

#[test]
fn test_der_null() {
    let tree = parse(&hex!("05 00")).expect("parsing failed");
    assert_eq!(Null::from_der_node(&tree.root()), Ok(Null));

    let tree = parse(&hex!("05 01 00")).expect("parsing failed");
    assert_eq!(
        Null::from_der_node(&tree.root()),
        Err(Asn1Error::InvalidAsn1Object("null content must be empty"))
    );
}

#[test]
fn test_der_oid() {
    let tree = parse(&hex!("06 06 2a 86 48 86 f7 0d")).expect("parsing failed");
    let oid = Oid::from_der_node(&tree.root()).expect("decoding failed");
    assert_eq!(oid.components(), &[1, 2, 840, 113_549]);
    assert_eq!(format!("{}", oid), "1.2.840.113549");

    let tree = parse(&hex!("06 09 2a 86 48 86 f7 0d 01 01 05")).expect("parsing failed");
    let oid = Oid::from_der_node(&tree.root()).expect("decoding failed");
    assert_eq!(oid.components(), &[1, 2, 840, 113_549, 1, 1, 5]);
}

#[test]
fn test_der_bitstring() {
    let tree = parse(&hex!("03 02 03 a0")).expect("parsing failed");
    let bs = BitString::from_der_node(&tree.root()).expect("decoding failed");
    assert_eq!(bs.unused_bits(), 3);
    assert_eq!(bs.data(), &[0xa0]);
    assert!(bs.is_set(0));
    assert!(!bs.is_set(1));
    assert!(bs.is_set(2));

    let tree = parse(&hex!("03 02 03 a1")).expect("parsing failed");
    assert_eq!(
        BitString::from_der_node(&tree.root()),
        Err(Asn1Error::InvalidAsn1Object("bit string padding bits are not zero"))
    );
}

#[test]
fn test_der_real() {
    let tree = parse(&hex!("09 00")).expect("parsing failed");
    assert_eq!(f64::from_der_node(&tree.root()), Ok(0.0));

    let tree = parse(&hex!("09 01 40")).expect("parsing failed");
    assert_eq!(f64::from_der_node(&tree.root()), Ok(f64::INFINITY));

    let tree = parse(&hex!("09 01 41")).expect("parsing failed");
    assert_eq!(f64::from_der_node(&tree.root()), Ok(f64::NEG_INFINITY));

    let tree = parse(&hex!("09 03 80 01 01")).expect("parsing failed");
    assert_eq!(f64::from_der_node(&tree.root()), Ok(2.0));

    // decimal character encoding is unsupported
    let tree = parse(&hex!("09 04 03 33 2e 31")).expect("parsing failed");
    assert_eq!(
        f64::from_der_node(&tree.root()),
        Err(Asn1Error::InvalidAsn1Object("decimal REAL encoding is not supported"))
    );
}

#[test]
fn test_implicit_tagging() {
    // [0] IMPLICIT INTEGER, primitive context-specific tag 0
    let tree = parse(&hex!("80 01 2a")).expect("parsing failed");
    let id = Identifier::new(Class::ContextSpecific, 0);
    let value =
        Integer::from_der_node_with_identifier(&tree.root(), id).expect("decoding failed");
    assert_eq!(value.as_i64(), Ok(42));

    // the default identifier no longer matches
    assert_eq!(
        Integer::from_der_node(&tree.root()),
        Err(Asn1Error::UnexpectedFieldType(
            "identifier does not match the expected type"
        ))
    );
}

#[test]
fn test_constructed_shape_mismatch() {
    let tree = parse(&hex!("30 03 02 01 01")).expect("parsing failed");
    assert_eq!(
        OctetString::from_der_node_with_identifier(
            &tree.root(),
            Identifier::universal(der_codec::asn1::Tag::Sequence)
        ),
        Err(Asn1Error::UnexpectedFieldType(
            "expected primitive content, found constructed"
        ))
    );
}
