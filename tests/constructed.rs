use der_codec::error::Asn1Error;
use der_codec::types::{FromDer, Integer, OctetString, Oid, Utf8String};
use der_codec::{parse, sequence, sequence_of, set, Content};
use hex_literal::hex;
use pretty_assertions::assert_eq;

#[test]
fn test_sequence_of_integers() {
    let bytes = hex!("30 06 02 01 01 02 01 02");
    let tree = parse(&bytes).expect("parsing failed");
    let values = sequence_of(&tree.root(), |node| {
        Integer::from_der_node(&node)?.as_u32()
    })
    .expect("decoding failed");
    assert_eq!(values, vec![1, 2]);
}

#[test]
fn test_sequence_builder() {
    // SEQUENCE { INTEGER, OCTET STRING }
    let bytes = hex!("30 0a 02 03 01 00 01 04 03 01 00 00");
    let tree = parse(&bytes).expect("parsing failed");
    let root = tree.root();

    let (a, b) = sequence(&root, |iter| {
        let a = match iter.next() {
            Some(node) => Integer::from_der_node(&node)?,
            None => return Err(Asn1Error::InvalidAsn1Object("missing integer")),
        };
        let b = match iter.next() {
            Some(node) => OctetString::from_der_node(&node)?,
            None => return Err(Asn1Error::InvalidAsn1Object("missing octet string")),
        };
        Ok((a, b))
    })
    .expect("decoding failed");

    assert_eq!(a.as_u64(), Ok(0x10001));
    assert_eq!(b.as_bytes(), &[0x01, 0x00, 0x00]);
}

#[test]
fn test_sequence_requires_all_children_consumed() {
    let bytes = hex!("30 06 02 01 01 02 01 02");
    let tree = parse(&bytes).expect("parsing failed");
    let result: Result<_, _> = sequence(&tree.root(), |iter| {
        let first = match iter.next() {
            Some(node) => Integer::from_der_node(&node),
            None => Err(Asn1Error::InvalidAsn1Object("missing integer")),
        };
        first
    });
    assert_eq!(
        result,
        Err(Asn1Error::InvalidAsn1Object(
            "constructed object has unconsumed children"
        ))
    );
}

#[test]
fn test_sequence_rejects_primitive_node() {
    let tree = parse(&hex!("02 01 01")).expect("parsing failed");
    assert_eq!(
        sequence_of(&tree.root(), |node| Integer::from_der_node(&node)),
        Err(Asn1Error::UnexpectedFieldType(
            "identifier does not match the expected type"
        ))
    );
}

#[test]
fn test_set_builder() {
    // SET { BOOLEAN }
    let bytes = hex!("31 03 01 01 ff");
    let tree = parse(&bytes).expect("parsing failed");
    let value = set(&tree.root(), |iter| match iter.next() {
        Some(node) => bool::from_der_node(&node),
        None => Err(Asn1Error::InvalidAsn1Object("missing boolean")),
    })
    .expect("decoding failed");
    assert!(value);
}

#[test]
fn test_nested_name_structure() {
    // an X.501-style RDN fragment:
    // SEQUENCE { SET { SEQUENCE { OID, UTF8String } } }
    let bytes = hex!(
        "30 13 31 11 30 0f 06 03 55 04 08 0c 08 4e 65 77 20 59 6f 72 6b"
    );
    let tree = parse(&bytes).expect("parsing failed");

    let names = sequence_of(&tree.root(), |rdn| {
        set(&rdn, |iter| {
            let attribute = match iter.next() {
                Some(node) => node,
                None => return Err(Asn1Error::InvalidAsn1Object("missing attribute")),
            };
            sequence(&attribute, |fields| {
                let oid = match fields.next() {
                    Some(node) => Oid::from_der_node(&node)?,
                    None => return Err(Asn1Error::InvalidAsn1Object("missing attribute type")),
                };
                let value = match fields.next() {
                    Some(node) => Utf8String::from_der_node(&node)?,
                    None => return Err(Asn1Error::InvalidAsn1Object("missing attribute value")),
                };
                Ok((oid, value.as_str()))
            })
        })
    })
    .expect("decoding failed");

    assert_eq!(names.len(), 1);
    assert_eq!(format!("{}", names[0].0), "2.5.4.8");
    assert_eq!(names[0].1, "New York");
}

#[test]
fn test_iterator_peek_and_clone() {
    let bytes = hex!("30 06 02 01 01 02 01 02");
    let tree = parse(&bytes).expect("parsing failed");
    let root = tree.root();
    let children = match root.content() {
        Content::Constructed(c) => c,
        Content::Primitive(_) => panic!("expected constructed root"),
    };

    let mut iter = children.iter();
    let peeked = iter.peek().expect("expected a first child");
    let first = iter.next().expect("expected a first child");
    assert_eq!(peeked, first);

    // clones are independent cursors
    let snapshot = iter.clone();
    assert_eq!(iter.count(), 1);
    assert_eq!(snapshot.count(), 1);
}

#[test]
fn test_subtree_spans_partition_root() {
    // SEQUENCE { INTEGER, SEQUENCE { INTEGER, INTEGER }, OCTET STRING }
    let bytes = hex!("30 0f 02 01 01 30 06 02 01 02 02 01 03 04 02 aa bb");
    let tree = parse(&bytes).expect("parsing failed");
    let root = tree.root();
    let children = match root.content() {
        Content::Constructed(c) => c,
        Content::Primitive(_) => panic!("expected constructed root"),
    };

    // the children's encoded frames tile the root's content exactly
    let content_len: usize = children.iter().map(|n| n.encoded_bytes().len()).sum();
    assert_eq!(content_len + 2, root.encoded_bytes().len());

    let mut offset = 2;
    for child in children.iter() {
        let frame = child.encoded_bytes();
        assert_eq!(frame, &root.encoded_bytes()[offset..offset + frame.len()]);
        offset += frame.len();
    }
    assert_eq!(offset, root.encoded_bytes().len());
}

#[test]
fn test_empty_sequence() {
    let tree = parse(&hex!("30 00")).expect("parsing failed");
    let values = sequence_of(&tree.root(), |node| Integer::from_der_node(&node))
        .expect("decoding failed");
    assert!(values.is_empty());

    let unit = sequence(&tree.root(), |_| Ok(())).expect("decoding failed");
    assert_eq!(unit, ());
}
