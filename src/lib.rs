//! # BER/DER flat-tree codec
//!
//! A parser and serializer for Basic Encoding Rules (BER [[X.690]]) and
//! Distinguished Encoding Rules (DER [[X.690]]) data, built on the
//! [nom](https://github.com/Geal/nom) parser combinator framework.
//!
//! It is written in pure Rust, fast, and makes extensive use of zero-copy:
//! the parser stores all objects in a single pre-order vector annotated with
//! nesting depths, and child iteration scans that vector instead of building
//! owning substructures. A lot of care is taken to ensure security and safety
//! of this crate, including design (nesting and object-count limits,
//! defensive programming), tests, and fuzzing. It also aims to be panic-free.
//!
//! # Parsing
//!
//! [`parse`] applies the DER constraints and yields a [`Tree`]; [`Node`]
//! views borrow from it. The [`sequence`], [`sequence_of`] and [`set`]
//! helpers walk the children of a constructed node:
//!
//! ```rust
//! use der_codec::{parse, sequence_of};
//! use der_codec::types::{FromDer, Integer};
//!
//! let bytes = [0x30, 0x06, 0x02, 0x01, 0x01, 0x02, 0x01, 0x02];
//!
//! let tree = parse(&bytes).expect("parsing failed");
//! let ints = sequence_of(&tree.root(), |node| Integer::from_der_node(&node))
//!     .expect("decoding failed");
//! assert_eq!(ints[0].as_u32(), Ok(1));
//! assert_eq!(ints[1].as_u32(), Ok(2));
//! ```
//!
//! [`parse_ber`] additionally accepts indefinite-length constructed objects
//! and non-minimal length octets.
//!
//! # Serialization
//!
//! [`Serializer`] builds tag-length-value frames into a growing buffer, with
//! nested frames written through closures. [`Serializer::write_node`]
//! round-trips a parsed tree bit-exactly:
//!
//! ```rust
//! use der_codec::{parse, Serializer};
//!
//! let mut serializer = Serializer::new();
//! serializer.write_sequence(|seq| {
//!     seq.serialize(&true)?;
//!     seq.serialize(&der_codec::types::Integer::from(65_537))
//! }).expect("serialization failed");
//!
//! let bytes = serializer.serialized_bytes();
//! assert_eq!(bytes[0], 0x30);
//! assert!(parse(bytes).is_ok());
//! ```
//!
//! # Notes
//!
//! ## BER/DER integers
//!
//! DER integers can be of any size, so they are decoded into a
//! [`types::Integer`] backed by a big integer. To get a native value, use
//! [`types::Integer::as_u32`] and friends, knowing that these methods return
//! an error if the value is too large.
//!
//! ## Implicit tagging
//!
//! Every value type has a `from_der_node_with_identifier` decoder and a
//! `serialize_with_identifier` encoder: the outer identifier is replaced
//! while the content rules stay those of the underlying type.
//!
//! # References
//!
//! - [[X.680]] Abstract Syntax Notation One (ASN.1): Specification of basic
//!   notation.
//! - [[X.690]] ASN.1 encoding rules: Specification of Basic Encoding Rules
//!   (BER), Canonical Encoding Rules (CER) and Distinguished Encoding Rules
//!   (DER).
//!
//! [X.680]: http://www.itu.int/rec/T-REC-X.680/en "Abstract Syntax Notation One (ASN.1):
//!   Specification of basic notation."
//! [X.690]: https://www.itu.int/rec/T-REC-X.690/en "ASN.1 encoding rules: Specification of
//!   Basic Encoding Rules (BER), Canonical Encoding Rules (CER) and Distinguished Encoding Rules
//!   (DER)."

#![deny(
    unstable_features,
    unused_import_braces,
    unused_qualifications,
    unreachable_pub
)]
#![forbid(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod asn1;
pub mod error;
pub mod parser;
pub mod serializer;
pub mod tree;
pub mod types;

pub use parser::{parse, parse_ber, EncodingRules, MAX_DEPTH, MAX_NODES};
pub use serializer::Serializer;
pub use tree::{sequence, sequence_of, set, Collection, Content, Node, NodeIter, Tree};

pub extern crate nom;
pub extern crate num_bigint;
