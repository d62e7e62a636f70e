//! DER serializer building tag-length-value frames into a byte buffer
//!
//! The serializer only ever emits definite lengths in minimal form, so its
//! output is valid DER. Constructed frames are produced by running the writer
//! on a nested serializer, then flushing the nested buffer as the content of
//! the outer frame once its length is known.

use crate::asn1::{write_definite_length, Identifier, Tag};
use crate::error::Asn1Result;
use crate::tree::{Content, Node};
use crate::types::ToDer;

/// Composable emitter for BER/DER tag-length-value frames
#[derive(Debug, Default, Clone)]
pub struct Serializer {
    buffer: Vec<u8>,
}

impl Serializer {
    /// Create a new serializer with an empty buffer
    pub fn new() -> Self {
        Serializer { buffer: Vec::new() }
    }

    /// Create a new serializer with a pre-allocated buffer
    pub fn with_capacity(capacity: usize) -> Self {
        Serializer {
            buffer: Vec::with_capacity(capacity),
        }
    }

    /// View the bytes emitted so far
    pub fn serialized_bytes(&self) -> &[u8] {
        &self.buffer
    }

    /// Consume the serializer, returning its buffer
    pub fn into_bytes(self) -> Vec<u8> {
        self.buffer
    }

    /// Emit a primitive frame with the given identifier
    ///
    /// The writer fills a fresh byte sink with the content octets; identifier
    /// and length are emitted around it.
    pub fn append_primitive<F>(&mut self, identifier: Identifier, writer: F) -> Asn1Result<()>
    where
        F: FnOnce(&mut Vec<u8>) -> Asn1Result<()>,
    {
        let mut content = Vec::new();
        writer(&mut content)?;
        identifier.write_wire(false, &mut self.buffer);
        write_definite_length(content.len(), &mut self.buffer);
        self.buffer.extend_from_slice(&content);
        Ok(())
    }

    /// Emit a constructed frame with the given identifier
    ///
    /// The writer runs on a nested serializer whose buffer becomes the content
    /// of the frame; the identifier octet carries the constructed bit.
    pub fn append_constructed<F>(&mut self, identifier: Identifier, writer: F) -> Asn1Result<()>
    where
        F: FnOnce(&mut Serializer) -> Asn1Result<()>,
    {
        let mut nested = Serializer::new();
        writer(&mut nested)?;
        identifier.write_wire(true, &mut self.buffer);
        write_definite_length(nested.buffer.len(), &mut self.buffer);
        self.buffer.append(&mut nested.buffer);
        Ok(())
    }

    /// Emit a universal SEQUENCE frame
    pub fn write_sequence<F>(&mut self, writer: F) -> Asn1Result<()>
    where
        F: FnOnce(&mut Serializer) -> Asn1Result<()>,
    {
        self.append_constructed(Identifier::universal(Tag::Sequence), writer)
    }

    /// Emit a universal SET frame
    pub fn write_set<F>(&mut self, writer: F) -> Asn1Result<()>
    where
        F: FnOnce(&mut Serializer) -> Asn1Result<()>,
    {
        self.append_constructed(Identifier::universal(Tag::Set), writer)
    }

    /// Re-emit a parsed node, recursing through constructed content
    ///
    /// For any valid DER input this reproduces the original bytes exactly,
    /// since identifiers and lengths are re-encoded in their canonical form.
    pub fn write_node(&mut self, node: &Node<'_>) -> Asn1Result<()> {
        match node.content() {
            Content::Primitive(data) => self.append_primitive(node.identifier(), |out| {
                out.extend_from_slice(data);
                Ok(())
            }),
            Content::Constructed(children) => {
                self.append_constructed(node.identifier(), |nested| {
                    for child in children.iter() {
                        nested.write_node(&child)?;
                    }
                    Ok(())
                })
            }
        }
    }

    /// Emit a value through its [`ToDer`] encoder
    pub fn serialize<T: ToDer>(&mut self, value: &T) -> Asn1Result<()> {
        value.serialize(self)
    }
}
