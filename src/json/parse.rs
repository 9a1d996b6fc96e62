//! Purpose: Build arena documents from raw JSON bytes via simd-json.
//! Exports: `to_document`, `ParseFailureCategory`, `categorize_error`, `hint_for_error`.
//! Role: Parser boundary that centralizes simd-json usage details.
//! Invariants: Input buffers are copied once to satisfy simd-json's mutable-slice API.
//! Invariants: The scratch copy is reserved up front; reservation failure is `Alloc`, not `Parse`.
//! Invariants: Depth is checked while building, so over-deep input never yields a document.
//! Invariants: Requested depth bounds are clamped to `MAX_DEPTH_LIMIT` to keep recursion bounded.
//! Notes: Duplicate object keys are kept as separate key/value pairs.

use std::fmt;

use serde::de::{self, DeserializeSeed, Deserializer, MapAccess, SeqAccess, Visitor};

use crate::core::document::{Document, DocumentBuilder, MAX_DEPTH_LIMIT, NodeId, NodeKind};
use crate::core::error::{Error, ErrorKind};

/// Inputs beyond this size are rejected before any reservation.
pub(crate) const MAX_INPUT_LEN: usize = u32::MAX as usize;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum ParseFailureCategory {
    Syntax,
    Utf8,
    DepthLimit,
    NumericRange,
    Eof,
    Unknown,
}

impl ParseFailureCategory {
    pub(crate) fn label(self) -> &'static str {
        match self {
            ParseFailureCategory::Syntax => "syntax",
            ParseFailureCategory::Utf8 => "utf8",
            ParseFailureCategory::DepthLimit => "depth-limit",
            ParseFailureCategory::NumericRange => "numeric-range",
            ParseFailureCategory::Eof => "eof",
            ParseFailureCategory::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ParseFailureCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

pub(crate) fn to_document(input: &[u8], max_depth: usize) -> Result<Document, Error> {
    if input.len() > MAX_INPUT_LEN {
        tracing::error!(len = input.len(), "input exceeds maximum document size");
        return Err(Error::new(ErrorKind::Alloc)
            .with_message("input exceeds maximum document size")
            .with_hint(format!("Documents are limited to {MAX_INPUT_LEN} bytes.")));
    }

    if max_depth > MAX_DEPTH_LIMIT {
        tracing::debug!(requested = max_depth, limit = MAX_DEPTH_LIMIT, "clamping max depth");
    }
    let max_depth = max_depth.min(MAX_DEPTH_LIMIT);

    let mut scratch: Vec<u8> = Vec::new();
    if let Err(err) = scratch.try_reserve_exact(input.len()) {
        tracing::error!(len = input.len(), "failure during memory allocation");
        return Err(Error::new(ErrorKind::Alloc)
            .with_message("failed to reserve parse buffer")
            .with_source(err));
    }
    scratch.extend_from_slice(input);

    let result = simd_json::Deserializer::from_slice(&mut scratch).and_then(|mut de| {
        let mut builder = DocumentBuilder::with_capacity(max_depth, input.len() / 8 + 1);
        NodeSeed {
            builder: &mut builder,
            parent: None,
        }
        .deserialize(&mut de)?;
        Ok(builder.finish())
    });

    result.map_err(|err| {
        let category = categorize_error(&err);
        tracing::debug!(category = category.label(), "json parse failed");
        Error::new(ErrorKind::Parse)
            .with_message("invalid json")
            .with_hint(hint_for_error(&err, "document"))
            .with_source(err)
    })
}

pub(crate) fn categorize_error(err: &simd_json::Error) -> ParseFailureCategory {
    categorize_message(&err.to_string())
}

pub(crate) fn categorize_message(message: &str) -> ParseFailureCategory {
    let lower = message.to_ascii_lowercase();
    if lower.contains("depth") || lower.contains("recursion limit") {
        ParseFailureCategory::DepthLimit
    } else if lower.contains("utf8") || lower.contains("utf-8") {
        ParseFailureCategory::Utf8
    } else if lower.contains("number") || lower.contains("overflow") || lower.contains("exponent")
    {
        ParseFailureCategory::NumericRange
    } else if lower.contains("eof") || lower.contains("end of") || lower.contains("empty") {
        ParseFailureCategory::Eof
    } else if lower.contains("syntax")
        || lower.contains("expected")
        || lower.contains("unexpected")
        || lower.contains("invalid")
    {
        ParseFailureCategory::Syntax
    } else {
        ParseFailureCategory::Unknown
    }
}

pub(crate) fn hint_for_error(err: &simd_json::Error, context: &str) -> String {
    format!(
        "parse category: {}; context: {context}",
        categorize_error(err).label()
    )
}

struct NodeSeed<'b> {
    builder: &'b mut DocumentBuilder,
    parent: Option<NodeId>,
}

impl<'de> DeserializeSeed<'de> for NodeSeed<'_> {
    type Value = NodeId;

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<NodeId, D::Error> {
        deserializer.deserialize_any(self)
    }
}

impl<'de> Visitor<'de> for NodeSeed<'_> {
    type Value = NodeId;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("any JSON value")
    }

    fn visit_bool<E: de::Error>(self, value: bool) -> Result<NodeId, E> {
        let kind = if value { NodeKind::True } else { NodeKind::False };
        Ok(self.builder.push(kind, self.parent))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<NodeId, E> {
        Ok(self.builder.push(NodeKind::Integer(value), self.parent))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<NodeId, E> {
        let kind = match i64::try_from(value) {
            Ok(value) => NodeKind::Integer(value),
            Err(_) => NodeKind::Double(value as f64),
        };
        Ok(self.builder.push(kind, self.parent))
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<NodeId, E> {
        Ok(self.builder.push(NodeKind::Double(value), self.parent))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<NodeId, E> {
        Ok(self.builder.push(NodeKind::String(value.into()), self.parent))
    }

    fn visit_unit<E: de::Error>(self) -> Result<NodeId, E> {
        Ok(self.builder.push(NodeKind::Null, self.parent))
    }

    fn visit_none<E: de::Error>(self) -> Result<NodeId, E> {
        self.visit_unit()
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<NodeId, A::Error> {
        let builder = self.builder;
        let id = builder
            .enter(NodeKind::Array, self.parent)
            .map_err(de::Error::custom)?;
        let mut prev = None;
        while let Some(child) = seq.next_element_seed(NodeSeed {
            builder: &mut *builder,
            parent: Some(id),
        })? {
            builder.link(id, prev, child);
            prev = Some(child);
        }
        builder.leave();
        Ok(id)
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<NodeId, A::Error> {
        let builder = self.builder;
        let id = builder
            .enter(NodeKind::Object, self.parent)
            .map_err(de::Error::custom)?;
        let mut prev = None;
        while let Some(key) = map.next_key_seed(KeySeed)? {
            let key_id = builder.push(NodeKind::String(key), Some(id));
            builder.link(id, prev, key_id);
            let value_id = map.next_value_seed(NodeSeed {
                builder: &mut *builder,
                parent: Some(id),
            })?;
            builder.link(id, Some(key_id), value_id);
            prev = Some(value_id);
        }
        builder.leave();
        Ok(id)
    }
}

struct KeySeed;

impl<'de> DeserializeSeed<'de> for KeySeed {
    type Value = Box<str>;

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<Box<str>, D::Error> {
        deserializer.deserialize_str(self)
    }
}

impl<'de> Visitor<'de> for KeySeed {
    type Value = Box<str>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an object key")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Box<str>, E> {
        Ok(value.into())
    }
}
