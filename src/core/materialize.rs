//! Purpose: Convert the subtree under a cursor into a host value graph.
//! Exports: `Policy`, `ValueBuilder`, `materialize`, `materialize_with`.
//! Role: Single traversal shared by every output representation.
//! Invariants: The cursor is back at its starting node when a call returns.
//! Invariants: Element and key order follow document traversal order.
//! Invariants: Builders only choose representations; they never steer traversal.

use crate::core::cursor::Cursor;
use crate::core::document::NodeType;
use crate::core::value::{Mapping, MappingKind, Value};

/// Container policy for object nodes.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum Policy {
    #[default]
    Dict,
    Record,
}

impl Policy {
    pub fn mapping_kind(self) -> MappingKind {
        match self {
            Policy::Dict => MappingKind::Dict,
            Policy::Record => MappingKind::Record,
        }
    }
}

/// Output construction capability plugged into the traversal.
pub trait ValueBuilder {
    type Output;

    fn null(&mut self) -> Self::Output;
    fn boolean(&mut self, value: bool) -> Self::Output;
    fn integer(&mut self, value: i64) -> Self::Output;
    fn double(&mut self, value: f64) -> Self::Output;
    fn string(&mut self, value: &str) -> Self::Output;
    fn sequence(&mut self, items: Vec<Self::Output>) -> Self::Output;
    fn mapping(&mut self, entries: Vec<(String, Self::Output)>) -> Self::Output;
}

impl ValueBuilder for Policy {
    type Output = Value;

    fn null(&mut self) -> Value {
        Value::Null
    }

    fn boolean(&mut self, value: bool) -> Value {
        Value::Bool(value)
    }

    fn integer(&mut self, value: i64) -> Value {
        Value::Integer(value)
    }

    fn double(&mut self, value: f64) -> Value {
        Value::Double(value)
    }

    fn string(&mut self, value: &str) -> Value {
        Value::String(value.to_string())
    }

    fn sequence(&mut self, items: Vec<Value>) -> Value {
        Value::Sequence(items)
    }

    fn mapping(&mut self, entries: Vec<(String, Value)>) -> Value {
        Value::Mapping(Mapping::from_entries(self.mapping_kind(), entries))
    }
}

pub fn materialize(cursor: &mut Cursor<'_>, policy: Policy) -> Value {
    let mut builder = policy;
    materialize_with(cursor, &mut builder)
}

pub fn materialize_with<B: ValueBuilder>(cursor: &mut Cursor<'_>, builder: &mut B) -> B::Output {
    match cursor.node_type() {
        NodeType::String => builder.string(cursor.get_string().unwrap_or_default()),
        NodeType::Double => builder.double(cursor.get_double().unwrap_or_default()),
        NodeType::Integer => builder.integer(cursor.get_integer().unwrap_or_default()),
        NodeType::True => builder.boolean(true),
        NodeType::False => builder.boolean(false),
        NodeType::Null => builder.null(),
        NodeType::Array => {
            let mut items = Vec::new();
            if cursor.descend() {
                items.push(materialize_with(cursor, builder));
                while cursor.advance() {
                    items.push(materialize_with(cursor, builder));
                }
                cursor.ascend();
            }
            builder.sequence(items)
        }
        NodeType::Object => {
            let mut entries = Vec::new();
            if cursor.descend() {
                loop {
                    let key = cursor.get_string().unwrap_or_default().to_string();
                    if !cursor.advance() {
                        break;
                    }
                    entries.push((key, materialize_with(cursor, builder)));
                    if !cursor.advance() {
                        break;
                    }
                }
                cursor.ascend();
            }
            builder.mapping(entries)
        }
    }
}
