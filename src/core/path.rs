//! Purpose: Split path expressions and resolve them against a cursor.
//! Exports: `Path`, `Miss`, `MissReason`, `resolve`, `locate`, `DEFAULT_DELIMITER`.
//! Role: Positions a cursor on the node a path names without materializing anything.
//! Invariants: Segments are split once, before traversal, into an immutable list.
//! Invariants: Index vs key interpretation depends only on the node under the cursor.
//! Invariants: A failed resolve leaves the cursor where the call found it.

use std::fmt;

use crate::core::cursor::Cursor;
use crate::core::document::NodeType;

pub const DEFAULT_DELIMITER: &str = "\t";

#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Path {
    segments: Vec<String>,
}

impl Path {
    /// Split on the default TAB delimiter.
    pub fn parse(expr: &str) -> Self {
        Self::split(expr, DEFAULT_DELIMITER)
    }

    /// Split on `delimiter`, skipping empty tokens. An empty delimiter
    /// yields the whole expression as a single segment.
    pub fn split(expr: &str, delimiter: &str) -> Self {
        if delimiter.is_empty() {
            return Self::from_segments((!expr.is_empty()).then_some(expr));
        }
        Self::from_segments(expr.split(delimiter).filter(|token| !token.is_empty()))
    }

    /// Use pre-split segments verbatim, empty keys included.
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    pub fn root() -> Self {
        Self::default()
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, segment) in self.segments.iter().enumerate() {
            if idx > 0 {
                f.write_str("/")?;
            }
            f.write_str(segment)?;
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MissReason {
    /// The step landed on a scalar, which has no children.
    NotContainer,
    /// The segment is not a non-negative integer but the node is an array.
    BadIndex,
    IndexOutOfRange,
    MissingKey,
}

/// Why and where a path failed to resolve.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Miss {
    pub segment: usize,
    pub reason: MissReason,
}

impl fmt::Display for Miss {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self.reason {
            MissReason::NotContainer => "node is not an array or object",
            MissReason::BadIndex => "array index is not a non-negative integer",
            MissReason::IndexOutOfRange => "array index out of range",
            MissReason::MissingKey => "object has no such key",
        };
        write!(f, "segment {}: {reason}", self.segment)
    }
}

pub fn resolve(cursor: &mut Cursor<'_>, path: &Path) -> bool {
    locate(cursor, path).is_ok()
}

/// Like `resolve`, but reports the first failing segment.
pub fn locate(cursor: &mut Cursor<'_>, path: &Path) -> Result<(), Miss> {
    let start = cursor.position();
    for (idx, segment) in path.segments().iter().enumerate() {
        if let Err(reason) = step(cursor, segment) {
            cursor.seek(start);
            return Err(Miss {
                segment: idx,
                reason,
            });
        }
    }
    Ok(())
}

fn step(cursor: &mut Cursor<'_>, segment: &str) -> Result<(), MissReason> {
    match cursor.node_type() {
        NodeType::Array => select_index(cursor, segment),
        NodeType::Object => select_key(cursor, segment),
        _ => Err(MissReason::NotContainer),
    }
}

fn select_index(cursor: &mut Cursor<'_>, segment: &str) -> Result<(), MissReason> {
    if !segment.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(MissReason::BadIndex);
    }
    let index = segment.parse::<usize>().map_err(|_| MissReason::BadIndex)?;
    if !cursor.descend() {
        return Err(MissReason::IndexOutOfRange);
    }
    for _ in 0..index {
        if !cursor.advance() {
            return Err(MissReason::IndexOutOfRange);
        }
    }
    Ok(())
}

fn select_key(cursor: &mut Cursor<'_>, segment: &str) -> Result<(), MissReason> {
    if !cursor.descend() {
        return Err(MissReason::MissingKey);
    }
    loop {
        let matched = cursor.get_string() == Some(segment);
        // onto the paired value
        if !cursor.advance() {
            return Err(MissReason::MissingKey);
        }
        if matched {
            return Ok(());
        }
        if !cursor.advance() {
            return Err(MissReason::MissingKey);
        }
    }
}
