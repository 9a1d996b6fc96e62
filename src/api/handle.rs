//! Purpose: Reusable parsed-document handle for repeated queries.
//! Exports: `Handle`.
//! Role: Parse once, then answer many lookups/existence probes against one document.
//! Invariants: Every query rewinds the cursor to the root first, so results never drift.
//! Invariants: `close` consumes the handle; use after close does not compile.
//! Notes: Query methods take `&mut self`; sharing one handle across threads needs external locking.

use crate::core::cursor::Cursor;
use crate::core::document::{Document, NodeId};
use crate::core::error::Error;
use crate::core::materialize::{Policy, materialize};
use crate::core::path::{Miss, Path, locate, resolve};
use crate::core::value::Value;
use crate::json::parse::to_document;

use super::query::KeyStatus;

#[derive(Debug)]
pub struct Handle {
    document: Document,
    position: NodeId,
}

impl Handle {
    pub fn open(input: &[u8], max_depth: usize) -> Result<Self, Error> {
        let document = to_document(input, max_depth)?;
        tracing::trace!(nodes = document.len(), "handle opened");
        let position = document.root();
        Ok(Self { document, position })
    }

    /// Wrap a document from `parse_document`.
    pub fn from_document(document: Document) -> Self {
        let position = document.root();
        Self { document, position }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn lookup(&mut self, path: &Path, policy: Policy) -> Option<Value> {
        let mut cursor = rewound(&self.document, self.position);
        let found = resolve(&mut cursor, path);
        let value = found.then(|| materialize(&mut cursor, policy));
        self.position = cursor.position();
        value
    }

    /// Like `lookup`, reporting where the path stopped matching.
    pub fn locate(&mut self, path: &Path, policy: Policy) -> Result<Value, Miss> {
        let mut cursor = rewound(&self.document, self.position);
        let result = locate(&mut cursor, path).map(|()| materialize(&mut cursor, policy));
        self.position = cursor.position();
        result
    }

    /// Never returns `KeyStatus::ParseFailure`; the document is already parsed.
    pub fn key_exists(&mut self, path: &Path) -> KeyStatus {
        let mut cursor = rewound(&self.document, self.position);
        let found = resolve(&mut cursor, path);
        self.position = cursor.position();
        KeyStatus::from_found(found)
    }

    pub fn close(self) {
        tracing::trace!(nodes = self.document.len(), "handle closed");
    }
}

fn rewound(document: &Document, position: NodeId) -> Cursor<'_> {
    let mut cursor = Cursor::at(document, position);
    cursor.rewind();
    cursor
}
