// Depth-first cursor over an arena document; navigation is index hopping only.
use crate::core::document::{Document, NodeId, NodeKind, NodeType};

#[derive(Clone, Copy, Debug)]
pub struct Cursor<'a> {
    doc: &'a Document,
    current: NodeId,
}

impl<'a> Cursor<'a> {
    pub fn new(doc: &'a Document) -> Self {
        Self {
            doc,
            current: doc.root(),
        }
    }

    /// Resume at a position saved from an earlier cursor over the same document.
    pub fn at(doc: &'a Document, position: NodeId) -> Self {
        debug_assert!(position.index() < doc.len());
        Self {
            doc,
            current: position,
        }
    }

    pub fn document(&self) -> &'a Document {
        self.doc
    }

    pub fn position(&self) -> NodeId {
        self.current
    }

    pub fn seek(&mut self, position: NodeId) {
        debug_assert!(position.index() < self.doc.len());
        self.current = position;
    }

    pub fn node_type(&self) -> NodeType {
        self.kind().node_type()
    }

    pub fn get_string(&self) -> Option<&'a str> {
        match self.kind() {
            NodeKind::String(value) => Some(&**value),
            _ => None,
        }
    }

    pub fn get_double(&self) -> Option<f64> {
        match self.kind() {
            NodeKind::Double(value) => Some(*value),
            _ => None,
        }
    }

    pub fn get_integer(&self) -> Option<i64> {
        match self.kind() {
            NodeKind::Integer(value) => Some(*value),
            _ => None,
        }
    }

    /// Enter the first child. Returns false for scalars and empty containers.
    pub fn descend(&mut self) -> bool {
        self.hop(self.doc.node(self.current).first_child())
    }

    /// Return to the parent. Returns false at the root.
    pub fn ascend(&mut self) -> bool {
        self.hop(self.doc.node(self.current).parent())
    }

    /// Move to the next sibling. Returns false on the last child.
    pub fn advance(&mut self) -> bool {
        self.hop(self.doc.node(self.current).next_sibling())
    }

    /// Ascend until the root is reached.
    pub fn rewind(&mut self) {
        while self.ascend() {}
    }

    fn kind(&self) -> &'a NodeKind {
        self.doc.node(self.current).kind()
    }

    fn hop(&mut self, target: Option<NodeId>) -> bool {
        match target {
            Some(id) => {
                self.current = id;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Cursor;
    use crate::core::document::{Document, DocumentBuilder, NodeKind, NodeType};

    // {"k": [true, 2.5]}
    fn sample() -> Document {
        let mut b = DocumentBuilder::new(8);
        let root = b.enter(NodeKind::Object, None).unwrap();
        let key = b.push(NodeKind::String("k".into()), Some(root));
        b.link(root, None, key);
        let arr = b.enter(NodeKind::Array, Some(root)).unwrap();
        b.link(root, Some(key), arr);
        let t = b.push(NodeKind::True, Some(arr));
        b.link(arr, None, t);
        let d = b.push(NodeKind::Double(2.5), Some(arr));
        b.link(arr, Some(t), d);
        b.leave();
        b.leave();
        b.finish()
    }

    #[test]
    fn navigation_walks_keys_then_values() {
        let doc = sample();
        let mut cursor = Cursor::new(&doc);
        assert_eq!(cursor.node_type(), NodeType::Object);
        assert!(cursor.descend());
        assert_eq!(cursor.get_string(), Some("k"));
        assert!(cursor.advance());
        assert_eq!(cursor.node_type(), NodeType::Array);
        assert!(!cursor.advance());
        assert!(cursor.descend());
        assert_eq!(cursor.node_type(), NodeType::True);
        assert!(cursor.advance());
        assert_eq!(cursor.get_double(), Some(2.5));
        assert_eq!(cursor.get_integer(), None);
        assert!(!cursor.descend());
    }

    #[test]
    fn rewind_returns_to_root() {
        let doc = sample();
        let mut cursor = Cursor::new(&doc);
        cursor.descend();
        cursor.advance();
        cursor.descend();
        cursor.advance();
        cursor.rewind();
        assert_eq!(cursor.position(), doc.root());
        assert!(!cursor.ascend());
    }

    #[test]
    fn balanced_moves_restore_position() {
        let doc = sample();
        let mut cursor = Cursor::new(&doc);
        cursor.descend();
        cursor.advance();
        let start = cursor.position();
        assert!(cursor.descend());
        assert!(cursor.ascend());
        assert_eq!(cursor.position(), start);
    }
}
