// Core modules implementing the document arena, navigation, lookup, and error modeling.
pub mod cursor;
pub mod document;
pub mod error;
pub mod materialize;
pub mod path;
pub mod value;
