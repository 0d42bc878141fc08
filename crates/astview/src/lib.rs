//! Async AST visualization core.
//!
//! This library runs an external parser executable against caller-supplied
//! source text, captures its diagnostic output through temporary files, and
//! reconstructs the depth-marked line output into an immutable [`Node`] tree
//! that a front-end can render however it likes.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod producer;
pub mod tree;

pub use error::{Error, Result};
pub use producer::AstProducer;
pub use tree::{parse, Node};
