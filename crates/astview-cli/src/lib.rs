//! Astview CLI - render external parser output as a tree.
//!
//! This crate is the front-end around the `astview` core: it loads source
//! text from a file or stdin, invokes the external parser through
//! [`astview::AstProducer`], and renders the resulting tree as connector art
//! or JSON.

#![forbid(unsafe_code)]

pub mod cli;
pub mod output;
