//! Render3 Module
//!
//! Template nodes as produced by the template parser.

pub mod r3_ast;

pub use r3_ast::*;
