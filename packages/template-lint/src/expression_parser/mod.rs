/**
 * Expression Parser Module
 *
 * The expression AST consumed by the linter. Parsing itself happens upstream;
 * this module only models its output.
 */
pub mod ast;

pub use ast::*;
