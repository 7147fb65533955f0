//! Style compilation - evaluates component style functions per breakpoint,
//! re-tokenizes their output and diff-compresses it across breakpoints.

pub mod cascade;
pub mod compiler;
pub mod css;
pub mod differ;
pub mod tokenize;

pub use compiler::{CompiledStyles, ComponentPropsMap, ComponentStyleMap, StyleCompiler, StyleFailure};
pub use css::{render_stylesheet, slot_class};
pub use differ::{compress, diff_bag, expand_at};
pub use tokenize::Tokenizer;
