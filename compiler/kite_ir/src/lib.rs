//! Shared intermediate representation for the Kite runtime.
//!
//! The parser lowers source text into an [`ExprArena`]: a flat store of
//! expressions and statements addressed by [`ExprId`] and [`StmtId`]. The
//! evaluator walks that arena directly. Identifiers are interned into a
//! [`StringInterner`] and carried around as 32-bit [`Name`]s.

mod arena;
pub mod ast;
mod ids;
mod interner;
mod name;
mod source_map;
mod span;
mod token;
mod type_tag;

pub use arena::{ExprArena, Module, SharedArena};
pub use ids::{ClassId, ExprId, FunctionId, StmtId};
pub use interner::{InternError, SharedInterner, StringInterner};
pub use name::Name;
pub use source_map::SourceMap;
pub use span::Span;
pub use token::{Token, TokenKind, TokenList};
pub use type_tag::TypeTag;
