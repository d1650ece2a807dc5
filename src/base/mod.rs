//! Foundation types for the xref toolchain.
//!
//! This module provides fundamental types used throughout the engine:
//! - [`ModuleId`] - Interned module identifiers
//! - [`LineCol`], [`Span`] - Source positions supplied by the parser
//!
//! This module has NO dependencies on other xref modules.

mod module_id;
mod span;

pub use module_id::ModuleId;
pub use span::{LineCol, Span};
