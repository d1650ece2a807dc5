//! IDE features — High-level queries over an analysis run.
//!
//! This module sits between the semantic model (HIR) and whatever front end
//! reports results. Each function answers one query.
//!
//! ## Design Principles
//!
//! 1. **Pure functions**: Take data in, return data out
//! 2. **No protocol types**: Front ends convert at their own boundary
//!
//! ## Usage
//!
//! The recommended way to use this module is through `AnalysisHost`:
//!
//! ```
//! use xref::ide::AnalysisHost;
//! use xref::syntax::{Expr, SourceModule, Stmt};
//!
//! let mut host = AnalysisHost::new();
//! let main = host
//!     .set_module(
//!         SourceModule::new("main.ts")
//!             .with_statement(Stmt::ret(Expr::string("x")))
//!             .with_statement(Stmt::expr(Expr::ident("console")).at(1, 0)),
//!     )
//!     .unwrap();
//!
//! let analysis = host.analysis();
//! assert_eq!(analysis.diagnostics(main).len(), 1);
//! ```

mod analysis;
mod call_hierarchy;
mod goto;
mod hover;
mod references;
mod rename;

pub use analysis::{Analysis, AnalysisHost};
pub use call_hierarchy::{IncomingCall, OutgoingCall, incoming_calls, outgoing_calls};
pub use goto::goto_definition;
pub use hover::{HoverInfo, hover};
pub use references::find_references;
pub use rename::{RenameError, SourceChange, rename};
