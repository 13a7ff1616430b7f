//! # firelint-core
//!
//! Core engine for firelint: flags Firestore collection references that
//! are not wrapped with a serialization converter.
//!
//! The crate is a pure function set over a host-built syntax tree:
//!
//! - [`SyntaxTree`] / [`TreeBuilder`] — arena-backed tree with parent
//!   edges, populated by a host lowering (see `firelint-js`)
//! - [`is_collection_reference`], [`has_converter_guard`], [`is_exempt`]
//!   — the three predicates behind the rule
//! - [`RequireConverter`] — per-tree orchestration producing
//!   [`Violation`]s in source order
//!
//! No I/O happens here: the host owns parsing, file discovery, and
//! reporting.
//!
//! ## Example
//!
//! ```
//! use firelint_core::{RequireConverter, SyntaxTree};
//! use std::path::Path;
//!
//! // db.collection("users") with no converter
//! let mut b = SyntaxTree::builder();
//! let db = b.identifier("db", Default::default());
//! let callee = b.member_access(db, "collection", Default::default());
//! let arg = b.string("users", Default::default());
//! b.call(callee, vec![arg], Default::default());
//! let tree = b.finish();
//!
//! let violations = RequireConverter::new().check(&tree, Path::new("db.js"));
//! assert_eq!(violations.len(), 1);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod rule;
mod tree;
mod types;

pub use config::{AnalyzerConfig, Config, ConfigError, RuleConfig};
pub use rule::{
    has_converter_guard, is_collection_reference, is_exempt, RequireConverter, CODE, DESCRIPTION,
    MESSAGE, NAME,
};
pub use tree::{NodeId, NodeKind, ScalarValue, Span, SyntaxTree, TreeBuilder};
pub use types::{LintResult, Location, Severity, Suggestion, Violation, ViolationDiagnostic};
