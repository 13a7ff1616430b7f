//! # firelint-js
//!
//! Tree-sitter based JavaScript frontend for firelint.
//!
//! This crate owns the tree the rule engine reads: it parses JavaScript
//! with Tree-sitter and lowers the CST into `firelint-core`'s
//! [`SyntaxTree`](firelint_core::SyntaxTree), establishing parent edges
//! once at construction. It adds:
//!
//! - [`LanguageExtractor`] trait for pluggable language support
//! - [`JsExtractor`] for JavaScript lowering

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod extractor;
pub mod javascript;

pub use extractor::{ExtractError, LanguageExtractor};
pub use javascript::JsExtractor;
