//! Language-agnostic lowering trait.
//!
//! `LanguageExtractor` is the extension point for adding new languages.
//! Implement it to teach firelint how to lower another language's parse
//! tree into the core [`SyntaxTree`].

use firelint_core::SyntaxTree;

/// Errors from parsing and lowering a source file.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// The Tree-sitter grammar could not be loaded.
    #[error("failed to load grammar: {0}")]
    Language(#[from] tree_sitter::LanguageError),

    /// The parser produced no tree for the input.
    #[error("parser produced no tree")]
    Parse,
}

/// Trait for language-specific lowering into the core tree model.
///
/// The extractor receives raw source text and returns a [`SyntaxTree`]
/// with parent edges established, ready for the rule engine. Constructs
/// the rule does not inspect lower to `Other` nodes, so an extractor
/// does not need to model the full grammar.
pub trait LanguageExtractor: Send + Sync {
    /// Language identifier (e.g., `"javascript"`).
    fn language_id(&self) -> &'static str;

    /// File extensions this extractor handles (e.g., `&[".js", ".mjs"]`).
    fn extensions(&self) -> &'static [&'static str];

    /// Parses source code and lowers it to a syntax tree.
    ///
    /// # Errors
    ///
    /// Returns an error if the grammar cannot be loaded or the parser
    /// yields no tree. Syntax errors in the source do not fail lowering:
    /// error nodes become `Other` and the rest of the file still
    /// analyzes.
    fn lower(&self, source: &str) -> Result<SyntaxTree, ExtractError>;
}
