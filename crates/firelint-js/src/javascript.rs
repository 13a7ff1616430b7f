//! JavaScript lowering using Tree-sitter.
//!
//! Maps the Tree-sitter CST onto the core tree model. Only the shapes
//! the rule inspects get a dedicated kind; everything else becomes an
//! `Other` node whose children are still lowered, so parent chains pass
//! through arbitrary wrapper expressions.

use tree_sitter::{Language, Node, Parser};

use firelint_core::{NodeId, ScalarValue, Span, SyntaxTree, TreeBuilder};

use crate::extractor::{ExtractError, LanguageExtractor};

/// Lowers JavaScript source into the core syntax tree.
pub struct JsExtractor {
    language: Language,
}

impl JsExtractor {
    /// Creates a new JavaScript extractor.
    #[must_use]
    pub fn new() -> Self {
        Self {
            language: tree_sitter_javascript::LANGUAGE.into(),
        }
    }
}

impl Default for JsExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageExtractor for JsExtractor {
    fn language_id(&self) -> &'static str {
        "javascript"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &[".js", ".mjs", ".cjs", ".jsx"]
    }

    fn lower(&self, source: &str) -> Result<SyntaxTree, ExtractError> {
        let mut parser = Parser::new();
        parser.set_language(&self.language)?;

        let tree = parser.parse(source, None).ok_or(ExtractError::Parse)?;
        let root = tree.root_node();
        if root.has_error() {
            tracing::debug!("source has syntax errors; lowering error nodes as opaque");
        }

        let mut lowering = Lowering {
            builder: SyntaxTree::builder(),
            src: source.as_bytes(),
        };
        lowering.lower_node(root);
        Ok(lowering.builder.finish())
    }
}

struct Lowering<'s> {
    builder: TreeBuilder,
    src: &'s [u8],
}

impl Lowering<'_> {
    fn text(&self, node: Node<'_>) -> &str {
        std::str::from_utf8(&self.src[node.start_byte()..node.end_byte()]).unwrap_or("")
    }

    fn span(&self, node: Node<'_>) -> Span {
        let start = node.start_position();
        Span::new(
            start.row + 1,
            start.column + 1,
            node.start_byte(),
            node.end_byte() - node.start_byte(),
        )
    }

    fn lower_node(&mut self, node: Node<'_>) -> NodeId {
        let span = self.span(node);
        match node.kind() {
            "call_expression" => self.lower_call(node, span),
            "member_expression" => self.lower_member(node, span),
            "subscript_expression" => self.lower_subscript(node, span),
            "identifier" => {
                let name = self.text(node).to_owned();
                self.builder.identifier(name, span)
            }
            "string" => {
                let value = self.string_value(node);
                self.builder.string(value, span)
            }
            "number" => {
                let text = self.text(node).to_owned();
                self.builder.literal(ScalarValue::Number(text), span)
            }
            "true" => self.builder.literal(ScalarValue::Bool(true), span),
            "false" => self.builder.literal(ScalarValue::Bool(false), span),
            "null" => self.builder.literal(ScalarValue::Null, span),
            _ => self.lower_other(node, span),
        }
    }

    fn lower_call(&mut self, node: Node<'_>, span: Span) -> NodeId {
        let (Some(function), Some(arguments)) = (
            node.child_by_field_name("function"),
            node.child_by_field_name("arguments"),
        ) else {
            // Incomplete call inside a syntax error; keep the subtree opaque.
            return self.lower_other(node, span);
        };

        let callee = self.lower_node(function);

        // Tagged templates reuse call_expression with a template_string
        // in the arguments slot.
        let args = if arguments.kind() == "arguments" {
            self.named_children(arguments)
                .into_iter()
                .map(|child| self.lower_node(child))
                .collect()
        } else {
            vec![self.lower_node(arguments)]
        };

        self.builder.call(callee, args, span)
    }

    fn lower_member(&mut self, node: Node<'_>, span: Span) -> NodeId {
        let (Some(object), Some(property)) = (
            node.child_by_field_name("object"),
            node.child_by_field_name("property"),
        ) else {
            return self.lower_other(node, span);
        };

        let object = self.lower_node(object);
        let name = self.text(property).to_owned();
        self.builder.member_access(object, name, span)
    }

    /// `obj[expr]`: the accessed name is not statically known.
    fn lower_subscript(&mut self, node: Node<'_>, span: Span) -> NodeId {
        let (Some(object), Some(index)) = (
            node.child_by_field_name("object"),
            node.child_by_field_name("index"),
        ) else {
            return self.lower_other(node, span);
        };

        let object = self.lower_node(object);
        let index = self.lower_node(index);
        self.builder.computed_member_access(object, index, span)
    }

    fn lower_other(&mut self, node: Node<'_>, span: Span) -> NodeId {
        let children = self
            .named_children(node)
            .into_iter()
            .map(|child| self.lower_node(child))
            .collect();
        self.builder.other(children, span)
    }

    /// Named children in source order, comments skipped.
    fn named_children<'t>(&self, node: Node<'t>) -> Vec<Node<'t>> {
        let mut cursor = node.walk();
        node.named_children(&mut cursor)
            .filter(|child| child.kind() != "comment")
            .collect()
    }

    /// Cooked string value: fragment and escape children concatenated,
    /// quotes excluded. Escape sequences are kept as written.
    fn string_value(&self, node: Node<'_>) -> String {
        let mut value = String::new();
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            value.push_str(self.text(child));
        }
        value
    }
}
