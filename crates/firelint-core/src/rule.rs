//! Rule requiring Firestore collection references to attach a converter.
//!
//! # Rationale
//!
//! Reading or writing a collection without a converter hands untyped
//! snapshot data to the caller. Conventionally a converter is chained off
//! the reference (`db.collection("users").withConverter(conv)`), so a
//! reference with no `withConverter` anywhere in its enclosing expression
//! chain is almost always an oversight.
//!
//! # Configuration
//!
//! - `allowed_collections`: collection names exempt from the requirement
//!   (default: empty). Only literal name arguments are matched.
//! - `severity`: severity for violations (default: error).
//!
//! # Limitations
//!
//! Matching is purely syntactic and single-pass: a reference stored in a
//! variable and converted on a later statement is still flagged, and a
//! collection opened through a computed member access
//! (`db["collection"](...)`) is never flagged. The latter is a known
//! false negative inherited from the upstream rule, kept rather than
//! guessed around.

use std::path::Path;

use crate::config::RuleConfig;
use crate::tree::{NodeId, NodeKind, ScalarValue, SyntaxTree};
use crate::types::{Location, Severity, Suggestion, Violation};

/// Rule code for require-converter.
pub const CODE: &str = "FS001";

/// Rule name for require-converter.
pub const NAME: &str = "require-converter";

/// Fixed violation message.
pub const MESSAGE: &str =
    "Firestore collection reference must use a converter. Add .withConverter()";

/// Brief description of what the rule checks.
pub const DESCRIPTION: &str =
    "Flags Firestore collection references opened without a converter";

/// Call names that open a collection reference.
const COLLECTION_OPENERS: [&str; 2] = ["collection", "collectionGroup"];

/// Method that attaches a converter to a reference.
const CONVERTER_METHOD: &str = "withConverter";

/// Returns true if the node is a call that opens a collection reference.
///
/// Matches both the method form (`db.collection(...)`, any receiver) and
/// the free-function form (`collection(db, ...)`). Member accesses
/// without a statically known property name never match.
#[must_use]
pub fn is_collection_reference(tree: &SyntaxTree, id: NodeId) -> bool {
    let NodeKind::Call { callee, .. } = tree.kind(id) else {
        return false;
    };
    match tree.kind(*callee) {
        NodeKind::MemberAccess {
            property: Some(name),
            ..
        }
        | NodeKind::Identifier { name } => COLLECTION_OPENERS.contains(&name.as_str()),
        _ => false,
    }
}

/// Returns true if a `withConverter` call encloses the node.
///
/// Walks the parent chain from `id` upward and stops at the first
/// ancestor that is a call on a `withConverter` member. The walk is
/// bounded by tree depth and holds no state across invocations.
#[must_use]
pub fn has_converter_guard(tree: &SyntaxTree, id: NodeId) -> bool {
    let mut current = tree.parent(id);
    while let Some(ancestor) = current {
        if let NodeKind::Call { callee, .. } = tree.kind(ancestor) {
            if let NodeKind::MemberAccess {
                property: Some(name),
                ..
            } = tree.kind(*callee)
            {
                if name == CONVERTER_METHOD {
                    return true;
                }
            }
        }
        current = tree.parent(ancestor);
    }
    false
}

/// Returns true if the call's collection name is exempted.
///
/// Exempt only when the name argument is a string literal whose value is
/// in `allowed`, matched exactly and case-sensitively. The name argument
/// is the first for the method form (`db.collection("x")`) and the
/// second for the free-function form (`collection(db, "x")`), where the
/// store handle comes first. Identifiers and other expressions are never
/// exempt; no inference is attempted about their runtime values.
#[must_use]
pub fn is_exempt(tree: &SyntaxTree, id: NodeId, allowed: &[String]) -> bool {
    let NodeKind::Call { callee, arguments } = tree.kind(id) else {
        return false;
    };
    let position = match tree.kind(*callee) {
        NodeKind::Identifier { .. } => 1,
        _ => 0,
    };
    let Some(name_arg) = arguments.get(position) else {
        return false;
    };
    match tree.kind(*name_arg) {
        NodeKind::Literal {
            value: ScalarValue::Str(value),
        } => allowed.iter().any(|name| name == value),
        _ => false,
    }
}

/// Flags Firestore collection references that lack a converter.
#[derive(Debug, Clone)]
pub struct RequireConverter {
    /// Collection names exempt from the requirement.
    pub allowed_collections: Vec<String>,
    /// Custom severity.
    pub severity: Severity,
}

impl Default for RequireConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl RequireConverter {
    /// Creates the rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            allowed_collections: Vec::new(),
            severity: Severity::Error,
        }
    }

    /// Creates the rule from parsed configuration.
    #[must_use]
    pub fn from_config(config: &RuleConfig) -> Self {
        Self {
            allowed_collections: config.allowed_collections.clone(),
            severity: config.severity,
        }
    }

    /// Sets the allowed collection names.
    #[must_use]
    pub fn allowed_collections<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_collections = names.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Checks a syntax tree and returns violations in source order.
    ///
    /// Each node's verdict depends only on its own static shape and the
    /// fixed configuration, so one unguarded, non-exempt collection call
    /// yields exactly one violation.
    #[must_use]
    pub fn check(&self, tree: &SyntaxTree, file: &Path) -> Vec<Violation> {
        let mut violations = Vec::new();

        for id in tree.calls() {
            if !is_collection_reference(tree, id) {
                continue;
            }
            if is_exempt(tree, id, &self.allowed_collections) {
                continue;
            }
            if has_converter_guard(tree, id) {
                continue;
            }

            violations.push(
                Violation::new(
                    CODE,
                    NAME,
                    self.severity,
                    Location::from_span(file.to_path_buf(), tree.span(id)),
                    MESSAGE,
                )
                .with_suggestion(Suggestion::new(
                    "Chain .withConverter(converter) on the reference, \
                     or add the collection to allowed_collections",
                )),
            );
        }

        // Node ids follow construction order, not source order.
        violations.sort_by(|a, b| {
            a.location
                .line
                .cmp(&b.location.line)
                .then(a.location.column.cmp(&b.location.column))
        });

        tracing::debug!(
            file = %file.display(),
            violations = violations.len(),
            "checked tree"
        );

        violations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::Span;

    fn at(line: usize) -> Span {
        Span::new(line, 1, 0, 0)
    }

    /// `db.collection("users")`
    fn method_call(b: &mut crate::tree::TreeBuilder, line: usize) -> NodeId {
        let db = b.identifier("db", at(line));
        let callee = b.member_access(db, "collection", at(line));
        let arg = b.string("users", at(line));
        b.call(callee, vec![arg], at(line))
    }

    fn check(tree: &SyntaxTree, rule: &RequireConverter) -> Vec<Violation> {
        rule.check(tree, Path::new("test.js"))
    }

    #[test]
    fn flags_unguarded_method_call() {
        let mut b = SyntaxTree::builder();
        method_call(&mut b, 1);
        let tree = b.finish();

        let violations = check(&tree, &RequireConverter::new());
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].code, CODE);
        assert_eq!(violations[0].message, MESSAGE);
    }

    #[test]
    fn flags_free_function_form() {
        let mut b = SyntaxTree::builder();
        let callee = b.identifier("collectionGroup", at(1));
        let arg = b.identifier("db", at(1));
        b.call(callee, vec![arg], at(1));
        let tree = b.finish();

        assert_eq!(check(&tree, &RequireConverter::new()).len(), 1);
    }

    #[test]
    fn direct_converter_chain_passes() {
        // db.collection("users").withConverter(conv)
        let mut b = SyntaxTree::builder();
        let inner = method_call(&mut b, 1);
        let with_conv = b.member_access(inner, "withConverter", at(1));
        let conv = b.identifier("conv", at(1));
        b.call(with_conv, vec![conv], at(1));
        let tree = b.finish();

        assert!(check(&tree, &RequireConverter::new()).is_empty());
    }

    #[test]
    fn guard_found_through_wrapping_call() {
        // wrap(db.collection("users")).withConverter(conv)
        let mut b = SyntaxTree::builder();
        let inner = method_call(&mut b, 1);
        let wrap = b.identifier("wrap", at(1));
        let wrapped = b.call(wrap, vec![inner], at(1));
        let with_conv = b.member_access(wrapped, "withConverter", at(1));
        let conv = b.identifier("conv", at(1));
        b.call(with_conv, vec![conv], at(1));
        let tree = b.finish();

        assert!(check(&tree, &RequireConverter::new()).is_empty());
    }

    #[test]
    fn guard_found_at_deep_ancestor() {
        let mut b = SyntaxTree::builder();
        let mut current = method_call(&mut b, 1);
        for _ in 0..10 {
            current = b.other(vec![current], at(1));
        }
        let with_conv = b.member_access(current, "withConverter", at(1));
        let conv = b.identifier("conv", at(1));
        b.call(with_conv, vec![conv], at(1));
        let tree = b.finish();

        assert!(check(&tree, &RequireConverter::new()).is_empty());
    }

    #[test]
    fn converter_identifier_alone_is_no_guard() {
        // withConverter(db.collection("users")): free call, not a member chain.
        let mut b = SyntaxTree::builder();
        let inner = method_call(&mut b, 1);
        let callee = b.identifier("withConverter", at(1));
        b.call(callee, vec![inner], at(1));
        let tree = b.finish();

        assert_eq!(check(&tree, &RequireConverter::new()).len(), 1);
    }

    #[test]
    fn allowlist_exempts_literal_name() {
        let mut b = SyntaxTree::builder();
        method_call(&mut b, 1);
        let tree = b.finish();

        let rule = RequireConverter::new().allowed_collections(["users"]);
        assert!(check(&tree, &rule).is_empty());
    }

    #[test]
    fn allowlist_exempts_free_function_name_argument() {
        // collection(db, "logs"): the name is the second argument.
        let mut b = SyntaxTree::builder();
        let callee = b.identifier("collection", at(1));
        let db = b.identifier("db", at(1));
        let name = b.string("logs", at(1));
        b.call(callee, vec![db, name], at(1));
        let tree = b.finish();

        let rule = RequireConverter::new().allowed_collections(["logs"]);
        assert!(check(&tree, &rule).is_empty());
    }

    #[test]
    fn allowlist_is_case_sensitive() {
        let mut b = SyntaxTree::builder();
        method_call(&mut b, 1);
        let tree = b.finish();

        let rule = RequireConverter::new().allowed_collections(["Users"]);
        assert_eq!(check(&tree, &rule).len(), 1);
    }

    #[test]
    fn identifier_argument_never_exempt() {
        // db.collection(dynamicName) with "dynamicName" in the allowlist.
        let mut b = SyntaxTree::builder();
        let db = b.identifier("db", at(1));
        let callee = b.member_access(db, "collection", at(1));
        let arg = b.identifier("dynamicName", at(1));
        b.call(callee, vec![arg], at(1));
        let tree = b.finish();

        let rule = RequireConverter::new().allowed_collections(["dynamicName"]);
        assert_eq!(check(&tree, &rule).len(), 1);
    }

    #[test]
    fn missing_argument_never_exempt() {
        let mut b = SyntaxTree::builder();
        let db = b.identifier("db", at(1));
        let callee = b.member_access(db, "collection", at(1));
        b.call(callee, vec![], at(1));
        let tree = b.finish();

        let rule = RequireConverter::new().allowed_collections(["users"]);
        assert_eq!(check(&tree, &rule).len(), 1);
    }

    #[test]
    fn computed_access_never_matches() {
        // db["collection"]("users"): known false negative.
        let mut b = SyntaxTree::builder();
        let db = b.identifier("db", at(1));
        let name = b.string("collection", at(1));
        let callee = b.computed_member_access(db, name, at(1));
        let arg = b.string("users", at(1));
        b.call(callee, vec![arg], at(1));
        let tree = b.finish();

        assert!(check(&tree, &RequireConverter::new()).is_empty());
    }

    #[test]
    fn unrelated_calls_not_flagged() {
        let mut b = SyntaxTree::builder();
        let callee = b.identifier("doc", at(1));
        let arg = b.string("users/1", at(1));
        b.call(callee, vec![arg], at(1));
        let tree = b.finish();

        assert!(check(&tree, &RequireConverter::new()).is_empty());
    }

    #[test]
    fn one_violation_per_call_site_in_source_order() {
        let mut b = SyntaxTree::builder();
        method_call(&mut b, 5);
        method_call(&mut b, 2);
        let tree = b.finish();

        let violations = check(&tree, &RequireConverter::new());
        assert_eq!(violations.len(), 2);
        assert_eq!(violations[0].location.line, 2);
        assert_eq!(violations[1].location.line, 5);
    }

    #[test]
    fn rerun_is_idempotent() {
        let mut b = SyntaxTree::builder();
        method_call(&mut b, 1);
        let tree = b.finish();
        let rule = RequireConverter::new();

        let first = check(&tree, &rule);
        let second = check(&tree, &rule);
        assert_eq!(first.len(), second.len());
        assert_eq!(first[0].location, second[0].location);
    }

    #[test]
    fn severity_override_applies() {
        let mut b = SyntaxTree::builder();
        method_call(&mut b, 1);
        let tree = b.finish();

        let rule = RequireConverter::new().severity(Severity::Warning);
        let violations = check(&tree, &rule);
        assert_eq!(violations[0].severity, Severity::Warning);
    }
}
