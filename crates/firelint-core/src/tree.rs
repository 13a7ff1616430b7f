//! Arena-backed syntax tree consumed by the rule engine.
//!
//! The tree is built once by a host (see `firelint-js`) and read-only
//! afterwards. Nodes live in a flat arena owned by [`SyntaxTree`]; every
//! cross-node edge is a [`NodeId`] index, and each node carries a parent
//! edge established at construction time. The parent edge is a lookup
//! edge only, never an ownership relation, so the tree is acyclic and
//! ancestor walks are bounded by its depth.

/// Identifier of a node within a [`SyntaxTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

impl NodeId {
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// Source span of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed).
    pub column: usize,
    /// Byte offset from the start of the file.
    pub offset: usize,
    /// Length of the span in bytes.
    pub length: usize,
}

impl Span {
    /// Creates a new span.
    #[must_use]
    pub fn new(line: usize, column: usize, offset: usize, length: usize) -> Self {
        Self {
            line,
            column,
            offset,
            length,
        }
    }
}

/// Scalar value carried by a literal node.
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarValue {
    /// A string literal, with quotes stripped.
    Str(String),
    /// A numeric literal, kept as source text.
    Number(String),
    /// A boolean literal.
    Bool(bool),
    /// A null literal.
    Null,
}

impl ScalarValue {
    /// Returns the string value if this is a string literal.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }
}

/// Shape of a syntax node.
///
/// This is a closed set: hosts lower anything the rule does not inspect
/// to [`NodeKind::Other`], which keeps parent chains intact without the
/// engine having to know the source language's full grammar.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// A call expression with its callee and ordered arguments.
    Call {
        /// The expression being called.
        callee: NodeId,
        /// Arguments in source order.
        arguments: Vec<NodeId>,
    },
    /// A member access. `property` is `None` when the accessed name is
    /// not statically known (computed access).
    MemberAccess {
        /// The receiver expression.
        object: NodeId,
        /// Property name, when statically known.
        property: Option<String>,
    },
    /// A bare identifier.
    Identifier {
        /// The identifier text.
        name: String,
    },
    /// A scalar literal.
    Literal {
        /// The literal's value.
        value: ScalarValue,
    },
    /// Any other expression or statement. Children are still lowered so
    /// that parent chains pass through wrapper expressions.
    Other {
        /// Lowered child nodes.
        children: Vec<NodeId>,
    },
}

#[derive(Debug, Clone)]
struct NodeData {
    kind: NodeKind,
    parent: Option<NodeId>,
    span: Span,
}

/// An immutable syntax tree.
///
/// Constructed via [`TreeBuilder`]; the engine only reads it.
#[derive(Debug, Clone, Default)]
pub struct SyntaxTree {
    nodes: Vec<NodeData>,
}

impl SyntaxTree {
    /// Creates a builder for constructing a tree.
    #[must_use]
    pub fn builder() -> TreeBuilder {
        TreeBuilder::default()
    }

    /// Number of nodes in the tree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the tree has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the kind of a node.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to this tree.
    #[must_use]
    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.nodes[id.index()].kind
    }

    /// Returns the source span of a node.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to this tree.
    #[must_use]
    pub fn span(&self, id: NodeId) -> Span {
        self.nodes[id.index()].span
    }

    /// Returns the parent of a node, or `None` at the root.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to this tree.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.index()].parent
    }

    /// Iterates over all node ids.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(|i| NodeId(u32::try_from(i).unwrap_or(u32::MAX)))
    }

    /// Iterates over all call-expression node ids.
    pub fn calls(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.node_ids()
            .filter(|id| matches!(self.kind(*id), NodeKind::Call { .. }))
    }
}

/// Builder establishing node data and parent edges.
///
/// Children are created before their enclosing node; creating a composite
/// node records it as the parent of each child. A child may be adopted at
/// most once, which keeps the tree acyclic by construction.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    nodes: Vec<NodeData>,
}

impl TreeBuilder {
    fn push(&mut self, kind: NodeKind, span: Span) -> NodeId {
        let id = NodeId(u32::try_from(self.nodes.len()).unwrap_or(u32::MAX));
        self.nodes.push(NodeData {
            kind,
            parent: None,
            span,
        });
        id
    }

    fn adopt(&mut self, child: NodeId, parent: NodeId) {
        let slot = &mut self.nodes[child.index()].parent;
        debug_assert!(slot.is_none(), "node adopted twice");
        *slot = Some(parent);
    }

    /// Adds an identifier node.
    pub fn identifier(&mut self, name: impl Into<String>, span: Span) -> NodeId {
        self.push(NodeKind::Identifier { name: name.into() }, span)
    }

    /// Adds a string literal node.
    pub fn string(&mut self, value: impl Into<String>, span: Span) -> NodeId {
        self.literal(ScalarValue::Str(value.into()), span)
    }

    /// Adds a literal node with an arbitrary scalar value.
    pub fn literal(&mut self, value: ScalarValue, span: Span) -> NodeId {
        self.push(NodeKind::Literal { value }, span)
    }

    /// Adds a call node and parents its callee and arguments to it.
    pub fn call(&mut self, callee: NodeId, arguments: Vec<NodeId>, span: Span) -> NodeId {
        let id = self.push(
            NodeKind::Call {
                callee,
                arguments: arguments.clone(),
            },
            span,
        );
        self.adopt(callee, id);
        for arg in arguments {
            self.adopt(arg, id);
        }
        id
    }

    /// Adds a member access with a statically known property name.
    pub fn member_access(
        &mut self,
        object: NodeId,
        property: impl Into<String>,
        span: Span,
    ) -> NodeId {
        let id = self.push(
            NodeKind::MemberAccess {
                object,
                property: Some(property.into()),
            },
            span,
        );
        self.adopt(object, id);
        id
    }

    /// Adds a computed member access (`obj[expr]`).
    ///
    /// The property name is not statically known, so the node carries no
    /// name. The index subtree is still parented here so that ancestor
    /// walks starting inside it reach the root.
    pub fn computed_member_access(&mut self, object: NodeId, index: NodeId, span: Span) -> NodeId {
        let id = self.push(
            NodeKind::MemberAccess {
                object,
                property: None,
            },
            span,
        );
        self.adopt(object, id);
        self.adopt(index, id);
        id
    }

    /// Adds a node for any construct the engine does not inspect.
    pub fn other(&mut self, children: Vec<NodeId>, span: Span) -> NodeId {
        let id = self.push(
            NodeKind::Other {
                children: children.clone(),
            },
            span,
        );
        for child in children {
            self.adopt(child, id);
        }
        id
    }

    /// Finalizes the tree.
    #[must_use]
    pub fn finish(self) -> SyntaxTree {
        SyntaxTree { nodes: self.nodes }
    }
}
