//! Arena-backed parse tree.
//!
//! Nodes live in a single `Vec` and refer to each other by [`NodeId`]. The
//! parent link only exists so the parser can climb back out of a finished
//! sub-condition; consumers walk downward through [`NodeRef::children`].

use crate::ast::Token;

/// Index of a node inside its [`ParseTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParseNode {
    token: Token,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl ParseNode {
    pub fn token(&self) -> &Token {
        &self.token
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// The tree produced by a successful parse.
///
/// Internal nodes are operators, leaves are columns, parameters, numbers and
/// nulls. The root is always the first node created.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseTree {
    nodes: Vec<ParseNode>,
}

impl ParseTree {
    pub fn root(&self) -> NodeRef<'_> {
        NodeRef {
            tree: self,
            id: NodeId(0),
        }
    }

    pub fn get(&self, id: NodeId) -> Option<NodeRef<'_>> {
        (id.0 < self.nodes.len()).then_some(NodeRef { tree: self, id })
    }

    /// Number of nodes, i.e. non-structural tokens consumed.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: a tree has at least its root.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Pre-order traversal starting at the root.
    pub fn iter(&self) -> PreOrder<'_> {
        PreOrder {
            stack: vec![self.root()],
        }
    }
}

/// A borrowed view of one node and the tree it belongs to.
#[derive(Debug, Clone, Copy)]
pub struct NodeRef<'a> {
    tree: &'a ParseTree,
    id: NodeId,
}

impl<'a> NodeRef<'a> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn token(&self) -> &'a Token {
        &self.node().token
    }

    pub fn children(&self) -> impl ExactSizeIterator<Item = NodeRef<'a>> + use<'a> {
        let tree = self.tree;
        self.node()
            .children
            .iter()
            .map(move |&id| NodeRef { tree, id })
    }

    pub fn child(&self, n: usize) -> Option<NodeRef<'a>> {
        self.node().children.get(n).map(|&id| NodeRef {
            tree: self.tree,
            id,
        })
    }

    pub fn parent(&self) -> Option<NodeRef<'a>> {
        self.node().parent.map(|id| NodeRef {
            tree: self.tree,
            id,
        })
    }

    pub fn is_leaf(&self) -> bool {
        self.node().children.is_empty()
    }

    /// Distance from the root, which has depth 0.
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut cursor = self.parent();
        while let Some(node) = cursor {
            depth += 1;
            cursor = node.parent();
        }
        depth
    }

    fn node(&self) -> &'a ParseNode {
        &self.tree.nodes[self.id.0]
    }
}

/// Depth-first, parent-before-children walk over a [`ParseTree`].
pub struct PreOrder<'a> {
    stack: Vec<NodeRef<'a>>,
}

impl<'a> Iterator for PreOrder<'a> {
    type Item = NodeRef<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        let children: Vec<_> = node.children().collect();
        self.stack.extend(children.into_iter().rev());
        Some(node)
    }
}

/// Incremental construction with a moving insertion point.
#[derive(Debug, Default)]
pub(crate) struct TreeBuilder {
    nodes: Vec<ParseNode>,
    current: Option<NodeId>,
}

impl TreeBuilder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Append `token` under the current node. The first node becomes the
    /// root; operator nodes become the new insertion point.
    pub(crate) fn add(&mut self, token: Token) -> NodeId {
        let id = NodeId(self.nodes.len());
        let descend = token.token_type.is_operator();

        self.nodes.push(ParseNode {
            token,
            parent: self.current,
            children: Vec::new(),
        });

        match self.current {
            None => self.current = Some(id),
            Some(parent) => {
                self.nodes[parent.0].children.push(id);
                if descend {
                    self.current = Some(id);
                }
            }
        }
        id
    }

    /// Move the insertion point to the parent of the current node.
    pub(crate) fn rise(&mut self) {
        if let Some(parent) = self.current.and_then(|id| self.nodes[id.0].parent) {
            self.current = Some(parent);
        }
    }

    pub(crate) fn build(self) -> Option<ParseTree> {
        if self.nodes.is_empty() {
            None
        } else {
            Some(ParseTree { nodes: self.nodes })
        }
    }
}
