//! Decision tree node model.
//!
//! A help document is a tree of [`Node`]s. Branches present choices, leaves
//! hold the answer the user is looking for. Both come in an eager flavour and
//! a lazy flavour whose content is produced on demand by a resolver.

use std::fmt;
use std::sync::Arc;

/// Error type returned by resolvers.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Produces the value of an [`AsyncLeaf`] on demand.
pub type ValueResolver = Arc<dyn Fn() -> Result<String, BoxError> + Send + Sync>;

/// Produces the children of an [`AsyncBranch`] on demand.
pub type ChildrenResolver = Arc<dyn Fn() -> Result<Vec<Node>, BoxError> + Send + Sync>;

/// A terminal answer with eagerly available text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leaf {
    pub label: String,
    pub value: String,
}

/// A terminal answer whose text is produced on demand.
#[derive(Clone)]
pub struct AsyncLeaf {
    pub label: String,
    pub value: ValueResolver,
}

/// A fixed set of choices.
#[derive(Debug, Clone)]
pub struct Branch {
    pub label: String,
    pub children: Vec<Node>,
}

/// A set of choices produced on demand.
#[derive(Clone)]
pub struct AsyncBranch {
    pub label: String,
    pub children: ChildrenResolver,
}

/// A node in a help document.
#[derive(Debug, Clone)]
pub enum Node {
    Leaf(Leaf),
    AsyncLeaf(AsyncLeaf),
    Branch(Branch),
    AsyncBranch(AsyncBranch),
}

impl Leaf {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

impl AsyncLeaf {
    pub fn new<F>(label: impl Into<String>, value: F) -> Self
    where
        F: Fn() -> Result<String, BoxError> + Send + Sync + 'static,
    {
        Self {
            label: label.into(),
            value: Arc::new(value),
        }
    }

    /// Invoke the resolver.
    pub fn resolve(&self) -> Result<String, BoxError> {
        (self.value)()
    }
}

impl Branch {
    pub fn new(label: impl Into<String>, children: Vec<Node>) -> Self {
        Self {
            label: label.into(),
            children,
        }
    }
}

impl AsyncBranch {
    pub fn new<F>(label: impl Into<String>, children: F) -> Self
    where
        F: Fn() -> Result<Vec<Node>, BoxError> + Send + Sync + 'static,
    {
        Self {
            label: label.into(),
            children: Arc::new(children),
        }
    }

    /// Invoke the resolver.
    pub fn resolve(&self) -> Result<Vec<Node>, BoxError> {
        (self.children)()
    }
}

impl fmt::Debug for AsyncLeaf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AsyncLeaf")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

impl fmt::Debug for AsyncBranch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AsyncBranch")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

impl Node {
    /// The label shown when this node is offered as a choice.
    pub fn label(&self) -> &str {
        match self {
            Node::Leaf(leaf) => &leaf.label,
            Node::AsyncLeaf(leaf) => &leaf.label,
            Node::Branch(branch) => &branch.label,
            Node::AsyncBranch(branch) => &branch.label,
        }
    }

    /// Short variant name, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Node::Leaf(_) => "leaf",
            Node::AsyncLeaf(_) => "async leaf",
            Node::Branch(_) => "branch",
            Node::AsyncBranch(_) => "async branch",
        }
    }

    /// Whether two handles refer to the same node.
    ///
    /// Lazy nodes compare by resolver identity, eager nodes by content.
    pub fn same_as(&self, other: &Node) -> bool {
        match (self, other) {
            (Node::Leaf(a), Node::Leaf(b)) => a == b,
            (Node::AsyncLeaf(a), Node::AsyncLeaf(b)) => {
                a.label == b.label && Arc::ptr_eq(&a.value, &b.value)
            }
            (Node::Branch(a), Node::Branch(b)) => {
                a.label == b.label
                    && a.children.len() == b.children.len()
                    && a.children.iter().zip(&b.children).all(|(x, y)| x.same_as(y))
            }
            (Node::AsyncBranch(a), Node::AsyncBranch(b)) => {
                a.label == b.label && Arc::ptr_eq(&a.children, &b.children)
            }
            _ => false,
        }
    }
}

impl From<Leaf> for Node {
    fn from(leaf: Leaf) -> Self {
        Node::Leaf(leaf)
    }
}

impl From<AsyncLeaf> for Node {
    fn from(leaf: AsyncLeaf) -> Self {
        Node::AsyncLeaf(leaf)
    }
}

impl From<Branch> for Node {
    fn from(branch: Branch) -> Self {
        Node::Branch(branch)
    }
}

impl From<AsyncBranch> for Node {
    fn from(branch: AsyncBranch) -> Self {
        Node::AsyncBranch(branch)
    }
}

pub fn is_leaf(node: &Node) -> bool {
    matches!(node, Node::Leaf(_))
}

pub fn is_async_leaf(node: &Node) -> bool {
    matches!(node, Node::AsyncLeaf(_))
}

/// A branch is only valid when its children form a valid child set.
pub fn is_branch(node: &Node) -> bool {
    match node {
        Node::Branch(branch) => is_children(&branch.children),
        _ => false,
    }
}

pub fn is_async_branch(node: &Node) -> bool {
    matches!(node, Node::AsyncBranch(_))
}

/// Exactly one of the four node predicates holds.
pub fn is_node(node: &Node) -> bool {
    is_leaf(node) || is_async_leaf(node) || is_branch(node) || is_async_branch(node)
}

/// Child-level check: a branch must not be empty. Deeper levels are checked
/// when they are visited.
fn is_shallow_node(node: &Node) -> bool {
    match node {
        Node::Branch(branch) => !branch.children.is_empty(),
        _ => true,
    }
}

/// A non-empty list of nodes, validated one level deep.
pub fn is_children(children: &[Node]) -> bool {
    !children.is_empty() && children.iter().all(is_shallow_node)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(label: &str) -> Node {
        Leaf::new(label, "value").into()
    }

    #[test]
    fn test_predicates_are_exclusive() {
        let nodes = [
            leaf("Leaf"),
            AsyncLeaf::new("Async Leaf", || Ok("value".to_string())).into(),
            Branch::new("Branch", vec![leaf("Child")]).into(),
            AsyncBranch::new("Async Branch", || Ok(vec![leaf("Child")])).into(),
        ];

        for node in &nodes {
            let matched = [
                is_leaf(node),
                is_async_leaf(node),
                is_branch(node),
                is_async_branch(node),
            ]
            .iter()
            .filter(|m| **m)
            .count();
            assert_eq!(matched, 1, "{} should match exactly one predicate", node.label());
            assert!(is_node(node));
        }
    }

    #[test]
    fn test_branch_with_empty_children_is_invalid() {
        let empty: Node = Branch::new("Empty Branch", vec![]).into();
        assert!(!is_branch(&empty));
        assert!(!is_node(&empty));
    }

    #[test]
    fn test_is_children() {
        assert!(!is_children(&[]));
        assert!(is_children(&[leaf("One"), leaf("Two")]));

        let nested_empty: Node = Branch::new("Nested", vec![]).into();
        assert!(!is_children(&[leaf("One"), nested_empty]));
    }

    #[test]
    fn test_is_children_checks_one_level() {
        // The grandchild branch is empty, but only direct children are validated.
        let grandchild: Node = Branch::new("Grandchild", vec![]).into();
        let child: Node = Branch::new("Child", vec![grandchild]).into();
        assert!(is_children(&[child]));
    }

    #[test]
    fn test_is_node_matches_some_predicate() {
        let inner: Node = Branch::new("Inner", vec![]).into();
        let outer: Node = Branch::new("Outer", vec![inner]).into();
        let nested: Node = Branch::new("Nested", vec![outer.clone()]).into();

        for node in [&outer, &nested] {
            let any = is_leaf(node) || is_async_leaf(node) || is_branch(node) || is_async_branch(node);
            assert_eq!(is_node(node), any, "{}", node.label());
        }
        assert!(!is_node(&outer));
        assert!(is_node(&nested));
    }

    #[test]
    fn test_label_and_kind() {
        let node: Node = AsyncBranch::new("Lazy", || Ok(vec![])).into();
        assert_eq!(node.label(), "Lazy");
        assert_eq!(node.kind(), "async branch");
    }

    #[test]
    fn test_same_as_uses_resolver_identity() {
        let lazy = AsyncLeaf::new("Lazy", || Ok("x".to_string()));
        let a: Node = lazy.clone().into();
        let b: Node = lazy.into();
        let c: Node = AsyncLeaf::new("Lazy", || Ok("x".to_string())).into();

        assert!(a.same_as(&b));
        assert!(!a.same_as(&c));
    }

    #[test]
    fn test_async_leaf_resolves_each_call() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let lazy = AsyncLeaf::new("Counter", move || {
            let n = counter.fetch_add(1, Ordering::SeqCst) + 1;
            Ok(format!("call {n}"))
        });

        assert_eq!(lazy.resolve().unwrap(), "call 1");
        assert_eq!(lazy.resolve().unwrap(), "call 2");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
