//! Navigation state machine.
//!
//! Drives a single path through a [`Node`] tree. Lazy nodes are resolved as
//! they are visited, failures wait for an explicit retry, and a chosen leaf
//! ends in the terminal [`TreeState::RenderValue`] state.
//!
//! ```text
//! visitNode ─┬─► resolveBranch.loading ─► success ─► visitNode
//!            │            ▲   └──────► failure ──RETRY──┘
//!            ├─► resolveLeaf.loading ─► success ─► renderLeaf
//!            │            ▲   └──────► failure ──RETRY──┘
//!            ├─► renderBranch ──SELECT_CHILD──► visitNode
//!            └─► renderLeaf ──FINALISE──► renderValue
//! ```
//!
//! `SELECT_ROOT` from either render state returns to the root. Transient
//! states are stepped through in a loop, so long chains of lazy nodes never
//! grow the stack.

use std::fmt;

use strum::Display;
use thiserror::Error;
use tracing::{debug, warn};

use crate::node::{BoxError, Branch, Leaf, Node, is_branch, is_children, is_node};

const DEFAULT_ID: &str = "tree-machine";

/// Sub-state of a resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Loading,
    Success,
    Failure,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TreeState {
    VisitNode,
    ResolveBranch(Phase),
    ResolveLeaf(Phase),
    RenderBranch,
    RenderLeaf,
    RenderValue,
}

impl Phase {
    fn as_str(self) -> &'static str {
        match self {
            Phase::Loading => "loading",
            Phase::Success => "success",
            Phase::Failure => "failure",
        }
    }
}

impl fmt::Display for TreeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeState::VisitNode => f.write_str("visitNode"),
            TreeState::ResolveBranch(phase) => write!(f, "resolveBranch.{}", phase.as_str()),
            TreeState::ResolveLeaf(phase) => write!(f, "resolveLeaf.{}", phase.as_str()),
            TreeState::RenderBranch => f.write_str("renderBranch"),
            TreeState::RenderLeaf => f.write_str("renderLeaf"),
            TreeState::RenderValue => f.write_str("renderValue"),
        }
    }
}

impl TreeState {
    /// States that wait for an external event.
    pub fn is_stable(self) -> bool {
        matches!(
            self,
            TreeState::RenderBranch
                | TreeState::RenderLeaf
                | TreeState::RenderValue
                | TreeState::ResolveBranch(Phase::Failure)
                | TreeState::ResolveLeaf(Phase::Failure)
        )
    }

    pub fn is_loading(self) -> bool {
        matches!(
            self,
            TreeState::ResolveBranch(Phase::Loading) | TreeState::ResolveLeaf(Phase::Loading)
        )
    }

    pub fn is_failure(self) -> bool {
        matches!(
            self,
            TreeState::ResolveBranch(Phase::Failure) | TreeState::ResolveLeaf(Phase::Failure)
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum TreeEvent {
    /// Move into the child at this index of the current branch.
    SelectChild(usize),
    /// Go back to the root node.
    SelectRoot,
    /// Re-run a failed resolver.
    Retry,
    /// Accept the current leaf.
    Finalise,
}

/// Why a resolution failed.
#[derive(Error, Debug)]
pub enum TreeError {
    #[error("{0}")]
    Resolver(BoxError),

    #[error("AsyncBranch with label \"{label}\" has invalid children")]
    InvalidChildren { label: String },
}

#[derive(Debug)]
pub struct TreeContext {
    pub current_node: Node,
    pub root_node: Node,
    pub error: Option<TreeError>,
    pub resolved_value: Option<String>,
    /// Retries since the last successful branch resolution.
    pub retries: u32,
}

/// Called on every state entry, transient states included.
pub type Observer = Box<dyn FnMut(TreeState, &TreeContext)>;

pub struct TreeMachine {
    id: String,
    state: TreeState,
    context: TreeContext,
    started: bool,
    observers: Vec<Observer>,
}

impl fmt::Debug for TreeMachine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TreeMachine")
            .field("id", &self.id)
            .field("state", &self.state)
            .field("context", &self.context)
            .field("started", &self.started)
            .finish_non_exhaustive()
    }
}

impl TreeMachine {
    pub fn new(root: impl Into<Node>) -> Self {
        Self::with_id(root, DEFAULT_ID)
    }

    pub fn with_id(root: impl Into<Node>, id: impl Into<String>) -> Self {
        let root = root.into();
        Self {
            id: id.into(),
            state: TreeState::VisitNode,
            context: TreeContext {
                current_node: root.clone(),
                root_node: root,
                error: None,
                resolved_value: None,
                retries: 0,
            },
            started: false,
            observers: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn state(&self) -> TreeState {
        self.state
    }

    pub fn context(&self) -> &TreeContext {
        &self.context
    }

    /// Whether the current state is `path` or nested inside it, e.g.
    /// `"resolveBranch"` matches `resolveBranch.failure`.
    pub fn matches(&self, path: &str) -> bool {
        let current = self.state.to_string();
        current == path
            || current
                .strip_prefix(path)
                .is_some_and(|rest| rest.starts_with('.'))
    }

    pub fn is_done(&self) -> bool {
        self.state == TreeState::RenderValue
    }

    pub fn subscribe(&mut self, observer: impl FnMut(TreeState, &TreeContext) + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Enter the initial state and run until input is needed.
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        debug!(machine = %self.id, root = %self.context.root_node.label(), "starting");
        self.enter(TreeState::VisitNode);
        self.run();
    }

    /// Deliver an event. Returns `true` when the current state accepted it.
    ///
    /// Events that do not apply to the current state are ignored, including
    /// an out-of-range child index.
    pub fn send(&mut self, event: TreeEvent) -> bool {
        if !self.started {
            warn!(machine = %self.id, %event, "event before start ignored");
            return false;
        }

        let next = match (self.state, event) {
            (TreeState::RenderBranch, TreeEvent::SelectChild(index)) => self.select_child(index),
            (TreeState::RenderBranch | TreeState::RenderLeaf, TreeEvent::SelectRoot) => {
                self.context.current_node = self.context.root_node.clone();
                self.context.resolved_value = None;
                Some(TreeState::VisitNode)
            }
            (TreeState::RenderLeaf, TreeEvent::Finalise) => Some(TreeState::RenderValue),
            (TreeState::ResolveBranch(Phase::Failure), TreeEvent::Retry) => {
                self.context.retries += 1;
                Some(TreeState::ResolveBranch(Phase::Loading))
            }
            (TreeState::ResolveLeaf(Phase::Failure), TreeEvent::Retry) => {
                self.context.retries += 1;
                Some(TreeState::ResolveLeaf(Phase::Loading))
            }
            _ => None,
        };

        match next {
            Some(state) => {
                debug!(machine = %self.id, %event, from = %self.state, "event accepted");
                self.enter(state);
                self.run();
                true
            }
            None => {
                warn!(machine = %self.id, %event, state = %self.state, "event ignored");
                false
            }
        }
    }

    fn select_child(&mut self, index: usize) -> Option<TreeState> {
        let child = match &self.context.current_node {
            Node::Branch(branch) => branch.children.get(index).filter(|c| is_node(c)).cloned(),
            _ => None,
        }?;
        self.context.current_node = child;
        self.context.resolved_value = None;
        Some(TreeState::VisitNode)
    }

    fn enter(&mut self, state: TreeState) {
        self.state = state;
        debug!(machine = %self.id, %state, node = %self.context.current_node.label(), "enter");
        for observer in &mut self.observers {
            observer(state, &self.context);
        }
    }

    /// Step through transient states until one needs outside input.
    fn run(&mut self) {
        loop {
            let next = match self.state {
                TreeState::VisitNode => self.visit(),
                TreeState::ResolveBranch(Phase::Loading) => self.resolve_branch(),
                TreeState::ResolveBranch(Phase::Success) => {
                    self.context.retries = 0;
                    TreeState::VisitNode
                }
                TreeState::ResolveLeaf(Phase::Loading) => self.resolve_leaf(),
                TreeState::ResolveLeaf(Phase::Success) => TreeState::RenderLeaf,
                _ => break,
            };
            self.enter(next);
        }
    }

    fn visit(&self) -> TreeState {
        match &self.context.current_node {
            Node::AsyncBranch(_) => TreeState::ResolveBranch(Phase::Loading),
            Node::AsyncLeaf(_) => TreeState::ResolveLeaf(Phase::Loading),
            node @ Node::Branch(_) => {
                if !is_branch(node) {
                    warn!(label = %node.label(), "branch has no valid children");
                }
                TreeState::RenderBranch
            }
            Node::Leaf(_) => TreeState::RenderLeaf,
        }
    }

    fn resolve_branch(&mut self) -> TreeState {
        let Node::AsyncBranch(branch) = &self.context.current_node else {
            return TreeState::VisitNode;
        };
        let branch = branch.clone();

        match branch.resolve() {
            Ok(children) if is_children(&children) => {
                debug!(label = %branch.label, count = children.len(), "branch resolved");
                self.context.current_node = Branch::new(branch.label, children).into();
                self.context.error = None;
                TreeState::ResolveBranch(Phase::Success)
            }
            Ok(_) => {
                self.fail(TreeError::InvalidChildren {
                    label: branch.label,
                });
                TreeState::ResolveBranch(Phase::Failure)
            }
            Err(err) => {
                self.fail(TreeError::Resolver(err));
                TreeState::ResolveBranch(Phase::Failure)
            }
        }
    }

    fn resolve_leaf(&mut self) -> TreeState {
        let Node::AsyncLeaf(leaf) = &self.context.current_node else {
            return TreeState::VisitNode;
        };
        let leaf = leaf.clone();

        match leaf.resolve() {
            Ok(value) => {
                debug!(label = %leaf.label, "leaf resolved");
                self.context.resolved_value = Some(value.clone());
                self.context.current_node = Leaf::new(leaf.label, value).into();
                self.context.error = None;
                TreeState::ResolveLeaf(Phase::Success)
            }
            Err(err) => {
                self.fail(TreeError::Resolver(err));
                TreeState::ResolveLeaf(Phase::Failure)
            }
        }
    }

    fn fail(&mut self, error: TreeError) {
        warn!(machine = %self.id, node = %self.context.current_node.label(), %error, "resolution failed");
        self.context.error = Some(error);
    }
}
