//! # self-help
//!
//! Navigate decision-tree help documents: a tree of questions whose leaves are
//! answers.
//!
//! A document is usually a directory of markdown files. Each folder holds a
//! `README.md` whose H1 is the question and whose list links are the choices;
//! a link to a folder is a nested question, a link to any other `.md` file is
//! an answer. Answers may point at prerequisite and follow-up articles in
//! `## Read First` / `## Read Next` sections, which are gathered into a single
//! reading order when the answer is shown.
//!
//! ## Example
//!
//! ```rust
//! use self_help::{Branch, Leaf, TreeEvent, TreeMachine, TreeState};
//!
//! let root = Branch::new(
//!     "What do you need?",
//!     vec![
//!         Leaf::new("Install", "Run the installer.").into(),
//!         Leaf::new("Uninstall", "Delete the binary.").into(),
//!     ],
//! );
//!
//! let mut machine = TreeMachine::new(root);
//! machine.start();
//! assert_eq!(machine.state(), TreeState::RenderBranch);
//!
//! machine.send(TreeEvent::SelectChild(0));
//! machine.send(TreeEvent::Finalise);
//! assert_eq!(machine.state(), TreeState::RenderValue);
//! assert_eq!(machine.context().current_node.label(), "Install");
//! ```

/// Configuration loaded from the user's config directory.
pub mod config;

/// Flattening a tree into a single markdown document.
pub mod flatten;

/// Cycle-safe collection of related articles into a reading order.
pub mod gather;

/// Terminal runner that drives the state machine with prompts.
pub mod interactive;

/// Whole-tree validation of markdown documents.
pub mod lint;

/// Navigation state machine.
pub mod machine;

/// Node model: eager and lazily resolved branches and leaves.
pub mod node;

/// Structural markdown parser for index and leaf documents.
///
/// Extracts headings, list links, and related-article sections while
/// ignoring anything inside code blocks.
pub mod parser;

/// Lexical path helpers.
pub mod paths;

/// Document sources: linked markdown directories and JSON files.
pub mod source;

// Re-export commonly used types for convenience
pub use config::Config;
pub use machine::{TreeContext, TreeError, TreeEvent, TreeMachine, TreeState};
pub use node::{AsyncBranch, AsyncLeaf, BoxError, Branch, Leaf, Node};
pub use source::{SourceError, create_markdown_source, load_document};
