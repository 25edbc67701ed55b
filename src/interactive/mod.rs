//! Interactive navigation of a help document.
//!
//! The runner reacts to the state machine's stable states: branches become a
//! choice prompt, leaves are announced and finalised, and the final value is
//! rendered. Resolver failures ask the user whether to retry.

pub mod prompt;
pub mod render;

pub use prompt::{LinePrompt, Prompt, TerminalPrompt};
pub use render::render_markdown;

use std::io::{self, Write};

use crossterm::cursor::MoveToColumn;
use crossterm::execute;
use crossterm::style::Stylize;
use crossterm::terminal::{Clear, ClearType};
use thiserror::Error;
use tracing::debug;

use crate::machine::{TreeEvent, TreeMachine, TreeState};
use crate::node::Node;

/// Presentation settings for a session.
#[derive(Debug, Clone)]
pub struct InteractiveOptions {
    pub styled: bool,
    pub show_loading: bool,
    pub loading_message: String,
}

impl Default for InteractiveOptions {
    fn default() -> Self {
        Self {
            styled: false,
            show_loading: false,
            loading_message: crate::config::DEFAULT_LOADING_MESSAGE.to_string(),
        }
    }
}

/// How a session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The user reached a leaf; holds its value.
    Answered(String),
    /// The user backed out of a choice.
    Cancelled,
}

#[derive(Error, Debug)]
pub enum InteractiveError {
    #[error(transparent)]
    Io(#[from] io::Error),

    /// A resolver failed and the user chose not to retry.
    #[error("{0}")]
    Unresolved(String),

    #[error("Branch \"{0}\" has no choices")]
    NoChoices(String),

    #[error("Navigation stopped in state {0}")]
    Stalled(TreeState),
}

/// Show the loading message on stderr while a resolver runs.
fn loading_indicator(message: String) -> impl FnMut(TreeState, &crate::machine::TreeContext) {
    let mut showing = false;
    move |state, context| {
        let mut err = io::stderr();
        if state.is_loading() {
            let _ = write!(err, "? {} {}", context.current_node.label(), message);
            let _ = err.flush();
            showing = true;
        } else if showing {
            let _ = execute!(err, MoveToColumn(0), Clear(ClearType::CurrentLine));
            showing = false;
        }
    }
}

/// Walk `root` until the user reaches an answer or backs out.
///
/// The answer is written to `out`, rendered according to `options`.
pub fn run<P: Prompt, W: Write>(
    root: Node,
    prompt: &mut P,
    out: &mut W,
    options: &InteractiveOptions,
) -> Result<Outcome, InteractiveError> {
    let mut machine = TreeMachine::new(root);
    if options.show_loading {
        machine.subscribe(loading_indicator(options.loading_message.clone()));
    }
    machine.start();

    loop {
        let state = machine.state();
        let node = &machine.context().current_node;
        debug!(%state, node = %node.label(), "interactive step");

        match (state, node) {
            (TreeState::RenderBranch, Node::Branch(branch)) => {
                let labels: Vec<String> =
                    branch.children.iter().map(|c| c.label().to_string()).collect();
                if labels.is_empty() {
                    return Err(InteractiveError::NoChoices(branch.label.clone()));
                }
                match prompt.select(&branch.label, &labels)? {
                    Some(index) => {
                        machine.send(TreeEvent::SelectChild(index));
                    }
                    None => return Ok(Outcome::Cancelled),
                }
            }
            (TreeState::RenderLeaf, _) => {
                if options.styled {
                    writeln!(out, "{} {}", "?".green(), node.label().bold())?;
                } else {
                    writeln!(out, "? {}", node.label())?;
                }
                machine.send(TreeEvent::Finalise);
            }
            (TreeState::RenderValue, Node::Leaf(leaf)) => {
                let value = leaf.value.clone();
                writeln!(out)?;
                writeln!(out, "{}", render_markdown(&value, options.styled))?;
                return Ok(Outcome::Answered(value));
            }
            (state, _) if state.is_failure() => {
                let message = machine
                    .context()
                    .error
                    .as_ref()
                    .map_or_else(|| "Unknown error".to_string(), ToString::to_string);
                writeln!(out, "✗ {message}")?;
                if prompt.confirm("Retry?")? {
                    machine.send(TreeEvent::Retry);
                } else {
                    return Err(InteractiveError::Unresolved(message));
                }
            }
            (state, _) => return Err(InteractiveError::Stalled(state)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{AsyncBranch, Branch, Leaf};
    use std::io::Cursor;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn tree() -> Node {
        Branch::new(
            "What do you need?",
            vec![
                Leaf::new("Install", "Run the installer.").into(),
                Branch::new("Usage", vec![Leaf::new("Basics", "Start here.").into()]).into(),
            ],
        )
        .into()
    }

    #[test]
    fn test_scripted_session() {
        let mut prompt = LinePrompt::new(Cursor::new("2\n1\n"), Vec::new());
        let mut out = Vec::new();
        let outcome = run(tree(), &mut prompt, &mut out, &InteractiveOptions::default()).unwrap();

        assert_eq!(outcome, Outcome::Answered("Start here.".to_string()));
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "? Basics\n\nStart here.\n");
    }

    #[test]
    fn test_cancel() {
        let mut prompt = LinePrompt::new(Cursor::new("q\n"), Vec::new());
        let outcome = run(tree(), &mut prompt, &mut Vec::new(), &InteractiveOptions::default())
            .unwrap();
        assert_eq!(outcome, Outcome::Cancelled);
    }

    #[test]
    fn test_retry_prompt() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let root = AsyncBranch::new("Flaky", move || {
            if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                Err("timed out".into())
            } else {
                Ok(vec![Leaf::new("Done", "ok").into()])
            }
        });

        let mut prompt = LinePrompt::new(Cursor::new("y\n1\n"), Vec::new());
        let mut out = Vec::new();
        let outcome = run(root.into(), &mut prompt, &mut out, &InteractiveOptions::default())
            .unwrap();

        assert_eq!(outcome, Outcome::Answered("ok".to_string()));
        assert!(String::from_utf8(out).unwrap().starts_with("✗ timed out\n"));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_declined_retry() {
        let root = AsyncBranch::new("Broken", || Err("offline".into()));
        let mut prompt = LinePrompt::new(Cursor::new("n\n"), Vec::new());
        let err = run(root.into(), &mut prompt, &mut Vec::new(), &InteractiveOptions::default())
            .unwrap_err();
        assert_eq!(err.to_string(), "offline");
    }
}
