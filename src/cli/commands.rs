use clap::{ArgAction, Parser, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "self-help")]
#[command(version)]
#[command(about = "Navigate decision-tree help documents from the terminal")]
#[command(
    long_about = "self-help - Walk a tree of questions down to an answer.\n\n\
    A document is either a directory of linked markdown files (each folder has a\n\
    README.md whose H1 is the question and whose list links are the choices) or a\n\
    JSON file describing the same tree.\n\n\
    Examples:\n  \
    self-help interactive -s docs/       # Answer questions in the terminal\n  \
    self-help markdown -s docs/ > out.md # Flatten into one markdown file\n  \
    self-help lint -s docs/              # Check every link in the tree\n  \
    self-help completions zsh            # Print shell completions"
)]
pub struct Cli {
    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    ///
    /// Logs go to stderr. RUST_LOG takes precedence when set.
    #[arg(short = 'd', long = "debug", action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Disable colors and terminal styling
    ///
    /// Overrides the `[output] color` setting in config.toml.
    #[arg(long = "plain", global = true)]
    pub plain: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, clap::Subcommand)]
pub enum Command {
    /// Navigate a document interactively
    ///
    /// Branches are shown as a list of choices. Use the arrow keys (or j/k)
    /// and Enter to pick one, Esc or q to quit. When stdin is not a terminal
    /// choices are read as numbers, one per line.
    Interactive {
        /// Document directory, README.md, or .json file
        #[arg(short = 's', long = "source", value_name = "PATH", value_hint = clap::ValueHint::AnyPath)]
        source: PathBuf,
    },

    /// Flatten a document into a single markdown file
    ///
    /// Every branch becomes a collapsible <details> block and every leaf
    /// value is included verbatim. Lazy nodes are resolved along the way.
    Markdown {
        /// Document directory, README.md, or .json file
        #[arg(short = 's', long = "source", value_name = "PATH", value_hint = clap::ValueHint::AnyPath)]
        source: PathBuf,
    },

    /// Validate every index and link of a markdown document
    ///
    /// Reports all problems rather than stopping at the first one.
    /// Exits with status 1 when any error is found.
    Lint {
        /// Document directory or its README.md
        #[arg(short = 's', long = "source", value_name = "DIR", value_hint = clap::ValueHint::DirPath)]
        source: PathBuf,

        /// Report format
        ///
        ///   plain - Human-readable report (default)
        ///   json  - `{ "success": bool, "errors": [{ "path", "message" }] }`
        #[arg(short = 'o', long = "output", default_value = "plain")]
        output: OutputFormat,
    },

    /// Print shell completions to stdout
    Completions {
        /// Target shell
        shell: Shell,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Plain text output
    Plain,
    /// JSON output
    Json,
}
