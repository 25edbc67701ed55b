//! # self-help
//!
//! Navigate decision-tree help documents from the terminal.
//!
//! ## Usage
//!
//! Answer questions interactively:
//! ```sh
//! self-help interactive --source docs/
//! ```
//!
//! Flatten the whole tree into one markdown file:
//! ```sh
//! self-help markdown --source docs/ > HELP.md
//! ```
//!
//! Check every link in the tree:
//! ```sh
//! self-help lint --source docs/
//! ```

mod cli;

use clap::{CommandFactory, Parser as ClapParser};
use cli::{Cli, Command, OutputFormat};
use color_eyre::Result;
use color_eyre::eyre::eyre;
use crossterm::style::Stylize;
use self_help::interactive::{self, InteractiveOptions, LinePrompt, Outcome, TerminalPrompt};
use self_help::{Config, flatten, lint, load_document};
use std::fmt::Display;
use std::io::{self, IsTerminal, Write};
use std::path::Path;
use std::process;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, fmt};

fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Cli::parse();
    setup_logging(args.debug);

    let config = Config::load();
    let styled = config.use_color(args.plain);

    match &args.command {
        Command::Interactive { source } => run_interactive(source, &config, styled),
        Command::Markdown { source } => run_markdown(source, styled),
        Command::Lint { source, output } => run_lint(source, *output, styled),
        Command::Completions { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
    }
}

/// Logs go to stderr so they never mix with answers or flattened output.
/// `RUST_LOG` wins over the `-d` count when it is set.
fn setup_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    let fmt_layer = fmt::layer()
        .with_writer(io::stderr)
        .with_target(true)
        .with_thread_names(false)
        .with_filter(filter);

    tracing_subscriber::registry().with(fmt_layer).init();

    match level {
        LevelFilter::INFO => tracing::info!("Debug mode: info"),
        LevelFilter::DEBUG => tracing::debug!("Debug mode: debug"),
        LevelFilter::TRACE => tracing::debug!("Debug mode: trace"),
        _ => {}
    }
}

/// Report an error once and terminate.
fn exit_with(error: impl Display, styled: bool) -> ! {
    let message = format!("Error: {error}");
    if styled {
        eprintln!("{}", message.red());
    } else {
        eprintln!("{message}");
    }
    process::exit(1);
}

fn run_interactive(source: &Path, config: &Config, styled: bool) -> Result<()> {
    let root = load_document(source).unwrap_or_else(|err| exit_with(err, styled));

    let options = InteractiveOptions {
        styled,
        show_loading: config.interactive.show_loading && io::stderr().is_terminal(),
        loading_message: config.interactive.loading_message.clone(),
    };

    let mut out = io::stdout();
    let stdin = io::stdin();
    let result = if stdin.is_terminal() {
        interactive::run(root, &mut TerminalPrompt::new(styled), &mut out, &options)
    } else {
        let mut prompt = LinePrompt::new(stdin.lock(), io::stdout());
        interactive::run(root, &mut prompt, &mut out, &options)
    };

    match result {
        Ok(Outcome::Answered(_)) => Ok(()),
        Ok(Outcome::Cancelled) => {
            tracing::info!("navigation cancelled");
            Ok(())
        }
        Err(err) => exit_with(err, styled),
    }
}

fn run_markdown(source: &Path, styled: bool) -> Result<()> {
    let root = load_document(source).unwrap_or_else(|err| exit_with(err, styled));
    let markdown = flatten::to_markdown_document(&root).map_err(|err| eyre!("{err}"))?;

    let mut out = io::stdout();
    out.write_all(markdown.as_bytes())?;
    out.flush()?;
    Ok(())
}

fn run_lint(source: &Path, output: OutputFormat, styled: bool) -> Result<()> {
    let result = lint::lint(source);

    match output {
        OutputFormat::Plain => print!("{}", lint::render_report(&result, source, styled)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
    }

    if !result.success {
        process::exit(1);
    }
    Ok(())
}
