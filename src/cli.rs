//! The ruletree command-line interface.
//!
//! A thin outer surface over the library: read a tree dump, parse it, and
//! either pretty-print, validate, or re-emit it in canonical form. Uses the
//! `clap` derive API for declarative, type-safe argument parsing.

use crate::ast::{printer, Node};
use crate::errors::{print_error, SourceContext};
use crate::{syntax, validation};
use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Report, WrapErr};
use std::path::{Path, PathBuf};
use std::{fs, process};

/// The main CLI argument structure.
#[derive(Debug, Parser)]
#[command(
    name = "ruletree",
    version,
    about = "Inspect, check and reformat serialized rule trees."
)]
pub struct RuletreeArgs {
    #[command(subcommand)]
    pub command: Command,
}

/// An enumeration of all available CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Parse a rule file and show each tree in indented form.
    Show {
        /// The path to the rule file to show.
        #[arg(required = true)]
        file: PathBuf,
    },
    /// Parse and structurally validate a rule file.
    Check {
        /// The path to the rule file to check.
        #[arg(required = true)]
        file: PathBuf,
    },
    /// Parse a rule file and re-emit canonical one-line trees.
    Format {
        /// The path to the rule file to reformat.
        #[arg(required = true)]
        file: PathBuf,
    },
}

/// The main entry point for the CLI.
pub fn run() {
    let args = RuletreeArgs::parse();

    let result = match args.command {
        Command::Show { file } => handle_show(&file),
        Command::Check { file } => handle_check(&file),
        Command::Format { file } => handle_format(&file),
    };

    if let Err(report) = result {
        print_error(report);
        process::exit(1);
    }
}

fn handle_show(path: &Path) -> miette::Result<()> {
    let nodes = load(path)?;
    for node in &nodes {
        print!("{}", printer::pretty(node));
    }
    Ok(())
}

fn handle_check(path: &Path) -> miette::Result<()> {
    let (nodes, context) = load_with_context(path)?;
    validation::validate(&nodes, context).map_err(Report::new)?;
    println!("{}: {} rule(s) ok", path.display(), nodes.len());
    Ok(())
}

fn handle_format(path: &Path) -> miette::Result<()> {
    let nodes = load(path)?;
    for node in &nodes {
        println!("{}", node);
    }
    Ok(())
}

fn load(path: &Path) -> miette::Result<Vec<Node>> {
    load_with_context(path).map(|(nodes, _)| nodes)
}

fn load_with_context(path: &Path) -> miette::Result<(Vec<Node>, SourceContext)> {
    let source = fs::read_to_string(path)
        .into_diagnostic()
        .wrap_err_with(|| format!("cannot read {}", path.display()))?;
    let context = SourceContext::from_file(path.display().to_string(), source.clone());
    let nodes = syntax::parse(&source, context.clone()).map_err(Report::new)?;
    Ok((nodes, context))
}
