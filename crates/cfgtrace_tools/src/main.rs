//! cfgtrace CLI
//!
//! Parse sentences against a text grammar and print derivation traces.

use anyhow::Context;
use cfgtrace::grammar::text::parse_grammar_with_start;
use cfgtrace::{tokenize, Algorithm, Grammar, ParseOutcome};
use cfgtrace_tools::cli::{Cli, Commands, OutputFormat};
use cfgtrace_tools::{render, request};
use clap::Parser;
use std::io::Read;
use std::path::Path;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli.command) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(2)
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with_writer(std::io::stderr)
        .init();
}

fn run(command: Commands) -> anyhow::Result<ExitCode> {
    match command {
        Commands::Parse {
            grammar,
            algorithm,
            start,
            limits,
            format,
            sentence,
        } => {
            let grammar = load_grammar(&grammar, start.as_deref())?;
            let tokens = tokenize(&sentence.join(" "));
            let outcome = cfgtrace::parse(&grammar, &tokens, algorithm, &limits.options())
                .with_context(|| format!("{algorithm} parser failed"))?;

            match format {
                OutputFormat::Table => print!("{}", render::table(&outcome)),
                OutputFormat::Json => println!("{}", render::json(&outcome)?),
            }
            Ok(verdict_code(&outcome))
        }

        Commands::Request { file } => {
            let body = read_request(file.as_deref())?;
            let response = request::respond_json(&body);
            println!("{}", serde_json::to_string(&response)?);
            Ok(match response.accepted() {
                Some(true) => ExitCode::SUCCESS,
                Some(false) => ExitCode::from(1),
                None => ExitCode::from(2),
            })
        }

        Commands::Check { grammar, start } => {
            let grammar = load_grammar(&grammar, start.as_deref())?;
            println!("{} rules, start symbol `{}`", grammar.len(), grammar.start());
            print!("{}", render::warnings(grammar.analyze().warnings()));
            Ok(ExitCode::SUCCESS)
        }

        Commands::Compare {
            grammar,
            start,
            limits,
            sentence,
        } => {
            let grammar = load_grammar(&grammar, start.as_deref())?;
            let tokens = tokenize(&sentence.join(" "));
            let options = limits.options();
            let mut any_accepted = false;
            for algorithm in Algorithm::ALL {
                let result = cfgtrace::parse(&grammar, &tokens, algorithm, &options);
                any_accepted |= result.as_ref().is_ok_and(|outcome| outcome.accepted);
                println!("{}", render::compare_row(algorithm, &result));
            }
            Ok(if any_accepted { ExitCode::SUCCESS } else { ExitCode::from(1) })
        }
    }
}

fn load_grammar(path: &Path, start: Option<&str>) -> anyhow::Result<Grammar> {
    let text = std::fs::read_to_string(path).with_context(|| format!("cannot read {}", path.display()))?;
    let grammar = match start {
        Some(start) => parse_grammar_with_start(&text, start),
        None => Grammar::from_text(&text),
    }
    .with_context(|| format!("invalid grammar in {}", path.display()))?;

    for warning in grammar.analyze().warnings() {
        tracing::warn!("{}: {warning}", path.display());
    }
    tracing::debug!(rules = grammar.len(), start = grammar.start(), "grammar loaded");
    Ok(grammar)
}

fn read_request(file: Option<&Path>) -> anyhow::Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path).with_context(|| format!("cannot read {}", path.display())),
        None => {
            let mut body = String::new();
            std::io::stdin()
                .read_to_string(&mut body)
                .context("cannot read request from stdin")?;
            Ok(body)
        }
    }
}

fn verdict_code(outcome: &ParseOutcome) -> ExitCode {
    if outcome.accepted {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    }
}
