mod cli;
mod output;

use anyhow::Context;
use clap::Parser;
use cli::Cli;
use output::Output;
use std::io::{self, BufRead};
use std::process;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use unformat::{Decode, MatchResult, Pattern};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(true) => process::exit(0),
        Ok(false) => process::exit(1),
        Err(err) => {
            eprintln!("error: {err:#}");
            process::exit(2);
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "unformat=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Returns whether every input matched and decoded.
fn run(cli: &Cli) -> anyhow::Result<bool> {
    let pattern = Pattern::compile(&cli.template)
        .with_context(|| format!("invalid template '{}'", cli.template))?;

    let use_color = !cli.no_color && atty::is(atty::Stream::Stdout);
    let mut output = Output::new(cli.format, use_color);

    if cli.show_pattern {
        output.print_pattern(&pattern)?;
        return Ok(true);
    }

    let decode = if cli.raw { Decode::Raw } else { Decode::Typed };
    let mut all_matched = true;

    if cli.inputs.is_empty() {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let line = line.context("failed to read stdin")?;
            all_matched &= process_input(&pattern, &line, decode, &mut output)?;
        }
    } else {
        for input in &cli.inputs {
            all_matched &= process_input(&pattern, input, decode, &mut output)?;
        }
    }

    output.flush()?;
    Ok(all_matched)
}

fn process_input(
    pattern: &Pattern,
    input: &str,
    decode: Decode,
    output: &mut Output,
) -> anyhow::Result<bool> {
    match pattern.match_with(input, decode) {
        Ok(MatchResult::Match(values)) => {
            output.print_match(pattern, &values)?;
            Ok(true)
        }
        Ok(MatchResult::NoMatch) => {
            debug!(input = %input, "no match");
            output.print_no_match(input)?;
            Ok(false)
        }
        Err(err) => {
            output.print_error(input, &err)?;
            Ok(false)
        }
    }
}
