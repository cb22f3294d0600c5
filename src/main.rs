// intcalc: integer expression calculator

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use crossterm::style::Stylize;
use tracing_subscriber::EnvFilter;

use intcalc::interpreter::engine::evaluate;
use intcalc::parser::ast::Expr;
use intcalc::parser::parse::Parser as ExprParser;

/// Evaluate an integer arithmetic expression built from `+ - * /`.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Expression to evaluate. Read from --file or standard input when omitted.
    expression: Option<String>,

    /// Read the expression from a file instead.
    #[arg(short, long, conflicts_with = "expression")]
    file: Option<PathBuf>,

    /// Print only the result, without the parsed expression.
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    // Logs go to stderr so stdout carries only results. Level comes from RUST_LOG.
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();

    let stdout = io::stdout();
    match run(&args, io::stdin().lock(), &mut stdout.lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

/// Parse, print and evaluate one expression. `stdin` is read only when neither
/// an inline expression nor `--file` is given.
fn run(
    args: &Args,
    stdin: impl BufRead,
    out: &mut impl Write,
) -> Result<(), Box<dyn std::error::Error>> {
    let expr = read_expression(args, stdin)?;

    if !args.quiet {
        writeln!(out, "expr will evaluate: {}", expr)?;
    }

    let result = evaluate(&expr)?;
    writeln!(out, "result: {}", result)?;

    Ok(())
}

fn read_expression(
    args: &Args,
    stdin: impl BufRead,
) -> Result<Expr, Box<dyn std::error::Error>> {
    if let Some(source) = &args.expression {
        return Ok(ExprParser::from_reader(source.as_bytes()).parse()?);
    }

    if let Some(path) = &args.file {
        let file = File::open(path)
            .map_err(|e| format!("Failed to open '{}': {}", path.display(), e))?;
        return Ok(ExprParser::from_reader(BufReader::new(file)).parse()?);
    }

    Ok(ExprParser::from_reader(stdin).parse()?)
}
