use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use log::{debug, error};

use stackcalc::{evaluate, evaluate_batch, Result};

const EXIT_USAGE: u8 = 64;

/// Evaluate infix arithmetic expressions.
#[derive(Parser, Debug)]
#[command(name = "stackcalc", version)]
struct Args {
    /// Expressions to evaluate.
    expressions: Vec<String>,

    /// Read one expression per line from FILE ("-" for stdin).
    #[arg(short, long, value_name = "FILE")]
    file: Option<PathBuf>,

    /// Evaluate the expressions on all cores.
    #[arg(short, long)]
    parallel: bool,

    /// Number of decimals to print.
    #[arg(long, value_name = "N")]
    precision: Option<usize>,

    /// Print only the result of each expression.
    #[arg(short, long)]
    quiet: bool,
}

fn read_expressions(path: &Path) -> io::Result<Vec<String>> {
    let reader: Box<dyn BufRead> = if path.as_os_str() == "-" {
        Box::new(BufReader::new(io::stdin()))
    } else {
        Box::new(BufReader::new(File::open(path)?))
    };

    let mut expressions = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if !line.trim().is_empty() {
            expressions.push(line);
        }
    }
    Ok(expressions)
}

fn format_value(value: f64, precision: Option<usize>) -> String {
    match precision {
        Some(precision) => format!("{value:.precision$}"),
        None => value.to_string(),
    }
}

/// Status code of the first failing expression, 0 when all succeed.
fn exit_status(results: &[Result<f64>]) -> u8 {
    results
        .iter()
        .find_map(|result| result.err())
        // codes are 1..=3
        .map_or(0, |err| err.code() as u8)
}

fn main() -> ExitCode {
    pretty_env_logger::init();

    let args = Args::parse();
    let mut expressions = args.expressions.clone();
    if let Some(path) = &args.file {
        match read_expressions(path) {
            Ok(lines) => expressions.extend(lines),
            Err(err) => {
                error!("cannot read {}: {err}", path.display());
                return ExitCode::from(EXIT_USAGE);
            }
        }
    }

    if expressions.is_empty() {
        eprintln!("error: no expression given (see --help)");
        return ExitCode::from(EXIT_USAGE);
    }

    debug!("{} expression(s), parallel: {}", expressions.len(), args.parallel);
    let results = if args.parallel {
        evaluate_batch(&expressions[..])
    } else {
        expressions.iter().map(|e| evaluate(e)).collect()
    };

    for (expression, result) in expressions.iter().zip(&results) {
        let rendered = match result {
            Ok(value) => format_value(*value, args.precision),
            Err(err) => format!("error: {err}"),
        };

        if args.quiet {
            println!("{rendered}");
        } else {
            println!("{expression} = {rendered}");
        }
    }

    ExitCode::from(exit_status(&results))
}
