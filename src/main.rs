//! memfilter - filter JSON records with a parsed filter expression

use anyhow::{bail, Context, Result};
use clap::Parser as ClapParser;
use log::{debug, info};
use memfilter::{Evaluator, Node};
use serde_json::Value;
use std::fs;
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

/// Filter a JSON array of records with an expression tree produced by the
/// query parser
#[derive(ClapParser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Expression tree as inline JSON
    #[arg(short, long, conflicts_with = "expr_file", required_unless_present = "expr_file")]
    expr: Option<String>,

    /// File holding the expression tree as JSON
    #[arg(short = 'f', long)]
    expr_file: Option<PathBuf>,

    /// Records file holding a JSON array of objects (stdin when omitted)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Print the number of matching records instead of the records
    #[arg(short, long)]
    count: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Set up logging
    let log_level = if args.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let node = load_expression(&args)?;
    debug!("expression: {:?}", node);

    let records = load_records(args.input.as_deref())?;
    info!("loaded {} records", records.len());

    let evaluator = Evaluator::new();
    let matched = evaluator
        .filter(&node, &records)
        .context("Failed to evaluate filter")?;
    info!("{} of {} records matched", matched.len(), records.len());

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    if args.count {
        writeln!(out, "{}", matched.len())?;
    } else {
        for record in matched {
            serde_json::to_writer(&mut out, record).context("Failed to write record")?;
            writeln!(out)?;
        }
    }
    out.flush().context("Failed to flush output")?;

    Ok(())
}

fn load_expression(args: &Args) -> Result<Node> {
    let text = match (&args.expr, &args.expr_file) {
        (Some(inline), _) => inline.clone(),
        (None, Some(path)) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read expression file {}", path.display()))?,
        (None, None) => bail!("No expression given"),
    };
    serde_json::from_str(&text).context("Failed to decode expression tree")
}

fn load_records(path: Option<&Path>) -> Result<Vec<Value>> {
    let text = match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read records file {}", path.display()))?,
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read records from stdin")?;
            text
        }
    };

    match serde_json::from_str::<Value>(&text).context("Failed to decode records")? {
        Value::Array(records) => Ok(records),
        other => bail!("Records input must be a JSON array, got {}", kind_of(&other)),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
