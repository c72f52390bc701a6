//! Purpose: `lazyjson` CLI entry point.
//! Role: Binary crate root; reads one JSON document, walks a dotted path, prints the leaf.
//! Invariants: Only the nodes along the path are classified; siblings stay undecoded.
//! Invariants: Leaf output goes to stdout; errors go to stderr (JSON unless a terminal).
//! Invariants: Process exit code is derived from `api::to_exit_code`.
use std::fs::File;
use std::io::{self, BufReader, IsTerminal};
use std::path::PathBuf;

use clap::{Parser, ValueEnum, ValueHint};
use serde_json::{Map, Value, json};
use tracing_subscriber::EnvFilter;

use lazyjson::api::{Error, ErrorKind, Node, Options, to_exit_code};

#[derive(Parser, Debug)]
#[command(
    name = "lazyjson",
    version,
    about = "Extract one value from a JSON document by path"
)]
struct Cli {
    /// Dotted path such as `user.tags.0`; numeric segments index arrays. Empty selects the root.
    #[arg(default_value = "")]
    path: String,
    /// Read the document from a file instead of stdin.
    #[arg(long, value_hint = ValueHint::FilePath)]
    file: Option<PathBuf>,
    /// Fail when anything but whitespace follows the document.
    #[arg(long)]
    strict: bool,
    /// Stop reading input after this many bytes.
    #[arg(long, value_name = "BYTES")]
    max_bytes: Option<u64>,
    /// How to decode the selected value.
    #[arg(long = "as", value_enum, default_value_t = Extract::Raw)]
    extract: Extract,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
enum Extract {
    Raw,
    String,
    Bool,
    Int,
    Int32,
    Uint32,
    Int64,
    Uint64,
    Float,
    Value,
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    let exit_code = match run(&cli) {
        Ok(()) => 0,
        Err(err) => {
            emit_error(&err);
            to_exit_code(err.kind())
        }
    };
    std::process::exit(exit_code);
}

fn run(cli: &Cli) -> Result<(), Error> {
    let mut options = Options::new().reject_trailing(cli.strict);
    if let Some(limit) = cli.max_bytes {
        options = options.max_input_bytes(limit);
    }

    let root = match &cli.file {
        Some(path) => {
            let file = File::open(path).map_err(|err| {
                Error::new(ErrorKind::Decode)
                    .with_message(format!("failed to open {}", path.display()))
                    .with_hint("Check the --file path and permissions.")
                    .with_source(err)
            })?;
            Node::from_reader_with(BufReader::new(file), &options)
        }
        None => Node::from_reader_with(io::stdin().lock(), &options),
    };

    tracing::debug!(path = %cli.path, extract = ?cli.extract, "walking path");
    let leaf = walk(root, &cli.path);
    println!("{}", render(&leaf, cli.extract)?);
    Ok(())
}

fn walk(root: Node, path: &str) -> Node {
    if path.is_empty() {
        return root;
    }
    path.split('.').fold(root, |node, segment| step(&node, segment))
}

fn step(node: &Node, segment: &str) -> Node {
    let Ok(idx) = segment.parse::<usize>() else {
        return node.get(segment);
    };
    let child = node.index(idx);
    match child.err() {
        // Numeric keys are legal object keys.
        Some(err) if err.kind() == ErrorKind::WrongShape && node.err().is_none() => {
            node.get(segment)
        }
        _ => child,
    }
}

fn render(node: &Node, extract: Extract) -> Result<String, Error> {
    let text = match extract {
        Extract::Raw => node.data()?.to_string(),
        Extract::String => node.string()?,
        Extract::Bool => node.bool()?.to_string(),
        Extract::Int => node.int()?.to_string(),
        Extract::Int32 => node.int32()?.to_string(),
        Extract::Uint32 => node.uint32()?.to_string(),
        Extract::Int64 => node.int64()?.to_string(),
        Extract::Uint64 => node.uint64()?.to_string(),
        Extract::Float => format!("{:?}", node.float64()?),
        Extract::Value => node.value()?.to_string(),
    };
    Ok(text)
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

fn emit_error(err: &Error) {
    if io::stderr().is_terminal() {
        eprintln!("error: {err}");
        if let Some(hint) = err.hint() {
            eprintln!("hint: {hint}");
        }
        return;
    }
    eprintln!("{}", error_json(err));
}

fn error_json(err: &Error) -> Value {
    let mut inner = Map::new();
    inner.insert("kind".to_string(), json!(format!("{:?}", err.kind())));
    if let Some(message) = err.message() {
        inner.insert("message".to_string(), json!(message));
    }
    if let Some(hint) = err.hint() {
        inner.insert("hint".to_string(), json!(hint));
    }
    if let Some(truncated) = err.truncated() {
        inner.insert("truncated".to_string(), json!(truncated));
    }

    let mut outer = Map::new();
    outer.insert("error".to_string(), Value::Object(inner));
    Value::Object(outer)
}
