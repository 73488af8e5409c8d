use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use flashjson_core::path::JsonPath;
use flashjson_core::pointer::JsonPointer;
use flashjson_core::{Document, SerializeFlags};
use tracing::level_filters::LevelFilter;

#[derive(Parser)]
#[command(name = "flashjson")]
#[command(about = "Parse, format, and query JSON with flashjson-core")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (sets log level to debug)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a JSON file and report success or the failing offset
    Parse {
        /// Input JSON file
        input: PathBuf,
    },

    /// Parse then re-serialize (minified) to stdout
    Fmt {
        /// Input JSON file
        input: PathBuf,
    },

    /// On-demand JSON Pointer extraction, without materializing the rest of the document
    Get {
        /// Input JSON file
        input: PathBuf,

        /// RFC 6901 JSON Pointer, e.g. "/a/b/0"
        #[arg(short, long)]
        pointer: String,
    },

    /// Evaluate a restricted JSONPath expression against a JSON file
    Path {
        /// Input JSON file
        input: PathBuf,

        /// JSONPath expression, e.g. "$.a[*].b"
        #[arg(short, long)]
        path: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { LevelFilter::DEBUG } else { LevelFilter::WARN };
    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Parse { input } => cmd_parse(&input),
        Commands::Fmt { input } => cmd_fmt(&input),
        Commands::Get { input, pointer } => cmd_get(&input, &pointer),
        Commands::Path { input, path } => cmd_path(&input, &path),
    }
}

fn read_input(input: &PathBuf) -> Result<Vec<u8>> {
    fs::read(input).with_context(|| format!("Failed to read input file: {}", input.display()))
}

fn cmd_parse(input: &PathBuf) -> Result<()> {
    let bytes = read_input(input)?;
    match Document::parse(&bytes) {
        Ok(_) => {
            println!("ok");
            Ok(())
        }
        Err(err) => {
            eprintln!("parse error at offset {}: {}", err.offset(), err);
            anyhow::bail!("failed to parse {}", input.display());
        }
    }
}

fn cmd_fmt(input: &PathBuf) -> Result<()> {
    let bytes = read_input(input)?;
    let doc = Document::parse(&bytes).with_context(|| format!("Failed to parse {}", input.display()))?;
    let mut buf = flashjson_core::buffer::WriteBuffer::new();
    doc.serialize(&mut buf, SerializeFlags::default())
        .context("Failed to serialize document")?;
    println!("{}", buf.to_string_lossy());
    Ok(())
}

fn cmd_get(input: &PathBuf, pointer: &str) -> Result<()> {
    let bytes = read_input(input)?;
    let pointer = JsonPointer::parse(pointer).context("Failed to parse JSON Pointer")?;
    let matched = Document::parse_on_demand(&bytes, &pointer)
        .with_context(|| format!("Failed to resolve pointer against {}", input.display()))?;
    std::io::Write::write_all(&mut std::io::stdout(), matched)?;
    println!();
    Ok(())
}

fn cmd_path(input: &PathBuf, path: &str) -> Result<()> {
    let bytes = read_input(input)?;
    let doc = Document::parse(&bytes).with_context(|| format!("Failed to parse {}", input.display()))?;
    let parsed = JsonPath::parse(path).context("Failed to parse JSONPath expression")?;
    let matches = doc.query_path(&parsed);

    let mut buf = flashjson_core::buffer::WriteBuffer::new();
    match matches.as_slice() {
        // A path that matched nothing is "no match", not an empty
        // collection: report it the way a missing value reports (§4.4).
        [] => buf.push(b"null"),
        [single] => {
            single.serialize(&mut buf, SerializeFlags::default())?;
        }
        many => {
            buf.push_byte(b'[');
            for (i, value) in many.iter().enumerate() {
                if i > 0 {
                    buf.push_byte(b',');
                }
                value.serialize(&mut buf, SerializeFlags::APPEND_BUFFER)?;
            }
            buf.push_byte(b']');
        }
    }
    println!("{}", buf.to_string_lossy());
    Ok(())
}
