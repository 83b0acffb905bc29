use std::fs;
use std::path::PathBuf;
use std::process;

use clap::Parser as _;
use dbml::ast::Document;
use dbml::logger::TracingLogger;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Parse a DBML file and print the document model as JSON.
#[derive(clap::Parser)]
#[command(name = "dbml", version, about)]
struct Cli {
    /// Path to the .dbml source file
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Emit single-line JSON
    #[arg(long)]
    compact: bool,

    /// Trace parse milestones to stderr
    #[arg(short, long)]
    debug: bool,
}

fn parse_file(cli: &Cli, input: &str) -> Result<Document, dbml::parser::ParseError> {
    if cli.debug {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new("dbml=debug"))
            .with_writer(std::io::stderr)
            .init();
        dbml::parse_with_logger(input, TracingLogger::new(Level::DEBUG))
    } else {
        dbml::parse(input)
    }
}

fn main() {
    let cli = Cli::parse();

    let input = match fs::read_to_string(&cli.input) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Failed to read {}: {}", cli.input.display(), e);
            process::exit(1);
        }
    };

    let doc = match parse_file(&cli, &input) {
        Ok(doc) => doc,
        Err(e) => {
            eprint!("{}", e.render(&input));
            process::exit(1);
        }
    };

    let json = if cli.compact {
        serde_json::to_string(&doc)
    } else {
        serde_json::to_string_pretty(&doc)
    };
    let json = match json {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Failed to serialize document: {}", e);
            process::exit(1);
        }
    };

    match cli.output {
        Some(path) => {
            if let Err(e) = fs::write(&path, json + "\n") {
                eprintln!("Failed to write {}: {}", path.display(), e);
                process::exit(1);
            }
        }
        None => println!("{}", json),
    }
}
