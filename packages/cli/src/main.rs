use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use persistence_cli::{execute, open_store, CliError, Command};
use persistence_core::SourceOptions;

/// persist - read and write string-serialized data sources
#[derive(Parser, Debug)]
#[command(name = "persist")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory that relative file locations resolve against
    /// [default: $PERSIST_ROOT, then the current directory]
    #[arg(long)]
    root: Option<PathBuf>,

    /// Timeout in seconds for remote fetches
    #[arg(long)]
    timeout: Option<u64>,

    /// Data source locator, e.g. `readonly:json://data/players.json`
    locator: String,

    #[command(subcommand)]
    command: Command,
}

fn run(args: &Args) -> Result<String, CliError> {
    let mut options = match &args.root {
        Some(root) => SourceOptions::with_root(root),
        None => SourceOptions::from_env(),
    };
    options.timeout = args.timeout.map(Duration::from_secs);

    let mut store = open_store(&args.locator, &options)?;
    execute(store.as_mut(), &args.command)
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    match run(&args) {
        Ok(output) => {
            if !output.is_empty() {
                println!("{}", output);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(e.exit_code());
        }
    }
}
