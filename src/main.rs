use std::fs;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use unitmath::{get_result_with, interpreter::scope::Options};

/// unitmath evaluates mathematical expressions with complex numbers, physical
/// units and matrices.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells unitmath to read the expressions from a file instead of the
    /// command line.
    #[arg(short, long)]
    file: bool,

    /// Pipe mode prints the value of the last statement.
    #[arg(short, long)]
    pipe_mode: bool,

    /// Evaluates against a read-only scope: assignments and function
    /// definitions are rejected.
    #[arg(short, long)]
    read_only: bool,

    contents: String,
}

fn main() {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
                             .with_writer(std::io::stderr)
                             .init();

    let args = Args::parse();

    let script = if args.file {
        fs::read_to_string(&args.contents).unwrap_or_else(|_| {
            eprintln!("Failed to read the input file '{}'. Perhaps this file does not exist?",
                      &args.contents);
            std::process::exit(1);
        })
    } else {
        args.contents
    };

    let options = Options { read_only: args.read_only,
                            ..Options::default() };
    if let Err(e) = get_result_with(&script, args.pipe_mode, options) {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
