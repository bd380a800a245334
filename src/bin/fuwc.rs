use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process;

use anyhow::{Result, anyhow};
use clap::{ArgAction, Parser};
use env_logger::Env;
use log::LevelFilter;

use uwc_rs::common::{gnu_name, io_error_msg, reset_sigpipe};
use uwc_rs::uwc::{ReadStrategy, UwcConfig, WordProcessor};

const TOOL_NAME: &str = "fuwc";

#[derive(Parser)]
#[command(
    name = "uwc",
    version,
    about = "Count the unique words in FILE, splitting the work across THREADS workers"
)]
struct Cli {
    /// File to read
    file: PathBuf,

    /// Number of worker threads (default: available CPU parallelism)
    #[arg(allow_negative_numbers = true)]
    threads: Option<String>,

    /// Map the whole file and split it into precomputed ranges instead of
    /// sharing one read cursor
    #[arg(long)]
    mmap: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short = 'v', long, action = ArgAction::Count)]
    verbose: u8,

    /// Decrease log verbosity (-q, -qq)
    #[arg(short = 'q', long, action = ArgAction::Count)]
    quiet: u8,
}

fn main() {
    reset_sigpipe();

    // Usage errors exit 1, not clap's default 2. --help/--version exit 0.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            process::exit(code);
        }
    };

    init_logging(cli.verbose, cli.quiet);

    if let Err(e) = run(&cli) {
        eprintln!("{}: {}", gnu_name(TOOL_NAME), e);
        process::exit(1);
    }
}

fn init_logging(verbose: u8, quiet: u8) {
    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or("warn"));
    builder.format_timestamp_millis();

    // Explicit flags override RUST_LOG; without them RUST_LOG applies.
    let level = match (verbose, quiet) {
        (0, 0) => None,
        (_, 1) => Some(LevelFilter::Error),
        (_, q) if q > 1 => Some(LevelFilter::Off),
        (1, _) => Some(LevelFilter::Info),
        (2, _) => Some(LevelFilter::Debug),
        _ => Some(LevelFilter::Trace),
    };
    if let Some(level) = level {
        builder.filter_level(level);
    }
    let _ = builder.try_init();
}

fn run(cli: &Cli) -> Result<()> {
    let workers = UwcConfig::parse_workers(cli.threads.as_deref())?;
    let strategy = if cli.mmap {
        ReadStrategy::Mmap
    } else {
        ReadStrategy::SharedCursor
    };

    let mut processor = WordProcessor::new(UwcConfig { workers, strategy });
    processor.process_file(&cli.file)?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    processor
        .print_result(&mut out)
        .and_then(|_| out.flush())
        .map_err(|e| anyhow!("write error: {}", io_error_msg(&e)))?;
    Ok(())
}
