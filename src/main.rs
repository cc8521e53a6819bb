// minic: interpreter and x86 compiler for a small C-like language

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use crossterm::style::Stylize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use minic::console::StdConsole;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Run the program directly
    Interpret,
    /// Write NASM assembly for the program
    Compile,
}

#[derive(Debug, Parser)]
#[command(name = "minic", version, about = "Run or compile a small C-like language")]
struct Cli {
    /// Source file to run or compile
    source: PathBuf,

    /// Assembly output path; implies --mode compile
    output: Option<PathBuf>,

    #[arg(short, long, value_enum, default_value_t = Mode::Interpret)]
    mode: Mode,

    /// Log more (-v debug, -vv trace); MINIC_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {:#}", "error:".red().bold(), err);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_env("MINIC_LOG").unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let source = fs::read_to_string(&cli.source)
        .with_context(|| format!("failed to read '{}'", cli.source.display()))?;

    let mode = if cli.output.is_some() { Mode::Compile } else { cli.mode };

    match mode {
        Mode::Interpret => {
            info!(source = %cli.source.display(), "interpreting");
            minic::interpret(&source, StdConsole::new())?;
        }
        Mode::Compile => {
            let output = cli
                .output
                .clone()
                .unwrap_or_else(|| default_output_path(&cli.source));
            let asm = minic::compile(&source)?;
            fs::write(&output, asm).with_context(|| format!("failed to write '{}'", output.display()))?;
            info!(output = %output.display(), "assembly written");
        }
    }
    Ok(())
}

/// `prog.c` becomes `prog.asm`; any other name gets `.asm` appended
fn default_output_path(source: &Path) -> PathBuf {
    if source.extension().is_some_and(|ext| ext == "c") {
        source.with_extension("asm")
    } else {
        let mut name = source.as_os_str().to_owned();
        name.push(".asm");
        PathBuf::from(name)
    }
}
