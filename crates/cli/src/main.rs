//! Cycle-accurate 16-bit pipeline simulator CLI.
//!
//! This binary provides a single entry point for the simulator. It performs:
//! 1. **Run:** Load a program image, tick the pipeline until it drains, and print
//!    the final register file and statistics.
//! 2. **Verify:** Optionally replay the program on the architectural oracle and
//!    compare retirements and final state.
//! 3. **Disassemble:** List a program image as assembly.

use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use r16sim_core::config::Config;
use r16sim_core::isa::disasm::disassemble;
use r16sim_core::sim::{Preload, Simulator, load_program, verify};
use r16sim_core::stats::STATS_SECTIONS;

#[derive(Parser, Debug)]
#[command(
    name = "r16sim",
    author,
    version,
    about = "Cycle-accurate 16-bit RISC pipeline simulator",
    long_about = "Run a program on the five-stage pipelined core, optionally checking it against the architectural oracle.\n\nImages ending in .s or .asm are assembled; anything else is read as one hex word per line.\n\nExamples:\n  r16sim run demos/sum.s\n  r16sim run prog.hex --config core.json --verify\n  r16sim disasm prog.hex"
)]
struct Cli {
    /// Log stalls, redirects and forwarding decisions (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a program until the pipeline drains.
    Run {
        /// Program image (.s/.asm source or hex words).
        image: PathBuf,

        /// JSON configuration file.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Compare the run against the architectural oracle.
        #[arg(long)]
        verify: bool,

        /// Override `general.max_ticks`.
        #[arg(long)]
        max_ticks: Option<u64>,

        /// Log every retirement.
        #[arg(long)]
        trace: bool,

        /// Statistics sections to print (comma-separated; default all).
        #[arg(long, value_delimiter = ',', value_parser = clap::builder::PossibleValuesParser::new(STATS_SECTIONS.iter().copied()))]
        stats: Vec<String>,
    },

    /// Disassemble a program image.
    Disasm {
        /// Program image (.s/.asm source or hex words).
        image: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let verbose = cli.verbose;

    let result = match cli.command {
        Commands::Run {
            image,
            config,
            verify,
            max_ticks,
            trace,
            stats,
        } => resolve_config(config.as_deref(), max_ticks, trace).and_then(|config| {
            init_logging(verbose, config.general.trace_instructions);
            cmd_run(&image, &config, verify, &stats)
        }),
        Commands::Disasm { image } => {
            init_logging(verbose, false);
            cmd_disasm(&image)
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("error: {e}");
            let mut source = e.source();
            while let Some(cause) = source {
                eprintln!("  caused by: {cause}");
                source = cause.source();
            }
            ExitCode::FAILURE
        }
    }
}

/// Filter used when `RUST_LOG` is unset.
fn default_filter(verbose: bool, commit_log: bool) -> String {
    let mut filter = String::from(if verbose { "debug" } else { "warn" });
    if commit_log {
        filter.push_str(",r16sim::commit=info");
    }
    filter
}

/// Installs the stderr subscriber. `RUST_LOG` takes precedence over the flags.
fn init_logging(verbose: bool, commit_log: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose, commit_log)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<Config, Box<dyn Error>> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let text = fs::read_to_string(path)
        .map_err(|e| format!("failed to read config `{}`: {e}", path.display()))?;
    Ok(Config::from_json(&text)?)
}

/// Loads the configuration file and applies command-line overrides.
fn resolve_config(
    path: Option<&Path>,
    max_ticks: Option<u64>,
    trace: bool,
) -> Result<Config, Box<dyn Error>> {
    let mut config = load_config(path)?;
    if let Some(limit) = max_ticks {
        config.general.max_ticks = limit;
    }
    config.general.trace_instructions |= trace;
    config.validate()?;
    Ok(config)
}

/// Runs a program to drain, printing registers and statistics.
fn cmd_run(
    image: &Path,
    config: &Config,
    check: bool,
    sections: &[String],
) -> Result<(), Box<dyn Error>> {
    let program = load_program(image)?;
    println!("[*] {} ({} words)", image.display(), program.len());
    println!(
        "    start_pc={:#06x}  data_words={}  read_timing={:?}",
        config.general.start_pc, config.memory.data_words, config.memory.read_timing
    );

    if check {
        let report = verify(&program, &Preload::new(), config)?;
        info!(ticks = report.ticks, "verification passed");
        println!(
            "[*] Oracle agrees: {} retirements over {} ticks",
            report.retirements.len(),
            report.ticks
        );
    }

    let mut sim = Simulator::new(config, program);
    let ticks = sim.run_until_drained()?;
    println!("[*] Drained after {ticks} ticks");
    println!("{}", sim.cpu.regs);
    sim.stats().print_sections(sections);
    Ok(())
}

/// Prints one line per word: address, encoding, assembly.
fn cmd_disasm(image: &Path) -> Result<(), Box<dyn Error>> {
    let program = load_program(image)?;
    for (addr, &word) in program.words().iter().enumerate() {
        println!("{addr:#06x}:  {word:04x}  {}", disassemble(word));
    }
    Ok(())
}
