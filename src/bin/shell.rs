//! avpdb Shell Binary
//!
//! Interactive read-command loop over stdin.

use std::io::{self, BufRead, IsTerminal, Write};
use std::path::PathBuf;
use std::sync::Arc;

use avpdb::protocol::{encode_command, parse_command};
use avpdb::tasks::TaskList;
use avpdb::{Config, Engine, ShellMode};
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

/// avpdb Shell
#[derive(Parser, Debug)]
#[command(name = "avpdb-shell")]
#[command(about = "Interactive shell for the avpdb function store")]
#[command(version)]
struct Args {
    /// EEPROM image file (in-memory EEPROM if omitted)
    #[arg(short, long)]
    image: Option<PathBuf>,

    /// EEPROM size in bytes
    #[arg(short, long, default_value = "1024")]
    eeprom_size: usize,

    /// RAM drive size in bytes
    #[arg(short, long, default_value = "1024")]
    ram_size: usize,

    /// Largest record `cp` can move, in bytes
    #[arg(short, long, default_value = "256")]
    transfer_buffer: usize,

    /// Use the compact command set
    #[arg(long)]
    compact: bool,
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,avpdb=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    tracing::info!("avpdb shell v{}", avpdb::VERSION);

    let mut builder = Config::builder()
        .eeprom_size(args.eeprom_size)
        .ram_size(args.ram_size)
        .transfer_buffer_size(args.transfer_buffer)
        .mode(if args.compact {
            ShellMode::Compact
        } else {
            ShellMode::Extended
        });
    if let Some(image) = &args.image {
        tracing::info!("EEPROM image: {}", image.display());
        builder = builder.eeprom_image(image);
    }

    let tasks = Arc::new(TaskList::new());
    let mut engine = match Engine::open(builder.build()) {
        Ok(e) => e.with_tasks(tasks.clone()),
        Err(e) => {
            tracing::error!("Failed to open store: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = run(&mut engine) {
        tracing::error!("Shell error: {}", e);
    }

    tracing::debug!("Background tasks halted {} time(s)", tasks.halt_count());
    if let Err(e) = engine.close() {
        tracing::error!("Failed to flush EEPROM image: {}", e);
        std::process::exit(1);
    }
}

/// Read, execute and print until end of input
fn run(engine: &mut Engine) -> io::Result<()> {
    let stdin = io::stdin();
    let interactive = stdin.is_terminal();
    let mut stdout = io::stdout();

    let mut lines = stdin.lock().lines();
    loop {
        if interactive {
            write!(stdout, "> ")?;
            stdout.flush()?;
        }

        let line = match lines.next() {
            Some(line) => line?,
            None => return Ok(()),
        };

        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                writeln!(stdout, "error: {}", e)?;
                continue;
            }
        };

        tracing::trace!("Executing: {}", encode_command(&command));

        match engine.execute(command) {
            Ok(response) => writeln!(stdout, "{}", response)?,
            Err(e) => {
                if !e.is_recoverable() {
                    tracing::warn!("Command failed: {}", e);
                }
                writeln!(stdout, "error: {}", e)?;
            }
        }

        // Keep the image current in case the process is killed
        if let Err(e) = engine.flush() {
            tracing::warn!("Failed to flush EEPROM image: {}", e);
        }
    }
}
