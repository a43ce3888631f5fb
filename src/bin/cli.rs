//! avpdb CLI
//!
//! One-shot commands against an EEPROM image file.

use std::path::PathBuf;

use avpdb::protocol::{validate_identifier, Command};
use avpdb::{Config, Engine};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

/// avpdb CLI
#[derive(Parser, Debug)]
#[command(name = "avpdb-cli")]
#[command(about = "CLI for avpdb EEPROM images")]
struct Args {
    /// EEPROM image file
    #[arg(short, long, default_value = "eeprom.bin")]
    image: PathBuf,

    /// EEPROM size in bytes
    #[arg(short, long, default_value = "1024")]
    size: usize,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Define or overwrite a function
    Define {
        /// Function name
        id: String,

        /// Script text
        body: String,
    },

    /// List function names
    Ls,

    /// List functions and holes with sizes
    Ll,

    /// Print a function definition
    Cat {
        /// Function name
        id: String,
    },

    /// Erase a function
    Rm {
        /// Function name
        id: String,
    },

    /// Dump raw bytes
    Peep {
        /// First address
        start: Option<usize>,

        /// Last address (inclusive)
        end: Option<usize>,
    },
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> avpdb::Result<()> {
    let command = match args.command {
        Commands::Define { id, body } => {
            validate_identifier(&id)?;
            Command::Function {
                id,
                body: body.trim().to_string(),
            }
        }
        Commands::Ls => Command::Ls,
        Commands::Ll => Command::Ll,
        Commands::Cat { id } => Command::Cat { id },
        Commands::Rm { id } => Command::Rm { id },
        Commands::Peep { start, end } => Command::Peep {
            range: start.map(|s| (s, end.unwrap_or(usize::MAX))),
        },
    };

    let config = Config::builder()
        .eeprom_size(args.size)
        .ram_size(args.size)
        .eeprom_image(&args.image)
        .build();

    let mut engine = Engine::open(config)?;
    let response = engine.execute(command)?;
    println!("{}", response);

    engine.close()
}
