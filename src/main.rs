use anyhow::Result;
use clap::{Parser, Subcommand};
mod menu;
mod output;
mod prompt;
use menu::Menu;
use sealpack::{CompressionLevel, Pipeline};
use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "sealpack")]
#[command(
    version,
    about = "Compress a file, then encrypt it under a password. Runs an interactive menu when no command is given."
)]
struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Zstd compression level, 1-19
    #[arg(long, global = true, value_name = "N", env = "SEALPACK_LEVEL")]
    level: Option<i32>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Compresses and encrypts a file into OUTPUT_DIR/<name>.compressed
    #[command(arg_required_else_help = true)]
    Encrypt { input: PathBuf, output_dir: PathBuf },

    /// Decrypts and decompresses a .compressed file into OUTPUT_DIR
    #[command(arg_required_else_help = true)]
    Decrypt { input: PathBuf, output_dir: PathBuf },

    /// Shows the header of an encrypted file without decrypting it
    #[command(arg_required_else_help = true)]
    Inspect {
        input: PathBuf,

        /// Print as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn main() -> Result<()> {
    let args = Cli::parse();
    init_tracing(args.verbose);

    let pipeline = match args.level {
        Some(level) => Pipeline::with_level(CompressionLevel::new(level)?),
        None => Pipeline::new(),
    };

    let mut stdout = io::stdout().lock();

    match args.command {
        Some(Commands::Encrypt { input, output_dir }) => {
            let password = prompt::read_new_password_with_confirmation()?;
            let report = pipeline.encrypt_file(&input, &output_dir, &password)?;
            output::write_sealed(&mut stdout, &report)?;
        }
        Some(Commands::Decrypt { input, output_dir }) => {
            let password = prompt::read_password()?;
            let report = pipeline.decrypt_file(&input, &output_dir, &password)?;
            output::write_opened(&mut stdout, &report)?;
        }
        Some(Commands::Inspect { input, json }) => {
            let info = sealpack::inspect_file(&input)?;
            if json {
                serde_json::to_writer_pretty(&mut stdout, &info)?;
                writeln!(stdout)?;
            } else {
                output::write_info(&mut stdout, &info)?;
            }
        }
        None => {
            let stdin = io::stdin();
            let hidden = stdin.is_terminal();
            Menu::new(stdin.lock(), stdout, pipeline)
                .hidden_password(hidden)
                .run()?;
        }
    }

    Ok(())
}
