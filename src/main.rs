//! Command-line front end: list the built-in tunes or render one to a
//! `.mid` file (or stdout).

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use tunesmith::TuneRegistry;

#[derive(Parser)]
#[command(name = "tunesmith", version, about = "Render built-in tunes as Standard MIDI Files")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the available tune names
    List,
    /// Render a tune to a MIDI file
    Render {
        /// Name of the tune to render
        name: String,
        /// Output path; defaults to <name>.mid, `-` writes to stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let registry = TuneRegistry::new();

    match cli.command {
        Command::List => {
            for name in registry.names() {
                println!("{name}");
            }
            ExitCode::SUCCESS
        }
        Command::Render { name, out } => match render(&registry, &name, out) {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => {
                eprintln!("error: {err}");
                if !registry.contains(&name) {
                    let names: Vec<_> = registry.names().collect();
                    eprintln!("available tunes: {}", names.join(", "));
                }
                ExitCode::FAILURE
            }
        },
    }
}

fn render(registry: &TuneRegistry, name: &str, out: Option<PathBuf>) -> tunesmith::Result<()> {
    // Resolve the tune before touching the filesystem so a bad name never
    // leaves an empty file behind.
    let tune = registry
        .get(name)
        .ok_or_else(|| tunesmith::tunes::Error::UnknownTune(name.to_owned()))?;

    match out {
        Some(path) if path.as_os_str() == "-" => {
            let stdout = io::stdout();
            let mut sink = stdout.lock();
            tune.generate(&mut sink)?;
            sink.flush()?;
        }
        path => {
            let path = path.unwrap_or_else(|| PathBuf::from(format!("{name}.mid")));
            let mut sink = BufWriter::new(File::create(&path)?);
            tune.generate(&mut sink)?;
            sink.flush()?;
            info!(tune = name, path = %path.display(), "wrote MIDI file");
        }
    }
    Ok(())
}
