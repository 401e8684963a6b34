use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;

#[derive(Parser)]
#[command(name = "ownctl", version, about = "Evaluate item ownership policies")]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate an ownership policy for a newly created item
    Evaluate(commands::evaluate::EvaluateArgs),
    /// List the available ownership policies
    Policies {
        /// Output machine-readable JSON
        #[arg(long)]
        json: bool,
    },
    /// Print version and exit
    Version,
}

fn init_tracing() {
    let _ = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result: Result<()> = match cli.cmd {
        Commands::Evaluate(args) => commands::evaluate::run(args),
        Commands::Policies { json } => commands::policies::run(json),
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(2);
    }
}
