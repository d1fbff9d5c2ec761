use std::process::ExitCode;

use clap::{Parser, Subcommand};
use dbadmin::{database_operation, Connection, Operation, Outcome};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
#[clap(propagate_version = true)]
struct Cli {
    /// Connection URL, e.g. postgresql://postgres@localhost/postgres
    #[clap(short, long, env = "DATABASE_URL")]
    url: String,

    /// Print debug information
    #[clap(long)]
    debug: bool,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check whether a database exists; exits 1 when it does not
    Exists {
        /// Database name (file path for SQLite); omit for the engine default
        name: Option<String>,
    },
    /// Create a database
    Create { name: String },
    /// Drop a database
    Drop { name: String },
    /// List every database visible on the server
    List,
}

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env file is fine.
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let level = if cli.debug {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(level.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .init();

    let connection = match Connection::open(&cli.url) {
        Ok(connection) => connection,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::from(2);
        }
    };

    let (operation, args): (Operation, Vec<&str>) = match &cli.command {
        Commands::Exists { name } => (Operation::Exists, name.as_deref().into_iter().collect()),
        Commands::Create { name } => (Operation::Create, vec![name.as_str()]),
        Commands::Drop { name } => (Operation::Drop, vec![name.as_str()]),
        Commands::List => (Operation::ListAll, Vec::new()),
    };

    match database_operation(&connection, operation, &args).await {
        Ok(Outcome::Exists(found)) => {
            println!("{found}");
            if found {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(1)
            }
        }
        Ok(Outcome::Databases(names)) => {
            for name in names {
                println!("{name}");
            }
            ExitCode::SUCCESS
        }
        Ok(Outcome::Created) | Ok(Outcome::Dropped) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::from(2)
        }
    }
}
