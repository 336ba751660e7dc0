use clap::Parser;
use neo4j_learning::cli::{self, Cli};
use neo4j_learning::core::db::Neo4jManager;
use std::io;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    // A missing .env file is fine; real environment variables still apply
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    // RUST_LOG wins over -v when set
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_level().to_string().to_lowercase()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    info!("Starting neo4j-learning...");

    let config = match cli.resolve_config(|key| std::env::var(key).ok()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    info!(%config, "Resolved configuration");

    let mut manager = Neo4jManager::new(config);
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    match cli::run(cli.command, cli.format, &mut manager, stdin.lock(), &mut stdout) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
