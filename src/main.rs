use std::io;
use std::path::PathBuf;

use summary_store::config::Config;
use summary_store::demo;
use summary_store::{AppError, Result, SummaryRepository};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging (only show warnings and errors by default)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    // Parse command line arguments
    let args: Vec<String> = std::env::args().collect();

    let config = match args.get(1).map(String::as_str) {
        Some("--config") => {
            let path = args
                .get(2)
                .map(PathBuf::from)
                .ok_or_else(|| AppError::Config("--config requires a path".to_string()))?;
            Config::load_from(&path)?
        }
        Some(other) => {
            return Err(AppError::Config(format!("unknown argument: {}", other)));
        }
        None => Config::load()?,
    };

    let repository = SummaryRepository::open(&config.db_path).await?;

    // Close even when the demo fails; a `?` before this point drops the connection instead.
    let mut stdout = io::stdout();
    let result = demo::run(&repository, &mut stdout).await;

    println!();
    println!("Closing database connection.");
    repository.close().await?;

    if let Err(e) = &result {
        eprintln!("Error: {}", e);
    }

    result.map(|_| ())
}
