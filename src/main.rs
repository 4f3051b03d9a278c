use dotenv::dotenv;
use orcamento_papelaria_backend::app::app::App;
use orcamento_papelaria_backend::util::logger::Logger;
use tracing::{error, info, warn};


async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let app = App::new().await?;
    app.start().await
}

#[tokio::main]
async fn main() {
    // Load .env before the logger so LOG_DIR and the level variables apply
    let env_result = dotenv();

    let logger = match Logger::new() {
        Ok(logger) => logger,
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            std::process::exit(1);
        }
    };

    info!("🚀 Starting Orçamento Papelaria backend");
    match env_result {
        Ok(_) => info!("✅ Successfully loaded .env file"),
        Err(e) => warn!("⚠️ Failed to load .env file: {} (using system env vars)", e),
    }

    if let Err(e) = run().await {
        error!("Application stopped: {}", e);
        // Flush the file writers before exiting
        drop(logger);
        std::process::exit(1);
    }
}
