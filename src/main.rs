use std::sync::Arc;

use sketchmaker::{
    logger::{self, LogLevel, LoggerConfig},
    Config, ImageClient, OpenAiClient,
};

#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let dotenv_loaded = dotenv::dotenv().is_ok();

    let config = Config::from_env();
    let logger_config = if config.log_json {
        LoggerConfig::production()
    } else {
        LoggerConfig::default()
    };
    let level = std::env::var("LOG_LEVEL")
        .ok()
        .and_then(|s| LogLevel::from_str(&s))
        .unwrap_or(logger_config.min_level);
    logger::init_with_config(logger_config.with_level(level))?;

    if dotenv_loaded {
        log::info!("✅ .env file loaded successfully");
    } else {
        log::warn!("⚠️  No .env file found, using system environment variables");
    }

    logger::log_startup_info("Stylus Generative Sketch Maker", env!("CARGO_PKG_VERSION"), &config);
    logger::log_config_info(&config);

    log::info!("🖼️  Available image generation models:");
    for model in ImageClient::supported_models() {
        log::info!("  {} - {} ({})", model.id, model.name, model.provider);
    }

    let openai_config = config.openai.clone().unwrap_or_default();
    let client = match OpenAiClient::new(openai_config) {
        Ok(client) => {
            log::info!("✅ OpenAI image client initialized");
            client
        }
        Err(e) => {
            log::error!("❌ Failed to initialize OpenAI client: {}", e);
            return Err(e.into());
        }
    };

    sketchmaker::server::run(&config, Arc::new(client.image().clone())).await?;

    log::info!("👋 Server stopped");
    Ok(())
}
