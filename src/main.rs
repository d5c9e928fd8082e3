use imgai::logger::{self, LoggerConfig};
use imgai::config::{Config, DEFAULT_PORT};

#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let dotenv_loaded = dotenv::dotenv().is_ok();

    logger::init_with_config(LoggerConfig::from_env())?;

    if dotenv_loaded {
        log::info!("✅ .env file loaded successfully");
    } else {
        log::warn!("⚠️  No .env file found, using system environment variables");
    }

    let config = Config::from_env();
    logger::log_startup_info(
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        config.port.unwrap_or(DEFAULT_PORT),
    );
    logger::log_config_info(&config);

    if config.transport.ark_api_key.is_none() {
        log::warn!("⚠️  ARK_API_KEY is not set; generation and recognition will fail");
    }
    if config.transport.remove_bg_api_key.is_none() {
        log::warn!("⚠️  REMOVE_BG_API_KEY is not set; background removal will fail");
    }

    imgai::server::run(config).await?;
    Ok(())
}
