use imgai::{AspectRatio, Config, GenerationRequest, ImageAiClient, Resolution};
use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    match dotenv::dotenv() {
        Ok(_) => log::info!("✅ .env file loaded"),
        Err(_) => log::warn!("⚠️  No .env file found"),
    }
    imgai::logger::init()?;

    let prompt = env::args()
        .nth(1)
        .unwrap_or_else(|| "A lighthouse on a cliff at dusk, waves crashing below".to_string());

    let client = ImageAiClient::new(Config::from_env())?;
    let request = GenerationRequest::new(prompt)
        .with_style("oil")
        .with_dimensions(Resolution::TwoK, AspectRatio::Widescreen);

    log::info!("📐 Target size: {:?}", request.target_size());

    let image = client.generation().generate(request).await?;
    match image.url() {
        Some(url) => log::info!("🖼️  {}", url),
        None => log::info!("🖼️  Received inline image data"),
    }
    log::info!("💾 Suggested file name: {}", image.download_name());

    Ok(())
}
