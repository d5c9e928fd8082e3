use crate::{
    clients::ImageAiClient,
    compress::DEFAULT_QUALITY,
    error::{ImageAiError, ValidationError},
    logger,
    models::{
        AspectRatio, GenerationRequest, OptionInfo, RecognitionMode, Resolution, StyleTemplate,
    },
    normalizer::{calculate_size, STYLE_TEMPLATES},
    server::upload::read_upload,
};
use actix_multipart::Multipart;
use actix_web::{http::header, web, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::json;

pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}

pub async fn generate_image(
    client: web::Data<ImageAiClient>,
    request: web::Json<GenerationRequest>,
) -> Result<HttpResponse, ImageAiError> {
    let _timer = logger::timer("generate-image");

    let image = client.generation().generate(request.into_inner()).await?;
    log::debug!("💾 Suggested download name: {}", image.download_name());
    Ok(HttpResponse::Ok().json(image))
}

#[derive(Debug, Deserialize)]
pub struct SizeQuery {
    pub resolution: Option<String>,
    pub ratio: Option<String>,
}

/// Same calculation the generation request uses, so previews match.
pub async fn preview_size(query: web::Query<SizeQuery>) -> Result<HttpResponse, ImageAiError> {
    let resolution: Resolution = match query.resolution.as_deref() {
        Some(value) => value.parse()?,
        None => Resolution::default(),
    };
    let ratio: AspectRatio = match query.ratio.as_deref() {
        Some(value) => value.parse()?,
        None => AspectRatio::default(),
    };

    let size = calculate_size(resolution, ratio);
    Ok(HttpResponse::Ok().json(json!({
        "resolution": resolution,
        "ratio": ratio,
        "size": size,
    })))
}

#[derive(Debug, Serialize)]
pub struct GenerationCatalog {
    pub styles: Vec<StyleTemplate>,
    pub resolutions: Vec<OptionInfo>,
    pub ratios: Vec<OptionInfo>,
}

pub async fn generation_options() -> HttpResponse {
    let catalog = GenerationCatalog {
        styles: STYLE_TEMPLATES.to_vec(),
        resolutions: Resolution::ALL
            .iter()
            .map(|r| OptionInfo {
                id: r.as_str().to_string(),
                description: format!("{} pixels, {}", r.base_edge(), r.detail()),
            })
            .collect(),
        ratios: AspectRatio::ALL
            .iter()
            .map(|r| OptionInfo {
                id: r.as_str().to_string(),
                description: r.description().to_string(),
            })
            .collect(),
    };
    HttpResponse::Ok().json(catalog)
}

pub async fn recognize_image(
    client: web::Data<ImageAiClient>,
    payload: Multipart,
) -> Result<HttpResponse, ImageAiError> {
    let _timer = logger::timer("recognize-image");

    let mut form = read_upload(payload, client.max_upload_bytes()).await?;
    let image = form.require_image()?;
    let mode: RecognitionMode = form.field("mode").unwrap_or_default().parse()?;

    let result = client.recognition().recognize(image, mode).await?;
    Ok(HttpResponse::Ok().json(json!({
        "content": result.text,
        "mode": result.mode,
        "category": result.category.label(),
        "tags": result.tags(),
    })))
}

pub async fn remove_background(
    client: web::Data<ImageAiClient>,
    payload: Multipart,
) -> Result<HttpResponse, ImageAiError> {
    let _timer = logger::timer("remove-bg");

    let mut form = read_upload(payload, client.max_upload_bytes()).await?;
    let image = form.require_image()?;

    let result = client.background().remove_background(image).await?;
    Ok(HttpResponse::Ok()
        .content_type(result.content_type.as_str())
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", result.file_name),
        ))
        .insert_header((header::CACHE_CONTROL, "no-cache"))
        .body(result.bytes))
}

pub async fn compress_image(
    client: web::Data<ImageAiClient>,
    payload: Multipart,
) -> Result<HttpResponse, ImageAiError> {
    let mut form = read_upload(payload, client.max_upload_bytes()).await?;
    let image = form.require_image()?;
    let quality = match form.field("quality") {
        Some(raw) => raw
            .trim()
            .parse::<u8>()
            .map_err(|_| ValidationError::InvalidField {
                field: "quality".to_string(),
                reason: format!("'{}' is not a number between 10 and 100", raw),
            })?,
        None => DEFAULT_QUALITY,
    };

    let result = client.compress(image, quality).await?;
    log::info!(
        "🗜️  Compressed {} -> {} ({}% saved)",
        crate::compress::format_file_size(result.original_size),
        crate::compress::format_file_size(result.compressed_size),
        result.savings_percent()
    );

    Ok(HttpResponse::Ok()
        .content_type(result.content_type.as_str())
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", result.file_name),
        ))
        .insert_header(("X-Original-Size", result.original_size.to_string()))
        .insert_header(("X-Compressed-Size", result.compressed_size.to_string()))
        .body(result.bytes))
}
