//! HTTP relay exposing the toolbox to a browser front end.

pub mod handlers;
pub mod upload;

use crate::{
    clients::ImageAiClient,
    config::{Config, DEFAULT_PORT},
    error::{ImageAiError, ValidationError},
};
use actix_web::{
    error::InternalError, http::StatusCode, middleware, web, App, HttpResponse, HttpServer,
    ResponseError,
};
use serde_json::json;

impl ResponseError for ImageAiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ImageAiError::Validation(_) | ImageAiError::Image(_) => StatusCode::BAD_REQUEST,
            ImageAiError::Upstream(e) => match e.status {
                400 | 402 | 403 => {
                    StatusCode::from_u16(e.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
                }
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ImageAiError::Request(_) => StatusCode::BAD_GATEWAY,
            ImageAiError::Decode(_) | ImageAiError::Config(_) | ImageAiError::Serialization(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            log::error!("❌ {}", self);
        } else {
            log::warn!("⚠️  {}", self);
        }
        HttpResponse::build(status).json(json!({ "error": self.user_message() }))
    }
}

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let body = ImageAiError::from(ValidationError::InvalidField {
            field: "body".to_string(),
            reason: err.to_string(),
        })
        .error_response();
        InternalError::from_response(err, body).into()
    })
}

fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        let body = ImageAiError::from(ValidationError::InvalidField {
            field: "query".to_string(),
            reason: err.to_string(),
        })
        .error_response();
        InternalError::from_response(err, body).into()
    })
}

/// Registers every route. Expects `web::Data<ImageAiClient>` on the app.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(query_config())
        .route("/health", web::get().to(handlers::health))
        .service(
            web::scope("/api")
                .route("/generate-image", web::post().to(handlers::generate_image))
                .route("/generate-image/size", web::get().to(handlers::preview_size))
                .route(
                    "/generate-image/options",
                    web::get().to(handlers::generation_options),
                )
                .route("/recognize-image", web::post().to(handlers::recognize_image))
                .route("/remove-bg", web::post().to(handlers::remove_background))
                .route("/compress", web::post().to(handlers::compress_image)),
        );
}

pub async fn run(config: Config) -> std::io::Result<()> {
    let port = config.port.unwrap_or(DEFAULT_PORT);
    let client = ImageAiClient::new(config)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;
    let client = web::Data::new(client);

    log::info!("🌐 Listening on 0.0.0.0:{}", port);

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(client.clone())
            .configure(configure)
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}
