use crate::{
    config::TransportConfig,
    error::{ImageAiError, Result},
    transport::{Endpoint, MultipartPayload, Transport, UpstreamPayload, UpstreamReply},
};
use async_trait::async_trait;
use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE},
    multipart::{Form, Part},
    Client,
};
use std::time::{Duration, Instant};

/// reqwest-backed relay. The only holder of vendor credentials.
pub struct HttpTransport {
    client: Client,
    config: TransportConfig,
}

impl HttpTransport {
    pub fn new(config: TransportConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| ImageAiError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    fn url(&self, endpoint: Endpoint) -> &str {
        match endpoint {
            Endpoint::ImageGeneration => &self.config.generation_url,
            Endpoint::Recognition => &self.config.recognition_url,
            Endpoint::BackgroundRemoval => &self.config.remove_bg_url,
        }
    }

    fn build_headers(&self, endpoint: Endpoint) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();

        match endpoint {
            Endpoint::ImageGeneration | Endpoint::Recognition => {
                let key = self.config.ark_api_key.as_deref().ok_or_else(|| {
                    ImageAiError::Config("ARK_API_KEY is not configured".into())
                })?;
                headers.insert(AUTHORIZATION, header_value(&format!("Bearer {}", key))?);
            }
            Endpoint::BackgroundRemoval => {
                let key = self.config.remove_bg_api_key.as_deref().ok_or_else(|| {
                    ImageAiError::Config("REMOVE_BG_API_KEY is not configured".into())
                })?;
                headers.insert("x-api-key", header_value(key)?);
            }
        }

        Ok(headers)
    }
}

fn header_value(value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|_| ImageAiError::Config("API key contains invalid header characters".into()))
}

fn multipart_form(payload: MultipartPayload) -> Result<Form> {
    let part = Part::bytes(payload.bytes)
        .file_name(payload.file_name)
        .mime_str(&payload.mime_type)?;

    let mut form = Form::new().part(payload.file_field, part);
    for (name, value) in payload.fields {
        form = form.text(name, value);
    }
    Ok(form)
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, endpoint: Endpoint, payload: UpstreamPayload) -> Result<UpstreamReply> {
        let url = self.url(endpoint);
        let headers = self.build_headers(endpoint)?;
        let started = Instant::now();

        log::debug!("📡 Relaying {} request to {}", endpoint.as_str(), url);

        let request = self.client.post(url).headers(headers);
        let request = match payload {
            UpstreamPayload::Json(body) => request.json(&body),
            UpstreamPayload::Multipart(multipart) => request.multipart(multipart_form(multipart)?),
        };

        let response = request.send().await.map_err(|e| {
            log::error!("❌ {} request failed: {}", endpoint.as_str(), e);
            ImageAiError::Request(format!("{} request failed: {}", endpoint.as_str(), e))
        })?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(String::from);
        let body = response.bytes().await?.to_vec();

        if (200..300).contains(&status) {
            log::info!(
                "✅ {} answered {} ({} bytes) in {}ms",
                endpoint.as_str(),
                status,
                body.len(),
                started.elapsed().as_millis()
            );
        } else {
            log::warn!(
                "⚠️  {} answered {}: {}",
                endpoint.as_str(),
                status,
                String::from_utf8_lossy(&body)
            );
        }

        Ok(UpstreamReply {
            status,
            content_type,
            body,
        })
    }
}
