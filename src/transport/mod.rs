pub mod http;

use crate::error::Result;
use async_trait::async_trait;
use serde_json::Value;

pub use http::HttpTransport;

/// The upstream services we relay to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    ImageGeneration,
    Recognition,
    BackgroundRemoval,
}

impl Endpoint {
    pub fn as_str(&self) -> &'static str {
        match self {
            Endpoint::ImageGeneration => "image_generation",
            Endpoint::Recognition => "recognition",
            Endpoint::BackgroundRemoval => "background_removal",
        }
    }
}

/// A file part plus plain text fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultipartPayload {
    pub file_field: String,
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
    pub fields: Vec<(String, String)>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum UpstreamPayload {
    Json(Value),
    Multipart(MultipartPayload),
}

/// Whatever the vendor answered, success or not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamReply {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl UpstreamReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn text_lossy(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Sends a shaped payload to an upstream endpoint, attaching credentials.
///
/// Implementations return `Ok` for every HTTP response, including error
/// statuses, and `Err` only when no response was received.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, endpoint: Endpoint, payload: UpstreamPayload) -> Result<UpstreamReply>;
}

#[cfg(test)]
pub(crate) mod fake {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Records every call and answers with canned replies per endpoint.
    #[derive(Default)]
    pub struct FakeTransport {
        replies: Mutex<HashMap<Endpoint, UpstreamReply>>,
        pub calls: Mutex<Vec<(Endpoint, UpstreamPayload)>>,
    }

    impl FakeTransport {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn reply(self, endpoint: Endpoint, status: u16, body: impl Into<Vec<u8>>) -> Self {
            self.replies.lock().unwrap().insert(
                endpoint,
                UpstreamReply {
                    status,
                    content_type: None,
                    body: body.into(),
                },
            );
            self
        }

        pub fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }

        pub fn last_payload(&self) -> Option<UpstreamPayload> {
            self.calls.lock().unwrap().last().map(|(_, p)| p.clone())
        }
    }

    #[async_trait]
    impl Transport for FakeTransport {
        async fn send(&self, endpoint: Endpoint, payload: UpstreamPayload) -> Result<UpstreamReply> {
            self.calls.lock().unwrap().push((endpoint, payload));
            self.replies
                .lock()
                .unwrap()
                .get(&endpoint)
                .cloned()
                .ok_or_else(|| {
                    crate::error::ImageAiError::Request(format!(
                        "no canned reply for {}",
                        endpoint.as_str()
                    ))
                })
        }
    }
}
