//! Google Translate client (public `translate_a/single` endpoint)

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use super::{TranslationError, TranslationResult, Translator};
use crate::config::TranslationConfig;
use crate::util::split_by_chars;

/// Translator backed by Google Translate with source auto-detection.
///
/// Text longer than the per-request limit is cut into consecutive pieces,
/// each translated separately, and the results concatenated in order.
#[derive(Debug)]
pub struct GoogleTranslator {
    client: Client,
    endpoint: String,
    max_chunk_chars: usize,
}

impl GoogleTranslator {
    pub fn new(config: &TranslationConfig) -> TranslationResult<Self> {
        if config.endpoint.is_empty() {
            return Err(TranslationError::Config(
                "translation endpoint not set".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| TranslationError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            max_chunk_chars: config.max_chunk_chars.max(1),
        })
    }

    async fn translate_piece(&self, text: &str, target: &str) -> TranslationResult<String> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("client", "gtx"),
                ("sl", "auto"),
                ("tl", target),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TranslationError::Failed(format!(
                "service returned {}: {}",
                status,
                body.trim()
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| TranslationError::InvalidResponse(e.to_string()))?;
        parse_response(&body)
    }
}

/// Concatenate the translated segments of a `translate_a/single` response.
///
/// The body is a nested array whose first element lists
/// `[translated, original, ...]` segments.
fn parse_response(body: &Value) -> TranslationResult<String> {
    let segments = body
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| TranslationError::InvalidResponse("missing segment list".to_string()))?;

    Ok(segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(Value::as_str))
        .collect())
}

#[async_trait]
impl Translator for GoogleTranslator {
    async fn translate(&self, text: &str, target: &str) -> TranslationResult<String> {
        if text.trim().is_empty() {
            return Ok(text.to_string());
        }

        let pieces = split_by_chars(text, self.max_chunk_chars);
        debug!(
            "Translating {} chars to {} in {} request(s)",
            text.chars().count(),
            target,
            pieces.len()
        );

        let mut translated = String::with_capacity(text.len());
        for piece in pieces {
            translated.push_str(&self.translate_piece(piece, target).await?);
        }
        Ok(translated)
    }

    fn name(&self) -> &str {
        "google"
    }
}
