use async_trait::async_trait;

use crate::errors::ProviderError;
use crate::nlp::TranslationBackend;
use crate::providers::google::{GoogleTranslate, GoogleTranslateRequest};
use crate::providers::Provider;

#[async_trait]
impl TranslationBackend for GoogleTranslate {
    async fn translate(&self, text: &str, target_language: &str) -> Result<String, ProviderError> {
        let response = self
            .complete(GoogleTranslateRequest::auto(text, target_language))
            .await?;

        if let Some(detected) = &response.detected_source_language {
            log::debug!("Google Translate detected source language '{}'", detected);
        }

        let translated = Self::extract_text(&response);
        if translated.trim().is_empty() && !text.trim().is_empty() {
            return Err(ProviderError::ParseError("Google Translate returned no text".to_string()));
        }
        Ok(translated)
    }
}
