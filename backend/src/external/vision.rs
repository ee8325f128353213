//! Vision model client
//!
//! Client for an OpenAI-compatible chat-completions API with image input.
//! The model is asked for a free-text pathology description; all diagnosis
//! logic stays in this codebase.

use base64::Engine;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use shared::types::EnvironmentalReadings;
use shared::CropType;

use crate::config::VisionConfig;
use crate::error::{AppError, AppResult};

/// Client for the crop image description API
#[derive(Clone)]
pub struct VisionClient {
    api_endpoint: String,
    api_key: String,
    model: String,
    max_tokens: u32,
    http_client: Client,
}

/// Chat completion request body
#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: Vec<ContentPart>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Serialize)]
struct ImageUrl {
    url: String,
}

/// Chat completion response body
#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

impl VisionClient {
    /// Create a new vision client from configuration
    pub fn new(config: &VisionConfig) -> Self {
        let http_client = Client::builder()
            .timeout(std::time::Duration::from_secs(60))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            api_endpoint: config.api_endpoint.clone(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            http_client,
        }
    }

    /// Describe a crop photo, returning the model's free-text analysis.
    ///
    /// No retries here: failures surface immediately and retry policy, if
    /// any, belongs to the caller's caller.
    pub async fn describe_crop_image(
        &self,
        crop: CropType,
        image_data_url: &str,
        readings: &EnvironmentalReadings,
    ) -> AppResult<String> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user",
                content: vec![
                    ContentPart::Text {
                        text: build_prompt(crop, readings),
                    },
                    ContentPart::ImageUrl {
                        image_url: ImageUrl {
                            url: image_data_url.to_string(),
                        },
                    },
                ],
            }],
            max_tokens: self.max_tokens,
        };

        let url = format!("{}/chat/completions", self.api_endpoint);
        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::VisionApi(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::VisionApi(format!(
                "API returned {}: {}",
                status, body
            )));
        }

        let result: ChatResponse = response
            .json()
            .await
            .map_err(|e| AppError::VisionApi(format!("Failed to parse response: {}", e)))?;

        let description = result
            .choices
            .first()
            .and_then(|c| c.message.content.clone())
            .unwrap_or_else(|| "Unable to analyze image".to_string());

        Ok(description)
    }
}

/// Build a data URL for an uploaded image
pub fn encode_image_data_url(mime_type: &str, bytes: &[u8]) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
    format!("data:{};base64,{}", mime_type, encoded)
}

/// Build the pathologist prompt with optional environmental context
fn build_prompt(crop: CropType, readings: &EnvironmentalReadings) -> String {
    let context = readings.format_parts();
    let context_string = if context.is_empty() {
        String::new()
    } else {
        format!("\n\nEnvironmental conditions: {}", context.join(", "))
    };

    format!(
        "You are an expert agricultural pathologist. Analyze this {} crop image \
         for diseases. Describe any visible symptoms, disease indicators, or \
         abnormalities you observe. Be specific about colors, patterns, locations, \
         and severity of any issues. If the plant appears healthy, state that \
         clearly.{}",
        crop, context_string
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use shared::types::SoilType;
    use std::str::FromStr;

    #[test]
    fn test_encode_image_data_url() {
        let url = encode_image_data_url("image/png", b"abc");
        assert_eq!(url, "data:image/png;base64,YWJj");
    }

    #[test]
    fn test_prompt_without_readings() {
        let prompt = build_prompt(CropType::Rice, &EnvironmentalReadings::default());
        assert!(prompt.contains("this rice crop image"));
        assert!(!prompt.contains("Environmental conditions:"));
    }

    #[test]
    fn test_prompt_includes_context() {
        let readings = EnvironmentalReadings {
            temperature: Some(Decimal::from_str("28").unwrap()),
            soil_type: Some(SoilType::Loam),
            ..Default::default()
        };
        let prompt = build_prompt(CropType::Potato, &readings);
        assert!(prompt.contains("Environmental conditions: Temperature: 28°C, Soil Type: loam"));
    }

    #[test]
    fn test_content_part_serialization() {
        let part = ContentPart::ImageUrl {
            image_url: ImageUrl {
                url: "data:image/jpeg;base64,Zm9v".to_string(),
            },
        };
        let json = serde_json::to_value(&part).unwrap();
        assert_eq!(json["type"], "image_url");
        assert_eq!(json["image_url"]["url"], "data:image/jpeg;base64,Zm9v");
    }
}
