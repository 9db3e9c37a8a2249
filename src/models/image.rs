use serde::{Deserialize, Serialize};

/// Square resolution requested for every sketch.
pub const IMAGE_SIZE: &str = "1024x1024";
pub const NUM_IMAGES: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseFormat {
    Url,
    B64Json,
}

impl ResponseFormat {
    pub fn from_str(s: &str) -> Option<ResponseFormat> {
        match s.trim().to_lowercase().as_str() {
            "url" => Some(ResponseFormat::Url),
            "b64_json" | "b64" | "base64" => Some(ResponseFormat::B64Json),
            _ => None,
        }
    }
}

/// Body of `POST /images/generations`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageGenerationRequest {
    pub model: String,
    pub prompt: String,
    pub n: u32,
    pub size: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<ResponseFormat>,
}

impl ImageGenerationRequest {
    /// One square image for `prompt`.
    pub fn single(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            n: NUM_IMAGES,
            size: IMAGE_SIZE.to_string(),
            response_format: None,
        }
    }

    pub fn with_response_format(mut self, format: Option<ResponseFormat>) -> Self {
        self.response_format = format;
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageGenerationResponse {
    /// Resolvable locator for the image: an https URL or a `data:` URL.
    pub reference: String,
    pub revised_prompt: Option<String>,
    pub model: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct OpenAiImageResponse {
    #[serde(default)]
    pub created: Option<i64>,
    #[serde(default)]
    pub data: Vec<OpenAiImageDatum>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiImageDatum {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub b64_json: Option<String>,
    #[serde(default)]
    pub revised_prompt: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct OpenAiErrorResponse {
    pub error: OpenAiErrorDetail,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct OpenAiErrorDetail {
    pub message: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub code: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_serializes_without_absent_response_format() {
        let request = ImageGenerationRequest::single("dall-e-3", "a hat");
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({"model": "dall-e-3", "prompt": "a hat", "n": 1, "size": "1024x1024"})
        );

        let request = request.with_response_format(Some(ResponseFormat::B64Json));
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["response_format"], "b64_json");
    }

    #[test]
    fn response_format_parsing() {
        assert_eq!(ResponseFormat::from_str("URL"), Some(ResponseFormat::Url));
        assert_eq!(ResponseFormat::from_str("b64_json"), Some(ResponseFormat::B64Json));
        assert_eq!(ResponseFormat::from_str("png"), None);
    }

    #[test]
    fn error_body_accepts_numeric_or_missing_code() {
        let body: OpenAiErrorResponse = serde_json::from_value(json!({
            "error": {"message": "invalid prompt", "type": "invalid_request_error", "code": null}
        }))
        .unwrap();
        assert_eq!(body.error.message, "invalid prompt");
        assert_eq!(body.error.kind.as_deref(), Some("invalid_request_error"));

        let body: OpenAiErrorResponse =
            serde_json::from_value(json!({"error": {"message": "boom"}})).unwrap();
        assert!(body.error.code.is_none());
    }
}
