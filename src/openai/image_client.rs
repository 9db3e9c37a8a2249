use crate::{
    config::OpenAiConfig,
    error::{Result, SketchError},
    models::{
        ImageGenerationRequest, ImageGenerationResponse, ModelInfo, OpenAiErrorResponse,
        OpenAiImageDatum, OpenAiImageResponse, ResponseFormat,
    },
    sketch::traits::ImageGenerator,
};
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::Client;

#[derive(Clone)]
pub struct ImageClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    response_format: Option<ResponseFormat>,
}

impl ImageClient {
    pub fn new(client: Client, config: &OpenAiConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| SketchError::ConfigError("OpenAI API key is required".into()))?;

        Ok(Self {
            client,
            api_key,
            base_url: config.base_url().to_string(),
            model: config.model().to_string(),
            response_format: config.response_format,
        })
    }

    pub fn supported_models() -> Vec<ModelInfo> {
        vec![
            ModelInfo {
                id: "dall-e-3".to_string(),
                name: "DALL·E 3".to_string(),
                provider: "OpenAI".to_string(),
            },
            ModelInfo {
                id: "dall-e-2".to_string(),
                name: "DALL·E 2".to_string(),
                provider: "OpenAI".to_string(),
            },
        ]
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn endpoint(&self) -> String {
        format!("{}/images/generations", self.base_url)
    }

    pub async fn generate(
        &self,
        request: ImageGenerationRequest,
    ) -> Result<ImageGenerationResponse> {
        log::info!("Generating image with model: {}", request.model);
        log::debug!(
            "Image generation request payload: {}",
            serde_json::to_string(&request)
                .map_err(|e| SketchError::SerializationError(e.to_string()))?
        );

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                log::error!("Image generation transport error details: {:?}", e);
                SketchError::RequestError(format!("Image service request failed: {}", e))
            })?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| SketchError::ResponseError(e.to_string()))?;

        parse_response(status, &body, &request.model)
    }
}

#[async_trait]
impl ImageGenerator for ImageClient {
    async fn generate_image(&self, prompt: &str) -> Result<ImageGenerationResponse> {
        let request = ImageGenerationRequest::single(self.model.as_str(), prompt)
            .with_response_format(self.response_format);
        self.generate(request).await
    }
}

/// Turns a raw Images API reply into a single image reference.
pub fn parse_response(status: u16, body: &str, model: &str) -> Result<ImageGenerationResponse> {
    if !(200..300).contains(&status) {
        let message = match serde_json::from_str::<OpenAiErrorResponse>(body) {
            Ok(error) => error.error.message,
            Err(_) if body.trim().is_empty() => {
                format!("Image service returned HTTP {}", status)
            }
            Err(_) => format!("Image service returned HTTP {}: {}", status, body.trim()),
        };
        log::error!("Image service error status: {}", status);
        log::error!("Image service error message: {}", message);
        return Err(SketchError::ServiceError { status, message });
    }

    let parsed: OpenAiImageResponse =
        serde_json::from_str(body).map_err(|e| SketchError::ResponseError(e.to_string()))?;

    let datum = parsed
        .data
        .into_iter()
        .next()
        .ok_or_else(|| SketchError::ResponseError("No images generated".into()))?;

    let revised_prompt = datum.revised_prompt.clone();
    Ok(ImageGenerationResponse {
        reference: datum_to_reference(datum)?,
        revised_prompt,
        model: model.to_string(),
    })
}

fn datum_to_reference(datum: OpenAiImageDatum) -> Result<String> {
    if let Some(url) = datum.url.filter(|url| !url.trim().is_empty()) {
        return Ok(url);
    }

    if let Some(b64) = datum.b64_json.filter(|b64| !b64.is_empty()) {
        STANDARD
            .decode(b64.as_bytes())
            .map_err(|e| SketchError::ResponseError(format!("Invalid base64 image: {}", e)))?;
        return Ok(format!("data:image/png;base64,{}", b64));
    }

    Err(SketchError::ResponseError(
        "Image entry has neither url nor b64_json".into(),
    ))
}
