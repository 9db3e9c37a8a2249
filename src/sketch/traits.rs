use crate::{error::Result, models::ImageGenerationResponse};
use async_trait::async_trait;

/// Anything that can turn a fully assembled prompt into one image.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    async fn generate_image(&self, prompt: &str) -> Result<ImageGenerationResponse>;
}
