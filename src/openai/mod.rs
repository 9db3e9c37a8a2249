pub mod image_client;

use crate::{config::OpenAiConfig, error::Result};
use reqwest::Client;

pub use image_client::ImageClient;

#[derive(Clone)]
pub struct OpenAiClient {
    image_client: ImageClient,
}

impl OpenAiClient {
    pub fn new(config: OpenAiConfig) -> Result<Self> {
        let client = Client::new();

        Ok(Self {
            image_client: ImageClient::new(client, &config)?,
        })
    }

    pub fn image(&self) -> &ImageClient {
        &self.image_client
    }
}
