use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::{
    error::{Result, SketchError},
    models::ImageGenerationResponse,
    sketch::traits::ImageGenerator,
};

/// Replays canned replies in order and records every prompt it receives.
pub struct ScriptedGenerator {
    replies: Mutex<VecDeque<Result<ImageGenerationResponse>>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedGenerator {
    pub fn new() -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn succeed(self, reference: &str) -> Self {
        self.replies.lock().unwrap().push_back(Ok(ImageGenerationResponse {
            reference: reference.to_string(),
            revised_prompt: None,
            model: "dall-e-3".to_string(),
        }));
        self
    }

    pub fn fail(self, status: u16, message: &str) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(Err(SketchError::ServiceError {
                status,
                message: message.to_string(),
            }));
        self
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageGenerator for ScriptedGenerator {
    async fn generate_image(&self, prompt: &str) -> Result<ImageGenerationResponse> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(SketchError::RequestError("no scripted reply left".into())))
    }
}

/// Holds every request until the returned `Notify` is signalled.
pub struct GatedGenerator {
    reference: String,
    gate: Arc<Notify>,
}

impl GatedGenerator {
    pub fn new(reference: &str) -> (Self, Arc<Notify>) {
        let gate = Arc::new(Notify::new());
        let generator = Self {
            reference: reference.to_string(),
            gate: gate.clone(),
        };
        (generator, gate)
    }
}

#[async_trait]
impl ImageGenerator for GatedGenerator {
    async fn generate_image(&self, _prompt: &str) -> Result<ImageGenerationResponse> {
        self.gate.notified().await;
        Ok(ImageGenerationResponse {
            reference: self.reference.clone(),
            revised_prompt: None,
            model: "dall-e-3".to_string(),
        })
    }
}
