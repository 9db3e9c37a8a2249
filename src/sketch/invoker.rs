use crate::{logger, models::Notice, sketch::traits::ImageGenerator};
use serde::{Deserialize, Serialize};

/// Prepended to every prompt to steer the service towards simple line art.
pub const SAFETY_PREAMBLE: &str = "Generate a sketch that's easy to doodle using a stylus. Please ensure the sketch is in black and white, clear, and simple.";

pub const SUCCESS_MESSAGE: &str = "Sketch generated successfully!";

pub fn build_full_prompt(prompt: &str) -> String {
    format!("{} {}", SAFETY_PREAMBLE, prompt)
}

/// Result of one generation attempt. Failures are already user-facing text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GenerationOutcome {
    Generated { reference: String },
    Failed { message: String },
}

impl GenerationOutcome {
    pub fn reference(&self) -> Option<&str> {
        match self {
            GenerationOutcome::Generated { reference } => Some(reference),
            GenerationOutcome::Failed { .. } => None,
        }
    }

    pub fn notice(&self) -> Notice {
        match self {
            GenerationOutcome::Generated { .. } => Notice::Success(SUCCESS_MESSAGE.to_string()),
            GenerationOutcome::Failed { message } => {
                Notice::Error(format!("An error occurred: {}", message))
            }
        }
    }
}

/// Sends `prompt` (behind the safety preamble) to the generator exactly once.
///
/// Never fails: every error is logged and folded into
/// [`GenerationOutcome::Failed`].
pub async fn generate_sketch(generator: &dyn ImageGenerator, prompt: &str) -> GenerationOutcome {
    let full_prompt = build_full_prompt(prompt);
    let _timer = logger::timer("sketch generation");

    log::info!("Starting sketch generation process...");
    log::info!("Sending prompt to image service: {}", full_prompt);

    match generator.generate_image(&full_prompt).await {
        Ok(response) => {
            log::info!("Received response from image service");
            if let Some(revised) = &response.revised_prompt {
                log::debug!("Service revised prompt to: {}", revised);
            }
            log::info!("Sketch generated successfully: {}", response.reference);
            GenerationOutcome::Generated {
                reference: response.reference,
            }
        }
        Err(e) => {
            log::error!("An error occurred during sketch generation: {:?}", e);
            GenerationOutcome::Failed {
                message: e.to_string(),
            }
        }
    }
}
