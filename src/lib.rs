//! Stylus Generative Sketch Maker.
//!
//! Type an idea, get a black-and-white sketch back from the OpenAI Images API,
//! and doodle over it next to the original.

pub mod config;
pub mod error;
pub mod logger;
pub mod models;
pub mod openai;
#[cfg(feature = "server")]
pub mod server;
pub mod sketch;

pub use config::{Config, OpenAiConfig};
pub use error::{Result, SketchError};
pub use models::*;
pub use openai::{ImageClient, OpenAiClient};
pub use sketch::{
    build_full_prompt, dispatch, generate_sketch, render, Effect, Event, GenerationOutcome,
    ImageGenerator, SessionState, SessionStore, Transition, View, SAFETY_PREAMBLE,
};
