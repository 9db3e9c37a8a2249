use serde::{Deserialize, Serialize};

use crate::{models::Notice, sketch::invoker::GenerationOutcome};

/// Everything one session remembers between renders.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub prompt: String,
    pub generated_image_reference: Option<String>,
    pub in_flight: bool,
    pub notice: Option<Notice>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_image(&self) -> bool {
        self.generated_image_reference.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    PromptEdited(String),
    GenerateRequested,
    GenerationFinished(GenerationOutcome),
    /// The page carrying the current notice has been rendered.
    NoticeShown,
}

/// Work the host must perform after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    Generate { prompt: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub state: SessionState,
    pub effect: Effect,
}

impl Transition {
    fn settle(state: SessionState) -> Self {
        Self {
            state,
            effect: Effect::None,
        }
    }
}

/// Routes an event to its handler. Handlers are pure.
pub fn dispatch(state: SessionState, event: Event) -> Transition {
    match event {
        Event::PromptEdited(prompt) => on_prompt_edited(state, prompt),
        Event::GenerateRequested => on_generate_requested(state),
        Event::GenerationFinished(outcome) => on_generation_finished(state, outcome),
        Event::NoticeShown => on_notice_shown(state),
    }
}

fn on_prompt_edited(mut state: SessionState, prompt: String) -> Transition {
    state.prompt = prompt;
    Transition::settle(state)
}

fn on_generate_requested(mut state: SessionState) -> Transition {
    if state.in_flight {
        log::warn!("Generation already in progress; ignoring trigger");
        return Transition::settle(state);
    }

    state.in_flight = true;
    let prompt = state.prompt.clone();
    Transition {
        state,
        effect: Effect::Generate { prompt },
    }
}

fn on_generation_finished(mut state: SessionState, outcome: GenerationOutcome) -> Transition {
    state.in_flight = false;
    state.notice = Some(outcome.notice());
    if let GenerationOutcome::Generated { reference } = outcome {
        state.generated_image_reference = Some(reference);
    }
    Transition::settle(state)
}

fn on_notice_shown(mut state: SessionState) -> Transition {
    state.notice = None;
    Transition::settle(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generated(reference: &str) -> Event {
        Event::GenerationFinished(GenerationOutcome::Generated {
            reference: reference.to_string(),
        })
    }

    fn failed(message: &str) -> Event {
        Event::GenerationFinished(GenerationOutcome::Failed {
            message: message.to_string(),
        })
    }

    #[test]
    fn editing_updates_only_the_prompt() {
        let t = dispatch(SessionState::new(), Event::PromptEdited("a hat".into()));
        assert_eq!(t.state.prompt, "a hat");
        assert_eq!(t.state.generated_image_reference, None);
        assert_eq!(t.effect, Effect::None);
    }

    #[test]
    fn trigger_requests_generation_of_the_current_prompt() {
        let state = dispatch(SessionState::new(), Event::PromptEdited("a cat".into())).state;
        let t = dispatch(state, Event::GenerateRequested);
        assert!(t.state.in_flight);
        assert_eq!(
            t.effect,
            Effect::Generate {
                prompt: "a cat".to_string()
            }
        );
    }

    #[test]
    fn empty_prompt_is_not_validated() {
        let t = dispatch(SessionState::new(), Event::GenerateRequested);
        assert_eq!(
            t.effect,
            Effect::Generate {
                prompt: String::new()
            }
        );
    }

    #[test]
    fn trigger_while_in_flight_is_ignored() {
        let state = dispatch(SessionState::new(), Event::GenerateRequested).state;
        let t = dispatch(state.clone(), Event::GenerateRequested);
        assert_eq!(t.effect, Effect::None);
        assert_eq!(t.state, state);
    }

    #[test]
    fn success_overwrites_previous_reference() {
        let mut state = SessionState::new();
        for reference in ["https://example/img1.png", "https://example/img2.png"] {
            state = dispatch(state, Event::GenerateRequested).state;
            state = dispatch(state, generated(reference)).state;
        }
        assert_eq!(
            state.generated_image_reference.as_deref(),
            Some("https://example/img2.png")
        );
        assert!(!state.in_flight);
        assert_eq!(
            state.notice,
            Some(Notice::Success("Sketch generated successfully!".into()))
        );
    }

    #[test]
    fn failure_leaves_reference_untouched() {
        let state = dispatch(SessionState::new(), Event::GenerateRequested).state;
        let state = dispatch(state, failed("invalid prompt")).state;
        assert_eq!(state.generated_image_reference, None);
        assert!(!state.in_flight);

        let state = dispatch(state, Event::GenerateRequested).state;
        let state = dispatch(state, generated("https://example/img1.png")).state;
        let state = dispatch(state, Event::GenerateRequested).state;
        let state = dispatch(state, failed("rate limited")).state;
        assert_eq!(
            state.generated_image_reference.as_deref(),
            Some("https://example/img1.png")
        );
        assert_eq!(
            state.notice,
            Some(Notice::Error("An error occurred: rate limited".into()))
        );
    }

    #[test]
    fn notice_is_dropped_once_shown() {
        let state = dispatch(SessionState::new(), Event::GenerateRequested).state;
        let state = dispatch(state, generated("https://example/img1.png")).state;
        assert!(state.notice.is_some());

        let t = dispatch(state, Event::NoticeShown);
        assert_eq!(t.state.notice, None);
        assert_eq!(
            t.state.generated_image_reference.as_deref(),
            Some("https://example/img1.png")
        );
        assert_eq!(t.effect, Effect::None);
    }
}
