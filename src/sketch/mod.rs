pub mod invoker;
pub mod session;
pub mod state;
pub mod traits;
pub mod view;

#[cfg(test)]
pub(crate) mod testing;

pub use invoker::{build_full_prompt, generate_sketch, GenerationOutcome, SAFETY_PREAMBLE};
pub use session::SessionStore;
pub use state::{dispatch, Effect, Event, SessionState, Transition};
pub use traits::ImageGenerator;
pub use view::{render, View};
