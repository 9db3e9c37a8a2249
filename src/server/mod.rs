pub mod page;
pub mod routes;

use std::sync::Arc;

use actix_web::{web, App, HttpServer};

use crate::{
    config::Config,
    sketch::{ImageGenerator, SessionStore},
};

pub use routes::SESSION_COOKIE;

/// Shared by every worker: the session registry and the image backend.
pub struct AppState {
    pub sessions: Arc<SessionStore>,
    pub generator: Arc<dyn ImageGenerator>,
}

impl AppState {
    pub fn new(generator: Arc<dyn ImageGenerator>) -> Self {
        Self::with_store(SessionStore::new(), generator)
    }

    pub fn with_store(sessions: SessionStore, generator: Arc<dyn ImageGenerator>) -> Self {
        Self {
            sessions: Arc::new(sessions),
            generator,
        }
    }
}

pub async fn run(config: &Config, generator: Arc<dyn ImageGenerator>) -> std::io::Result<()> {
    let sessions = SessionStore::with_idle_timeout(config.session_idle_timeout());
    let data = web::Data::new(AppState::with_store(sessions, generator));

    HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((config.host().to_string(), config.port()))?
    .run()
    .await
}
