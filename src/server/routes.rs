use actix_web::{
    cookie::{Cookie, SameSite},
    get,
    http::header,
    post, web, HttpRequest, HttpResponse, HttpResponseBuilder, Responder,
};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::{
    server::{page, AppState},
    sketch::{render, Event},
};

pub const SESSION_COOKIE: &str = "sketch_session";

#[derive(Debug, Deserialize)]
pub struct PromptForm {
    #[serde(default)]
    pub prompt: String,
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(index)
        .service(view_state)
        .service(edit_prompt)
        .service(generate)
        .service(reset)
        .service(health);
}

/// Resolves the caller's session, starting a new one if the cookie is
/// missing or stale. The flag is true when a cookie must be issued.
fn resolve_session(req: &HttpRequest, state: &AppState) -> (Uuid, bool) {
    let known = req
        .cookie(SESSION_COOKIE)
        .and_then(|cookie| Uuid::parse_str(cookie.value()).ok())
        .filter(|id| state.sessions.touch(id));

    match known {
        Some(id) => (id, false),
        None => (state.sessions.create(), true),
    }
}

fn session_cookie(id: Uuid) -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, id.to_string())
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .finish()
}

fn with_session(mut builder: HttpResponseBuilder, id: Uuid, fresh: bool) -> HttpResponseBuilder {
    if fresh {
        builder.cookie(session_cookie(id));
    }
    builder
}

fn back_to_page(id: Uuid, fresh: bool) -> HttpResponse {
    let mut builder = with_session(HttpResponse::SeeOther(), id, fresh);
    builder.insert_header((header::LOCATION, "/")).finish()
}

#[get("/")]
async fn index(req: HttpRequest, data: web::Data<AppState>) -> impl Responder {
    let (id, fresh) = resolve_session(&req, &data);
    let state = data.sessions.snapshot(&id).unwrap_or_default();
    let html = page::render_page(&render(&state));
    if state.notice.is_some() {
        data.sessions.apply(&id, Event::NoticeShown);
    }

    let mut builder = with_session(HttpResponse::Ok(), id, fresh);
    builder
        .content_type("text/html; charset=utf-8")
        .body(html)
}

#[get("/state")]
async fn view_state(req: HttpRequest, data: web::Data<AppState>) -> impl Responder {
    let (id, fresh) = resolve_session(&req, &data);
    let state = data.sessions.snapshot(&id).unwrap_or_default();

    let mut builder = with_session(HttpResponse::Ok(), id, fresh);
    builder.json(render(&state))
}

#[post("/prompt")]
async fn edit_prompt(
    req: HttpRequest,
    data: web::Data<AppState>,
    form: web::Form<PromptForm>,
) -> impl Responder {
    let (id, fresh) = resolve_session(&req, &data);
    data.sessions
        .apply(&id, Event::PromptEdited(form.into_inner().prompt));
    back_to_page(id, fresh)
}

#[post("/generate")]
async fn generate(
    req: HttpRequest,
    data: web::Data<AppState>,
    form: web::Form<PromptForm>,
) -> impl Responder {
    let (id, fresh) = resolve_session(&req, &data);

    data.sessions
        .apply(&id, Event::PromptEdited(form.into_inner().prompt));
    data.sessions
        .handle(&id, Event::GenerateRequested, data.generator.clone())
        .await;

    back_to_page(id, fresh)
}

#[post("/reset")]
async fn reset(req: HttpRequest, data: web::Data<AppState>) -> impl Responder {
    if let Some(id) = req
        .cookie(SESSION_COOKIE)
        .and_then(|cookie| Uuid::parse_str(cookie.value()).ok())
    {
        data.sessions.end(&id);
    }

    let mut removal = Cookie::build(SESSION_COOKIE, "").path("/").finish();
    removal.make_removal();

    HttpResponse::SeeOther()
        .cookie(removal)
        .insert_header((header::LOCATION, "/"))
        .finish()
}

#[get("/health")]
async fn health() -> impl Responder {
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}
