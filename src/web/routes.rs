use axum::{routing::{get, post, put}, Router};

use super::handler::{
    ask_for_help, chat, create_session, get_progress, hint, list_languages, list_levels,
    new_riddle, reset_progress, set_language, stump, submit_answer,
};
use super::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/levels",                    get(list_levels))
        .route("/api/languages",                 get(list_languages))
        .route("/api/session",                   post(create_session))
        .route("/api/session/{id}/progress",     get(get_progress))
        .route("/api/session/{id}/reset",        post(reset_progress))
        .route("/api/session/{id}/language",     put(set_language))
        .route("/api/session/{id}/riddle",       post(new_riddle))
        .route("/api/session/{id}/answer",       post(submit_answer))
        .route("/api/session/{id}/hint",         get(hint))
        .route("/api/session/{id}/help",         post(ask_for_help))
        .route("/api/session/{id}/stump",        post(stump))
        .route("/api/session/{id}/chat",         post(chat))
        .with_state(state)
}
