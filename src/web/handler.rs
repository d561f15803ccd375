use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::error::RiddleError;
use crate::riddle_engine::{GameSession, Language, Level, RiddleCard};
use super::state::AppState;

pub type ApiResult = Result<Json<Value>, (StatusCode, Json<Value>)>;

// ---------------------------------------------------------------------------
// Body types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct NewRiddleBody {
    pub level: String,
}

#[derive(Debug, Deserialize)]
pub struct AnswerBody {
    pub answer: String,
}

#[derive(Debug, Deserialize)]
pub struct MessageBody {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct StumpBody {
    #[serde(default)]
    pub riddle: String,
}

#[derive(Debug, Deserialize)]
pub struct LanguageBody {
    pub language: String,
}

// ---------------------------------------------------------------------------
// Error mapping / views
// ---------------------------------------------------------------------------

pub fn api_error(err: RiddleError) -> (StatusCode, Json<Value>) {
    let status = match &err {
        RiddleError::SessionNotFound(_) => StatusCode::NOT_FOUND,
        RiddleError::NoActiveRiddle
        | RiddleError::EmptyInput(_)
        | RiddleError::Blocked(_)
        | RiddleError::UnknownLevel(_)
        | RiddleError::UnknownLanguage(_) => StatusCode::BAD_REQUEST,
        RiddleError::Http(_)
        | RiddleError::Api { .. }
        | RiddleError::Serde(_)
        | RiddleError::Translation(_) => StatusCode::BAD_GATEWAY,
        RiddleError::Config { .. } | RiddleError::Toml(_) | RiddleError::Io(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    if status.is_server_error() {
        tracing::error!(error = %err, "request failed");
    }
    (status, Json(json!({ "error": err.user_message() })))
}

/// The riddle without its answer.
fn public_riddle(card: &RiddleCard) -> Value {
    json!({
        "riddle_id": card.riddle_id,
        "level":     card.level.to_string(),
        "language":  card.language.code(),
        "question":  card.riddle.question,
    })
}

fn progress_view(session: &GameSession) -> Value {
    let progress = session.progress();
    json!({
        "score":    progress.score,
        "attempts": progress.attempts,
        "display":  progress.to_string(),
        "language": session.language().code(),
        "riddle":   session.current_riddle().map(public_riddle),
        "history":  session.history(),
    })
}

// ---------------------------------------------------------------------------
// Catalogue
// ---------------------------------------------------------------------------

/// GET /api/levels
pub async fn list_levels() -> Json<Value> {
    let levels: Vec<String> = Level::ALL.iter().map(|l| l.to_string()).collect();
    Json(json!({ "levels": levels }))
}

/// GET /api/languages
pub async fn list_languages() -> Json<Value> {
    let languages: Vec<Value> = Language::ALL
        .iter()
        .map(|l| json!({ "code": l.code(), "name": l.name() }))
        .collect();
    Json(json!({ "languages": languages }))
}

// ---------------------------------------------------------------------------
// Sessions
// ---------------------------------------------------------------------------

/// POST /api/session
pub async fn create_session(State(state): State<AppState>) -> ApiResult {
    let (id, shared) = state.create_session();
    let session = shared.lock().await;
    Ok(Json(json!({
        "session_id": id,
        "progress":   progress_view(&session),
    })))
}

/// GET /api/session/{id}/progress
pub async fn get_progress(State(state): State<AppState>, Path(id): Path<Uuid>) -> ApiResult {
    let shared = state.session(&id).map_err(api_error)?;
    let session = shared.lock().await;
    Ok(Json(progress_view(&session)))
}

/// POST /api/session/{id}/reset
pub async fn reset_progress(State(state): State<AppState>, Path(id): Path<Uuid>) -> ApiResult {
    let shared = state.session(&id).map_err(api_error)?;
    let mut session = shared.lock().await;
    session.reset_progress();
    Ok(Json(progress_view(&session)))
}

/// PUT /api/session/{id}/language   body: { language }
pub async fn set_language(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<LanguageBody>,
) -> ApiResult {
    let language: Language = body.language.parse().map_err(api_error)?;
    let shared = state.session(&id).map_err(api_error)?;
    shared.lock().await.set_language(language);
    Ok(Json(json!({ "code": language.code(), "name": language.name() })))
}

// ---------------------------------------------------------------------------
// Solve mode
// ---------------------------------------------------------------------------

/// POST /api/session/{id}/riddle   body: { level }
pub async fn new_riddle(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<NewRiddleBody>,
) -> ApiResult {
    let level: Level = body.level.parse().map_err(api_error)?;
    let shared = state.session(&id).map_err(api_error)?;
    let mut session = shared.lock().await;
    let card = session.new_riddle(level, &state.backends).await.map_err(api_error)?;
    Ok(Json(public_riddle(card)))
}

/// POST /api/session/{id}/answer   body: { answer }
pub async fn submit_answer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<AnswerBody>,
) -> ApiResult {
    let shared = state.session(&id).map_err(api_error)?;
    let mut session = shared.lock().await;
    let outcome = session.submit_answer(&body.answer).map_err(api_error)?;
    Ok(Json(json!({
        "is_correct": outcome.is_correct,
        "message":    outcome.message,
        "sound_url":  outcome.sound.url(),
        "score":      outcome.score,
        "attempts":   outcome.attempts,
    })))
}

/// GET /api/session/{id}/hint
pub async fn hint(State(state): State<AppState>, Path(id): Path<Uuid>) -> ApiResult {
    let shared = state.session(&id).map_err(api_error)?;
    let session = shared.lock().await;
    let hint = session.hint().map_err(api_error)?;
    Ok(Json(json!({ "hint": hint })))
}

/// POST /api/session/{id}/help   body: { message }
pub async fn ask_for_help(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<MessageBody>,
) -> ApiResult {
    let shared = state.session(&id).map_err(api_error)?;
    let mut session = shared.lock().await;
    let reply = session.ask_for_help(&body.message, &state.backends).await.map_err(api_error)?;
    Ok(Json(json!({ "reply": reply })))
}

// ---------------------------------------------------------------------------
// Stump / chat modes
// ---------------------------------------------------------------------------

/// POST /api/session/{id}/stump   body: { riddle }
pub async fn stump(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<StumpBody>,
) -> ApiResult {
    let shared = state.session(&id).map_err(api_error)?;
    let mut session = shared.lock().await;
    let reply = session.stump(&body.riddle, &state.backends).await.map_err(api_error)?;
    Ok(Json(json!({ "reply": reply })))
}

/// POST /api/session/{id}/chat   body: { message }
pub async fn chat(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<MessageBody>,
) -> ApiResult {
    let shared = state.session(&id).map_err(api_error)?;
    let mut session = shared.lock().await;
    let history = session.chat(&body.message, &state.backends).await.map_err(api_error)?;
    Ok(Json(json!({ "history": history })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::riddle_engine::{Backends, SessionSettings};

    fn state() -> AppState {
        AppState::new(
            Backends::local(),
            SessionSettings { rng_seed: Some(9), ..SessionSettings::default() },
            16,
        )
    }

    async fn new_session(state: &AppState) -> Uuid {
        let Json(body) = create_session(State(state.clone())).await.unwrap();
        serde_json::from_value(body["session_id"].clone()).unwrap()
    }

    #[tokio::test]
    async fn riddle_response_hides_the_answer() {
        let state = state();
        let id = new_session(&state).await;
        let Json(body) = new_riddle(
            State(state.clone()),
            Path(id),
            Json(NewRiddleBody { level: "easy".to_string() }),
        )
        .await
        .unwrap();
        assert!(body["question"].is_string());
        assert!(body["riddle_id"].as_str().unwrap().starts_with("EZ-"));
        assert!(body.get("answer").is_none());
    }

    #[tokio::test]
    async fn answer_round_updates_progress() {
        let state = state();
        let id = new_session(&state).await;
        let Json(_) =
            new_riddle(State(state.clone()), Path(id), Json(NewRiddleBody { level: "Hard".into() }))
                .await
                .unwrap();
        let answer = {
            let shared = state.session(&id).unwrap();
            let session = shared.lock().await;
            session.current_riddle().unwrap().riddle.answer.clone()
        };

        let Json(body) = submit_answer(State(state.clone()), Path(id), Json(AnswerBody { answer }))
            .await
            .unwrap();
        assert_eq!(body["is_correct"], true);
        assert_eq!(body["sound_url"], "https://actions.google.com/sounds/v1/cartoon/clang_and_wobble.ogg");

        let Json(progress) = get_progress(State(state.clone()), Path(id)).await.unwrap();
        assert_eq!(progress["display"], "Score: 1 / 1");
    }

    #[tokio::test]
    async fn errors_map_to_status_codes() {
        let state = state();
        let id = new_session(&state).await;

        let (status, _) = hint(State(state.clone()), Path(id)).await.unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, Json(body)) =
            new_riddle(State(state.clone()), Path(id), Json(NewRiddleBody { level: "expert".into() }))
                .await
                .unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("expert"));

        let (status, _) = get_progress(State(state.clone()), Path(Uuid::new_v4())).await.unwrap_err();
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn chat_and_language_endpoints() {
        let state = state();
        let id = new_session(&state).await;

        let Json(body) = set_language(
            State(state.clone()),
            Path(id),
            Json(LanguageBody { language: "French".into() }),
        )
        .await
        .unwrap();
        assert_eq!(body["code"], "fr");

        let Json(body) = chat(
            State(state.clone()),
            Path(id),
            Json(MessageBody { message: "why?".into() }),
        )
        .await
        .unwrap();
        assert_eq!(body["history"].as_array().unwrap().len(), 2);

        let (status, _) = stump(State(state.clone()), Path(id), Json(StumpBody { riddle: " ".into() }))
            .await
            .unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
