//! Interview session endpoints

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use parley_core::session::{SessionSnapshot, SessionSummary};
use parley_core::InterviewSession;

use crate::error::AppError;
use crate::types::{ChatRequest, ChatResponse, CreateInterviewRequest, CreateInterviewResponse};
use crate::{AppState, SessionHandle};

/// Build the interviews router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_interviews).post(create_interview))
        .route("/:id", get(get_interview).delete(delete_interview))
        .route("/:id/chat", post(chat))
}

/// Start an interview and return its opening question.
///
/// A plan from `POST /api/plans` may be passed along; it is kept with the
/// session and shown in its snapshot.
async fn create_interview(
    State(state): State<AppState>,
    Json(req): Json<CreateInterviewRequest>,
) -> Result<(StatusCode, Json<CreateInterviewResponse>), AppError> {
    let client = state.client()?;
    let mode = req.mode.unwrap_or(state.default_mode);

    let mut session = InterviewSession::new(client, req.interview_context(), mode);
    if let Some(plan) = req.plan {
        session = session.with_plan(plan);
    }
    let message = session.start().await?;
    let session_id = session.id().to_string();

    state
        .sessions
        .write()
        .await
        .insert(session_id.clone(), Arc::new(SessionHandle::new(session)));
    tracing::info!("Created interview {} ({} mode)", session_id, mode);

    Ok((
        StatusCode::CREATED,
        Json(CreateInterviewResponse {
            session_id,
            mode,
            message,
        }),
    ))
}

/// List live interviews, oldest first. Turns still in progress are not
/// counted yet.
async fn list_interviews(State(state): State<AppState>) -> Json<Vec<SessionSummary>> {
    let mut summaries: Vec<SessionSummary> = state
        .sessions
        .read()
        .await
        .values()
        .map(|handle| handle.summary())
        .collect();
    summaries.sort_by_key(|s| s.created_at);

    Json(summaries)
}

async fn get_interview(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let session = state.session(&id).await?;
    Ok(Json(session.snapshot().await))
}

async fn delete_interview(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    match state.sessions.write().await.remove(&id) {
        Some(_) => {
            tracing::info!("Deleted interview {}", id);
            Ok(StatusCode::NO_CONTENT)
        }
        None => Err(AppError::NotFound(format!("Interview {} not found", id))),
    }
}

/// Send one respondent message and return the interviewer's reply.
///
/// The session lock is held for the whole turn, so turns on one session
/// never interleave.
async fn chat(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let session = state.session(&id).await?;
    let message = session.chat(&req.message).await?;
    Ok(Json(ChatResponse { message }))
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use parley_core::ai::SharedCompletionClient;
    use parley_core::planning::InterviewPlan;
    use parley_core::testing::ScriptedClient;
    use parley_core::InterviewMode;

    fn state_with(replies: &[&str]) -> (AppState, Arc<ScriptedClient>) {
        let client = Arc::new(ScriptedClient::new(replies.iter().copied()));
        let shared: SharedCompletionClient = client.clone();
        (AppState::new(Some(shared), InterviewMode::Panel), client)
    }

    fn create_request(mode: Option<InterviewMode>) -> CreateInterviewRequest {
        CreateInterviewRequest {
            context: "Farmers".to_string(),
            goals: "Learn about irrigation".to_string(),
            additional_context: String::new(),
            mode,
            plan: None,
        }
    }

    #[tokio::test]
    async fn create_runs_panel_opening() {
        let (state, client) = state_with(&[
            "[Lead Interviewer]: What do you grow?",
            "[Completeness Analyst]: note",
            "[Depth Explorer]: note",
        ]);

        let (status, Json(body)) = create_interview(State(state.clone()), Json(create_request(None)))
            .await
            .unwrap();

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body.mode, InterviewMode::Panel);
        assert_eq!(body.message, "What do you grow?");
        assert_eq!(client.call_count(), 3);
        assert!(state.sessions.read().await.contains_key(&body.session_id));
    }

    #[tokio::test]
    async fn create_without_client_is_unavailable() {
        let state = AppState::new(None, InterviewMode::Panel);
        let err = create_interview(State(state), Json(create_request(None)))
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn failed_opening_is_not_stored() {
        let (state, _) = state_with(&[]);
        let err = create_interview(State(state.clone()), Json(create_request(None)))
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
        assert!(state.sessions.read().await.is_empty());
    }

    #[tokio::test]
    async fn single_mode_chat_round_trip() {
        let (state, _) = state_with(&["What crops do you grow?", "How do you water them?"]);

        let (_, Json(created)) = create_interview(
            State(state.clone()),
            Json(create_request(Some(InterviewMode::Single))),
        )
        .await
        .unwrap();

        let Json(reply) = chat(
            State(state.clone()),
            Path(created.session_id.clone()),
            Json(ChatRequest {
                message: "Mostly corn and some soy".to_string(),
            }),
        )
        .await
        .unwrap();
        assert_eq!(reply.message, "How do you water them?");

        let Json(snapshot) = get_interview(State(state.clone()), Path(created.session_id))
            .await
            .unwrap();
        assert_eq!(snapshot.transcript.len(), 2);
        assert!(snapshot
            .conversation_state
            .has_asked("what crops do you grow?"));
        assert!(snapshot.plan.is_none());

        let Json(listed) = list_interviews(State(state)).await;
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].turns, 2);
    }

    #[tokio::test]
    async fn empty_chat_message_is_bad_request() {
        let (state, _) = state_with(&["Hello, what do you do?"]);
        let (_, Json(created)) = create_interview(
            State(state.clone()),
            Json(create_request(Some(InterviewMode::Single))),
        )
        .await
        .unwrap();

        let err = chat(
            State(state),
            Path(created.session_id),
            Json(ChatRequest {
                message: "  ".to_string(),
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn unknown_session_is_not_found() {
        let (state, _) = state_with(&[]);

        let err = chat(
            State(state.clone()),
            Path("missing".to_string()),
            Json(ChatRequest {
                message: "hi".to_string(),
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);

        let err = delete_interview(State(state), Path("missing".to_string()))
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn delete_removes_session() {
        let (state, _) = state_with(&["Welcome! What brings you here?"]);
        let (_, Json(created)) = create_interview(
            State(state.clone()),
            Json(create_request(Some(InterviewMode::Single))),
        )
        .await
        .unwrap();

        let status = delete_interview(State(state.clone()), Path(created.session_id.clone()))
            .await
            .unwrap();
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert!(get_interview(State(state), Path(created.session_id))
            .await
            .is_err());
    }

    #[tokio::test]
    async fn plan_is_kept_with_session() {
        let (state, _) = state_with(&["Hi! What do you grow?"]);
        let mut req = create_request(Some(InterviewMode::Single));
        req.plan = Some(InterviewPlan::fallback());

        let (_, Json(created)) = create_interview(State(state.clone()), Json(req))
            .await
            .unwrap();

        let Json(snapshot) = get_interview(State(state), Path(created.session_id))
            .await
            .unwrap();
        assert_eq!(snapshot.plan, Some(InterviewPlan::fallback()));
    }

    #[tokio::test]
    async fn panel_chat_updates_tracker() {
        let (state, _) = state_with(&[
            "[Lead Interviewer]: What do you grow?",
            "gaps",
            "depth",
            "[Lead Interviewer]: Any crops at all?",
            "gaps",
            "depth",
        ]);
        let (_, Json(created)) = create_interview(State(state.clone()), Json(create_request(None)))
            .await
            .unwrap();

        chat(
            State(state.clone()),
            Path(created.session_id.clone()),
            Json(ChatRequest {
                message: "idk".to_string(),
            }),
        )
        .await
        .unwrap();

        let Json(snapshot) = get_interview(State(state), Path(created.session_id))
            .await
            .unwrap();
        assert_eq!(snapshot.summary.mode, InterviewMode::Panel);
        assert_eq!(snapshot.conversation_state.short_answer_streak, 1);
    }

    #[tokio::test]
    async fn listing_is_not_blocked_by_a_stuck_turn() {
        let client = Arc::new(ScriptedClient::new(["Hello, what do you grow?"]).stall_when_exhausted());
        let shared: SharedCompletionClient = client.clone();
        let state = AppState::new(Some(shared), InterviewMode::Panel);

        let (_, Json(created)) = create_interview(
            State(state.clone()),
            Json(create_request(Some(InterviewMode::Single))),
        )
        .await
        .unwrap();

        let stuck = tokio::spawn(chat(
            State(state.clone()),
            Path(created.session_id.clone()),
            Json(ChatRequest {
                message: "Wheat, mostly".to_string(),
            }),
        ));
        while client.call_count() < 2 {
            tokio::task::yield_now().await;
        }

        let listed = tokio::time::timeout(Duration::from_secs(2), list_interviews(State(state)))
            .await
            .expect("listing waited on the stuck turn");
        assert_eq!(listed.0.len(), 1);
        assert_eq!(listed.0[0].turns, 1);

        stuck.abort();
    }
}
