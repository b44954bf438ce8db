//! Interview plan endpoint

use axum::{extract::State, routing::post, Json, Router};

use parley_core::planning::PlanningAgent;

use crate::error::AppError;
use crate::types::{CreatePlanRequest, CreatePlanResponse};
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", post(create_plan))
}

/// Generate a plan and an initialization summary.
///
/// Model failures never surface here: the plan falls back to a generic one
/// and the summary to a stock message.
async fn create_plan(
    State(state): State<AppState>,
    Json(req): Json<CreatePlanRequest>,
) -> Result<Json<CreatePlanResponse>, AppError> {
    let agent = PlanningAgent::new(state.client()?);

    let plan = agent
        .create_plan(&req.context, &req.background, &req.goals)
        .await;
    let init = agent.initialize_agents(plan).await;

    Ok(Json(CreatePlanResponse {
        plan: init.plan,
        initialization_message: init.initialization_message,
    }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use parley_core::ai::SharedCompletionClient;
    use parley_core::planning::{InterviewPlan, DEFAULT_INITIALIZATION_MESSAGE};
    use parley_core::testing::ScriptedClient;
    use parley_core::InterviewMode;

    #[tokio::test]
    async fn prose_reply_returns_fallback_plan() {
        let client: SharedCompletionClient = Arc::new(ScriptedClient::new([
            "I'd start with something friendly.",
            "Session ready.",
        ]));
        let state = AppState::new(Some(client), InterviewMode::Panel);

        let Json(body) = create_plan(State(state), Json(CreatePlanRequest::default()))
            .await
            .unwrap();
        assert_eq!(body.plan, InterviewPlan::fallback());
        assert_eq!(body.initialization_message, "Session ready.");
    }

    #[tokio::test]
    async fn upstream_failure_still_succeeds() {
        let client: SharedCompletionClient =
            Arc::new(ScriptedClient::failing("503 from provider"));
        let state = AppState::new(Some(client), InterviewMode::Panel);

        let Json(body) = create_plan(State(state), Json(CreatePlanRequest::default()))
            .await
            .unwrap();
        assert_eq!(body.plan, InterviewPlan::fallback());
        assert_eq!(body.initialization_message, DEFAULT_INITIALIZATION_MESSAGE);
    }

    #[tokio::test]
    async fn no_client_is_unavailable() {
        let state = AppState::new(None, InterviewMode::Panel);
        let err = create_plan(State(state), Json(CreatePlanRequest::default()))
            .await
            .unwrap_err();
        assert_eq!(err.status(), axum::http::StatusCode::SERVICE_UNAVAILABLE);
    }
}
