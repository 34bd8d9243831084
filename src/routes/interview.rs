use axum::{
    extract::State,
    response::{IntoResponse, Json},
};
use validator::Validate;

use crate::{
    dto::interview_dto::{
        EvaluateAnswerPayload, GenerateQuestionsPayload, NextQuestionPayload,
        OverallFeedbackPayload, QuestionsResponse,
    },
    error::Result,
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/interview/questions",
    request_body = GenerateQuestionsPayload,
    responses(
        (status = 200, description = "Interview questions, generated or from the fallback set", body = QuestionsResponse),
        (status = 400, description = "Invalid payload")
    )
)]
#[axum::debug_handler]
pub async fn generate_questions(
    State(state): State<AppState>,
    Json(payload): Json<GenerateQuestionsPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let questions = state.ai_service.generate_interview_questions(&payload).await;
    Ok(Json(QuestionsResponse { questions }))
}

#[utoipa::path(
    post,
    path = "/api/interview/evaluate",
    request_body = EvaluateAnswerPayload,
    responses(
        (status = 200, description = "Evaluation with a score between 0 and 10", body = crate::models::evaluation::AnswerEvaluation),
        (status = 400, description = "Invalid payload")
    )
)]
#[axum::debug_handler]
pub async fn evaluate_answer(
    State(state): State<AppState>,
    Json(payload): Json<EvaluateAnswerPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let evaluation = state.ai_service.evaluate_answer(&payload).await;
    Ok(Json(evaluation))
}

#[utoipa::path(
    post,
    path = "/api/interview/next-question",
    request_body = NextQuestionPayload,
    responses(
        (status = 200, description = "Follow-up question", body = crate::models::question::NextQuestion),
        (status = 400, description = "Invalid payload")
    )
)]
#[axum::debug_handler]
pub async fn next_question(
    State(state): State<AppState>,
    Json(payload): Json<NextQuestionPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let question = state.ai_service.generate_next_question(&payload).await;
    Ok(Json(question))
}

#[utoipa::path(
    post,
    path = "/api/interview/feedback",
    request_body = OverallFeedbackPayload,
    responses(
        (status = 200, description = "Overall session feedback", body = crate::models::feedback::OverallFeedback),
        (status = 400, description = "Invalid payload")
    )
)]
#[axum::debug_handler]
pub async fn overall_feedback(
    State(state): State<AppState>,
    Json(payload): Json<OverallFeedbackPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let feedback = state.ai_service.generate_overall_feedback(&payload).await;
    Ok(Json(feedback))
}
