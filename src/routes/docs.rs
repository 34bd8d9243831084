use axum::Json;
use utoipa::OpenApi;

use crate::dto::interview_dto::{
    EvaluateAnswerPayload, GenerateQuestionsPayload, HistoryEntry, NextQuestionPayload,
    OverallFeedbackPayload, QuestionsResponse, SessionResponse,
};
use crate::models::{
    evaluation::AnswerEvaluation,
    feedback::OverallFeedback,
    question::{Difficulty, InterviewQuestion, NextQuestion, QuestionType},
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health::health,
        crate::routes::interview::generate_questions,
        crate::routes::interview::evaluate_answer,
        crate::routes::interview::next_question,
        crate::routes::interview::overall_feedback,
    ),
    components(schemas(
        GenerateQuestionsPayload,
        QuestionsResponse,
        EvaluateAnswerPayload,
        NextQuestionPayload,
        HistoryEntry,
        OverallFeedbackPayload,
        SessionResponse,
        InterviewQuestion,
        NextQuestion,
        QuestionType,
        Difficulty,
        AnswerEvaluation,
        OverallFeedback,
    )),
    tags((name = "interview", description = "AI-assisted mock interview operations"))
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_references_response_schemas() {
        let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();
        let evaluate = &doc["paths"]["/api/interview/evaluate"]["post"];
        let reference = evaluate["responses"]["200"]["content"]["application/json"]["schema"]["$ref"]
            .as_str()
            .unwrap();
        assert!(reference.ends_with("AnswerEvaluation"));

        let schemas = &doc["components"]["schemas"];
        for name in ["AnswerEvaluation", "NextQuestion", "OverallFeedback"] {
            assert!(schemas[name].is_object(), "{name}");
        }
    }
}
