use crate::models::question::{Difficulty, InterviewQuestion};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct GenerateQuestionsPayload {
    #[validate(length(min = 1, max = 200))]
    pub role: String,
    #[serde(default)]
    pub difficulty: Difficulty,
    pub resume: Option<String>,
    #[validate(range(min = 1, max = 20))]
    pub count: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct QuestionsResponse {
    pub questions: Vec<InterviewQuestion>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct EvaluateAnswerPayload {
    #[validate(length(min = 1))]
    pub question: String,
    #[serde(default)]
    pub answer: String,
    pub code: Option<String>,
    pub role: Option<String>,
    pub difficulty: Option<Difficulty>,
}

impl EvaluateAnswerPayload {
    pub fn has_code(&self) -> bool {
        self.code.as_deref().is_some_and(|c| !c.trim().is_empty())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct HistoryEntry {
    #[validate(length(min = 1))]
    pub question: String,
    #[serde(default)]
    pub answer: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct NextQuestionPayload {
    #[validate(length(min = 1, max = 200))]
    pub role: String,
    #[serde(default)]
    pub difficulty: Difficulty,
    pub resume: Option<String>,
    #[serde(default)]
    #[validate(nested)]
    pub history: Vec<HistoryEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct SessionResponse {
    #[validate(length(min = 1))]
    pub question: String,
    #[serde(default)]
    pub answer: String,
    pub code: Option<String>,
    /// Per-answer score from an earlier evaluation, if any.
    pub score: Option<f64>,
}

impl SessionResponse {
    pub fn has_code(&self) -> bool {
        self.code.as_deref().is_some_and(|c| !c.trim().is_empty())
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct OverallFeedbackPayload {
    #[validate(length(min = 1, max = 200))]
    pub role: String,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default)]
    #[validate(nested)]
    pub responses: Vec<SessionResponse>,
}
