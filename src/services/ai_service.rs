use crate::dto::interview_dto::{
    EvaluateAnswerPayload, GenerateQuestionsPayload, NextQuestionPayload, OverallFeedbackPayload,
};
use crate::error::Result;
use crate::models::evaluation::AnswerEvaluation;
use crate::models::feedback::OverallFeedback;
use crate::models::question::{InterviewQuestion, NextQuestion};
use crate::services::fallback_service;
use crate::services::inference_client::InferenceClient;
use crate::services::prompt_service;
use crate::services::response_parser;

pub const DEFAULT_QUESTION_COUNT: usize = 5;

/// Generation settings per operation: (max_new_tokens, temperature).
const QUESTIONS_PARAMS: (u32, f32) = (1500, 0.7);
const EVALUATION_PARAMS: (u32, f32) = (500, 0.3);
const NEXT_QUESTION_PARAMS: (u32, f32) = (300, 0.8);
const FEEDBACK_PARAMS: (u32, f32) = (800, 0.5);

/// Every public operation returns a usable value: generation or parsing
/// failures are logged and replaced with fallback content.
#[derive(Clone)]
pub struct AIService {
    inference: InferenceClient,
    retries: u32,
    max_questions: usize,
}

impl AIService {
    pub fn new(inference: InferenceClient, retries: u32, max_questions: usize) -> Self {
        Self {
            inference,
            retries,
            max_questions: max_questions.max(1),
        }
    }

    pub fn question_count(&self, requested: Option<usize>) -> usize {
        requested
            .unwrap_or(DEFAULT_QUESTION_COUNT)
            .clamp(1, self.max_questions)
    }

    pub async fn generate_interview_questions(
        &self,
        payload: &GenerateQuestionsPayload,
    ) -> Vec<InterviewQuestion> {
        let count = self.question_count(payload.count);
        self.try_generate_questions(payload, count)
            .await
            .unwrap_or_else(|err| {
                tracing::warn!(error = %err, role = %payload.role, "Question generation failed, using fallback set");
                fallback_service::fallback_questions(&payload.role, payload.difficulty, count)
            })
    }

    async fn try_generate_questions(
        &self,
        payload: &GenerateQuestionsPayload,
        count: usize,
    ) -> Result<Vec<InterviewQuestion>> {
        let prompt = prompt_service::questions_prompt(payload, count);
        let (max_tokens, temperature) = QUESTIONS_PARAMS;
        let raw = self
            .inference
            .generate(&prompt, max_tokens, temperature, self.retries)
            .await?;
        let questions = response_parser::parse_questions(&raw, count)?;
        tracing::info!(count = questions.len(), role = %payload.role, "Generated interview questions");
        Ok(questions)
    }

    pub async fn evaluate_answer(&self, payload: &EvaluateAnswerPayload) -> AnswerEvaluation {
        self.try_evaluate_answer(payload)
            .await
            .unwrap_or_else(|err| {
                tracing::warn!(error = %err, "Answer evaluation failed, using heuristic score");
                fallback_service::fallback_evaluation(&payload.answer, payload.has_code())
            })
    }

    async fn try_evaluate_answer(&self, payload: &EvaluateAnswerPayload) -> Result<AnswerEvaluation> {
        let prompt = prompt_service::evaluation_prompt(payload);
        let (max_tokens, temperature) = EVALUATION_PARAMS;
        let raw = self
            .inference
            .generate(&prompt, max_tokens, temperature, self.retries)
            .await?;
        let heuristic = fallback_service::heuristic_score(&payload.answer, payload.has_code());
        response_parser::parse_evaluation(&raw, heuristic)
    }

    pub async fn generate_next_question(&self, payload: &NextQuestionPayload) -> NextQuestion {
        self.try_generate_next_question(payload)
            .await
            .unwrap_or_else(|err| {
                tracing::warn!(error = %err, role = %payload.role, "Next question generation failed, using fallback");
                fallback_service::fallback_next_question(
                    &payload.role,
                    payload.difficulty,
                    &payload.history,
                )
            })
    }

    async fn try_generate_next_question(&self, payload: &NextQuestionPayload) -> Result<NextQuestion> {
        let prompt = prompt_service::next_question_prompt(payload);
        let (max_tokens, temperature) = NEXT_QUESTION_PARAMS;
        let raw = self
            .inference
            .generate(&prompt, max_tokens, temperature, self.retries)
            .await?;
        response_parser::parse_next_question(&raw)
    }

    pub async fn generate_overall_feedback(&self, payload: &OverallFeedbackPayload) -> OverallFeedback {
        let fallback = fallback_service::fallback_overall_feedback(&payload.role, &payload.responses);
        if payload.responses.is_empty() {
            return fallback;
        }

        match self.try_generate_overall_feedback(payload, &fallback).await {
            Ok(feedback) => feedback,
            Err(err) => {
                tracing::warn!(error = %err, role = %payload.role, "Overall feedback generation failed, using fallback");
                fallback
            }
        }
    }

    async fn try_generate_overall_feedback(
        &self,
        payload: &OverallFeedbackPayload,
        fallback: &OverallFeedback,
    ) -> Result<OverallFeedback> {
        let prompt = prompt_service::overall_feedback_prompt(payload);
        let (max_tokens, temperature) = FEEDBACK_PARAMS;
        let raw = self
            .inference
            .generate(&prompt, max_tokens, temperature, self.retries)
            .await?;
        response_parser::parse_overall_feedback(&raw, fallback)
    }
}
