use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const MIN_SCORE: f64 = 0.0;
pub const MAX_SCORE: f64 = 10.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnswerEvaluation {
    pub review: String,
    /// Always within `0..=10`.
    pub score: f64,
    pub strength: String,
    pub improvement: String,
}

impl AnswerEvaluation {
    pub fn new(review: String, score: f64, strength: String, improvement: String) -> Self {
        Self {
            review,
            score: clamp_score(score),
            strength,
            improvement,
        }
    }
}

pub fn clamp_score(score: f64) -> f64 {
    if score.is_nan() {
        return MIN_SCORE;
    }
    score.clamp(MIN_SCORE, MAX_SCORE)
}
