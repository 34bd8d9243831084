use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OverallFeedback {
    pub summary: String,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    pub overall_score: u8,
    pub communication_score: u8,
    pub problem_solving_score: u8,
}

/// Rounds a percentage-like score into `0..=100`.
pub fn clamp_percent(score: f64) -> u8 {
    if score.is_nan() {
        return 0;
    }
    score.round().clamp(0.0, 100.0) as u8
}
