use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InterviewQuestion {
    pub question: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub expected_answer: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NextQuestion {
    pub question: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub requires_code: bool,
}

impl NextQuestion {
    pub fn new(question: String, question_type: QuestionType, requires_code: bool) -> Self {
        Self {
            question,
            requires_code: requires_code || question_type == QuestionType::Coding,
            question_type,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    Technical,
    Coding,
    Behavioral,
}

impl QuestionType {
    /// Models label questions loosely; anything unrecognised is treated as technical.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "coding" | "code" | "programming" | "live_coding" | "live-coding" => {
                QuestionType::Coding
            }
            "behavioral" | "behavioural" | "situational" | "hr" | "soft_skills" => {
                QuestionType::Behavioral
            }
            _ => QuestionType::Technical,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" | "beginner" | "junior" => Ok(Difficulty::Easy),
            "medium" | "intermediate" | "mid" => Ok(Difficulty::Medium),
            "hard" | "advanced" | "senior" | "expert" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty: {}", other)),
        }
    }
}

impl<'de> Deserialize<'de> for Difficulty {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}
