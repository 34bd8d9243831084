//! Best-effort extraction of structured JSON from free-form model output.
//!
//! The model is asked for JSON but routinely wraps it in prose ("Sure! Here
//! you go: ..."). Extraction takes the widest span from the first opening
//! delimiter of the expected shape to the last closing one, so trailing
//! commentary containing brackets, or two independent JSON values in the same
//! reply, make the slice unparseable and the caller falls back.

use crate::error::{Error, Result};
use crate::models::evaluation::AnswerEvaluation;
use crate::models::feedback::{clamp_percent, OverallFeedback};
use crate::models::question::{InterviewQuestion, NextQuestion, QuestionType};
use serde_json::Value as JsonValue;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonShape {
    Array,
    Object,
}

impl JsonShape {
    fn delimiters(self) -> (char, char) {
        match self {
            JsonShape::Array => ('[', ']'),
            JsonShape::Object => ('{', '}'),
        }
    }
}

pub fn extract_json(text: &str, shape: JsonShape) -> Result<JsonValue> {
    let (open, close) = shape.delimiters();
    let start = text.find(open);
    let end = text.rfind(close);

    let (start, end) = match (start, end) {
        (Some(start), Some(end)) if end > start => (start, end),
        _ => {
            return Err(Error::UnparseableResponse(format!(
                "no {:?} found in model output",
                shape
            )))
        }
    };

    let slice = &text[start..=end];
    let value: JsonValue = serde_json::from_str(slice)
        .map_err(|e| Error::UnparseableResponse(format!("invalid JSON in model output: {}", e)))?;

    match (shape, &value) {
        (JsonShape::Array, JsonValue::Array(_)) | (JsonShape::Object, JsonValue::Object(_)) => {
            Ok(value)
        }
        _ => Err(Error::UnparseableResponse(format!(
            "expected {:?} in model output",
            shape
        ))),
    }
}

pub fn parse_questions(raw: &str, limit: usize) -> Result<Vec<InterviewQuestion>> {
    let value = extract_json(raw, JsonShape::Array).or_else(|err| {
        // Some models wrap the list as {"questions": [...]}.
        extract_json(raw, JsonShape::Object)
            .ok()
            .and_then(|obj| obj.get("questions").cloned())
            .filter(JsonValue::is_array)
            .ok_or(err)
    })?;

    let mut questions: Vec<InterviewQuestion> = value
        .as_array()
        .map(|items| items.iter().filter_map(coerce_question).collect())
        .unwrap_or_default();

    if questions.is_empty() {
        return Err(Error::UnparseableResponse(
            "model returned no usable questions".to_string(),
        ));
    }
    questions.truncate(limit.max(1));
    Ok(questions)
}

fn coerce_question(v: &JsonValue) -> Option<InterviewQuestion> {
    let question = text_field(v, &["question", "text"])?;
    let question_type = v
        .get("type")
        .and_then(|t| t.as_str())
        .map(QuestionType::from_label)
        .unwrap_or(QuestionType::Technical);
    let expected_answer = text_field(v, &["expectedAnswer", "expected_answer", "answer"])
        .unwrap_or_else(|| "No reference answer provided.".to_string());

    Some(InterviewQuestion {
        question,
        question_type,
        expected_answer,
    })
}

/// `heuristic_score` stands in when the model omits the score or gives
/// something non-numeric.
pub fn parse_evaluation(raw: &str, heuristic_score: f64) -> Result<AnswerEvaluation> {
    let value = extract_json(raw, JsonShape::Object)?;

    let review = text_field(&value, &["review", "feedback"]);
    let score = value.get("score").and_then(number_value);
    if review.is_none() && score.is_none() {
        return Err(Error::UnparseableResponse(
            "evaluation has neither review nor score".to_string(),
        ));
    }

    Ok(AnswerEvaluation::new(
        review.unwrap_or_else(|| "The answer was reviewed.".to_string()),
        score.unwrap_or(heuristic_score),
        text_field(&value, &["strength", "strengths"])
            .unwrap_or_else(|| "You attempted the question.".to_string()),
        text_field(&value, &["improvement", "improvements"])
            .unwrap_or_else(|| "Add more detail and concrete examples.".to_string()),
    ))
}

pub fn parse_next_question(raw: &str) -> Result<NextQuestion> {
    let value = extract_json(raw, JsonShape::Object)?;
    let question = text_field(&value, &["question", "text"]).ok_or_else(|| {
        Error::UnparseableResponse("next question has no question text".to_string())
    })?;
    let question_type = value
        .get("type")
        .and_then(|t| t.as_str())
        .map(QuestionType::from_label)
        .unwrap_or(QuestionType::Technical);
    let requires_code = value
        .get("requiresCode")
        .or_else(|| value.get("requires_code"))
        .and_then(|b| b.as_bool())
        .unwrap_or(false);

    Ok(NextQuestion::new(question, question_type, requires_code))
}

/// Fields the model leaves out are taken from `fallback`.
pub fn parse_overall_feedback(raw: &str, fallback: &OverallFeedback) -> Result<OverallFeedback> {
    let value = extract_json(raw, JsonShape::Object)?;
    let summary = text_field(&value, &["summary"]).ok_or_else(|| {
        Error::UnparseableResponse("feedback has no summary".to_string())
    })?;

    let score = |keys: &[&str], default: u8| {
        keys.iter()
            .find_map(|k| value.get(*k).and_then(number_value))
            .map(clamp_percent)
            .unwrap_or(default)
    };

    let mut strengths = list_field(&value, "strengths");
    if strengths.is_empty() {
        strengths = fallback.strengths.clone();
    }
    let mut improvements = list_field(&value, "improvements");
    if improvements.is_empty() {
        improvements = fallback.improvements.clone();
    }

    Ok(OverallFeedback {
        summary,
        strengths,
        improvements,
        overall_score: score(&["overallScore", "overall_score"], fallback.overall_score),
        communication_score: score(
            &["communicationScore", "communication_score"],
            fallback.communication_score,
        ),
        problem_solving_score: score(
            &["problemSolvingScore", "problem_solving_score"],
            fallback.problem_solving_score,
        ),
    })
}

fn text_field(v: &JsonValue, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|k| match v.get(*k)? {
        JsonValue::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        JsonValue::Array(items) => {
            let joined = items
                .iter()
                .filter_map(|i| i.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            (!joined.trim().is_empty()).then_some(joined)
        }
        _ => None,
    })
}

fn list_field(v: &JsonValue, key: &str) -> Vec<String> {
    match v.get(key) {
        Some(JsonValue::Array(items)) => items
            .iter()
            .filter_map(|i| i.as_str())
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
        Some(JsonValue::String(s)) if !s.trim().is_empty() => vec![s.trim().to_string()],
        _ => Vec::new(),
    }
}

/// Accepts `8`, `7.5`, `"8"` and `"8/10"`.
fn number_value(v: &JsonValue) -> Option<f64> {
    let n = match v {
        JsonValue::Number(n) => n.as_f64(),
        JsonValue::String(s) => leading_number(s),
        _ => None,
    }?;
    n.is_finite().then_some(n)
}

fn leading_number(s: &str) -> Option<f64> {
    let s = s.trim();
    let end = s
        .char_indices()
        .find(|(i, c)| !(c.is_ascii_digit() || *c == '.' || (*i == 0 && *c == '-')))
        .map(|(i, _)| i)
        .unwrap_or(s.len());
    s[..end].parse().ok()
}
