mod common;

use axum::http::StatusCode;
use serde_json::json;
use std::time::Duration;
use tokio::time::Instant;

use common::{
    app_with, assert_evaluation_shape, assert_question_shape, post_json, Reply, ScriptedTransport,
};

const QUESTIONS_URI: &str = "/api/interview/questions";
const EVALUATE_URI: &str = "/api/interview/evaluate";
const NEXT_URI: &str = "/api/interview/next-question";
const FEEDBACK_URI: &str = "/api/interview/feedback";

fn questions_body() -> serde_json::Value {
    json!({ "role": "Backend Engineer", "difficulty": "medium", "count": 4 })
}

#[tokio::test]
async fn generated_questions_are_returned() {
    let transport = ScriptedTransport::new(vec![Reply::generated(
        r#"[{"question":"Explain connection pooling","type":"technical","expectedAnswer":"Reuse connections"},
            {"question":"Write an LRU cache","type":"coding","expectedAnswer":"Map plus list"}]"#,
    )]);
    let app = app_with(transport.clone(), Some("hf_test"));

    let (status, body) = post_json(&app, QUESTIONS_URI, questions_body()).await;
    assert_eq!(status, StatusCode::OK);
    let questions = body["questions"].as_array().unwrap();
    assert_eq!(questions.len(), 2);
    assert_eq!(questions[0]["question"], "Explain connection pooling");
    questions.iter().for_each(assert_question_shape);
    assert_eq!(transport.calls(), 1);
}

#[tokio::test]
async fn prose_around_json_is_ignored() {
    let transport = ScriptedTransport::new(vec![Reply::generated(
        r#"Sure! Here you go: [{"question":"Q1","type":"technical","expectedAnswer":"A"}] Hope that helps!"#,
    )]);
    let app = app_with(transport, Some("hf_test"));

    let (status, body) = post_json(&app, QUESTIONS_URI, questions_body()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["questions"],
        json!([{ "question": "Q1", "type": "technical", "expectedAnswer": "A" }])
    );
}

#[tokio::test(start_paused = true)]
async fn model_loading_twice_then_success() {
    let transport = ScriptedTransport::new(vec![
        Reply::Status(503),
        Reply::Status(503),
        Reply::generated(r#"[{"question":"Loaded","type":"behavioral","expectedAnswer":"x"}]"#),
    ]);
    let app = app_with(transport.clone(), Some("hf_test"));

    let start = Instant::now();
    let (status, body) = post_json(&app, QUESTIONS_URI, questions_body()).await;
    let elapsed = start.elapsed();

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["questions"][0]["question"], "Loaded");
    assert_eq!(transport.calls(), 3);
    // Two model-loading waits of 10s each.
    assert!(elapsed >= Duration::from_secs(20) && elapsed < Duration::from_secs(21));
}

#[tokio::test(start_paused = true)]
async fn model_loading_exhausted_falls_back() {
    let transport = ScriptedTransport::new(vec![Reply::Status(503)]);
    let app = app_with(transport.clone(), Some("hf_test"));

    let (status, body) = post_json(&app, QUESTIONS_URI, questions_body()).await;
    assert_eq!(status, StatusCode::OK);
    let questions = body["questions"].as_array().unwrap();
    assert_eq!(questions.len(), 4);
    questions.iter().for_each(assert_question_shape);
    assert_eq!(transport.calls(), 3);
}

#[tokio::test(start_paused = true)]
async fn not_found_falls_back_without_retrying() {
    let transport = ScriptedTransport::new(vec![Reply::Status(404)]);
    let app = app_with(transport.clone(), Some("hf_test"));

    let start = Instant::now();
    let (status, body) = post_json(&app, QUESTIONS_URI, questions_body()).await;
    assert_eq!(status, StatusCode::OK);
    body["questions"]
        .as_array()
        .unwrap()
        .iter()
        .for_each(assert_question_shape);
    assert_eq!(transport.calls(), 1);
    assert_eq!(start.elapsed(), Duration::ZERO);
}

#[tokio::test]
async fn missing_credential_never_touches_the_network() {
    let transport = ScriptedTransport::new(vec![Reply::generated("[]")]);
    let app = app_with(transport.clone(), None);

    let (status, body) = post_json(&app, QUESTIONS_URI, questions_body()).await;
    assert_eq!(status, StatusCode::OK);
    assert!(!body["questions"].as_array().unwrap().is_empty());

    let (status, eval) = post_json(
        &app,
        EVALUATE_URI,
        json!({ "question": "What is a deadlock?", "answer": "x".repeat(250), "code": "fn lock() {}" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_evaluation_shape(&eval);
    assert_eq!(eval["score"], 9.0);

    assert_eq!(transport.calls(), 0);
}

#[tokio::test(start_paused = true)]
async fn evaluation_score_always_in_range() {
    let replies = [
        Reply::generated(r#"{"review":"Outstanding","score":15,"strength":"a","improvement":"b"}"#),
        Reply::generated(r#"{"review":"Incorrect","score":-3,"strength":"a","improvement":"b"}"#),
        Reply::generated("The candidate did fine, I would give them a solid grade."),
        Reply::Network,
    ];
    let expected = [10.0, 0.0, 5.0, 5.0];

    for (reply, expected_score) in replies.into_iter().zip(expected) {
        let transport = ScriptedTransport::new(vec![reply]);
        let app = app_with(transport, Some("hf_test"));
        let (status, eval) = post_json(
            &app,
            EVALUATE_URI,
            json!({ "question": "Explain ownership", "answer": "It moves." }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_evaluation_shape(&eval);
        assert_eq!(eval["score"], expected_score);
    }
}

#[tokio::test]
async fn next_question_from_model_and_fallback() {
    let transport = ScriptedTransport::new(vec![Reply::generated(
        r#"{"question":"Implement a trie","type":"coding","requiresCode":false}"#,
    )]);
    let app = app_with(transport, Some("hf_test"));
    let body = json!({
        "role": "Backend Engineer",
        "difficulty": "senior",
        "history": [{ "question": "What is a B-tree?", "answer": "A balanced tree." }]
    });

    let (status, next) = post_json(&app, NEXT_URI, body.clone()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(next["question"], "Implement a trie");
    assert_eq!(next["requiresCode"], true);

    let offline = app_with(ScriptedTransport::new(vec![]), None);
    let (status, next) = post_json(&offline, NEXT_URI, body).await;
    assert_eq!(status, StatusCode::OK);
    assert!(next["question"].as_str().is_some_and(|q| !q.is_empty()));
    assert_eq!(next["requiresCode"], next["type"] == "coding");
}

#[tokio::test]
async fn overall_feedback_is_clamped_and_complete() {
    let transport = ScriptedTransport::new(vec![Reply::generated(
        r#"Here is the summary: {"summary":"Good session","strengths":["clarity"],"improvements":[],"overallScore":140,"communicationScore":80,"problemSolvingScore":-5}"#,
    )]);
    let app = app_with(transport, Some("hf_test"));
    let body = json!({
        "role": "Data Engineer",
        "responses": [
            { "question": "What is a window function?", "answer": "x".repeat(120), "score": 8 },
            { "question": "Write a dedup query", "answer": "SELECT DISTINCT", "code": "SELECT 1" }
        ]
    });

    let (status, feedback) = post_json(&app, FEEDBACK_URI, body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(feedback["summary"], "Good session");
    assert_eq!(feedback["overallScore"], 100);
    assert_eq!(feedback["problemSolvingScore"], 0);
    assert_eq!(feedback["communicationScore"], 80);
    assert!(!feedback["improvements"].as_array().unwrap().is_empty());
}

#[tokio::test(start_paused = true)]
async fn overall_feedback_falls_back_on_garbage() {
    let transport = ScriptedTransport::new(vec![Reply::generated("{ not json at all }")]);
    let app = app_with(transport, Some("hf_test"));
    let body = json!({
        "role": "Frontend Developer",
        "difficulty": "easy",
        "responses": [{ "question": "What is the DOM?", "answer": "A tree of nodes.", "score": 6 }]
    });

    let (status, feedback) = post_json(&app, FEEDBACK_URI, body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(feedback["overallScore"], 60);
    for key in ["communicationScore", "problemSolvingScore"] {
        let score = feedback[key].as_u64().unwrap();
        assert!(score <= 100);
    }
    assert!(!feedback["strengths"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn invalid_payloads_are_rejected() {
    let app = app_with(ScriptedTransport::new(vec![]), Some("hf_test"));

    let (status, body) = post_json(&app, QUESTIONS_URI, json!({ "role": "" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, _) = post_json(&app, QUESTIONS_URI, json!({ "role": "QA", "count": 100 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = post_json(&app, EVALUATE_URI, json!({ "question": "", "answer": "x" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test(start_paused = true)]
async fn repeated_calls_keep_the_same_shape() {
    let transport = ScriptedTransport::new(vec![
        Reply::generated(r#"[{"question":"First","type":"technical","expectedAnswer":"a"}]"#),
        Reply::Network,
    ]);
    let app = app_with(transport, Some("hf_test"));

    for _ in 0..3 {
        let (status, body) = post_json(&app, QUESTIONS_URI, questions_body()).await;
        assert_eq!(status, StatusCode::OK);
        let questions = body["questions"].as_array().unwrap();
        assert!(!questions.is_empty());
        questions.iter().for_each(assert_question_shape);
    }
}
