pub mod config;
pub mod dto;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::services::{
    ai_service::AIService,
    inference_client::{HttpTransport, InferenceClient, InferenceTransport, RetryPolicy},
};
use axum::{
    routing::{get, post},
    Router,
};
use reqwest::Client;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub ai_service: AIService,
    pub inference_configured: bool,
}

impl AppState {
    pub fn new(config: &Config) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(config.inference_timeout())
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;

        let transport = HttpTransport::new(
            http_client,
            config.inference_url.clone(),
            config.inference_timeout(),
        );
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    pub fn with_transport(config: &Config, transport: Arc<dyn InferenceTransport>) -> Self {
        if config.inference_api_key.is_none() {
            tracing::warn!("HUGGINGFACE_API_KEY is not set, all interview content will come from fallbacks");
        }

        let inference = InferenceClient::new(
            transport,
            config.inference_api_key.clone(),
            RetryPolicy::from_config(config),
        );
        let ai_service = AIService::new(
            inference,
            config.inference_max_retries,
            config.max_ai_questions,
        );

        Self {
            ai_service,
            inference_configured: config.inference_api_key.is_some(),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(routes::health::health))
        .route("/api/openapi.json", get(routes::docs::openapi_json))
        .route(
            "/api/interview/questions",
            post(routes::interview::generate_questions),
        )
        .route(
            "/api/interview/evaluate",
            post(routes::interview::evaluate_answer),
        )
        .route(
            "/api/interview/next-question",
            post(routes::interview::next_question),
        )
        .route(
            "/api/interview/feedback",
            post(routes::interview::overall_feedback),
        )
        .with_state(state)
}
