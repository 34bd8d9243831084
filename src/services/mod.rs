pub mod ai_service;
pub mod fallback_service;
pub mod inference_client;
pub mod prompt_service;
pub mod response_parser;
