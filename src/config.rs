use crate::error::{Error, Result};
use dotenvy::dotenv;
use std::env;
use std::sync::OnceLock;
use std::time::Duration;

pub const DEFAULT_INFERENCE_URL: &str =
    "https://api-inference.huggingface.co/models/mistralai/Mistral-7B-Instruct-v0.2";

#[derive(Debug, Clone)]
pub struct Config {
    pub server_address: String,
    /// Absent credentials are not a startup failure; every inference call
    /// reports them instead and the interview falls back to static content.
    pub inference_api_key: Option<String>,
    pub inference_url: String,
    pub inference_max_retries: u32,
    pub inference_timeout_secs: u64,
    pub model_loading_wait_ms: u64,
    pub retry_backoff_ms: u64,
    pub max_ai_questions: usize,
    pub max_concurrent_requests: usize,
    pub request_timeout_secs: u64,
}

pub static CONFIG: OnceLock<Config> = OnceLock::new();

impl Default for Config {
    fn default() -> Self {
        Self {
            server_address: "0.0.0.0:8080".to_string(),
            inference_api_key: None,
            inference_url: DEFAULT_INFERENCE_URL.to_string(),
            inference_max_retries: 3,
            inference_timeout_secs: 60,
            model_loading_wait_ms: 10_000,
            retry_backoff_ms: 2_000,
            max_ai_questions: 10,
            max_concurrent_requests: 64,
            request_timeout_secs: 180,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();
        let defaults = Self::default();

        let inference_url = env::var("INFERENCE_API_URL").unwrap_or(defaults.inference_url);
        url::Url::parse(&inference_url).map_err(|e| {
            Error::Config(format!("Invalid value for INFERENCE_API_URL: {}", e))
        })?;

        Ok(Self {
            server_address: env::var("SERVER_ADDRESS").unwrap_or(defaults.server_address),
            inference_api_key: env::var("HUGGINGFACE_API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty()),
            inference_url,
            inference_max_retries: get_env_parse_or(
                "INFERENCE_MAX_RETRIES",
                defaults.inference_max_retries,
            )?,
            inference_timeout_secs: get_env_parse_or(
                "INFERENCE_TIMEOUT_SECS",
                defaults.inference_timeout_secs,
            )?,
            model_loading_wait_ms: get_env_parse_or(
                "MODEL_LOADING_WAIT_MS",
                defaults.model_loading_wait_ms,
            )?,
            retry_backoff_ms: get_env_parse_or("RETRY_BACKOFF_MS", defaults.retry_backoff_ms)?,
            max_ai_questions: get_env_parse_or("MAX_AI_QUESTIONS", defaults.max_ai_questions)?,
            max_concurrent_requests: get_env_parse_or(
                "MAX_CONCURRENT_REQUESTS",
                defaults.max_concurrent_requests,
            )?,
            request_timeout_secs: get_env_parse_or(
                "REQUEST_TIMEOUT_SECS",
                defaults.request_timeout_secs,
            )?,
        })
    }

    pub fn inference_timeout(&self) -> Duration {
        Duration::from_secs(self.inference_timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn get_env_parse_or<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e))),
        Err(_) => Ok(default),
    }
}

pub fn init_config() -> Result<()> {
    let config = Config::from_env()?;
    CONFIG
        .set(config)
        .map_err(|_| Error::Config("Configuration has already been initialized".to_string()))?;
    Ok(())
}

pub fn get_config() -> &'static Config {
    CONFIG
        .get()
        .expect("Configuration has not been initialized")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_retry_policy() {
        let config = Config::default();
        assert_eq!(config.inference_max_retries, 3);
        assert_eq!(config.model_loading_wait_ms, 10_000);
        assert_eq!(config.retry_backoff_ms, 2_000);
        assert!(config.inference_api_key.is_none());
    }

    #[test]
    fn unparseable_numbers_are_config_errors() {
        env::set_var("INTERVIEW_TEST_BAD_NUMBER", "three");
        let err = get_env_parse_or::<u32>("INTERVIEW_TEST_BAD_NUMBER", 3).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        env::remove_var("INTERVIEW_TEST_BAD_NUMBER");

        let value = get_env_parse_or::<u32>("INTERVIEW_TEST_UNSET_NUMBER", 7).unwrap();
        assert_eq!(value, 7);
    }
}
