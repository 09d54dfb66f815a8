//! Runtime settings read from the environment (and an optional `.env` file).

use tracing::debug;

use crate::{
    error::{EduError, Result},
    provider::{Provider, non_empty_env},
};

pub const YOUTUBE_API_KEY_VAR: &str = "YOUTUBE_API_KEY";
pub const YOUTUBE_API_URL_VAR: &str = "EDUAI_YOUTUBE_API_URL";
pub const MODEL_API_URL_VAR: &str = "EDUAI_MODEL_API_URL";
pub const MODEL_VAR: &str = "EDUAI_MODEL";

pub const DEFAULT_YOUTUBE_API_URL: &str = "https://www.googleapis.com/youtube/v3";

/// Settings for the YouTube Data API.
#[derive(Clone, Debug)]
pub struct YoutubeSettings {
    pub api_key: String,
    pub base_url: String,
}

/// Settings for the generative model.
#[derive(Clone, Debug)]
pub struct ModelSettings {
    pub provider: Provider,
    pub api_key: String,
    pub api_url: String,
    pub model: String,
}

/// Load `.env` from the working directory if there is one.
pub fn load_dotenv() {
    match dotenvy::dotenv() {
        Ok(path) => debug!(path = %path.display(), "loaded environment file"),
        Err(e) if e.not_found() => {}
        Err(e) => debug!(error = %e, "could not load environment file"),
    }
}

impl YoutubeSettings {
    pub fn from_env() -> Result<Self> {
        let api_key = non_empty_env(YOUTUBE_API_KEY_VAR).ok_or_else(|| EduError::MissingApiKey {
            env_var: YOUTUBE_API_KEY_VAR.to_string(),
        })?;
        let base_url = non_empty_env(YOUTUBE_API_URL_VAR)
            .unwrap_or_else(|| DEFAULT_YOUTUBE_API_URL.to_string());

        Ok(Self {
            api_key,
            base_url: normalize_base_url(&base_url)?,
        })
    }
}

impl ModelSettings {
    pub fn from_env(provider: Provider) -> Result<Self> {
        let config = provider.config();
        let api_key = provider.validate_api_key()?;
        let api_url = non_empty_env(MODEL_API_URL_VAR).unwrap_or_else(|| config.api_url.to_string());
        let model = non_empty_env(MODEL_VAR).unwrap_or_else(|| config.model.to_string());

        Ok(Self {
            provider,
            api_key,
            api_url: check_http_url(&api_url)?.to_string(),
            model,
        })
    }
}

/// Trailing slashes are dropped so paths can be appended with `/`.
pub fn normalize_base_url(url: &str) -> Result<String> {
    Ok(check_http_url(url)?.trim_end_matches('/').to_string())
}

fn check_http_url(url: &str) -> Result<&str> {
    let url = url.trim();
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(url)
    } else {
        Err(EduError::Config {
            reason: format!("expected an http(s) URL, got `{}`", url),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_base_url() {
        assert_eq!(
            normalize_base_url("https://www.googleapis.com/youtube/v3/").unwrap(),
            "https://www.googleapis.com/youtube/v3"
        );
        assert_eq!(
            normalize_base_url(" http://127.0.0.1:8080 ").unwrap(),
            "http://127.0.0.1:8080"
        );
    }

    #[test]
    fn test_normalize_base_url_rejects_other_schemes() {
        let err = normalize_base_url("ftp://example.com").unwrap_err();
        assert!(matches!(err, EduError::Config { .. }));
    }
}
