use crate::error::{EduError, Result};

/// An OpenAI-compatible chat-completions backend.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Provider {
    #[default]
    Gemini,
    Grok,
    Openai,
}

/// Display name, endpoint, default model and key variable of a provider.
#[derive(Debug)]
pub struct ProviderConfig {
    pub name: &'static str,
    pub api_url: &'static str,
    pub model: &'static str,
    pub env_var: &'static str,
}

static GEMINI: ProviderConfig = ProviderConfig {
    name: "Gemini",
    api_url: "https://generativelanguage.googleapis.com/v1beta/openai/chat/completions",
    model: "gemini-2.5-flash",
    env_var: "GEMINI_API_KEY",
};

static GROK: ProviderConfig = ProviderConfig {
    name: "Grok",
    api_url: "https://api.x.ai/v1/chat/completions",
    model: "grok-4-fast",
    env_var: "XAI_API_KEY",
};

static OPENAI: ProviderConfig = ProviderConfig {
    name: "OpenAI",
    api_url: "https://api.openai.com/v1/chat/completions",
    model: "gpt-5.1",
    env_var: "OPENAI_API_KEY",
};

impl Provider {
    pub const ALL: [Provider; 3] = [Provider::Gemini, Provider::Grok, Provider::Openai];

    pub fn config(self) -> &'static ProviderConfig {
        match self {
            Provider::Gemini => &GEMINI,
            Provider::Grok => &GROK,
            Provider::Openai => &OPENAI,
        }
    }

    pub fn name(self) -> &'static str {
        self.config().name
    }

    /// Read this provider's API key; blank values count as missing.
    pub fn validate_api_key(self) -> Result<String> {
        let env_var = self.config().env_var;
        non_empty_env(env_var).ok_or_else(|| EduError::MissingApiKey {
            env_var: env_var.to_string(),
        })
    }
}

pub(crate) fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.trim().is_empty())
}
