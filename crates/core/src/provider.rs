use std::str::FromStr;

/// Placeholder key shipped in test settings; never treated as a real credential.
pub const DUMMY_API_KEY: &str = "AIzaSyDummyKeyForTesting";

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("Missing API key for {provider_name}")]
    MissingApiKey { provider_name: String },

    #[error("Unknown provider: {0}")]
    UnknownProvider(String),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Provider {
    #[default]
    Gemini,
    Grok,
    Openai,
}

pub struct ProviderConfig {
    pub api_url: &'static str,
    pub model: &'static str,
    pub env_var: &'static str,
}

impl Provider {
    pub fn config(&self) -> ProviderConfig {
        match self {
            Provider::Gemini => ProviderConfig {
                api_url: "https://generativelanguage.googleapis.com/v1beta/openai/chat/completions",
                model: "gemini-1.5-flash",
                env_var: "GEMINI_API_KEY",
            },
            Provider::Grok => ProviderConfig {
                api_url: "https://api.x.ai/v1/chat/completions",
                model: "grok-4-fast",
                env_var: "XAI_API_KEY",
            },
            Provider::Openai => ProviderConfig {
                api_url: "https://api.openai.com/v1/chat/completions",
                model: "gpt-5.1",
                env_var: "OPENAI_API_KEY",
            },
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Provider::Gemini => "Gemini",
            Provider::Grok => "Grok",
            Provider::Openai => "OpenAI",
        }
    }

    /// Validate that the API key is set for this provider
    pub fn validate_api_key(&self) -> Result<String, ProviderError> {
        let config = self.config();
        std::env::var(config.env_var)
            .ok()
            .filter(|key| is_real_credential(key))
            .ok_or_else(|| ProviderError::MissingApiKey {
                provider_name: self.name().to_string(),
            })
    }

    /// Pick the explicit key if it is usable, otherwise the provider's env var.
    pub fn resolve_api_key(&self, explicit: Option<&str>) -> Option<String> {
        match explicit {
            Some(key) if is_real_credential(key) => Some(key.to_string()),
            _ => self.validate_api_key().ok(),
        }
    }
}

impl FromStr for Provider {
    type Err = ProviderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "gemini" => Ok(Provider::Gemini),
            "grok" => Ok(Provider::Grok),
            "openai" => Ok(Provider::Openai),
            other => Err(ProviderError::UnknownProvider(other.to_string())),
        }
    }
}

pub fn is_real_credential(key: &str) -> bool {
    let key = key.trim();
    !key.is_empty() && key != DUMMY_API_KEY
}
