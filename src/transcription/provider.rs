use crate::config::RINGOVER_API_KEY_ENV;

/// Static description of a transcription HTTP provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderProfile {
    /// Display name used in logs and failure messages
    pub name: &'static str,

    /// Base URL used when configuration does not override it
    pub default_base_url: &'static str,

    /// Path segments between the base URL and the call identifier
    pub path: &'static [&'static str],

    /// JSON field holding the transcription text
    pub text_field: &'static str,

    /// Environment variable the bearer token comes from, if one is required
    pub credential_env: Option<&'static str>,
}

impl ProviderProfile {
    /// `GET https://public-api.ringover.com/v2/transcriptions/{call_id}`
    pub fn ringover() -> Self {
        Self {
            name: "Ringover",
            default_base_url: "https://public-api.ringover.com",
            path: &["v2", "transcriptions"],
            text_field: "transcription_text",
            credential_env: Some(RINGOVER_API_KEY_ENV),
        }
    }

    /// `GET https://jsonplaceholder.typicode.com/posts/{call_id}`
    pub fn placeholder() -> Self {
        Self {
            name: "JSONPlaceholder",
            default_base_url: "https://jsonplaceholder.typicode.com",
            path: &["posts"],
            text_field: "body",
            credential_env: None,
        }
    }

    pub fn requires_credential(&self) -> bool {
        self.credential_env.is_some()
    }
}
