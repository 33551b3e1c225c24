use super::backend::TranscriptionFetcher;
use super::provider::ProviderProfile;
use crate::error::FetchError;
use crate::text::preview;
use anyhow::{bail, Context, Result};
use reqwest::{Client, Url};
use serde_json::Value;
use std::time::Duration;
use tracing::{error, info, warn};

/// Fetches transcriptions from a JSON-over-HTTP provider
pub struct HttpTranscriptionFetcher {
    client: Client,
    profile: ProviderProfile,
    base_url: Url,
    api_key: Option<String>,
}

impl HttpTranscriptionFetcher {
    /// Create a fetcher for `profile`
    ///
    /// `base_url` replaces the profile's default host (mock servers, proxies).
    pub fn new(
        profile: ProviderProfile,
        base_url: Option<&str>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let raw = base_url.unwrap_or(profile.default_base_url);
        let base_url =
            Url::parse(raw).with_context(|| format!("Invalid {} base URL: {}", profile.name, raw))?;
        if base_url.cannot_be_a_base() {
            bail!("{} base URL cannot carry a path: {}", profile.name, raw);
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build transcription HTTP client")?;

        let api_key = api_key
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());

        if profile.requires_credential() && api_key.is_none() {
            warn!(
                "{} credential is not set; every {} fetch will fail",
                profile.credential_env.unwrap_or("API key"),
                profile.name
            );
        }

        Ok(Self {
            client,
            profile,
            base_url,
            api_key,
        })
    }

    /// Resource URL for one call, with the identifier percent-encoded
    pub fn url_for(&self, call_id: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(self.profile.path)
                .push(call_id);
        }
        url
    }

    fn extract_text(&self, call_id: &str, body: &str) -> String {
        let text = serde_json::from_str::<Value>(body).ok().and_then(|value| {
            value
                .get(self.profile.text_field)
                .and_then(Value::as_str)
                .filter(|text| !text.is_empty())
                .map(str::to_string)
        });

        text.unwrap_or_else(|| {
            format!(
                "No transcription content found for {} in {} response.",
                call_id, self.profile.name
            )
        })
    }
}

#[async_trait::async_trait]
impl TranscriptionFetcher for HttpTranscriptionFetcher {
    async fn fetch(&self, call_id: &str) -> Result<String, FetchError> {
        info!("Fetching transcription for {} from {}...", call_id, self.profile.name);

        let mut request = self.client.get(self.url_for(call_id));

        if let Some(env_var) = self.profile.credential_env {
            match &self.api_key {
                Some(key) => request = request.bearer_auth(key),
                None => {
                    warn!(
                        "{} is not set. Cannot fetch transcription from {}.",
                        env_var, self.profile.name
                    );
                    return Err(FetchError::MissingCredential {
                        call_id: call_id.to_string(),
                        env_var,
                    });
                }
            }
        }

        let transport = |source: reqwest::Error| {
            error!(
                "Error fetching transcription for {} from {}: {}",
                call_id, self.profile.name, source
            );
            FetchError::Transport {
                call_id: call_id.to_string(),
                provider: self.profile.name,
                source,
            }
        };

        let response = request.send().await.map_err(transport)?;
        let status = response.status();
        let body = response.text().await.map_err(transport)?;

        if !status.is_success() {
            error!(
                "{} API error response for {}: {} {}",
                self.profile.name, call_id, status, body
            );
            return Err(FetchError::Status {
                call_id: call_id.to_string(),
                provider: self.profile.name,
                status: status.as_u16(),
                body,
            });
        }

        let transcription = self.extract_text(call_id, &body);
        info!(
            "Transcription for {} from {}: \"{}...\"",
            call_id,
            self.profile.name,
            preview(&transcription, 50)
        );

        Ok(transcription)
    }

    fn name(&self) -> &str {
        self.profile.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fetcher(profile: ProviderProfile, base: Option<&str>) -> HttpTranscriptionFetcher {
        HttpTranscriptionFetcher::new(profile, base, Some("key".into()), Duration::from_secs(5))
            .unwrap()
    }

    #[test]
    fn ringover_url_layout() {
        let f = fetcher(ProviderProfile::ringover(), None);
        assert_eq!(
            f.url_for("CALL-1").as_str(),
            "https://public-api.ringover.com/v2/transcriptions/CALL-1"
        );
    }

    #[test]
    fn placeholder_url_with_custom_base_and_trailing_slash() {
        let f = fetcher(ProviderProfile::placeholder(), Some("http://127.0.0.1:9000/api/"));
        assert_eq!(f.url_for("7").as_str(), "http://127.0.0.1:9000/api/posts/7");
    }

    #[test]
    fn call_id_is_percent_encoded() {
        let f = fetcher(ProviderProfile::ringover(), None);
        assert!(f.url_for("a/b c").as_str().ends_with("/transcriptions/a%2Fb%20c"));
    }

    #[test]
    fn extract_text_falls_back_to_placeholder() {
        let f = fetcher(ProviderProfile::ringover(), None);
        assert_eq!(
            f.extract_text("CALL-1", r#"{"transcription_text":"Hello"}"#),
            "Hello"
        );
        assert_eq!(
            f.extract_text("CALL-1", r#"{"other":"x"}"#),
            "No transcription content found for CALL-1 in Ringover response."
        );
        assert_eq!(
            f.extract_text("CALL-1", "not json"),
            "No transcription content found for CALL-1 in Ringover response."
        );
    }

    #[test]
    fn rejects_invalid_base_url() {
        let result = HttpTranscriptionFetcher::new(
            ProviderProfile::ringover(),
            Some("not a url"),
            None,
            Duration::from_secs(1),
        );
        assert!(result.is_err());
    }
}
