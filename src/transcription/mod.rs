//! Transcription fetching
//!
//! A `TranscriptionFetcher` turns a call identifier into transcription text.
//! Two HTTP providers share the same contract:
//! - Ringover (bearer-authenticated, production)
//! - a public placeholder API (unauthenticated, for demos and smoke tests)

mod backend;
mod http;
mod provider;

pub use backend::{TranscriptionFetcher, TranscriptionFetcherFactory};
pub use http::HttpTranscriptionFetcher;
pub use provider::ProviderProfile;
