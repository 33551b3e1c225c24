//! Customer-intent extraction from call transcriptions

mod classifier;
mod prompt;

pub use classifier::{IntentClassifier, IntentSettings, NO_INTENT_IDENTIFIED};
pub use prompt::{build_user_prompt, SYSTEM_PROMPT};
