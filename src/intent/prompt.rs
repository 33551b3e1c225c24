pub const SYSTEM_PROMPT: &str =
    "You are an expert in analyzing call center transcriptions to find customer intent.";

pub fn build_user_prompt(transcription: &str) -> String {
    format!(
        "Analyze the following call transcription and identify the primary intent of the customer. \
         Summarize the intent in a few words. Transcription: \"{}\"",
        transcription
    )
}
