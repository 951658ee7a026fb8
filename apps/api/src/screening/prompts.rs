// Prompt constants for job-description summarization.

/// System prompt for summarization. The model must return the summary only.
pub const JD_SUMMARY_SYSTEM: &str =
    "You are an expert technical recruiter. Return only the summary.";

/// Summarization prompt template. Replace `{jd_text}` before sending.
pub const JD_SUMMARY_PROMPT_TEMPLATE: &str =
    "Summarize the following job description in 4–5 concise bullet points:\n\n{jd_text}";
