//! Job-description summarizer — one chat round trip per job.
//!
//! Failures never abort the pipeline: they come back as a visible
//! placeholder string that starts with `SUMMARY_ERROR_PREFIX`.

use std::time::Instant;

use tracing::{info, warn};

use crate::llm_client::ChatModel;
use crate::screening::prompts::{JD_SUMMARY_PROMPT_TEMPLATE, JD_SUMMARY_SYSTEM};

pub const SUMMARY_ERROR_PREFIX: &str = "⚠️ Error summarizing JD:";

pub async fn summarize_jd(jd_text: &str, chat: &dyn ChatModel) -> String {
    let prompt = JD_SUMMARY_PROMPT_TEMPLATE.replace("{jd_text}", jd_text.trim());
    info!("Sending summarization prompt to {}", chat.model());

    let start = Instant::now();
    match chat.chat(JD_SUMMARY_SYSTEM, &prompt).await {
        Ok(text) => {
            info!(
                "Got summary in {:.2} seconds",
                start.elapsed().as_secs_f64()
            );
            text.trim().to_string()
        }
        Err(e) => {
            warn!("Summarization via {} failed: {e}", chat.model());
            format!("{SUMMARY_ERROR_PREFIX} {e}")
        }
    }
}

/// True for the placeholder returned when the model call failed.
pub fn is_error_summary(summary: &str) -> bool {
    summary.starts_with(SUMMARY_ERROR_PREFIX)
}
