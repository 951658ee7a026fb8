//! Job-description intake: a CSV of title/description pairs or a single
//! plain-text description.

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

pub const TITLE_COLUMN: &str = "Job Title";
pub const DESCRIPTION_COLUMN: &str = "Job Description";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobDescription {
    pub title: Option<String>,
    pub text: String,
}

impl JobDescription {
    /// Title for display; untitled uploads are labelled generically.
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("Uploaded job description")
    }
}

/// Decodes upload bytes as UTF-8, falling back to ISO-8859-1.
/// Every byte is a valid ISO-8859-1 code point, so the fallback cannot fail.
pub fn decode_text(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => bytes.iter().map(|&b| char::from(b)).collect(),
    }
}

/// Parses a CSV upload. Requires `Job Title` and `Job Description` columns.
pub fn parse_job_csv(bytes: &[u8]) -> Result<Vec<JobDescription>, AppError> {
    let text = decode_text(bytes);
    let text = text.strip_prefix('\u{feff}').unwrap_or(text.as_str());

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| AppError::Validation(format!("Could not read CSV header: {e}")))?
        .clone();
    let column = |name: &str| headers.iter().position(|h| h.trim() == name);
    let (title_idx, description_idx) = match (column(TITLE_COLUMN), column(DESCRIPTION_COLUMN)) {
        (Some(t), Some(d)) => (t, d),
        _ => {
            return Err(AppError::Validation(format!(
                "CSV must contain '{TITLE_COLUMN}' and '{DESCRIPTION_COLUMN}' columns."
            )))
        }
    };

    let mut jobs = Vec::new();
    for record in reader.records() {
        let record =
            record.map_err(|e| AppError::Validation(format!("Malformed CSV row: {e}")))?;
        let title = record.get(title_idx).unwrap_or_default().trim();
        let description = record.get(description_idx).unwrap_or_default();
        if title.is_empty() && description.trim().is_empty() {
            continue;
        }
        jobs.push(JobDescription {
            title: Some(title.to_string()),
            text: description.to_string(),
        });
    }

    if jobs.is_empty() {
        return Err(AppError::Validation(
            "CSV contains no job descriptions".to_string(),
        ));
    }
    Ok(jobs)
}

/// Parses a plain-text upload into one untitled job description.
pub fn parse_job_text(bytes: &[u8]) -> Result<JobDescription, AppError> {
    let text = std::str::from_utf8(bytes)
        .map_err(|_| AppError::Validation("Job description must be UTF-8 text".to_string()))?;
    if text.trim().is_empty() {
        return Err(AppError::Validation(
            "Job description cannot be empty".to_string(),
        ));
    }
    Ok(JobDescription {
        title: None,
        text: text.to_string(),
    })
}

/// Picks a job by exact title, or the first one when no title is given.
pub fn select_job<'a>(
    jobs: &'a [JobDescription],
    title: Option<&str>,
) -> Result<&'a JobDescription, AppError> {
    match title.map(str::trim).filter(|t| !t.is_empty()) {
        Some(title) => jobs
            .iter()
            .find(|job| job.title.as_deref() == Some(title))
            .ok_or_else(|| AppError::NotFound(format!("Job title '{title}' not found"))),
        None => jobs
            .first()
            .ok_or_else(|| AppError::Validation("No job descriptions uploaded".to_string())),
    }
}
