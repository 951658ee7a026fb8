use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

const EMAIL_PATTERN: &str = r"[a-zA-Z0-9_.+-]+@[a-zA-Z0-9-]+\.[a-zA-Z0-9-.]+";
const FALLBACK_EMAIL_DOMAIN: &str = "example.com";
const PDF_SUFFIX: &str = ".pdf";

/// Where a candidate's email address came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmailSource {
    Resume,
    Fallback,
}

/// A parsed résumé, before scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub name: String,
    pub resume: String,
    pub email: String,
    pub email_source: EmailSource,
}

impl Candidate {
    pub fn from_resume(file_name: &str, resume: String) -> Self {
        let name = candidate_name(file_name);
        let (email, email_source) = extract_email(&resume, &name);
        Self {
            name,
            resume,
            email,
            email_source,
        }
    }
}

/// A candidate with its match score against the selected job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredCandidate {
    pub id: i64,
    #[serde(flatten)]
    pub candidate: Candidate,
    pub score: f64,
}

/// Candidate name is the upload's file name without its `.pdf` suffix (any case).
pub fn candidate_name(file_name: &str) -> String {
    let name = file_name.trim();
    let split = name.len().saturating_sub(PDF_SUFFIX.len());
    match name.get(split..) {
        Some(suffix) if suffix.eq_ignore_ascii_case(PDF_SUFFIX) => name[..split].to_string(),
        _ => name.to_string(),
    }
}

/// First email-looking address in the résumé text, or `{name}@example.com`.
pub fn extract_email(text: &str, name: &str) -> (String, EmailSource) {
    match email_regex().find(text) {
        Some(found) => (found.as_str().to_string(), EmailSource::Resume),
        None => (
            format!("{}@{FALLBACK_EMAIL_DOMAIN}", name.to_lowercase()),
            EmailSource::Fallback,
        ),
    }
}

fn email_regex() -> &'static Regex {
    static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
    EMAIL_RE.get_or_init(|| Regex::new(EMAIL_PATTERN).expect("email pattern is valid"))
}
