//! Axum route handlers for the Screening API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::notify::SenderCredentials;
use crate::screening::jobs::{parse_job_csv, parse_job_text};
use crate::screening::pipeline::{
    notify_shortlisted, EmailOutcome, JobSource, JobSummary, Recipient, ResumeUpload,
    ScreeningContext, ScreeningParams, ScreeningReport, EMAIL_DELIVERY_NOTE,
};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct SummariesResponse {
    pub jobs: Vec<JobSummary>,
}

#[derive(Debug, Deserialize)]
pub struct NotifyRequest {
    pub sender_email: String,
    pub sender_password: String,
    pub candidates: Vec<Recipient>,
}

#[derive(Debug, Serialize)]
pub struct NotifyResponse {
    pub results: Vec<EmailOutcome>,
    pub note: String,
}

/// Fields collected from a multipart screening upload.
#[derive(Debug, Default)]
struct ScreeningForm {
    job_csv: Option<Bytes>,
    job_txt: Option<Bytes>,
    job_title: Option<String>,
    resumes: Vec<ResumeUpload>,
    threshold: Option<String>,
    max_files: Option<String>,
    max_shortlist: Option<String>,
    batch_match: Option<String>,
}

impl ScreeningForm {
    async fn read(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = ScreeningForm::default();
        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                "job_csv" => form.job_csv = Some(field.bytes().await?),
                "job_txt" => form.job_txt = Some(field.bytes().await?),
                "resumes" => {
                    let file_name = field
                        .file_name()
                        .map(str::to_string)
                        .unwrap_or_else(|| format!("resume-{}.pdf", form.resumes.len() + 1));
                    if !file_name.to_lowercase().ends_with(".pdf") {
                        return Err(AppError::Validation(format!(
                            "Résumé '{file_name}' is not a PDF"
                        )));
                    }
                    let bytes = field.bytes().await?;
                    form.resumes.push(ResumeUpload { file_name, bytes });
                }
                "job_title" => form.job_title = Some(field.text().await?),
                "threshold" => form.threshold = Some(field.text().await?),
                "max_files" => form.max_files = Some(field.text().await?),
                "max_shortlist" => form.max_shortlist = Some(field.text().await?),
                "batch_match" => form.batch_match = Some(field.text().await?),
                other => tracing::debug!("Ignoring unknown form field '{other}'"),
            }
        }
        Ok(form)
    }

    fn job_source(&self) -> Result<JobSource, AppError> {
        match (&self.job_csv, &self.job_txt) {
            (Some(csv), None) => Ok(JobSource::Csv(parse_job_csv(csv)?)),
            (None, Some(txt)) => Ok(JobSource::Text(parse_job_text(txt)?)),
            (Some(_), Some(_)) => Err(AppError::Validation(
                "Upload either a CSV (job_csv) or a text file (job_txt), not both".to_string(),
            )),
            (None, None) => Err(AppError::Validation(
                "Upload a job description as job_csv (.csv) or job_txt (.txt)".to_string(),
            )),
        }
    }

    fn params(&self) -> Result<ScreeningParams, AppError> {
        let defaults = ScreeningParams::default();
        let params = ScreeningParams {
            threshold: parse_field("threshold", &self.threshold, defaults.threshold)?,
            max_files: parse_field("max_files", &self.max_files, defaults.max_files)?,
            max_shortlist: parse_field("max_shortlist", &self.max_shortlist, defaults.max_shortlist)?,
            batch_match: match self.batch_match.as_deref().map(str::trim) {
                None | Some("") => defaults.batch_match,
                Some(v) => parse_flag(v)?,
            },
        };
        params.validate()?;
        Ok(params)
    }
}

fn parse_field<T: std::str::FromStr>(
    name: &str,
    raw: &Option<String>,
    default: T,
) -> Result<T, AppError> {
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(default),
        Some(value) => value
            .parse::<T>()
            .map_err(|_| AppError::Validation(format!("{name} must be a number, got '{value}'"))),
    }
}

fn parse_flag(value: &str) -> Result<bool, AppError> {
    match value.to_lowercase().as_str() {
        "true" | "1" | "on" | "yes" => Ok(true),
        "false" | "0" | "off" | "no" => Ok(false),
        _ => Err(AppError::Validation(format!(
            "batch_match must be true or false, got '{value}'"
        ))),
    }
}

fn screening_context(state: &AppState) -> ScreeningContext<'_> {
    ScreeningContext {
        chat: state.llm.as_ref(),
        embedder: &state.embedder,
        pool: &state.db,
        cache: &state.summaries,
        workers: state.config.worker_pool_size,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/jobs/summaries
///
/// Summarizes every uploaded job description. Repeat uploads are served from
/// the summary cache.
pub async fn handle_summaries(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<SummariesResponse>, AppError> {
    let form = ScreeningForm::read(multipart).await?;
    let jobs = match form.job_source()? {
        JobSource::Csv(jobs) => jobs,
        JobSource::Text(job) => vec![job],
    };

    let jobs = screening_context(&state).summarize_jobs(&jobs).await;
    Ok(Json(SummariesResponse { jobs }))
}

/// POST /api/v1/screenings
///
/// Full run: summarize → parse résumés → score + persist → shortlist →
/// schedule → optional batch matching.
pub async fn handle_screening(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ScreeningReport>, AppError> {
    let form = ScreeningForm::read(multipart).await?;
    let source = form.job_source()?;
    let params = form.params()?;
    let today = chrono::Local::now().date_naive();

    let report = screening_context(&state)
        .run(source, form.job_title.as_deref(), form.resumes, params, today)
        .await?;

    Ok(Json(report))
}

/// POST /api/v1/notifications
///
/// Emails an interview invitation to each listed candidate.
pub async fn handle_notify(
    State(state): State<AppState>,
    Json(request): Json<NotifyRequest>,
) -> Result<Json<NotifyResponse>, AppError> {
    let sender = SenderCredentials {
        email: request.sender_email,
        password: request.sender_password,
    };

    let results = notify_shortlisted(state.mailer.as_ref(), &sender, &request.candidates).await?;

    Ok(Json(NotifyResponse {
        results,
        note: EMAIL_DELIVERY_NOTE.to_string(),
    }))
}
