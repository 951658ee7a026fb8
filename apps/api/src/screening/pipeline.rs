//! Screening pipeline — sequences the screening steps over a bounded worker pool.
//!
//! Flow: summarize job(s) → parse résumés → score + persist → shortlist →
//!       schedule interviews → (optional) batch match every résumé against every job.
//!
//! Each step fans out one task per item, runs at most `workers` of them at a
//! time, and joins before the next step. Results keep input order. The first
//! failing task fails the whole step; nothing is cancelled or retried.

use std::sync::Arc;

use bytes::Bytes;
use chrono::NaiveDate;
use futures_util::stream::{self, StreamExt, TryStreamExt};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use tracing::{info, warn};

use crate::embedding::Embedder;
use crate::errors::AppError;
use crate::llm_client::ChatModel;
use crate::notify::{invitation, send_email, Mailer, SenderCredentials};
use crate::screening::cache::SummaryCache;
use crate::screening::candidate::{Candidate, EmailSource, ScoredCandidate};
use crate::screening::cv_parser::parse_pdf;
use crate::screening::jobs::{select_job, JobDescription};
use crate::screening::matcher::calculate_match;
use crate::screening::scheduler::{schedule_interviews, InterviewSlot};
use crate::screening::shortlist::shortlist;
use crate::screening::store::save_candidate;

pub const RESUME_PREVIEW_CHARS: usize = 1000;
pub const SUMMARY_PREVIEW_CHARS: usize = 100;

pub const EMAIL_DELIVERY_NOTE: &str =
    "📬 Email sent! If it doesn't appear in the inbox, please check the Spam or Promotions tab.";

// ────────────────────────────────────────────────────────────────────────────
// Inputs
// ────────────────────────────────────────────────────────────────────────────

/// An uploaded résumé, not yet parsed.
#[derive(Debug, Clone)]
pub struct ResumeUpload {
    pub file_name: String,
    pub bytes: Bytes,
}

/// Where the job description(s) came from.
#[derive(Debug, Clone)]
pub enum JobSource {
    /// CSV of title/description rows. Every row is summarized.
    Csv(Vec<JobDescription>),
    /// A single plain-text description.
    Text(JobDescription),
}

/// User-tunable knobs for one screening run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreeningParams {
    /// Minimum score (0–100) to be shortlisted.
    pub threshold: f64,
    /// Only the first `max_files` résumés are processed (10–200).
    pub max_files: usize,
    /// Shortlist length cap (1–100).
    pub max_shortlist: usize,
    /// Also score every résumé against every job (CSV uploads only).
    pub batch_match: bool,
}

impl Default for ScreeningParams {
    fn default() -> Self {
        Self {
            threshold: 50.0,
            max_files: 50,
            max_shortlist: 10,
            batch_match: false,
        }
    }
}

impl ScreeningParams {
    pub fn validate(&self) -> Result<(), AppError> {
        if !(0.0..=100.0).contains(&self.threshold) {
            return Err(AppError::Validation(
                "threshold must be between 0 and 100".to_string(),
            ));
        }
        if !(10..=200).contains(&self.max_files) {
            return Err(AppError::Validation(
                "max_files must be between 10 and 200".to_string(),
            ));
        }
        if !(1..=100).contains(&self.max_shortlist) {
            return Err(AppError::Validation(
                "max_shortlist must be between 1 and 100".to_string(),
            ));
        }
        Ok(())
    }
}

/// A shortlisted candidate to notify.
#[derive(Debug, Clone, Deserialize)]
pub struct Recipient {
    pub name: String,
    pub email: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Outputs
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobSummary {
    pub title: String,
    pub summary: String,
    pub preview: String,
}

/// One résumé/job pair from a batch run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchMatch {
    pub name: String,
    pub job_title: String,
    pub score: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CandidateOverview {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub email_source: EmailSource,
    pub score: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ShortlistEntry {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub score: f64,
    pub resume_preview: String,
    pub interview: InterviewSlot,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScreeningReport {
    pub job_title: String,
    pub job_summary: String,
    pub candidates: Vec<CandidateOverview>,
    pub shortlisted: Vec<ShortlistEntry>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub batch_matches: Option<Vec<BatchMatch>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub batch_message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmailOutcome {
    pub email: String,
    pub result: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Pipeline
// ────────────────────────────────────────────────────────────────────────────

/// Everything a screening run needs, borrowed from the application state.
pub struct ScreeningContext<'a> {
    pub chat: &'a dyn ChatModel,
    pub embedder: &'a Arc<dyn Embedder>,
    pub pool: &'a SqlitePool,
    pub cache: &'a SummaryCache,
    pub workers: usize,
}

impl ScreeningContext<'_> {
    fn workers(&self) -> usize {
        self.workers.max(1)
    }

    /// Summarizes every job, one model call per cache miss.
    pub async fn summarize_jobs(&self, jobs: &[JobDescription]) -> Vec<JobSummary> {
        let summaries: Vec<JobSummary> = stream::iter(jobs)
            .map(|job| async move {
                let summary = self.cache.get_or_summarize(&job.text, self.chat).await;
                JobSummary {
                    title: job.display_title().to_string(),
                    preview: preview(&summary, SUMMARY_PREVIEW_CHARS),
                    summary,
                }
            })
            .buffered(self.workers())
            .collect()
            .await;

        info!(
            "Summarized {} job description(s); cache holds {}",
            summaries.len(),
            self.cache.entry_count()
        );
        summaries
    }

    /// Parses up to `max_files` résumés and extracts each candidate's email.
    pub async fn process_resumes(
        &self,
        uploads: Vec<ResumeUpload>,
        max_files: usize,
    ) -> Result<Vec<Candidate>, AppError> {
        let candidates: Vec<Candidate> = stream::iter(uploads.into_iter().take(max_files))
            .map(|upload| async move {
                let ResumeUpload { file_name, bytes } = upload;
                let text = tokio::task::spawn_blocking(move || parse_pdf(&bytes)).await??;
                let candidate = Candidate::from_resume(&file_name, text);
                match candidate.email_source {
                    EmailSource::Resume => {
                        info!("Found email for {}: {}", candidate.name, candidate.email)
                    }
                    EmailSource::Fallback => warn!(
                        "Email not found for {}, using fallback: {}",
                        candidate.name, candidate.email
                    ),
                }
                Ok::<_, AppError>(candidate)
            })
            .buffered(self.workers())
            .try_collect()
            .await?;

        info!("Processed {} résumé(s)", candidates.len());
        Ok(candidates)
    }

    /// Scores every candidate against one job summary and stores each result.
    pub async fn score_candidates(
        &self,
        jd_summary: &str,
        candidates: Vec<Candidate>,
    ) -> Result<Vec<ScoredCandidate>, AppError> {
        stream::iter(candidates)
            .map(|candidate| async move {
                let score = self.match_score(jd_summary, &candidate.resume).await?;
                let row = save_candidate(self.pool, &candidate.name, score, &candidate.resume)
                    .await?;
                Ok::<_, AppError>(ScoredCandidate {
                    id: row.id,
                    candidate,
                    score,
                })
            })
            .buffered(self.workers())
            .try_collect()
            .await
    }

    /// Scores every résumé against every job summary. Results are not persisted.
    pub async fn batch_match(
        &self,
        candidates: &[Candidate],
        summaries: &[JobSummary],
    ) -> Result<Vec<BatchMatch>, AppError> {
        let resumes = resumes_by_name(candidates);
        let pairs: Vec<(&str, &str, &str, &str)> = summaries
            .iter()
            .flat_map(|job| {
                resumes.iter().map(move |(name, resume)| {
                    (*name, *resume, job.title.as_str(), job.summary.as_str())
                })
            })
            .collect();

        info!("Batch matching {} résumé/job pair(s)", pairs.len());

        stream::iter(pairs)
            .map(|(name, resume, job_title, summary)| async move {
                let score = self.match_score(summary, resume).await?;
                Ok::<_, AppError>(BatchMatch {
                    name: name.to_string(),
                    job_title: job_title.to_string(),
                    score,
                })
            })
            .buffered(self.workers())
            .try_collect()
            .await
    }

    async fn match_score(&self, jd_summary: &str, resume: &str) -> Result<f64, AppError> {
        let embedder = Arc::clone(self.embedder);
        let (jd_summary, resume) = (jd_summary.to_string(), resume.to_string());
        tokio::task::spawn_blocking(move || calculate_match(embedder.as_ref(), &jd_summary, &resume))
            .await?
    }

    /// Full screening run for one selected job.
    pub async fn run(
        &self,
        source: JobSource,
        job_title: Option<&str>,
        uploads: Vec<ResumeUpload>,
        params: ScreeningParams,
        today: NaiveDate,
    ) -> Result<ScreeningReport, AppError> {
        params.validate()?;
        if uploads.is_empty() {
            return Err(AppError::Validation(
                "Upload at least one résumé PDF".to_string(),
            ));
        }

        let (job, summaries) = match &source {
            JobSource::Csv(jobs) => {
                let job = select_job(jobs, job_title)?.clone();
                (job, self.summarize_jobs(jobs).await)
            }
            JobSource::Text(job) => {
                let summaries = self.summarize_jobs(std::slice::from_ref(job)).await;
                (job.clone(), summaries)
            }
        };
        let job_summary = summaries
            .iter()
            .find(|s| s.title == job.display_title())
            .map(|s| s.summary.clone())
            .unwrap_or_default();

        let candidates = self.process_resumes(uploads, params.max_files).await?;
        let scored = self.score_candidates(&job_summary, candidates.clone()).await?;

        let overview = scored
            .iter()
            .map(|s| CandidateOverview {
                id: s.id,
                name: s.candidate.name.clone(),
                email: s.candidate.email.clone(),
                email_source: s.candidate.email_source,
                score: s.score,
            })
            .collect();

        let top = shortlist(scored, params.threshold, params.max_shortlist);
        let names: Vec<&str> = top.iter().map(|s| s.candidate.name.as_str()).collect();
        let slots = schedule_interviews(&names, today);
        let shortlisted: Vec<ShortlistEntry> = top
            .iter()
            .zip(slots)
            .map(|(s, interview)| ShortlistEntry {
                id: s.id,
                name: s.candidate.name.clone(),
                email: s.candidate.email.clone(),
                score: s.score,
                resume_preview: preview(&s.candidate.resume, RESUME_PREVIEW_CHARS),
                interview,
            })
            .collect();

        let message = if shortlisted.is_empty() {
            "⚠️ No candidates passed the threshold.".to_string()
        } else {
            format!("✅ {} candidate(s) shortlisted!", shortlisted.len())
        };
        info!("{} for {}", message, job.display_title());

        let (batch_matches, batch_message) = match (&source, params.batch_match) {
            (JobSource::Csv(_), true) => {
                let matches = self.batch_match(&candidates, &summaries).await?;
                let matches = shortlist(matches, params.threshold, params.max_shortlist);
                let note = if matches.is_empty() {
                    "⚠️ No candidates matched any job description."
                } else {
                    "✅ Batch Matching Complete"
                };
                (Some(matches), Some(note.to_string()))
            }
            (JobSource::Text(_), true) => (
                None,
                Some("Batch matching needs a CSV of job descriptions.".to_string()),
            ),
            (_, false) => (None, None),
        };

        Ok(ScreeningReport {
            job_title: job.display_title().to_string(),
            job_summary,
            candidates: overview,
            shortlisted,
            message,
            batch_matches,
            batch_message,
        })
    }
}

/// Sends one invitation per recipient, one SMTP session each, in order.
pub async fn notify_shortlisted(
    mailer: &dyn Mailer,
    sender: &SenderCredentials,
    recipients: &[Recipient],
) -> Result<Vec<EmailOutcome>, AppError> {
    if sender.email.trim().is_empty() || sender.password.is_empty() {
        return Err(AppError::Validation(
            "Sender email and app password are required to send emails".to_string(),
        ));
    }

    let mut outcomes = Vec::with_capacity(recipients.len());
    for recipient in recipients {
        let email = invitation(&recipient.name, &recipient.email);
        let result = send_email(mailer, &email, sender).await;
        outcomes.push(EmailOutcome {
            email: recipient.email.clone(),
            result,
        });
    }
    Ok(outcomes)
}

/// One résumé per candidate name; a later upload with the same name replaces
/// the earlier text but keeps its position.
fn resumes_by_name(candidates: &[Candidate]) -> Vec<(&str, &str)> {
    let mut resumes: Vec<(&str, &str)> = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        match resumes
            .iter_mut()
            .find(|(name, _)| *name == candidate.name)
        {
            Some(entry) => entry.1 = &candidate.resume,
            None => resumes.push((&candidate.name, &candidate.resume)),
        }
    }
    resumes
}

fn preview(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_pool, init_schema};
    use crate::notify::SENT_OK;
    use crate::screening::jobs::parse_job_csv;
    use crate::testing::{FakeChat, KeywordEmbedder, RecordingMailer, RESUME_PDF};

    struct Harness {
        _dir: tempfile::TempDir,
        pool: SqlitePool,
        chat: FakeChat,
        embedder: Arc<dyn Embedder>,
        cache: SummaryCache,
    }

    impl Harness {
        async fn new() -> Self {
            let dir = tempfile::tempdir().unwrap();
            let url = format!("sqlite://{}", dir.path().join("screening.db").display());
            let pool = create_pool(&url).await.unwrap();
            init_schema(&pool).await.unwrap();
            Self {
                _dir: dir,
                pool,
                chat: FakeChat::replying("Summary:"),
                embedder: Arc::new(KeywordEmbedder),
                cache: SummaryCache::new(),
            }
        }

        fn context(&self) -> ScreeningContext<'_> {
            ScreeningContext {
                chat: &self.chat,
                embedder: &self.embedder,
                pool: &self.pool,
                cache: &self.cache,
                workers: 4,
            }
        }
    }

    fn candidate(name: &str, resume: &str) -> Candidate {
        Candidate::from_resume(&format!("{name}.pdf"), resume.to_string())
    }

    /// `count` copies of the fixture résumé named jane-1.pdf, jane-2.pdf, ...
    fn uploads(count: usize) -> Vec<ResumeUpload> {
        (1..=count)
            .map(|i| ResumeUpload {
                file_name: format!("jane-{i}.pdf"),
                bytes: Bytes::from_static(RESUME_PDF),
            })
            .collect()
    }

    // Monday 2024-03-04
    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 4).unwrap()
    }

    #[test]
    fn test_default_params_are_valid() {
        assert!(ScreeningParams::default().validate().is_ok());
    }

    #[test]
    fn test_out_of_range_params_are_rejected() {
        let base = ScreeningParams::default();
        for params in [
            ScreeningParams {
                threshold: 101.0,
                ..base
            },
            ScreeningParams {
                max_files: 5,
                ..base
            },
            ScreeningParams {
                max_shortlist: 0,
                ..base
            },
        ] {
            assert!(matches!(params.validate(), Err(AppError::Validation(_))));
        }
    }

    #[test]
    fn test_preview_counts_characters_not_bytes() {
        assert_eq!(preview("héllo wörld", 5), "héllo");
        assert_eq!(preview("short", 100), "short");
    }

    #[test]
    fn test_duplicate_names_keep_last_resume_in_first_position() {
        let candidates = vec![
            candidate("a", "old"),
            candidate("b", "bee"),
            candidate("a", "new"),
        ];
        assert_eq!(resumes_by_name(&candidates), vec![("a", "new"), ("b", "bee")]);
    }

    #[tokio::test]
    async fn test_summaries_keep_input_order_and_use_cache() {
        let harness = Harness::new().await;
        let jobs = parse_job_csv(
            b"Job Title,Job Description\nEngineer,Rust services\nAnalyst,SQL reports\nEngineer 2,Rust services\n",
        )
        .unwrap();

        let summaries = harness.context().summarize_jobs(&jobs).await;

        let titles: Vec<&str> = summaries.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["Engineer", "Analyst", "Engineer 2"]);
        assert!(summaries[0].summary.contains("Rust services"));
        assert!(summaries[0].preview.len() <= summaries[0].summary.len());

        harness.context().summarize_jobs(&jobs).await;
        // Identical job text is summarized at most twice (concurrent first misses)
        // and never again once cached.
        assert!(harness.chat.calls() <= 3, "calls: {}", harness.chat.calls());
        assert_eq!(harness.cache.entry_count(), 2);
    }

    #[tokio::test]
    async fn test_scoring_persists_every_candidate_in_order() {
        let harness = Harness::new().await;
        let candidates = vec![
            candidate("rustacean", "rust tokio axum services"),
            candidate("baker", "sourdough bread pastry"),
        ];

        let scored = harness
            .context()
            .score_candidates("rust tokio axum services", candidates)
            .await
            .unwrap();

        assert_eq!(scored[0].candidate.name, "rustacean");
        assert_eq!(scored[0].score, 100.0);
        assert!(scored[1].score < 50.0);

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM candidates")
            .fetch_one(&harness.pool)
            .await
            .unwrap();
        assert_eq!(count, 2);
    }

    #[tokio::test]
    async fn test_unreadable_pdf_fails_the_step() {
        let harness = Harness::new().await;
        let uploads = vec![ResumeUpload {
            file_name: "broken.pdf".to_string(),
            bytes: Bytes::from_static(b"not a pdf"),
        }];
        let result = harness.context().process_resumes(uploads, 50).await;
        assert!(matches!(result, Err(AppError::Pdf(_))));
    }

    #[tokio::test]
    async fn test_process_resumes_respects_max_files() {
        let harness = Harness::new().await;

        let candidates = harness
            .context()
            .process_resumes(uploads(12), 10)
            .await
            .unwrap();

        let names: Vec<&str> = candidates.iter().map(|c| c.name.as_str()).collect();
        let expected: Vec<String> = (1..=10).map(|i| format!("jane-{i}")).collect();
        assert_eq!(names, expected);
        assert!(candidates.iter().all(|c| c.email == "jane.doe@example.org"));
        assert!(candidates.iter().all(|c| c.email_source == EmailSource::Resume));
    }

    #[tokio::test]
    async fn test_batch_match_covers_every_pair() {
        let harness = Harness::new().await;
        let candidates = vec![
            candidate("rustacean", "rust tokio"),
            candidate("analyst", "sql dashboards"),
        ];
        let summaries = vec![
            JobSummary {
                title: "Engineer".to_string(),
                summary: "rust tokio".to_string(),
                preview: String::new(),
            },
            JobSummary {
                title: "Analyst".to_string(),
                summary: "sql dashboards".to_string(),
                preview: String::new(),
            },
        ];

        let matches = harness
            .context()
            .batch_match(&candidates, &summaries)
            .await
            .unwrap();

        assert_eq!(matches.len(), 4);
        assert_eq!(matches[0].name, "rustacean");
        assert_eq!(matches[0].job_title, "Engineer");
        assert_eq!(matches[0].score, 100.0);
        assert_eq!(matches[3].name, "analyst");
        assert_eq!(matches[3].job_title, "Analyst");
        assert_eq!(matches[3].score, 100.0);

        let best = shortlist(matches, 90.0, 10);
        assert_eq!(best.len(), 2);
    }

    #[tokio::test]
    async fn test_run_requires_resumes() {
        let harness = Harness::new().await;
        let job = JobDescription {
            title: None,
            text: "Rust engineer".to_string(),
        };
        let result = harness
            .context()
            .run(
                JobSource::Text(job),
                None,
                Vec::new(),
                ScreeningParams::default(),
                monday(),
            )
            .await;
        assert!(matches!(result, Err(AppError::Validation(_))));
        assert_eq!(harness.chat.calls(), 0);
    }

    #[tokio::test]
    async fn test_run_with_csv_selects_job_and_batch_matches() {
        let harness = Harness::new().await;
        let jobs = parse_job_csv(
            b"Job Title,Job Description\nEngineer,Rust Tokio Axum services\nAnalyst,SQL reports and dashboards\n",
        )
        .unwrap();
        let params = ScreeningParams {
            threshold: 0.0,
            max_shortlist: 2,
            batch_match: true,
            ..ScreeningParams::default()
        };

        let report = harness
            .context()
            .run(JobSource::Csv(jobs), Some("Analyst"), uploads(3), params, monday())
            .await
            .unwrap();

        assert_eq!(report.job_title, "Analyst");
        assert!(report.job_summary.contains("SQL reports"), "{}", report.job_summary);
        assert!(!report.job_summary.contains("Tokio"));
        assert_eq!(harness.chat.calls(), 2);

        assert_eq!(report.candidates.len(), 3);
        assert_eq!(report.shortlisted.len(), 2);
        assert_eq!(report.message, "✅ 2 candidate(s) shortlisted!");

        let resume = parse_pdf(RESUME_PDF).unwrap();
        let expected_preview: String = resume.chars().take(RESUME_PREVIEW_CHARS).collect();
        let tuesday = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        for (entry, hour) in report.shortlisted.iter().zip([10, 14]) {
            assert_eq!(entry.interview.candidate, entry.name);
            assert_eq!(entry.interview.starts_at, tuesday.and_hms_opt(hour, 0, 0).unwrap());
            assert_eq!(entry.resume_preview, expected_preview);
            assert!(entry.resume_preview.chars().count() <= RESUME_PREVIEW_CHARS);
        }
        // Equal scores keep upload order.
        assert_eq!(report.shortlisted[0].name, "jane-1");
        assert_eq!(report.shortlisted[1].name, "jane-2");

        let matches = report.batch_matches.unwrap();
        assert_eq!(matches.len(), 2);
        assert!(matches.windows(2).all(|w| w[0].score >= w[1].score));
        assert_eq!(report.batch_message.as_deref(), Some("✅ Batch Matching Complete"));
    }

    #[tokio::test]
    async fn test_run_with_text_reports_empty_shortlist() {
        let harness = Harness::new().await;
        let job = JobDescription {
            title: None,
            text: "Pastry chef for a sourdough bakery".to_string(),
        };
        let params = ScreeningParams {
            threshold: 100.0,
            batch_match: true,
            ..ScreeningParams::default()
        };

        let report = harness
            .context()
            .run(JobSource::Text(job), None, uploads(2), params, monday())
            .await
            .unwrap();

        assert_eq!(report.job_title, "Uploaded job description");
        assert!(report.job_summary.contains("sourdough bakery"));
        assert_eq!(report.candidates.len(), 2);
        assert!(report.candidates.iter().all(|c| c.score < 100.0));
        assert!(report.shortlisted.is_empty());
        assert_eq!(report.message, "⚠️ No candidates passed the threshold.");
        assert!(report.batch_matches.is_none());
        assert_eq!(
            report.batch_message.as_deref(),
            Some("Batch matching needs a CSV of job descriptions.")
        );
    }

    #[tokio::test]
    async fn test_run_without_batch_match_has_no_batch_section() {
        let harness = Harness::new().await;
        let jobs = parse_job_csv(b"Job Title,Job Description\nEngineer,Rust Tokio Axum services\n")
            .unwrap();

        let report = harness
            .context()
            .run(JobSource::Csv(jobs), None, uploads(1), ScreeningParams::default(), monday())
            .await
            .unwrap();

        assert_eq!(report.job_title, "Engineer");
        assert!(report.batch_matches.is_none());
        assert!(report.batch_message.is_none());
    }

    #[tokio::test]
    async fn test_notify_reports_each_recipient() {
        let mailer = RecordingMailer::default();
        let sender = SenderCredentials {
            email: "hr@acme.test".to_string(),
            password: "secret".to_string(),
        };
        let recipients = vec![
            Recipient {
                name: "Jane".to_string(),
                email: "jane@example.com".to_string(),
            },
            Recipient {
                name: "Bob".to_string(),
                email: "bob@example.com".to_string(),
            },
        ];

        let outcomes = notify_shortlisted(&mailer, &sender, &recipients)
            .await
            .unwrap();

        assert_eq!(outcomes.len(), 2);
        assert!(outcomes.iter().all(|o| o.result == SENT_OK));
        let sent = mailer.sent();
        assert_eq!(sent[0].to, "jane@example.com");
        assert!(sent[1].body.starts_with("Hi Bob,"));
    }

    #[tokio::test]
    async fn test_notify_requires_credentials() {
        let mailer = RecordingMailer::default();
        let sender = SenderCredentials {
            email: String::new(),
            password: "secret".to_string(),
        };
        let result = notify_shortlisted(&mailer, &sender, &[]).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }
}
