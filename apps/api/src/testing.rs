//! In-memory stand-ins for the external services, shared by unit tests.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use lettre::Address;

use crate::embedding::Embedder;
use crate::errors::AppError;
use crate::llm_client::{ChatModel, LlmError};
use crate::notify::{Mailer, NotifyError, OutgoingEmail, SenderCredentials};

const DIMS: usize = 256;

/// Three-page résumé: name and email on page 1, a blank page 2, skills on page 3.
pub const RESUME_PDF: &[u8] = include_bytes!("screening/fixtures/resume.pdf");

/// Bag-of-words embedder: each lowercase word bumps one hashed bucket.
/// Identical texts embed identically; texts with no shared words are
/// (almost always) orthogonal.
#[derive(Default)]
pub struct KeywordEmbedder;

impl Embedder for KeywordEmbedder {
    fn embed(&self, text: &str) -> Result<Vec<f32>, AppError> {
        let mut vector = vec![0.0_f32; DIMS];
        for word in text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
        {
            let mut hasher = DefaultHasher::new();
            word.to_lowercase().hash(&mut hasher);
            vector[(hasher.finish() % DIMS as u64) as usize] += 1.0;
        }
        Ok(vector)
    }
}

/// Chat model that echoes a canned summary and counts calls.
pub struct FakeChat {
    reply: Option<String>,
    calls: AtomicUsize,
}

impl FakeChat {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            reply: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChatModel for FakeChat {
    async fn chat(&self, _system: &str, prompt: &str) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.reply {
            // Keep the job text in the reply so per-job summaries differ.
            Some(reply) => Ok(format!("{reply}\n{}", prompt_body(prompt))),
            None => Err(LlmError::Api {
                status: 503,
                message: "connection refused".to_string(),
            }),
        }
    }

    fn model(&self) -> &str {
        "fake"
    }
}

fn prompt_body(prompt: &str) -> &str {
    prompt.split_once("\n\n").map(|(_, body)| body).unwrap_or(prompt)
}

/// Mailer that records what it was asked to send.
#[derive(Default)]
pub struct RecordingMailer {
    fail: bool,
    sent: Mutex<Vec<OutgoingEmail>>,
}

impl RecordingMailer {
    pub fn failing() -> Self {
        Self {
            fail: true,
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn sent(&self) -> Vec<OutgoingEmail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(
        &self,
        email: &OutgoingEmail,
        _sender: &SenderCredentials,
    ) -> Result<(), NotifyError> {
        if self.fail {
            let err = "not-an-address".parse::<Address>().unwrap_err();
            return Err(NotifyError::Address(err));
        }
        self.sent.lock().unwrap().push(email.clone());
        Ok(())
    }
}
