use std::collections::{HashMap, VecDeque};
use std::sync::RwLock;

use tracing::{debug, warn};

use crate::llm_client::ChatModel;
use crate::screening::summarizer::{is_error_summary, summarize_jd};

/// Entry cap used by [`SummaryCache::new`].
pub const DEFAULT_CAPACITY: usize = 256;

/// Job summaries keyed by the job-description text.
///
/// Owned by the application state and handed by reference to every
/// orchestration routine. Placeholder summaries from failed model calls are
/// never stored, so the next request tries the model again.
///
/// Holds at most `capacity` entries; inserting past the cap evicts the
/// oldest entry first. A poisoned lock is logged and treated as a miss.
#[derive(Debug)]
pub struct SummaryCache {
    capacity: usize,
    entries: RwLock<Entries>,
}

#[derive(Debug, Default)]
struct Entries {
    summaries: HashMap<String, String>,
    order: VecDeque<String>,
}

impl Default for SummaryCache {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl SummaryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// A cache holding at most `capacity` summaries (at least one).
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            entries: RwLock::new(Entries::default()),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn get(&self, jd_text: &str) -> Option<String> {
        match self.entries.read() {
            Ok(entries) => entries.summaries.get(jd_text).cloned(),
            Err(_) => {
                warn!("Summary cache lock poisoned; treating lookup as a miss");
                None
            }
        }
    }

    /// Stores a summary. Returns false (and stores nothing) for error placeholders.
    pub fn insert(&self, jd_text: &str, summary: &str) -> bool {
        if is_error_summary(summary) {
            return false;
        }
        let mut entries = match self.entries.write() {
            Ok(entries) => entries,
            Err(_) => {
                warn!("Summary cache lock poisoned; summary not stored");
                return false;
            }
        };

        let previous = entries
            .summaries
            .insert(jd_text.to_string(), summary.to_string());
        if previous.is_none() {
            entries.order.push_back(jd_text.to_string());
        }
        while entries.order.len() > self.capacity {
            if let Some(oldest) = entries.order.pop_front() {
                entries.summaries.remove(&oldest);
                debug!("Evicted summary for {} chars of JD", oldest.len());
            }
        }
        true
    }

    pub fn entry_count(&self) -> usize {
        match self.entries.read() {
            Ok(entries) => entries.summaries.len(),
            Err(_) => {
                warn!("Summary cache lock poisoned; reporting it as empty");
                0
            }
        }
    }

    /// Cached summary for `jd_text`, asking the model only on a miss.
    pub async fn get_or_summarize(&self, jd_text: &str, chat: &dyn ChatModel) -> String {
        if let Some(summary) = self.get(jd_text) {
            debug!("Summary cache hit ({} chars of JD)", jd_text.len());
            return summary;
        }
        let summary = summarize_jd(jd_text, chat).await;
        self.insert(jd_text, &summary);
        summary
    }
}
