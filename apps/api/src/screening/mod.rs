// Candidate screening: job intake, summarization, résumé parsing, matching,
// shortlisting, scheduling and the HTTP handlers that drive them.

pub mod cache;
pub mod candidate;
pub mod cv_parser;
pub mod handlers;
pub mod jobs;
pub mod matcher;
pub mod pipeline;
pub mod prompts;
pub mod scheduler;
pub mod shortlist;
pub mod store;
pub mod summarizer;
