use std::cmp::Ordering;

use crate::screening::candidate::ScoredCandidate;
use crate::screening::pipeline::BatchMatch;

/// Anything that carries a 0–100 match score.
pub trait Scored {
    fn score(&self) -> f64;
}

impl Scored for ScoredCandidate {
    fn score(&self) -> f64 {
        self.score
    }
}

impl Scored for BatchMatch {
    fn score(&self) -> f64 {
        self.score
    }
}

/// Keeps items with `score >= threshold`, best first, at most `max` of them.
/// Ties keep their input order.
pub fn shortlist<T: Scored>(items: Vec<T>, threshold: f64, max: usize) -> Vec<T> {
    let mut passing: Vec<T> = items
        .into_iter()
        .filter(|item| item.score() >= threshold)
        .collect();
    passing.sort_by(|a, b| b.score().partial_cmp(&a.score()).unwrap_or(Ordering::Equal));
    passing.truncate(max);
    passing
}
