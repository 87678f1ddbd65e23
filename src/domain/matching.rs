//! Skill-overlap scoring used by recommendations.
//!
//! A score is the fraction of the *student's* distinct tags that a candidate
//! also declares. It is deliberately asymmetric: a candidate with many extra
//! tags is not penalised.

use std::cmp::Ordering;
use std::collections::HashSet;

pub const NO_OVERLAP_REASON: &str = "No matching skills";
const COMMON_SKILLS_PREFIX: &str = "Common skills: ";

fn normalize(tag: &str) -> Option<String> {
    let tag = tag.trim();
    if tag.is_empty() {
        None
    } else {
        Some(tag.to_lowercase())
    }
}

/// Splits every entry on commas, trims, lower-cases and drops empty tags.
pub fn normalize_tags<S: AsRef<str>>(raw: &[S]) -> Vec<String> {
    raw.iter()
        .flat_map(|entry| entry.as_ref().split(','))
        .filter_map(normalize)
        .collect()
}

fn tag_set<S: AsRef<str>>(raw: &[S]) -> HashSet<String> {
    normalize_tags(raw).into_iter().collect()
}

/// Overlap ratio in `[0.0, 1.0]`; `0.0` when either side has no tags.
pub fn score<S: AsRef<str>, T: AsRef<str>>(student_tags: &[S], candidate_tags: &[T]) -> f64 {
    let student = tag_set(student_tags);
    let candidate = tag_set(candidate_tags);

    if student.is_empty() || candidate.is_empty() {
        return 0.0;
    }

    let common = student.intersection(&candidate).count();
    common as f64 / student.len() as f64
}

/// Tags both sides share, in the student's declared order and casing.
pub fn common_tags<S: AsRef<str>, T: AsRef<str>>(
    student_tags: &[S],
    candidate_tags: &[T],
) -> Vec<String> {
    let candidate = tag_set(candidate_tags);
    let mut seen = HashSet::new();

    student_tags
        .iter()
        .flat_map(|entry| entry.as_ref().split(','))
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .filter(|tag| {
            let key = tag.to_lowercase();
            candidate.contains(&key) && seen.insert(key)
        })
        .map(str::to_string)
        .collect()
}

pub fn explain(common: &[String]) -> String {
    if common.is_empty() {
        NO_OVERLAP_REASON.to_string()
    } else {
        format!("{}{}", COMMON_SKILLS_PREFIX, common.join(", "))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scored<T> {
    pub candidate: T,
    pub ratio: f64,
    pub reason: String,
}

impl<T> Scored<T> {
    pub fn evaluate<S: AsRef<str>, U: AsRef<str>>(
        candidate: T,
        student_tags: &[S],
        candidate_tags: &[U],
    ) -> Self {
        let ratio = score(student_tags, candidate_tags);
        let reason = if ratio == 0.0 {
            NO_OVERLAP_REASON.to_string()
        } else {
            explain(&common_tags(student_tags, candidate_tags))
        };

        Scored { candidate, ratio, reason }
    }
}

/// Sorts by ratio (highest first), breaks ties with `tie_break`, keeps `top_k`.
pub fn rank<T, F>(mut scored: Vec<Scored<T>>, top_k: usize, tie_break: F) -> Vec<Scored<T>>
where
    F: Fn(&T, &T) -> Ordering,
{
    scored.sort_by(|a, b| {
        b.ratio
            .partial_cmp(&a.ratio)
            .unwrap_or(Ordering::Equal)
            .then_with(|| tie_break(&a.candidate, &b.candidate))
    });
    scored.truncate(top_k);
    scored
}

/// Rounds a ratio to two decimals for display.
pub fn display_score(ratio: f64) -> f64 {
    (ratio * 100.0).round() / 100.0
}
