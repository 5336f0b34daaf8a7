//! Client-side job filtering.
//!
//! The pipeline always runs in the same order over the full collection:
//! verified, then free-text query (name or location), then type, then category.
//! Every stage is an AND filter and the source order is preserved.

use crate::domain::{Category, Job, JobType};

/// The three independent filter inputs of the jobs screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobFilter {
    /// Case-insensitive substring; not trimmed.
    pub query: String,
    pub job_type: Option<JobType>,
    pub category: Option<Category>,
}

impl JobFilter {
    /// Whether any input narrows the verified set.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.query.is_empty() || self.job_type.is_some() || self.category.is_some()
    }

    /// Steps the type filter: all, Full-time, ..., Internship, all.
    pub fn cycle_type(&mut self) {
        self.job_type = next_option(&JobType::ALL, self.job_type);
    }

    /// Steps the category filter the same way as [`JobFilter::cycle_type`].
    pub fn cycle_category(&mut self) {
        self.category = next_option(&Category::ALL, self.category);
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

fn next_option<T: Copy + PartialEq>(all: &[T], current: Option<T>) -> Option<T> {
    match current {
        None => all.first().copied(),
        Some(value) => all
            .iter()
            .position(|v| *v == value)
            .and_then(|i| all.get(i + 1).copied()),
    }
}

/// Whether `job` matches a query on its name or location.
///
/// An empty query matches everything.
#[must_use]
pub fn matches_query(job: &Job, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let needle = fold(query);
    contains_folded(&fold(&job.name), &needle) || contains_folded(&fold(&job.location), &needle)
}

/// Lowercases `text` char by char, keeping every expansion.
///
/// Each folded char carries the index of the source char it came from.
fn fold(text: &str) -> Vec<(char, usize)> {
    text.chars()
        .enumerate()
        .flat_map(|(i, c)| c.to_lowercase().map(move |l| (l, i)))
        .collect()
}

fn folded_eq(haystack: &[(char, usize)], needle: &[(char, usize)]) -> bool {
    haystack.iter().zip(needle).all(|(h, n)| h.0 == n.0)
}

fn contains_folded(haystack: &[(char, usize)], needle: &[(char, usize)]) -> bool {
    needle.is_empty() || haystack.windows(needle.len()).any(|w| folded_eq(w, needle))
}

/// Indices into `jobs` that pass the filter, in source order.
#[must_use]
pub fn filter_indices(jobs: &[Job], filter: &JobFilter) -> Vec<usize> {
    let _span = tracing::debug_span!(
        "filter_jobs",
        total_jobs = jobs.len(),
        query_len = filter.query.len(),
        job_type = ?filter.job_type,
        category = ?filter.category
    )
    .entered();

    let indices: Vec<usize> = jobs
        .iter()
        .enumerate()
        .filter(|(_, job)| job.verified)
        .filter(|(_, job)| matches_query(job, &filter.query))
        .filter(|(_, job)| filter.job_type.map_or(true, |t| job.job_type == t))
        .filter(|(_, job)| filter.category.map_or(true, |c| job.category == c))
        .map(|(i, _)| i)
        .collect();

    tracing::debug!(filtered_count = indices.len(), "job filter applied");
    indices
}

/// Jobs that pass the filter, in source order.
#[must_use]
pub fn filter_jobs<'a>(jobs: &'a [Job], filter: &JobFilter) -> Vec<&'a Job> {
    filter_indices(jobs, filter)
        .into_iter()
        .filter_map(|i| jobs.get(i))
        .collect()
}

/// Character ranges `(start, end)` of every non-overlapping, case-insensitive
/// occurrence of `query` in `text`.
///
/// ```
/// use jobboard::app::filter::highlight_ranges;
///
/// assert_eq!(highlight_ranges("Rust Developer, Rust", "rust"), vec![(0, 4), (16, 20)]);
/// assert!(highlight_ranges("Rust", "").is_empty());
/// ```
#[must_use]
pub fn highlight_ranges(text: &str, query: &str) -> Vec<(usize, usize)> {
    let haystack = fold(text);
    let needle = fold(query);

    let mut ranges = Vec::new();
    if needle.is_empty() || needle.len() > haystack.len() {
        return ranges;
    }

    let mut i = 0;
    while i + needle.len() <= haystack.len() {
        let window = &haystack[i..i + needle.len()];
        if folded_eq(window, &needle) {
            let start = window[0].1;
            let end = window[needle.len() - 1].1 + 1;
            if ranges.last().map_or(true, |&(_, prev_end)| start >= prev_end) {
                ranges.push((start, end));
            }
            i += needle.len();
        } else {
            i += 1;
        }
    }
    ranges
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_filter_cycles_back_to_all() {
        let mut filter = JobFilter::default();
        let mut seen = Vec::new();
        for _ in 0..5 {
            filter.cycle_type();
            seen.push(filter.job_type);
        }
        assert_eq!(
            seen,
            vec![
                Some(JobType::FullTime),
                Some(JobType::PartTime),
                Some(JobType::Contract),
                Some(JobType::Internship),
                None
            ]
        );
    }

    #[test]
    fn clear_resets_everything() {
        let mut filter = JobFilter {
            query: "x".into(),
            job_type: Some(JobType::Contract),
            category: Some(Category::Other),
        };
        assert!(filter.is_active());
        filter.clear();
        assert!(!filter.is_active());
    }
}
