//! Job listing domain model.
//!
//! A [`Job`] is created by an employer submission, verified by an admin and
//! deleted by either its owner or an admin. Only verified jobs are shown on the
//! public board. The enumerations mirror the API's string values exactly,
//! including case and hyphenation.

use super::user::UserRef;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of seconds in one minute.
const SECONDS_PER_MINUTE: i64 = 60;

/// Number of seconds in one hour.
const SECONDS_PER_HOUR: i64 = 3600;

/// Number of seconds in one day.
const SECONDS_PER_DAY: i64 = 86400;

/// Employment type of a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JobType {
    #[serde(rename = "Full-time")]
    FullTime,
    #[serde(rename = "Part-time")]
    PartTime,
    Contract,
    Internship,
}

impl JobType {
    /// Every job type, in the order offered by pickers and filters.
    pub const ALL: [Self; 4] = [Self::FullTime, Self::PartTime, Self::Contract, Self::Internship];

    /// Returns the wire/display value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FullTime => "Full-time",
            Self::PartTime => "Part-time",
            Self::Contract => "Contract",
            Self::Internship => "Internship",
        }
    }

    /// Parses an exact, case-sensitive wire value.
    ///
    /// `"contract"` is not `"Contract"`; callers get `None` for anything that is
    /// not one of [`JobType::ALL`] spelled exactly.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == value)
    }
}

impl fmt::Display for JobType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Industry category of a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Technology,
    Healthcare,
    Finance,
    Education,
    Other,
}

impl Category {
    /// Every category, in the order offered by pickers and filters.
    pub const ALL: [Self; 5] = [
        Self::Technology,
        Self::Healthcare,
        Self::Finance,
        Self::Education,
        Self::Other,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Technology => "Technology",
            Self::Healthcare => "Healthcare",
            Self::Finance => "Finance",
            Self::Education => "Education",
            Self::Other => "Other",
        }
    }

    /// Parses an exact, case-sensitive wire value.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == value)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn default_true() -> bool {
    true
}

/// A job listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub job_type: JobType,
    pub category: Category,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub description: String,
    /// Salary range in `min-max` form.
    #[serde(default)]
    pub salary_range: String,
    #[serde(default)]
    pub company_name: String,
    #[serde(default = "default_true")]
    pub is_available: bool,
    /// Set by an admin; unverified jobs are hidden from the public board.
    #[serde(default)]
    pub verified: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub posted_by: Option<UserRef>,
    /// RFC 3339 creation timestamp, when the API includes one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl Job {
    /// Returns a human-readable age such as `"3d ago"`, if `created_at` parses.
    #[must_use]
    pub fn posted_ago(&self, now: i64) -> Option<String> {
        let created = self.created_at.as_deref()?;
        let created = chrono::DateTime::parse_from_rfc3339(created).ok()?;
        Some(time_ago(created.timestamp(), now))
    }

    /// Availability label shown in lists and details.
    #[must_use]
    pub const fn availability(&self) -> &'static str {
        if self.is_available {
            "Available"
        } else {
            "Not available"
        }
    }
}

/// The abbreviated job document embedded in applications.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobSummary {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub company_name: String,
    #[serde(default)]
    pub location: String,
}

/// A reference to a job inside another document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum JobRef {
    /// Populated job summary.
    Job(JobSummary),
    /// Unpopulated object id.
    Id(String),
}

impl JobRef {
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        match self {
            Self::Job(job) if !job.id.is_empty() => Some(job.id.as_str()),
            Self::Job(_) => None,
            Self::Id(id) => Some(id.as_str()),
        }
    }

    #[must_use]
    pub const fn populated(&self) -> Option<&JobSummary> {
        match self {
            Self::Job(job) => Some(job),
            Self::Id(_) => None,
        }
    }
}

/// Formats the distance between two Unix timestamps.
///
/// - Less than 1 minute: "just now"
/// - Less than 1 hour: "Xm ago"
/// - Less than 1 day: "Xh ago"
/// - 1 day or more: "Xd ago"
#[must_use]
pub fn time_ago(then: i64, now: i64) -> String {
    let diff = now - then;

    if diff < SECONDS_PER_MINUTE {
        "just now".to_string()
    } else if diff < SECONDS_PER_HOUR {
        format!("{}m ago", diff / SECONDS_PER_MINUTE)
    } else if diff < SECONDS_PER_DAY {
        format!("{}h ago", diff / SECONDS_PER_HOUR)
    } else {
        format!("{}d ago", diff / SECONDS_PER_DAY)
    }
}
