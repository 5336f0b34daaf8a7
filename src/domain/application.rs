//! Job application domain model.
//!
//! Applications are created by applicants, reviewed by the job's owner and
//! moderated by admins. Displaying an application requires its job and/or
//! applicant reference to be populated; the `require_*` accessors turn a missing
//! or dangling reference into an error so the whole screen fails instead of
//! rendering partial rows.

use super::error::{JobBoardError, Result};
use super::job::{JobRef, JobSummary};
use super::user::{User, UserRef};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Review status of an application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ApplicationStatus {
    #[default]
    Applied,
    Shortlisted,
    Rejected,
    Accepted,
}

impl ApplicationStatus {
    /// Statuses an owner may assign.
    ///
    /// `Accepted` is display-only: the API may report it but the review
    /// controls never offer it.
    pub const SETTABLE: [Self; 3] = [Self::Applied, Self::Shortlisted, Self::Rejected];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Applied => "Applied",
            Self::Shortlisted => "Shortlisted",
            Self::Rejected => "Rejected",
            Self::Accepted => "Accepted",
        }
    }

    #[must_use]
    pub fn is_settable(self) -> bool {
        Self::SETTABLE.contains(&self)
    }

    /// Message shown to the applicant for this status.
    #[must_use]
    pub const fn applicant_message(self) -> &'static str {
        match self {
            Self::Accepted => "Congratulations! You have been selected for this position.",
            Self::Rejected => {
                "We regret to inform you that you were not selected for this position. Thank you for applying!"
            }
            Self::Shortlisted => {
                "Great news! You have been shortlisted. We will contact you soon with further details."
            }
            Self::Applied => {
                "Your application has been submitted successfully. We will review it and get back to you soon."
            }
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Education block of an application.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    #[serde(default)]
    pub degree: String,
    #[serde(default)]
    pub institution: String,
    /// Stored as text; the API returns either a number or a string.
    #[serde(default, deserialize_with = "number_or_string")]
    pub graduation_year: String,
}

/// A job application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "jobId", default)]
    pub job: Option<JobRef>,
    #[serde(rename = "applicantId", default)]
    pub applicant: Option<UserRef>,
    #[serde(default)]
    pub applicant_name: String,
    #[serde(default)]
    pub education: Education,
    #[serde(default, deserialize_with = "list_or_csv")]
    pub skills: Vec<String>,
    #[serde(rename = "whyJoin", default)]
    pub motivation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_letter: Option<String>,
    #[serde(default)]
    pub resume_url: String,
    #[serde(default)]
    pub status: ApplicationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl Application {
    /// Returns the populated job summary or fails the screen.
    ///
    /// # Errors
    ///
    /// Returns [`JobBoardError::Decode`] when the job reference is absent or
    /// was not populated by the API.
    pub fn require_job(&self) -> Result<&JobSummary> {
        self.job
            .as_ref()
            .and_then(JobRef::populated)
            .ok_or_else(|| JobBoardError::Decode(format!("application {} has no job", self.id)))
    }

    /// Returns the populated applicant or fails the screen.
    ///
    /// # Errors
    ///
    /// Returns [`JobBoardError::Decode`] when the applicant reference is absent
    /// or was not populated by the API.
    pub fn require_applicant(&self) -> Result<&User> {
        self.applicant
            .as_ref()
            .and_then(UserRef::populated)
            .ok_or_else(|| JobBoardError::Decode(format!("application {} has no applicant", self.id)))
    }

    /// Skills joined for single-line display.
    #[must_use]
    pub fn skills_line(&self) -> String {
        self.skills.join(", ")
    }
}

/// One entry of the owner dashboard: a posted job with the applications it received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostedJob {
    pub job: super::job::Job,
    #[serde(default)]
    pub applications: Vec<Application>,
}

/// Splits free-text skills on commas, trimming blanks away.
#[must_use]
pub fn split_skills(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
        .collect()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(i64),
    Text(String),
}

fn number_or_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<NumberOrString>::deserialize(deserializer)? {
        Some(NumberOrString::Number(n)) => n.to_string(),
        Some(NumberOrString::Text(s)) => s,
        None => String::new(),
    })
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ListOrCsv {
    List(Vec<String>),
    Csv(String),
}

fn list_or_csv<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<ListOrCsv>::deserialize(deserializer)? {
        Some(ListOrCsv::List(items)) => items,
        Some(ListOrCsv::Csv(text)) => split_skills(&text),
        None => Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepted_is_not_settable() {
        assert!(!ApplicationStatus::Accepted.is_settable());
        assert!(ApplicationStatus::SETTABLE.iter().all(|s| s.is_settable()));
    }

    #[test]
    fn tolerant_field_shapes() {
        let json = r#"{
            "_id": "a1",
            "jobId": {"_id": "j1", "name": "Nurse", "companyName": "Clinic"},
            "applicantId": "u9",
            "applicantName": "Ada",
            "education": {"degree": "BSc", "institution": "MIT", "graduationYear": 2022},
            "skills": "rust, sql ,",
            "whyJoin": "Mission",
            "status": "Shortlisted"
        }"#;
        let app: Application = serde_json::from_str(json).unwrap();
        assert_eq!(app.education.graduation_year, "2022");
        assert_eq!(app.skills, vec!["rust", "sql"]);
        assert_eq!(app.require_job().unwrap().company_name, "Clinic");
        assert!(app.require_applicant().is_err());
    }

    #[test]
    fn null_job_reference_is_an_error() {
        let app: Application = serde_json::from_str(r#"{"_id":"a2","jobId":null}"#).unwrap();
        assert!(matches!(app.require_job(), Err(JobBoardError::Decode(_))));
        assert_eq!(app.status, ApplicationStatus::Applied);
    }
}
