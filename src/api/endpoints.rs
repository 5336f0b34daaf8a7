//! The job board API surface.
//!
//! One [`ApiCall`] variant per endpoint. Each variant knows its method, its path
//! relative to the configured base URL, its body and the [`RequestTag`] used to
//! route the response back to the screen that asked for it.

use super::context::RequestTag;
use super::multipart::Multipart;
use super::request::HttpMethod;
use crate::domain::ApplicationStatus;
use serde_json::json;

/// Body of an API call.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Empty,
    Json(serde_json::Value),
    Multipart(Multipart),
}

/// A call to one API endpoint.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiCall {
    /// `GET getjobs/jobs`
    ListJobs,
    /// `GET fetch-user/by-email/{email}`, resolving the poster of a new job.
    UserByEmail { email: String },
    /// `POST jobs/create-job`
    CreateJob { body: Multipart },
    /// `GET posted-jobs/{email}`
    PostedJobs { email: String },
    /// `PATCH posted-jobs/applications/{id}/status`
    SetApplicationStatus {
        application_id: String,
        status: ApplicationStatus,
    },
    /// `DELETE posted-jobs/jobs/{id}`
    OwnerDeleteJob { job_id: String },
    /// `DELETE posted-jobs/applications/{id}`
    OwnerDeleteApplication { application_id: String },
    /// `POST admin/admin`, both the access check and the overview.
    AdminOverview { email: String },
    /// `PATCH admin/verify-job/{id}`
    VerifyJob { job_id: String },
    /// `DELETE admin/delete-job/{id}`
    AdminDeleteJob { job_id: String },
    /// `DELETE admin/delete-application/{id}`
    AdminDeleteApplication { application_id: String },
    /// `GET applications/{email}`
    ApplicationsByApplicant { email: String },
    /// `DELETE applications/delete/{id}`
    WithdrawApplication { application_id: String },
    /// `POST apply/{jobId}/apply`
    Apply { job_id: String, body: Multipart },
    /// `POST users/create-user`
    CreateUser { name: String, email: String },
}

impl ApiCall {
    #[must_use]
    pub const fn method(&self) -> HttpMethod {
        match self {
            Self::ListJobs
            | Self::UserByEmail { .. }
            | Self::PostedJobs { .. }
            | Self::ApplicationsByApplicant { .. } => HttpMethod::Get,
            Self::CreateJob { .. }
            | Self::AdminOverview { .. }
            | Self::Apply { .. }
            | Self::CreateUser { .. } => HttpMethod::Post,
            Self::SetApplicationStatus { .. } | Self::VerifyJob { .. } => HttpMethod::Patch,
            Self::OwnerDeleteJob { .. }
            | Self::OwnerDeleteApplication { .. }
            | Self::AdminDeleteJob { .. }
            | Self::AdminDeleteApplication { .. }
            | Self::WithdrawApplication { .. } => HttpMethod::Delete,
        }
    }

    /// Path relative to the base URL, with dynamic segments percent-encoded.
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::ListJobs => "getjobs/jobs".to_string(),
            Self::UserByEmail { email } => format!("fetch-user/by-email/{}", encode_segment(email)),
            Self::CreateJob { .. } => "jobs/create-job".to_string(),
            Self::PostedJobs { email } => format!("posted-jobs/{}", encode_segment(email)),
            Self::SetApplicationStatus { application_id, .. } => {
                format!("posted-jobs/applications/{}/status", encode_segment(application_id))
            }
            Self::OwnerDeleteJob { job_id } => format!("posted-jobs/jobs/{}", encode_segment(job_id)),
            Self::OwnerDeleteApplication { application_id } => {
                format!("posted-jobs/applications/{}", encode_segment(application_id))
            }
            Self::AdminOverview { .. } => "admin/admin".to_string(),
            Self::VerifyJob { job_id } => format!("admin/verify-job/{}", encode_segment(job_id)),
            Self::AdminDeleteJob { job_id } => format!("admin/delete-job/{}", encode_segment(job_id)),
            Self::AdminDeleteApplication { application_id } => {
                format!("admin/delete-application/{}", encode_segment(application_id))
            }
            Self::ApplicationsByApplicant { email } => format!("applications/{}", encode_segment(email)),
            Self::WithdrawApplication { application_id } => {
                format!("applications/delete/{}", encode_segment(application_id))
            }
            Self::Apply { job_id, .. } => format!("apply/{}/apply", encode_segment(job_id)),
            Self::CreateUser { .. } => "users/create-user".to_string(),
        }
    }

    #[must_use]
    pub fn body(&self) -> Body {
        match self {
            Self::CreateJob { body } | Self::Apply { body, .. } => Body::Multipart(body.clone()),
            Self::SetApplicationStatus { status, .. } => Body::Json(json!({ "status": status })),
            Self::AdminOverview { email } => Body::Json(json!({ "email": email })),
            Self::CreateUser { name, email } => Body::Json(json!({ "name": name, "email": email })),
            _ => Body::Empty,
        }
    }

    /// Tag identifying this call in the response context.
    #[must_use]
    pub fn tag(&self) -> RequestTag {
        match self {
            Self::ListJobs => RequestTag::ListJobs,
            Self::UserByEmail { .. } => RequestTag::LookupPoster,
            Self::CreateJob { .. } => RequestTag::CreateJob,
            Self::PostedJobs { .. } => RequestTag::PostedJobs,
            Self::SetApplicationStatus { application_id, status } => RequestTag::SetStatus {
                application_id: application_id.clone(),
                status: *status,
            },
            Self::OwnerDeleteJob { job_id } => RequestTag::OwnerDeleteJob { job_id: job_id.clone() },
            Self::OwnerDeleteApplication { application_id } => RequestTag::OwnerDeleteApplication {
                application_id: application_id.clone(),
            },
            Self::AdminOverview { .. } => RequestTag::AdminOverview,
            Self::VerifyJob { job_id } => RequestTag::VerifyJob { job_id: job_id.clone() },
            Self::AdminDeleteJob { job_id } => RequestTag::AdminDeleteJob { job_id: job_id.clone() },
            Self::AdminDeleteApplication { application_id } => RequestTag::AdminDeleteApplication {
                application_id: application_id.clone(),
            },
            Self::ApplicationsByApplicant { .. } => RequestTag::AppliedJobs,
            Self::WithdrawApplication { application_id } => RequestTag::WithdrawApplication {
                application_id: application_id.clone(),
            },
            Self::Apply { job_id, .. } => RequestTag::SubmitApplication { job_id: job_id.clone() },
            Self::CreateUser { .. } => RequestTag::RegisterUser,
        }
    }
}

/// Percent-encodes one path segment.
///
/// Unreserved characters (`A-Z a-z 0-9 - . _ ~`) pass through; every other byte
/// of the UTF-8 encoding becomes `%XX`.
#[must_use]
pub fn encode_segment(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    for byte in segment.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'.' | b'_' | b'~') {
            out.push(char::from(byte));
        } else {
            out.push_str(&format!("%{byte:02X}"));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_emails_and_unicode() {
        assert_eq!(encode_segment("ada+jobs@example.com"), "ada%2Bjobs%40example.com");
        assert_eq!(encode_segment("a/b c"), "a%2Fb%20c");
        assert_eq!(encode_segment("é"), "%C3%A9");
    }

    #[test]
    fn status_body_uses_wire_value() {
        let call = ApiCall::SetApplicationStatus {
            application_id: "a1".to_string(),
            status: ApplicationStatus::Shortlisted,
        };
        assert_eq!(call.method(), HttpMethod::Patch);
        assert_eq!(call.path(), "posted-jobs/applications/a1/status");
        assert_eq!(call.body(), Body::Json(json!({ "status": "Shortlisted" })));
    }
}
