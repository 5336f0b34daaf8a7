//! Response status checks and envelope decoding.
//!
//! The API wraps collections in small envelopes (`{data: [...]}`,
//! `{jobs: [...]}`) and reports failures as `{message: "..."}`. Everything here
//! is pure so it can be exercised without a host.

use crate::domain::{Application, Job, JobBoardError, PostedJob, Result, User};
use serde::de::DeserializeOwned;
use serde::Deserialize;

#[derive(Deserialize)]
struct DataEnvelope<T> {
    data: T,
}

#[derive(Deserialize)]
struct JobsEnvelope<T> {
    jobs: T,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

/// Jobs and applications visible to an admin.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct AdminOverview {
    #[serde(default)]
    pub jobs: Vec<Job>,
    #[serde(default)]
    pub applications: Vec<Application>,
}

/// Maps a status code to success or a typed error.
///
/// Status `0` means the host produced no response at all.
///
/// # Errors
///
/// - [`JobBoardError::Transport`] for status `0`
/// - [`JobBoardError::Http`] for any other non-2xx status, `403` included
pub fn check_status(status: u16, body: &[u8]) -> Result<()> {
    match status {
        200..=299 => Ok(()),
        0 => Err(JobBoardError::Transport(
            String::from_utf8_lossy(body).trim().to_string(),
        )),
        _ => {
            let message = serde_json::from_slice::<ErrorBody>(body)
                .map(|b| b.message)
                .unwrap_or_default();
            Err(JobBoardError::Http { status, message })
        }
    }
}

/// Like [`check_status`], but reads `403` as a refused admin check.
///
/// # Errors
///
/// Returns [`JobBoardError::Forbidden`] for `403`, otherwise whatever
/// [`check_status`] returns.
pub fn check_admin_status(status: u16, body: &[u8]) -> Result<()> {
    if status == 403 {
        return Err(JobBoardError::Forbidden);
    }
    check_status(status, body)
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    Ok(serde_json::from_slice(body)?)
}

/// Decodes `{data: [Job]}`.
///
/// # Errors
///
/// Returns [`JobBoardError::Decode`] when the envelope or a job is malformed.
pub fn parse_jobs(body: &[u8]) -> Result<Vec<Job>> {
    decode::<DataEnvelope<Vec<Job>>>(body).map(|e| e.data)
}

/// Decodes a bare user document.
///
/// # Errors
///
/// Returns [`JobBoardError::Decode`] when the body is not a user.
pub fn parse_user(body: &[u8]) -> Result<User> {
    let user: User = decode(body)?;
    if user.id.is_empty() {
        return Err(JobBoardError::Decode("user document has no id".to_string()));
    }
    Ok(user)
}

/// Decodes `{jobs: [{job, applications}]}`.
///
/// # Errors
///
/// Returns [`JobBoardError::Decode`] when the envelope is malformed.
pub fn parse_posted_jobs(body: &[u8]) -> Result<Vec<PostedJob>> {
    decode::<JobsEnvelope<Vec<PostedJob>>>(body).map(|e| e.jobs)
}

/// Decodes `{jobs, applications}`.
///
/// # Errors
///
/// Returns [`JobBoardError::Decode`] when the body is malformed.
pub fn parse_admin_overview(body: &[u8]) -> Result<AdminOverview> {
    decode(body)
}

/// Decodes `{data: [Application]}`.
///
/// # Errors
///
/// Returns [`JobBoardError::Decode`] when the envelope is malformed.
pub fn parse_applications(body: &[u8]) -> Result<Vec<Application>> {
    decode::<DataEnvelope<Vec<Application>>>(body).map(|e| e.data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        assert!(check_status(204, b"").is_ok());
        assert!(matches!(check_admin_status(403, b""), Err(JobBoardError::Forbidden)));
        assert!(check_admin_status(200, b"{}").is_ok());

        let err = check_status(403, br#"{"message":"Employers cannot apply"}"#).unwrap_err();
        assert!(matches!(err, JobBoardError::Http { status: 403, .. }));
        assert_eq!(err.server_message(), Some("Employers cannot apply"));
        assert!(matches!(check_status(0, b"timeout"), Err(JobBoardError::Transport(m)) if m == "timeout"));

        let err = check_status(400, br#"{"message":"You already applied"}"#).unwrap_err();
        assert_eq!(err.server_message(), Some("You already applied"));

        let err = check_status(502, b"<html>").unwrap_err();
        assert!(matches!(err, JobBoardError::Http { status: 502, .. }));
        assert_eq!(err.server_message(), None);
    }

    #[test]
    fn user_without_id_is_rejected() {
        assert!(parse_user(br#"{"name":"Ada"}"#).is_err());
        assert_eq!(parse_user(br#"{"_id":"u1"}"#).unwrap().id, "u1");
    }
}
