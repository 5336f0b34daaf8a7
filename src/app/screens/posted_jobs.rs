//! Owner dashboard: the signed-in user's postings and the applications they received.

use super::{log_failure, Effect, ListCursor, Reply, ScreenStatus};
use crate::api::response::parse_posted_jobs;
use crate::api::{ApiCall, RequestTag};
use crate::app::patch::{remove_by_key, update_by_key};
use crate::domain::{Application, ApplicationStatus, PostedJob, Result};

pub const LOAD_FAILED: &str = "Failed to fetch jobs";
pub const STATUS_FAILED: &str = "Failed to update application status";
pub const DELETE_JOB_FAILED: &str = "Failed to delete job";
pub const DELETE_APPLICATION_FAILED: &str = "Failed to delete application";
pub const UNDER_VERIFICATION: &str = "This job is under verification.";
pub const NO_JOBS: &str = "No jobs posted yet.";
pub const NO_APPLICATIONS: &str = "No applications yet.";

/// One line of the flattened dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostedRow {
    /// Header of `postings[i]`.
    Job(usize),
    /// `postings[i].applications[j]`.
    Application(usize, usize),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostedJobsScreen {
    pub email: String,
    pub postings: Vec<PostedJob>,
    pub cursor: ListCursor,
    pub status: ScreenStatus,
}

impl PostedJobsScreen {
    #[must_use]
    pub fn mount(email: String) -> (Self, Vec<Effect>) {
        let call = ApiCall::PostedJobs { email: email.clone() };
        let screen = Self {
            email,
            status: ScreenStatus::loading(),
            ..Self::default()
        };
        (screen, vec![Effect::Call(call)])
    }

    /// Job headers, each followed by its applications when the job is verified.
    #[must_use]
    pub fn rows(&self) -> Vec<PostedRow> {
        let mut rows = Vec::new();
        for (i, posting) in self.postings.iter().enumerate() {
            rows.push(PostedRow::Job(i));
            if posting.job.verified {
                rows.extend((0..posting.applications.len()).map(|j| PostedRow::Application(i, j)));
            }
        }
        rows
    }

    #[must_use]
    pub fn selected_row(&self) -> Option<PostedRow> {
        self.rows().get(self.cursor.index).copied()
    }

    #[must_use]
    pub fn application(&self, i: usize, j: usize) -> Option<&Application> {
        self.postings.get(i)?.applications.get(j)
    }

    #[must_use]
    pub fn selected_application(&self) -> Option<&Application> {
        match self.selected_row()? {
            PostedRow::Application(i, j) => self.application(i, j),
            PostedRow::Job(_) => None,
        }
    }

    pub fn move_down(&mut self) {
        self.cursor.down(self.rows().len());
    }

    pub fn move_up(&mut self) {
        self.cursor.up(self.rows().len());
    }

    /// Requests a status change for the selected application.
    ///
    /// Only settable statuses are accepted; re-sending the current one is a no-op.
    #[must_use]
    pub fn set_status(&self, status: ApplicationStatus) -> Vec<Effect> {
        if !status.is_settable() {
            tracing::debug!(status = %status, "status is not settable by owners");
            return vec![];
        }
        match self.selected_application() {
            Some(app) if app.status != status => vec![Effect::Call(ApiCall::SetApplicationStatus {
                application_id: app.id.clone(),
                status,
            })],
            _ => vec![],
        }
    }

    /// Deletes the selected job or application.
    #[must_use]
    pub fn delete_selected(&self) -> Vec<Effect> {
        let call = match self.selected_row() {
            Some(PostedRow::Job(i)) => self.postings.get(i).map(|p| ApiCall::OwnerDeleteJob {
                job_id: p.job.id.clone(),
            }),
            Some(PostedRow::Application(i, j)) => {
                self.application(i, j).map(|app| ApiCall::OwnerDeleteApplication {
                    application_id: app.id.clone(),
                })
            }
            None => None,
        };
        call.map(Effect::Call).into_iter().collect()
    }

    pub fn on_response(&mut self, tag: &RequestTag, reply: Reply<'_>) -> Vec<Effect> {
        match tag {
            RequestTag::PostedJobs => match reply.and_then(load_postings) {
                Ok(postings) => {
                    tracing::debug!(posting_count = postings.len(), "postings loaded");
                    self.postings = postings;
                    self.status.loaded();
                    self.cursor.clamp(self.rows().len());
                }
                Err(e) => {
                    log_failure("posted jobs", &e);
                    self.status.fail(LOAD_FAILED);
                }
            },
            RequestTag::SetStatus { application_id, status } => match reply {
                Ok(_) => {
                    for posting in &mut self.postings {
                        if update_by_key(&mut posting.applications, application_id, |app| {
                            app.status = *status;
                        }) {
                            break;
                        }
                    }
                    self.status.clear();
                }
                Err(e) => {
                    log_failure("set application status", &e);
                    self.status.fail(STATUS_FAILED);
                }
            },
            RequestTag::OwnerDeleteJob { job_id } => match reply {
                Ok(_) => {
                    remove_by_key(&mut self.postings, job_id);
                    self.cursor.clamp(self.rows().len());
                    self.status.clear();
                }
                Err(e) => {
                    log_failure("delete job", &e);
                    self.status.fail(DELETE_JOB_FAILED);
                }
            },
            RequestTag::OwnerDeleteApplication { application_id } => match reply {
                Ok(_) => {
                    for posting in &mut self.postings {
                        if remove_by_key(&mut posting.applications, application_id).is_some() {
                            break;
                        }
                    }
                    self.cursor.clamp(self.rows().len());
                    self.status.clear();
                }
                Err(e) => {
                    log_failure("delete application", &e);
                    self.status.fail(DELETE_APPLICATION_FAILED);
                }
            },
            other => tracing::debug!(tag = ?other, "unexpected response on posted jobs screen"),
        }
        vec![]
    }
}

/// Decodes the dashboard and checks every displayable application names its applicant.
fn load_postings(body: &[u8]) -> Result<Vec<PostedJob>> {
    let postings = parse_posted_jobs(body)?;
    for posting in postings.iter().filter(|p| p.job.verified) {
        for app in &posting.applications {
            app.require_applicant()?;
        }
    }
    Ok(postings)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &[u8] = br#"{"jobs":[
        {"job":{"_id":"j1","name":"Nurse","type":"Contract","category":"Healthcare","verified":true},
         "applications":[
            {"_id":"a1","applicantId":{"_id":"u1","name":"Ada","email":"ada@x.io"},"status":"Applied"},
            {"_id":"a2","applicantId":{"_id":"u2","name":"Bob","email":"bob@x.io"},"status":"Accepted"}
         ]},
        {"job":{"_id":"j2","name":"Teacher","type":"Full-time","category":"Education","verified":false},
         "applications":[{"_id":"a3","applicantId":"u3"}]}
    ]}"#;

    fn loaded() -> PostedJobsScreen {
        let (mut screen, _) = PostedJobsScreen::mount("owner@x.io".into());
        screen.on_response(&RequestTag::PostedJobs, Ok(BODY));
        screen
    }

    #[test]
    fn unverified_jobs_hide_applications() {
        let screen = loaded();
        assert_eq!(
            screen.rows(),
            vec![
                PostedRow::Job(0),
                PostedRow::Application(0, 0),
                PostedRow::Application(0, 1),
                PostedRow::Job(1),
            ]
        );
        assert!(screen.status.error.is_none());
    }

    #[test]
    fn status_keys_skip_accepted_and_current() {
        let mut screen = loaded();
        screen.cursor.index = 1;
        assert!(screen.set_status(ApplicationStatus::Accepted).is_empty());
        assert!(screen.set_status(ApplicationStatus::Applied).is_empty());
        assert_eq!(
            screen.set_status(ApplicationStatus::Rejected),
            vec![Effect::Call(ApiCall::SetApplicationStatus {
                application_id: "a1".into(),
                status: ApplicationStatus::Rejected,
            })]
        );
    }

    #[test]
    fn unpopulated_applicant_fails_the_screen() {
        let body = br#"{"jobs":[{"job":{"_id":"j1","name":"Nurse","type":"Contract","category":"Healthcare","verified":true},
            "applications":[{"_id":"a1","applicantId":"u1"}]}]}"#;
        let (mut screen, _) = PostedJobsScreen::mount("owner@x.io".into());
        screen.on_response(&RequestTag::PostedJobs, Ok(body));
        assert_eq!(screen.status.error.as_deref(), Some(LOAD_FAILED));
        assert!(screen.postings.is_empty());
    }
}
