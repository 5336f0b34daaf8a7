//! Public job board: verified listings, filters, details and apply dialogs.

use super::{log_failure, session_email, Effect, ListCursor, Reply, ScreenStatus};
use crate::api::response::parse_jobs;
use crate::api::{ApiCall, Multipart, RequestTag};
use crate::app::dialog::DialogCoordinator;
use crate::app::filter::{filter_indices, JobFilter};
use crate::app::router::Route;
use crate::domain::{Attachment, Job, JobBoardError, Session};
use crate::worker::AttachmentPurpose;

pub const LOAD_FAILED: &str = "Failed to fetch jobs";
pub const APPLY_SUCCEEDED: &str = "Application submitted successfully!";
pub const APPLY_FAILED: &str = "Failed to submit application.";
pub const APPLY_UNREACHABLE: &str = "An error occurred. Please try again later.";
pub const SIGN_IN_TO_APPLY: &str = "Please sign in to apply for jobs.";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobsScreen {
    /// Every job returned by the API, in server order.
    pub jobs: Vec<Job>,
    pub filter: JobFilter,
    /// Indices into `jobs` that pass `filter`.
    pub visible: Vec<usize>,
    pub cursor: ListCursor,
    pub dialog: DialogCoordinator,
    pub status: ScreenStatus,
}

impl JobsScreen {
    #[must_use]
    pub fn mount() -> (Self, Vec<Effect>) {
        let screen = Self {
            status: ScreenStatus::loading(),
            ..Self::default()
        };
        (screen, vec![Effect::Call(ApiCall::ListJobs)])
    }

    /// Re-runs the filter pipeline over the full collection.
    pub fn refilter(&mut self) {
        self.visible = filter_indices(&self.jobs, &self.filter);
        self.cursor.clamp(self.visible.len());
    }

    #[must_use]
    pub fn visible_jobs(&self) -> Vec<&Job> {
        self.visible.iter().filter_map(|&i| self.jobs.get(i)).collect()
    }

    #[must_use]
    pub fn selected_job(&self) -> Option<&Job> {
        self.visible
            .get(self.cursor.index)
            .and_then(|&i| self.jobs.get(i))
    }

    pub fn move_down(&mut self) {
        self.cursor.down(self.visible.len());
    }

    pub fn move_up(&mut self) {
        self.cursor.up(self.visible.len());
    }

    pub fn push_query(&mut self, c: char) {
        self.filter.query.push(c);
        self.refilter();
    }

    pub fn pop_query(&mut self) {
        self.filter.query.pop();
        self.refilter();
    }

    pub fn clear_query(&mut self) {
        self.filter.query.clear();
        self.refilter();
    }

    pub fn cycle_type(&mut self) {
        self.filter.cycle_type();
        self.refilter();
    }

    pub fn cycle_category(&mut self) {
        self.filter.cycle_category();
        self.refilter();
    }

    pub fn clear_filters(&mut self) {
        self.filter.clear();
        self.refilter();
    }

    /// Opens the details dialog for the selected job.
    pub fn show_details(&mut self) -> bool {
        let Some(job) = self.selected_job().cloned() else {
            return false;
        };
        self.dialog.select(job);
        true
    }

    /// Opens the apply form: from details for that job, otherwise for the
    /// selected job. Anonymous sessions get a sign-in message instead.
    pub fn start_apply(&mut self, session: &Session) -> bool {
        let Some(identity) = session.identity() else {
            self.status.fail(SIGN_IN_TO_APPLY);
            return true;
        };

        if self.dialog.apply(&identity.name) {
            return true;
        }
        if self.dialog.apply_dialog().is_some() {
            return false;
        }
        let Some(job) = self.selected_job().cloned() else {
            return false;
        };
        self.dialog.open_apply(job, &identity.name);
        true
    }

    /// Validates the apply form and starts reading the resume.
    ///
    /// Ignored while a submission is in flight.
    pub fn submit_application(&mut self) -> Vec<Effect> {
        let Some(apply) = self.dialog.apply_dialog_mut() else {
            return vec![];
        };
        if apply.submitting {
            tracing::debug!("application already submitting");
            return vec![];
        }

        match apply.form.validate() {
            Err(errors) => {
                tracing::debug!(error_count = errors.len(), "application form invalid");
                apply.validation = errors;
                vec![]
            }
            Ok(valid) => {
                apply.validation = crate::forms::ValidationErrors::new();
                apply.error = None;
                apply.submitting = true;
                let path = valid.resume_path.clone();
                apply.pending = Some(valid);
                vec![Effect::LoadAttachment {
                    purpose: AttachmentPurpose::Resume,
                    path,
                }]
            }
        }
    }

    /// Continues a submission once the resume was read (or failed to be).
    pub fn on_attachment(
        &mut self,
        purpose: AttachmentPurpose,
        loaded: std::result::Result<Attachment, String>,
        session: &Session,
    ) -> Vec<Effect> {
        if purpose != AttachmentPurpose::Resume {
            return vec![];
        }
        let Some(apply) = self.dialog.apply_dialog_mut() else {
            return vec![];
        };
        let Some(valid) = apply.pending.take() else {
            return vec![];
        };

        match loaded {
            Err(message) => {
                apply.submitting = false;
                apply.error = Some(message);
                vec![]
            }
            Ok(attachment) => {
                let body = Multipart::new()
                    .file(purpose.field_name(), attachment)
                    .texts(valid.form_fields(&session_email(session)));
                vec![Effect::Call(ApiCall::Apply {
                    job_id: apply.job.id.clone(),
                    body,
                })]
            }
        }
    }

    pub fn on_response(&mut self, tag: &RequestTag, reply: Reply<'_>) -> Vec<Effect> {
        match tag {
            RequestTag::ListJobs => {
                match reply.and_then(parse_jobs) {
                    Ok(jobs) => {
                        tracing::debug!(job_count = jobs.len(), "jobs loaded");
                        self.jobs = jobs;
                        self.status.loaded();
                        self.refilter();
                    }
                    Err(e) => {
                        log_failure("list jobs", &e);
                        self.status.fail(LOAD_FAILED);
                    }
                }
                vec![]
            }
            RequestTag::SubmitApplication { job_id } => self.on_submitted(job_id, reply),
            other => {
                tracing::debug!(tag = ?other, "unexpected response on jobs screen");
                vec![]
            }
        }
    }

    fn on_submitted(&mut self, job_id: &str, reply: Reply<'_>) -> Vec<Effect> {
        match reply {
            Ok(_) => {
                tracing::debug!(job_id = %job_id, "application submitted");
                self.status.notify(APPLY_SUCCEEDED);
                if self.dialog.succeed() {
                    vec![Effect::Redirect(Route::AppliedJobs)]
                } else {
                    vec![]
                }
            }
            Err(e) => {
                log_failure("submit application", &e);
                if let Some(apply) = self.dialog.apply_dialog_mut() {
                    apply.submitting = false;
                    apply.error = Some(apply_failure_message(&e));
                }
                vec![]
            }
        }
    }
}

/// Message shown in the apply dialog for a failed submission.
#[must_use]
pub fn apply_failure_message(err: &JobBoardError) -> String {
    if err.is_transport() {
        return APPLY_UNREACHABLE.to_string();
    }
    err.server_message().unwrap_or(APPLY_FAILED).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_messages() {
        let err = JobBoardError::Http {
            status: 400,
            message: "You already applied".into(),
        };
        assert_eq!(apply_failure_message(&err), "You already applied");

        let err = JobBoardError::Http {
            status: 500,
            message: String::new(),
        };
        assert_eq!(apply_failure_message(&err), APPLY_FAILED);

        let err = JobBoardError::Transport("offline".into());
        assert_eq!(apply_failure_message(&err), APPLY_UNREACHABLE);
    }
}
