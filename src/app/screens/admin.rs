//! Admin moderation: verify or remove job posts and applications.
//!
//! The overview request doubles as the access check: `403` means the signed-in
//! user is not an admin and switches the screen to a dedicated denied view.

use super::{log_failure, Effect, ListCursor, Reply, ScreenStatus};
use crate::api::response::parse_admin_overview;
use crate::api::{AdminOverview, ApiCall, RequestTag};
use crate::app::patch::{remove_by_key, update_by_key};
use crate::domain::{Application, Job, JobBoardError, Result};

pub const LOAD_FAILED: &str = "Failed to fetch jobs and applications";
pub const VERIFY_FAILED: &str = "Failed to verify job post";
pub const DELETE_JOB_FAILED: &str = "Failed to delete job post";
pub const DELETE_APPLICATION_FAILED: &str = "Failed to delete application";
pub const ACCESS_DENIED: &str = "You do not have admin access.";
pub const NO_JOBS: &str = "No job posts available.";
pub const NO_APPLICATIONS: &str = "No applications available.";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AdminAccess {
    #[default]
    Checking,
    Denied,
    Granted,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AdminSection {
    #[default]
    Jobs,
    Applications,
}

impl AdminSection {
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Jobs => "Job Posts",
            Self::Applications => "Job Applications",
        }
    }

    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::Jobs => Self::Applications,
            Self::Applications => Self::Jobs,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdminScreen {
    pub access: AdminAccess,
    pub jobs: Vec<Job>,
    pub applications: Vec<Application>,
    pub section: AdminSection,
    pub job_cursor: ListCursor,
    pub application_cursor: ListCursor,
    pub status: ScreenStatus,
}

impl AdminScreen {
    #[must_use]
    pub fn mount(email: String) -> (Self, Vec<Effect>) {
        let screen = Self {
            status: ScreenStatus::loading(),
            ..Self::default()
        };
        (screen, vec![Effect::Call(ApiCall::AdminOverview { email })])
    }

    pub fn switch_section(&mut self) {
        self.section = self.section.other();
    }

    pub fn move_down(&mut self) {
        match self.section {
            AdminSection::Jobs => self.job_cursor.down(self.jobs.len()),
            AdminSection::Applications => self.application_cursor.down(self.applications.len()),
        }
    }

    pub fn move_up(&mut self) {
        match self.section {
            AdminSection::Jobs => self.job_cursor.up(self.jobs.len()),
            AdminSection::Applications => self.application_cursor.up(self.applications.len()),
        }
    }

    #[must_use]
    pub fn selected_job(&self) -> Option<&Job> {
        self.jobs.get(self.job_cursor.index)
    }

    #[must_use]
    pub fn selected_application(&self) -> Option<&Application> {
        self.applications.get(self.application_cursor.index)
    }

    /// Verifies the selected job; already verified jobs offer nothing.
    #[must_use]
    pub fn verify_selected(&self) -> Vec<Effect> {
        if self.access != AdminAccess::Granted || self.section != AdminSection::Jobs {
            return vec![];
        }
        match self.selected_job() {
            Some(job) if !job.verified => vec![Effect::Call(ApiCall::VerifyJob {
                job_id: job.id.clone(),
            })],
            _ => vec![],
        }
    }

    /// Deletes the selected entry of the focused section.
    #[must_use]
    pub fn delete_selected(&self) -> Vec<Effect> {
        if self.access != AdminAccess::Granted {
            return vec![];
        }
        let call = match self.section {
            AdminSection::Jobs => self.selected_job().map(|job| ApiCall::AdminDeleteJob {
                job_id: job.id.clone(),
            }),
            AdminSection::Applications => {
                self.selected_application()
                    .map(|app| ApiCall::AdminDeleteApplication {
                        application_id: app.id.clone(),
                    })
            }
        };
        call.map(Effect::Call).into_iter().collect()
    }

    pub fn on_response(&mut self, tag: &RequestTag, reply: Reply<'_>) -> Vec<Effect> {
        match tag {
            RequestTag::AdminOverview => self.on_overview(reply),
            RequestTag::VerifyJob { job_id } => match reply {
                Ok(_) => {
                    update_by_key(&mut self.jobs, job_id, |job| job.verified = true);
                    self.status.clear();
                }
                Err(e) => {
                    log_failure("verify job", &e);
                    self.status.fail(VERIFY_FAILED);
                }
            },
            RequestTag::AdminDeleteJob { job_id } => match reply {
                Ok(_) => {
                    remove_by_key(&mut self.jobs, job_id);
                    self.job_cursor.clamp(self.jobs.len());
                    self.status.clear();
                }
                Err(e) => {
                    log_failure("admin delete job", &e);
                    self.status.fail(DELETE_JOB_FAILED);
                }
            },
            RequestTag::AdminDeleteApplication { application_id } => match reply {
                Ok(_) => {
                    remove_by_key(&mut self.applications, application_id);
                    self.application_cursor.clamp(self.applications.len());
                    self.status.clear();
                }
                Err(e) => {
                    log_failure("admin delete application", &e);
                    self.status.fail(DELETE_APPLICATION_FAILED);
                }
            },
            other => tracing::debug!(tag = ?other, "unexpected response on admin screen"),
        }
        vec![]
    }

    fn on_overview(&mut self, reply: Reply<'_>) {
        match reply.and_then(load_overview) {
            Ok(overview) => {
                tracing::debug!(
                    job_count = overview.jobs.len(),
                    application_count = overview.applications.len(),
                    "admin overview loaded"
                );
                self.access = AdminAccess::Granted;
                self.jobs = overview.jobs;
                self.applications = overview.applications;
                self.status.loaded();
            }
            Err(JobBoardError::Forbidden) => {
                tracing::info!("admin access denied");
                self.access = AdminAccess::Denied;
                self.status.loaded();
            }
            Err(e) => {
                log_failure("admin overview", &e);
                self.status.fail(LOAD_FAILED);
            }
        }
    }
}

/// Decodes the overview; every application must name its job and applicant.
fn load_overview(body: &[u8]) -> Result<AdminOverview> {
    let overview = parse_admin_overview(body)?;
    for app in &overview.applications {
        app.require_job()?;
        app.require_applicant()?;
    }
    Ok(overview)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forbidden_switches_to_denied() {
        let (mut screen, _) = AdminScreen::mount("ada@x.io".into());
        screen.on_response(&RequestTag::AdminOverview, Err(JobBoardError::Forbidden));
        assert_eq!(screen.access, AdminAccess::Denied);
        assert!(screen.status.error.is_none());
        assert!(!screen.status.loading);
    }

    #[test]
    fn other_failures_are_screen_errors() {
        let (mut screen, _) = AdminScreen::mount("ada@x.io".into());
        screen.on_response(
            &RequestTag::AdminOverview,
            Err(JobBoardError::Transport("offline".into())),
        );
        assert_eq!(screen.access, AdminAccess::Checking);
        assert_eq!(screen.status.error.as_deref(), Some(LOAD_FAILED));
    }

    #[test]
    fn section_toggle_keeps_cursors_apart() {
        let mut screen = AdminScreen {
            access: AdminAccess::Granted,
            ..AdminScreen::default()
        };
        screen.switch_section();
        assert_eq!(screen.section, AdminSection::Applications);
        assert!(screen.verify_selected().is_empty());
        screen.switch_section();
        assert_eq!(screen.section.title(), "Job Posts");
    }
}
